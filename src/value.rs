use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::trace;

mod mops;

pub use mops::{ UnaryOp, BinaryOp };

use crate::scalar::Real;


fn make_id() -> usize {
  static LAST_ID: AtomicUsize = AtomicUsize::new(0);
  LAST_ID.fetch_add(1, Ordering::Relaxed)
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
  Unary(UnaryOp),
  Binary(BinaryOp),
}

impl Op {
  fn symbol(self) -> &'static str {
    match self {
      Op::Unary(op) => op.symbol(),
      Op::Binary(op) => op.symbol(),
    }
  }
}


/// Node in a computation graph, containing a [Value]'s data and gradient,
/// as well as the operation used to create it.

#[derive(Debug)]
struct Node<T: Real> {
  id: usize,
  cell: NodeCell<T>,
  op: Option<Op>,
  previous: Vec<Rc<Self>>,
  label: RefCell<String>,
}

impl<T: Real> Drop for Node<T> {
  // Unlink operands iteratively, as dropping a long chain
  // recursively would overflow the stack
  fn drop(&mut self) {
    let mut orphans = std::mem::take(&mut self.previous);
    while let Some(node) = orphans.pop() {
      if let Ok(mut node) = Rc::try_unwrap(node) {
        orphans.append(&mut node.previous);
      }
    }
  }
}

#[derive(Debug)]
struct NodeCell<T: Real> {
  data: Cell<T>,
  grad: Cell<T>,
}

impl<T: Real> Node<T> {
  fn data(&self) -> T {
    self.cell.data.get()
  }

  fn grad(&self) -> T {
    self.cell.grad.get()
  }

  fn accumulate(&self, change: T) {
    self.cell.grad.set(self.cell.grad.get() + change);
  }

  fn forward(&self) {
    if let Some(op) = self.op {
      let lhs = self.previous[0].data();
      let value = match op {
        Op::Unary(op) => op.run(lhs),
        Op::Binary(op) => op.run(lhs, self.previous[1].data()),
      };
      self.cell.data.set(value);
    }
  }

  fn backward(&self) {
    let Some(op) = self.op else { return };
    let grad = self.grad();
    let lhs = &self.previous[0];
    match op {
      Op::Unary(op) => lhs.accumulate(op.derive(lhs.data(), self.data(), grad)),
      Op::Binary(op) => {
        let rhs = &self.previous[1];
        // Both changes are computed before either is applied, so a node
        // used as both operands receives two contributions
        let (change_l, change_r) = op.derive(lhs.data(), rhs.data(), grad);
        lhs.accumulate(change_l);
        rhs.accumulate(change_r);
      },
    }
  }
}


/// A scalar that tracks the operations used to create it and allows
/// for computing its gradient with respect to every value involved.
///
/// Cloning a Value yields another handle to the *same* graph node.
/// Every operation returns a fresh node referencing its operands, so
/// graphs are acyclic by construction and may share subexpressions
/// freely.

#[derive(Clone)]
pub struct Value<T: Real = f64> {
  node: Rc<Node<T>>,
}

impl<T: Real> From<T> for Value<T> {
  fn from(data: T) -> Self {
    Self::new(data)
  }
}

impl<T: Real> From<&Value<T>> for Value<T> {
  fn from(value: &Value<T>) -> Self {
    value.clone()
  }
}

impl<T: Real> Value<T> {
  /// Create a leaf node without operands.

  pub fn new(data: T) -> Self {
    Self::operation(None, data, vec![])
  }

  pub fn named(data: T, label: impl Into<String>) -> Self {
    let value = Self::new(data);
    value.set_label(label);
    value
  }

  fn operation(op: Option<Op>, data: T, previous: Vec<Rc<Node<T>>>) -> Self {
    Self {
      node: Rc::new(Node {
        id: make_id(),
        cell: NodeCell {
          data: Cell::new(data),
          grad: Cell::new(T::zero()),
        },
        op,
        previous,
        label: RefCell::new(String::new()),
      }),
    }
  }

  pub fn id(&self) -> usize {
    self.node.id
  }

  pub fn data(&self) -> T {
    self.node.data()
  }

  pub fn grad(&self) -> T {
    self.node.grad()
  }

  pub fn label(&self) -> String {
    self.node.label.borrow().clone()
  }

  /// Overwrite this node's data, as done when updating parameters.
  ///
  /// Dependent nodes keep their previous results until [forward](Self::forward)
  /// gets called on them.

  pub fn set_data(&self, data: T) {
    self.node.cell.data.set(data);
  }

  pub fn set_grad(&self, grad: T) {
    self.node.cell.grad.set(grad);
  }

  pub fn set_label(&self, label: impl Into<String>) {
    *self.node.label.borrow_mut() = label.into();
  }

  pub fn is_leaf(&self) -> bool {
    self.node.op.is_none()
  }

  /// Whether both handles refer to the same graph node.

  pub fn ptr_eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.node, &other.node)
  }

  /// The nodes this one was computed from, in operand order.

  pub fn operands(&self) -> Vec<Self> {
    self.node.previous
      .iter()
      .map(|prev| Self { node: prev.clone() } )
      .collect()
  }

  pub fn unary_op(&self, op: UnaryOp) -> Self {
    let data = op.run(self.data());
    Self::operation(Some(Op::Unary(op)), data, vec![self.node.clone()])
  }

  pub fn binary_op(&self, op: BinaryOp, rhs: &Self) -> Self {
    let data = op.run(self.data(), rhs.data());
    Self::operation(Some(Op::Binary(op)), data, vec![self.node.clone(), rhs.node.clone()])
  }

  pub fn add(&self, rhs: impl Into<Self>) -> Self {
    self.binary_op(BinaryOp::Add, &rhs.into())
  }

  pub fn minus(&self, rhs: impl Into<Self>) -> Self {
    self.binary_op(BinaryOp::Sub, &rhs.into())
  }

  pub fn mul(&self, rhs: impl Into<Self>) -> Self {
    self.binary_op(BinaryOp::Mul, &rhs.into())
  }

  pub fn tanh(&self) -> Self {
    self.unary_op(UnaryOp::Tanh)
  }

  /// Reevaluate this Value's graph from the current data of its leaves.

  pub fn forward(&self) {
    for node in self.history() {
      node.forward();
    }
  }

  /// Compute gradients across this Value's entire graph.
  ///
  /// Seeds this node's gradient with one before propagating, so that
  /// afterwards every node holds the partial derivative of this
  /// Value with respect to that node. Gradients of other nodes accumulate
  /// across passes, so call [reset](Self::reset) in between.

  pub fn backward(&self) {
    self.set_grad(T::one());
    self.backpropagate();
  }

  /// Run the reverse pass with whatever gradient this node currently holds.
  ///
  /// Every node's backward rule gets invoked exactly once, after all of
  /// its consumers have deposited their contributions.

  pub fn backpropagate(&self) {
    let history = self.history();
    trace!("Backpropagating through {} nodes from #{}", history.len(), self.id());
    for node in history.iter().rev() {
      node.backward();
    }
  }

  /// Set gradients to zero for this Value's entire graph.

  pub fn reset(&self) {
    for node in self.history() {
      node.cell.grad.set(T::zero());
    }
  }

  /// All nodes reachable from this one, each listed once and
  /// after all of its operands. This node comes last.

  pub fn topological_order(&self) -> Vec<Self> {
    self.history()
      .into_iter()
      .map(|node| Self { node } )
      .collect()
  }

  // Depth first search with an explicit stack of (node, next operand) frames,
  // so deep chains don't exhaust the call stack
  fn history(&self) -> Vec<Rc<Node<T>>> {
    let mut history = vec![];
    let mut visited = HashSet::from([self.node.id]);
    let mut stack = vec![(self.node.clone(), 0)];
    while let Some((node, index)) = stack.pop() {
      match node.previous.get(index).cloned() {
        Some(prev) => {
          stack.push((node, index + 1));
          if visited.insert(prev.id) {
            stack.push((prev, 0));
          }
        },
        None => history.push(node),
      }
    }
    history
  }

  /// Estimate the derivative of this Value with respect to `input` using
  /// central differences, by perturbing `input` and reevaluating the graph.
  ///
  /// The original data of `input` and of the graph gets restored afterwards.
  /// Compare the result with `input.grad()` after a call to [backward](Self::backward)
  /// to check that a function gets differentiated correctly.

  pub fn check_gradient(&self, input: &Self, eps: T) -> T {
    let original = input.data();
    input.set_data(original + eps);
    self.forward();
    let next = self.data();
    input.set_data(original - eps);
    self.forward();
    let prev = self.data();
    input.set_data(original);
    self.forward();
    (next - prev) / ((T::one() + T::one()) * eps)
  }
}

impl<T: Real> std::fmt::Display for Value<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let label = self.node.label.borrow();
    let label = if label.is_empty() { "_" } else { label.as_str() };
    write!(f, "{label}({}, {})", self.data(), self.grad())
  }
}

impl<T: Real> std::fmt::Debug for Value<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.debug_struct("Value")
      .field("id", &self.id())
      .field("label", &*self.node.label.borrow())
      .field("op", &self.node.op.map(Op::symbol))
      .field("data", &self.data())
      .field("grad", &self.grad())
      .finish()
  }
}
