//! Reverse-mode automatic differentiation over scalar values.
//! Tiny. Few dependencies. Single-threaded.
//!
//! # Features
//!
//! - **Dynamic graphs** — Every operation on a [Value] creates a fresh node
//! referencing its operands. Nodes may be shared by any number of
//! downstream expressions and gradients from every path get summed.
//!
//! - **Exact gradients** — [Value::backward] visits the graph in reverse
//! topological order and applies each node's local derivative rule exactly once.
//!
//! - **Neural networks** — [Neuron]s, [Layer]s and [Mlp]s built directly on top
//! of the engine, with deterministic parameter initialization through
//! [ParameterFactory] and a [mean squared error](loss::mse) loss.
//!
//! - **Optimization** — Plain gradient descent, momentum and ADAM.
//!
//! # Examples
//!
//! Differentiating a small expression:
//! ```
//! use scalargrad::Value;
//!
//! let x = Value::named(1.0, "x");
//! let y = Value::named(3.0, "y");
//! let b = Value::named(1.0, "b");
//!
//! // z = (x + 1) * y + b
//! let z = x.add(1.0).mul(&y).add(&b);
//! z.backward();
//!
//! assert_eq!(x.grad(), 3.0);
//! assert_eq!(y.grad(), 2.0);
//! assert_eq!(b.grad(), 1.0);
//! ```
//!
//! Training a multi layer perceptron:
//! ```
//! use scalargrad::{ loss::mse, Mlp, Module, ParameterFactory, optimize::{ Optimizer, SGD } };
//!
//! # fn main() -> scalargrad::Result<()> {
//! let mlp = Mlp::new(&[3, 4, 4, 1], &mut ParameterFactory::seeded(1))?;
//! let xs = [[2.0, 3.0, -1.0], [3.0, -1.0, 0.5], [0.5, 1.0, 1.0], [1.0, 1.0, -1.0]];
//! let ys = ParameterFactory::values(&[1.0, -1.0, -1.0, 1.0]);
//! let mut optimizer = Optimizer::new(0.5, SGD);
//!
//! for _ in 0..20 {
//!   let predictions = xs.iter()
//!     .map(|x| mlp.predict(&ParameterFactory::values(x)) )
//!     .collect::<scalargrad::Result<Vec<_>>>()?;
//!   let loss = mse(&ys, &predictions)?;
//!   optimizer.minimize(&loss, &mlp.parameters());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## More examples
//! Check the `/demos` folder for more example code.

mod error;
mod init;
mod value;

pub mod loss;
pub mod nn;
pub mod optimize;
pub mod scalar;

pub use error::{ Error, Result };
pub use init::ParameterFactory;
pub use nn::{ Layer, Mlp, Module, Neuron, Snapshot };
pub use value::{ Value, UnaryOp, BinaryOp };
