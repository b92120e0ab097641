use crate::{
  scalar::Real,
  value::Value,
};


/// Differentiable operation on a single [Value].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
  Tanh,
}

impl UnaryOp {
  pub fn run<T: Real>(self, input: T) -> T {
    match self {
      // Exponential identity, overflows to NaN for large magnitudes
      UnaryOp::Tanh => {
        let e = ((T::one() + T::one()) * input).exp();
        (e - T::one()) / (e + T::one())
      },
    }
  }

  /// Contribution to the operand's gradient, given the operation's
  /// input, its forward result and the gradient flowing into it.

  pub fn derive<T: Real>(self, _input: T, output: T, grad: T) -> T {
    match self {
      UnaryOp::Tanh => grad * (T::one() - output * output),
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      UnaryOp::Tanh => "tanh",
    }
  }
}


/// Differentiable operation on a pair of [Value]s.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
}

impl BinaryOp {
  pub fn run<T: Real>(self, lhs: T, rhs: T) -> T {
    match self {
      BinaryOp::Add => lhs + rhs,
      BinaryOp::Sub => lhs - rhs,
      BinaryOp::Mul => lhs * rhs,
    }
  }

  /// Contributions to both operands' gradients.

  pub fn derive<T: Real>(self, lhs: T, rhs: T, grad: T) -> (T, T) {
    match self {
      BinaryOp::Add => (grad, grad),
      BinaryOp::Sub => (grad, -grad),
      BinaryOp::Mul => (grad * rhs, grad * lhs),
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
    }
  }
}


impl<T: Real> std::ops::Neg for &Value<T> {
  type Output = Value<T>;

  fn neg(self) -> Self::Output {
    self.binary_op(BinaryOp::Mul, &Value::new(-T::one()))
  }
}

impl<T: Real> std::ops::Neg for Value<T> {
  type Output = Value<T>;

  fn neg(self) -> Self::Output {
    -&self
  }
}

macro_rules! add_operator {
  ($op:ident, $meth:ident, $symbol:tt) => {
    impl<T: Real> std::ops::$op for &Value<T> { // &value + &other
      type Output = Value<T>;

      fn $meth(self, rhs: Self) -> Value<T> {
        self.binary_op(BinaryOp::$op, rhs)
      }
    }

    impl<T: Real> std::ops::$op for Value<T> { // value + other
      type Output = Value<T>;

      fn $meth(self, rhs: Self) -> Value<T> {
        &self $symbol &rhs
      }
    }

    impl<T: Real> std::ops::$op<Value<T>> for &Value<T> { // &value + other
      type Output = Value<T>;

      fn $meth(self, rhs: Value<T>) -> Value<T> {
        self $symbol &rhs
      }
    }

    impl<T: Real> std::ops::$op<&Value<T>> for Value<T> { // value + &other
      type Output = Value<T>;

      fn $meth(self, rhs: &Value<T>) -> Value<T> {
        &self $symbol rhs
      }
    }

    impl<T: Real> std::ops::$op<T> for &Value<T> { // &value + T
      type Output = Value<T>;

      fn $meth(self, rhs: T) -> Value<T> {
        self $symbol &Value::new(rhs)
      }
    }

    impl<T: Real> std::ops::$op<T> for Value<T> { // value + T
      type Output = Value<T>;

      fn $meth(self, rhs: T) -> Value<T> {
        &self $symbol &Value::new(rhs)
      }
    }

    add_operator!(@primitive $op, $meth, $symbol, f32);
    add_operator!(@primitive $op, $meth, $symbol, f64);
  };

  (@primitive $op:ident, $meth:ident, $symbol:tt, $prim:ty) => {
    impl std::ops::$op<&Value<$prim>> for $prim { // T + &value
      type Output = Value<$prim>;

      fn $meth(self, rhs: &Value<$prim>) -> Value<$prim> {
        &Value::new(self) $symbol rhs
      }
    }

    impl std::ops::$op<Value<$prim>> for $prim { // T + value
      type Output = Value<$prim>;

      fn $meth(self, rhs: Value<$prim>) -> Value<$prim> {
        &Value::new(self) $symbol &rhs
      }
    }
  };
}

add_operator!(Add, add, +);
add_operator!(Sub, sub, -);
add_operator!(Mul, mul, *);
