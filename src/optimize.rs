use std::collections::HashMap;

use log::debug;

use crate::{
  scalar::Real,
  value::Value,
};


/// An optimization strategy to be used with [Optimizer].

pub trait Strategy<R: Real> {
  /// Change to be added to `param`'s data, given its current gradient.
  fn update(&mut self, param: &Value<R>, rate: R, step: usize) -> R;
}


/// Generic optimizer that allows for several optimization [strategies](Strategy) to be used.
///
/// ```
/// use scalargrad::{ Value, optimize::{ Optimizer, SGD } };
///
/// let x = Value::new(3.0_f64);
/// let mut optimizer = Optimizer::new(0.1, SGD);
/// for _ in 0..50 {
///   let loss = x.mul(&x);
///   optimizer.minimize(&loss, &[x.clone()]);
/// }
/// assert!(x.data().abs() < 0.01);
/// ```

#[derive(Debug)]
pub struct Optimizer<R: Real, S: Strategy<R>> {
  strategy: S,
  pub learning_rate: R,
  step: usize,
}

impl<R: Real, S: Strategy<R>> Optimizer<R, S> {
  pub fn new(learning_rate: R, strategy: S) -> Self {
    Self { strategy, learning_rate, step: 1 }
  }

  /// Number of updates applied so far.

  pub fn steps(&self) -> usize {
    self.step - 1
  }

  /// Apply one update to every parameter using its current gradient.

  pub fn step(&mut self, params: &[Value<R>]) {
    for param in params {
      let change = self.strategy.update(param, self.learning_rate, self.step);
      param.set_data(param.data() + change);
    }
    debug!("Optimizer step {} updated {} parameters", self.step, params.len());
    self.step += 1;
  }

  /// Compute gradients of `loss`, update `params` and reset gradients.

  pub fn minimize(&mut self, loss: &Value<R>, params: &[Value<R>]) {
    loss.backward();
    self.step(params);
    loss.reset();
  }
}


/// Plain gradient descent: `data -= rate * grad`

#[derive(Debug, Clone, Copy, Default)]
pub struct SGD;

impl<R: Real> Strategy<R> for SGD {
  fn update(&mut self, param: &Value<R>, rate: R, _step: usize) -> R {
    -rate * param.grad()
  }
}


/// Stochastic Gradient Descent with momentum

#[derive(Debug, Clone)]
pub struct Momentum<R: Real> {
  pub momentum: R,
  v: HashMap<usize, R>,
}

impl<R: Real> Momentum<R> {
  pub fn new(momentum: R) -> Self {
    Self {
      momentum,
      v: HashMap::new(),
    }
  }
}

impl<R: Real> Default for Momentum<R> {
  fn default() -> Self {
    Self::new(R::from(0.9).unwrap_or_else(R::zero))
  }
}

impl<R: Real> Strategy<R> for Momentum<R> {
  fn update(&mut self, param: &Value<R>, rate: R, _step: usize) -> R {
    let v = self.v.entry(param.id()).or_insert_with(R::zero);
    *v = *v * self.momentum - param.grad() * rate;
    *v
  }
}


/// Adaptive Moment Estimation strategy (ADAM)

#[derive(Debug, Clone)]
pub struct Adam<R: Real> {
  pub beta1: R,
  pub beta2: R,
  pub epsilon: R,
  m: HashMap<usize, R>,
  v: HashMap<usize, R>,
}

impl<R: Real> Adam<R> {
  pub fn new(beta1: R, beta2: R, epsilon: R) -> Self {
    Self {
      beta1,
      beta2,
      epsilon,
      m: HashMap::new(),
      v: HashMap::new(),
    }
  }
}

impl<R: Real> Default for Adam<R> {
  fn default() -> Self {
    let cast = |x: f64| R::from(x).unwrap_or_else(R::zero);
    Self::new(cast(0.9), cast(0.999), cast(1e-8))
  }
}

impl<R: Real> Strategy<R> for Adam<R> {
  fn update(&mut self, param: &Value<R>, rate: R, step: usize) -> R {
    let id = param.id();
    let grad = param.grad();
    let m = self.m.entry(id).or_insert_with(R::zero);
    *m = *m * self.beta1 + grad * (R::one() - self.beta1);
    let v = self.v.entry(id).or_insert_with(R::zero);
    *v = *v * self.beta2 + grad * grad * (R::one() - self.beta2);
    let step = i32::try_from(step).unwrap_or(i32::MAX);
    let mt = self.m[&id] / (R::one() - self.beta1.powi(step));
    let vt = self.v[&id] / (R::one() - self.beta2.powi(step));
    -rate * mt / (vt.sqrt() + self.epsilon)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn quadratic<S: Strategy<f64>>(strategy: S, rate: f64, steps: usize) -> (f64, f64) {
    let x = Value::new(2.0_f64);
    let initial = (x.data() - 0.5).powi(2);
    let mut optimizer = Optimizer::new(rate, strategy);
    for _ in 0..steps {
      let diff = x.minus(0.5);
      let loss = diff.mul(&diff);
      optimizer.minimize(&loss, &[x.clone()]);
    }
    assert_eq!(optimizer.steps(), steps);
    (initial, (x.data() - 0.5).powi(2))
  }

  #[test]
  fn adam_late_steps() {
    let x = Value::new(1.0_f64);
    x.set_grad(0.5);
    let m: f64 = 0.5 * (1.0 - 0.9);
    let v: f64 = 0.25 * (1.0 - 0.999);
    for step in [i32::MAX as usize + 1, usize::MAX] {
      let mut adam = Adam::default();
      let change = adam.update(&x, 0.1, step);
      assert!(change.is_finite());
      approx::assert_relative_eq!(change, -0.1 * m / (v.sqrt() + 1e-8), max_relative = 1e-9);
    }
  }

  #[test]
  fn sgd_step() {
    let x = Value::new(1.0);
    x.set_grad(0.5);
    let mut optimizer = Optimizer::new(0.1, SGD);
    optimizer.step(&[x.clone()]);
    assert_eq!(x.data(), 1.0 - 0.1 * 0.5);
    // Gradients are left for the caller to reset
    assert_eq!(x.grad(), 0.5);
  }

  #[test]
  fn minimize_resets_gradients() {
    let x = Value::new(1.0);
    let loss = x.mul(&x);
    let mut optimizer = Optimizer::new(0.25, SGD);
    optimizer.minimize(&loss, &[x.clone()]);
    assert_eq!(x.data(), 0.5);
    assert_eq!(x.grad(), 0.0);
    assert_eq!(loss.grad(), 0.0);
  }

  #[test]
  fn strategies_converge() {
    let (initial, sgd) = quadratic(SGD, 0.1, 100);
    let (_, momentum) = quadratic(Momentum::default(), 0.05, 100);
    let (_, adam) = quadratic(Adam::default(), 0.05, 300);
    assert!(sgd < initial * 1e-6);
    assert!(momentum < initial * 1e-3);
    assert!(adam < initial * 1e-2);
  }
}
