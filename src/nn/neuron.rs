use itertools::Itertools;

use crate::{
  init::ParameterFactory,
  nn::Module,
  scalar::Real,
  value::Value,
};


/// Weighted sum of its inputs plus bias, squashed by `tanh`.

#[derive(Debug, Clone)]
pub struct Neuron<T: Real = f64> {
  weights: Vec<Value<T>>,
  bias: Value<T>,
}

impl<T: Real> Neuron<T> {
  pub fn new(nin: usize, factory: &mut ParameterFactory<T>) -> Self {
    let weights = factory.parameters(nin);
    let bias = Value::new(factory.sample());
    Self { weights, bias }
  }

  pub fn from_parts(weights: Vec<Value<T>>, bias: Value<T>) -> Self {
    Self { weights, bias }
  }

  pub fn nin(&self) -> usize {
    self.weights.len()
  }

  pub fn weights(&self) -> &[Value<T>] {
    &self.weights
  }

  pub fn bias(&self) -> &Value<T> {
    &self.bias
  }

  /// Compute `tanh(bias + Σ weight_i * input_i)`, adding `2n + 1`
  /// operation nodes to the graph.
  ///
  /// # Panics
  ///
  /// If the number of inputs doesn't match the number of weights.

  pub fn forward(&self, inputs: &[Value<T>]) -> Value<T> {
    self.weights.iter()
      .zip_eq(inputs)
      .fold(self.bias.clone(), |sum, (weight, input)| sum.add(weight.mul(input)) )
      .tanh()
  }
}

impl<T: Real> Module<T> for Neuron<T> {
  fn parameters(&self) -> Vec<Value<T>> {
    self.weights.iter()
      .chain(std::iter::once(&self.bias))
      .cloned()
      .collect()
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;

  fn neuron() -> Neuron {
    Neuron::from_parts(ParameterFactory::values(&[0.5, -1.0]), Value::new(0.25))
  }

  #[test]
  fn forward() {
    let inputs = ParameterFactory::values(&[2.0, 0.5]);
    let out = neuron().forward(&inputs);
    assert_abs_diff_eq!(out.data(), f64::tanh(0.25 + 1.0 - 0.5), epsilon = 1e-12);
  }

  #[test]
  fn node_count() {
    let n = neuron();
    let inputs = ParameterFactory::values(&[2.0, 0.5]);
    let out = n.forward(&inputs);
    let ops = out.topological_order().iter().filter(|v| !v.is_leaf() ).count();
    assert_eq!(ops, 2 * n.nin() + 1);
  }

  #[test]
  fn parameter_order() {
    let n = neuron();
    let params = n.parameters();
    assert_eq!(params.len(), 3);
    assert!(params[0].ptr_eq(&n.weights()[0]));
    assert!(params[1].ptr_eq(&n.weights()[1]));
    assert!(params[2].ptr_eq(n.bias()));
  }

  #[test]
  fn gradients() {
    let n = neuron();
    let inputs = ParameterFactory::values(&[2.0, 0.5]);
    let out = n.forward(&inputs);
    out.backward();
    let local = 1.0 - out.data() * out.data();
    assert_abs_diff_eq!(n.weights()[0].grad(), local * 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(n.bias().grad(), local, epsilon = 1e-12);
    assert_abs_diff_eq!(inputs[1].grad(), local * -1.0, epsilon = 1e-12);
    n.zero_grad();
    assert_eq!(n.bias().grad(), 0.0);
  }

  #[test]
  #[should_panic]
  fn input_width_mismatch() {
    neuron().forward(&ParameterFactory::values(&[1.0]));
  }
}
