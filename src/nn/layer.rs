use crate::{
  error::{ Error, Result },
  init::ParameterFactory,
  nn::{ Module, Neuron },
  scalar::Real,
  value::Value,
};


/// A row of independent neurons sharing the same inputs.

#[derive(Debug, Clone)]
pub struct Layer<T: Real = f64> {
  neurons: Vec<Neuron<T>>,
}

impl<T: Real> Layer<T> {
  pub fn new(nin: usize, nout: usize, factory: &mut ParameterFactory<T>) -> Self {
    Self {
      neurons: (0..nout).map(|_| Neuron::new(nin, factory) ).collect(),
    }
  }

  /// Assemble a layer from existing neurons, which must all take the same
  /// number of inputs.

  pub fn from_neurons(neurons: Vec<Neuron<T>>) -> Result<Self> {
    let nin = neurons.first().ok_or(Error::EmptyInput)?.nin();
    if let Some(other) = neurons.iter().find(|neuron| neuron.nin() != nin ) {
      return Err(Error::ShapeMismatch { expected: nin, actual: other.nin() })
    }
    Ok(Self { neurons })
  }

  pub fn nin(&self) -> usize {
    self.neurons.first().map_or(0, Neuron::nin)
  }

  pub fn nout(&self) -> usize {
    self.neurons.len()
  }

  pub fn neurons(&self) -> &[Neuron<T>] {
    &self.neurons
  }

  pub fn forward(&self, inputs: &[Value<T>]) -> Vec<Value<T>> {
    self.neurons.iter().map(|neuron| neuron.forward(inputs) ).collect()
  }
}

impl<T: Real> Module<T> for Layer<T> {
  fn parameters(&self) -> Vec<Value<T>> {
    self.neurons.iter().flat_map(Neuron::parameters).collect()
  }
}
