use itertools::Itertools;
use log::debug;

use crate::{
  error::{ Error, Result },
  init::ParameterFactory,
  nn::{ Layer, Module },
  scalar::Real,
  value::Value,
};


/// Multi layer perceptron, chaining [Layer]s from input to output.
///
/// ```
/// use scalargrad::{ Mlp, Module, ParameterFactory };
///
/// let mut factory = ParameterFactory::seeded(0);
/// let mlp = Mlp::new(&[3, 4, 4, 1], &mut factory)?;
/// assert_eq!(mlp.num_parameters(), 41);
///
/// let x = ParameterFactory::values(&[2.0, 3.0, -1.0]);
/// let y = mlp.predict(&x)?;
/// y.backward();
/// # Ok::<(), scalargrad::Error>(())
/// ```

#[derive(Debug, Clone)]
pub struct Mlp<T: Real = f64> {
  layers: Vec<Layer<T>>,
}

impl<T: Real> Mlp<T> {
  /// Build a network from layer sizes, the first being the input width.
  ///
  /// Parameters get drawn from `factory` in the same order
  /// [parameters](Module::parameters) lists them.

  pub fn new(dims: &[usize], factory: &mut ParameterFactory<T>) -> Result<Self> {
    validate_dims(dims)?;
    let layers = dims.iter()
      .tuple_windows()
      .map(|(&nin, &nout)| Layer::new(nin, nout, factory) )
      .collect();
    debug!("Built MLP with dims {:?}", dims);
    Ok(Self { layers })
  }

  pub fn layers(&self) -> &[Layer<T>] {
    &self.layers
  }

  pub fn dims(&self) -> Vec<usize> {
    std::iter::once(self.nin())
      .chain(self.layers.iter().map(Layer::nout))
      .collect()
  }

  pub fn nin(&self) -> usize {
    self.layers.first().map_or(0, Layer::nin)
  }

  pub fn nout(&self) -> usize {
    self.layers.last().map_or(0, Layer::nout)
  }

  /// Pipe `inputs` through every layer, building a fresh graph.
  ///
  /// # Panics
  ///
  /// If the number of inputs doesn't match the network's input width.

  pub fn forward(&self, inputs: &[Value<T>]) -> Vec<Value<T>> {
    self.layers
      .iter()
      .fold(inputs.to_vec(), |x, layer| layer.forward(&x) )
  }

  /// Forward pass of a network with a single output.

  pub fn predict(&self, inputs: &[Value<T>]) -> Result<Value<T>> {
    if self.nout() != 1 {
      return Err(Error::ShapeMismatch { expected: 1, actual: self.nout() })
    }
    self.forward(inputs).pop().ok_or(Error::EmptyInput)
  }
}

impl<T: Real> Module<T> for Mlp<T> {
  fn parameters(&self) -> Vec<Value<T>> {
    self.layers.iter().flat_map(Layer::parameters).collect()
  }
}


pub(crate) fn validate_dims(dims: &[usize]) -> Result<()> {
  if dims.len() < 2 {
    return Err(Error::invalid_config(format!(
      "an MLP needs at least an input and an output size, got {:?}", dims
    )))
  }
  if dims.contains(&0) {
    return Err(Error::invalid_config(format!("layer sizes must be non-zero, got {:?}", dims)))
  }
  Ok(())
}

/// Number of parameters a network with `dims` holds, or `None` on overflow.

pub(crate) fn count_parameters(dims: &[usize]) -> Option<usize> {
  dims.iter()
    .tuple_windows()
    .try_fold(0usize, |sum, (&nin, &nout)| {
      nin.checked_add(1)?.checked_mul(nout)?.checked_add(sum)
    })
}
