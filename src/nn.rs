//! Tiny feed-forward networks built directly on [Value]s.
//!
//! All trainable values are stored explicitly and the model's code gets
//! re-executed for every forward pass, creating a fresh computation graph
//! on top of the same parameter leaves every time.

mod neuron;
mod layer;
mod mlp;
mod snapshot;

pub use neuron::Neuron;
pub use layer::Layer;
pub use mlp::Mlp;
pub use snapshot::Snapshot;

use crate::{
  scalar::Real,
  value::Value,
};


/// Anything that owns trainable parameters.

pub trait Module<T: Real> {
  /// Every owned parameter leaf, in a stable order.
  fn parameters(&self) -> Vec<Value<T>>;

  fn num_parameters(&self) -> usize {
    self.parameters().len()
  }

  /// Set the gradients of all parameters to zero.
  fn zero_grad(&self) {
    for param in self.parameters() {
      param.set_grad(T::zero());
    }
  }
}
