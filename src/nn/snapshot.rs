use std::fs;
use std::path::Path;

use log::debug;
use serde::{ Serialize, Deserialize, de::DeserializeOwned };

use crate::{
  error::{ Error, Result },
  init::ParameterFactory,
  nn::{ Mlp, Module, mlp::{ validate_dims, count_parameters } },
  scalar::Real,
};


/// Layer sizes and parameter values of an [Mlp], in
/// [parameters](Module::parameters) order.
///
/// Only numbers get stored. Computation graphs are rebuilt by
/// running the restored network.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
  pub dims: Vec<usize>,
  pub parameters: Vec<T>,
}

impl<T: Real> Mlp<T> {
  pub fn snapshot(&self) -> Snapshot<T> {
    Snapshot {
      dims: self.dims(),
      parameters: self.parameters().iter().map(|param| param.data() ).collect(),
    }
  }

  pub fn from_snapshot(snapshot: &Snapshot<T>) -> Result<Self> {
    validate_dims(&snapshot.dims)?;
    let expected = count_parameters(&snapshot.dims).ok_or_else(|| Error::invalid_config(format!(
      "parameter count for dims {:?} overflows", snapshot.dims
    )))?;
    if snapshot.parameters.len() != expected {
      return Err(Error::invalid_config(format!(
        "dims {:?} need {} parameters, snapshot holds {}",
        snapshot.dims, expected, snapshot.parameters.len()
      )))
    }
    let mut values = snapshot.parameters.clone().into_iter();
    let mut factory = ParameterFactory::new(move || values.next().unwrap_or_else(T::nan) );
    Self::new(&snapshot.dims, &mut factory)
  }

  /// Overwrite this network's parameter values in place, keeping
  /// the identity of its parameter leaves.

  pub fn restore(&self, snapshot: &Snapshot<T>) -> Result<()> {
    if snapshot.dims != self.dims() {
      return Err(Error::invalid_config(format!(
        "snapshot dims {:?} don't match network dims {:?}", snapshot.dims, self.dims()
      )))
    }
    let params = self.parameters();
    if snapshot.parameters.len() != params.len() {
      return Err(Error::ShapeMismatch { expected: params.len(), actual: snapshot.parameters.len() })
    }
    for (param, &data) in params.iter().zip(&snapshot.parameters) {
      param.set_data(data);
    }
    Ok(())
  }
}

impl<T: Real + Serialize + DeserializeOwned> Mlp<T> {
  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    Ok(postcard::to_allocvec(&self.snapshot())?)
  }

  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    let snapshot: Snapshot<T> = postcard::from_bytes(bytes)?;
    Self::from_snapshot(&snapshot)
  }

  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, self.to_bytes()?)?;
    debug!("Saved {} parameters to {}", self.num_parameters(), path.display());
    Ok(())
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let bytes = fs::read(path)?;
    Self::from_bytes(&bytes)
  }
}
