use rand::{ Rng, SeedableRng, rngs::StdRng };

use crate::{
  scalar::Real,
  value::Value,
};


/// Source of leaf [Value]s for weights, biases and named inputs.
///
/// Wraps any `FnMut() -> T`, so deterministic sequences can be
/// substituted for random initialization in tests.
///
/// ```
/// use scalargrad::ParameterFactory;
///
/// let mut factory = ParameterFactory::seeded(42);
/// let weights = factory.parameters(3);
/// assert!(weights.iter().all(|w| (-1.0..1.0).contains(&w.data()) ));
/// ```

pub struct ParameterFactory<T: Real = f64> {
  source: Box<dyn FnMut() -> T>,
}

impl<T: Real> ParameterFactory<T> {
  pub fn new(source: impl FnMut() -> T + 'static) -> Self {
    Self { source: Box::new(source) }
  }

  /// Uniform samples in [-1, 1) drawn from `rng`.

  pub fn from_rng(mut rng: impl Rng + 'static) -> Self {
    Self::new(move || rng.gen_range(-T::one(), T::one()) )
  }

  /// Reproducible uniform samples in [-1, 1).

  pub fn seeded(seed: u64) -> Self {
    Self::from_rng(StdRng::seed_from_u64(seed))
  }

  pub fn from_entropy() -> Self {
    Self::from_rng(StdRng::from_entropy())
  }

  pub fn sample(&mut self) -> T {
    (self.source)()
  }

  /// Create `n` fresh leaves initialized from this factory's source.

  pub fn parameters(&mut self, n: usize) -> Vec<Value<T>> {
    (0..n).map(|_| Value::new(self.sample()) ).collect()
  }

  /// Create leaves holding exactly the given numbers.

  pub fn values(data: &[T]) -> Vec<Value<T>> {
    data.iter().map(|&item| Value::new(item) ).collect()
  }

  pub fn named(entries: &[(&str, T)]) -> Vec<Value<T>> {
    entries.iter().map(|&(label, item)| Value::named(item, label) ).collect()
  }
}

impl<T: Real> std::fmt::Debug for ParameterFactory<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.debug_struct("ParameterFactory").finish_non_exhaustive()
  }
}
