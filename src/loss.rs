use crate::{
  error::{ Error, Result },
  scalar::Real,
  value::Value,
};


/// Mean squared error `(1/n) · Σ (predictions[i] - targets[i])²`.
///
/// The result is itself part of the predictions' graph and can be
/// differentiated with [backward](Value::backward).
///
/// ```
/// use scalargrad::{ loss::mse, ParameterFactory };
///
/// let targets = ParameterFactory::values(&[0.0, 1.0]);
/// let predictions = ParameterFactory::values(&[1.0, 1.0]);
/// assert_eq!(mse(&targets, &predictions)?.data(), 0.5);
/// # Ok::<(), scalargrad::Error>(())
/// ```

pub fn mse<T: Real>(targets: &[Value<T>], predictions: &[Value<T>]) -> Result<Value<T>> {
  if targets.len() != predictions.len() {
    return Err(Error::ShapeMismatch { expected: targets.len(), actual: predictions.len() })
  }
  let n = T::from(targets.len()).ok_or(Error::EmptyInput)?;
  let sum = targets.iter()
    .zip(predictions)
    .map(|(target, prediction)| {
      let diff = prediction.minus(target);
      diff.mul(&diff)
    })
    .reduce(|sum, square| sum.add(square) )
    .ok_or(Error::EmptyInput)?;
  Ok(sum.mul(T::one() / n))
}


#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;
  use crate::init::ParameterFactory;

  #[test]
  fn exact() {
    let targets = ParameterFactory::values(&[0.0, 1.0]);
    let predictions = ParameterFactory::values(&[1.0, 1.0]);
    assert_eq!(mse(&targets, &predictions).unwrap().data(), 0.5);
  }

  #[test]
  fn gradients() {
    let targets = ParameterFactory::values(&[1.0, -1.0, 0.5]);
    let predictions = ParameterFactory::values(&[0.5, -0.25, 0.5]);
    let loss = mse(&targets, &predictions).unwrap();
    loss.backward();
    // d/dp_i = 2 (p_i - t_i) / n
    assert_abs_diff_eq!(predictions[0].grad(), -1.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(predictions[1].grad(), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(predictions[2].grad(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(targets[1].grad(), -0.5, epsilon = 1e-12);
  }

  #[test]
  fn mismatched_lengths() {
    let targets = ParameterFactory::values(&[0.0, 1.0]);
    let predictions = ParameterFactory::values(&[1.0]);
    assert!(matches!(
      mse(&targets, &predictions),
      Err(Error::ShapeMismatch { expected: 2, actual: 1 })
    ));
  }

  #[test]
  fn many_pairs() {
    let n = 100_000;
    let targets = ParameterFactory::values(&vec![0.0_f64; n]);
    let predictions = ParameterFactory::values(&vec![1.0_f64; n]);
    let loss = mse(&targets, &predictions).unwrap();
    loss.backward();
    assert_abs_diff_eq!(loss.data(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(predictions[n - 1].grad(), 2.0 / n as f64, epsilon = 1e-12);
    assert_abs_diff_eq!(targets[0].grad(), -2.0 / n as f64, epsilon = 1e-12);
  }

  #[test]
  fn empty() {
    let empty: Vec<Value> = vec![];
    assert!(matches!(mse(&empty, &empty), Err(Error::EmptyInput)));
  }
}
