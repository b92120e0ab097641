use std::fmt::{Debug, Display};

use rand::distributions::uniform::SampleUniform;
use num_traits::Float;


/// Floating point types that may be stored in a [Value](crate::Value).
///
/// This trait gets implemented automatically for all types
/// that satisfy its dependent traits, most notably [f64] and [f32].

pub trait Real: Float + SampleUniform + Debug + Display + 'static {}
impl<T: Float + SampleUniform + Debug + Display + 'static> Real for T {}
