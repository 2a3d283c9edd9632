//! Container constructors
//!
//! Sources that are not set by the caller: an empty container, a constant,
//! and a lazily computed constant.

use crate::live_data::{LazyValue, LiveData};

/// A container that never holds a value.
///
/// Distinct from a container holding `None`: observers are never called.
pub fn never<T>() -> LiveData<T> { LiveData::new_empty() }

/// A container holding `value` forever.
pub fn just<T>(value: T) -> LiveData<T> { LiveData::new_with(value) }

/// A container whose single value is computed by `init` the first time it
/// becomes active. Later activations reuse that value.
pub fn create<T, F>(init: F) -> LiveData<T>
where
  T: Clone + 'static,
  F: FnOnce() -> T + 'static,
{
  LiveData::new_hooked(Box::new(LazyValue::new(init)))
}
