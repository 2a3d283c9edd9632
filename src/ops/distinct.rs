use std::{collections::HashSet, hash::Hash};

use crate::live_data::LiveData;

impl<T: Clone + 'static> LiveData<T> {
  /// Forwards a value only if it was never forwarded before.
  ///
  /// Every distinct value is remembered for the lifetime of the container.
  pub fn distinct(&self) -> LiveData<T>
  where
    T: Eq + Hash,
  {
    self.distinct_by_key(T::clone)
  }

  /// Forwards a value only if its key was never seen before.
  ///
  /// Every distinct key is remembered for the lifetime of the container.
  pub fn distinct_by_key<K, F>(&self, mut key: F) -> LiveData<T>
  where
    K: Eq + Hash + 'static,
    F: FnMut(&T) -> K + 'static,
  {
    let mut seen = HashSet::new();
    self.derive(move |emitter, value| {
      if seen.insert(key(&value)) {
        emitter.set_value(value)
      }
    })
  }
}
