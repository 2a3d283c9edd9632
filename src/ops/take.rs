//! Take family
//!
//! `take_until` is inclusive: the value that satisfies the predicate is still
//! forwarded. `take_while` is exclusive: the first value that fails the
//! predicate is dropped. Both detach from the source on their terminal value,
//! after which the derived container keeps its last value forever.

use crate::{factory::never, live_data::LiveData, log::debug};

impl<T: Clone + 'static> LiveData<T> {
  /// Forwards the first `count` values. `take(0)` is a never-container with
  /// no link to `self`.
  pub fn take(&self, count: usize) -> LiveData<T> {
    if count == 0 {
      return never();
    }
    let mut taken = 0;
    self.take_until(move |_| {
      taken += 1;
      taken >= count
    })
  }

  /// Forwards only the first value.
  #[inline]
  pub fn first(&self) -> LiveData<T> { self.take(1) }

  /// Forwards every value and detaches right after the first one for which
  /// `predicate` returns `true`.
  pub fn take_until<F>(&self, mut predicate: F) -> LiveData<T>
  where
    F: FnMut(&T) -> bool + 'static,
  {
    self.derive(move |emitter, value| {
      if predicate(&value) {
        debug!("take_until reached its terminal value");
        emitter.detach();
      }
      emitter.set_value(value);
    })
  }

  /// Forwards values while `predicate` returns `true`, then detaches without
  /// forwarding the failing value.
  pub fn take_while<F>(&self, mut predicate: F) -> LiveData<T>
  where
    F: FnMut(&T) -> bool + 'static,
  {
    self.derive(move |emitter, value| {
      if predicate(&value) {
        emitter.set_value(value);
      } else {
        debug!("take_while predicate failed");
        emitter.detach();
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  fn run(derive: impl FnOnce(&LiveData<i32>) -> LiveData<i32>, input: &[i32]) -> TestObserver<i32> {
    let source = MutableLiveData::new();
    let (observer, _) = TestObserver::attach(&derive(&source));
    input.iter().for_each(|v| source.set_value(*v));
    observer
  }

  #[rxlive_macro::test]
  fn take_two() { run(|s| s.take(2), &[1, 2, 3, 4]).assert_values(&[1, 2]); }

  #[rxlive_macro::test]
  fn take_zero_is_never() {
    let source = MutableLiveData::with_value(1);
    let taken = source.take(0);
    let (observer, _) = TestObserver::attach(&taken);
    source.set_value(2);

    observer.assert_empty();
    assert!(!source.has_active_observers());
  }

  #[rxlive_macro::test]
  fn take_more_than_available() { run(|s| s.take(10), &[1, 2, 3]).assert_values(&[1, 2, 3]); }

  #[rxlive_macro::test]
  fn first_only() { run(|s| s.first(), &[1, 2, 3]).assert_values(&[1]); }

  #[rxlive_macro::test]
  fn take_until_is_inclusive() {
    run(|s| s.take_until(|v| *v == 3), &[1, 2, 3, 4]).assert_values(&[1, 2, 3]);
  }

  #[rxlive_macro::test]
  fn take_while_is_exclusive() {
    run(|s| s.take_while(|v| *v <= 3), &[1, 2, 3, 4]).assert_values(&[1, 2, 3]);
    run(|s| s.take_while(|v| *v != 3), &[1, 2, 3, 4]).assert_values(&[1, 2]);
  }

  #[rxlive_macro::test]
  fn same_boundary_differs() {
    let until = run(|s| s.take_until(|v| *v == 3), &[1, 2, 3, 4]);
    let while_ = run(|s| s.take_while(|v| *v != 3), &[1, 2, 3, 4]);
    assert_eq!(until.count(), while_.count() + 1);
  }

  #[rxlive_macro::test]
  fn detaches_from_source() {
    let source = MutableLiveData::new();
    let taken = source.take(2);
    taken.activate();
    source.set_value(1);
    assert!(source.has_active_observers());
    source.set_value(2);
    assert!(!source.has_active_observers());
    source.set_value(3);
    assert_eq!(taken.value(), Some(2));
  }

  #[rxlive_macro::test]
  fn take_from_current_value() {
    let source = MutableLiveData::with_value(9);
    let taken = source.first();
    let (observer, _) = TestObserver::attach(&taken);
    source.set_value(10);

    observer.assert_values(&[9]);
    assert!(!source.has_active_observers());
  }
}
