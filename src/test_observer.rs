//! Recording observer for asserting emitted sequences.

use std::fmt::Debug;

use crate::{
  live_data::LiveData,
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::ObserverSubscription,
};

/// Records every value it receives. Clones share the same record, so keep one
/// clone for assertions and attach another.
///
/// ```
/// use rxlive::prelude::*;
///
/// let source = MutableLiveData::new();
/// let observer = TestObserver::new();
/// source.observe_with(observer.clone());
/// source.set_value(1);
/// source.set_value(2);
/// observer.assert_values(&[1, 2]);
/// ```
pub struct TestObserver<T> {
  values: MutRc<Vec<T>>,
}

impl<T> TestObserver<T> {
  pub fn new() -> Self { Self { values: MutRc::own(vec![]) } }

  pub fn count(&self) -> usize { self.values.rc_deref().len() }

  pub fn is_empty(&self) -> bool { self.values.rc_deref().is_empty() }

  pub fn clear(&self) { self.values.rc_deref_mut().clear() }
}

impl<T: Clone + 'static> TestObserver<T> {
  /// Creates an observer already attached to `data`.
  pub fn attach(data: &LiveData<T>) -> (Self, ObserverSubscription<T>) {
    let observer = Self::new();
    let subscription = data.observe_with(observer.clone());
    (observer, subscription)
  }

  pub fn values(&self) -> Vec<T> { self.values.rc_deref().clone() }

  pub fn first(&self) -> Option<T> { self.values.rc_deref().first().cloned() }

  pub fn last(&self) -> Option<T> { self.values.rc_deref().last().cloned() }
}

impl<T: PartialEq + Debug> TestObserver<T> {
  #[track_caller]
  pub fn assert_values(&self, expected: &[T]) {
    assert_eq!(self.values.rc_deref().as_slice(), expected);
  }
}

impl<T> TestObserver<T> {
  #[track_caller]
  pub fn assert_empty(&self) {
    assert!(self.is_empty(), "expected no values, got {}", self.count());
  }

  #[track_caller]
  pub fn assert_count(&self, count: usize) { assert_eq!(self.count(), count); }
}

impl<T> Observer<T> for TestObserver<T> {
  fn on_changed(&mut self, value: T) { self.values.rc_deref_mut().push(value) }
}

impl<T> Clone for TestObserver<T> {
  fn clone(&self) -> Self { Self { values: self.values.clone() } }
}

impl<T> Default for TestObserver<T> {
  fn default() -> Self { Self::new() }
}

impl<T: Debug> Debug for TestObserver<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TestObserver").field("values", &self.values).finish()
  }
}
