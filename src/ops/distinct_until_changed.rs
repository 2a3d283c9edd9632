//! Consecutive-duplicate suppression.
//!
//! Each variant compares an incoming value against the last *forwarded*
//! value, not the last received one: suppressed values never become the
//! reference for the next comparison.

use crate::{live_data::LiveData, slot::Slot};

impl<T: Clone + 'static> LiveData<T> {
  /// Forwards a value only if it differs from the previous forwarded one.
  pub fn distinct_until_changed(&self) -> LiveData<T>
  where
    T: PartialEq,
  {
    self.distinct_until_changed_by(|last, next| last == next)
  }

  /// Forwards a value only if its key differs from the key of the previous
  /// forwarded value. The first value always passes.
  pub fn distinct_until_changed_by_key<K, F>(&self, mut key: F) -> LiveData<T>
  where
    K: PartialEq + 'static,
    F: FnMut(&T) -> K + 'static,
  {
    let mut previous = Slot::NotSet;
    self.derive(move |emitter, value| {
      let key = key(&value);
      if previous.get() != Some(&key) {
        previous = Slot::Set(key);
        emitter.set_value(value);
      }
    })
  }

  /// Forwards a value unless `same(last_forwarded, value)` holds. The first
  /// value always passes.
  pub fn distinct_until_changed_by<F>(&self, mut same: F) -> LiveData<T>
  where
    F: FnMut(&T, &T) -> bool + 'static,
  {
    let mut last: Slot<T> = Slot::NotSet;
    self.derive(move |emitter, value| {
      let changed = match last.get() {
        Some(last) => !same(last, &value),
        None => true,
      };
      if changed {
        last = Slot::Set(value.clone());
        emitter.set_value(value);
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use std::rc::Rc;

  use crate::prelude::*;

  #[rxlive_macro::test]
  fn consecutive_repeats() {
    let source = MutableLiveData::new();
    let (observer, _) = TestObserver::attach(&source.distinct_until_changed());
    for v in [1, 1, 2, 3, 3, 3, 4, 5, 5, 6] {
      source.set_value(v);
    }
    observer.assert_values(&[1, 2, 3, 4, 5, 6]);
  }

  #[rxlive_macro::test]
  fn by_key() {
    let source = MutableLiveData::new();
    let (observer, _) =
      TestObserver::attach(&source.distinct_until_changed_by_key(|v: &i32| v % 2 == 0));
    for v in [1, 1, 2, 3, 5, 7, 2, 4, 1, 5] {
      source.set_value(v);
    }
    observer.assert_values(&[1, 2, 3, 2, 1]);
  }

  #[rxlive_macro::test]
  fn by_identity() {
    let a1 = Rc::new("a");
    let a2 = Rc::new("a");
    let a3 = Rc::new("a");
    let a4 = Rc::new("a");
    let source = MutableLiveData::<Rc<&str>>::new();
    let (observer, _) = TestObserver::attach(&source.distinct_until_changed_by(Rc::ptr_eq));
    for v in [&a1, &a2, &a2, &a3, &a4, &a4, &a4] {
      source.set_value(v.clone());
    }

    let seen = observer.values();
    assert_eq!(seen.len(), 4);
    for (seen, expected) in seen.iter().zip([&a1, &a2, &a3, &a4]) {
      assert!(Rc::ptr_eq(seen, expected));
    }
  }

  #[rxlive_macro::test]
  fn compares_against_last_forwarded() {
    let source = MutableLiveData::new();
    let near = |last: &i32, next: &i32| (last - next).abs() < 3;
    let (observer, _) = TestObserver::attach(&source.distinct_until_changed_by(near));
    for v in [0, 1, 2, 3, 4, 5, 6] {
      source.set_value(v);
    }
    observer.assert_values(&[0, 3, 6]);
  }

  #[rxlive_macro::test]
  fn first_none_passes() {
    let source = MutableLiveData::new();
    let (observer, _) = TestObserver::attach(&source.distinct_until_changed());
    for v in [None, None, Some(1), None] {
      source.set_value(v);
    }
    observer.assert_values(&[None, Some(1), None]);
  }
}
