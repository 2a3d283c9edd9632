use std::{any::Any, rc::Rc};

use crate::live_data::LiveData;

impl<T: Clone + 'static> LiveData<T> {
  /// Forwards only the values that pass `predicate`.
  ///
  /// ```
  /// use rxlive::prelude::*;
  ///
  /// let source = MutableLiveData::new();
  /// let observer = TestObserver::new();
  /// source.filter(|v| v % 2 == 0).observe_with(observer.clone());
  /// for v in 0..6 {
  ///   source.set_value(v);
  /// }
  /// observer.assert_values(&[0, 2, 4]);
  /// ```
  pub fn filter<F>(&self, mut predicate: F) -> LiveData<T>
  where
    F: FnMut(&T) -> bool + 'static,
  {
    self.derive(move |emitter, value| {
      if predicate(&value) {
        emitter.set_value(value)
      }
    })
  }

  /// Forwards only the values that fail `predicate`.
  pub fn filter_not<F>(&self, mut predicate: F) -> LiveData<T>
  where
    F: FnMut(&T) -> bool + 'static,
  {
    self.filter(move |v| !predicate(v))
  }

  /// Maps each value and forwards the `Some` results.
  pub fn filter_map<R, F>(&self, mut f: F) -> LiveData<R>
  where
    R: Clone + 'static,
    F: FnMut(T) -> Option<R> + 'static,
  {
    self.derive(move |emitter, value| {
      if let Some(v) = f(value) {
        emitter.set_value(v)
      }
    })
  }
}

impl<T: Clone + 'static> LiveData<Option<T>> {
  /// Drops `None` values and unwraps the rest.
  pub fn filter_some(&self) -> LiveData<T> { self.filter_map(|v| v) }
}

impl LiveData<Rc<dyn Any>> {
  /// Forwards only the values whose concrete type is `U`.
  pub fn filter_is_instance<U: Any>(&self) -> LiveData<Rc<U>> {
    self.filter_map(|v: Rc<dyn Any>| v.downcast::<U>().ok())
  }
}
