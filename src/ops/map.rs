use crate::live_data::LiveData;

impl<T: Clone + 'static> LiveData<T> {
  /// Creates a new container which calls a closure on each value and holds
  /// its return.
  ///
  /// ```
  /// use rxlive::prelude::*;
  ///
  /// let source = MutableLiveData::with_value(2);
  /// let squared = source.map(|v| v * v);
  /// let observer = TestObserver::new();
  /// squared.observe_with(observer.clone());
  /// observer.assert_values(&[4]);
  /// ```
  pub fn map<R, F>(&self, mut f: F) -> LiveData<R>
  where
    R: Clone + 'static,
    F: FnMut(T) -> R + 'static,
  {
    self.derive(move |emitter, value| emitter.set_value(f(value)))
  }

  /// Converts each value with `Into`.
  pub fn cast<R>(&self) -> LiveData<R>
  where
    T: Into<R>,
    R: Clone + 'static,
  {
    self.map(Into::into)
  }
}
