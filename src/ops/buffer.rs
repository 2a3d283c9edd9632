use crate::{factory::never, live_data::LiveData};

impl<T: Clone + 'static> LiveData<T> {
  /// Groups values into non-overlapping windows of `count`.
  ///
  /// ```
  /// use rxlive::prelude::*;
  ///
  /// let source = MutableLiveData::new();
  /// let observer = TestObserver::new();
  /// source.buffer(2).observe_with(observer.clone());
  /// for v in 0..5 {
  ///   source.set_value(v);
  /// }
  /// observer.assert_values(&[vec![0, 1], vec![2, 3]]);
  /// ```
  pub fn buffer(&self, count: usize) -> LiveData<Vec<T>> { self.buffer_with_skip(count, count) }

  /// Starts a window every `skip` values and keeps the first `count` values
  /// of each window. Values past `count` inside a window are dropped.
  ///
  /// A `skip` of zero never completes a window and yields a never-container.
  pub fn buffer_with_skip(&self, count: usize, skip: usize) -> LiveData<Vec<T>> {
    if skip == 0 {
      return never();
    }
    let size = count.min(skip);
    let mut buffer = Vec::with_capacity(size);
    let mut received = 0;
    self.derive(move |emitter, value| {
      if received < count {
        buffer.push(value);
      }
      received += 1;
      if received == skip {
        received = 0;
        let window = std::mem::replace(&mut buffer, Vec::with_capacity(size));
        emitter.set_value(window);
      }
    })
  }
}
