use crate::live_data::LiveData;

impl<T: Clone + 'static> LiveData<T> {
  /// Drops the first `count` values.
  pub fn skip(&self, count: usize) -> LiveData<T> {
    let mut seen = 0;
    self.skip_while(move |_| {
      seen += 1;
      seen > count
    })
  }

  /// Drops values until `predicate` first returns `true`. That value and
  /// every later one are forwarded, whatever the predicate would say.
  pub fn skip_while<F>(&self, mut predicate: F) -> LiveData<T>
  where
    F: FnMut(&T) -> bool + 'static,
  {
    let mut dropping = true;
    self.derive(move |emitter, value| {
      if !dropping || predicate(&value) {
        dropping = false;
        emitter.set_value(value);
      }
    })
  }
}
