//! SwitchMap operator implementation
//!
//! Every value of the outer container is mapped to an inner container and the
//! output follows only the most recent inner one. The previous inner link is
//! removed before the next one is added, so a superseded inner container can
//! never reach the output.

use crate::{
  live_data::{LiveData, SourceId},
  log::debug,
};

impl<T: Clone + 'static> LiveData<T> {
  /// Maps each value to an inner container and mirrors the latest one.
  ///
  /// `mapper` may return a `LiveData<R>` or an `Option<LiveData<R>>`; `None`
  /// detaches the current inner container and publishes nothing. Returning
  /// the inner container that is already mirrored keeps the existing link.
  ///
  /// ```
  /// use rxlive::prelude::*;
  ///
  /// let selected = MutableLiveData::new();
  /// let a = MutableLiveData::with_value("a1");
  /// let b = MutableLiveData::with_value("b1");
  /// let (c_a, c_b) = (a.hide(), b.hide());
  /// let current: LiveData<&str> =
  ///   selected.switch_map(move |first: bool| if first { c_a.clone() } else { c_b.clone() });
  ///
  /// let observer = TestObserver::new();
  /// current.observe_with(observer.clone());
  /// selected.set_value(true);
  /// a.set_value("a2");
  /// selected.set_value(false);
  /// a.set_value("a3");
  /// observer.assert_values(&["a1", "a2", "b1"]);
  /// ```
  pub fn switch_map<R, I, F>(&self, mut mapper: F) -> LiveData<R>
  where
    R: Clone + 'static,
    I: Into<Option<LiveData<R>>>,
    F: FnMut(T) -> I + 'static,
  {
    let mut current: Option<(LiveData<R>, SourceId)> = None;
    self.derive(move |emitter, value| {
      let next = mapper(value).into();
      if let (Some((inner, _)), Some(next)) = (&current, &next) {
        if inner.ptr_eq(next) {
          return;
        }
      }
      if let Some((_, id)) = current.take() {
        debug!("switch_map dropping previous inner container");
        emitter.mediator().remove_source(id);
      }
      if let Some(next) = next {
        let id = emitter.mediator().link(&next, |emitter, value| emitter.set_value(value));
        current = Some((next, id));
      }
    })
  }
}

impl<T: Clone + 'static> LiveData<LiveData<T>> {
  /// Mirrors the most recent inner container.
  pub fn switch_latest(&self) -> LiveData<T> { self.switch_map(|inner| inner) }
}

impl<T: Clone + 'static> LiveData<Option<LiveData<T>>> {
  /// Mirrors the most recent inner container; `None` pauses the output.
  pub fn switch_latest(&self) -> LiveData<T> { self.switch_map(|inner| inner) }
}
