use crate::{
  factory::{create, just},
  live_data::{LiveData, MediatorLiveData},
};

impl<T: Clone + 'static> LiveData<T> {
  /// Publishes `value` on activation, then mirrors `self`.
  ///
  /// The returned container holds nothing until it is observed.
  pub fn start_with(&self, value: T) -> LiveData<T> { self.start_with_data(&just(value)) }

  /// Publishes the result of `init` on first activation, then mirrors `self`.
  pub fn start_with_fn<F>(&self, init: F) -> LiveData<T>
  where
    F: FnOnce() -> T + 'static,
  {
    self.start_with_data(&create(init))
  }

  /// Waits for the first value of `first`, publishes it, detaches `first`
  /// and only then starts mirroring `self`.
  pub fn start_with_data(&self, first: &LiveData<T>) -> LiveData<T> {
    let mediator = MediatorLiveData::new();
    let source = self.clone();
    mediator.link(first, move |emitter, value| {
      emitter.detach();
      emitter.set_value(value);
      emitter.mediator().link(&source, |emitter, value| emitter.set_value(value));
    });
    mediator.into_live_data()
  }
}
