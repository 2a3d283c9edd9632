//! Side-effect hooks
//!
//! `do_on_active`/`do_on_inactive` attach a value-less hook container as an
//! extra source of the derived container. The hook is observed exactly while
//! the derived container is active, so its own activation callbacks track the
//! derived container's.

use crate::live_data::{Activation, LiveData, MediatorLiveData, OnActive, OnInactive};

impl<T: Clone + 'static> LiveData<T> {
  /// Forwards every value, then calls `f` with it.
  pub fn do_on_value<F>(&self, mut f: F) -> LiveData<T>
  where
    F: FnMut(&T) + 'static,
  {
    self.derive(move |emitter, value: T| {
      emitter.set_value(value.clone());
      f(&value);
    })
  }

  /// Calls `f` each time the returned container becomes active.
  pub fn do_on_active<F>(&self, f: F) -> LiveData<T>
  where
    F: FnMut() + 'static,
  {
    self.with_activation_hook(OnActive(f))
  }

  /// Calls `f` each time the returned container becomes inactive.
  pub fn do_on_inactive<F>(&self, f: F) -> LiveData<T>
  where
    F: FnMut() + 'static,
  {
    self.with_activation_hook(OnInactive(f))
  }

  fn with_activation_hook(&self, hook: impl Activation<()> + 'static) -> LiveData<T> {
    let hook = LiveData::<()>::new_hooked(Box::new(hook));
    let mediator = MediatorLiveData::new();
    mediator.link(self, |emitter, value| emitter.set_value(value));
    mediator.link(&hook, |_, _| {});
    mediator.into_live_data()
  }
}
