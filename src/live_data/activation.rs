use super::LiveData;

/// Callbacks run when a container becomes active (first observer attached)
/// or inactive (last observer removed).
pub(crate) trait Activation<T> {
  fn on_active(&mut self, _data: &LiveData<T>) {}

  fn on_inactive(&mut self, _data: &LiveData<T>) {}
}

/// Computes the container's value on first activation, once.
pub(crate) struct LazyValue<F>(Option<F>);

impl<F> LazyValue<F> {
  pub fn new(init: F) -> Self { Self(Some(init)) }
}

impl<T, F> Activation<T> for LazyValue<F>
where
  T: Clone + 'static,
  F: FnOnce() -> T,
{
  fn on_active(&mut self, data: &LiveData<T>) {
    if let Some(init) = self.0.take() {
      data.publish(init());
    }
  }
}

pub(crate) struct OnActive<F>(pub F);

impl<F: FnMut()> Activation<()> for OnActive<F> {
  fn on_active(&mut self, _: &LiveData<()>) { (self.0)() }
}

pub(crate) struct OnInactive<F>(pub F);

impl<F: FnMut()> Activation<()> for OnInactive<F> {
  fn on_inactive(&mut self, _: &LiveData<()>) { (self.0)() }
}
