use crate::live_data::LiveData;

/// Handle returned when attaching an observer, used to detach it again.
pub trait Subscription {
  /// Detaches the observer. Calling it more than once is a no-op.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;

  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self>
  where
    Self: Sized,
  {
    SubscriptionGuard(self)
  }
}

/// Links one observer to the container it was attached to.
///
/// Holding the handle keeps the container alive. Dropping it without calling
/// `unsubscribe` leaves the observer attached.
pub struct ObserverSubscription<T> {
  data: LiveData<T>,
  id: usize,
}

impl<T> ObserverSubscription<T> {
  pub(crate) fn new(data: LiveData<T>, id: usize) -> Self { Self { data, id } }

  /// The container this observer is attached to.
  pub fn data(&self) -> &LiveData<T> { &self.data }
}

impl<T: Clone + 'static> Subscription for ObserverSubscription<T> {
  #[inline]
  fn unsubscribe(&mut self) { self.data.remove_observer(self.id); }

  #[inline]
  fn is_closed(&self) -> bool { !self.data.contains_observer(self.id) }
}

impl<T> std::fmt::Debug for ObserverSubscription<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ObserverSubscription").field("id", &self.id).finish()
  }
}

impl<S: Subscription + ?Sized> Subscription for Box<S> {
  #[inline]
  fn unsubscribe(&mut self) { (**self).unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(pub(crate) T);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }

  pub fn inner(&self) -> &T { &self.0 }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}
