//! Mediator containers and their upstream links.
//!
//! Every derived container is a [`MediatorLiveData`] with one link per
//! upstream source. A link observes its upstream only while the mediator is
//! active: mediator activation plugs every link, deactivation unplugs them,
//! so an unobserved chain does no work and holds no observers upstream.
//!
//! While plugged, the upstream owns the link's observer and that observer
//! owns the mediator, which keeps an observed chain alive from its root.

use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  ops::Deref,
  rc::{Rc, Weak},
};

use super::{AsLiveData, Core, LiveData};
use crate::{
  error::LiveDataError,
  log::debug,
  observer::Observer,
  subscription::{ObserverSubscription, Subscription},
};

/// Identifies one source of a mediator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(usize);

/// Type-erased upstream edge stored by a mediator.
pub(crate) trait Source {
  /// Starts observing the upstream. No-op when already plugged or closed.
  fn plug(self: Rc<Self>);
  /// Stops observing the upstream; the link can be plugged again later.
  fn unplug(&self);
  /// Unplugs for good. A closed link never delivers again.
  fn close(&self);
}

/// A container fed by callbacks registered on other containers.
pub struct MediatorLiveData<T>(LiveData<T>);

impl<T: Clone + 'static> MediatorLiveData<T> {
  pub fn new() -> Self { Self(LiveData::new_empty()) }

  /// Registers `source`. `on_changed` runs for each value `source` publishes
  /// while this mediator is active, and decides what, if anything, to
  /// publish through the [`Emitter`].
  ///
  /// A container cannot be its own source.
  pub fn add_source<S, F>(
    &self, source: &LiveData<S>, on_changed: F,
  ) -> Result<SourceId, LiveDataError>
  where
    S: Clone + 'static,
    F: FnMut(&Emitter<T>, S) + 'static,
  {
    if self.0.same_container(source) {
      return Err(LiveDataError::SelfSource);
    }
    Ok(self.link(source, on_changed))
  }

  /// Detaches a source. Returns `false` if it was already removed.
  pub fn remove_source(&self, id: SourceId) -> bool {
    let link = self.0 .0.sources.borrow_mut().remove(id.0);
    match link {
      Some(link) => {
        link.close();
        true
      }
      None => false,
    }
  }

  #[inline]
  pub fn has_source(&self, id: SourceId) -> bool { self.0 .0.sources.borrow().contains(id.0) }

  #[inline]
  pub fn source_count(&self) -> usize { self.0 .0.sources.borrow().len() }

  pub fn set_value(&self, value: T) { self.0.publish(value) }

  pub fn to_live_data(&self) -> LiveData<T> { self.0.clone() }

  pub fn into_live_data(self) -> LiveData<T> { self.0 }

  pub(crate) fn link<S, F>(&self, source: &LiveData<S>, on_changed: F) -> SourceId
  where
    S: Clone + 'static,
    F: FnMut(&Emitter<T>, S) + 'static,
  {
    let id = SourceId(self.0 .0.sources.borrow_mut().reserve_id());
    let link = Rc::new(Link {
      id,
      upstream: source.clone(),
      mediator: Rc::downgrade(&self.0 .0),
      on_changed: RefCell::new(Box::new(on_changed)),
      seen_version: Cell::new(0),
      live: Cell::new(true),
      plugged: Cell::new(false),
      subscription: RefCell::new(None),
    });
    self.0 .0.sources.borrow_mut().insert(id.0, link.clone());
    if self.has_active_observers() {
      link.plug();
    }
    id
  }
}

impl<T: Clone + 'static> Default for MediatorLiveData<T> {
  fn default() -> Self { Self::new() }
}

impl<T> Clone for MediatorLiveData<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Deref for MediatorLiveData<T> {
  type Target = LiveData<T>;
  #[inline]
  fn deref(&self) -> &LiveData<T> { &self.0 }
}

impl<T: Clone + 'static> AsLiveData for MediatorLiveData<T> {
  type Item = T;
  #[inline]
  fn as_live_data(&self) -> &LiveData<T> { &self.0 }
}

impl<T: Debug> Debug for MediatorLiveData<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("MediatorLiveData").field(&self.0).finish()
  }
}

/// Handed to source callbacks so they can publish on the mediator or detach
/// their own source.
pub struct Emitter<T> {
  mediator: MediatorLiveData<T>,
  source: SourceId,
}

impl<T: Clone + 'static> Emitter<T> {
  #[inline]
  pub fn set_value(&self, value: T) { self.mediator.set_value(value) }

  /// Removes the source this callback belongs to. Values already in flight
  /// from it are dropped.
  #[inline]
  pub fn detach(&self) -> bool { self.mediator.remove_source(self.source) }

  #[inline]
  pub fn source(&self) -> SourceId { self.source }

  #[inline]
  pub fn mediator(&self) -> &MediatorLiveData<T> { &self.mediator }
}

struct Link<S, T> {
  id: SourceId,
  upstream: LiveData<S>,
  mediator: Weak<Core<T>>,
  on_changed: RefCell<Box<dyn FnMut(&Emitter<T>, S)>>,
  /// Upstream version last delivered, so a replug does not replay it.
  seen_version: Cell<u64>,
  live: Cell<bool>,
  plugged: Cell<bool>,
  subscription: RefCell<Option<ObserverSubscription<S>>>,
}

impl<S: Clone + 'static, T: Clone + 'static> Link<S, T> {
  fn deliver(&self, mediator: &MediatorLiveData<T>, value: S) {
    if !self.live.get() {
      return;
    }
    let version = self.upstream.version();
    if version <= self.seen_version.get() {
      return;
    }
    // The upstream re-delivers its latest version once this callback returns.
    let Ok(mut on_changed) = self.on_changed.try_borrow_mut() else {
      debug!(source = self.id.0, "source callback is still running, value deferred");
      return;
    };
    self.seen_version.set(version);

    let emitter = Emitter { mediator: mediator.clone(), source: self.id };
    (*on_changed)(&emitter, value);
  }
}

impl<S: Clone + 'static, T: Clone + 'static> Source for Link<S, T> {
  fn plug(self: Rc<Self>) {
    if !self.live.get() || self.plugged.get() {
      return;
    }
    let Some(core) = self.mediator.upgrade() else { return };
    debug!(source = self.id.0, "source plugged");
    self.plugged.set(true);

    let observer = LinkObserver { link: self.clone(), mediator: MediatorLiveData(LiveData(core)) };
    let mut subscription = self.upstream.observe_with(observer);

    // The replay above may have closed or unplugged this link, or plugged it
    // again from a nested activation.
    let keep = self.live.get() && self.plugged.get() && self.subscription.borrow().is_none();
    if keep {
      *self.subscription.borrow_mut() = Some(subscription);
    } else {
      subscription.unsubscribe();
    }
  }

  fn unplug(&self) {
    if !self.plugged.replace(false) {
      return;
    }
    debug!(source = self.id.0, "source unplugged");
    let subscription = self.subscription.borrow_mut().take();
    if let Some(mut subscription) = subscription {
      subscription.unsubscribe();
    }
  }

  fn close(&self) {
    self.live.set(false);
    self.unplug();
  }
}

struct LinkObserver<S, T> {
  link: Rc<Link<S, T>>,
  mediator: MediatorLiveData<T>,
}

impl<S: Clone + 'static, T: Clone + 'static> Observer<S> for LinkObserver<S, T> {
  #[inline]
  fn on_changed(&mut self, value: S) { self.link.deliver(&self.mediator, value) }
}
