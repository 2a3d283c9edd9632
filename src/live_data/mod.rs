//! Observable single-value containers.
//!
//! A [`LiveData`] holds at most one current value and pushes every new value
//! to its observers, synchronously and in subscription order. A container is
//! *active* while it has at least one observer; activation and deactivation
//! are the only moments a container does any work on its own.
//!
//! # Dispatch
//!
//! Setting a value bumps the container's version and walks the observer list.
//! Each observer remembers the last version it saw, so no observer receives
//! the same value twice. A value set while the container is still
//! dispatching does not recurse: the running dispatch is invalidated and
//! restarts with the newest value once the current observer returns.
//!
//! No `RefCell` borrow is held while user code runs.

mod activation;
mod mediator;
mod registry;

use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  ops::Deref,
  rc::Rc,
};

pub(crate) use activation::{Activation, LazyValue, OnActive, OnInactive};
pub use mediator::{Emitter, MediatorLiveData, SourceId};
pub(crate) use mediator::Source;
pub(crate) use registry::Registry;

use crate::{
  log::{debug, trace},
  observer::{EmptyObserver, FnMutObserver, Observer},
  slot::Slot,
  subscription::ObserverSubscription,
};

/// Read-only handle to a container.
///
/// Cloning is cheap and yields another handle to the same container.
pub struct LiveData<T>(pub(crate) Rc<Core<T>>);

pub(crate) struct Core<T> {
  state: RefCell<State<T>>,
  sources: RefCell<Registry<Rc<dyn Source>>>,
  hooks: RefCell<Option<Box<dyn Activation<T>>>>,
}

struct State<T> {
  value: Slot<T>,
  /// Bumped on every write; `0` means no value was ever set.
  version: u64,
  observers: Registry<Rc<ObserverEntry<T>>>,
  dispatching: bool,
  invalidated: bool,
}

struct ObserverEntry<T> {
  observer: RefCell<Box<dyn Observer<T>>>,
  last_version: Cell<u64>,
  live: Cell<bool>,
}

impl<T> ObserverEntry<T> {
  fn new(observer: Box<dyn Observer<T>>) -> Self {
    Self { observer: RefCell::new(observer), last_version: Cell::new(0), live: Cell::new(true) }
  }
}

struct DispatchGuard<'a, T>(&'a RefCell<State<T>>);

impl<T> Drop for DispatchGuard<'_, T> {
  fn drop(&mut self) {
    if let Ok(mut state) = self.0.try_borrow_mut() {
      state.dispatching = false;
      state.invalidated = false;
    }
  }
}

impl<T> LiveData<T> {
  fn from_parts(value: Slot<T>, hooks: Option<Box<dyn Activation<T>>>) -> Self {
    let version = u64::from(value.is_set());
    Self(Rc::new(Core {
      state: RefCell::new(State {
        value,
        version,
        observers: Registry::default(),
        dispatching: false,
        invalidated: false,
      }),
      sources: RefCell::new(Registry::default()),
      hooks: RefCell::new(hooks),
    }))
  }

  pub(crate) fn new_empty() -> Self { Self::from_parts(Slot::NotSet, None) }

  pub(crate) fn new_with(value: T) -> Self { Self::from_parts(Slot::Set(value), None) }

  pub(crate) fn new_hooked(hooks: Box<dyn Activation<T>>) -> Self {
    Self::from_parts(Slot::NotSet, Some(hooks))
  }

  /// Whether both handles point at the same container.
  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }

  pub(crate) fn same_container<S>(&self, other: &LiveData<S>) -> bool {
    std::ptr::eq(Rc::as_ptr(&self.0) as *const (), Rc::as_ptr(&other.0) as *const ())
  }

  #[inline]
  pub fn has_active_observers(&self) -> bool { !self.0.state.borrow().observers.is_empty() }

  #[inline]
  pub fn observer_count(&self) -> usize { self.0.state.borrow().observers.len() }

  #[inline]
  pub fn has_value(&self) -> bool { self.0.state.borrow().value.is_set() }

  #[inline]
  pub(crate) fn version(&self) -> u64 { self.0.state.borrow().version }

  pub(crate) fn contains_observer(&self, id: usize) -> bool {
    self.0.state.borrow().observers.contains(id)
  }
}

impl<T: Clone + 'static> LiveData<T> {
  /// The current value, if one was ever set.
  pub fn value(&self) -> Option<T> { self.0.state.borrow().value.get().cloned() }

  /// Attaches a closure. It is called right away with the current value, if
  /// there is one, and then with every new value.
  pub fn observe<F>(&self, on_changed: F) -> ObserverSubscription<T>
  where
    F: FnMut(T) + 'static,
  {
    self.observe_with(FnMutObserver(on_changed))
  }

  pub fn observe_with<O>(&self, observer: O) -> ObserverSubscription<T>
  where
    O: Observer<T> + 'static,
  {
    let entry = Rc::new(ObserverEntry::new(Box::new(observer)));
    let (id, activated) = {
      let mut state = self.0.state.borrow_mut();
      let id = state.observers.add(entry.clone());
      (id, state.observers.len() == 1)
    };
    if activated {
      self.on_active();
    }
    self.dispatch(Some(entry));
    ObserverSubscription::new(self.clone(), id)
  }

  /// Copies every value into `target`.
  pub fn observe_into(&self, target: &MutableLiveData<T>) -> ObserverSubscription<T> {
    self.observe_with(target.clone())
  }

  /// Keeps the container active without looking at its values.
  pub fn activate(&self) -> ObserverSubscription<T> { self.observe_with(EmptyObserver) }

  pub(crate) fn publish(&self, value: T) {
    let previous = {
      let mut state = self.0.state.borrow_mut();
      state.version += 1;
      state.value.replace(value)
    };
    drop(previous);
    self.dispatch(None);
  }

  pub(crate) fn remove_observer(&self, id: usize) -> bool {
    let (entry, deactivated) = {
      let mut state = self.0.state.borrow_mut();
      let entry = state.observers.remove(id);
      let deactivated = entry.is_some() && state.observers.is_empty();
      (entry, deactivated)
    };
    let Some(entry) = entry else { return false };
    entry.live.set(false);
    if deactivated {
      self.on_inactive();
    }
    drop(entry);
    true
  }

  fn on_active(&self) {
    trace!("container activated");
    self.run_hooks(true);
    let sources = self.0.sources.borrow().snapshot();
    for source in sources {
      if !self.has_active_observers() {
        break;
      }
      source.plug();
    }
  }

  fn on_inactive(&self) {
    trace!("container deactivated");
    self.run_hooks(false);
    let sources = self.0.sources.borrow().snapshot();
    for source in sources.iter() {
      source.unplug();
    }
  }

  fn run_hooks(&self, active: bool) {
    let hooks = self.0.hooks.borrow_mut().take();
    let Some(mut hooks) = hooks else { return };
    if active {
      hooks.on_active(self);
    } else {
      hooks.on_inactive(self);
    }
    let mut slot = self.0.hooks.borrow_mut();
    if slot.is_none() {
      *slot = Some(hooks);
    }
  }

  fn dispatch(&self, initiator: Option<Rc<ObserverEntry<T>>>) {
    {
      let mut state = self.0.state.borrow_mut();
      if state.dispatching {
        state.invalidated = true;
        trace!("dispatch in progress, restarting with the newest value");
        return;
      }
      state.dispatching = true;
    }
    let _guard = DispatchGuard(&self.0.state);

    let mut initiator = initiator;
    loop {
      self.0.state.borrow_mut().invalidated = false;
      match initiator.take() {
        Some(entry) => self.consider_notify(&entry),
        None => {
          let observers = self.0.state.borrow().observers.snapshot();
          for entry in observers.iter() {
            self.consider_notify(entry);
            if self.0.state.borrow().invalidated {
              break;
            }
          }
        }
      }
      if !self.0.state.borrow().invalidated {
        break;
      }
    }
  }

  fn consider_notify(&self, entry: &ObserverEntry<T>) {
    if !entry.live.get() {
      return;
    }
    let Ok(mut observer) = entry.observer.try_borrow_mut() else {
      debug!("observer is still running, value deferred to the restarted dispatch");
      return;
    };
    let value = {
      let state = self.0.state.borrow();
      let Slot::Set(value) = &state.value else { return };
      if entry.last_version.get() >= state.version {
        return;
      }
      entry.last_version.set(state.version);
      value.clone()
    };
    observer.on_changed(value);
  }
}

impl<T> Clone for LiveData<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T: Debug> Debug for LiveData<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut s = f.debug_struct("LiveData");
    match self.0.state.try_borrow() {
      Ok(state) => s.field("value", &state.value.get()).field("observers", &state.observers.len()),
      Err(_) => s.field("value", &"<dispatching>"),
    };
    s.finish()
  }
}

/// A container whose value is set by the caller.
pub struct MutableLiveData<T>(LiveData<T>);

impl<T: Clone + 'static> MutableLiveData<T> {
  /// An empty container.
  pub fn new() -> Self { Self(LiveData::new_empty()) }

  pub fn with_value(value: T) -> Self { Self(LiveData::new_with(value)) }

  /// Stores `value` and pushes it to every active observer.
  pub fn set_value(&self, value: T) { self.0.publish(value) }

  /// A read-only handle to this container.
  pub fn hide(&self) -> LiveData<T> { self.0.clone() }
}

impl<T: Clone + 'static> Default for MutableLiveData<T> {
  fn default() -> Self { Self::new() }
}

impl<T> Clone for MutableLiveData<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Deref for MutableLiveData<T> {
  type Target = LiveData<T>;
  #[inline]
  fn deref(&self) -> &LiveData<T> { &self.0 }
}

impl<T: Debug> Debug for MutableLiveData<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("MutableLiveData").field(&self.0).finish()
  }
}

/// Anything that can be viewed as a container of `Item`.
///
/// Lets fan-in operators accept mutable, mediator and read-only handles
/// alike, by value or by reference.
pub trait AsLiveData {
  type Item: Clone + 'static;
  fn as_live_data(&self) -> &LiveData<Self::Item>;
}

impl<T: Clone + 'static> AsLiveData for LiveData<T> {
  type Item = T;
  #[inline]
  fn as_live_data(&self) -> &LiveData<T> { self }
}

impl<T: Clone + 'static> AsLiveData for MutableLiveData<T> {
  type Item = T;
  #[inline]
  fn as_live_data(&self) -> &LiveData<T> { &self.0 }
}

impl<S: AsLiveData + ?Sized> AsLiveData for &S {
  type Item = S::Item;
  #[inline]
  fn as_live_data(&self) -> &LiveData<S::Item> { (**self).as_live_data() }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxlive_macro::test]
  fn replays_current_value_to_new_observer() {
    let data = MutableLiveData::with_value(1);
    let result = Rc::new(RefCell::new(vec![]));
    let c_result = result.clone();
    data.observe(move |v| c_result.borrow_mut().push(v));
    data.set_value(2);

    assert_eq!(*result.borrow(), vec![1, 2]);
  }

  #[rxlive_macro::test]
  fn empty_container_does_not_notify() {
    let data = MutableLiveData::<i32>::new();
    let observer = TestObserver::new();
    data.observe_with(observer.clone());

    observer.assert_empty();
    assert!(!data.has_value());
    assert_eq!(data.value(), None);
  }

  #[rxlive_macro::test]
  fn notifies_in_subscription_order() {
    let data = MutableLiveData::new();
    let order = Rc::new(RefCell::new(vec![]));
    for name in ["a", "b", "c"] {
      let order = order.clone();
      data.observe(move |v: i32| order.borrow_mut().push((name, v)));
    }
    data.set_value(1);

    assert_eq!(*order.borrow(), vec![("a", 1), ("b", 1), ("c", 1)]);
  }

  #[rxlive_macro::test]
  fn unsubscribed_observer_stops_receiving() {
    let data = MutableLiveData::new();
    let observer = TestObserver::new();
    let mut subscription = data.observe_with(observer.clone());
    data.set_value(1);
    subscription.unsubscribe();
    data.set_value(2);

    observer.assert_values(&[1]);
    assert_eq!(data.value(), Some(2));
  }

  #[rxlive_macro::test]
  fn nested_set_restarts_dispatch() {
    let data = MutableLiveData::new();
    let first = TestObserver::new();
    let second = TestObserver::new();
    let c_data = data.clone();
    let mut c_first = first.clone();
    data.observe(move |v: i32| {
      c_first.on_changed(v);
      if v == 1 {
        c_data.set_value(2);
      }
    });
    data.observe_with(second.clone());
    data.set_value(1);

    first.assert_values(&[1, 2]);
    second.assert_values(&[2]);
  }

  #[rxlive_macro::test]
  fn observer_added_during_dispatch_gets_value_once() {
    let data = MutableLiveData::new();
    let late = TestObserver::new();
    let c_data = data.clone();
    let c_late = late.clone();
    let added = Rc::new(RefCell::new(false));
    data.observe(move |_: i32| {
      if !added.replace(true) {
        c_data.observe_with(c_late.clone());
      }
    });
    data.set_value(5);

    late.assert_values(&[5]);
  }

  #[rxlive_macro::test]
  fn observe_into_copies_values() {
    let source = MutableLiveData::new();
    let target = MutableLiveData::new();
    source.observe_into(&target);

    assert!(source.has_active_observers());
    source.set_value("x");
    assert_eq!(target.value(), Some("x"));
  }

  #[rxlive_macro::test]
  fn activate_keeps_container_active() {
    let data = MutableLiveData::with_value(1);
    let mut subscription = data.activate();
    assert!(data.has_active_observers());
    subscription.unsubscribe();
    assert!(!data.has_active_observers());
  }

  #[rxlive_macro::test]
  fn hide_shares_the_container() {
    let data = MutableLiveData::with_value(1);
    let hidden: LiveData<i32> = data.hide();
    data.set_value(3);

    assert_eq!(hidden.value(), Some(3));
    assert!(hidden.ptr_eq(&data));
  }

  #[rxlive_macro::test]
  fn holds_none_distinct_from_empty() {
    let data = MutableLiveData::<Option<i32>>::with_value(None);
    assert!(data.has_value());
    assert_eq!(data.value(), Some(None));
    assert!(!MutableLiveData::<Option<i32>>::new().has_value());
  }
}
