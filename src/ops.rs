//! Operators over containers.
//!
//! Every operator builds a new [`MediatorLiveData`] linked to its upstream
//! containers and hands back a read-only [`LiveData`]. Nothing runs until the
//! result is observed. State such as counters, seen sets or combine slots
//! belongs to one derived container and survives its deactivation.

use crate::live_data::{Emitter, LiveData, MediatorLiveData};

pub mod buffer;
pub mod combine_latest;
pub mod distinct;
pub mod distinct_until_changed;
pub mod filter;
pub mod lifecycle;
pub mod map;
pub mod merge;
pub mod skip;
pub mod start_with;
pub mod switch_map;
pub mod take;

impl<T: Clone + 'static> LiveData<T> {
  /// Derived container with a single upstream, `self`.
  pub(crate) fn derive<R, F>(&self, on_changed: F) -> LiveData<R>
  where
    R: Clone + 'static,
    F: FnMut(&Emitter<R>, T) + 'static,
  {
    let mediator = MediatorLiveData::new();
    mediator.link(self, on_changed);
    mediator.into_live_data()
  }
}
