//! # rxlive: reactive operators over observable single-value containers
//!
//! A [`LiveData`] holds at most one current value and notifies its observers
//! synchronously whenever that value changes. Operators such as `map`,
//! `filter`, `merge`, `combine_latest`, `distinct`, `buffer`, `take`, `skip`
//! and `switch_map` derive new containers from existing ones, without manual
//! subscription bookkeeping.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlive::prelude::*;
//!
//! let clicks = MutableLiveData::new();
//! let label = clicks
//!   .filter(|n: &u32| n % 2 == 0)
//!   .map(|n| format!("{n} clicks"));
//!
//! let observer = TestObserver::new();
//! label.observe_with(observer.clone());
//! for n in 1..=4 {
//!   clicks.set_value(n);
//! }
//! observer.assert_values(&["2 clicks".to_string(), "4 clicks".to_string()]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`LiveData`] | Read-only handle to a container |
//! | [`MutableLiveData`] | Container set by the caller |
//! | [`MediatorLiveData`] | Container fed by callbacks on other containers |
//! | [`Observer`] | Receives each published value |
//! | [`Subscription`] | Handle to detach an observer |
//!
//! Derived containers do work only while observed: the first observer plugs
//! them into their sources, the last one leaving unplugs them.
//!
//! ## Feature Flags
//!
//! - **`tracing`**: emit `tracing` events for activation, source plugging and
//!   operator-driven detaches
//!
//! [`LiveData`]: live_data::LiveData
//! [`MutableLiveData`]: live_data::MutableLiveData
//! [`MediatorLiveData`]: live_data::MediatorLiveData
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription

pub mod error;
pub mod factory;
pub mod live_data;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod slot;
pub mod subscription;
pub mod test_observer;

mod log;

pub use prelude::*;
