//! Prelude module for convenient imports

pub use crate::{
  error::LiveDataError,
  factory::{create, just, never},
  live_data::{AsLiveData, Emitter, LiveData, MediatorLiveData, MutableLiveData, SourceId},
  observer::{EmptyObserver, FnMutObserver, Observer},
  ops::{
    combine_latest::{
      combine_latest, combine_latest10, combine_latest2, combine_latest3, combine_latest4,
      combine_latest5, combine_latest6, combine_latest7, combine_latest8, combine_latest9,
      combine_latest_all, combine_latest_map, CombineLatestSources,
    },
    merge::merge,
  },
  slot::Slot,
  subscription::{ObserverSubscription, Subscription, SubscriptionGuard},
  test_observer::TestObserver,
};
