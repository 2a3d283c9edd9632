use std::ops::Add;

use crate::{
  factory::never,
  live_data::{AsLiveData, LiveData, MediatorLiveData},
};

/// Forwards every value of every source, in the order the sources publish.
///
/// No sources yields a never-container. A single source is returned as is, so
/// the result may be the same container as its input under [`LiveData::ptr_eq`].
///
/// ```
/// use rxlive::prelude::*;
///
/// let a = MutableLiveData::new();
/// let b = MutableLiveData::new();
/// let observer = TestObserver::new();
/// merge([&a, &b]).observe_with(observer.clone());
/// a.set_value(1);
/// b.set_value(2);
/// a.set_value(3);
/// observer.assert_values(&[1, 2, 3]);
/// ```
pub fn merge<S, I>(sources: I) -> LiveData<S::Item>
where
  S: AsLiveData,
  I: IntoIterator<Item = S>,
{
  let mut sources = sources.into_iter();
  let Some(first) = sources.next() else { return never() };
  let Some(second) = sources.next() else { return first.as_live_data().clone() };

  let mediator = MediatorLiveData::new();
  for source in [first, second].into_iter().chain(sources) {
    mediator.link(source.as_live_data(), |emitter, value| emitter.set_value(value));
  }
  mediator.into_live_data()
}

impl<T: Clone + 'static> LiveData<T> {
  /// Merges `self` with `other`.
  pub fn merge_with(&self, other: &LiveData<T>) -> LiveData<T> { merge([self, other]) }
}

impl<T: Clone + 'static> Add for &LiveData<T> {
  type Output = LiveData<T>;
  fn add(self, rhs: Self) -> LiveData<T> { self.merge_with(rhs) }
}

impl<T: Clone + 'static> Add for LiveData<T> {
  type Output = LiveData<T>;
  fn add(self, rhs: Self) -> LiveData<T> { self.merge_with(&rhs) }
}
