//! CombineLatest operator implementation
//!
//! Each source owns one slot, initially unset. On a value from source `i`:
//!
//! 1. if slot `i` is unset, the emitted count is incremented;
//! 2. slot `i` is overwritten with the value;
//! 3. once the emitted count equals the number of sources, the combiner runs
//!    over all slots and its result is published.
//!
//! The count only grows, so after every source has contributed once the
//! combiner runs on every value from any source, repeats included.
//!
//! The combiner never runs re-entrantly. A value that arrives while it is
//! running, for instance because the combiner or a downstream observer set a
//! source, is stored in its slot right away and the combiner runs again over
//! the fresh slots once it returns.
//!
//! The homogeneous N-ary form, [`combine_latest_all`], keeps its slots in a
//! `Vec`. The heterogeneous forms take a tuple of 2 to 10 sources; their slot
//! tuples and typed wrappers are generated by macros. Both forms store and
//! combine through `store_and_combine`.

use crate::{
  factory::never,
  live_data::{AsLiveData, Emitter, LiveData, MediatorLiveData},
  log::debug,
  rc::{MutRc, RcDerefMut},
  slot::Slot,
};

/// Number of slots holding a value, out of `size`.
#[derive(Debug, Clone, Copy)]
struct EmitCounter {
  emitted: usize,
  size: usize,
}

impl EmitCounter {
  fn new(size: usize) -> Self { Self { emitted: 0, size } }

  /// Stores `value` in `slot` and reports whether every slot is filled.
  fn store<T>(&mut self, slot: &mut Slot<T>, value: T) -> bool {
    if !slot.is_set() {
      self.emitted += 1;
    }
    *slot = Slot::Set(value);
    self.emitted == self.size
  }
}

struct CombineState<S> {
  slots: S,
  counter: EmitCounter,
  /// Slots changed since the combiner last ran over a full set.
  dirty: bool,
}

impl<S> CombineState<S> {
  fn new(slots: S, size: usize) -> Self {
    Self { slots, counter: EmitCounter::new(size), dirty: false }
  }
}

/// Applies `store` to the slots and, once every slot is filled, publishes the
/// combined value.
///
/// No borrow of the slots is held while the combiner or downstream observers
/// run. If the combiner is already running further up the stack the value
/// stays in its slot and that outer call combines again before returning.
fn store_and_combine<S, V, R, F>(
  state: &MutRc<CombineState<S>>, combiner: &MutRc<F>, emitter: &Emitter<R>,
  store: impl FnOnce(&mut CombineState<S>) -> bool, snapshot: impl Fn(&S) -> Option<V>,
) where
  R: Clone + 'static,
  F: FnMut(V) -> R,
{
  let full = {
    let mut state = state.rc_deref_mut();
    let full = store(&mut *state);
    state.dirty |= full;
    full
  };
  if !full {
    return;
  }
  let Some(mut combiner) = combiner.try_rc_deref_mut() else {
    debug!("combiner is still running, combining again once it returns");
    return;
  };
  loop {
    let values = {
      let mut state = state.rc_deref_mut();
      if !state.dirty {
        break;
      }
      state.dirty = false;
      snapshot(&state.slots)
    };
    let Some(values) = values else { break };
    let result = (*combiner)(values);
    emitter.set_value(result);
  }
}

/// Combines any number of same-typed sources.
///
/// `combiner` receives the latest value of every source, in source order.
/// No sources yields a never-container.
///
/// ```
/// use rxlive::prelude::*;
///
/// let sources: Vec<_> = (0..3).map(|_| MutableLiveData::new()).collect();
/// let sum = combine_latest_all(&sources, |values: Vec<i32>| values.iter().sum::<i32>());
/// let observer = TestObserver::new();
/// sum.observe_with(observer.clone());
/// sources[0].set_value(1);
/// sources[1].set_value(2);
/// observer.assert_empty();
/// sources[2].set_value(3);
/// sources[0].set_value(10);
/// observer.assert_values(&[6, 15]);
/// ```
pub fn combine_latest_all<S, I, R, F>(sources: I, combiner: F) -> LiveData<R>
where
  S: AsLiveData,
  I: IntoIterator<Item = S>,
  R: Clone + 'static,
  F: FnMut(Vec<S::Item>) -> R + 'static,
{
  let sources: Vec<S> = sources.into_iter().collect();
  if sources.is_empty() {
    return never();
  }

  let size = sources.len();
  let slots: Vec<Slot<S::Item>> = (0..size).map(|_| Slot::NotSet).collect();
  let state = MutRc::own(CombineState::new(slots, size));
  let combiner = MutRc::own(combiner);
  let mediator = MediatorLiveData::new();
  for (index, source) in sources.iter().enumerate() {
    let (state, combiner) = (state.clone(), combiner.clone());
    mediator.link(source.as_live_data(), move |emitter, value| {
      store_and_combine(
        &state,
        &combiner,
        emitter,
        |s| s.counter.store(&mut s.slots[index], value),
        |slots| slots.iter().map(|slot| slot.get().cloned()).collect::<Option<Vec<_>>>(),
      )
    });
  }
  mediator.into_live_data()
}

/// A tuple of 2 to 10 sources that can be combined.
pub trait CombineLatestSources {
  /// Tuple of the latest value of each source.
  type Values: Clone + 'static;

  #[doc(hidden)]
  fn link_into<R, F>(&self, mediator: &MediatorLiveData<R>, combiner: F)
  where
    R: Clone + 'static,
    F: FnMut(Self::Values) -> R + 'static;
}

/// Slot tuple matching a sources tuple.
trait SlotTuple {
  type Values;
  fn snapshot(&self) -> Option<Self::Values>;
}

macro_rules! impl_combine_latest_sources {
  ($size: expr; $($S: ident $idx: tt),+) => {
    impl<$($S: Clone),+> SlotTuple for ($(Slot<$S>,)+) {
      type Values = ($($S,)+);
      fn snapshot(&self) -> Option<Self::Values> { Some(($(self.$idx.get()?.clone(),)+)) }
    }

    impl<$($S: AsLiveData),+> CombineLatestSources for ($($S,)+) {
      type Values = ($($S::Item,)+);

      fn link_into<R, F>(&self, mediator: &MediatorLiveData<R>, combiner: F)
      where
        R: Clone + 'static,
        F: FnMut(Self::Values) -> R + 'static,
      {
        let state = MutRc::own(CombineState::new(($(Slot::<$S::Item>::NotSet,)+), $size));
        let combiner = MutRc::own(combiner);
        $(
          let (c_state, c_combiner) = (state.clone(), combiner.clone());
          mediator.link(self.$idx.as_live_data(), move |emitter, value| {
            store_and_combine(
              &c_state,
              &c_combiner,
              emitter,
              |s| s.counter.store(&mut s.slots.$idx, value),
              |slots| slots.snapshot(),
            )
          });
        )+
      }
    }
  };
}

impl_combine_latest_sources!(2; S0 0, S1 1);
impl_combine_latest_sources!(3; S0 0, S1 1, S2 2);
impl_combine_latest_sources!(4; S0 0, S1 1, S2 2, S3 3);
impl_combine_latest_sources!(5; S0 0, S1 1, S2 2, S3 3, S4 4);
impl_combine_latest_sources!(6; S0 0, S1 1, S2 2, S3 3, S4 4, S5 5);
impl_combine_latest_sources!(7; S0 0, S1 1, S2 2, S3 3, S4 4, S5 5, S6 6);
impl_combine_latest_sources!(8; S0 0, S1 1, S2 2, S3 3, S4 4, S5 5, S6 6, S7 7);
impl_combine_latest_sources!(9; S0 0, S1 1, S2 2, S3 3, S4 4, S5 5, S6 6, S7 7, S8 8);
impl_combine_latest_sources!(10; S0 0, S1 1, S2 2, S3 3, S4 4, S5 5, S6 6, S7 7, S8 8, S9 9);

/// Combines a tuple of sources into a container of value tuples.
///
/// ```
/// use rxlive::prelude::*;
///
/// let a = MutableLiveData::new();
/// let b = MutableLiveData::new();
/// let observer = TestObserver::new();
/// combine_latest((&a, &b)).observe_with(observer.clone());
/// a.set_value(1);
/// b.set_value("a");
/// a.set_value(4);
/// observer.assert_values(&[(1, "a"), (4, "a")]);
/// ```
pub fn combine_latest<S: CombineLatestSources>(sources: S) -> LiveData<S::Values> {
  combine_latest_map(sources, |values| values)
}

/// Combines a tuple of sources through `combiner`, which receives the value
/// tuple.
pub fn combine_latest_map<S, R, F>(sources: S, combiner: F) -> LiveData<R>
where
  S: CombineLatestSources,
  R: Clone + 'static,
  F: FnMut(S::Values) -> R + 'static,
{
  let mediator = MediatorLiveData::new();
  sources.link_into(&mediator, combiner);
  mediator.into_live_data()
}

macro_rules! combine_latest_fn {
  ($name: ident; $($S: ident $s: ident),+) => {
    /// Positional form of [`combine_latest_map`].
    pub fn $name<$($S,)+ R, F>($($s: &$S,)+ mut combiner: F) -> LiveData<R>
    where
      $($S: AsLiveData,)+
      R: Clone + 'static,
      F: FnMut($($S::Item),+) -> R + 'static,
    {
      combine_latest_map(($($s,)+), move |($($s,)+)| combiner($($s),+))
    }
  };
}

combine_latest_fn!(combine_latest2; S0 s0, S1 s1);
combine_latest_fn!(combine_latest3; S0 s0, S1 s1, S2 s2);
combine_latest_fn!(combine_latest4; S0 s0, S1 s1, S2 s2, S3 s3);
combine_latest_fn!(combine_latest5; S0 s0, S1 s1, S2 s2, S3 s3, S4 s4);
combine_latest_fn!(combine_latest6; S0 s0, S1 s1, S2 s2, S3 s3, S4 s4, S5 s5);
combine_latest_fn!(combine_latest7; S0 s0, S1 s1, S2 s2, S3 s3, S4 s4, S5 s5, S6 s6);
combine_latest_fn!(combine_latest8; S0 s0, S1 s1, S2 s2, S3 s3, S4 s4, S5 s5, S6 s6, S7 s7);
combine_latest_fn!(
  combine_latest9; S0 s0, S1 s1, S2 s2, S3 s3, S4 s4, S5 s5, S6 s6, S7 s7, S8 s8
);
combine_latest_fn!(
  combine_latest10; S0 s0, S1 s1, S2 s2, S3 s3, S4 s4, S5 s5, S6 s6, S7 s7, S8 s8, S9 s9
);

impl<T: Clone + 'static> LiveData<T> {
  /// Combines `self` with `other` through `combiner`.
  pub fn combine_latest_with<U, R, F>(&self, other: &LiveData<U>, mut combiner: F) -> LiveData<R>
  where
    U: Clone + 'static,
    R: Clone + 'static,
    F: FnMut(T, U) -> R + 'static,
  {
    combine_latest_map((self, other), move |(a, b)| combiner(a, b))
  }

  /// Pairs the latest values of `self` and `other`.
  pub fn combine_latest_pair<U: Clone + 'static>(&self, other: &LiveData<U>) -> LiveData<(T, U)> {
    combine_latest((self, other))
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use bencher::{benchmark_group, Bencher};

  use crate::prelude::*;

  #[rxlive_macro::test]
  fn pair_waits_for_both() {
    let a = MutableLiveData::new();
    let b = MutableLiveData::new();
    let (observer, _) = TestObserver::attach(&a.combine_latest_pair(&b));
    a.set_value(1);
    observer.assert_empty();
    b.set_value("a");
    a.set_value(4);
    observer.assert_values(&[(1, "a"), (4, "a")]);
  }

  #[rxlive_macro::test]
  fn triple_reordering() {
    let a = MutableLiveData::new();
    let b = MutableLiveData::new();
    let c = MutableLiveData::new();
    let combined = combine_latest3(&a, &b, &c, |a: i32, b: &str, c: &str| format!("{a}{b}{c}"));
    let (observer, _) = TestObserver::attach(&combined);

    b.set_value("#");
    a.set_value(1);
    c.set_value("a");
    c.set_value("b");
    a.set_value(4);
    b.set_value("!");
    c.set_value("c");

    observer.assert_values(&["1#a", "1#b", "4#b", "4!b", "4!c"].map(String::from));
  }

  #[rxlive_macro::test]
  fn n_ary_in_order_then_reversed() {
    let size = 8;
    let sources: Vec<_> = (0..size).map(|_| MutableLiveData::new()).collect();
    let (observer, _) = TestObserver::attach(&combine_latest_all(&sources, |v: Vec<i32>| v));
    for (i, source) in sources.iter().enumerate() {
      source.set_value(i as i32);
    }
    for (i, source) in sources.iter().enumerate().rev() {
      source.set_value(-(i as i32));
    }

    observer.assert_count(size + 1);
    let all_set: Vec<i32> = (0..size as i32).collect();
    assert_eq!(observer.first(), Some(all_set));
    assert_eq!(observer.last(), Some((0..size as i32).map(|i| -i).collect::<Vec<_>>()));
  }

  #[rxlive_macro::test]
  fn n_ary_empty_is_never() {
    let combined = combine_latest_all(Vec::<LiveData<i32>>::new(), |v| v.len());
    let (observer, _) = TestObserver::attach(&combined);
    observer.assert_empty();
  }

  #[rxlive_macro::test]
  fn completing_value_is_fresh() {
    let a = MutableLiveData::with_value(1);
    let b = MutableLiveData::new();
    let (observer, _) = TestObserver::attach(&combine_latest((&a, &b)));
    b.set_value(2);
    b.set_value(3);
    observer.assert_values(&[(1, 2), (1, 3)]);
  }

  #[rxlive_macro::test]
  fn current_values_combine_on_activation() {
    let a = MutableLiveData::with_value('x');
    let b = MutableLiveData::with_value(2u8);
    let c = MutableLiveData::with_value(true);
    let (observer, _) = TestObserver::attach(&combine_latest((&a, &b, &c)));
    observer.assert_values(&[('x', 2, true)]);
  }

  #[rxlive_macro::test]
  fn ten_sources() {
    let s: Vec<MutableLiveData<u32>> = (0..10).map(MutableLiveData::with_value).collect();
    let combined = combine_latest10(
      &s[0], &s[1], &s[2], &s[3], &s[4], &s[5], &s[6], &s[7], &s[8], &s[9],
      |a, b, c, d, e, f, g, h, i, j| a + b + c + d + e + f + g + h + i + j,
    );
    let (observer, _) = TestObserver::attach(&combined);
    s[9].set_value(0);
    observer.assert_values(&[45, 36]);
  }

  #[rxlive_macro::test]
  fn combine_with_closure() {
    let a = MutableLiveData::new();
    let b = MutableLiveData::new();
    let (observer, _) = TestObserver::attach(&a.combine_latest_with(&b, |x: i32, y: i32| x * y));
    a.set_value(3);
    b.set_value(4);
    b.set_value(5);
    observer.assert_values(&[12, 15]);
  }

  #[rxlive_macro::test]
  fn combiner_runs_only_when_complete() {
    let calls = Rc::new(RefCell::new(0));
    let c_calls = calls.clone();
    let a = MutableLiveData::new();
    let b = MutableLiveData::new();
    let combined = combine_latest2(&a, &b, move |x: i32, y: i32| {
      *c_calls.borrow_mut() += 1;
      x + y
    });
    combined.activate();
    a.set_value(1);
    a.set_value(2);
    assert_eq!(*calls.borrow(), 0);
    b.set_value(1);
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(combined.value(), Some(3));
  }

  #[rxlive_macro::test]
  fn downstream_may_feed_sources() {
    let a = MutableLiveData::new();
    let b = MutableLiveData::new();
    let combined = a.combine_latest_pair(&b);
    let c_b = b.clone();
    let (observer, _) = TestObserver::attach(&combined);
    combined.observe(move |(x, y): (i32, i32)| {
      if x == 1 && y != 100 {
        c_b.set_value(100);
      }
    });
    b.set_value(0);
    a.set_value(1);

    assert_eq!(observer.last(), Some((1, 100)));
    assert_eq!(combined.value(), Some((1, 100)));
  }

  #[rxlive_macro::test]
  fn combiner_may_feed_its_own_sources() {
    let a = MutableLiveData::new();
    let b = MutableLiveData::new();
    let c_b = b.clone();
    let combined = combine_latest2(&a, &b, move |x: i32, y: i32| {
      if x == 1 && y != 100 {
        c_b.set_value(100);
      }
      (x, y)
    });
    let (observer, _) = TestObserver::attach(&combined);
    b.set_value(0);
    a.set_value(1);
    a.set_value(2);

    observer.assert_values(&[(1, 0), (1, 100), (2, 100)]);
    assert_eq!(b.value(), Some(100));
  }

  #[rxlive_macro::test]
  fn n_ary_combiner_may_feed_its_own_sources() {
    let sources: Vec<MutableLiveData<i32>> = (0..3).map(|_| MutableLiveData::new()).collect();
    let last = sources[2].clone();
    let combined = combine_latest_all(&sources, move |v: Vec<i32>| {
      if v[2] == 0 {
        last.set_value(v[0] + v[1]);
      }
      v.iter().sum::<i32>()
    });
    let (observer, _) = TestObserver::attach(&combined);
    sources[0].set_value(1);
    sources[1].set_value(2);
    sources[2].set_value(0);

    observer.assert_values(&[3, 6]);
  }

  #[rxlive_macro::test]
  fn smoke() {
    let sources: Vec<_> = (0..4).map(MutableLiveData::with_value).collect();
    let combined = combine_latest_all(&sources, |v: Vec<i32>| v.iter().sum::<i32>());
    combined.activate();
    for i in 0..100 {
      sources[(i % 4) as usize].set_value(i);
    }
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_combine_latest);

  fn bench_combine_latest(b: &mut Bencher) { b.iter(smoke); }
}
