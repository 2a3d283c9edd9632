//! Observer trait
//!
//! An observer receives every value a container publishes while it is
//! attached. Closures are adapted through [`FnMutObserver`].

use crate::live_data::MutableLiveData;

pub trait Observer<T> {
  fn on_changed(&mut self, value: T);
}

/// Wraps a `FnMut(T)` closure.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<T, F> Observer<T> for FnMutObserver<F>
where
  F: FnMut(T),
{
  #[inline]
  fn on_changed(&mut self, value: T) { (self.0)(value) }
}

impl<T, O> Observer<T> for Box<O>
where
  O: Observer<T> + ?Sized,
{
  #[inline]
  fn on_changed(&mut self, value: T) { (**self).on_changed(value) }
}

/// Forwarding into a mutable container copies each value into it.
impl<T: Clone + 'static> Observer<T> for MutableLiveData<T> {
  #[inline]
  fn on_changed(&mut self, value: T) { self.set_value(value) }
}

/// Discards every value. Attaching it keeps a container active.
#[derive(Clone, Copy, Default, Debug)]
pub struct EmptyObserver;

impl<T> Observer<T> for EmptyObserver {
  #[inline]
  fn on_changed(&mut self, _: T) {}
}

#[cfg(test)]
mod tests {
  use super::*;

  #[rxlive_macro::test]
  fn closure_observer() {
    let mut seen = vec![];
    {
      let mut observer = FnMutObserver(|v: i32| seen.push(v));
      observer.on_changed(1);
      observer.on_changed(2);
    }
    assert_eq!(seen, vec![1, 2]);
  }

  #[rxlive_macro::test]
  fn boxed_observer() {
    let target = MutableLiveData::new();
    let mut boxed: Box<dyn Observer<i32>> = Box::new(target.clone());
    boxed.on_changed(7);
    assert_eq!(target.value(), Some(7));
  }
}
