//! Typed "nothing received yet" marker.
//!
//! `Slot::NotSet` stands apart from every value of `T`, including `None` when
//! `T` is itself an `Option`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot<T> {
  #[default]
  NotSet,
  Set(T),
}

impl<T> Slot<T> {
  #[inline]
  pub fn is_set(&self) -> bool { matches!(self, Slot::Set(_)) }

  #[inline]
  pub fn get(&self) -> Option<&T> {
    match self {
      Slot::NotSet => None,
      Slot::Set(v) => Some(v),
    }
  }

  /// Stores `value`, returning the previous content.
  #[inline]
  pub fn replace(&mut self, value: T) -> Slot<T> { std::mem::replace(self, Slot::Set(value)) }
}
