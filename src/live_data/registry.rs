use smallvec::SmallVec;

/// Ordered, id-keyed storage for observers and sources.
///
/// Iteration follows insertion order, which is the notification order of a
/// container. Ids are never reused, so a stale id can not remove a newer
/// entry.
///
/// # Design
///
/// - **SmallVec Optimization**: Uses `SmallVec<[_; 2]>` to avoid heap
///   allocation for the common case of 0-2 items.
/// - **Pre-allocation Pattern**: Supports `reserve_id()` + `insert()` for
///   entries that need to know their own id when built.
pub(crate) struct Registry<U> {
  next_id: usize,
  items: SmallVec<[(usize, U); 2]>,
}

impl<U> Default for Registry<U> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<U> Registry<U> {
  /// Add an item and return its unique ID.
  #[inline]
  pub fn add(&mut self, item: U) -> usize {
    let id = self.reserve_id();
    self.items.push((id, item));
    id
  }

  /// Reserve the next ID without adding an item.
  #[inline]
  pub fn reserve_id(&mut self) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    id
  }

  /// Insert an item with a pre-reserved ID.
  #[inline]
  pub fn insert(&mut self, id: usize, item: U) { self.items.push((id, item)); }

  pub fn remove(&mut self, id: usize) -> Option<U> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn contains(&self, id: usize) -> bool { self.items.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.items.iter().map(|(_, item)| item) }
}

impl<U: Clone> Registry<U> {
  /// Copies the entries out so callers can run user code without holding a
  /// borrow on the registry.
  pub fn snapshot(&self) -> SmallVec<[U; 4]> { self.iter().cloned().collect() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[rxlive_macro::test]
  fn add_remove_keeps_order() {
    let mut registry = Registry::default();
    let a = registry.add('a');
    let b = registry.add('b');
    let c = registry.add('c');
    assert_eq!(registry.remove(b), Some('b'));
    assert_eq!(registry.remove(b), None);
    assert!(registry.contains(a) && registry.contains(c));
    assert_eq!(registry.snapshot().as_slice(), &['a', 'c']);
  }

  #[rxlive_macro::test]
  fn ids_are_not_reused() {
    let mut registry = Registry::default();
    let first = registry.add(1);
    registry.remove(first);
    let second = registry.add(2);
    assert_ne!(first, second);
    assert!(!registry.contains(first));
  }

  #[rxlive_macro::test]
  fn reserve_then_insert() {
    let mut registry = Registry::default();
    let id = registry.reserve_id();
    assert!(registry.is_empty());
    registry.insert(id, "x");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.remove(id), Some("x"));
  }
}
