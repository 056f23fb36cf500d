//! Fresh identity for columns that did not exist before a merge.

use crate::model::ColumnId;
use std::collections::HashSet;
use uuid::Uuid;

/// Source of new column ids. Injected so reconciliation stays deterministic under test.
pub trait IdGenerator {
    fn next_id(&mut self) -> ColumnId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> ColumnId {
        (**self).next_id()
    }
}

/// Random `col-<uuid>` ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> ColumnId {
        ColumnId::new(format!("col-{}", Uuid::new_v4()))
    }
}

/// `<prefix><n>` ids from a counter.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("col-")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ColumnId {
        let id = ColumnId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Hands out ids that collide with nothing already reserved.
pub struct IdAllocator<G> {
    generator: G,
    taken: HashSet<ColumnId>,
}

impl<G: IdGenerator> IdAllocator<G> {
    pub fn new<'a>(generator: G, existing: impl IntoIterator<Item = &'a ColumnId>) -> Self {
        Self {
            generator,
            taken: existing.into_iter().cloned().collect(),
        }
    }

    pub fn allocate(&mut self) -> ColumnId {
        loop {
            let id = self.generator.next_id();
            if self.taken.insert(id.clone()) {
                return id;
            }
            tracing::trace!(%id, "generated id already in use, retrying");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("c");
        assert_eq!(ids.next_id().as_str(), "c1");
        assert_eq!(ids.next_id().as_str(), "c2");
    }

    #[test]
    fn test_uuid_ids_are_prefixed_and_distinct() {
        let mut ids = UuidIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(a.as_str().starts_with("col-"));
        assert_eq!(a.as_str().len(), "col-".len() + 36);
        assert_ne!(a, b);
    }

    #[test]
    fn test_allocator_skips_existing() {
        let existing = [ColumnId::from("col-1"), ColumnId::from("col-2")];
        let mut alloc = IdAllocator::new(SequentialIds::default(), &existing);
        assert_eq!(alloc.allocate().as_str(), "col-3");
        assert_eq!(alloc.allocate().as_str(), "col-4");
    }

    #[test]
    fn test_allocator_through_borrowed_generator() {
        let mut ids = SequentialIds::starting_at("x", 7);
        {
            let mut alloc = IdAllocator::new(&mut ids, []);
            assert_eq!(alloc.allocate().as_str(), "x7");
        }
        assert_eq!(ids.next_id().as_str(), "x8");
    }
}
