use std::hash::Hash;

use indexmap::IndexMap;

/// Ledger of the remote identifiers created so far by a multi-phase
/// operation, partitioned by resource kind.
///
/// The ledger is the sole source of truth for what must be deleted when the
/// operation fails partway: an identifier is recorded only once the remote
/// resource actually exists. Entries keep insertion order within a kind.
#[derive(Debug, Clone)]
pub struct ResourceLedger<K, Id> {
    entries: IndexMap<K, Vec<Id>>,
}

impl<K, Id> ResourceLedger<K, Id>
where
    K: Copy + Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Record a newly created remote resource.
    pub fn record(&mut self, kind: K, id: Id) {
        self.entries.entry(kind).or_default().push(id);
    }

    /// All identifiers recorded for a kind, in creation order.
    #[must_use]
    pub fn ids(&self, kind: K) -> &[Id] {
        self.entries.get(&kind).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn count(&self, kind: K) -> usize {
        self.ids(kind).len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl<K, Id> Default for ResourceLedger<K, Id>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Widget,
        Gadget,
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger: ResourceLedger<Kind, i64> = ResourceLedger::new();

        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), 0);
        assert!(ledger.ids(Kind::Widget).is_empty());
    }

    #[test]
    fn record_keeps_per_kind_insertion_order() {
        let mut ledger = ResourceLedger::new();
        ledger.record(Kind::Widget, 10);
        ledger.record(Kind::Gadget, 20);
        ledger.record(Kind::Widget, 11);

        assert_eq!(ledger.ids(Kind::Widget), &[10, 11]);
        assert_eq!(ledger.ids(Kind::Gadget), &[20]);
        assert_eq!(ledger.count(Kind::Widget), 2);
        assert_eq!(ledger.total(), 3);
    }

    #[test]
    fn ids_for_unrecorded_kind_is_empty_slice() {
        let mut ledger = ResourceLedger::new();
        ledger.record(Kind::Widget, 1);

        assert!(ledger.ids(Kind::Gadget).is_empty());
    }
}
