use std::collections::BTreeMap;

use minitrack_core::{DomainError, DomainResult, TypeId};
use minitrack_pipeline::{StageCounts, TypeName, TypeRecord};

/// Type record store.
///
/// Identifiers are allocated from a counter that only grows, so ordering the
/// map by id is the same as ordering by insertion.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    records: BTreeMap<TypeId, TypeRecord>,
    next_id: u64,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create a record with all stage counts at zero.
    pub fn create(&mut self, raw_name: &str) -> DomainResult<&TypeRecord> {
        let name = TypeName::parse(raw_name)?;
        self.insert(name, StageCounts::zero())
    }

    /// Insert a record with explicit counts (snapshot restore).
    pub fn insert(&mut self, name: TypeName, counts: StageCounts) -> DomainResult<&TypeRecord> {
        if self.contains_name(&name) {
            return Err(DomainError::duplicate_name(name.as_str()));
        }
        let id = self.allocate_id();
        Ok(&*self
            .records
            .entry(id)
            .or_insert(TypeRecord::with_counts(id, name, counts)))
    }

    pub fn get(&self, id: TypeId) -> DomainResult<&TypeRecord> {
        self.records.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn get_mut(&mut self, id: TypeId) -> DomainResult<&mut TypeRecord> {
        self.records.get_mut(&id).ok_or(DomainError::NotFound)
    }

    /// All records in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &TypeRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-sensitive exact match on the trimmed name.
    pub fn contains_name(&self, name: &TypeName) -> bool {
        self.records.values().any(|r| r.name() == name)
    }

    /// An empty registry that keeps allocating after this one's last id.
    pub fn emptied(&self) -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: self.next_id,
        }
    }

    fn allocate_id(&mut self) -> TypeId {
        let id = TypeId::new(self.next_id);
        self.next_id += 1;
        id
    }
}
