use minitrack_core::{DomainError, DomainResult, TypeId};

use crate::counts::StageCounts;

/// Maximum name length, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 255;

/// A validated type name: trimmed, non-empty, at most [`MAX_NAME_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(String);

impl TypeName {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TypeName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tracked miniature type with its quantity spread across stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRecord {
    id: TypeId,
    name: TypeName,
    counts: StageCounts,
}

impl TypeRecord {
    /// A freshly created record: every stage at zero.
    pub fn new(id: TypeId, name: TypeName) -> Self {
        Self::with_counts(id, name, StageCounts::zero())
    }

    /// A record restored from a snapshot (import).
    pub fn with_counts(id: TypeId, name: TypeName, counts: StageCounts) -> Self {
        Self { id, name, counts }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn counts(&self) -> &StageCounts {
        &self.counts
    }

    pub(crate) fn counts_mut(&mut self) -> &mut StageCounts {
        &mut self.counts
    }
}
