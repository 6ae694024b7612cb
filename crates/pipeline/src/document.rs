//! Export/import document.
//!
//! Export is a typed [`Document`] built from trusted state. Import goes through
//! an explicit parse-and-validate step: the untrusted JSON is decoded into raw
//! shapes and checked into an [`ImportPlan`] before anything touches the store.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use minitrack_core::{DomainError, DomainResult};

use crate::counts::{MAX_TYPE_UNITS, StageCounts};
use crate::movement::MoveEvent;
use crate::record::{TypeName, TypeRecord};
use crate::stage::Stage;

// -------------------------
// Export shapes
// -------------------------

/// Portable snapshot of every type record with its full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub types: Vec<DocumentType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentType {
    pub name: String,
    /// Only stages with a non-zero count; absent stages are zero.
    pub stage_counts: Vec<StageCountEntry>,
    pub history: Vec<DocumentMove>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct StageCountEntry {
    pub stage: Stage,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMove {
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub qty: u64,
    pub created_at: DateTime<Utc>,
}

impl DocumentType {
    /// Snapshot one record together with its chronologically ordered history.
    pub fn from_record(record: &TypeRecord, history: &[MoveEvent]) -> Self {
        Self {
            name: record.name().as_str().to_string(),
            stage_counts: record
                .counts()
                .non_zero()
                .map(|(stage, count)| StageCountEntry { stage, count })
                .collect(),
            history: history
                .iter()
                .map(|event| DocumentMove {
                    from_stage: event.from_stage,
                    to_stage: event.to_stage,
                    qty: event.qty,
                    created_at: event.occurred_at,
                })
                .collect(),
        }
    }
}

// -------------------------
// Import: raw (untrusted) shapes
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawType {
    name: String,
    stage_counts: Vec<RawStageCount>,
    #[serde(default)]
    history: Vec<RawMove>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStageCount {
    stage: String,
    count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMove {
    from_stage: String,
    to_stage: String,
    qty: i64,
    created_at: String,
}

// -------------------------
// Import: validated plan
// -------------------------

/// A fully validated import, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    pub types: Vec<PlannedType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedType {
    pub name: TypeName,
    pub counts: StageCounts,
    /// History to replay in file order.
    pub history: Vec<PlannedMove>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub qty: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Decode and validate an import document.
///
/// Every failure, whether malformed JSON, a missing or unknown field, or a
/// value outside the domain, is reported as `InvalidImportFormat`.
pub fn parse_document(bytes: &[u8]) -> DomainResult<ImportPlan> {
    let raw: RawDocument = serde_json::from_slice(bytes)
        .map_err(|e| DomainError::invalid_import(format!("malformed document: {e}")))?;
    raw.validate()
}

impl RawDocument {
    fn validate(self) -> DomainResult<ImportPlan> {
        let mut seen_names: HashSet<TypeName> = HashSet::new();
        let mut types = Vec::with_capacity(self.types.len());

        for (idx, raw) in self.types.into_iter().enumerate() {
            let planned = raw.validate(idx)?;
            if !seen_names.insert(planned.name.clone()) {
                return Err(DomainError::invalid_import(format!(
                    "types[{idx}]: duplicate name '{}'",
                    planned.name
                )));
            }
            types.push(planned);
        }

        Ok(ImportPlan { types })
    }
}

impl RawType {
    fn validate(self, idx: usize) -> DomainResult<PlannedType> {
        let invalid = |msg: String| DomainError::invalid_import(format!("types[{idx}]: {msg}"));

        let name = TypeName::parse(&self.name).map_err(|e| invalid(e.to_string()))?;

        let mut counts = StageCounts::zero();
        let mut seen_stages: HashSet<Stage> = HashSet::new();
        for entry in self.stage_counts {
            let stage = parse_stage(&entry.stage).map_err(&invalid)?;
            if !seen_stages.insert(stage) {
                return Err(invalid(format!("duplicate stage_counts entry for {stage}")));
            }
            if entry.count < 0 {
                return Err(invalid(format!("negative count for {stage}")));
            }
            counts.set(stage, entry.count as u64);
        }
        if counts.checked_total().is_none_or(|total| total > MAX_TYPE_UNITS) {
            return Err(invalid(format!(
                "stage counts sum to more than {MAX_TYPE_UNITS} units"
            )));
        }

        let mut history = Vec::with_capacity(self.history.len());
        for (n, raw) in self.history.into_iter().enumerate() {
            let planned = raw.validate().map_err(|msg| invalid(format!("history[{n}]: {msg}")))?;
            history.push(planned);
        }

        Ok(PlannedType {
            name,
            counts,
            history,
        })
    }
}

impl RawMove {
    fn validate(self) -> Result<PlannedMove, String> {
        let from_stage = parse_stage(&self.from_stage)?;
        let to_stage = parse_stage(&self.to_stage)?;
        if !from_stage.can_move_to(to_stage) {
            return Err(format!("non-forward transition {from_stage} -> {to_stage}"));
        }
        if self.qty <= 0 {
            return Err("qty must be positive".to_string());
        }
        let occurred_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| format!("malformed created_at '{}': {e}", self.created_at))?
            .with_timezone(&Utc);

        Ok(PlannedMove {
            from_stage,
            to_stage,
            qty: self.qty as u64,
            occurred_at,
        })
    }
}

fn parse_stage(token: &str) -> Result<Stage, String> {
    token.parse::<Stage>().map_err(|e| e.to_string())
}
