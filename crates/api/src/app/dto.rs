use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use minitrack_infra::ImportSummary;
use minitrack_pipeline::{HistoryGroup, Stage, StageCounts, TypeRecord};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTypeRequest {
    pub name: String,
}

/// Move bodies deserialize straight into the domain's unchecked request.
pub use minitrack_pipeline::MoveRequest;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    /// Overrides the configured grouping window; `0` disables grouping.
    pub group_window_secs: Option<u64>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct StageCountsBody {
    pub in_box: u64,
    pub building: u64,
    pub priming: u64,
    pub painting: u64,
    pub done: u64,
}

impl From<&StageCounts> for StageCountsBody {
    fn from(counts: &StageCounts) -> Self {
        Self {
            in_box: counts.get(Stage::InBox),
            building: counts.get(Stage::Building),
            priming: counts.get(Stage::Priming),
            painting: counts.get(Stage::Painting),
            done: counts.get(Stage::Done),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TypeItem {
    pub id: u64,
    pub name: String,
    pub counts: StageCountsBody,
}

impl From<&TypeRecord> for TypeItem {
    fn from(record: &TypeRecord) -> Self {
        Self {
            id: record.id().get(),
            name: record.name().as_str().to_string(),
            counts: record.counts().into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TypeListResponse {
    pub items: Vec<TypeItem>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub qty: u64,
    pub timestamp: DateTime<Utc>,
}

impl From<HistoryGroup> for HistoryEntry {
    fn from(group: HistoryGroup) -> Self {
        Self {
            from_stage: group.from_stage,
            to_stage: group.to_stage,
            qty: group.qty,
            timestamp: group.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub items: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub status: &'static str,
    pub types_imported: usize,
    pub events_imported: usize,
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            status: "ok",
            types_imported: summary.types_imported,
            events_imported: summary.events_imported,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiStatusResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub env: String,
}
