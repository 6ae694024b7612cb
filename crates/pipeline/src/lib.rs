//! Stage-pipeline domain module.
//!
//! This crate contains the business rules for moving miniatures through the
//! fixed production stages, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod counts;
pub mod document;
pub mod history;
pub mod movement;
pub mod record;
pub mod stage;

pub use counts::{MAX_TYPE_UNITS, StageCounts};
pub use document::{
    Document, DocumentMove, DocumentType, ImportPlan, PlannedMove, PlannedType, StageCountEntry,
    parse_document,
};
pub use history::{HistoryGroup, group_history};
pub use movement::{MAX_MOVE_QTY, MoveEvent, MoveOrder, MoveRequest, execute_move};
pub use record::{MAX_NAME_LEN, TypeName, TypeRecord};
pub use stage::{STAGES, Stage};
