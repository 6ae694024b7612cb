//! Tracker service: the transactional boundary around [`TrackerState`].
//!
//! Mutations (create, move, import) hold the write lock from precondition
//! checks through effect application. Reads (get, list, history, export) hold
//! the read lock, so they never observe a record mid-move.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use minitrack_core::{DomainError, TypeId};
use minitrack_pipeline::{
    Document, HistoryGroup, MoveEvent, MoveRequest, TypeRecord, group_history, parse_document,
};

use crate::state::{ImportSummary, TrackerState};

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A previous writer panicked while holding the state lock.
    #[error("tracker state lock poisoned")]
    LockPoisoned,
}

impl<T> From<PoisonError<T>> for TrackerError {
    fn from(_: PoisonError<T>) -> Self {
        TrackerError::LockPoisoned
    }
}

#[derive(Debug, Default)]
pub struct Tracker {
    state: RwLock<TrackerState>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: TrackerState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    fn read(&self) -> TrackerResult<RwLockReadGuard<'_, TrackerState>> {
        Ok(self.state.read()?)
    }

    fn write(&self) -> TrackerResult<RwLockWriteGuard<'_, TrackerState>> {
        Ok(self.state.write()?)
    }

    pub fn create_type(&self, name: &str) -> TrackerResult<TypeRecord> {
        let record = self.write()?.create_type(name).inspect_err(|e| {
            tracing::debug!(code = %e.code(), "create type rejected: {e}");
        })?;
        tracing::info!(type_id = %record.id(), name = %record.name(), "type created");
        Ok(record)
    }

    pub fn get_type(&self, id: TypeId) -> TrackerResult<TypeRecord> {
        Ok(self.read()?.get_type(id)?)
    }

    pub fn list_types(&self) -> TrackerResult<Vec<TypeRecord>> {
        Ok(self.read()?.list_types())
    }

    pub fn move_units(
        &self,
        id: TypeId,
        request: &MoveRequest,
        occurred_at: DateTime<Utc>,
    ) -> TrackerResult<TypeRecord> {
        let record = self
            .write()?
            .move_units(id, request, occurred_at)
            .inspect_err(|e| {
                tracing::debug!(
                    type_id = %id,
                    from_stage = %request.from_stage,
                    to_stage = %request.to_stage,
                    qty = %request.qty,
                    code = %e.code(),
                    "move rejected: {e}"
                );
            })?;
        tracing::info!(
            type_id = %id,
            from_stage = %request.from_stage,
            to_stage = %request.to_stage,
            qty = %request.qty,
            "units moved"
        );
        Ok(record)
    }

    /// Granular history, oldest first.
    pub fn history(&self, id: TypeId) -> TrackerResult<Vec<MoveEvent>> {
        Ok(self.read()?.history(id)?)
    }

    /// History view, optionally merging adjacent same-transition events.
    pub fn history_view(
        &self,
        id: TypeId,
        group_window: Option<Duration>,
    ) -> TrackerResult<Vec<HistoryGroup>> {
        let events = self.history(id)?;
        Ok(group_history(&events, group_window))
    }

    pub fn export(&self) -> TrackerResult<Document> {
        Ok(self.read()?.export())
    }

    /// Validate `bytes` as an import document and, if valid, replace all state.
    ///
    /// Parsing happens before the write lock is taken.
    pub fn import(&self, bytes: &[u8]) -> TrackerResult<ImportSummary> {
        let plan = parse_document(bytes).inspect_err(|e| {
            tracing::warn!(code = %e.code(), "import rejected: {e}");
        })?;
        let summary = self.write()?.import(plan)?;
        tracing::info!(
            types = summary.types_imported,
            events = summary.events_imported,
            "import applied"
        );
        Ok(summary)
    }
}
