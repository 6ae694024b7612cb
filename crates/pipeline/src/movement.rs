//! Move engine: validation and application of a quantity transfer between
//! two stages of one type record.
//!
//! Precondition order (first failure wins):
//! 1. the type record resolves (checked by the store before calling in here)
//! 2. both stage tokens are known stages
//! 3. the target stage is strictly after the source stage
//! 4. `qty` is a positive integer no larger than [`MAX_MOVE_QTY`]
//! 5. the source stage holds at least `qty` units

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use minitrack_core::{DomainError, DomainResult, TypeId};

use crate::record::TypeRecord;
use crate::stage::Stage;

/// Largest quantity accepted in a single move.
pub const MAX_MOVE_QTY: i64 = 1_000_000;

/// A move as received from outside the domain: nothing is checked yet.
///
/// Fields stay untyped JSON; [`MoveOrder::parse`] checks them in precondition
/// order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub from_stage: Value,
    #[serde(default)]
    pub to_stage: Value,
    #[serde(default)]
    pub qty: Value,
    /// Fields outside the move shape; any present fails as a validation error.
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

impl MoveRequest {
    pub fn new(from_stage: &str, to_stage: &str, qty: i64) -> Self {
        Self {
            from_stage: Value::from(from_stage),
            to_stage: Value::from(to_stage),
            qty: Value::from(qty),
            unknown: Map::new(),
        }
    }
}

/// A move whose stages and quantity have been checked (preconditions 2-4).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveOrder {
    from: Stage,
    to: Stage,
    qty: u64,
}

impl MoveOrder {
    pub fn new(from: Stage, to: Stage, qty: i64) -> DomainResult<Self> {
        check_transition(from, to)?;
        if qty <= 0 {
            return Err(DomainError::validation("qty must be a positive integer"));
        }
        if qty > MAX_MOVE_QTY {
            return Err(DomainError::validation(format!(
                "qty cannot exceed {MAX_MOVE_QTY}"
            )));
        }
        Ok(Self {
            from,
            to,
            qty: qty as u64,
        })
    }

    pub fn parse(request: &MoveRequest) -> DomainResult<Self> {
        let from = parse_stage(&request.from_stage)?;
        let to = parse_stage(&request.to_stage)?;
        check_transition(from, to)?;
        let qty = request
            .qty
            .as_i64()
            .ok_or_else(|| DomainError::validation("qty must be a positive integer"))?;
        if let Some(field) = request.unknown.keys().next() {
            return Err(DomainError::validation(format!("unknown field '{field}'")));
        }
        Self::new(from, to, qty)
    }

    pub fn from(&self) -> Stage {
        self.from
    }

    pub fn to(&self) -> Stage {
        self.to
    }

    pub fn qty(&self) -> u64 {
        self.qty
    }
}

fn check_transition(from: Stage, to: Stage) -> DomainResult<()> {
    if from.can_move_to(to) {
        Ok(())
    } else {
        Err(DomainError::InvalidStageTransition {
            from: from.as_str(),
            to: to.as_str(),
        })
    }
}

fn parse_stage(token: &Value) -> DomainResult<Stage> {
    match token {
        Value::String(token) => token.parse(),
        other => Err(DomainError::invalid_stage(other.to_string())),
    }
}

/// Immutable fact: units of one type moved forward between two stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvent {
    pub type_id: TypeId,
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub qty: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Apply `order` to `record` and return the event describing it.
///
/// The record is untouched when the source stage is short.
pub fn execute_move(
    record: &mut TypeRecord,
    order: &MoveOrder,
    occurred_at: DateTime<Utc>,
) -> DomainResult<MoveEvent> {
    let available = record.counts().get(order.from);
    if available < order.qty {
        return Err(DomainError::InsufficientQty {
            stage: order.from.as_str(),
            available,
            requested: order.qty,
        });
    }

    record.counts_mut().transfer(order.from, order.to, order.qty);

    Ok(MoveEvent {
        type_id: record.id(),
        from_stage: order.from,
        to_stage: order.to,
        qty: order.qty,
        occurred_at,
    })
}
