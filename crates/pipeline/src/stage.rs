//! The fixed, totally ordered production stages.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use minitrack_core::DomainError;

/// One phase of the pipeline.
///
/// Declaration order is the pipeline order; `Ord` follows it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    InBox,
    Building,
    Priming,
    Painting,
    Done,
}

/// The canonical ordering of stages.
pub const STAGES: [Stage; 5] = [
    Stage::InBox,
    Stage::Building,
    Stage::Priming,
    Stage::Painting,
    Stage::Done,
];

impl Stage {
    /// 0-based position in [`STAGES`].
    pub fn index(self) -> usize {
        match self {
            Stage::InBox => 0,
            Stage::Building => 1,
            Stage::Priming => 2,
            Stage::Painting => 3,
            Stage::Done => 4,
        }
    }

    /// Wire code, e.g. `"IN_BOX"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::InBox => "IN_BOX",
            Stage::Building => "BUILDING",
            Stage::Priming => "PRIMING",
            Stage::Painting => "PAINTING",
            Stage::Done => "DONE",
        }
    }

    /// True when a move from `self` to `to` goes strictly forward.
    pub fn can_move_to(self, to: Stage) -> bool {
        to.index() > self.index()
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGES
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| DomainError::invalid_stage(s))
    }
}
