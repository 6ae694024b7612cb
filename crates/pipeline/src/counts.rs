use crate::stage::{STAGES, Stage};

/// Ceiling on the units one type record may hold across all stages.
///
/// Keeps every per-stage count representable in an import document.
pub const MAX_TYPE_UNITS: u64 = i64::MAX as u64;

/// Per-stage quantities of one type record.
///
/// Counts are unsigned, so a negative quantity is unrepresentable.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct StageCounts([u64; STAGES.len()]);

impl StageCounts {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, stage: Stage) -> u64 {
        self.0[stage.index()]
    }

    pub fn set(&mut self, stage: Stage, count: u64) {
        self.0[stage.index()] = count;
    }

    /// Sum across all stages, `None` on overflow.
    pub fn checked_total(&self) -> Option<u64> {
        self.0.iter().try_fold(0u64, |acc, &n| acc.checked_add(n))
    }

    /// All stages in pipeline order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, u64)> + '_ {
        STAGES.iter().map(|&stage| (stage, self.get(stage)))
    }

    /// Stages holding at least one unit, in pipeline order.
    pub fn non_zero(&self) -> impl Iterator<Item = (Stage, u64)> + '_ {
        self.iter().filter(|&(_, count)| count > 0)
    }

    /// Relocate `qty` units. Caller guarantees `get(from) >= qty`.
    pub(crate) fn transfer(&mut self, from: Stage, to: Stage, qty: u64) {
        self.0[from.index()] -= qty;
        self.0[to.index()] += qty;
    }
}

impl FromIterator<(Stage, u64)> for StageCounts {
    fn from_iter<I: IntoIterator<Item = (Stage, u64)>>(iter: I) -> Self {
        let mut counts = Self::zero();
        for (stage, count) in iter {
            counts.set(stage, count);
        }
        counts
    }
}
