//! Contribution share validation
//!
//! A resolution is distributed as a set of (subcommittee, weight) shares.
//! The one law enforced here is the sum law: the weights must total
//! exactly 100. Duplicate subcommittee rows are NOT rejected, since a
//! caller may split one group's share across rows. An empty set is
//! rejected as a sum of zero.

use plenary_types::{PlenaryError, PlenaryResult, ShareSpec};

/// Validates proposed contribution shares before any assignment write.
/// A failure here aborts the whole distribution, all-or-nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShareValidator;

impl ShareValidator {
    pub fn new() -> Self {
        Self
    }

    /// Accept iff the weights sum to exactly 100
    pub fn validate(&self, shares: &[ShareSpec]) -> PlenaryResult<()> {
        let actual: u32 = shares.iter().map(|s| s.weight).sum();
        if actual != 100 {
            return Err(PlenaryError::WeightSumInvalid { actual });
        }
        Ok(())
    }
}
