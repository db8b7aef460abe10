//! Time-decayed profit lock.
//!
//! Gains realized by a report are not immediately withdrawable. They are
//! added to a locked buffer which unlocks linearly over `duration` seconds,
//! so a depositor cannot sandwich a report to capture profit they did not
//! wait for.
//!
//! ```text
//! locked(now) = raw - raw * (now - last_report) / duration   if now < last_report + duration
//!             = 0                                            otherwise
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};
use crate::math::{mul_div_down, zero_floor_sub};

/// Default unlock window: 6 hours
pub const DEFAULT_LOCKED_PROFIT_DURATION: u64 = 6 * 60 * 60;

/// Longest allowed unlock window: 3 days
pub const MAX_LOCKED_PROFIT_DURATION: u64 = 3 * 24 * 60 * 60;

/// Locked profit buffer. `duration` is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedProfit {
    raw: U256,
    last_report: u64,
    duration: u64,
}

impl LockedProfit {
    /// Create an empty buffer whose clock starts at `timestamp`
    pub fn new(duration: u64, timestamp: u64) -> Result<Self> {
        validate_duration(duration)?;
        Ok(Self {
            raw: U256::ZERO,
            last_report: timestamp,
            duration,
        })
    }

    /// Raw amount locked at `last_report`
    pub fn raw(&self) -> U256 {
        self.raw
    }

    pub fn last_report(&self) -> u64 {
        self.last_report
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Amount still locked at `timestamp`
    pub fn locked_at(&self, timestamp: u64) -> U256 {
        let elapsed = timestamp.saturating_sub(self.last_report);
        if elapsed >= self.duration {
            return U256::ZERO;
        }
        self.raw - mul_div_down(self.raw, U256::from(elapsed), U256::from(self.duration))
    }

    /// Restart the decay clock at `timestamp` with whatever is still locked.
    ///
    /// A batch report checkpoints once before reconciling, so every gain and
    /// loss inside the batch is measured against the same tick. Checkpointing
    /// twice at the same tick is a no-op.
    pub fn checkpoint(&mut self, timestamp: u64) {
        self.raw = self.locked_at(timestamp);
        self.last_report = timestamp;
    }

    /// Lock a newly realized gain on top of what is still locked at `timestamp`
    pub fn record_gain(&mut self, gain: U256, timestamp: u64) {
        self.checkpoint(timestamp);
        self.raw += gain;
    }

    /// Absorb a loss into the still-locked amount, flooring at zero
    pub fn record_loss(&mut self, loss: U256, timestamp: u64) {
        self.checkpoint(timestamp);
        self.raw = zero_floor_sub(self.raw, loss);
    }

    /// Change the unlock window from `timestamp` on.
    ///
    /// Profit already released stays released; what is still locked unlocks
    /// over the new window.
    pub fn set_duration(&mut self, duration: u64, timestamp: u64) -> Result<()> {
        validate_duration(duration)?;
        if duration == self.duration {
            return Err(VaultError::AlreadyValue);
        }
        self.checkpoint(timestamp);
        self.duration = duration;
        Ok(())
    }
}

fn validate_duration(duration: u64) -> Result<()> {
    if duration == 0 {
        return Err(VaultError::Zero);
    }
    if duration > MAX_LOCKED_PROFIT_DURATION {
        return Err(VaultError::AboveMaximum {
            value: U256::from(duration),
            max: U256::from(MAX_LOCKED_PROFIT_DURATION),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000;

    fn locked(amount: u64) -> LockedProfit {
        let mut lp = LockedProfit::new(DEFAULT_LOCKED_PROFIT_DURATION, T0).unwrap();
        lp.record_gain(U256::from(amount), T0);
        lp
    }

    #[test]
    fn test_decays_linearly() {
        let lp = locked(1000);
        let half = T0 + DEFAULT_LOCKED_PROFIT_DURATION / 2;

        assert_eq!(lp.locked_at(T0), U256::from(1000));
        assert_eq!(lp.locked_at(half), U256::from(500));
        assert_eq!(lp.locked_at(T0 + DEFAULT_LOCKED_PROFIT_DURATION), U256::ZERO);
        assert_eq!(lp.locked_at(T0 + 10 * DEFAULT_LOCKED_PROFIT_DURATION), U256::ZERO);
    }

    #[test]
    fn test_decay_is_monotonic() {
        let lp = locked(7919);
        let mut previous = lp.locked_at(T0);
        for step in 1..=DEFAULT_LOCKED_PROFIT_DURATION / 600 {
            let current = lp.locked_at(T0 + step * 600);
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, U256::ZERO);
    }

    #[test]
    fn test_timestamp_before_last_report_is_fully_locked() {
        let lp = locked(1000);
        assert_eq!(lp.locked_at(T0 - 100), U256::from(1000));
    }

    #[test]
    fn test_gain_adds_to_undecayed_amount() {
        let mut lp = locked(1000);
        let half = T0 + DEFAULT_LOCKED_PROFIT_DURATION / 2;

        lp.checkpoint(half);
        lp.record_gain(U256::from(200), half);

        assert_eq!(lp.raw(), U256::from(700));
        assert_eq!(lp.locked_at(half), U256::from(700));
    }

    #[test]
    fn test_loss_floors_at_zero() {
        let mut lp = locked(100);
        lp.record_loss(U256::from(250), T0);
        assert_eq!(lp.raw(), U256::ZERO);

        let mut lp = locked(100);
        lp.record_loss(U256::from(30), T0);
        assert_eq!(lp.raw(), U256::from(70));
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert_eq!(LockedProfit::new(0, T0), Err(VaultError::Zero));

        let mut lp = locked(1);
        assert_eq!(lp.set_duration(0, T0), Err(VaultError::Zero));
    }

    #[test]
    fn test_set_duration_bounds() {
        let mut lp = locked(1);
        assert_eq!(
            lp.set_duration(DEFAULT_LOCKED_PROFIT_DURATION, T0),
            Err(VaultError::AlreadyValue)
        );
        assert!(matches!(
            lp.set_duration(MAX_LOCKED_PROFIT_DURATION + 1, T0),
            Err(VaultError::AboveMaximum { .. })
        ));
        lp.set_duration(MAX_LOCKED_PROFIT_DURATION, T0).unwrap();
        assert_eq!(lp.duration(), MAX_LOCKED_PROFIT_DURATION);
    }

    #[test]
    fn test_loss_mid_decay_applies_decay_once() {
        let mut lp = locked(1000);
        let half = T0 + DEFAULT_LOCKED_PROFIT_DURATION / 2;

        lp.record_loss(U256::from(100), half);

        assert_eq!(lp.last_report(), half);
        assert_eq!(lp.locked_at(half), U256::from(400));
        assert_eq!(
            lp.locked_at(half + DEFAULT_LOCKED_PROFIT_DURATION / 2),
            U256::from(200)
        );
    }

    #[test]
    fn test_gain_mid_decay_without_checkpoint() {
        let mut lp = locked(1000);
        let half = T0 + DEFAULT_LOCKED_PROFIT_DURATION / 2;

        lp.record_gain(U256::from(200), half);

        assert_eq!(lp.locked_at(half), U256::from(700));
    }

    #[test]
    fn test_set_duration_keeps_released_profit_released() {
        let mut lp = locked(1000);
        let half = T0 + DEFAULT_LOCKED_PROFIT_DURATION / 2;

        lp.set_duration(MAX_LOCKED_PROFIT_DURATION, half).unwrap();

        assert_eq!(lp.locked_at(half), U256::from(500));
        assert_eq!(
            lp.locked_at(half + MAX_LOCKED_PROFIT_DURATION / 2),
            U256::from(250)
        );
        assert_eq!(lp.locked_at(half + MAX_LOCKED_PROFIT_DURATION), U256::ZERO);
    }

    #[test]
    fn test_rejected_duration_leaves_clock_alone() {
        let mut lp = locked(1000);
        let half = T0 + DEFAULT_LOCKED_PROFIT_DURATION / 2;

        assert_eq!(lp.set_duration(0, half), Err(VaultError::Zero));
        assert_eq!(lp.last_report(), T0);
        assert_eq!(lp.raw(), U256::from(1000));
    }
}
