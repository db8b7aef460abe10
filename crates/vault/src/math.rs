//! Fixed-point helpers shared by share accounting and the report engine.

use alloy_primitives::U256;

/// Basis-point denominator used for slippage and fee settings
pub const MAX_BPS: u64 = 10_000;

/// 1e18, the scale of swap rates
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Direction to round the result of a division
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingDirection {
    Up,
    Down,
}

/// `x * y / d` rounded down. Panics if `d` is zero.
pub fn mul_div_down(x: U256, y: U256, d: U256) -> U256 {
    x * y / d
}

/// `x * y / d` rounded up. Panics if `d` is zero.
pub fn mul_div_up(x: U256, y: U256, d: U256) -> U256 {
    let product = x * y;
    let quotient = product / d;
    if (product % d).is_zero() {
        quotient
    } else {
        quotient + U256::from(1)
    }
}

/// `x * y / d` rounded in the given direction
pub fn mul_div(x: U256, y: U256, d: U256, rounding: RoundingDirection) -> U256 {
    match rounding {
        RoundingDirection::Up => mul_div_up(x, y, d),
        RoundingDirection::Down => mul_div_down(x, y, d),
    }
}

/// `x * bps / MAX_BPS`, rounded down
pub fn bps_of(x: U256, bps: u64) -> U256 {
    mul_div_down(x, U256::from(bps), U256::from(MAX_BPS))
}

/// `x - y`, or zero when `y > x`
pub fn zero_floor_sub(x: U256, y: U256) -> U256 {
    x.saturating_sub(y)
}

pub fn min(a: U256, b: U256) -> U256 {
    if a < b {
        a
    } else {
        b
    }
}
