use crate::{Error, Result};
use std::cmp::Ordering;
use std::fmt::Display;

/// Number of decimals of the native coin: 1 SOL = 10^9 lamports.
pub const SOL_DECIMALS: u8 = 9;

/// Largest scale accepted when converting from a float.
const MAX_DECIMALS: u8 = 24;

/// A signed fixed-point decimal: `units * 10^-decimals`.
///
/// Transfer amounts are derived and compared in this representation, at the precision of the asset
/// (9 decimals for SOL, the mint's `decimals` for SPL tokens), so binary floating point never leaks into an
/// equality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Amount {
    units: i128,
    decimals: u8,
}

impl Amount {
    pub const fn new(units: i128, decimals: u8) -> Self {
        Self { units, decimals }
    }

    pub const fn from_lamports(lamports: i128) -> Self {
        Self::new(lamports, SOL_DECIMALS)
    }

    /// Rounds a human-readable value to `decimals` places, half away from zero.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidAmount`] if `value` is not finite or does not fit at that scale.
    pub fn from_ui(value: f64, decimals: u8) -> Result<Self> {
        if !value.is_finite() || decimals > MAX_DECIMALS {
            return Err(Error::InvalidAmount(value));
        }

        let scaled = (value * 10f64.powi(i32::from(decimals))).round();
        if scaled.abs() >= i128::MAX as f64 {
            return Err(Error::InvalidAmount(value));
        }

        Ok(Self::new(scaled as i128, decimals))
    }

    pub const fn units(&self) -> i128 {
        self.units
    }

    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    pub const fn is_negative(&self) -> bool {
        self.units < 0
    }

    pub const fn abs(self) -> Self {
        Self::new(self.units.abs(), self.decimals)
    }

    /// Changes the scale. Going down rounds half away from zero.
    pub fn rescale(self, decimals: u8) -> Self {
        match decimals.cmp(&self.decimals) {
            Ordering::Equal => self,
            Ordering::Greater => {
                let factor = pow10(decimals - self.decimals);
                Self::new(self.units.saturating_mul(factor), decimals)
            }
            Ordering::Less => {
                let factor = pow10(self.decimals - decimals);
                let quotient = self.units / factor;
                let remainder = self.units % factor;
                let units = if remainder.unsigned_abs() * 2 >= factor.unsigned_abs() {
                    quotient + self.units.signum()
                } else {
                    quotient
                };
                Self::new(units, decimals)
            }
        }
    }

    /// Subtracts at the finer of the two scales. `None` on overflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let decimals = self.decimals.max(rhs.decimals);
        let units = self
            .checked_units_at(decimals)?
            .checked_sub(rhs.checked_units_at(decimals)?)?;

        Some(Self::new(units, decimals))
    }

    fn checked_units_at(&self, decimals: u8) -> Option<i128> {
        10i128
            .checked_pow(u32::from(decimals - self.decimals))?
            .checked_mul(self.units)
    }

    /// Equality at a given precision: both sides are rounded to `decimals` first.
    pub fn eq_at(&self, other: &Amount, decimals: u8) -> bool {
        self.rescale(decimals).units == other.rescale(decimals).units
    }

    pub fn to_f64(&self) -> f64 {
        self.units as f64 / 10f64.powi(i32::from(self.decimals))
    }
}

fn pow10(exp: u8) -> i128 {
    10i128.checked_pow(u32::from(exp)).unwrap_or(i128::MAX)
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.to_f64()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.units.unsigned_abs();

        if self.decimals == 0 {
            return write!(f, "{sign}{magnitude}");
        }

        let factor = pow10(self.decimals).unsigned_abs();
        write!(
            f,
            "{sign}{}.{:0width$}",
            magnitude / factor,
            magnitude % factor,
            width = usize::from(self.decimals)
        )
    }
}
