//! Deployment parameters: the modulus `N` and the delay `T`.

use num_bigint::BigUint;
use num_traits::One;

use crate::constants::{DEFAULT_DELAY, DEFAULT_MODULUS_BE, MAX_MODULUS_BITS};
use crate::numberish::Numberish;
use crate::{ParamErr, VdfResult};

/// Validated `(N, T)` pair.
///
/// `N` must exceed one and fit a 32-byte field, because `x`, `y`, `π` and
/// `N` itself are all encoded at that width. The factorization of `N` is
/// assumed unknown to every party; this type cannot check that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VdfParams {
    modulus: BigUint,
    delay: u64,
}

impl VdfParams {
    /// # Errors
    /// - `ModulusTooSmall`: `N ≤ 1`
    /// - `ModulusTooLarge`: `N ≥ 2^256`
    /// - `ZeroDelay`: `T = 0`
    pub fn new(modulus: BigUint, delay: u64) -> Result<Self, ParamErr> {
        if modulus <= BigUint::one() {
            return Err(ParamErr::ModulusTooSmall);
        }
        if modulus.bits() > MAX_MODULUS_BITS {
            return Err(ParamErr::ModulusTooLarge(modulus.bits()));
        }
        if delay == 0 {
            return Err(ParamErr::ZeroDelay);
        }
        Ok(Self { modulus, delay })
    }

    /// Normalize loosely-typed inputs, then validate as [`VdfParams::new`].
    ///
    /// # Errors
    /// Input normalization or parameter validation failures.
    pub fn from_numberish(
        modulus: impl Into<Numberish>,
        delay: impl Into<Numberish>,
    ) -> VdfResult<Self> {
        let modulus = modulus.into().normalize()?;
        let delay = delay.into().to_u64()?;
        Ok(Self::new(modulus, delay)?)
    }

    /// Same modulus, different delay
    ///
    /// # Errors
    /// `ZeroDelay` when `delay` is zero.
    pub fn with_delay(&self, delay: u64) -> Result<Self, ParamErr> {
        Self::new(self.modulus.clone(), delay)
    }

    #[must_use]
    pub const fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    #[must_use]
    pub const fn delay(&self) -> u64 {
        self.delay
    }
}

impl Default for VdfParams {
    /// Reference modulus with `DEFAULT_DELAY` squarings
    fn default() -> Self {
        Self {
            modulus: BigUint::from_bytes_be(&DEFAULT_MODULUS_BE),
            delay: DEFAULT_DELAY,
        }
    }
}
