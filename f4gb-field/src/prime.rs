use f4gb_util::{Config, GbError, GbResult};

/// The arithmetic regime a prime falls into, chosen to avoid 64-bit
/// overflow in the dense-row reduction loop (see the glossary entry
/// "Prime-size path").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// `p < 2^17`: a product of two coefficients fits in 34 bits, so plain
    /// `i64` accumulation tolerates roughly `2^29` additions per column.
    Seventeen,
    /// `p < 2^31`: products reach `2^62`; accumulation uses
    /// subtract-then-correct against `p²`.
    ThirtyOne,
    /// `p < 2^32`: `p²` no longer fits in 63 bits, so the accumulator is
    /// split into a 96-bit `(low, high)` pair.
    ThirtyTwo,
}

impl Regime {
    pub const fn of(p: u32) -> Self {
        if p < (1 << 17) {
            Regime::Seventeen
        } else if p < (1u32 << 31) {
            Regime::ThirtyOne
        } else {
            Regime::ThirtyTwo
        }
    }
}

/// A validated field characteristic together with its derived regime and
/// regime-specific reduction constants.
#[derive(Debug, Clone, Copy)]
pub struct Prime {
    p: u32,
    regime: Regime,
}

impl Prime {
    pub fn new(p: u32) -> GbResult<Self> {
        if (p as u64) < 2 || (p as u64) > f4gb_util::MAX_FIELD_CHARACTERISTIC {
            return Err(GbError::InvalidConfig(format!(
                "prime {p} out of the supported 2..=2^32-5 range"
            )));
        }
        Ok(Prime {
            p,
            regime: Regime::of(p),
        })
    }

    pub fn from_config(cfg: &Config) -> GbResult<Self> {
        Self::new(cfg.fc())
    }

    pub const fn value(&self) -> u32 {
        self.p
    }

    pub const fn regime(&self) -> Regime {
        self.regime
    }

    /// `p²` as `i64`; only valid (does not overflow) in the 17-/31-bit
    /// regimes, whose precondition is `p < 2^31`. Misuse in the 32-bit
    /// regime is the "overflow guard tripped" error kind.
    pub fn mod2_i64(&self) -> GbResult<i64> {
        if matches!(self.regime, Regime::ThirtyTwo) {
            return Err(GbError::PrimeRegimeMismatch {
                fc: self.p,
                regime: "32-bit",
            });
        }
        Ok((self.p as i64) * (self.p as i64))
    }

    /// `2^32 mod p`, used by the 32-bit regime's 96-bit reduction.
    pub fn red32(&self) -> u64 {
        (1u64 << 32) % self.p as u64
    }

    /// `2^64 mod p`, computed as `(2^32 mod p)^2 mod p` to avoid a 128-bit
    /// intermediate.
    pub fn red64(&self) -> u64 {
        let r32 = self.red32();
        (r32 * r32) % self.p as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_boundaries() {
        assert_eq!(Regime::of(131071), Regime::Seventeen); // 2^17 - 1
        assert_eq!(Regime::of(131072), Regime::ThirtyOne); // 2^17
        assert_eq!(Regime::of((1 << 31) - 1), Regime::ThirtyOne);
        assert_eq!(Regime::of(1 << 31), Regime::ThirtyTwo);
    }

    #[test]
    fn rejects_primes_outside_range() {
        assert!(Prime::new(1).is_err());
        assert!(Prime::new(u32::MAX).is_err());
    }

    #[test]
    fn red32_red64_are_reductions_of_powers_of_two() {
        let p = Prime::new(65521).unwrap();
        assert_eq!(p.red32(), (1u128 << 32) as u64 % 65521);
        assert_eq!(p.red64(), ((1u128 << 64) % 65521) as u64);
    }

    #[test]
    fn mod2_rejects_32_bit_regime() {
        let p = Prime::new(u32::MAX - 4).unwrap();
        assert!(p.mod2_i64().is_err());
    }
}
