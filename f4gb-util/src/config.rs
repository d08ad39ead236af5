use serde::{Deserialize, Serialize};

use crate::error::GbError;

/// The largest prime this core will accept: `2^32 - 5`, the largest prime
/// below `2^32`.
pub const MAX_FIELD_CHARACTERISTIC: u64 = u32::MAX as u64 - 4;

/// `ff_bits` values recognized by the core. Only `ThirtyTwo` is implemented;
/// `Rational` is accepted for configuration round-tripping but any attempt
/// to actually run the core with it returns [`GbError::InvalidConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldWidth {
    Rational,
    Eight,
    Sixteen,
    ThirtyTwo,
}

impl FieldWidth {
    pub const fn bits(self) -> u32 {
        match self {
            FieldWidth::Rational => 0,
            FieldWidth::Eight => 8,
            FieldWidth::Sixteen => 16,
            FieldWidth::ThirtyTwo => 32,
        }
    }
}

/// Configuration recognized by the F4 core.
///
/// Construct via [`Config::new`], which validates every field; there is no
/// public way to build an unvalidated `Config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    nthrds: usize,
    fc: u32,
    info_level: u8,
    mnsel: usize,
    max_uht_size: usize,
    ff_bits: FieldWidth,
}

impl Config {
    /// Validates and constructs a `Config`. `fc` must lie in `2..=2^32-5`
    /// and `nthrds` must be at least 1; `info_level` is clamped to `0..=3`
    /// rather than rejected, since it only controls log verbosity.
    pub fn new(
        nthrds: usize,
        fc: u32,
        info_level: u8,
        mnsel: usize,
        max_uht_size: usize,
        ff_bits: FieldWidth,
    ) -> Result<Self, GbError> {
        if nthrds == 0 {
            return Err(GbError::InvalidConfig("nthrds must be >= 1".into()));
        }
        if (fc as u64) < 2 || (fc as u64) > MAX_FIELD_CHARACTERISTIC {
            return Err(GbError::InvalidConfig(format!(
                "fc must lie in 2..={MAX_FIELD_CHARACTERISTIC}, got {fc}"
            )));
        }
        if ff_bits != FieldWidth::ThirtyTwo {
            return Err(GbError::InvalidConfig(
                "only ff_bits = ThirtyTwo is implemented by this core".into(),
            ));
        }
        if mnsel == 0 {
            return Err(GbError::InvalidConfig("mnsel must be >= 1".into()));
        }
        Ok(Self {
            nthrds,
            fc,
            info_level: info_level.min(3),
            mnsel,
            max_uht_size,
            ff_bits,
        })
    }

    pub const fn nthrds(&self) -> usize {
        self.nthrds
    }

    pub const fn fc(&self) -> u32 {
        self.fc
    }

    pub const fn info_level(&self) -> u8 {
        self.info_level
    }

    pub const fn mnsel(&self) -> usize {
        self.mnsel
    }

    pub const fn max_uht_size(&self) -> usize {
        self.max_uht_size
    }

    pub const fn ff_bits(&self) -> FieldWidth {
        self.ff_bits
    }

    /// Bit width of the random-multiplier mask used by the probabilistic
    /// strategy: `ceil(log2(max_uht_size))`.
    pub fn probabilistic_mask_bits(&self) -> u32 {
        if self.max_uht_size <= 1 {
            1
        } else {
            (usize::BITS - (self.max_uht_size - 1).leading_zeros()).max(1)
        }
    }
}
