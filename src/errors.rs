//! Construction errors

use crate::float_types::Real;

/// Everything that can go wrong while turning parameters into a solid.
#[derive(Debug, thiserror::Error)]
pub enum GridfinityError {
    /// A dimension that must be strictly positive was zero or negative
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: Real },

    /// A corner radius does not fit into the width it rounds
    #[error("{name} radius {radius} exceeds half of the available width {width}")]
    RadiusTooLarge {
        name: &'static str,
        radius: Real,
        width: Real,
    },

    /// Parameter combination that produces no valid geometry
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A custom layout with no occupied cells
    #[error("layout has no occupied cells")]
    EmptyLayout,

    /// `copy_and_translate` was asked for zero copies
    #[error("translation list is empty")]
    EmptyTranslationList,

    /// Loft sections whose ring structure differs
    #[error("loft sections do not match: {0}")]
    LoftMismatch(String),

    /// A profile or solid collapsed to nothing
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used by every builder in the crate.
pub type Result<T> = std::result::Result<T, GridfinityError>;

/// Fail with [`GridfinityError::NonPositive`] unless `value > 0`.
pub(crate) fn ensure_positive(name: &'static str, value: Real) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GridfinityError::NonPositive { name, value })
    }
}

/// Fail with [`GridfinityError::RadiusTooLarge`] unless `radius <= width / 2`.
pub(crate) fn ensure_radius_fits(name: &'static str, radius: Real, width: Real) -> Result<()> {
    if radius <= width / 2.0 {
        Ok(())
    } else {
        Err(GridfinityError::RadiusTooLarge {
            name,
            radius,
            width,
        })
    }
}
