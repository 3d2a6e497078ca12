// Re-export parry for the f64 scalar
pub use parry3d_f64 as parry3d;

// Our Real scalar type:
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Plane-classification thickness used by the BSP kernel.
pub const EPSILON: Real = 1e-5;

/// Smallest radius handed to a profile builder. Corners that would collapse
/// to a zero radius get this instead so arcs never degenerate.
pub const SMALL_NUMBER: Real = 0.01;

/// Lazily-initialized tolerance used for geometric comparisons outside the BSP
/// (vertex welding, zero-area filtering, manifold checks).
/// Can be overridden:
///  1) **Build-time**: set env var `GRIDFINITY_TOLERANCE` (e.g. `GRIDFINITY_TOLERANCE=1e-7 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-9
}

/// Returns the current tolerance value.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("GRIDFINITY_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// π/4
pub const FRAC_PI_4: Real = core::f64::consts::FRAC_PI_4;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
