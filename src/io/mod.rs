//! File export.

#[cfg(feature = "stl-io")]
pub mod stl;

#[cfg(feature = "stl-io")]
pub use stl::StlFormat;
