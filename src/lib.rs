//! Parametric **Gridfinity** bins and baseplates, built as polygon meshes with
//! Boolean operations on [BSP](mesh::bsp) trees.
//!
//! Every model is described by a serde config ([`config::BinConfig`],
//! [`config::BaseplateConfig`], [`config::LabelShelfConfig`]) and turned into
//! a closed [`mesh::Mesh`] by the builders in [`bins`]:
//!
//! ```no_run
//! use gridfinity::bins::build_bin;
//! use gridfinity::config::BinConfig;
//!
//! let bin = build_bin(&BinConfig::parts_bin()).unwrap();
//! let stl = bin.to_stl_binary("parts_bin").unwrap();
//! ```
//!
//! # Features
//! #### Default
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//! - **hashmap**: enables use of hashbrown for `is_manifold`

#![forbid(unsafe_code)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod bins;
pub mod config;
pub mod errors;
pub mod features;
pub mod float_types;
pub mod io;
pub mod layout;
pub mod mesh;
pub mod sketch;
pub mod traits;

pub use bins::Model;
pub use errors::{GridfinityError, Result};
pub use mesh::Mesh;
pub use sketch::Sketch;
pub use traits::CSGOps;
