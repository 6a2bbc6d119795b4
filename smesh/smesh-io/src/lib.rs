//! `.smo` file I/O for sphere meshes.
//!
//! The `.smo` format is a line-oriented text format with one record per
//! line: `v x y z r` vertices followed by `s`, `p`, and `w` primitive
//! records indexing into them. See [`parse_smo`] for the grammar and
//! the lenient parsing policy.
//!
//! # Example
//!
//! ```no_run
//! use smesh_io::{load_smo, save_smo};
//!
//! let mesh = load_smo("model.smo").unwrap();
//! save_smo(&mesh, "copy.smo").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod smo;

pub use error::{SmoError, SmoResult};
pub use smo::{load_smo, parse_smo, save_smo, write_smo};
