// src/watch/mod.rs

//! File enumeration and change fingerprints.
//!
//! This module is responsible for:
//! - Compiling the include / exclude / vendor rules of a project.
//! - Walking the project to build the watched [`PathSet`].
//! - Turning a `PathSet` into a [`FingerprintMap`] of modification times,
//!   and diffing two such maps.
//!
//! It does **not** poll or decide when to rebuild; see [`crate::engine`].

pub mod fingerprint;
pub mod path_utils;
pub mod paths;
pub mod patterns;

use crate::errors::Result;
use crate::fs::FileSystem;

pub use fingerprint::{
    build_fingerprint_map, diff_maps, fingerprint_of, ChangeSet, Fingerprint, FingerprintMap,
};
pub use paths::{build_path_set, find_files, PathSet};
pub use patterns::{VendorAccess, WatchSpec};

/// One full scan: enumerate the files, then fingerprint them.
pub fn scan(fs: &dyn FileSystem, spec: &WatchSpec) -> Result<FingerprintMap> {
    let paths = build_path_set(fs, spec)?;
    build_fingerprint_map(fs, &paths)
}
