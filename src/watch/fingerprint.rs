// src/watch/fingerprint.rs

//! Modification-time fingerprints of the watched files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::errors::{CacheWarmerError, Result};
use crate::fs::FileSystem;
use crate::watch::paths::PathSet;

/// Opaque per-file change marker.
pub type Fingerprint = String;

/// Watched file → fingerprint.
///
/// Two maps are equal iff they have the same keys and the same value for
/// every key, which is exactly `BTreeMap`'s `PartialEq`.
pub type FingerprintMap = BTreeMap<PathBuf, Fingerprint>;

/// Render a modification time as `<secs>.<nanos>` since the Unix epoch.
///
/// Times before the epoch get a leading `-`.
pub fn fingerprint_of(modified: SystemTime) -> Fingerprint {
    match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => format!("{}.{:09}", d.as_secs(), d.subsec_nanos()),
        Err(e) => {
            let d = e.duration();
            format!("-{}.{:09}", d.as_secs(), d.subsec_nanos())
        }
    }
}

/// Stat one file and return its fingerprint.
pub fn fingerprint_file(fs: &dyn FileSystem, path: &Path) -> Result<Fingerprint> {
    let modified = fs.modified(path).map_err(|e| CacheWarmerError::StatError {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    })?;
    Ok(fingerprint_of(modified))
}

/// Fingerprint every path of `paths`.
///
/// Fails on the first file that cannot be stat'ed (typically one deleted
/// between enumeration and this call); no partial map is returned.
pub fn build_fingerprint_map(fs: &dyn FileSystem, paths: &PathSet) -> Result<FingerprintMap> {
    let mut map = FingerprintMap::new();
    for path in paths {
        let fingerprint = fingerprint_file(fs, path)?;
        map.insert(path.clone(), fingerprint);
    }
    debug!(files = map.len(), "built fingerprint map");
    Ok(map)
}

/// Differences between two fingerprint maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub modified: Vec<PathBuf>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Number of changed paths.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// All changed paths: added, then removed, then modified.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.added
            .iter()
            .chain(self.removed.iter())
            .chain(self.modified.iter())
    }
}

/// Compute what changed from `old` to `new`.
///
/// `diff_maps(a, b).is_empty()` holds exactly when `a == b`.
pub fn diff_maps(old: &FingerprintMap, new: &FingerprintMap) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (path, fingerprint) in new {
        match old.get(path) {
            None => changes.added.push(path.clone()),
            Some(previous) if previous != fingerprint => changes.modified.push(path.clone()),
            Some(_) => {}
        }
    }

    for path in old.keys() {
        if !new.contains_key(path) {
            changes.removed.push(path.clone());
        }
    }

    changes
}
