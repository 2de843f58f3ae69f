// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};

use crate::config::model::{
    ENV_FILE_GLOB, FRONT_CONTROLLER, IGNORE_FILE_SUFFIX, ProjectConfig, VendorWatch,
};
use crate::errors::Result;
use crate::watch::path_utils::{relative_components, relative_str, split_package};

/// Where a path sits relative to the vendor rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorAccess {
    /// Not inside any vendor directory.
    NotVendor,
    /// Inside a vendor directory and not allowed.
    Denied,
    /// A vendor directory on the way down to an allowed package; may be
    /// traversed but its own files are not collected.
    OnTheWay,
    /// Inside an allowed vendor package (or any vendor path when the
    /// whole vendor directory is watched).
    Inside,
}

/// Compiled scan rules for a project.
///
/// Corresponds to the inputs of a single scan:
///
/// - `include_dirs` are walked recursively from `root`.
/// - `exclude` fragments prune any directory whose root-relative path
///   contains them.
/// - `vendor` decides what happens inside directories named `vendor_dir`.
/// - The env-file glob and the front controller are fixed extras.
#[derive(Clone)]
pub struct WatchSpec {
    root: PathBuf,
    include_dirs: Vec<String>,
    exclude: Vec<String>,
    vendor_dir: String,
    vendor: VendorWatch,
    env_matcher: GlobMatcher,
    front_controller: String,
    ignore_suffix: String,
}

impl fmt::Debug for WatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSpec")
            .field("root", &self.root)
            .field("include_dirs", &self.include_dirs)
            .field("exclude", &self.exclude)
            .field("vendor", &self.vendor)
            .finish_non_exhaustive()
    }
}

impl WatchSpec {
    pub fn new(
        root: impl Into<PathBuf>,
        include_dirs: Vec<String>,
        exclude: Vec<String>,
        vendor_dir: impl Into<String>,
        vendor: VendorWatch,
    ) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            include_dirs,
            exclude,
            vendor_dir: vendor_dir.into(),
            vendor,
            env_matcher: compile_glob(ENV_FILE_GLOB)?,
            front_controller: FRONT_CONTROLLER.to_string(),
            ignore_suffix: IGNORE_FILE_SUFFIX.to_string(),
        })
    }

    /// Build the scan rules from a validated configuration.
    pub fn from_config(cfg: &ProjectConfig) -> Result<Self> {
        let watch = cfg.watch();
        Self::new(
            cfg.root(),
            watch.dirs.clone(),
            watch.exclude.clone(),
            watch.vendor_dir.clone(),
            watch.vendor.clone(),
        )
    }

    /// Replace the env-file glob (matched against file names at the root).
    pub fn with_env_glob(mut self, pattern: &str) -> Result<Self> {
        self.env_matcher = compile_glob(pattern)?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn include_dirs(&self) -> &[String] {
        &self.include_dirs
    }

    pub fn vendor(&self) -> &VendorWatch {
        &self.vendor
    }

    /// Absolute path of the front controller.
    pub fn front_controller(&self) -> PathBuf {
        self.root.join(&self.front_controller)
    }

    /// Returns true if `file_name` is an env file (`.env`, `.env.local`, ...).
    pub fn is_env_file(&self, file_name: &str) -> bool {
        self.env_matcher.is_match(file_name)
    }

    /// Vendor directories walked in addition to the include directories.
    ///
    /// - `Off`: none.
    /// - `All`: `<root>/vendor` itself.
    /// - `Packages`: `<root>/vendor/<name>` for each allowed package.
    pub fn vendor_walk_roots(&self) -> Vec<PathBuf> {
        let vendor_root = self.root.join(&self.vendor_dir);
        match &self.vendor {
            VendorWatch::Off => Vec::new(),
            VendorWatch::All => vec![vendor_root],
            VendorWatch::Packages(names) => names
                .iter()
                .map(|name| {
                    split_package(name)
                        .into_iter()
                        .fold(vendor_root.clone(), |acc, part| acc.join(part))
                })
                .collect(),
        }
    }

    /// Returns true if the root-relative directory path contains an
    /// exclude fragment.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        self.exclude.iter().any(|frag| rel_path.contains(frag.as_str()))
    }

    /// Should the walker descend into `dir`?
    pub fn allows_dir(&self, dir: &Path) -> bool {
        let Some(rel) = relative_str(&self.root, dir) else {
            return false;
        };
        if self.is_excluded(&rel) {
            return false;
        }
        self.vendor_access(dir) != VendorAccess::Denied
    }

    /// Should `file` (found during a walk) be collected?
    pub fn allows_file(&self, file: &Path) -> bool {
        let ignored = file
            .file_name()
            .map(|n| n.to_string_lossy().ends_with(self.ignore_suffix.as_str()))
            .unwrap_or(true);
        if ignored {
            return false;
        }
        matches!(
            self.vendor_access(file),
            VendorAccess::NotVendor | VendorAccess::Inside
        )
    }

    /// Classify `path` against the vendor rules.
    ///
    /// The first path component equal to the vendor directory name marks
    /// the vendor root; the remaining components are compared with the
    /// allowed package names.
    pub fn vendor_access(&self, path: &Path) -> VendorAccess {
        let Some(components) = relative_components(&self.root, path) else {
            return VendorAccess::NotVendor;
        };
        let Some(pos) = components.iter().position(|c| *c == self.vendor_dir) else {
            return VendorAccess::NotVendor;
        };
        let rest = &components[pos + 1..];

        match &self.vendor {
            VendorWatch::Off => VendorAccess::Denied,
            VendorWatch::All => VendorAccess::Inside,
            VendorWatch::Packages(names) => {
                let mut access = VendorAccess::Denied;
                for name in names {
                    let package = split_package(name);
                    if rest.starts_with(&package) {
                        return VendorAccess::Inside;
                    }
                    if package.starts_with(rest) {
                        access = VendorAccess::OnTheWay;
                    }
                }
                access
            }
        }
    }
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    Ok(Glob::new(pattern)?.compile_matcher())
}
