//! Installed-version lookup backing dependency constraint evaluation.

use semver::Version;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Resolves the installed version of a dependency.
///
/// An unknown name resolves to `None` and the constraint referencing it fails
/// closed; the lookup itself never fails.
pub trait VersionLookup {
    /// Returns the installed version of `name`, if known.
    fn installed_version(&self, name: &str) -> Option<Version>;
}

/// A fixed name-to-version table.
///
/// Useful for tests and for embedders that already know their environment.
#[derive(Debug, Clone, Default)]
pub struct StaticVersions {
    versions: BTreeMap<String, Version>,
}

impl StaticVersions {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a version to the table.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, version: Version) -> Self {
        self.versions.insert(name.into(), version);
        self
    }

    /// Adds a version parsed from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if `version` is not a valid semantic version.
    pub fn try_with(self, name: impl Into<String>, version: &str) -> Result<Self, semver::Error> {
        Ok(self.with(name, Version::parse(version)?))
    }
}

impl VersionLookup for StaticVersions {
    fn installed_version(&self, name: &str) -> Option<Version> {
        self.versions.get(name).cloned()
    }
}

/// Errors reading a lockfile.
#[derive(Debug, Error)]
pub enum LockfileError {
    /// IO error reading the lockfile.
    #[error("Failed to read lockfile {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in the lockfile.
    #[error("Failed to parse lockfile {path}: {message}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },
}

/// Versions resolved from a `Cargo.lock` file.
///
/// When a package appears multiple times, the highest version wins. Entries
/// with unparseable versions are skipped with a warning rather than failing
/// the whole lookup.
#[derive(Debug, Clone)]
pub struct LockfileVersions {
    versions: BTreeMap<String, Version>,
}

impl LockfileVersions {
    /// Reads and parses the lockfile at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_path(path: &Path) -> Result<Self, LockfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| LockfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let versions = Self::parse(&content).map_err(|message| LockfileError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(
            "Loaded {} package version(s) from {}",
            versions.len(),
            path.display()
        );
        Ok(Self { versions })
    }

    /// Parses lockfile content into a version table.
    fn parse(content: &str) -> Result<BTreeMap<String, Version>, String> {
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| e.to_string())?;
        let mut versions = BTreeMap::new();

        let Some(packages) = table.get("package").and_then(toml::Value::as_array) else {
            return Ok(versions);
        };

        for package in packages {
            let Some(name) = package.get("name").and_then(toml::Value::as_str) else {
                continue;
            };
            let Some(version) = package.get("version").and_then(toml::Value::as_str) else {
                continue;
            };
            match Version::parse(version) {
                Ok(parsed) => match versions.entry(name.to_string()) {
                    Entry::Vacant(entry) => {
                        entry.insert(parsed);
                    }
                    Entry::Occupied(mut entry) => {
                        if parsed > *entry.get() {
                            entry.insert(parsed);
                        }
                    }
                },
                Err(e) => {
                    warn!("Skipping package `{name}` with invalid version `{version}`: {e}");
                }
            }
        }

        Ok(versions)
    }

    /// Returns the number of known packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true if no packages are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl VersionLookup for LockfileVersions {
    fn installed_version(&self, name: &str) -> Option<Version> {
        self.versions.get(name).cloned()
    }
}
