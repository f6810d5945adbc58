//! Filesystem catalog sources.
//!
//! Catalog files are JSON or TOML documents with two arrays:
//!
//! ```json
//! {
//!   "groups": [
//!     { "id": "ddd", "name": "Domain-Driven Design", "type": "design", "priority": 0 }
//!   ],
//!   "stereotypes": [
//!     {
//!       "id": "ddd.AggregateRoot",
//!       "name": "Aggregate Root",
//!       "groups": ["ddd"],
//!       "priority": 0,
//!       "inherited": true,
//!       "assignable": ["org.jmolecules.ddd.types.AggregateRoot"],
//!       "annotated": ["org.jmolecules.ddd.annotation.AggregateRoot"]
//!     }
//!   ]
//! }
//! ```
//!
//! Every group loaded from a file is stamped with the file's `file://`
//! locator as its source.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use stereoscope_core::{
    application::{ApplicationError, ports::CatalogSource},
    domain::{Catalog, GroupType, StereotypeDefinition, StereotypeGroup},
    error::StereoResult,
};

use crate::format::read_document;

/// File names picked up by [`CatalogDirectoryScanner`].
pub const CATALOG_FILE_NAMES: [&str; 3] = [
    "stereotypes.json",
    "stereotypes.toml",
    "jmolecules-stereotypes.json",
];

// ── Document types ────────────────────────────────────────────────────────────

/// Serialized form of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    #[serde(default)]
    pub stereotypes: Vec<StereotypeEntry>,
}

/// One entry of `groups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub group_type: GroupType,
    #[serde(default)]
    pub priority: i32,
}

/// One entry of `stereotypes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StereotypeEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_inherited")]
    pub inherited: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignable: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotated: Vec<String>,
}

fn default_inherited() -> bool {
    true
}

impl CatalogDocument {
    /// Build a catalog, stamping `source` onto every entry.
    pub fn into_catalog(self, source: &str) -> StereoResult<Catalog> {
        let mut builder = Catalog::builder();

        for group in self.groups {
            let name = group.name.unwrap_or_else(|| group.id.clone());
            builder = builder.group(
                StereotypeGroup::new(group.id, name)
                    .with_type(group.group_type)
                    .with_priority(group.priority)
                    .with_source(source),
            );
        }

        for entry in self.stereotypes {
            let mut definition = StereotypeDefinition::new(entry.id)
                .with_priority(entry.priority)
                .with_inherited(entry.inherited)
                .with_source(source);
            if let Some(name) = entry.name {
                definition = definition.with_name(name);
            }
            for group in entry.groups {
                definition = definition.with_group(group);
            }
            for type_name in entry.assignable {
                definition = definition.with_assignable(type_name);
            }
            for marker in entry.annotated {
                definition = definition.with_annotated(marker);
            }
            builder = builder.stereotype(definition);
        }

        Ok(builder.build()?)
    }
}

// ── Single file ───────────────────────────────────────────────────────────────

/// A catalog stored in one JSON or TOML file.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for CatalogFile {
    fn locator(&self) -> String {
        file_locator(&self.path)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> StereoResult<Catalog> {
        let locator = self.locator();
        let document: CatalogDocument =
            read_document(&self.path).map_err(|e| ApplicationError::CatalogSource {
                locator: locator.clone(),
                reason: e.to_string(),
            })?;
        debug!(
            groups = document.groups.len(),
            stereotypes = document.stereotypes.len(),
            "parsed catalog file"
        );
        document.into_catalog(&locator)
    }
}

// ── Directory scan ────────────────────────────────────────────────────────────

/// Every catalog file found below a directory.
///
/// Files are merged in path order. A file that fails to load is skipped
/// with a `WARN` log so one bad file does not hide the others.
#[derive(Debug, Clone)]
pub struct CatalogDirectoryScanner {
    root: PathBuf,
}

impl CatalogDirectoryScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Catalog files below the root, sorted by path.
    pub fn discover(&self) -> StereoResult<Vec<CatalogFile>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::CatalogSource {
                locator: self.locator(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_catalog = entry
                .file_name()
                .to_str()
                .is_some_and(|name| CATALOG_FILE_NAMES.contains(&name));
            if is_catalog {
                files.push(CatalogFile::new(entry.path()));
            }
        }
        Ok(files)
    }
}

impl CatalogSource for CatalogDirectoryScanner {
    fn locator(&self) -> String {
        file_locator(&self.root)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self) -> StereoResult<Catalog> {
        let mut catalog = Catalog::empty();
        for file in self.discover()? {
            match file.load() {
                Ok(loaded) => catalog = catalog.merge(&loaded),
                Err(e) => warn!(
                    file = %file.path().display(),
                    error = %e,
                    "skipping catalog file due to load error"
                ),
            }
        }
        Ok(catalog)
    }
}

/// Pick the right source for a user-supplied path.
pub fn source_for(path: &Path) -> Box<dyn CatalogSource> {
    if path.is_dir() {
        Box::new(CatalogDirectoryScanner::new(path))
    } else {
        Box::new(CatalogFile::new(path))
    }
}

fn file_locator(path: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}
