use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::level::{load_level, parse_level_json, LevelParseError, LevelSource, Playfield};

#[derive(Debug, Clone)]
pub struct LevelEntry {
    pub name: String,
    pub path: PathBuf,
    pub source: LevelSource,
}

/// Ordered list of level sources. Level `n` is the n-th `*.json` file of the
/// levels directory by file name.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelEntry>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read levels directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read level file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse level file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: LevelParseError,
    },
    #[error("no level files found in {dir}")]
    Empty { dir: PathBuf },
    #[error("level '{name}' ({path}) is invalid: {source}")]
    Invalid {
        name: String,
        path: PathBuf,
        #[source]
        source: LevelParseError,
    },
}

impl LevelCatalog {
    pub fn discover(dir: &Path) -> Result<Self, CatalogError> {
        let read_dir = fs::read_dir(dir).map_err(|source| CatalogError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| CatalogError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let is_json = path
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
            if is_json && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        if paths.is_empty() {
            return Err(CatalogError::Empty {
                dir: dir.to_path_buf(),
            });
        }

        let mut levels = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = fs::read_to_string(&path).map_err(|source| CatalogError::ReadFile {
                path: path.clone(),
                source,
            })?;
            let source = parse_level_json(&raw).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })?;
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            levels.push(LevelEntry { name, path, source });
        }

        info!(dir = %dir.display(), level_count = levels.len(), "levels_discovered");
        Ok(Self { levels })
    }

    pub fn from_entries(levels: Vec<LevelEntry>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn get(&self, index: usize) -> Option<&LevelEntry> {
        self.levels.get(index)
    }

    /// Resolves every level against `playfield` so bad expressions and
    /// missing characters surface at startup.
    pub fn validate(&self, playfield: Playfield) -> Result<(), CatalogError> {
        for entry in &self.levels {
            load_level(&entry.source, playfield).map_err(|source| CatalogError::Invalid {
                name: entry.name.clone(),
                path: entry.path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
