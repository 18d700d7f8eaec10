use {
    crate::Registry,
    serde::{Deserialize, Serialize},
    std::{
        borrow::Cow,
        fs,
        io::{self, Write},
        path::{Path, PathBuf},
    },
    tempfile::NamedTempFile,
};

/// Version of the on-disk cache format. Caches with another version are
/// discarded.
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error on `{path}`: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed cache `{path}`: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cache `{path}` has version {found}, expected {CACHE_VERSION}")]
    Version { path: PathBuf, found: u32 },
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CacheFile<'a> {
    version: u32,
    markets: Cow<'a, Registry>,
}

/// Write the registry to `path`.
///
/// The file is written in full to a temporary file next to it, then moved
/// into place, so a crash never leaves a half-written cache behind.
pub fn save(registry: &Registry, path: &Path) -> Result<(), PersistError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let cache = CacheFile {
        version: CACHE_VERSION,
        markets: Cow::Borrowed(registry),
    };

    let mut file = NamedTempFile::new_in(directory).map_err(|err| PersistError::io(path, err))?;
    serde_json::to_writer(&mut file, &cache).map_err(|err| PersistError::json(path, err))?;
    file.flush().map_err(|err| PersistError::io(path, err))?;
    file.persist(path)
        .map_err(|err| PersistError::io(path, err.error))?;

    tracing::debug!(path = %path.display(), markets = registry.len(), "Saved registry cache");

    Ok(())
}

/// Read a registry previously written by [`save`].
pub fn try_load(path: &Path) -> Result<Registry, PersistError> {
    let data = fs::read(path).map_err(|err| PersistError::io(path, err))?;
    let cache: CacheFile =
        serde_json::from_slice(&data).map_err(|err| PersistError::json(path, err))?;

    if cache.version != CACHE_VERSION {
        return Err(PersistError::Version {
            path: path.to_path_buf(),
            found: cache.version,
        });
    }

    Ok(cache.markets.into_owned())
}

/// Read a cached registry. The cache is best effort: a missing or unreadable
/// file yields `None`.
pub fn load(path: &Path) -> Option<Registry> {
    match try_load(path) {
        Ok(registry) => Some(registry),
        Err(PersistError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            tracing::warn!(%err, "Failed to load registry cache, ignoring");
            None
        },
    }
}

// ----------------------------------- tests -----------------------------------
