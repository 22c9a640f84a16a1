//! Cache artifact files for aggregated graphs
//!
//! The binary artifact at `{directory}/{name}.graph.cache` is the source of
//! truth: when caching is allowed its existence alone means the aggregation
//! can be skipped. Writes go through a temp file in the same directory and
//! are renamed into place, so a reader never sees a half-written artifact.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::CacheError;
use crate::graph::Graph;
use crate::io::{from_binary, to_binary};

/// Suffix of the primary binary artifact.
pub const GRAPH_CACHE_SUFFIX: &str = "graph.cache";

/// `{directory}/{name}.{suffix}`
pub fn artifact_path(directory: &Path, name: &str, suffix: &str) -> PathBuf {
    directory.join(format!("{}.{}", name, suffix))
}

/// Get the primary artifact path for a repository.
pub fn graph_cache_path(directory: &Path, name: &str) -> PathBuf {
    artifact_path(directory, name, GRAPH_CACHE_SUFFIX)
}

/// Pick the explicit directory if given, else the default. The directory
/// must already exist; it is never created here.
pub fn resolve_directory(
    explicit: Option<&Path>,
    default: Option<&Path>,
) -> Result<PathBuf, CacheError> {
    let directory = explicit.or(default).ok_or(CacheError::NoDirectory)?;
    if !directory.is_dir() {
        return Err(CacheError::DirectoryNotFound(directory.to_path_buf()));
    }
    Ok(directory.to_path_buf())
}

/// The artifact is reused iff caching is allowed and the artifact exists.
/// Where the directory came from plays no part in the decision.
pub fn should_use_cache(allow_cache: bool, artifact_exists: bool) -> bool {
    allow_cache && artifact_exists
}

/// Load graph from a binary artifact.
pub fn load_graph(path: &Path) -> Result<Graph, CacheError> {
    let file = File::open(path).map_err(|e| CacheError::io(path, e))?;
    let graph = from_binary(BufReader::new(file)).map_err(|source| CacheError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Graph cache loaded from: {}", path.display());
    Ok(graph)
}

/// Write a graph artifact in one step (stage + commit).
pub fn save_graph(graph: &Graph, path: &Path) -> Result<(), CacheError> {
    StagedArtifact::stage(graph, path)?.commit()?;
    Ok(())
}

/// Remove an artifact. Returns whether a file was actually removed.
pub fn remove_artifact(path: &Path) -> Result<bool, CacheError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CacheError::io(path, e)),
    }
}

/// A binary artifact written to a temp file next to its target and not yet
/// visible under the target name. Dropping it uncommitted deletes the temp file.
pub struct StagedArtifact {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedArtifact {
    pub fn stage(graph: &Graph, target: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let target = target.into();
        let directory = parent_dir(&target);
        let mut temp = NamedTempFile::new_in(directory).map_err(|e| CacheError::io(directory, e))?;

        to_binary(graph, BufWriter::new(temp.as_file_mut())).map_err(|source| {
            CacheError::Format {
                path: target.clone(),
                source,
            }
        })?;
        temp.as_file()
            .sync_all()
            .map_err(|e| CacheError::io(temp.path(), e))?;

        tracing::debug!("Staged graph artifact for {}", target.display());
        Ok(StagedArtifact { temp, target })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Atomically move the staged file over the target path.
    pub fn commit(self) -> Result<PathBuf, CacheError> {
        let StagedArtifact { temp, target } = self;
        temp.persist(&target)
            .map_err(|e| CacheError::io(&target, e.error))?;
        tracing::debug!("Graph artifact committed: {}", target.display());
        Ok(target)
    }
}

/// Write a file through a temp file + rename so it is either complete or absent.
pub fn write_atomic<F, E>(path: &Path, write: F) -> Result<(), E>
where
    F: FnOnce(&mut dyn Write) -> Result<(), E>,
    E: From<io::Error>,
{
    let mut temp = NamedTempFile::new_in(parent_dir(path))?;
    {
        let mut out = BufWriter::new(temp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
