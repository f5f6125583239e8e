//! Sample persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DatasetError, DatasetResult};
use crate::replicate::Sample;

/// Durable storage addressed by dataset position.
pub trait SampleStore {
    /// Check if a sample is stored at `position`.
    fn contains(&self, position: usize) -> bool;

    /// Store a sample, replacing any previous one.
    fn write(&mut self, position: usize, sample: &Sample) -> DatasetResult<()>;

    /// Load the sample at `position`.
    fn read(&self, position: usize) -> DatasetResult<Sample>;
}

/// One JSON file per sample: `<dir>/<name>_<position>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
    name: String,
    pretty: bool,
}

impl DirectoryStore {
    /// Point a store at `dir` without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
            pretty: false,
        }
    }

    /// Open a store, creating `dir` if needed.
    pub fn create(dir: impl Into<PathBuf>, name: impl Into<String>) -> DatasetResult<Self> {
        let store = Self::new(dir, name);
        store.ensure_dir()?;
        Ok(store)
    }

    /// Create the store directory if it does not exist yet.
    pub fn ensure_dir(&self) -> DatasetResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DatasetError::Io(format!("Failed to create {}: {}", self.dir.display(), e))
        })
    }

    /// Pretty-print sample files.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Directory holding the sample files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a position.
    pub fn file_name(&self, position: usize) -> String {
        format!("{}_{}.json", self.name, position)
    }

    /// Full path for a position.
    pub fn path_for(&self, position: usize) -> PathBuf {
        self.dir.join(self.file_name(position))
    }
}

impl SampleStore for DirectoryStore {
    fn contains(&self, position: usize) -> bool {
        self.path_for(position).is_file()
    }

    fn write(&mut self, position: usize, sample: &Sample) -> DatasetResult<()> {
        let path = self.path_for(position);
        let json = if self.pretty {
            serde_json::to_string_pretty(sample)?
        } else {
            serde_json::to_string(sample)?
        };
        fs::write(&path, json)
            .map_err(|e| DatasetError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn read(&self, position: usize) -> DatasetResult<Sample> {
        let path = self.path_for(position);
        let json = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DatasetError::NotFound(format!("sample {} ({})", position, path.display()))
            } else {
                DatasetError::Io(format!("Failed to read {}: {}", path.display(), e))
            }
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    samples: BTreeMap<usize, Sample>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleStore for MemoryStore {
    fn contains(&self, position: usize) -> bool {
        self.samples.contains_key(&position)
    }

    fn write(&mut self, position: usize, sample: &Sample) -> DatasetResult<()> {
        self.samples.insert(position, sample.clone());
        Ok(())
    }

    fn read(&self, position: usize) -> DatasetResult<Sample> {
        self.samples
            .get(&position)
            .cloned()
            .ok_or_else(|| DatasetError::NotFound(format!("sample {position}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::features::NodeFeatures;
    use qdep_ir::DependencyEdge;

    fn sample(label: usize) -> Sample {
        Sample {
            node_features: NodeFeatures::new(vec![[1.0, 0.0, 1.0], [1.0, 1.0, 2.0]]),
            edges: vec![DependencyEdge::new(0, 1)],
            label,
        }
    }

    #[test]
    fn test_directory_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::create(dir.path().join("processed"), "bell").unwrap();

        assert!(!store.contains(3));
        store.write(3, &sample(1)).unwrap();
        assert!(store.contains(3));
        assert!(dir.path().join("processed/bell_3.json").is_file());
        assert_eq!(store.read(3).unwrap(), sample(1));
    }

    #[test]
    fn test_directory_store_missing_sample() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::create(dir.path(), "bell").unwrap();
        assert_eq!(store.read(0).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_new_store_is_lazy() {
        let dir = tempfile::tempdir().unwrap();
        let processed = dir.path().join("processed");
        let store = DirectoryStore::new(&processed, "bell");
        assert!(!processed.exists());
        assert!(!store.contains(0));
        assert_eq!(store.read(0).unwrap_err().kind(), ErrorKind::NotFound);

        store.ensure_dir().unwrap();
        assert!(processed.is_dir());
    }

    #[test]
    fn test_directory_store_pretty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::create(dir.path(), "c").unwrap().pretty(true);
        store.write(0, &sample(0)).unwrap();
        let text = fs::read_to_string(store.path_for(0)).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(store.read(0).unwrap(), sample(0));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.write(0, &sample(0)).unwrap();
        store.write(0, &sample(2)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.read(0).unwrap().label, 2);
        assert!(store.read(1).is_err());
    }
}
