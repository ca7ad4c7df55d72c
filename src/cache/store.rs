//! Cache storage implementations.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use super::artifact::CachedArtifact;
use super::key::CacheKey;
use crate::error::{Result, SnipError};

/// Durable key to artifact mapping.
///
/// Implementations never expire entries on their own; whether a stored
/// artifact is still good is decided by the resolver.
pub trait ArtifactStore: Send + Sync {
    /// Read the artifact stored under `key`, or `None` if there is none.
    fn get(&self, key: &CacheKey) -> Result<Option<CachedArtifact>>;

    /// Replace whatever is stored under `key` with `artifact`.
    fn put(&self, key: &CacheKey, artifact: &CachedArtifact) -> Result<()>;

    /// Check for an entry without decoding it.
    fn exists(&self, key: &CacheKey) -> bool;
}

/// Directory-backed store, one JSON file per key.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Root directory for cache.
    root: PathBuf,
}

impl CacheStore {
    /// Create a new cache store. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| SnipError::CacheWrite {
            path: self.root.clone(),
            message: e.to_string(),
        })
    }

    /// Remove a cached entry.
    pub fn remove(&self, key: &CacheKey) -> Result<bool> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// All readable artifacts, most recently cached first.
    ///
    /// Files that fail to decode are skipped with a warning.
    pub fn list(&self) -> Result<Vec<CachedArtifact>> {
        let mut artifacts = Vec::new();

        for path in self.entry_files()? {
            match read_artifact(&path) {
                Ok(artifact) => artifacts.push(artifact),
                Err(e) => tracing::warn!("Skipping unreadable cache entry: {}", e),
            }
        }

        artifacts.sort_by(|a, b| b.cached_at.cmp(&a.cached_at));
        Ok(artifacts)
    }

    /// Delete every cache entry, readable or not.
    pub fn clear(&self) -> Result<usize> {
        let files = self.entry_files()?;
        let count = files.len();

        for path in files {
            fs::remove_file(&path)?;
        }

        Ok(count)
    }

    /// Total size of all entry files in bytes.
    pub fn total_size(&self) -> Result<u64> {
        let mut total = 0;
        for path in self.entry_files()? {
            total += fs::metadata(&path)?.len();
        }
        Ok(total)
    }

    fn entry_files(&self) -> Result<Vec<PathBuf>> {
        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let suffix = format!(".{}", CacheKey::EXTENSION);
        let mut files = Vec::new();
        for entry in dir {
            let path = entry?.path();
            let is_entry = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(&suffix));
            if is_entry && path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }
}

fn read_artifact(path: &Path) -> Result<CachedArtifact> {
    let json = fs::read_to_string(path).map_err(|e| SnipError::CacheRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&json).map_err(|e| SnipError::CacheRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl ArtifactStore for CacheStore {
    fn get(&self, key: &CacheKey) -> Result<Option<CachedArtifact>> {
        let path = self.entry_path(key);

        match read_artifact(&path) {
            Ok(artifact) => Ok(Some(artifact)),
            Err(SnipError::CacheRead { .. }) if !path.exists() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write-to-temp-then-rename, so readers and racing writers only ever
    /// see a complete record.
    fn put(&self, key: &CacheKey, artifact: &CachedArtifact) -> Result<()> {
        self.ensure_dir()?;

        let path = self.entry_path(key);
        let write_err = |message: String| SnipError::CacheWrite {
            path: path.clone(),
            message,
        };

        let json = serde_json::to_string_pretty(artifact).map_err(|e| write_err(e.to_string()))?;

        let mut temp = NamedTempFile::new_in(&self.root).map_err(|e| write_err(e.to_string()))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| write_err(e.to_string()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| write_err(e.to_string()))?;
        temp.persist(&path)
            .map_err(|e| write_err(e.error.to_string()))?;

        Ok(())
    }

    fn exists(&self, key: &CacheKey) -> bool {
        self.entry_path(key).is_file()
    }
}

/// In-process store, for tests and embedders that do not want disk I/O.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<CacheKey, CachedArtifact>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CachedArtifact>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl ArtifactStore for MemoryStore {
    fn get(&self, key: &CacheKey) -> Result<Option<CachedArtifact>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &CacheKey, artifact: &CachedArtifact) -> Result<()> {
        self.lock().insert(key.clone(), artifact.clone());
        Ok(())
    }

    fn exists(&self, key: &CacheKey) -> bool {
        self.lock().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::artifact::fixtures::artifact;
    use crate::cache::key::derive;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn cache_store_creation() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        assert_eq!(store.root(), temp.path());
    }

    #[test]
    fn put_and_get_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        let key = derive("abc123", "");
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let original = artifact("abc123", Some(t1));

        store.put(&key, &original).unwrap();
        let loaded = store.get(&key).unwrap().unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn get_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("not-yet-created"));

        assert!(store.get(&derive("abc123", "")).unwrap().is_none());
        assert!(!store.exists(&derive("abc123", "")));
    }

    #[test]
    fn corrupt_entry_is_read_error() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        let key = derive("abc123", "");
        fs::write(store.entry_path(&key), "{ not json").unwrap();

        let err = store.get(&key).unwrap_err();
        assert!(matches!(err, SnipError::CacheRead { .. }));
        assert!(store.exists(&key));
    }

    #[test]
    fn put_overwrites_whole_record() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        let key = derive("abc123", "");

        store.put(&key, &artifact("abc123", None)).unwrap();
        let mut newer = artifact("abc123", Some(Utc::now()));
        newer.language = None;
        newer.raw_content = None;
        store.put(&key, &newer).unwrap();

        assert_eq!(store.get(&key).unwrap().unwrap(), newer);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn put_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        store
            .put(&derive("abc123", ""), &artifact("abc123", None))
            .unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".cache.json"));
    }

    #[test]
    fn concurrent_puts_on_same_key_keep_one_writer() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(CacheStore::new(temp.path()));
        let key = derive("abc123", "");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let key = key.clone();
                thread::spawn(move || {
                    let mut a = artifact("abc123", None);
                    a.formatted_content = format!("writer-{}", i).repeat(500);
                    store.put(&key, &a).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let stored = store.get(&key).unwrap().unwrap();
        let winner = &stored.formatted_content[..8];
        assert!(winner.starts_with("writer-"));
        assert_eq!(stored.formatted_content, winner.repeat(500));
    }

    #[test]
    fn remove_entry() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        let key = derive("abc123", "a.rb");
        store.put(&key, &artifact("abc123", None)).unwrap();

        assert!(store.remove(&key).unwrap());
        assert!(store.get(&key).unwrap().is_none());
        assert!(!store.remove(&key).unwrap());
    }

    #[test]
    fn list_skips_unreadable_and_sorts_newest_first() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        let mut old = artifact("old", None);
        old.cached_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut new = artifact("new", None);
        new.cached_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        store.put(&derive("old", ""), &old).unwrap();
        store.put(&derive("new", ""), &new).unwrap();
        fs::write(temp.path().join("broken--0.cache.json"), "nope").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].collection_id, "new");
        assert_eq!(listed[1].collection_id, "old");
    }

    #[test]
    fn clear_removes_all_entries() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        store.put(&derive("a", ""), &artifact("a", None)).unwrap();
        store.put(&derive("b", ""), &artifact("b", None)).unwrap();
        fs::write(temp.path().join("broken--0.cache.json"), "nope").unwrap();

        assert_eq!(store.clear().unwrap(), 3);
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.total_size().unwrap(), 0);
    }

    #[test]
    fn total_size_matches_files() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        let key = derive("a", "");
        store.put(&key, &artifact("a", None)).unwrap();

        let expected = fs::metadata(store.entry_path(&key)).unwrap().len();
        assert_eq!(store.total_size().unwrap(), expected);
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        let key = derive("abc123", "");
        assert!(store.is_empty());
        assert!(store.get(&key).unwrap().is_none());

        let a = artifact("abc123", None);
        store.put(&key, &a).unwrap();

        assert!(store.exists(&key));
        assert_eq!(store.get(&key).unwrap().unwrap(), a);
        assert_eq!(store.len(), 1);
    }
}
