use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::Result;
use crate::store::PostedStore;

/// Posted-identifier set persisted as a flat JSON array of strings.
///
/// The file keeps insertion order; membership checks go through a HashSet.
/// Duplicate entries in legacy state files are collapsed on load.
pub struct JsonStore {
    path: PathBuf,
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl JsonStore {
    /// Load the store from `path`. A missing file yields an empty set.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut store = Self {
            path,
            ordered: Vec::new(),
            seen: HashSet::new(),
        };

        if store.path.exists() {
            let content = fs::read_to_string(&store.path)?;
            let ids: Vec<String> = serde_json::from_str(&content)?;
            for id in ids {
                store.record(id);
            }
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PostedStore for JsonStore {
    fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    fn record(&mut self, id: String) -> bool {
        if !self.seen.insert(id.clone()) {
            return false;
        }
        self.ordered.push(id);
        true
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.ordered)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn identifiers(&self) -> Vec<String> {
        self.ordered.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::load(dir.path().join("posted.json")).unwrap();
        assert!(store.identifiers().is_empty());
        assert!(!store.contains("https://example.com/a"));
    }

    #[test]
    fn test_record_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posted.json");

        let mut store = JsonStore::load(&path).unwrap();
        assert!(store.record("https://example.com/a".into()));
        assert!(store.record("https://example.com/b".into()));
        store.save().unwrap();

        let reloaded = JsonStore::load(&path).unwrap();
        assert!(reloaded.contains("https://example.com/a"));
        assert!(reloaded.contains("https://example.com/b"));
        assert_eq!(
            reloaded.identifiers(),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_record_refuses_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::load(dir.path().join("posted.json")).unwrap();

        assert!(store.record("https://example.com/a".into()));
        assert!(!store.record("https://example.com/a".into()));
        assert_eq!(store.identifiers().len(), 1);
    }

    #[test]
    fn test_legacy_duplicates_collapsed_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posted.json");
        fs::write(
            &path,
            r#"["https://example.com/a", "https://example.com/a", "https://example.com/b"]"#,
        )
        .unwrap();

        let store = JsonStore::load(&path).unwrap();
        assert_eq!(store.identifiers().len(), 2);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("posted.json");

        let mut store = JsonStore::load(&path).unwrap();
        store.record("https://example.com/a".into());
        store.save().unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posted.json");
        fs::write(&path, "not json").unwrap();

        assert!(JsonStore::load(&path).is_err());
    }
}
