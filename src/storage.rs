// File: src/storage.rs
// Manages the local JSON item store.
//
// Changes to the Item struct or its nested types require incrementing
// LOCAL_STORAGE_VERSION below so old files are detected on load.
use crate::context::AppContext;
use crate::model::Item;
use anyhow::Result;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

// Increment when making breaking changes to the Item serialization format.
// Version history:
// - v1: initial format
const LOCAL_STORAGE_VERSION: u32 = 1;

/// Wrapper struct for versioned local storage
#[derive(serde::Serialize, serde::Deserialize)]
struct ItemsFileData {
    #[serde(default)]
    version: u32,
    items: Vec<Item>,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        file_path.with_extension("lock")
    }

    /// Runs `f` while holding an exclusive lock on a sidecar lock file,
    /// serializing access across processes.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Writes via a temp file and rename so readers never observe a
    /// partially written store.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Loads all items. A missing file is an empty store; a corrupt file
    /// is an error so callers cannot silently clobber user data.
    pub fn load(ctx: &dyn AppContext) -> Result<Vec<Item>> {
        let path = ctx.get_items_path()?;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = Self::with_lock(&path, || Ok(fs::read_to_string(&path)?))?;
        let data: ItemsFileData = serde_json::from_str(&contents).map_err(|e| {
            log::warn!("Item store at '{}' failed to parse: {}", path.display(), e);
            anyhow::anyhow!("Failed to parse item store '{}': {}", path.display(), e)
        })?;

        if data.version > LOCAL_STORAGE_VERSION {
            anyhow::bail!(
                "Item store version {} is newer than supported version {}",
                data.version,
                LOCAL_STORAGE_VERSION
            );
        }

        Ok(data.items)
    }

    /// Saves the full item list, replacing the previous contents.
    pub fn save(ctx: &dyn AppContext, items: &[Item]) -> Result<()> {
        let path = ctx.get_items_path()?;
        let data = ItemsFileData {
            version: LOCAL_STORAGE_VERSION,
            items: items.to_vec(),
        };
        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod storage_tests {
    use super::*;
    use crate::context::{AppContext, TestContext};
    use crate::model::Item;

    #[test]
    fn test_save_and_load_roundtrip() {
        let ctx = TestContext::new();
        let items = vec![Item::new("Water plants"), Item::new("Pay rent")];

        LocalStorage::save(&ctx, &items).unwrap();
        let loaded = LocalStorage::load(&ctx).unwrap();

        assert_eq!(loaded, items);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let ctx = TestContext::new();
        assert!(LocalStorage::load(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let ctx = TestContext::new();
        let path = ctx.get_items_path().unwrap();
        fs::write(&path, "{not valid json").unwrap();

        assert!(LocalStorage::load(&ctx).is_err());
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let ctx = TestContext::new();
        let path = ctx.get_items_path().unwrap();
        fs::write(&path, r#"{"version": 99, "items": []}"#).unwrap();

        assert!(LocalStorage::load(&ctx).is_err());
    }
}
