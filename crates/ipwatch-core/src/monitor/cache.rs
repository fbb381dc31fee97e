use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};

/// The last accepted address and when it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAddress {
    pub address: String,
    pub modified_at: DateTime<Utc>,
}

impl StoredAddress {
    /// Age relative to `now`. Negative if the file's mtime is in the future.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.modified_at
    }

    /// Human-readable age relative to `now`, e.g. "3h ago".
    pub fn age_display_at(&self, now: DateTime<Utc>) -> String {
        let minutes = self.age_at(now).num_minutes();
        if minutes < 1 {
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// One-line cache file holding the last accepted external address.
///
/// Only the address is stored; the filesystem mtime doubles as the
/// "last notified" timestamp.
pub struct AddressCache {
    path: PathBuf,
}

impl AddressCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached record, or `None` if the file does not exist yet.
    pub fn load(&self) -> Result<Option<StoredAddress>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))?;
        let address = contents.lines().next().unwrap_or_default().trim_end().to_string();

        let modified = std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to read cache mtime: {}", self.path.display()))?;

        Ok(Some(StoredAddress {
            address,
            modified_at: DateTime::<Utc>::from(modified),
        }))
    }

    /// Write `address` as the new record, refreshing the mtime.
    pub fn store(&self, address: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create cache directory: {}", parent.display())
                })?;
            }
        }
        std::fs::write(&self.path, format!("{}\n", address))
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let cache = AddressCache::new(dir.path().join("cache.txt"));
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_store_writes_single_line() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let cache = AddressCache::new(dir.path().join("cache.txt"));
        cache.store("1.2.3.4").unwrap();

        let contents = std::fs::read_to_string(cache.path()).unwrap();
        assert_eq!(contents, "1.2.3.4\n");
    }

    #[test]
    fn test_store_creates_parent_dirs() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let cache = AddressCache::new(dir.path().join("state").join("cache.txt"));
        cache.store("1.2.3.4").unwrap();
        assert!(cache.path().exists());
    }

    #[test]
    fn test_load_trims_trailing_whitespace() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let cache = AddressCache::new(dir.path().join("cache.txt"));
        std::fs::write(cache.path(), "2001:db8::1  \r\n").unwrap();

        let stored = cache.load().unwrap().expect("cache should exist");
        assert_eq!(stored.address, "2001:db8::1");
    }

    #[test]
    fn test_load_reads_first_line_only() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let cache = AddressCache::new(dir.path().join("cache.txt"));
        std::fs::write(cache.path(), "1.2.3.4\ngarbage\n").unwrap();

        let stored = cache.load().unwrap().expect("cache should exist");
        assert_eq!(stored.address, "1.2.3.4");
    }

    #[test]
    fn test_loaded_record_is_recent() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let cache = AddressCache::new(dir.path().join("cache.txt"));
        cache.store("1.2.3.4").unwrap();

        let stored = cache.load().unwrap().expect("cache should exist");
        assert!(stored.age_at(Utc::now()) < Duration::minutes(1));
        assert_eq!(stored.age_display_at(Utc::now()), "just now");
    }

    #[test]
    fn test_age_display_at_uses_given_clock() {
        let written = Utc::now();
        let stored = StoredAddress {
            address: "1.2.3.4".to_string(),
            modified_at: written,
        };
        assert_eq!(stored.age_display_at(written), "just now");
        assert_eq!(stored.age_display_at(written + Duration::minutes(5)), "5m ago");
        assert_eq!(stored.age_display_at(written + Duration::hours(5)), "5h ago");
        assert_eq!(stored.age_display_at(written + Duration::days(8)), "8d ago");
    }

    #[test]
    fn test_store_reports_unusable_parent() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        // A regular file where the cache directory should be
        let blocker = dir.path().join("state");
        std::fs::write(&blocker, "").unwrap();
        let cache = AddressCache::new(blocker.join("cache.txt"));

        let err = cache.store("1.2.3.4").unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Failed to create cache directory"));
        assert!(msg.contains("state"));
    }
}
