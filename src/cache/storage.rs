//! SQLite-based cache storage with file blob support
//!
//! Small responses live inline in SQLite; instance lists above the inline
//! threshold are written as sharded JSON files next to the database.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

/// Responses larger than this are stored as external blobs
const INLINE_THRESHOLD: usize = 16 * 1024;

type Result<T> = std::result::Result<T, CacheError>;

/// SQLite-backed cache storage
pub struct CacheStorage {
    conn: Connection,
    blobs_dir: PathBuf,
}

impl CacheStorage {
    /// Open or create cache storage at the default location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Cache directory (`~/.cache/cloudeff` on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("cloudeff"))
    }

    /// Open cache storage in a specific directory
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("cache.db");
        let blobs_dir = cache_dir.join("blobs");
        std::fs::create_dir_all(&blobs_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create blobs dir: {}", e)))?;

        let conn = Connection::open(&db_path)?;

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            Self::nuke(&db_path, &blobs_dir)?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS responses (
                cache_key TEXT PRIMARY KEY NOT NULL,
                host TEXT NOT NULL,
                time_period TEXT NOT NULL,
                data TEXT,
                blob_path TEXT,
                created_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_expires_at ON responses(expires_at);
            CREATE INDEX IF NOT EXISTS idx_time_period ON responses(time_period);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn, blobs_dir })
    }

    /// Cached bytes for `key` if present and unexpired
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Utc::now().timestamp();

        let row: Option<(Option<String>, Option<String>)> = self
            .conn
            .query_row(
                "SELECT data, blob_path FROM responses
                 WHERE cache_key = ?1 AND expires_at > ?2",
                params![key, now],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((Some(data), None)) => Ok(Some(data.into_bytes())),
            Some((None, Some(blob_path))) => match std::fs::read(self.blobs_dir.join(&blob_path)) {
                Ok(data) => Ok(Some(data)),
                Err(e) => {
                    log::warn!("Failed to read cached blob {}: {}", blob_path, e);
                    self.conn
                        .execute("DELETE FROM responses WHERE cache_key = ?1", [key])?;
                    Ok(None)
                }
            },
            _ => Ok(None),
        }
    }

    /// Store `data` under `key` for `ttl`
    pub fn put(
        &self,
        key: &str,
        data: &[u8],
        host: &str,
        time_period: &str,
        ttl: Duration,
    ) -> Result<()> {
        let now = Utc::now().timestamp();
        let expires = now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
        let size = i64::try_from(data.len()).unwrap_or(i64::MAX);

        if data.len() <= INLINE_THRESHOLD {
            self.conn.execute(
                "INSERT OR REPLACE INTO responses
                 (cache_key, host, time_period, data, blob_path, created_at, expires_at, size_bytes)
                 VALUES (?1, ?2, ?3, ?4, NULL, ?5, ?6, ?7)",
                params![
                    key,
                    host,
                    time_period,
                    String::from_utf8_lossy(data).into_owned(),
                    now,
                    expires,
                    size
                ],
            )?;
        } else {
            let blob_path = self.write_blob(key, data)?;
            self.conn.execute(
                "INSERT OR REPLACE INTO responses
                 (cache_key, host, time_period, data, blob_path, created_at, expires_at, size_bytes)
                 VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6, ?7)",
                params![key, host, time_period, blob_path, now, expires, size],
            )?;
        }
        Ok(())
    }

    /// Remove every entry and blob
    pub fn clear_all(&self) -> Result<ClearStats> {
        let removed = self.conn.execute("DELETE FROM responses", [])?;

        if self.blobs_dir.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.blobs_dir) {
                log::warn!("Failed to clear blobs directory: {}", e);
            }
            std::fs::create_dir_all(&self.blobs_dir)
                .map_err(|e| CacheError::Io(format!("Failed to recreate blobs dir: {}", e)))?;
        }

        Ok(ClearStats {
            entries_removed: removed,
        })
    }

    /// Remove entries for one reporting period
    pub fn clear_period(&self, time_period: &str) -> Result<ClearStats> {
        let blobs: Vec<String> = {
            let mut stmt = self.conn.prepare(
                "SELECT blob_path FROM responses WHERE time_period = ?1 AND blob_path IS NOT NULL",
            )?;
            let rows = stmt.query_map([time_period], |r| r.get::<_, String>(0))?;
            rows.collect::<std::result::Result<_, _>>()?
        };

        for blob in blobs {
            if let Err(e) = std::fs::remove_file(self.blobs_dir.join(&blob)) {
                log::warn!("Failed to remove cached blob {}: {}", blob, e);
            }
        }

        let removed = self
            .conn
            .execute("DELETE FROM responses WHERE time_period = ?1", [time_period])?;

        Ok(ClearStats {
            entries_removed: removed,
        })
    }

    /// Entry counts and sizes
    pub fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now().timestamp();

        let (total, valid, size, oldest, newest): (i64, i64, i64, Option<i64>, Option<i64>) =
            self.conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(expires_at > ?1), 0),
                        COALESCE(SUM(size_bytes), 0),
                        MIN(CASE WHEN expires_at > ?1 THEN created_at END),
                        MAX(CASE WHEN expires_at > ?1 THEN created_at END)
                 FROM responses",
                [now],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
            )?;

        let to_usize = |v: i64| usize::try_from(v).unwrap_or(0);

        Ok(CacheStats {
            total_entries: to_usize(total),
            valid_entries: to_usize(valid),
            expired_entries: to_usize(total - valid),
            total_size_bytes: to_usize(size),
            oldest_entry: oldest,
            newest_entry: newest,
        })
    }

    /// Write a blob file, sharded by the first two characters of the key
    fn write_blob(&self, key: &str, data: &[u8]) -> Result<String> {
        let shard: String = key.chars().take(2).collect();
        let shard_dir = self.blobs_dir.join(&shard);
        std::fs::create_dir_all(&shard_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create shard dir: {}", e)))?;

        let filename = format!("{}.json", key);
        std::fs::write(shard_dir.join(&filename), data)
            .map_err(|e| CacheError::Io(format!("Failed to write blob: {}", e)))?;

        Ok(format!("{}/{}", shard, filename))
    }

    fn nuke(db_path: &Path, blobs_dir: &Path) -> Result<()> {
        if db_path.exists() {
            std::fs::remove_file(db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
        }
        if blobs_dir.exists() {
            std::fs::remove_dir_all(blobs_dir)
                .map_err(|e| CacheError::Io(format!("Failed to remove blobs dir: {}", e)))?;
        }
        Ok(())
    }
}

/// Result of a clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Snapshot of cache contents
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}
