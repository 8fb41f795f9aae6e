#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Accept-history storage and summaries.
//!
//! Two [`HistoryStore`] implementations live here: [`MemoryHistory`] for
//! tests and embedding, and [`JsonFileHistory`], which persists counts as a
//! flat JSON object `{"<snack id>": count}`. Counts only ever grow.
//!
//! Increments are serialized per store instance. Two processes writing the
//! same file still race: each replaces the file atomically, so the file is
//! never torn, but the later write wins and may drop the other's increment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use vibesnack_core::{total_accepts, AcceptCounts, HistoryError, HistoryStore, SnackId};

/// Fallback timestamp when formatting fails
const FALLBACK_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

/// History kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    counts: Mutex<AcceptCounts>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_counts(counts: AcceptCounts) -> Self {
        Self {
            counts: Mutex::new(counts),
        }
    }
}

impl HistoryStore for MemoryHistory {
    fn load(&self) -> Result<AcceptCounts, HistoryError> {
        let counts = self.counts.lock().map_err(|_| HistoryError::Poisoned)?;
        Ok(counts.clone())
    }

    fn increment(&self, id: SnackId) -> Result<u64, HistoryError> {
        let mut counts = self.counts.lock().map_err(|_| HistoryError::Poisoned)?;
        let count = counts.entry(id).or_insert(0);
        *count = count.saturating_add(1);
        Ok(*count)
    }
}

/// History persisted in a JSON file.
///
/// A missing or empty file reads as empty history. Each increment reads the
/// file, bumps one count and replaces the file through a temporary file in
/// the same directory, so a failed write leaves the previous state intact.
#[derive(Debug)]
pub struct JsonFileHistory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistory {
    fn load(&self) -> Result<AcceptCounts, HistoryError> {
        read_counts(&self.path)
    }

    fn increment(&self, id: SnackId) -> Result<u64, HistoryError> {
        let _guard = self.write_lock.lock().map_err(|_| HistoryError::Poisoned)?;
        // A corrupt file is an error here; overwriting it would lose counts.
        let mut counts = read_counts(&self.path)?;
        let count = counts.entry(id).or_insert(0);
        *count = count.saturating_add(1);
        let updated = *count;
        write_counts(&self.path, &counts)?;
        Ok(updated)
    }
}

fn read_counts(path: &Path) -> Result<AcceptCounts, HistoryError> {
    if !path.exists() {
        return Ok(AcceptCounts::new());
    }
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(AcceptCounts::new());
    }
    Ok(serde_json::from_str(&raw)?)
}

fn write_counts(path: &Path, counts: &AcceptCounts) -> Result<(), HistoryError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, counts)?;
        writer.flush()?;
    }
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| HistoryError::Io(e.error))?;
    Ok(())
}

/// One snack's share of the accept history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: SnackId,
    pub count: u64,
    /// Fraction of all accepts (0.0 to 1.0)
    pub share: f64,
}

/// Aggregated view of a user's accept history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Timestamp when the summary was generated
    pub ts: String,
    /// Total number of accept events
    pub total: u64,
    /// Entries ordered by count (descending), ties by id
    pub entries: Vec<HistoryEntry>,
}

impl HistorySummary {
    #[must_use]
    pub fn from_counts(counts: &AcceptCounts) -> Self {
        let total = total_accepts(counts);
        let mut entries: Vec<HistoryEntry> = counts
            .iter()
            .map(|(&id, &count)| HistoryEntry {
                id,
                count,
                share: share(count, total),
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.id.cmp(&b.id)));

        Self {
            ts: iso8601_now(),
            total,
            entries,
        }
    }

    /// Most accepted snack, if any accept was recorded.
    #[must_use]
    pub fn favourite(&self) -> Option<&HistoryEntry> {
        self.entries.first().filter(|e| e.count > 0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64 / total as f64
    }
}

fn iso8601_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_string())
}
