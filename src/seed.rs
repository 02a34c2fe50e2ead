//! Import and seeding
//!
//! The importer flattens a source tree file into a records file; the seeder
//! validates a records file and loads it into a store exactly once.

use crate::error::{ApiError, StorageError};
use crate::record::{validate_sequence, FlatRecord};
use crate::store::{RecordStore, SeedOutcome};
use crate::tree::{FlattenOptions, FlattenStats, Flattener, SourceNode};
use serde::Deserialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Read a nested source tree from JSON.
///
/// Nesting depth is unbounded; the stack grows on demand while parsing.
pub fn read_source_tree(path: &Path) -> Result<SourceNode, ApiError> {
    let file = File::open(path).map_err(StorageError::from)?;
    let mut de = serde_json::Deserializer::from_reader(BufReader::new(file));
    de.disable_recursion_limit();
    let tree = SourceNode::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(StorageError::from)?;
    de.end().map_err(StorageError::from)?;
    Ok(tree)
}

/// Read a records file (JSON array in id order).
///
/// A trailing comma after the last record is accepted, as older importers
/// wrote one after every record.
pub fn read_records(path: &Path) -> Result<Vec<FlatRecord>, ApiError> {
    let text = std::fs::read_to_string(path).map_err(StorageError::from)?;
    let records = serde_json::from_str(strip_trailing_comma(&text).as_ref())
        .map_err(StorageError::from)?;
    Ok(records)
}

/// Drop a comma that directly precedes the closing bracket of the array
fn strip_trailing_comma(text: &str) -> Cow<'_, str> {
    let body = text.trim_end();
    let Some(inner) = body.strip_suffix(']') else {
        return Cow::Borrowed(text);
    };
    let inner = inner.trim_end();
    match inner.strip_suffix(',') {
        Some(head) => Cow::Owned(format!("{}\n]", head)),
        None => Cow::Borrowed(text),
    }
}

/// Write records as a JSON array, one record per line.
///
/// The file is written next to `path` and renamed into place, so a failed
/// write never leaves a truncated records file behind.
pub fn write_records(path: &Path, records: &[FlatRecord]) -> Result<(), ApiError> {
    let tmp_path = path.with_extension("json.tmp");
    let write = || -> Result<(), StorageError> {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        writer.write_all(b"[\n")?;
        for (index, record) in records.iter().enumerate() {
            serde_json::to_writer(&mut writer, record)?;
            if index + 1 < records.len() {
                writer.write_all(b",")?;
            }
            writer.write_all(b"\n")?;
        }
        writer.write_all(b"]\n")?;
        writer.flush()?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    };
    write().map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        ApiError::from(e)
    })
}

/// Flatten `input` into the records file `output`
pub fn import(input: &Path, output: &Path, options: FlattenOptions) -> Result<FlattenStats, ApiError> {
    info!(input = %input.display(), "Reading source tree");
    let tree = read_source_tree(input)?;
    let flattened = Flattener::new(options).flatten(&tree)?;
    let stats = flattened.stats;

    info!(output = %output.display(), records = flattened.records.len(), "Writing records");
    write_records(output, &flattened.records)?;

    info!(
        max_name_len = stats.max_name_len,
        max_title_len = stats.max_title_len,
        max_level = stats.max_level,
        "Import complete"
    );
    if stats.placeholder_titles > 0 {
        warn!(count = stats.placeholder_titles, "Placeholder titles substituted");
    }
    Ok(stats)
}

/// Loads validated records into a store
pub struct Seeder<'s, S: RecordStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: RecordStore + ?Sized> Seeder<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Validate then seed. With `force` the current contents are replaced
    /// in one atomic swap.
    ///
    /// Invalid records abort before anything is written.
    pub fn seed_records(&self, records: &[FlatRecord], force: bool) -> Result<SeedOutcome, ApiError> {
        validate_sequence(records)?;

        if force {
            warn!("Replacing record store contents");
            let info = self.store.reseed(records)?;
            info!(records = info.record_count, digest = %info.digest, "Reseed complete");
            return Ok(SeedOutcome::Seeded(info));
        }
        if self.store.is_seeded()? {
            info!("Store already seeded, skipping");
            return Ok(SeedOutcome::AlreadySeeded(self.store.seed_info()?));
        }

        let outcome = self.store.seed(records)?;
        match &outcome {
            SeedOutcome::Seeded(info) => {
                info!(records = info.record_count, digest = %info.digest, "Seed complete")
            }
            SeedOutcome::AlreadySeeded(_) => info!("Another seeder populated the store first"),
        }
        Ok(outcome)
    }

    pub fn seed_file(&self, path: &Path, force: bool) -> Result<SeedOutcome, ApiError> {
        info!(records = %path.display(), "Reading records");
        let records = read_records(path)?;
        self.seed_records(&records, force)
    }
}
