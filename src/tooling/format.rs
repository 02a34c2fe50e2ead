//! Format query results, import diagnostics and store status as text or JSON.

use crate::error::{ApiError, StorageError};
use crate::record::FlatRecord;
use crate::store::SeedInfo;
use crate::tree::{FlattenStats, TreeNode};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::from(StorageError::from(e)))
}

/// Records as a table, one row per record in id order.
pub fn format_records_text(heading: &str, records: &[FlatRecord]) -> String {
    let mut out = format!("{}\n\n", format_section_heading(heading));
    if records.is_empty() {
        out.push_str("  No matching records.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Level", "Size", "Name"]);
    for record in records {
        table.add_row(vec![
            record.id.to_string(),
            record.level.to_string(),
            record.size.to_string(),
            record.name.clone(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out.push_str(&format!("\n  {} record(s)\n", records.len()));
    out
}

pub fn format_records_json(records: &[FlatRecord]) -> Result<String, ApiError> {
    to_json(records)
}

pub fn format_tree_json(tree: &TreeNode) -> Result<String, ApiError> {
    to_json(tree)
}

pub fn format_import_text(output: &Path, stats: &FlattenStats) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Import"));
    out.push_str(&format!("  Records file: {}\n", output.display()));
    out.push_str(&format!("  Records: {}\n", stats.node_count));
    out.push_str(&format!("  Deepest level: {}\n", stats.max_level));
    out.push_str(&format!("  Longest name: {} chars\n", stats.max_name_len));
    out.push_str(&format!("  Longest title: {} chars\n", stats.max_title_len));
    if stats.placeholder_titles > 0 {
        out.push_str(&format!(
            "  Placeholder titles: {}\n",
            stats.placeholder_titles.yellow()
        ));
    }
    out
}

/// Store status as reported by `status`
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub store_path: String,
    pub seeded: bool,
    pub record_count: usize,
    pub seed: Option<SeedInfo>,
}

pub fn format_status_text(status: &StoreStatus) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Record Store"));
    out.push_str(&format!("  Store path: {}\n", status.store_path));
    if !status.seeded {
        out.push_str("  Seeded: no\n\n");
        out.push_str("Run `flattree seed --records <file>` to load records.\n");
        return out;
    }
    out.push_str(&format!("  Seeded: {}\n", "yes".green()));
    out.push_str(&format!("  Records: {}\n", status.record_count));
    match &status.seed {
        Some(info) => {
            out.push_str(&format!("  Digest: {}...\n", &info.digest[..info.digest.len().min(12)]));
            out.push_str(&format!("  Seeded at: {}\n", info.seeded_at.to_rfc3339()));
        }
        None => out.push_str("  Seed marker: missing\n"),
    }
    out
}

pub fn format_status_json(status: &StoreStatus) -> Result<String, ApiError> {
    to_json(status)
}
