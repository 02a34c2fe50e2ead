//! CLI Tooling
//!
//! Command-line interface for importing, seeding and querying a flattened
//! tree. Every command returns its rendered output; the binary prints it.

use crate::api::TreeApi;
use crate::config::{ConfigLoader, FlattreeConfig};
use crate::error::{ApiError, StorageError};
use crate::record::validate_sequence;
use crate::seed::{self, Seeder};
use crate::store::{RecordStore, SeedOutcome, SledRecordStore};
use crate::tooling::format::{
    format_import_text, format_records_json, format_records_text, format_section_heading,
    format_status_json, format_status_text, format_tree_json, StoreStatus,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Flattree CLI - flatten, store and query large hierarchies
#[derive(Parser)]
#[command(name = "flattree")]
#[command(about = "Flatten large hierarchies into path-indexed records and query them back")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Record store directory (overrides storage.store_path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flatten a nested JSON tree into a records file
    Import {
        /// Source tree (JSON, nodes with `title` and `children`)
        #[arg(long)]
        input: PathBuf,
        /// Records file to write
        #[arg(long)]
        output: PathBuf,
    },
    /// Validate a records file and load it into the store
    Seed {
        /// Records file produced by `import`
        #[arg(long)]
        records: PathBuf,
        /// Clear the store and reseed even if it is populated
        #[arg(long)]
        force: bool,
    },
    /// Check a records file without touching the store
    Validate {
        #[arg(long)]
        records: PathBuf,
    },
    /// List records below a path within a depth window
    Flat {
        /// Materialized path of the anchor (default: root)
        #[arg(long)]
        path: Option<String>,
        /// Levels below the anchor (default: query.default_flat_depth)
        #[arg(long, allow_hyphen_values = true)]
        max_depth: Option<i64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the subtree at a path as nested JSON
    Tree {
        #[arg(long)]
        path: Option<String>,
        /// Levels below the anchor (default: unbounded)
        #[arg(long, allow_hyphen_values = true)]
        max_depth: Option<i64>,
    },
    /// Case-insensitive title search at or below a path
    Search {
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        path: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show store status (seeded, record count, digest)
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// Load configuration and fold the logging flags into it.
    pub fn load_config(&self) -> Result<FlattreeConfig, ApiError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_with_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }
}

/// CLI context holding the loaded configuration and resolved store path
pub struct CliContext {
    config: FlattreeConfig,
    store_path: PathBuf,
}

impl CliContext {
    pub fn new(config: FlattreeConfig, store_override: Option<PathBuf>) -> Result<Self, ApiError> {
        let store_path = config.storage.resolve_store_path(store_override)?;
        Ok(Self { config, store_path })
    }

    pub fn config(&self) -> &FlattreeConfig {
        &self.config
    }

    fn open_store(&self) -> Result<SledRecordStore, ApiError> {
        std::fs::create_dir_all(&self.store_path).map_err(StorageError::from)?;
        Ok(SledRecordStore::new(&self.store_path)?)
    }

    fn api(&self) -> Result<TreeApi<SledRecordStore>, ApiError> {
        Ok(TreeApi::with_config(self.open_store()?, &self.config.query))
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Import { input, output } => self.handle_import(input, output),
            Commands::Seed { records, force } => self.handle_seed(records, *force),
            Commands::Validate { records } => self.handle_validate(records),
            Commands::Flat {
                path,
                max_depth,
                format,
            } => self.handle_flat(path.as_deref(), *max_depth, format),
            Commands::Tree { path, max_depth } => self.handle_tree(path.as_deref(), *max_depth),
            Commands::Search { term, path, format } => {
                self.handle_search(path.as_deref(), term.as_deref(), format)
            }
            Commands::Status { format } => self.handle_status(format),
            Commands::Config => self.handle_config(),
        }
    }

    fn handle_import(&self, input: &Path, output: &Path) -> Result<String, ApiError> {
        let stats = seed::import(input, output, self.config.build.flatten_options())?;
        Ok(format_import_text(output, &stats))
    }

    fn handle_seed(&self, records: &Path, force: bool) -> Result<String, ApiError> {
        let store = self.open_store()?;
        let outcome = Seeder::new(&store).seed_file(records, force)?;
        Ok(match outcome {
            SeedOutcome::Seeded(info) => format!(
                "Seeded {} records into {} (digest {})",
                info.record_count,
                self.store_path.display(),
                info.digest
            ),
            SeedOutcome::AlreadySeeded(_) => format!(
                "Store {} is already seeded; nothing written (use --force to reseed)",
                self.store_path.display()
            ),
        })
    }

    fn handle_validate(&self, records: &Path) -> Result<String, ApiError> {
        let records = seed::read_records(records)?;
        validate_sequence(&records)?;
        info!(records = records.len(), "Records file is valid");
        Ok(format!("Valid: {} records", records.len()))
    }

    fn handle_flat(
        &self,
        path: Option<&str>,
        max_depth: Option<i64>,
        format: &str,
    ) -> Result<String, ApiError> {
        let records = self.api()?.get_subtree_flat(path, max_depth)?;
        match format {
            "json" => format_records_json(&records),
            "text" | _ => Ok(format_records_text(path.unwrap_or("Root level"), &records)),
        }
    }

    fn handle_tree(&self, path: Option<&str>, max_depth: Option<i64>) -> Result<String, ApiError> {
        let tree = self.api()?.get_subtree_tree(path, max_depth)?;
        format_tree_json(&tree)
    }

    fn handle_search(
        &self,
        path: Option<&str>,
        term: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        let records = self.api()?.search(path, term)?;
        match format {
            "json" => format_records_json(&records),
            "text" | _ => Ok(format_records_text(
                &format!("Search: {}", term.unwrap_or_default()),
                &records,
            )),
        }
    }

    fn handle_status(&self, format: &str) -> Result<String, ApiError> {
        let store = self.open_store()?;
        let status = StoreStatus {
            store_path: self.store_path.display().to_string(),
            seeded: store.is_seeded()?,
            record_count: store.len()?,
            seed: store.seed_info()?,
        };
        match format {
            "json" => format_status_json(&status),
            "text" | _ => Ok(format_status_text(&status)),
        }
    }

    fn handle_config(&self) -> Result<String, ApiError> {
        let rendered = toml::to_string_pretty(&self.config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))?;
        Ok(format!(
            "{}\n\n{}",
            format_section_heading("Effective configuration"),
            rendered
        ))
    }
}
