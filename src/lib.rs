//! Flattree: path-indexed flattening of large hierarchies
//!
//! A tree is flattened once into id-ordered records, each carrying its
//! materialized path, depth, parent and descendant count. Subtree and search
//! queries then run as linear scans or contiguous id ranges, and nested trees
//! are rebuilt from a query result in a single pass.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod record;
pub mod seed;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use api::TreeApi;
pub use error::{ApiError, BuildError, QueryError, ReconstructError, StorageError};
pub use query::DepthLimit;
pub use record::FlatRecord;
pub use tree::{SourceNode, TreeNode};
