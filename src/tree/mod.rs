//! Tree codec
//!
//! Source trees go in through [`flatten`], nested trees come back out through
//! [`reconstruct`]. Both directions share the path rules in [`path`].

pub mod flatten;
pub mod node;
pub mod path;
pub mod reconstruct;
pub mod source;

pub use flatten::{flatten, FlattenOptions, FlattenStats, Flattened, Flattener};
pub use node::TreeNode;
pub use path::SEPARATOR;
pub use reconstruct::{reconstruct, reconstruct_forest, reconstruct_from, RecordCursor};
pub use source::SourceNode;
