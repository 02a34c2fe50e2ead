//! Core types for the flattened tree codec.

/// RecordId: preorder position of a node in the full flattened sequence
pub type RecordId = u64;

/// Level: depth from the root (root is level 0)
pub type Level = u32;

/// Digest: blake3 hash of a canonical records file
pub type Digest = [u8; 32];
