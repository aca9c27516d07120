//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use medialib_core::types::AssetId;

/// A folder node in a library tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetNode {
    /// Folder ID (`None` for the synthetic top-level node).
    pub id: Option<AssetId>,
    /// Folder name.
    pub name: String,
    /// Number of active child folders.
    pub child_count: u64,
    /// Number of active files directly inside.
    pub file_count: u64,
    /// Child folder nodes.
    pub children: Vec<AssetNode>,
}

impl AssetNode {
    /// Total folders in this subtree, excluding the node itself.
    pub fn total_folders(&self) -> u64 {
        self.children
            .iter()
            .map(|child| 1 + child.total_folders())
            .sum()
    }

    /// Total files in this subtree, including the node itself.
    pub fn total_files(&self) -> u64 {
        self.file_count
            + self
                .children
                .iter()
                .map(AssetNode::total_files)
                .sum::<u64>()
    }
}
