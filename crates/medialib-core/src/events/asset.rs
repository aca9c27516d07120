//! Asset and article domain events.

use serde::{Deserialize, Serialize};

use crate::types::AssetId;

/// Events related to virtual asset operations.
///
/// Parent references use `None` for the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AssetEvent {
    /// A folder was created.
    FolderCreated {
        /// The new folder.
        asset_id: AssetId,
        /// Its parent.
        parent_id: Option<AssetId>,
        /// The folder name.
        name: String,
    },
    /// A file was uploaded.
    FileUploaded {
        /// The new file.
        asset_id: AssetId,
        /// Its parent.
        parent_id: Option<AssetId>,
        /// The blob URL.
        url: String,
    },
    /// An asset was renamed.
    Renamed {
        /// The asset.
        asset_id: AssetId,
        /// Its parent (unchanged).
        parent_id: Option<AssetId>,
        /// The new name.
        name: String,
    },
    /// An asset was reparented.
    Moved {
        /// The asset.
        asset_id: AssetId,
        /// The previous parent.
        from_parent_id: Option<AssetId>,
        /// The new parent.
        to_parent_id: Option<AssetId>,
    },
    /// An asset was moved to the trash.
    Trashed {
        /// The asset.
        asset_id: AssetId,
        /// Its parent.
        parent_id: Option<AssetId>,
    },
    /// An asset was restored from the trash.
    Restored {
        /// The asset.
        asset_id: AssetId,
        /// The parent it returned to.
        parent_id: Option<AssetId>,
    },
    /// An asset was permanently removed.
    Purged {
        /// The asset.
        asset_id: AssetId,
        /// Its former parent.
        parent_id: Option<AssetId>,
    },
    /// The global credit for a URL changed.
    CreditUpdated {
        /// The URL whose attribution changed.
        url: String,
    },
}

impl AssetEvent {
    /// The asset this event is about, if it concerns a single asset.
    pub fn asset_id(&self) -> Option<AssetId> {
        match self {
            Self::FolderCreated { asset_id, .. }
            | Self::FileUploaded { asset_id, .. }
            | Self::Renamed { asset_id, .. }
            | Self::Moved { asset_id, .. }
            | Self::Trashed { asset_id, .. }
            | Self::Restored { asset_id, .. }
            | Self::Purged { asset_id, .. } => Some(*asset_id),
            Self::CreditUpdated { .. } => None,
        }
    }

    /// Whether this event changes the listing of `folder` (`None` = top level).
    pub fn touches_folder(&self, folder: Option<AssetId>) -> bool {
        match self {
            Self::FolderCreated { parent_id, .. }
            | Self::FileUploaded { parent_id, .. }
            | Self::Renamed { parent_id, .. }
            | Self::Trashed { parent_id, .. }
            | Self::Restored { parent_id, .. }
            | Self::Purged { parent_id, .. } => *parent_id == folder,
            Self::Moved {
                from_parent_id,
                to_parent_id,
                ..
            } => *from_parent_id == folder || *to_parent_id == folder,
            Self::CreditUpdated { .. } => false,
        }
    }
}

/// Events related to the content block editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArticleEvent {
    /// An article's block sequence was saved.
    Saved {
        /// The article slug.
        article_id: String,
        /// Number of blocks written.
        block_count: usize,
    },
}
