//! Virtual asset entity model.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use medialib_core::types::AssetId;

use super::kind::AssetKind;
use super::parent::ParentRef;

/// A folder or file node in the media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VirtualAsset {
    /// Unique asset identifier.
    pub id: AssetId,
    /// Display name. Not unique.
    pub name: String,
    /// Folder or file.
    pub kind: AssetKind,
    /// Containing folder (`None` for the top level).
    pub parent_id: Option<AssetId>,
    /// Blob URL (files only).
    pub url: Option<String>,
    /// Legacy per-row attribution (files only).
    pub credit: Option<String>,
    /// When the asset was created.
    pub created_at: DateTime<Utc>,
    /// When the asset metadata was last written.
    pub updated_at: DateTime<Utc>,
    /// When the asset was moved to the trash.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl VirtualAsset {
    /// Where this asset lives.
    pub fn parent(&self) -> ParentRef {
        self.parent_id.into()
    }

    /// Check if this asset is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == AssetKind::Folder
    }

    /// Check if this asset is a file.
    pub fn is_file(&self) -> bool {
        self.kind == AssetKind::File
    }

    /// Check if this asset is in the trash.
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if this asset is live (not trashed).
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Order used by folder listings and search: folders before files, newest
/// first within each group, ties broken by id.
pub fn listing_order(a: &VirtualAsset, b: &VirtualAsset) -> Ordering {
    let rank = |asset: &VirtualAsset| match asset.kind {
        AssetKind::Folder => 0,
        AssetKind::File => 1,
    };
    rank(a)
        .cmp(&rank(b))
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort a listing in place with [`listing_order`].
pub fn sort_for_listing(items: &mut [VirtualAsset]) {
    items.sort_by(listing_order);
}

/// Data required to create a new asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAsset {
    /// Display name.
    pub name: String,
    /// Folder or file.
    pub kind: AssetKind,
    /// Containing folder (`None` for the top level).
    pub parent_id: Option<AssetId>,
    /// Blob URL (files only).
    pub url: Option<String>,
    /// Legacy attribution (files only).
    pub credit: Option<String>,
}

impl CreateAsset {
    /// Data for a new folder.
    pub fn folder(name: impl Into<String>, parent: ParentRef) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::Folder,
            parent_id: parent.folder_id(),
            url: None,
            credit: None,
        }
    }

    /// Data for a new file referencing an uploaded blob.
    pub fn file(
        name: impl Into<String>,
        parent: ParentRef,
        url: impl Into<String>,
        credit: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::File,
            parent_id: parent.folder_id(),
            url: Some(url.into()),
            credit,
        }
    }

    /// Materialize the record as a repository would store it.
    pub fn into_asset(self, id: AssetId, now: DateTime<Utc>) -> VirtualAsset {
        VirtualAsset {
            id,
            name: self.name,
            kind: self.kind,
            parent_id: self.parent_id,
            url: self.url,
            credit: self.credit,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Partial field merge applied by repository updates.
///
/// `None` leaves a field untouched; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetPatch {
    /// New display name.
    pub name: Option<String>,
    /// New parent.
    pub parent_id: Option<Option<AssetId>>,
    /// New legacy credit.
    pub credit: Option<Option<String>>,
    /// New trash marker.
    pub deleted_at: Option<Option<DateTime<Utc>>>,
}

impl AssetPatch {
    /// Patch that renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that reparents.
    pub fn reparent(parent: ParentRef) -> Self {
        Self {
            parent_id: Some(parent.folder_id()),
            ..Self::default()
        }
    }

    /// Patch that sets the trash marker.
    pub fn trash(at: DateTime<Utc>) -> Self {
        Self {
            deleted_at: Some(Some(at)),
            ..Self::default()
        }
    }

    /// Patch that clears the trash marker, optionally moving the asset.
    pub fn restore(parent: Option<ParentRef>) -> Self {
        Self {
            deleted_at: Some(None),
            parent_id: parent.map(|p| p.folder_id()),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.parent_id.is_none()
            && self.credit.is_none()
            && self.deleted_at.is_none()
    }

    /// Apply the patch to an in-memory record.
    pub fn apply(&self, asset: &mut VirtualAsset, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            asset.name = name.clone();
        }
        if let Some(parent_id) = self.parent_id {
            asset.parent_id = parent_id;
        }
        if let Some(credit) = &self.credit {
            asset.credit = credit.clone();
        }
        if let Some(deleted_at) = self.deleted_at {
            asset.deleted_at = deleted_at;
        }
        asset.updated_at = now;
    }
}
