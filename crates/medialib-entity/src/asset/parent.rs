//! Parent reference with the `root` sentinel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use medialib_core::AppError;
use medialib_core::types::AssetId;

/// Sentinel spelling of the top level.
pub const ROOT: &str = "root";

/// Where an asset lives: the top level or inside a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ParentRef {
    /// The top level of the library.
    #[default]
    Root,
    /// Inside the given folder.
    Folder(AssetId),
}

impl ParentRef {
    /// The folder id, or `None` for the top level.
    pub fn folder_id(&self) -> Option<AssetId> {
        match self {
            Self::Root => None,
            Self::Folder(id) => Some(*id),
        }
    }

    /// Whether this is the top level.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl From<Option<AssetId>> for ParentRef {
    fn from(value: Option<AssetId>) -> Self {
        value.map_or(Self::Root, Self::Folder)
    }
}

impl From<AssetId> for ParentRef {
    fn from(value: AssetId) -> Self {
        Self::Folder(value)
    }
}

impl From<ParentRef> for Option<AssetId> {
    fn from(value: ParentRef) -> Self {
        value.folder_id()
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "{ROOT}"),
            Self::Folder(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for ParentRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ROOT) {
            return Ok(Self::Root);
        }
        trimmed
            .parse::<AssetId>()
            .map(Self::Folder)
            .map_err(|e| AppError::validation(format!("Invalid folder id '{s}': {e}")))
    }
}

impl From<ParentRef> for String {
    fn from(value: ParentRef) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ParentRef {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_sentinel() {
        assert_eq!("root".parse::<ParentRef>().unwrap(), ParentRef::Root);
        assert_eq!("".parse::<ParentRef>().unwrap(), ParentRef::Root);
        assert!("nope".parse::<ParentRef>().is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = AssetId::new();
        let json = serde_json::to_string(&ParentRef::Folder(id)).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: ParentRef = serde_json::from_str("\"root\"").unwrap();
        assert!(back.is_root());
    }
}
