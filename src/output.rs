//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use medialib_entity::asset::{AssetNode, VirtualAsset};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One asset as shown in listings
#[derive(Debug, Serialize, Tabled)]
pub struct AssetRow {
    /// Asset ID
    pub id: String,
    /// Folder or file
    pub kind: String,
    /// Name
    pub name: String,
    /// Parent folder
    pub parent: String,
    /// Blob URL
    pub url: String,
    /// Created at
    pub created_at: String,
    /// Trashed at
    pub deleted_at: String,
}

impl From<&VirtualAsset> for AssetRow {
    fn from(asset: &VirtualAsset) -> Self {
        Self {
            id: asset.id.to_string(),
            kind: asset.kind.to_string(),
            name: asset.name.clone(),
            parent: asset.parent().to_string(),
            url: asset.url.clone().unwrap_or_default(),
            created_at: asset.created_at.format("%Y-%m-%d %H:%M").to_string(),
            deleted_at: asset
                .deleted_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Print assets in the selected format
pub fn print_assets(assets: &[VirtualAsset], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let rows: Vec<AssetRow> = assets.iter().map(AssetRow::from).collect();
            print_list(&rows, format);
        }
        OutputFormat::Json => print_json(assets),
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => print_json(item),
    }
}

/// Print a folder tree, indented in table mode
pub fn print_tree(node: &AssetNode, format: OutputFormat) {
    match format {
        OutputFormat::Table => print_node(node, 0),
        OutputFormat::Json => print_json(node),
    }
}

fn print_node(node: &AssetNode, depth: usize) {
    let id = node.id.map(|id| id.to_string()).unwrap_or_default();
    println!(
        "{:indent$}{}/  ({} files)  {}",
        "",
        node.name,
        node.file_count,
        id,
        indent = depth * 2
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
