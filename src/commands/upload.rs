//! File upload CLI command.

use std::path::PathBuf;

use bytes::Bytes;
use clap::Args;

use medialib_core::error::AppError;
use medialib_entity::asset::ParentRef;
use medialib_service::RequestContext;

use super::parse_parent;
use crate::bootstrap::App;
use crate::output::{self, OutputFormat};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Target folder ID or `root`
    #[arg(short, long, conflicts_with = "path")]
    pub parent: Option<String>,

    /// Target folder path, created if missing (default: library.default_upload_folder)
    #[arg(long)]
    pub path: Option<String>,

    /// Override file name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Override the content type guessed from the extension
    #[arg(long)]
    pub content_type: Option<String>,

    /// Attribution for the image
    #[arg(long)]
    pub credit: Option<String>,
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    if !args.file.is_file() {
        return Err(AppError::not_found(format!(
            "File not found: {}",
            args.file.display()
        )));
    }

    let file_name = args.name.clone().unwrap_or_else(|| {
        args.file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string()
    });
    let content_type = args
        .content_type
        .clone()
        .or_else(|| content_type_from_name(&file_name).map(str::to_string));

    let parent: ParentRef = match (&args.parent, &args.path) {
        (Some(parent), _) => parse_parent(parent)?,
        (None, Some(path)) => app.store.resolve_folder_by_path(ctx, path).await?,
        (None, None) => {
            app.store
                .resolve_folder_by_path(ctx, &app.config.library.default_upload_folder)
                .await?
        }
    };

    let content = tokio::fs::read(&args.file).await?;
    println!("Uploading '{}' ({} bytes) to {}...", file_name, content.len(), parent);

    let file = app
        .store
        .upload_file(
            ctx,
            Bytes::from(content),
            parent,
            &file_name,
            content_type.as_deref(),
            args.credit.as_deref(),
        )
        .await?;

    match format {
        OutputFormat::Table => {
            output::print_success(&format!("Uploaded '{}'", file.name));
            output::print_kv("ID", &file.id.to_string());
            output::print_kv("URL", file.url.as_deref().unwrap_or_default());
        }
        OutputFormat::Json => output::print_item(&file, format),
    }
    Ok(())
}

/// Guess an image MIME type from a file name extension.
fn content_type_from_name(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}
