//! Article block editing CLI commands.

use clap::{Args, Subcommand, ValueEnum};
use dialoguer::Confirm;
use serde::Serialize;
use tabled::Tabled;

use medialib_core::error::AppError;
use medialib_core::types::BlockId;
use medialib_entity::article::{BlockBody, ContentBlock};
use medialib_service::RequestContext;

use crate::bootstrap::App;
use crate::output::{self, OutputFormat};

/// Arguments for article commands
#[derive(Debug, Args)]
pub struct ArticleArgs {
    /// Article subcommand
    #[command(subcommand)]
    pub command: ArticleCommand,
}

/// Direction for moving a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Towards the start
    Up,
    /// Towards the end
    Down,
}

/// Article subcommands
#[derive(Debug, Subcommand)]
pub enum ArticleCommand {
    /// Show the blocks of an article with image credits
    Show {
        /// Article slug
        article: String,
    },
    /// Append a block given as JSON, e.g. '{"type":"paragraph","text":"..."}'
    Append {
        /// Article slug
        article: String,
        /// Block JSON
        block: String,
    },
    /// Replace a block's content, keeping its position
    Update {
        /// Article slug
        article: String,
        /// Block ID
        block_id: String,
        /// Block JSON
        block: String,
    },
    /// Delete a block
    Delete {
        /// Article slug
        article: String,
        /// Block ID
        block_id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Move a block one position
    Move {
        /// Article slug
        article: String,
        /// Block ID
        block_id: String,
        /// Direction
        #[arg(value_enum)]
        direction: Direction,
    },
}

/// Block display row
#[derive(Debug, Serialize, Tabled)]
struct BlockRow {
    /// Position
    position: usize,
    /// Block ID
    id: String,
    /// Block type
    kind: String,
    /// Summary
    summary: String,
}

impl BlockRow {
    fn new(position: usize, block: &ContentBlock) -> Self {
        let summary = match &block.body {
            BlockBody::Paragraph { text } | BlockBody::Quote { text, .. } => text.clone(),
            BlockBody::Heading { text, level } => format!("h{level} {text}"),
            BlockBody::Image { url, .. } => url.clone(),
            BlockBody::TwoColumn { left, .. } => left.clone(),
            BlockBody::CardGrid { cards } => format!("{} cards", cards.len()),
        };
        Self {
            position,
            id: block.id.to_string(),
            kind: block.body.type_name().to_string(),
            summary: summary.chars().take(60).collect(),
        }
    }
}

/// Execute article commands
pub async fn execute(
    args: &ArticleArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let editor = &app.editor;
    match &args.command {
        ArticleCommand::Show { article } => {
            let draft = editor.load(ctx, article).await?;
            let credits = editor.image_blocks_credits(draft.article()).await?;
            match format {
                OutputFormat::Table => {
                    let rows: Vec<BlockRow> = draft
                        .blocks()
                        .iter()
                        .enumerate()
                        .map(|(i, b)| BlockRow::new(i + 1, b))
                        .collect();
                    output::print_list(&rows, format);
                    for credit in &credits {
                        output::print_kv(&credit.url, credit.credit.as_deref().unwrap_or("(no credit)"));
                    }
                }
                OutputFormat::Json => output::print_item(
                    &serde_json::json!({ "article": draft.article(), "credits": credits }),
                    format,
                ),
            }
        }
        ArticleCommand::Append { article, block } => {
            let mut draft = editor.load(ctx, article).await?;
            let id = draft.append(parse_block(block)?);
            editor.save(ctx, &mut draft).await?;
            output::print_success(&format!("Block {id} appended"));
        }
        ArticleCommand::Update {
            article,
            block_id,
            block,
        } => {
            let mut draft = editor.load(ctx, article).await?;
            draft.update(parse_block_id(block_id)?, parse_block(block)?)?;
            editor.save(ctx, &mut draft).await?;
            output::print_success("Block updated");
        }
        ArticleCommand::Delete {
            article,
            block_id,
            yes,
        } => {
            let mut draft = editor.load(ctx, article).await?;
            let confirmed = *yes
                || Confirm::new()
                    .with_prompt(format!("Delete block {block_id}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
            let removed = draft.delete(parse_block_id(block_id)?, confirmed)?;
            editor.save(ctx, &mut draft).await?;
            output::print_success(&format!("{} block deleted", removed.body.type_name()));
        }
        ArticleCommand::Move {
            article,
            block_id,
            direction,
        } => {
            let mut draft = editor.load(ctx, article).await?;
            let id = parse_block_id(block_id)?;
            let moved = match direction {
                Direction::Up => draft.move_up(id)?,
                Direction::Down => draft.move_down(id)?,
            };
            if moved {
                editor.save(ctx, &mut draft).await?;
                output::print_success("Block moved");
            } else {
                output::print_warning("Block is already at the edge");
            }
        }
    }
    Ok(())
}

fn parse_block(json: &str) -> Result<BlockBody, AppError> {
    serde_json::from_str(json)
        .map_err(|e| AppError::validation(format!("Invalid block JSON: {e}")))
}

fn parse_block_id(input: &str) -> Result<BlockId, AppError> {
    input
        .trim()
        .parse()
        .map_err(|e| AppError::validation(format!("Invalid block id '{input}': {e}")))
}
