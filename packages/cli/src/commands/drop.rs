use anyhow::{anyhow, Result};
use blockmail_editor::{apply_intent_with, DragIntent, DragPayload, DropTarget};
use blockmail_model::{Document, ProcessIds};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct DropArgs {
    /// Document file (*.email.json)
    pub document: PathBuf,

    /// Drag payload: JSON object or a bare block id
    #[arg(short, long)]
    pub payload: String,

    /// Canvas insertion index
    #[arg(short, long, conflicts_with = "zone")]
    pub index: Option<usize>,

    /// Drop zone id: "canvas" or "<columnsBlockId>-<columnIndex>"
    #[arg(short, long)]
    pub zone: Option<String>,

    /// Write the result back to the document file
    #[arg(long)]
    pub in_place: bool,
}

pub fn drop_block(args: DropArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.document);
    let doc = Document::from_json(&fs::read_to_string(&path)?)?;
    let payload = DragPayload::parse(&args.payload);

    let target = match (&args.zone, args.index) {
        (Some(zone), _) => Some(
            DropTarget::from_zone(zone, doc.len())
                .ok_or_else(|| anyhow!("Unknown drop zone: {}", zone))?,
        ),
        (None, Some(index)) => Some(DropTarget::canvas(index)),
        (None, None) => None,
    };

    let next = match DragIntent::decode(&payload, target.as_ref()) {
        Some(intent) => {
            debug!(?intent, "Applying drop");
            // rejected drops leave the document as it was
            let next = apply_intent_with(&mut ProcessIds, &doc, &intent);
            if next == doc {
                eprintln!("{}", "⚠️  Drop had no effect, document unchanged".yellow());
            }
            next
        }
        None => {
            eprintln!("{}", "⚠️  Nothing to drop, document unchanged".yellow());
            doc
        }
    };

    let json = next.to_json_pretty()?;
    if args.in_place {
        fs::write(&path, json)?;
        println!("  {} Updated {}", "✓".green(), args.document.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}
