use anyhow::Result;
use blockmail_model::{create_block, create_columns_block_with, ProcessIds};
use clap::Args;

#[derive(Debug, Args)]
pub struct BlockArgs {
    /// Block type (text, image, button, columns, ...)
    pub block_type: String,

    /// Column ratio for `columns` blocks
    #[arg(short, long, default_value = "50-50")]
    pub ratio: String,

    /// Section the block belongs to
    #[arg(short, long)]
    pub section: Option<String>,
}

/// Print a freshly constructed block as JSON
pub fn block(args: BlockArgs) -> Result<()> {
    let block = if args.block_type == "columns" {
        create_columns_block_with(&mut ProcessIds, &args.ratio, args.section.as_deref())
    } else {
        create_block(&args.block_type, args.section.as_deref())?
    };

    println!("{}", serde_json::to_string_pretty(&block)?);
    Ok(())
}
