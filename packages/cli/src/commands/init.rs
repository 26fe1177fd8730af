use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use blockmail_model::{
    create_block, create_columns_block, create_leaf_block, BlockContent, Document, LeafContent,
};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Output formats (html, mjml, all)
    #[arg(short, long, default_value = "html")]
    pub target: String,

    /// Source directory
    #[arg(short, long, default_value = "emails")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Blockmail project...".bright_blue().bold());

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("welcome.email.json");
    if !example_file.exists() {
        fs::write(&example_file, welcome_document()?.to_json_pretty()?)?;
        println!("  {} Created welcome.email.json", "✓".green());
    }

    let emit = match args.target.as_str() {
        "all" => vec!["html".to_string(), "mjml".to_string()],
        target => vec![target.to_string()],
    };

    let config = Config {
        src_dir: args.src_dir.clone(),
        emit,
        ..Config::default()
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/welcome.email.json", args.src_dir);
    println!("  2. Run: blockmail export");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// Heading, hero image, two-column feature row and a call to action
fn welcome_document() -> Result<Document> {
    let mut heading = create_block("text", None)?;
    if let BlockContent::Leaf(LeafContent::Text(text)) = &mut heading.content {
        text.html = "<h1>Welcome aboard</h1><p>Thanks for signing up.</p>".to_string();
    }

    let mut features = create_columns_block("50-50");
    if let Some(columns) = features.as_columns_mut() {
        for column in &mut columns.columns {
            column.blocks.push(create_leaf_block("text", None)?);
        }
    }

    Ok(Document::from_blocks(vec![
        heading,
        create_block("image", None)?,
        features,
        create_block("button", None)?,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> InitArgs {
        InitArgs {
            target: "all".to_string(),
            src_dir: "emails".to_string(),
            force: false,
        }
    }

    #[test]
    fn test_init_writes_config_and_sample() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(args(), cwd).unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.emit, vec!["html", "mjml"]);

        let sample = fs::read_to_string(dir.path().join("emails/welcome.email.json")).unwrap();
        let doc = Document::from_json(&sample).unwrap();
        assert_eq!(doc.len(), 4);
        doc.validate().unwrap();
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "srcDir": "mine" }"#).unwrap();

        init(args(), cwd).unwrap();

        assert_eq!(Config::load(cwd).unwrap().src_dir, "mine");
        assert!(!dir.path().join("emails").exists());
    }
}
