use crate::config::{Config, DOCUMENT_SUFFIX};
use anyhow::{anyhow, Result};
use blockmail_compiler_html::{render_document_with, RenderOptions};
use blockmail_compiler_mjml::render_document_to_mjml_with;
use blockmail_model::Document;
use blockmail_resolver::DeviceMode;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Target format (html, mjml); defaults to the config's emit list
    #[arg(short, long)]
    pub target: Option<String>,

    /// Device mode (desktop, tablet, mobile, auto:<width>, custom:<width>)
    #[arg(short, long, default_value = "desktop")]
    pub device: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Html,
    Mjml,
}

impl Target {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "html" => Ok(Target::Html),
            "mjml" => Ok(Target::Mjml),
            other => Err(anyhow!("Unknown target: {}", other)),
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Target::Html => "html",
            Target::Mjml => "mjml",
        }
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> String {
        match self {
            Target::Html => render_document_with(doc, options),
            Target::Mjml => render_document_to_mjml_with(doc, options),
        }
    }
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let root = PathBuf::from(cwd).join(&args.path);
    let root_str = root.display().to_string();
    let config = Config::load(&root_str)?;
    let src_dir = config.get_src_dir(&root_str);

    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    let mode: DeviceMode = args.device.parse()?;
    let options = config.render_options(mode);
    let targets = match &args.target {
        Some(target) => vec![Target::parse(target)?],
        None => config
            .emit
            .iter()
            .map(String::as_str)
            .map(Target::parse)
            .collect::<Result<Vec<_>>>()?,
    };
    let out_dir = match &args.out_dir {
        Some(out) => root.join(out),
        None => config.get_out_dir(&root_str),
    };

    println!("{}", "🔨 Exporting email documents...".bright_blue().bold());

    let files = find_document_files(&src_dir);

    if files.is_empty() {
        println!("{}", "⚠️  No .email.json files found".yellow());
        return Ok(());
    }

    println!("Found {} files", files.len());

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&src_dir).unwrap_or(file);
        match export_file(file, relative_path, &targets, &options, &out_dir, args.stdout) {
            Ok(outputs) => {
                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    outputs.join(", ")
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    info!(success_count, error_count, device = %args.device, "Export finished");

    println!();
    if error_count == 0 {
        println!("{} Exported {} files successfully", "✅".green(), success_count);
    } else {
        println!(
            "{} Exported {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn find_document_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(DOCUMENT_SUFFIX))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// `welcome.email.json` → `welcome.html`
fn output_path(out_dir: &Path, relative_path: &Path, target: Target) -> PathBuf {
    let file_name = relative_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(DOCUMENT_SUFFIX).unwrap_or(&file_name);
    out_dir
        .join(relative_path)
        .with_file_name(format!("{}.{}", stem, target.extension()))
}

fn export_file(
    file_path: &Path,
    relative_path: &Path,
    targets: &[Target],
    options: &RenderOptions,
    out_dir: &Path,
    stdout: bool,
) -> Result<Vec<String>> {
    let doc = Document::from_json(&fs::read_to_string(file_path)?)?;
    doc.validate()?;

    let mut outputs = Vec::new();
    for target in targets {
        let output = target.render(&doc, options);

        if stdout {
            println!("{}", output);
            outputs.push("stdout".to_string());
            continue;
        }

        let output_file = output_path(out_dir, relative_path, *target);
        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_file, output)?;
        outputs.push(output_file.display().to_string());
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, InitArgs};

    fn init_project(dir: &Path) {
        init(
            InitArgs {
                target: "all".to_string(),
                src_dir: "emails".to_string(),
                force: false,
            },
            dir.to_str().unwrap(),
        )
        .unwrap();
    }

    fn export_args() -> ExportArgs {
        ExportArgs {
            path: ".".to_string(),
            target: None,
            device: "desktop".to_string(),
            stdout: false,
            out_dir: None,
        }
    }

    #[test]
    fn test_export_writes_every_configured_target() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path());

        export(export_args(), dir.path().to_str().unwrap()).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/welcome.html")).unwrap();
        assert!(html.starts_with("<div style=\"max-width:600px;"));
        assert!(html.contains("Welcome aboard"));

        let mjml = fs::read_to_string(dir.path().join("dist/welcome.mjml")).unwrap();
        assert!(mjml.starts_with("<mjml>"));
    }

    #[test]
    fn test_export_target_and_out_dir_override_config() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path());

        let args = ExportArgs {
            target: Some("mjml".to_string()),
            out_dir: Some("build".to_string()),
            ..export_args()
        };
        export(args, dir.path().to_str().unwrap()).unwrap();

        assert!(dir.path().join("build/welcome.mjml").exists());
        assert!(!dir.path().join("build/welcome.html").exists());
    }

    #[test]
    fn test_export_rejects_unknown_device() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path());

        let args = ExportArgs {
            device: "watch".to_string(),
            ..export_args()
        };
        assert!(export(args, dir.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_output_path_keeps_subdirectories() {
        let path = output_path(
            Path::new("/out"),
            Path::new("campaigns/spring.email.json"),
            Target::Html,
        );
        assert_eq!(path, PathBuf::from("/out/campaigns/spring.html"));
    }
}
