use blockmail_compiler_html::{RenderOptions, DEFAULT_MAX_WIDTH};
use blockmail_resolver::{BrandStyles, DeviceMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "blockmail.config.json";

/// Email document files end with this suffix
pub const DOCUMENT_SUFFIX: &str = ".email.json";

/// Blockmail configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing *.email.json documents
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Output formats to emit ("html", "mjml")
    #[serde(default = "default_emit")]
    pub emit: Vec<String>,

    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Brand CSS variables, e.g. `"--brand-primary-color": "#ff5500"`
    #[serde(default)]
    pub brand: BTreeMap<String, String>,
}

fn default_src_dir() -> String {
    "emails".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_emit() -> Vec<String> {
    vec!["html".to_string()]
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn render_options(&self, mode: DeviceMode) -> RenderOptions {
        let brand = BrandStyles::from_variables(self.brand.clone());
        RenderOptions::for_device(brand, mode).with_max_width(self.max_width)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            emit: default_emit(),
            max_width: default_max_width(),
            brand: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "srcDir": "campaigns",
            "outDir": "build",
            "emit": ["html", "mjml"],
            "maxWidth": 640,
            "brand": { "--brand-primary-color": "#ff5500" }
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "campaigns");
        assert_eq!(config.out_dir, "build");
        assert_eq!(config.emit, vec!["html", "mjml"]);
        assert_eq!(config.max_width, 640);
        assert_eq!(config.brand["--brand-primary-color"], "#ff5500");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{ "maxWidth": 700 }"#).unwrap();
        assert_eq!(config.src_dir, "emails");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.emit, vec!["html"]);
        assert_eq!(config.max_width, 700);
    }

    #[test]
    fn test_render_options_carry_brand_and_width() {
        let mut config = Config::default();
        config.max_width = 480;
        config
            .brand
            .insert("--brand-font-family".to_string(), "Georgia".to_string());

        let options = config.render_options(DeviceMode::Mobile);
        assert_eq!(options.max_width, 480);
        assert_eq!(options.resolver.brand().font_family(), "Georgia");
    }
}
