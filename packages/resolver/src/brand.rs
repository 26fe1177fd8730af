//! Global brand CSS variables supplied by the theming provider.
//!
//! Brand values sit at the bottom of the cascade: any property a block sets
//! on its active breakpoint overrides them.

use blockmail_model::{BlockType, StyleMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const FONT_FAMILY: &str = "--brand-font-family";
pub const TEXT_COLOR: &str = "--brand-text-color";
pub const PRIMARY_COLOR: &str = "--brand-primary-color";
pub const LINK_COLOR: &str = "--brand-link-color";
pub const BACKGROUND_COLOR: &str = "--brand-background-color";

pub const DEFAULT_FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandStyles {
    variables: BTreeMap<String, String>,
}

impl BrandStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_variables<K, V>(variables: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut brand = Self::new();
        for (name, value) in variables {
            brand.set(name, value);
        }
        brand
    }

    /// Register a variable; the leading `--` is optional
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = normalize_name(name.into());
        let value = value.into();
        debug!(variable = %name, value = %value, "Registering brand variable");
        self.variables.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .get(&normalize_name(name.to_string()))
            .map(String::as_str)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn font_family(&self) -> &str {
        self.get(FONT_FAMILY).unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Lowest-precedence properties a block of this type inherits
    pub fn base_properties(&self, kind: Option<BlockType>) -> StyleMap {
        let mut props = StyleMap::new();

        if let Some(font) = self.get(FONT_FAMILY) {
            props.insert("fontFamily".to_string(), font.to_string());
        }
        if let Some(color) = self.get(TEXT_COLOR) {
            props.insert("color".to_string(), color.to_string());
        }

        match kind {
            Some(BlockType::Button) => {
                if let Some(primary) = self.get(PRIMARY_COLOR) {
                    props.insert("backgroundColor".to_string(), primary.to_string());
                }
            }
            Some(BlockType::Columns) => {
                if let Some(background) = self.get(BACKGROUND_COLOR) {
                    props.insert("backgroundColor".to_string(), background.to_string());
                }
            }
            _ => {}
        }

        props
    }
}

fn normalize_name(name: String) -> String {
    if name.starts_with("--") {
        name
    } else {
        format!("--{}", name)
    }
}
