//! # Style Resolver
//!
//! Picks a block's active breakpoint map and layers it over the brand base
//! properties. Block values win; `var(--…)` references are expanded from the
//! brand variables.

use crate::brand::BrandStyles;
use crate::css::{substitute_variables, to_kebab_case};
use crate::device::{DeviceMode, Viewport};
use blockmail_model::{Block, BlockBody, BlockType, Breakpoint, StyleMap, Styling};
use std::collections::btree_map;
use tracing::trace;

/// Final property map for one block at one breakpoint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputedStyle {
    properties: StyleMap,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.properties.remove(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.properties.iter()
    }

    pub fn into_properties(self) -> StyleMap {
        self.properties
    }

    /// `font-size: 16px; padding: 10px;`
    pub fn to_css(&self) -> String {
        self.properties
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}: {};", to_kebab_case(key), value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<StyleMap> for ComputedStyle {
    fn from(properties: StyleMap) -> Self {
        Self { properties }
    }
}

impl<'a> IntoIterator for &'a ComputedStyle {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    brand: BrandStyles,
    mode: DeviceMode,
}

impl StyleResolver {
    pub fn new(brand: BrandStyles, mode: DeviceMode) -> Self {
        Self { brand, mode }
    }

    pub fn with_mode(mut self, mode: DeviceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_mode(&mut self, mode: DeviceMode) {
        self.mode = mode;
    }

    pub fn brand(&self) -> &BrandStyles {
        &self.brand
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.mode.viewport()
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.mode.breakpoint()
    }

    pub fn active_map<'a>(&self, styling: &'a Styling) -> &'a StyleMap {
        styling.get(self.breakpoint())
    }

    pub fn is_visible<C>(&self, block: &Block<C>) -> bool {
        self.breakpoint().is_visible(&block.display_options)
    }

    /// Expand brand variables in a single value
    pub fn resolve_value(&self, value: &str) -> String {
        substitute_variables(value, self.brand.variables())
    }

    pub fn resolve<C: BlockBody>(&self, block: &Block<C>) -> ComputedStyle {
        let kind = block.type_name().parse::<BlockType>().ok();
        let mut properties = self.brand.base_properties(kind);

        for (property, value) in self.active_map(&block.styling) {
            properties.insert(property.clone(), self.resolve_value(value));
        }

        trace!(
            block_id = %block.id,
            breakpoint = %self.breakpoint(),
            count = properties.len(),
            "Resolved block style"
        );

        ComputedStyle { properties }
    }
}
