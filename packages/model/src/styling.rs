//! Per-breakpoint styling attached to every block.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Flat style-property map keyed by camelCase CSS property names
pub type StyleMap = BTreeMap<String, String>;

/// Responsive breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }

    /// Whether a block with these display options is shown at this breakpoint
    pub fn is_visible(&self, options: &DisplayOptions) -> bool {
        match self {
            Breakpoint::Desktop => options.show_on_desktop,
            Breakpoint::Tablet => options.show_on_tablet,
            Breakpoint::Mobile => options.show_on_mobile,
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Breakpoint::Desktop),
            "tablet" => Ok(Breakpoint::Tablet),
            "mobile" => Ok(Breakpoint::Mobile),
            other => Err(ModelError::UnknownBreakpoint(other.to_string())),
        }
    }
}

/// Style maps for all three breakpoints.
///
/// The struct always carries every breakpoint, so partial styling cannot be
/// represented.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Styling {
    #[serde(default)]
    pub desktop: StyleMap,
    #[serde(default)]
    pub tablet: StyleMap,
    #[serde(default)]
    pub mobile: StyleMap,
}

impl Styling {
    /// Same map on every breakpoint
    pub fn uniform(map: StyleMap) -> Self {
        Self {
            desktop: map.clone(),
            tablet: map.clone(),
            mobile: map,
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> &StyleMap {
        match breakpoint {
            Breakpoint::Desktop => &self.desktop,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Mobile => &self.mobile,
        }
    }

    pub fn get_mut(&mut self, breakpoint: Breakpoint) -> &mut StyleMap {
        match breakpoint {
            Breakpoint::Desktop => &mut self.desktop,
            Breakpoint::Tablet => &mut self.tablet,
            Breakpoint::Mobile => &mut self.mobile,
        }
    }

    pub fn set(
        &mut self,
        breakpoint: Breakpoint,
        property: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.get_mut(breakpoint).insert(property.into(), value.into());
    }

    pub fn property(&self, breakpoint: Breakpoint, property: &str) -> Option<&str> {
        self.get(breakpoint).get(property).map(String::as_str)
    }

    /// True when no breakpoint map is empty
    pub fn is_populated(&self) -> bool {
        Breakpoint::ALL.iter().all(|bp| !self.get(*bp).is_empty())
    }
}

/// Layout hint, kept for wire compatibility
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOptions {
    pub show_on_desktop: bool,
    pub show_on_tablet: bool,
    pub show_on_mobile: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_on_desktop: true,
            show_on_tablet: true,
            show_on_mobile: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_round_trip() {
        for bp in Breakpoint::ALL {
            assert_eq!(bp.as_str().parse::<Breakpoint>().unwrap(), bp);
        }
        assert!(matches!(
            "watch".parse::<Breakpoint>(),
            Err(ModelError::UnknownBreakpoint(_))
        ));
    }

    #[test]
    fn test_display_options_default_to_visible() {
        let options: DisplayOptions = serde_json::from_str(r#"{"showOnMobile": false}"#).unwrap();

        assert!(Breakpoint::Desktop.is_visible(&options));
        assert!(Breakpoint::Tablet.is_visible(&options));
        assert!(!Breakpoint::Mobile.is_visible(&options));
    }

    #[test]
    fn test_styling_set_targets_one_breakpoint() {
        let mut styling =
            Styling::uniform(StyleMap::from([("padding".to_string(), "10px".to_string())]));
        styling.set(Breakpoint::Mobile, "padding", "4px");

        assert_eq!(styling.property(Breakpoint::Desktop, "padding"), Some("10px"));
        assert_eq!(styling.property(Breakpoint::Mobile, "padding"), Some("4px"));
        assert!(styling.is_populated());
    }
}
