//! Device / preview mode selection.

use crate::error::ResolveError;
use blockmail_model::Breakpoint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Widths below this are mobile
pub const TABLET_MIN_WIDTH: u32 = 768;
/// Widths above this are desktop
pub const DESKTOP_MIN_WIDTH: u32 = 1025;

pub const DESKTOP_FRAME_WIDTH: u32 = 1200;
pub const TABLET_FRAME_WIDTH: u32 = 768;
pub const MOBILE_FRAME_WIDTH: u32 = 375;

/// Preview mode chosen by the user, or automatic from the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DeviceMode {
    #[default]
    Desktop,
    Tablet,
    Mobile,
    /// Breakpoint follows the width thresholds
    Auto { width: u32 },
    /// Caller-supplied frame width; thresholds are not applied
    Custom { width: u32 },
}

/// Resolved breakpoint and frame width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub breakpoint: Breakpoint,
    pub width: u32,
}

impl DeviceMode {
    pub fn viewport(&self) -> Viewport {
        match *self {
            DeviceMode::Desktop => Viewport {
                breakpoint: Breakpoint::Desktop,
                width: DESKTOP_FRAME_WIDTH,
            },
            DeviceMode::Tablet => Viewport {
                breakpoint: Breakpoint::Tablet,
                width: TABLET_FRAME_WIDTH,
            },
            DeviceMode::Mobile => Viewport {
                breakpoint: Breakpoint::Mobile,
                width: MOBILE_FRAME_WIDTH,
            },
            DeviceMode::Auto { width } => Viewport {
                breakpoint: breakpoint_for_width(width),
                width,
            },
            DeviceMode::Custom { width } => Viewport {
                breakpoint: Breakpoint::Desktop,
                width,
            },
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.viewport().breakpoint
    }
}

impl From<Breakpoint> for DeviceMode {
    fn from(breakpoint: Breakpoint) -> Self {
        match breakpoint {
            Breakpoint::Desktop => DeviceMode::Desktop,
            Breakpoint::Tablet => DeviceMode::Tablet,
            Breakpoint::Mobile => DeviceMode::Mobile,
        }
    }
}

/// `desktop`, `tablet`, `mobile`, `auto:<width>` or `custom:<width>`
impl FromStr for DeviceMode {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ResolveError::InvalidDeviceMode(s.to_string());
        match s.split_once(':') {
            None => s.parse::<Breakpoint>().map(DeviceMode::from).map_err(|_| invalid()),
            Some((mode, width)) => {
                let width: u32 = width.trim().parse().map_err(|_| invalid())?;
                match mode {
                    "auto" => Ok(DeviceMode::Auto { width }),
                    "custom" => Ok(DeviceMode::Custom { width }),
                    _ => Err(invalid()),
                }
            }
        }
    }
}

/// `<768 → mobile`, `768–1024 → tablet`, `>1024 → desktop`
pub fn breakpoint_for_width(width: u32) -> Breakpoint {
    if width < TABLET_MIN_WIDTH {
        Breakpoint::Mobile
    } else if width < DESKTOP_MIN_WIDTH {
        Breakpoint::Tablet
    } else {
        Breakpoint::Desktop
    }
}
