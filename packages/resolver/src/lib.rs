//! # Blockmail Resolver
//!
//! Responsive style resolution: device mode → breakpoint → computed style,
//! with brand CSS variables at the bottom of the cascade.

pub mod brand;
pub mod css;
pub mod device;
pub mod error;
pub mod resolver;

pub use brand::BrandStyles;
pub use css::{substitute_variables, to_kebab_case};
pub use device::{breakpoint_for_width, DeviceMode, Viewport};
pub use error::ResolveError;
pub use resolver::{ComputedStyle, StyleResolver};
