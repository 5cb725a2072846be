//! Length resolution, element geometry, and color values for the Isle
//! selection engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Length parsing** ([CSS Values 4 § 4.1](https://www.w3.org/TR/css-values-4/#lengths))
//!   - `px`, `em`, `rem`, `%` and unitless numbers
//! - **Size resolution** - relative lengths to absolute pixels against the
//!   element's ancestors and an injected [`HostMetrics`]
//! - **Geometry** - absolute [`BoxRect`]s by walking the ancestor chain
//! - **Colors** ([CSS Color 4 § 7](https://www.w3.org/TR/css-color-4/#the-hsl-notation))
//!   - HSL value type with hex/rgb/hsl views and hue rotations
//!
//! # Not Yet Implemented
//!
//! - Viewport units (vw, vh) and `calc()`
//! - Borders, right/bottom offsets and padding on the trailing edges

/// HSL color values and color-scheme rotations.
pub mod color;
/// Absolute element boxes.
pub mod geometry;
/// Length parsing.
pub mod length;
/// Length-to-pixel resolution.
pub mod resolve;

pub use color::{Color, Rgb};
pub use geometry::{BoxRect, GeometryIndex};
pub use length::{DEFAULT_FONT_SIZE_PX, LengthUnit, ParsedLength, parse_length};
pub use resolve::{Axis, HostMetrics, SizeResolver, StaticMetrics};
