//! Declared length values.
//!
//! Lengths are kept exactly as the host declared them (`"50%"`, `"2rem"`,
//! `""`); resolving them to pixels is the geometry pass's job.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// A length-valued property the geometry pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum LengthProperty {
    /// `left`
    Left,
    /// `top`
    Top,
    /// `width`
    Width,
    /// `height`
    Height,
    /// `margin-left`
    MarginLeft,
    /// `margin-top`
    MarginTop,
    /// `margin-right`
    MarginRight,
    /// `padding-left`
    PaddingLeft,
    /// `padding-top`
    PaddingTop,
    /// `font-size`
    FontSize,
}

/// The declared lengths of one element. Missing declarations are `None`.
///
/// Deserializes from camelCase keys (`marginLeft`, `paddingTop`, ...), the
/// shape hosts read off a computed style object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LengthStyle {
    /// `left`
    pub left: Option<String>,
    /// `top`
    pub top: Option<String>,
    /// `width`
    pub width: Option<String>,
    /// `height`
    pub height: Option<String>,
    /// `margin-left`
    pub margin_left: Option<String>,
    /// `margin-top`
    pub margin_top: Option<String>,
    /// `margin-right`
    pub margin_right: Option<String>,
    /// `padding-left`
    pub padding_left: Option<String>,
    /// `padding-top`
    pub padding_top: Option<String>,
    /// `font-size`
    pub font_size: Option<String>,
}

impl LengthStyle {
    /// The declared value of `property`, if any.
    #[must_use]
    pub fn get(&self, property: LengthProperty) -> Option<&str> {
        let value = match property {
            LengthProperty::Left => &self.left,
            LengthProperty::Top => &self.top,
            LengthProperty::Width => &self.width,
            LengthProperty::Height => &self.height,
            LengthProperty::MarginLeft => &self.margin_left,
            LengthProperty::MarginTop => &self.margin_top,
            LengthProperty::MarginRight => &self.margin_right,
            LengthProperty::PaddingLeft => &self.padding_left,
            LengthProperty::PaddingTop => &self.padding_top,
            LengthProperty::FontSize => &self.font_size,
        };
        value.as_deref()
    }

    /// Set the declared value of `property`, builder style.
    #[must_use]
    pub fn with(mut self, property: LengthProperty, value: &str) -> Self {
        let slot = match property {
            LengthProperty::Left => &mut self.left,
            LengthProperty::Top => &mut self.top,
            LengthProperty::Width => &mut self.width,
            LengthProperty::Height => &mut self.height,
            LengthProperty::MarginLeft => &mut self.margin_left,
            LengthProperty::MarginTop => &mut self.margin_top,
            LengthProperty::MarginRight => &mut self.margin_right,
            LengthProperty::PaddingLeft => &mut self.padding_left,
            LengthProperty::PaddingTop => &mut self.padding_top,
            LengthProperty::FontSize => &mut self.font_size,
        };
        *slot = Some(value.to_string());
        self
    }

    /// Shorthand for a positioned box: `left`, `top`, `width`, `height`.
    #[must_use]
    pub fn positioned(left: &str, top: &str, width: &str, height: &str) -> Self {
        Self::default()
            .with(LengthProperty::Left, left)
            .with(LengthProperty::Top, top)
            .with(LengthProperty::Width, width)
            .with(LengthProperty::Height, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_display_is_css_name() {
        assert_eq!(LengthProperty::MarginLeft.to_string(), "margin-left");
        assert_eq!(LengthProperty::FontSize.to_string(), "font-size");
        assert_eq!(LengthProperty::Top.to_string(), "top");
    }

    #[test]
    fn test_with_and_get() {
        let style = LengthStyle::default().with(LengthProperty::PaddingTop, "4px");
        assert_eq!(style.get(LengthProperty::PaddingTop), Some("4px"));
        assert_eq!(style.get(LengthProperty::PaddingLeft), None);
    }
}
