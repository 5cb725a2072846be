//! CSS Length values and parsing
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Hosts hand lengths over as the strings a computed style reports
//! (`"12px"`, `"1.5rem"`, `"50%"`). Parsing never fails: anything the
//! resolver cannot use is classified so it can be reported and zeroed.

use strum_macros::{Display, EnumString};

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
///
/// The units the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LengthUnit {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    #[strum(serialize = "px")]
    Px,
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    #[strum(serialize = "em")]
    Em,
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the root element."
    #[strum(serialize = "rem")]
    Rem,
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    #[strum(serialize = "%")]
    Percent,
    /// A bare number. Taken as pixels.
    #[strum(serialize = "")]
    Unitless,
}

/// The outcome of parsing one declared length.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLength {
    /// `"0"`, or an empty / whitespace-only declaration.
    Zero,
    /// A number with a supported unit.
    Length(f64, LengthUnit),
    /// A number followed by a unit the resolver does not support.
    Unsupported {
        /// The numeric portion.
        value: f64,
        /// The unrecognized suffix.
        unit: String,
    },
    /// The numeric portion could not be parsed.
    NotNumeric(String),
}

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
///
/// Split a declared length into its number and unit.
///
/// # Example
/// ```
/// use isle_css::{LengthUnit, ParsedLength, parse_length};
///
/// assert_eq!(parse_length("1.5rem"), ParsedLength::Length(1.5, LengthUnit::Rem));
/// assert_eq!(parse_length("  "), ParsedLength::Zero);
/// ```
#[must_use]
pub fn parse_length(raw: &str) -> ParsedLength {
    let text = raw.trim();
    if text.is_empty() || text == "0" {
        return ParsedLength::Zero;
    }

    let (number, unit) = text.split_at(numeric_prefix_len(text));
    let Ok(value) = number.parse::<f64>() else {
        return ParsedLength::NotNumeric(text.to_string());
    };

    let unit = unit.trim();
    unit.parse::<LengthUnit>().map_or_else(
        |_| ParsedLength::Unsupported {
            value,
            unit: unit.to_string(),
        },
        |unit| ParsedLength::Length(value, unit),
    )
}

/// [§ 4.3.3 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
///
/// Length in bytes of the leading `<number>`: optional sign, digits with at
/// most one decimal point, optional exponent. An `e` that does not start an
/// exponent (as in `em`) ends the number.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                exp += 1;
            }
            end = exp;
        }
    }

    end
}
