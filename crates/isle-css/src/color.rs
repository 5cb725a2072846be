//! HSL color values and color-scheme rotations.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Colors are plain values: every operation returns a new [`Color`].

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color as 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
}

/// [§ 7 HSL Colors](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// A color as hue, saturation and lightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "ColorView")]
pub struct Color {
    /// Hue angle in degrees, in `[0, 360)`.
    hue: f64,
    /// Saturation in `[0, 1]`.
    saturation: f64,
    /// Lightness in `[0, 1]`.
    lightness: f64,
}

/// Serialized form of a [`Color`]: every view a renderer might want.
#[derive(Debug, Clone, Serialize)]
struct ColorView {
    hex: String,
    rgb: Rgb,
    hsl: String,
}

impl From<Color> for ColorView {
    fn from(color: Color) -> Self {
        Self {
            hex: color.to_hex_string(),
            rgb: color.to_rgb(),
            hsl: color.to_hsl_string(),
        }
    }
}

impl Color {
    /// Create a color from HSL components. The hue wraps into `[0, 360)`;
    /// saturation and lightness are clamped to `[0, 1]`. Non-finite inputs
    /// become `0`.
    #[must_use]
    pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        // Tiny negative hues round up to exactly 360 under `rem_euclid`.
        let hue = finite(hue).rem_euclid(360.0);
        Self {
            hue: if hue >= 360.0 { 0.0 } else { hue },
            saturation: finite(saturation).clamp(0.0, 1.0),
            lightness: finite(lightness).clamp(0.0, 1.0),
        }
    }

    /// Create a color from 8-bit sRGB channels.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let (hue, saturation, lightness) = rgb_to_hsl(rgb);
        Self::hsl(hue, saturation, lightness)
    }

    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    ///
    /// Alpha digits are accepted and ignored.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: &str| u8::from_str_radix(range, 16).ok();
        let rgb = match hex.len() {
            // [§ 5.2]
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 | 4 => Rgb {
                r: channel(&hex[0..1].repeat(2))?,
                g: channel(&hex[1..2].repeat(2))?,
                b: channel(&hex[2..3].repeat(2))?,
            },
            6 | 8 => Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            },
            _ => return None,
        };
        Some(Self::from_rgb(rgb))
    }

    /// Hue angle in degrees.
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Saturation in `[0, 1]`.
    #[must_use]
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Lightness in `[0, 1]`.
    #[must_use]
    pub const fn lightness(&self) -> f64 {
        self.lightness
    }

    /// Rotate the hue by `degrees` (either direction).
    #[must_use]
    pub fn spin(&self, degrees: f64) -> Self {
        Self::hsl(self.hue + degrees, self.saturation, self.lightness)
    }

    /// This color and the two colors a third of the wheel away.
    #[must_use]
    pub fn triad(&self) -> [Self; 3] {
        [*self, self.spin(120.0), self.spin(240.0)]
    }

    /// The two colors either side of the complement (150° and 210° away).
    #[must_use]
    pub fn split_complement(&self) -> [Self; 2] {
        [self.spin(150.0), self.spin(210.0)]
    }

    /// This color and the three colors a quarter of the wheel apart.
    #[must_use]
    pub fn tetrad(&self) -> [Self; 4] {
        [*self, self.spin(90.0), self.spin(180.0), self.spin(270.0)]
    }

    /// [§ 7.1 Converting HSL Colors to sRGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
    ///
    /// Channel `n` (0 for red, 8 for green, 4 for blue) sits at
    /// `k = (n + hue / 30) mod 12` on a twelve-step wheel and comes out as
    /// `l - a × clamp(min(k - 3, 9 - k), -1, 1)` with `a = s × min(l, 1 - l)`.
    #[must_use]
    pub fn to_rgb(&self) -> Rgb {
        let a = self.saturation * self.lightness.min(1.0 - self.lightness);
        let channel = |n: f64| {
            let k = (n + self.hue / 30.0) % 12.0;
            channel_byte(self.lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0))
        };
        Rgb {
            r: channel(0.0),
            g: channel(8.0),
            b: channel(4.0),
        }
    }

    /// `#rrggbb`
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        let Rgb { r, g, b } = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `rgb(r, g, b)`
    #[must_use]
    pub fn to_rgb_string(&self) -> String {
        let Rgb { r, g, b } = self.to_rgb();
        format!("rgb({r}, {g}, {b})")
    }

    /// `hsl(h, s%, l%)`, each rounded to a whole number.
    #[must_use]
    pub fn to_hsl_string(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue.round() % 360.0,
            (self.saturation * 100.0).round(),
            (self.lightness * 100.0).round()
        )
    }
}

/// A `[0, 1]` channel level as an 8-bit channel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_byte(level: f64) -> u8 {
    (level * 255.0).round().clamp(0.0, 255.0) as u8
}

/// [§ 7.2 RGB-to-HSL](https://www.w3.org/TR/css-color-4/#rgb-to-hsl)
fn rgb_to_hsl(rgb: Rgb) -> (f64, f64, f64) {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;
    let delta = max - min;

    // Achromatic
    if delta == 0.0 {
        return (0.0, 0.0, lightness);
    }

    let saturation = if lightness == 0.0 || lightness == 1.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * lightness - 1.0).abs())
    };

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (sector * 60.0, saturation, lightness)
}
