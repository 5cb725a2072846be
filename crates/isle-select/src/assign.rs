//! Color assignment.
//!
//! Each selector draws from one of three fixed palettes depending on how
//! many elements it holds. The draw index is the selector's position plus a
//! caller-chosen offset, so equal inputs always get equal colors.

use isle_css::Color;
use serde::Serialize;
use strum_macros::Display;

use crate::selection::{ColorSelection, Selector};

/// Which palette a selector draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum PaletteKind {
    /// Three colors a third of the wheel apart.
    Triad,
    /// Two colors either side of the complement.
    SplitComplement,
    /// Four colors a quarter of the wheel apart.
    Tetrad,
}

impl PaletteKind {
    /// Palette for a selector with `count` elements: multiples of three use
    /// the triad, one or two elements the split complement, anything else
    /// the tetrad.
    #[must_use]
    pub const fn for_cardinality(count: usize) -> Self {
        if count % 3 == 0 {
            Self::Triad
        } else if count <= 2 {
            Self::SplitComplement
        } else {
            Self::Tetrad
        }
    }
}

/// The three fixed palettes, derived from one base color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    triad: [Color; 3],
    split_complement: [Color; 2],
    tetrad: [Color; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_base(Color::hsl(200.0, 0.75, 0.6))
    }
}

impl Palette {
    /// Build every palette from `base`.
    #[must_use]
    pub fn from_base(base: Color) -> Self {
        Self {
            triad: base.triad(),
            split_complement: base.split_complement(),
            tetrad: base.tetrad(),
        }
    }

    /// The colors of one palette, in draw order.
    #[must_use]
    pub fn colors(&self, kind: PaletteKind) -> &[Color] {
        match kind {
            PaletteKind::Triad => &self.triad,
            PaletteKind::SplitComplement => &self.split_complement,
            PaletteKind::Tetrad => &self.tetrad,
        }
    }

    /// Color `index` of a palette, wrapping around its length.
    #[must_use]
    pub fn pick(&self, kind: PaletteKind, index: usize) -> Color {
        let colors = self.colors(kind);
        colors[index % colors.len()]
    }
}

/// Give selector `i` the color `palette[kind][(offset + i) % len]`, where
/// `kind` follows from the selector's element count.
#[must_use]
pub fn assign(selectors: &[Selector], palette: &Palette, offset: usize) -> Vec<ColorSelection> {
    selectors
        .iter()
        .enumerate()
        .map(|(i, selector)| ColorSelection {
            selector: selector.id(),
            color: palette.pick(
                PaletteKind::for_cardinality(selector.len()),
                offset.wrapping_add(i),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_by_cardinality() {
        assert_eq!(PaletteKind::for_cardinality(1), PaletteKind::SplitComplement);
        assert_eq!(PaletteKind::for_cardinality(2), PaletteKind::SplitComplement);
        assert_eq!(PaletteKind::for_cardinality(3), PaletteKind::Triad);
        assert_eq!(PaletteKind::for_cardinality(4), PaletteKind::Tetrad);
        assert_eq!(PaletteKind::for_cardinality(5), PaletteKind::Tetrad);
        assert_eq!(PaletteKind::for_cardinality(6), PaletteKind::Triad);
    }

    #[test]
    fn test_pick_wraps() {
        let palette = Palette::default();
        assert_eq!(
            palette.pick(PaletteKind::SplitComplement, 3),
            palette.colors(PaletteKind::SplitComplement)[1]
        );
        assert_eq!(
            palette.pick(PaletteKind::Tetrad, 4),
            palette.colors(PaletteKind::Tetrad)[0]
        );
    }

    #[test]
    fn test_palette_sizes() {
        let palette = Palette::default();
        assert_eq!(palette.colors(PaletteKind::Triad).len(), 3);
        assert_eq!(palette.colors(PaletteKind::SplitComplement).len(), 2);
        assert_eq!(palette.colors(PaletteKind::Tetrad).len(), 4);
    }
}
