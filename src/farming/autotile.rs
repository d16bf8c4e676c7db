//! Autotile shape selection for tilled soil.
//!
//! A tilled tile's visual variant is a pure function of which of its four
//! cardinal neighbours are tilled. Variant names describe where the tile's
//! soil edges face (`Tr` = edges on top and right), matching the soil
//! tileset's file naming. An exhaustive match on the neighbour tuple makes
//! the selection total and order-independent.

/// The 16 soil shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilVariant {
    /// Isolated tile, no tilled neighbours.
    O,
    /// Surrounded on all four sides.
    X,
    L,
    R,
    Lr,
    T,
    B,
    Tb,
    Tl,
    Tr,
    Bl,
    Br,
    Tbr,
    Tbl,
    Lrb,
    Lrt,
}

impl SoilVariant {
    /// Tileset key for this shape.
    pub fn name(self) -> &'static str {
        match self {
            SoilVariant::O => "o",
            SoilVariant::X => "x",
            SoilVariant::L => "l",
            SoilVariant::R => "r",
            SoilVariant::Lr => "lr",
            SoilVariant::T => "t",
            SoilVariant::B => "b",
            SoilVariant::Tb => "tb",
            SoilVariant::Tl => "tl",
            SoilVariant::Tr => "tr",
            SoilVariant::Bl => "bl",
            SoilVariant::Br => "br",
            SoilVariant::Tbr => "tbr",
            SoilVariant::Tbl => "tbl",
            SoilVariant::Lrb => "lrb",
            SoilVariant::Lrt => "lrt",
        }
    }
}

/// Select the shape for a tilled tile given its neighbours' tilled state
/// (top = north of the tile, i.e. visually above it).
pub fn select_variant(top: bool, right: bool, bottom: bool, left: bool) -> SoilVariant {
    match (top, right, bottom, left) {
        (false, false, false, false) => SoilVariant::O,
        (true, true, true, true) => SoilVariant::X,
        // Single neighbour: soil continues that way, edge caps the rest.
        (false, false, false, true) => SoilVariant::R,
        (false, true, false, false) => SoilVariant::L,
        (true, false, false, false) => SoilVariant::B,
        (false, false, true, false) => SoilVariant::T,
        // Opposite pairs.
        (false, true, false, true) => SoilVariant::Lr,
        (true, false, true, false) => SoilVariant::Tb,
        // Corners.
        (true, false, false, true) => SoilVariant::Br,
        (true, true, false, false) => SoilVariant::Bl,
        (false, false, true, true) => SoilVariant::Tr,
        (false, true, true, false) => SoilVariant::Tl,
        // Three neighbours.
        (true, true, true, false) => SoilVariant::Tbr,
        (true, false, true, true) => SoilVariant::Tbl,
        (true, true, false, true) => SoilVariant::Lrb,
        (false, true, true, true) => SoilVariant::Lrt,
    }
}
