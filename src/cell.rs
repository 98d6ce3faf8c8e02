use strum::{Display, VariantArray};

/// The state of one grid cell.
///
/// Cells only ever move `Free -> Covered` or `Free | Covered -> Tower`.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum CellState {
    /// Unusable; never covered and never hosts a tower.
    Blocked,
    /// Usable and outside the reach of every tower.
    #[default]
    Free,
    /// Hosts a placed tower.
    Tower,
    /// Usable, within reach of at least one tower, but not a tower itself.
    Covered,
}

impl CellState {
    /// Whether a tower may be placed on a cell in this state.
    #[inline]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Free | Self::Covered)
    }

    pub(crate) fn glyph(self) -> char {
        match self {
            Self::Blocked => '#',
            Self::Free => '.',
            Self::Tower => 'T',
            Self::Covered => '+',
        }
    }
}
