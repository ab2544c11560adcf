//! Global theme management.

use super::colors::ColorPalette;
use super::layout::{BorderRadius, Spacing};

/// Global theme: palette, spacing scale and border radii in one place so
/// every page lays out against the same parameters.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub palette: ColorPalette,
    pub spacing: Spacing,
    pub border_radius: BorderRadius,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            palette: ColorPalette::dark(),
            spacing: Spacing::default(),
            border_radius: BorderRadius::default(),
        }
    }

    pub fn light() -> Self {
        Self {
            palette: ColorPalette::light(),
            spacing: Spacing::default(),
            border_radius: BorderRadius::default(),
        }
    }
}
