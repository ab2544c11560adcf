//! Color definitions and palette management.
//!
//! All colors are RGB565 (5 bits red, 6 bits green, 5 bits blue). 8-bit RGB
//! components convert with R>>3, G>>2, B>>3.

use embedded_graphics::pixelcolor::Rgb565;

/// Main background - near-black navy
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(16 >> 3, 20 >> 2, 28 >> 3);

/// Surface color for panels and readout cards
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(30 >> 3, 36 >> 2, 48 >> 3);

/// Border and separator color
pub const COLOR_STROKE: Rgb565 = Rgb565::new(58 >> 3, 66 >> 2, 82 >> 3);

/// Primary accent - sonar blue, used for the main action buttons
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(66 >> 3, 133 >> 2, 200 >> 3);

/// Secondary accent - softer slate blue
pub const COLOR_ACCENT_DIM: Rgb565 = Rgb565::new(72 >> 3, 96 >> 2, 145 >> 3);

/// Error color for the bus-failure readout - muted red
pub const COLOR_ERROR: Rgb565 = Rgb565::new(196 >> 3, 84 >> 2, 84 >> 3);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Dark gray - subtle text
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

/// A cohesive color palette for consistent UI theming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Primary accent - key interactive elements
    pub primary: Rgb565,
    /// Secondary accent - less prominent actions
    pub secondary: Rgb565,
    /// Main background color
    pub background: Rgb565,
    /// Surface color for panels and elevated elements
    pub surface: Rgb565,
    /// Error and alert color
    pub error: Rgb565,
    /// High-contrast text
    pub text_primary: Rgb565,
    /// Lower-contrast text for secondary information
    pub text_secondary: Rgb565,
    /// Separators and outlines
    pub border: Rgb565,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorPalette {
    /// Dark palette (default), tuned for the device's indoor use.
    pub fn dark() -> Self {
        Self {
            primary: COLOR_ACCENT,
            secondary: COLOR_ACCENT_DIM,
            background: COLOR_BACKGROUND,
            surface: COLOR_SURFACE,
            error: COLOR_ERROR,
            text_primary: WHITE,
            text_secondary: LIGHT_GRAY,
            border: COLOR_STROKE,
        }
    }

    /// Light palette for bright environments.
    pub fn light() -> Self {
        Self {
            primary: COLOR_ACCENT,
            secondary: COLOR_ACCENT_DIM,
            background: WHITE,
            surface: COLOR_SURFACE,
            error: COLOR_ERROR,
            text_primary: COLOR_BACKGROUND,
            text_secondary: DARK_GRAY,
            border: COLOR_STROKE,
        }
    }
}
