//! Theme-aware color palette for WorldMetrics.
//!
//! Semantic colors adapt to the current theme; series colors stay fixed so a
//! country keeps its color when switching themes.

use iced::{Color, Theme};

/// Line colors assigned to traces in order.
const SERIES_PALETTE: [Color; 10] = [
    Color::from_rgb(0.12, 0.47, 0.71),
    Color::from_rgb(1.0, 0.5, 0.05),
    Color::from_rgb(0.17, 0.63, 0.17),
    Color::from_rgb(0.84, 0.15, 0.16),
    Color::from_rgb(0.58, 0.4, 0.74),
    Color::from_rgb(0.55, 0.34, 0.29),
    Color::from_rgb(0.89, 0.47, 0.76),
    Color::from_rgb(0.5, 0.5, 0.5),
    Color::from_rgb(0.74, 0.74, 0.13),
    Color::from_rgb(0.09, 0.75, 0.81),
];

/// Color of the `index`-th trace.
pub fn series_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Get colors from the theme's extended palette.
pub struct ThemeColors<'a> {
    theme: &'a Theme,
}

impl<'a> ThemeColors<'a> {
    /// Create a new ThemeColors from a theme reference.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    /// Primary text color.
    pub fn text(&self) -> Color {
        self.palette().background.base.text
    }

    /// Muted/secondary text color.
    pub fn text_muted(&self) -> Color {
        self.palette().background.weak.text
    }

    /// Success color (green).
    pub fn success(&self) -> Color {
        self.palette().success.base.color
    }

    /// Danger/error color (red).
    pub fn danger(&self) -> Color {
        self.palette().danger.base.color
    }

    /// Default border color.
    pub fn border(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.25, 0.25, 0.3)
        } else {
            Color::from_rgb(0.8, 0.8, 0.82)
        }
    }

    /// Chart background color.
    pub fn chart_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.08, 0.08, 0.1)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Chart outer background.
    pub fn chart_outer_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.1, 0.1, 0.12)
        } else {
            Color::from_rgb(0.95, 0.95, 0.96)
        }
    }

    /// Chart grid lines.
    pub fn chart_grid(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.2, 0.25)
        } else {
            Color::from_rgb(0.85, 0.85, 0.88)
        }
    }

    /// Chart axis labels.
    pub fn chart_label(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.5, 0.5, 0.5)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    /// Card background color.
    pub fn card_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.12, 0.12, 0.14)
        } else {
            Color::from_rgb(1.0, 1.0, 1.0)
        }
    }

    /// Check if the current theme is dark.
    pub fn is_dark(&self) -> bool {
        self.palette().is_dark
    }
}

/// Convenience function to create ThemeColors.
pub fn colors(theme: &Theme) -> ThemeColors<'_> {
    ThemeColors::new(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_color_wraps() {
        assert_eq!(series_color(0), series_color(SERIES_PALETTE.len()));
        assert_ne!(series_color(0), series_color(1));
    }

    #[test]
    fn test_dark_theme_detection() {
        assert!(colors(&Theme::Dark).is_dark());
        assert!(!colors(&Theme::Light).is_dark());
    }
}
