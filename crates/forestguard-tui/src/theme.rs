//! Color presets and the style-token → terminal style mapping.
//!
//! Screens never pick colors directly. Chrome uses the [`Theme`] fields and
//! category badges go through [`Theme::token_style`].

use forestguard_core::{Category, StyleToken, ThemeName};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

// ─── Theme Presets ──────────────────────────────────────────────────────────

/// Built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreset {
    /// Dark canopy background (default).
    Dark,
    Light,
}

impl ThemePreset {
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }

    /// Advance to the next preset (wrapping).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<ThemeName> for ThemePreset {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::Dark,
            ThemeName::Light => Self::Light,
        }
    }
}

impl std::fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

// ─── Colors ─────────────────────────────────────────────────────────────────

/// Serializable RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SerColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn to_ratatui(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

// ─── Theme ──────────────────────────────────────────────────────────────────

/// Concrete color assignments for every surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub preset: ThemePreset,
    pub bg: SerColor,
    pub fg: SerColor,
    pub status_bar_bg: SerColor,
    pub status_bar_fg: SerColor,
    pub highlight_bg: SerColor,
    pub highlight_fg: SerColor,
    pub border: SerColor,
    pub muted: SerColor,
    pub critical: SerColor,
    pub danger: SerColor,
    pub warning: SerColor,
    pub success: SerColor,
    pub info: SerColor,
    pub accent: SerColor,
}

impl Theme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            preset: ThemePreset::Dark,
            bg: SerColor::new(0x14, 0x1d, 0x17),            // night canopy
            fg: SerColor::new(0xdc, 0xe8, 0xd6),            // pale sage
            status_bar_bg: SerColor::new(0x1f, 0x2d, 0x23),
            status_bar_fg: SerColor::new(0x8f, 0xd1, 0x9e),
            highlight_bg: SerColor::new(0x2e, 0x5a, 0x3c),
            highlight_fg: SerColor::new(0xff, 0xff, 0xff),
            border: SerColor::new(0x35, 0x4a, 0x3b),
            muted: SerColor::new(0x7d, 0x8c, 0x80),
            critical: SerColor::new(0xb9, 0x1c, 0x1c),
            danger: SerColor::new(0xf8, 0x71, 0x71),
            warning: SerColor::new(0xfa, 0xcc, 0x15),
            success: SerColor::new(0x4a, 0xde, 0x80),
            info: SerColor::new(0x60, 0xa5, 0xfa),
            accent: SerColor::new(0x22, 0xc5, 0x5e),        // forest green
        }
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            preset: ThemePreset::Light,
            bg: SerColor::new(0xf7, 0xfa, 0xf5),
            fg: SerColor::new(0x1f, 0x2a, 0x22),
            status_bar_bg: SerColor::new(0xe3, 0xec, 0xe0),
            status_bar_fg: SerColor::new(0x16, 0x65, 0x34),
            highlight_bg: SerColor::new(0xbb, 0xf7, 0xd0),
            highlight_fg: SerColor::new(0x00, 0x00, 0x00),
            border: SerColor::new(0xc5, 0xd3, 0xc8),
            muted: SerColor::new(0x6b, 0x72, 0x80),
            critical: SerColor::new(0x99, 0x1b, 0x1b),
            danger: SerColor::new(0xdc, 0x26, 0x26),
            warning: SerColor::new(0xa1, 0x62, 0x07),
            success: SerColor::new(0x15, 0x80, 0x3d),
            info: SerColor::new(0x1d, 0x4e, 0xd8),
            accent: SerColor::new(0x16, 0xa3, 0x4a),
        }
    }

    #[must_use]
    pub const fn from_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Dark => Self::dark(),
            ThemePreset::Light => Self::light(),
        }
    }

    /// Plain text on the screen background.
    #[must_use]
    pub fn base(&self) -> Style {
        Style::default()
            .fg(self.fg.to_ratatui())
            .bg(self.bg.to_ratatui())
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border.to_ratatui())
    }

    /// Border of the focused panel.
    #[must_use]
    pub fn focus_border_style(&self) -> Style {
        Style::default().fg(self.accent.to_ratatui())
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted.to_ratatui())
    }

    /// Selected list row.
    #[must_use]
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg.to_ratatui())
            .bg(self.highlight_bg.to_ratatui())
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent.to_ratatui())
            .add_modifier(Modifier::BOLD)
    }

    /// Foreground color for a style token.
    #[must_use]
    pub const fn token_color(&self, token: StyleToken) -> Color {
        match token {
            StyleToken::Critical => self.critical.to_ratatui(),
            StyleToken::Danger => self.danger.to_ratatui(),
            StyleToken::Warning => self.warning.to_ratatui(),
            StyleToken::Success => self.success.to_ratatui(),
            StyleToken::Info => self.info.to_ratatui(),
            StyleToken::Neutral => self.muted.to_ratatui(),
        }
    }

    /// Badge style for a style token. `Critical` renders as a solid block.
    #[must_use]
    pub fn token_style(&self, token: StyleToken) -> Style {
        match token {
            StyleToken::Critical => Style::default()
                .fg(Color::White)
                .bg(self.critical.to_ratatui())
                .add_modifier(Modifier::BOLD),
            other => Style::default()
                .fg(self.token_color(other))
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Badge style for any category value.
    #[must_use]
    pub fn category_style(&self, category: impl Into<Category>) -> Style {
        self.token_style(category.into().style())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use forestguard_core::{RiskLevel, Severity, StaffStatus};

    use super::*;

    #[test]
    fn presets_are_distinct() {
        assert_ne!(Theme::dark(), Theme::light());
        assert!(ThemePreset::Light.is_light());
        assert!(!ThemePreset::Dark.is_light());
    }

    #[test]
    fn preset_cycling_wraps() {
        let mut preset = ThemePreset::Dark;
        for _ in 0..ThemePreset::ALL.len() {
            preset = preset.next();
        }
        assert_eq!(preset, ThemePreset::Dark);
    }

    #[test]
    fn theme_name_maps_to_preset() {
        assert_eq!(ThemePreset::from(ThemeName::Light), ThemePreset::Light);
        assert_eq!(Theme::from_preset(ThemeName::Dark.into()), Theme::dark());
    }

    #[test]
    fn every_token_has_a_distinct_color() {
        let theme = Theme::dark();
        let tokens = [
            StyleToken::Critical,
            StyleToken::Danger,
            StyleToken::Warning,
            StyleToken::Success,
            StyleToken::Info,
            StyleToken::Neutral,
        ];
        let colors: std::collections::HashSet<String> = tokens
            .iter()
            .map(|t| format!("{:?}", theme.token_color(*t)))
            .collect();
        assert_eq!(colors.len(), tokens.len());
    }

    #[test]
    fn critical_badge_is_filled() {
        let theme = Theme::light();
        let style = theme.category_style(Severity::Critical);
        assert_eq!(style.bg, Some(theme.critical.to_ratatui()));
        let high = theme.category_style(RiskLevel::High);
        assert_eq!(high.fg, Some(theme.danger.to_ratatui()));
        assert_eq!(high.bg, None);
    }

    #[test]
    fn off_duty_is_muted() {
        let theme = Theme::dark();
        assert_eq!(
            theme.category_style(StaffStatus::OffDuty).fg,
            Some(theme.muted.to_ratatui())
        );
    }

    #[test]
    fn theme_serde_roundtrip() {
        let theme = Theme::light();
        let json = serde_json::to_string(&theme).unwrap();
        let decoded: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, theme);
    }
}
