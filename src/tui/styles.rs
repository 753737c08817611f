//! Color palette and styles for the screening form.
//!
//! Dark clinical theme; risk results use the label's own color so the
//! elevated/low treatment matches everywhere it is shown.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLabel;

/// Clinical theme color palette.
pub struct ClinicalTheme;

impl ClinicalTheme {
    /// Deep teal, primary accent
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Lighter teal for focus and key hints
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    /// Light slate for borders
    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Amber, used for "please select" warnings
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Dark red panel behind an elevated result
    pub const ELEVATED_BG: Color = Color::Rgb(59, 15, 15); // #3B0F0F

    /// Dark green panel behind a low result
    pub const LOW_BG: Color = Color::Rgb(15, 47, 31); // #0F2F1F

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Placeholders and the disclaimer
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Foreground in the label's color
    #[must_use]
    pub fn risk_label(label: RiskLabel) -> Style {
        let (r, g, b) = label.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }

    /// Panel background behind a result
    #[must_use]
    pub fn risk_panel(label: RiskLabel) -> Style {
        let bg = match label {
            RiskLabel::Elevated => Self::ELEVATED_BG,
            RiskLabel::Low => Self::LOW_BG,
        };
        Style::default().bg(bg)
    }
}
