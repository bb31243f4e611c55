// ABOUTME: Theme palette and typography tier table for the deckgen engine
// ABOUTME: Maps semantic color roles to RGB values and bullet counts to font sizing

use crate::content::MAX_BULLETS;

/// An opaque RGB color. Transparency is applied per shape, not per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase hex form used by DrawingML srgbClr values.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Font sizes and spacing for one bullet-count tier.
///
/// Fewer bullets get larger type and looser spacing so a slide with a single
/// pair fills its panel the same way a four-pair slide does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypographyTier {
    pub point_size_pt: f32,
    pub point_max_chars: usize,
    pub explanation_size_pt: f32,
    pub explanation_max_chars: usize,
    pub line_spacing: f32,
    pub space_before_pt: f32,
}

/// Immutable palette plus the tier table. Shared read-only across all slide
/// builds of a request.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub card: Color,
    pub accent1: Color,
    pub accent2: Color,
    pub accent3: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub border: Color,
    tiers: [TypographyTier; MAX_BULLETS],
}

/// Named theme presets selectable by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreset {
    /// The canonical rich style: accent glows and tiered typography.
    Elegant,
    /// A subdued near-monochrome variant of the same layout.
    Flat,
}

impl std::str::FromStr for ThemePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elegant" => Ok(ThemePreset::Elegant),
            "flat" => Ok(ThemePreset::Flat),
            other => Err(format!("unknown theme preset: {}", other)),
        }
    }
}

const TIERS: [TypographyTier; MAX_BULLETS] = [
    TypographyTier {
        point_size_pt: 30.0,
        point_max_chars: 80,
        explanation_size_pt: 18.0,
        explanation_max_chars: 160,
        line_spacing: 1.25,
        space_before_pt: 14.0,
    },
    TypographyTier {
        point_size_pt: 28.0,
        point_max_chars: 70,
        explanation_size_pt: 17.0,
        explanation_max_chars: 140,
        line_spacing: 1.2,
        space_before_pt: 12.0,
    },
    TypographyTier {
        point_size_pt: 26.0,
        point_max_chars: 60,
        explanation_size_pt: 16.0,
        explanation_max_chars: 120,
        line_spacing: 1.15,
        space_before_pt: 10.0,
    },
    TypographyTier {
        point_size_pt: 21.0,
        point_max_chars: 50,
        explanation_size_pt: 13.0,
        explanation_max_chars: 100,
        line_spacing: 1.1,
        space_before_pt: 6.0,
    },
];

impl Theme {
    /// The canonical rich preset: deep navy background, three accent glows.
    pub fn elegant() -> Self {
        Self {
            background: Color::rgb(3, 7, 18),
            card: Color::rgb(15, 23, 42),
            accent1: Color::rgb(96, 165, 250),
            accent2: Color::rgb(167, 139, 250),
            accent3: Color::rgb(52, 211, 153),
            text_primary: Color::rgb(255, 255, 255),
            text_secondary: Color::rgb(203, 213, 225),
            text_muted: Color::rgb(148, 163, 184),
            border: Color::rgb(96, 165, 250),
            tiers: TIERS,
        }
    }

    /// The subdued preset observed alongside the rich one: same layout, the
    /// glows collapse into near-background slate tones.
    pub fn flat() -> Self {
        Self {
            background: Color::rgb(3, 7, 18),
            card: Color::rgb(15, 23, 42),
            accent1: Color::rgb(96, 165, 250),
            accent2: Color::rgb(30, 41, 59),
            accent3: Color::rgb(17, 24, 39),
            text_primary: Color::rgb(255, 255, 255),
            text_secondary: Color::rgb(203, 213, 225),
            text_muted: Color::rgb(148, 163, 184),
            border: Color::rgb(96, 165, 250),
            tiers: TIERS,
        }
    }

    pub fn preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Elegant => Theme::elegant(),
            ThemePreset::Flat => Theme::flat(),
        }
    }

    /// Resolve the typography tier for a bullet count in 1..=4.
    ///
    /// Callers pass the already-clamped effective bullet count; there is no
    /// fallback for out-of-range values.
    ///
    /// # Panics
    ///
    /// Panics if `bullet_count` is outside 1..=4.
    pub fn resolve_tier(&self, bullet_count: usize) -> &TypographyTier {
        assert!(
            (1..=MAX_BULLETS).contains(&bullet_count),
            "bullet count {} outside 1..={}",
            bullet_count,
            MAX_BULLETS
        );
        &self.tiers[bullet_count - 1]
    }
}
