// ABOUTME: Slide builders for the deckgen engine
// ABOUTME: Composes title and content slides onto a ShapeCanvas using the theme and typography tiers

use crate::assets::{EmbedOutcome, ImageAssetResolver};
use crate::canvas::{Align, Bounds, Fill, Outline, Paragraph, ShapeCanvas, inches, points};
use crate::content::{SlideContent, TitleSlideContent};
use crate::theme::{Theme, TypographyTier};
use crate::utils::clamp_text;
use log::warn;

/// Character cap applied to slide titles on both slide archetypes.
const TITLE_MAX_CHARS: usize = 60;

/// Bullet marker prefixed to every point line.
const BULLET_MARKER: &str = "◆ ";

/// Build the leading title slide: background, two large glows, centered
/// title with optional subtitle and author lines.
pub fn build_title_slide(content: &TitleSlideContent, theme: &Theme) -> ShapeCanvas {
    let mut canvas = ShapeCanvas::new();

    let bg = canvas.add_rect(
        Bounds::from_inches(0.0, 0.0, 10.0, 7.5),
        Fill::solid(theme.background),
        None,
    );
    canvas.send_to_back_above_base(bg);

    canvas.add_oval(
        Bounds::from_inches(-2.5, -2.5, 9.0, 9.0),
        Fill::translucent(theme.accent1, 0.90),
    );
    canvas.add_oval(
        Bounds::from_inches(5.5, 3.0, 8.0, 8.0),
        Fill::translucent(theme.accent2, 0.92),
    );

    canvas.add_text_box(
        Bounds::from_inches(0.75, 2.6, 8.5, 1.4),
        vec![
            Paragraph::new(
                clamp_text(&content.title, TITLE_MAX_CHARS).to_uppercase(),
                44.0,
                theme.text_primary,
            )
            .bold()
            .align(Align::Center),
        ],
    );

    if let Some(subtitle) = &content.subtitle {
        canvas.add_text_box(
            Bounds::from_inches(1.0, 4.1, 8.0, 0.9),
            vec![
                Paragraph::new(clamp_text(subtitle, 100), 22.0, theme.accent1)
                    .align(Align::Center),
            ],
        );
    }

    if let Some(author) = &content.author {
        canvas.add_text_box(
            Bounds::from_inches(1.0, 6.4, 8.0, 0.5),
            vec![
                Paragraph::new(clamp_text(author, 60), 14.0, theme.text_muted)
                    .align(Align::Center),
            ],
        );
    }

    canvas
}

/// Build a content slide: background, three accent glows, title panel,
/// bullet panel sized by the resolved tier, image panel, footer line.
///
/// Missing optional fields never fail the build; an unresolvable image
/// leaves the frame empty and the outcome is logged.
pub fn build_content_slide(
    content: &SlideContent,
    theme: &Theme,
    tier: &TypographyTier,
    resolver: &ImageAssetResolver,
) -> ShapeCanvas {
    let mut canvas = ShapeCanvas::new();

    // Full-bleed background, pinned just above the base layer so the glows
    // painted next stay visible.
    let bg = canvas.add_rect(
        Bounds::from_inches(0.0, 0.0, 10.0, 7.5),
        Fill::solid(theme.background),
        None,
    );
    canvas.send_to_back_above_base(bg);

    for (x, y, size, color, transparency) in [
        (-3.0, -3.0, 10.0, theme.accent1, 0.90),
        (5.0, -2.0, 8.0, theme.accent2, 0.92),
        (3.0, 4.0, 9.0, theme.accent3, 0.91),
    ] {
        canvas.add_oval(
            Bounds::from_inches(x, y, size, size),
            Fill::translucent(color, transparency),
        );
    }

    // Title panel: low-opacity card, headline, thin accent underline.
    canvas.add_rect(
        Bounds::from_inches(0.35, 0.65, 9.3, 1.3),
        Fill::translucent(theme.card, 0.6),
        None,
    );
    canvas.add_text_box(
        Bounds::from_inches(0.5, 0.8, 9.0, 1.0),
        vec![
            Paragraph::new(
                clamp_text(&content.title, TITLE_MAX_CHARS).to_uppercase(),
                40.0,
                theme.text_primary,
            )
            .bold(),
        ],
    );
    canvas.add_rect(
        Bounds::new(inches(0.5), inches(1.85), inches(3.5), points(4.0)),
        Fill::solid(theme.accent1),
        None,
    );

    // Bullet panel: translucent bordered card, one point/explanation
    // paragraph pair per bullet.
    canvas.add_rounded_rect(
        Bounds::from_inches(0.35, 2.3, 5.7, 5.2),
        0.08,
        Fill::translucent(theme.card, 0.35),
        Some(Outline {
            color: theme.border,
            width_pt: 1.0,
        }),
    );

    let mut paragraphs = Vec::with_capacity(content.bullets.len() * 2);
    for (i, bullet) in content.bullets.iter().enumerate() {
        let mut point = Paragraph::new(
            format!(
                "{}{}",
                BULLET_MARKER,
                clamp_text(&bullet.point, tier.point_max_chars)
            ),
            tier.point_size_pt,
            theme.accent1,
        )
        .bold()
        .space_after(3.0);
        if i > 0 {
            point = point.space_before(tier.space_before_pt);
        }
        paragraphs.push(point);

        paragraphs.push(
            Paragraph::new(
                clamp_text(&bullet.explanation, tier.explanation_max_chars),
                tier.explanation_size_pt,
                theme.text_secondary,
            )
            .line_spacing(tier.line_spacing),
        );
    }
    canvas.add_text_box(Bounds::from_inches(0.7, 2.6, 5.0, 4.8), paragraphs);

    // Image panel: bordered frame; picture inset when resolution succeeds,
    // empty frame when it fails.
    canvas.add_rounded_rect(
        Bounds::from_inches(6.15, 2.25, 3.6, 4.9),
        0.06,
        Fill::translucent(theme.card, 0.2),
        Some(Outline {
            color: theme.border,
            width_pt: 2.0,
        }),
    );
    if let Some(url) = &content.image_url {
        let picture_bounds = Bounds::from_inches(6.25, 2.35, 3.4, 4.7);
        match resolver.embed(&mut canvas, url, picture_bounds) {
            EmbedOutcome::Embedded => {}
            EmbedOutcome::Skipped(reason) => {
                warn!(
                    "Slide \"{}\": image left out of frame: {}",
                    content.title, reason
                );
            }
        }
    }

    // Footer accent line.
    canvas.add_rect(
        Bounds::new(inches(0.5), inches(7.18), inches(9.0), points(3.0)),
        Fill::translucent(theme.accent1, 0.4),
        None,
    );

    canvas
}
