// ABOUTME: Unit tests for the deckgen engine
// ABOUTME: Covers text clamping, bullet clamping, typography tiers, canvas z-order, and slide builders

use super::*;
use crate::canvas::{Bounds, Fill, Paragraph, ShapeCanvas};
use crate::content::effective_bullet_count;
use std::io::Cursor;

fn png_bytes() -> Vec<u8> {
    let img = image::ImageBuffer::from_fn(8, 8, |_, _| image::Rgb([120u8, 30u8, 200u8]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .expect("Failed to encode test image");
    bytes
}

struct StubFetcher {
    bytes: Vec<u8>,
}

impl ImageFetcher for StubFetcher {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

struct FailingFetcher;

impl ImageFetcher for FailingFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Err(DeckError::ImageError(format!("unreachable: {}", url)))
    }
}

#[test]
fn test_clamp_text_short_unchanged() {
    assert_eq!(clamp_text("hello world", 60), "hello world");
    assert_eq!(clamp_text("", 10), "");
    assert_eq!(clamp_text("exact", 5), "exact");
}

#[test]
fn test_clamp_text_breaks_at_word_boundary() {
    let clamped = clamp_text("the quick brown fox jumps", 12);
    assert_eq!(clamped, "the quick…");
}

#[test]
fn test_clamp_text_never_exceeds_limit_plus_ellipsis() {
    let inputs = [
        "a long sentence with plenty of whitespace to trim back to",
        "supercalifragilisticexpialidocious",
        "short",
        "two  spaced   words  here",
    ];
    for text in inputs {
        for max in [1usize, 5, 10, 20, 60] {
            let clamped = clamp_text(text, max);
            assert!(
                clamped.chars().count() <= max + 1,
                "clamp_text({:?}, {}) produced {:?}",
                text,
                max,
                clamped
            );
        }
    }
}

#[test]
fn test_clamp_text_single_word_hard_cut() {
    let clamped = clamp_text("abcdefghij", 4);
    assert_eq!(clamped, "abcd…");
}

#[test]
fn test_clamp_text_counts_chars_not_bytes() {
    let clamped = clamp_text("ééé ééé ééé", 7);
    assert!(clamped.chars().count() <= 8);
    assert!(clamped.ends_with('…'));
}

#[test]
fn test_effective_bullet_count() {
    assert_eq!(effective_bullet_count(3, 3), 3);
    assert_eq!(effective_bullet_count(5, 5), 4);
    assert_eq!(effective_bullet_count(4, 2), 2);
    assert_eq!(effective_bullet_count(1, 4), 1);
    assert_eq!(effective_bullet_count(0, 3), 0);
}

#[test]
fn test_record_missing_title_is_error() {
    let record = SlideRecord {
        points: vec!["a".to_string()],
        explanation: vec!["b".to_string()],
        ..Default::default()
    };
    assert!(matches!(
        record.validate(),
        Err(DeckError::ValidationError(_))
    ));
}

#[test]
fn test_record_clamps_to_shared_prefix() {
    let record = SlideRecord {
        title: Some("Mismatch".to_string()),
        points: vec!["p1".into(), "p2".into(), "p3".into()],
        explanation: vec!["e1".into(), "e2".into()],
        ..Default::default()
    };
    match record.validate().unwrap() {
        content::ValidatedSlide::Content(content) => {
            assert_eq!(content.bullets.len(), 2);
            assert_eq!(content.bullets[1].point, "p2");
            assert_eq!(content.bullets[1].explanation, "e2");
        }
        _ => panic!("expected content slide"),
    }
}

#[test]
fn test_record_drops_fifth_pair() {
    let record = SlideRecord {
        title: Some("Overfull".to_string()),
        points: (1..=5).map(|i| format!("p{}", i)).collect(),
        explanation: (1..=5).map(|i| format!("e{}", i)).collect(),
        ..Default::default()
    };
    match record.validate().unwrap() {
        content::ValidatedSlide::Content(content) => {
            assert_eq!(content.bullets.len(), 4);
            assert!(!content.bullets.iter().any(|b| b.point == "p5"));
        }
        _ => panic!("expected content slide"),
    }
}

#[test]
fn test_title_record_keeps_optional_fields() {
    let record = SlideRecord {
        is_title_slide: true,
        title: Some("Deck".to_string()),
        subtitle: Some("A subtitle".to_string()),
        author: Some("".to_string()),
        ..Default::default()
    };
    match record.validate().unwrap() {
        content::ValidatedSlide::Title(title) => {
            assert_eq!(title.title, "Deck");
            assert_eq!(title.subtitle.as_deref(), Some("A subtitle"));
            assert!(title.author.is_none(), "blank author should be dropped");
        }
        _ => panic!("expected title slide"),
    }
}

#[test]
fn test_resolve_tier_boundaries() {
    let theme = Theme::elegant();
    let three = theme.resolve_tier(3);
    let four = theme.resolve_tier(4);
    assert_eq!(three.point_size_pt, 26.0);
    assert_eq!(three.explanation_size_pt, 16.0);
    assert_eq!(four.point_size_pt, 21.0);
    assert_eq!(four.explanation_size_pt, 13.0);
    assert!(three.space_before_pt > four.space_before_pt);
    assert!(theme.resolve_tier(1).point_size_pt > three.point_size_pt);
}

#[test]
#[should_panic]
fn test_resolve_tier_rejects_out_of_range() {
    Theme::elegant().resolve_tier(5);
}

#[test]
fn test_theme_presets_share_layout_palette_roles() {
    let elegant = Theme::elegant();
    let flat = Theme::flat();
    assert_eq!(elegant.background, flat.background);
    assert_ne!(elegant.accent2, flat.accent2);
}

#[test]
fn test_canvas_paint_order_and_send_to_back() {
    let mut canvas = ShapeCanvas::new();
    let glow = canvas.add_oval(
        Bounds::from_inches(0.0, 0.0, 2.0, 2.0),
        Fill::translucent(Color::rgb(1, 2, 3), 0.9),
    );
    let bg = canvas.add_rect(
        Bounds::from_inches(0.0, 0.0, 10.0, 7.5),
        Fill::solid(Color::rgb(0, 0, 0)),
        None,
    );
    assert_eq!(canvas.paint_position(bg), Some(1));

    canvas.send_to_back_above_base(bg);
    assert_eq!(canvas.paint_position(bg), Some(0));
    assert_eq!(canvas.paint_position(glow), Some(1));
    assert_eq!(canvas.shape_count(), 2);
}

#[test]
fn test_canvas_text_is_escaped_in_xml() {
    let mut canvas = ShapeCanvas::new();
    canvas.add_text_box(
        Bounds::from_inches(0.5, 0.5, 9.0, 1.0),
        vec![Paragraph::new("Q&A <session>", 20.0, Color::rgb(255, 255, 255))],
    );
    let xml = canvas.to_slide_xml();
    assert!(xml.contains("Q&amp;A &lt;session&gt;"));
    assert!(!xml.contains("Q&A <session>"));
}

#[test]
fn test_canvas_picture_relationships() {
    let mut canvas = ShapeCanvas::new();
    canvas.add_picture(
        Bounds::from_inches(6.25, 2.35, 3.4, 4.7),
        png_bytes(),
        "png",
    );
    let xml = canvas.to_slide_xml();
    assert!(xml.contains(r#"r:embed="rId1""#));

    let rels = canvas.relationships_xml(3).expect("rels for media");
    assert!(rels.contains("../media/image3_1.png"));
    assert!(canvas.relationships_xml(1).is_some());

    let empty = ShapeCanvas::new();
    assert!(empty.relationships_xml(1).is_none());
}

#[test]
fn test_content_slide_contains_clamped_upper_title_and_bullets() {
    let content = SlideContent {
        title: "Intro".to_string(),
        bullets: vec![
            BulletItem {
                point: "First point".to_string(),
                explanation: "First explanation".to_string(),
            },
            BulletItem {
                point: "Second point".to_string(),
                explanation: "Second explanation".to_string(),
            },
        ],
        image_url: None,
    };
    let theme = Theme::elegant();
    let tier = theme.resolve_tier(content.bullets.len());
    let resolver = ImageAssetResolver::new(Box::new(FailingFetcher));

    let slide = build_content_slide(&content, &theme, tier, &resolver);
    let xml = slide.to_slide_xml();
    assert!(xml.contains("INTRO"));
    assert!(xml.contains("◆ First point"));
    assert!(xml.contains("Second explanation"));
    assert!(slide.media().is_empty());
}

#[test]
fn test_content_slide_embeds_image_when_fetch_succeeds() {
    let content = SlideContent {
        title: "Picture".to_string(),
        bullets: vec![BulletItem {
            point: "p".to_string(),
            explanation: "e".to_string(),
        }],
        image_url: Some("http://example.test/photo.png".to_string()),
    };
    let theme = Theme::elegant();
    let tier = theme.resolve_tier(1);
    let resolver = ImageAssetResolver::new(Box::new(StubFetcher { bytes: png_bytes() }));

    let slide = build_content_slide(&content, &theme, tier, &resolver);
    assert_eq!(slide.media().len(), 1);
    assert_eq!(slide.media()[0].extension, "png");
}

#[test]
fn test_content_slide_survives_image_failure() {
    let content = SlideContent {
        title: "Degraded".to_string(),
        bullets: vec![BulletItem {
            point: "p".to_string(),
            explanation: "e".to_string(),
        }],
        image_url: Some("http://example.test/missing.jpg".to_string()),
    };
    let theme = Theme::elegant();
    let tier = theme.resolve_tier(1);

    let failing = ImageAssetResolver::new(Box::new(FailingFetcher));
    let degraded = build_content_slide(&content, &theme, tier, &failing);
    assert!(degraded.media().is_empty());

    let working = ImageAssetResolver::new(Box::new(StubFetcher { bytes: png_bytes() }));
    let control = build_content_slide(&content, &theme, tier, &working);
    // Same shapes either way, except the picture itself.
    assert_eq!(degraded.shape_count() + 1, control.shape_count());
}

#[test]
fn test_embed_rejects_undecodable_bytes() {
    let resolver = ImageAssetResolver::new(Box::new(StubFetcher {
        bytes: b"not an image at all".to_vec(),
    }));
    let mut canvas = ShapeCanvas::new();
    let outcome = resolver.embed(
        &mut canvas,
        "http://example.test/garbage.bin",
        Bounds::from_inches(0.0, 0.0, 1.0, 1.0),
    );
    assert!(!outcome.is_embedded());
    assert!(canvas.media().is_empty());
}

#[test]
fn test_title_slide_optional_fields() {
    let theme = Theme::elegant();
    let bare = build_title_slide(
        &TitleSlideContent {
            title: "Only Title".to_string(),
            subtitle: None,
            author: None,
        },
        &theme,
    );
    let full = build_title_slide(
        &TitleSlideContent {
            title: "Full Title".to_string(),
            subtitle: Some("With subtitle".to_string()),
            author: Some("An Author".to_string()),
        },
        &theme,
    );
    assert_eq!(bare.shape_count() + 2, full.shape_count());
    assert!(full.to_slide_xml().contains("With subtitle"));
    assert!(full.to_slide_xml().contains("An Author"));
    assert!(bare.to_slide_xml().contains("ONLY TITLE"));
}

#[test]
fn test_parse_records_rejects_empty_input() {
    assert!(parse_records("[]").is_err());
    let records = parse_records(r#"[{"title":"A","points":["p"],"explanation":["e"]}]"#).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title.as_deref(), Some("A"));
}
