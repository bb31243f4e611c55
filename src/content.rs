// ABOUTME: Input data model for the deckgen engine
// ABOUTME: Deserializes slide records and validates them into typed slide content

use crate::errors::{DeckError, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of bullet pairs rendered on a content slide.
pub const MAX_BULLETS: usize = 4;

/// One slide record as supplied by the content collaborator.
///
/// This is the wire shape: a single loosely-typed object that covers both
/// title-flagged records and content records. Validation into the typed
/// [`SlideContent`] / [`TitleSlideContent`] forms happens in
/// [`SlideRecord::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideRecord {
    #[serde(default)]
    pub is_title_slide: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub explanation: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// A point line and its explanation, rendered as one pair in the bullet panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletItem {
    pub point: String,
    pub explanation: String,
}

/// Validated content for a regular slide. Bullet count is 1..=4 after clamping.
#[derive(Debug, Clone)]
pub struct SlideContent {
    pub title: String,
    pub bullets: Vec<BulletItem>,
    pub image_url: Option<String>,
}

/// Validated content for the optional leading title slide.
#[derive(Debug, Clone)]
pub struct TitleSlideContent {
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
}

/// A record after validation, dispatched to the matching slide builder.
#[derive(Debug, Clone)]
pub enum ValidatedSlide {
    Title(TitleSlideContent),
    Content(SlideContent),
}

impl SlideRecord {
    /// Validate this record into its typed form.
    ///
    /// A record without a title is structurally invalid and fails the whole
    /// request. Points and explanations are paired positionally; when the
    /// lists differ in length only the shared prefix is kept, and anything
    /// beyond the fourth pair is silently dropped.
    pub fn validate(&self) -> Result<ValidatedSlide> {
        let title = match &self.title {
            Some(t) if !t.trim().is_empty() => t.clone(),
            _ => {
                return Err(DeckError::ValidationError(
                    "slide record is missing a title".to_string(),
                ));
            }
        };

        if self.is_title_slide {
            return Ok(ValidatedSlide::Title(TitleSlideContent {
                title,
                subtitle: self.subtitle.clone().filter(|s| !s.trim().is_empty()),
                author: self.author.clone().filter(|s| !s.trim().is_empty()),
            }));
        }

        let count = effective_bullet_count(self.points.len(), self.explanation.len());
        if count == 0 {
            return Err(DeckError::ValidationError(format!(
                "slide \"{}\" has no usable bullet pairs",
                title
            )));
        }

        let bullets = self
            .points
            .iter()
            .zip(self.explanation.iter())
            .take(count)
            .map(|(point, explanation)| BulletItem {
                point: point.clone(),
                explanation: explanation.clone(),
            })
            .collect();

        Ok(ValidatedSlide::Content(SlideContent {
            title,
            bullets,
            image_url: self.image.clone().filter(|s| !s.trim().is_empty()),
        }))
    }
}

/// Number of bullet pairs actually rendered: the shared prefix of points and
/// explanations, capped at [`MAX_BULLETS`].
pub fn effective_bullet_count(points: usize, explanations: usize) -> usize {
    points.min(explanations).min(MAX_BULLETS)
}

/// Parse a whole-presentation input (a JSON array of slide records).
pub fn parse_records(json: &str) -> Result<Vec<SlideRecord>> {
    let records: Vec<SlideRecord> = serde_json::from_str(json)?;
    if records.is_empty() {
        return Err(DeckError::ValidationError(
            "presentation input contains no slide records".to_string(),
        ));
    }
    Ok(records)
}
