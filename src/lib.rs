// ABOUTME: Library module for the deckgen engine.
// ABOUTME: Contains core functionality for laying out and assembling PPTX presentations.

// Reexport modules
pub mod assets;
pub mod canvas;
pub mod config;
pub mod content;
pub mod errors;
pub mod pptx;
pub mod slides;
pub mod theme;
pub mod utils;

// Reexport common types and functions
pub use assets::{EmbedOutcome, HttpImageFetcher, ImageAssetResolver, ImageFetcher};
pub use canvas::{Align, Bounds, Fill, Outline, Paragraph, RenderedSlide, ShapeCanvas};
pub use config::Config;
pub use content::{BulletItem, SlideContent, SlideRecord, TitleSlideContent, parse_records};
pub use errors::{DeckError, Result};
pub use pptx::{
    AssemblerOptions, DEFAULT_DOWNLOAD_NAME, DocumentAssembler, PPTX_CONTENT_TYPE,
};
pub use slides::{build_content_slide, build_title_slide};
pub use theme::{Color, Theme, ThemePreset, TypographyTier};
pub use utils::clamp_text;

#[cfg(test)]
mod tests;
