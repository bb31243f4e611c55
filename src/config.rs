// ABOUTME: Configuration module for the deckgen engine
// ABOUTME: Provides default settings and environment variable handling

use crate::assets::{HttpImageFetcher, ImageAssetResolver};
use crate::errors::Result;
use crate::pptx::AssemblerOptions;
use crate::theme::ThemePreset;
use std::env;
use std::time::Duration;

/// Global configuration for the engine
pub struct Config {
    pub fetch_timeout_ms: u64,
    pub theme: ThemePreset,
    pub document_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 10000, // 10 seconds per image fetch
            theme: ThemePreset::Elegant,
            document_title: "Presentation".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let fetch_timeout_ms = env::var("FETCH_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10000);

        let theme = env::var("DECK_THEME")
            .ok()
            .and_then(|s| s.parse::<ThemePreset>().ok())
            .unwrap_or(ThemePreset::Elegant);

        let document_title =
            env::var("DECK_TITLE").unwrap_or_else(|_| "Presentation".to_string());

        Self {
            fetch_timeout_ms,
            theme,
            document_title,
        }
    }

    /// Get assembler options with defaults from this config
    pub fn get_assembler_options(
        &self,
        title: Option<String>,
        theme: Option<ThemePreset>,
    ) -> AssemblerOptions {
        AssemblerOptions {
            title: title.unwrap_or_else(|| self.document_title.clone()),
            theme: theme.unwrap_or(self.theme),
        }
    }

    /// Build the HTTP-backed image resolver with this config's timeout
    pub fn build_image_resolver(&self) -> Result<ImageAssetResolver> {
        let fetcher = HttpImageFetcher::new(Duration::from_millis(self.fetch_timeout_ms))?;
        Ok(ImageAssetResolver::new(Box::new(fetcher)))
    }
}
