// ABOUTME: Image asset resolution for the deckgen engine
// ABOUTME: Fetches remote image bytes, stages them as a transient file, and embeds them on a canvas

use crate::canvas::{Bounds, ShapeCanvas};
use crate::errors::{DeckError, Result};
use image::io::Reader as ImageReader;
use log::info;
use reqwest::blocking::Client;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Seam for fetching raw image bytes. The production implementation is
/// [`HttpImageFetcher`]; tests substitute stubs.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher with a hard per-request timeout.
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DeckError::FetchError)?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        info!("Fetching image: {}", url);
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(DeckError::ImageError(format!(
                "HTTP error fetching {}: {}",
                url,
                response.status()
            )));
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Result of one embedding attempt. Failures are contained: the slide keeps
/// its empty image frame and assembly continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedOutcome {
    Embedded,
    Skipped(String),
}

impl EmbedOutcome {
    pub fn is_embedded(&self) -> bool {
        matches!(self, EmbedOutcome::Embedded)
    }
}

/// Resolves an image URL into an embedded picture on a canvas.
///
/// Fetched bytes are staged as a named temporary file for validation; the
/// file's lifetime is bound to the embedding call and it is deleted on every
/// exit path, success or failure.
pub struct ImageAssetResolver {
    fetcher: Box<dyn ImageFetcher>,
    scratch_dir: Option<PathBuf>,
}

impl ImageAssetResolver {
    pub fn new(fetcher: Box<dyn ImageFetcher>) -> Self {
        Self {
            fetcher,
            scratch_dir: None,
        }
    }

    /// Stage transient files under `dir` instead of the system temp
    /// directory. Useful for verifying that no staged file outlives a call.
    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = Some(dir);
        self
    }

    /// Fetch `url` and place the picture inside `bounds` on `canvas`.
    ///
    /// Never propagates an error: network, timeout, and decode failures all
    /// collapse into [`EmbedOutcome::Skipped`] with the reason, for the
    /// caller to log.
    pub fn embed(&self, canvas: &mut ShapeCanvas, url: &str, bounds: Bounds) -> EmbedOutcome {
        match self.try_embed(canvas, url, bounds) {
            Ok(()) => EmbedOutcome::Embedded,
            Err(e) => EmbedOutcome::Skipped(e.to_string()),
        }
    }

    fn try_embed(&self, canvas: &mut ShapeCanvas, url: &str, bounds: Bounds) -> Result<()> {
        let bytes = self.fetcher.fetch(url)?;

        // Stage to a transient file; the handle deletes it when this
        // function returns, whether embedding succeeded or not.
        let mut builder = tempfile::Builder::new();
        builder.prefix("deckgen-img-");
        let mut staged = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(DeckError::FileReadError)?;
        staged
            .write_all(&bytes)
            .map_err(DeckError::FileReadError)?;
        staged.flush().map_err(DeckError::FileReadError)?;

        // Decode from the staged file to reject corrupt payloads before they
        // reach the package.
        let reader = ImageReader::open(staged.path())
            .map_err(DeckError::FileReadError)?
            .with_guessed_format()
            .map_err(DeckError::FileReadError)?;
        let format = reader
            .format()
            .ok_or_else(|| DeckError::ImageError(format!("unrecognized image format: {}", url)))?;
        reader.decode()?;

        let extension = format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("jpg");

        canvas.add_picture(bounds, bytes, extension);
        info!("Embedded image from {} as {}", url, extension);
        Ok(())
    }
}
