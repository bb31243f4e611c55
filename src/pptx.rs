// ABOUTME: PPTX document assembly for the deckgen engine
// ABOUTME: Sequences slide builders and serializes rendered slides into the zip-based package

use crate::assets::ImageAssetResolver;
use crate::canvas::{RenderedSlide, media_file_name};
use crate::content::{SlideRecord, ValidatedSlide};
use crate::errors::{DeckError, Result};
use crate::slides::{build_content_slide, build_title_slide};
use crate::theme::{Theme, ThemePreset};
use crate::utils::ensure_parent_directory_exists;
use log::info;
use quick_xml::escape::escape;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::{ZipWriter, write::FileOptions};

/// Media type of the produced artifact.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Default download file name for a generated presentation.
pub const DEFAULT_DOWNLOAD_NAME: &str = "download_presentation.pptx";

/// Fixed canvas: 10 x 7.5 inches, the 4:3 screen size of the target format.
pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// Options for one assembly run.
pub struct AssemblerOptions {
    /// Document title written to docProps/core.xml.
    pub title: String,
    pub theme: ThemePreset,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            theme: ThemePreset::Elegant,
        }
    }
}

/// Owns one output package for one request.
///
/// Slides are built and appended strictly in input order; no document state
/// survives past [`DocumentAssembler::assemble`].
pub struct DocumentAssembler {
    theme: Theme,
    resolver: ImageAssetResolver,
    options: AssemblerOptions,
}

impl DocumentAssembler {
    pub fn new(options: AssemblerOptions, resolver: ImageAssetResolver) -> Self {
        Self {
            theme: Theme::preset(options.theme),
            resolver,
            options,
        }
    }

    /// Assemble the input records into a finished `.pptx` byte stream.
    ///
    /// A leading title-flagged record is consumed by the title builder; every
    /// remaining record feeds the content builder in order. Validation and
    /// serialization failures abort the whole run with no partial artifact.
    pub fn assemble(&self, records: &[SlideRecord]) -> Result<Vec<u8>> {
        if records.is_empty() {
            return Err(DeckError::ValidationError(
                "presentation input contains no slide records".to_string(),
            ));
        }

        let mut slides: Vec<RenderedSlide> = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if record.is_title_slide && i > 0 {
                return Err(DeckError::ValidationError(format!(
                    "title-flagged record at position {} is only valid as the first element",
                    i
                )));
            }

            match record.validate()? {
                ValidatedSlide::Title(title) => {
                    info!("Building title slide: {}", title.title);
                    slides.push(build_title_slide(&title, &self.theme));
                }
                ValidatedSlide::Content(content) => {
                    info!("Building content slide: {}", content.title);
                    let tier = self.theme.resolve_tier(content.bullets.len());
                    slides.push(build_content_slide(
                        &content,
                        &self.theme,
                        tier,
                        &self.resolver,
                    ));
                }
            }
        }

        self.write_package(&slides)
    }

    /// Assemble and write the artifact to `path`.
    pub fn assemble_to_file(&self, records: &[SlideRecord], path: &Path) -> Result<()> {
        let bytes = self.assemble(records)?;
        ensure_parent_directory_exists(path)?;
        fs::write(path, bytes).map_err(DeckError::FileReadError)?;
        info!("PPTX file created at {:?}", path);
        Ok(())
    }

    fn write_package(&self, slides: &[RenderedSlide]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        // Add [Content_Types].xml
        info!("Creating PPTX structure: [Content_Types].xml");
        zip.start_file("[Content_Types].xml", FileOptions::default())?;
        zip.write_all(self.content_types_xml(slides).as_bytes())?;

        // Add _rels/.rels
        info!("Creating PPTX structure: _rels/.rels");
        zip.start_file("_rels/.rels", FileOptions::default())?;
        let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;
        zip.write_all(rels.as_bytes())?;

        // Add docProps/app.xml
        info!("Creating PPTX structure: docProps/app.xml");
        zip.start_file("docProps/app.xml", FileOptions::default())?;
        let app_xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>deckgen</Application>
    <Slides>{}</Slides>
</Properties>"#,
            slides.len()
        );
        zip.write_all(app_xml.as_bytes())?;

        // Add docProps/core.xml
        info!("Creating PPTX structure: docProps/core.xml");
        zip.start_file("docProps/core.xml", FileOptions::default())?;
        let core_xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>{}</dc:title>
    <dc:creator>deckgen</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
    <cp:revision>1</cp:revision>
</cp:coreProperties>"#,
            escape(&self.options.title),
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
        );
        zip.write_all(core_xml.as_bytes())?;

        // Add ppt/_rels/presentation.xml.rels
        info!("Creating PPTX structure: ppt/_rels/presentation.xml.rels");
        zip.start_file("ppt/_rels/presentation.xml.rels", FileOptions::default())?;
        let mut pres_rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
        );
        for i in 0..slides.len() {
            pres_rels.push_str(&format!(
                r#"    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 1,
                i + 1
            ));
            pres_rels.push('\n');
        }
        pres_rels.push_str("</Relationships>");
        zip.write_all(pres_rels.as_bytes())?;

        // Add ppt/presentation.xml
        info!("Creating PPTX structure: ppt/presentation.xml");
        zip.start_file("ppt/presentation.xml", FileOptions::default())?;
        let presentation_xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:sldIdLst>
{slide_ids}
    </p:sldIdLst>
    <p:sldSz cx="{cx}" cy="{cy}" type="screen4x3"/>
    <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#,
            slide_ids = (0..slides.len())
                .map(|i| format!(r#"        <p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 1))
                .collect::<Vec<String>>()
                .join("\n"),
            cx = SLIDE_WIDTH_EMU,
            cy = SLIDE_HEIGHT_EMU
        );
        zip.write_all(presentation_xml.as_bytes())?;

        // Process each slide
        for (i, slide) in slides.iter().enumerate() {
            let slide_num = i + 1;

            for (j, asset) in slide.media().iter().enumerate() {
                let name = media_file_name(slide_num, j, &asset.extension);
                info!("Adding image to PPTX: ppt/media/{}", name);
                zip.start_file(format!("ppt/media/{}", name), FileOptions::default())?;
                zip.write_all(&asset.bytes)?;
            }

            if let Some(slide_rels) = slide.relationships_xml(slide_num) {
                info!(
                    "Creating slide relationships: ppt/slides/_rels/slide{}.xml.rels",
                    slide_num
                );
                zip.start_file(
                    format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
                    FileOptions::default(),
                )?;
                zip.write_all(slide_rels.as_bytes())?;
            }

            info!("Creating slide XML: ppt/slides/slide{}.xml", slide_num);
            zip.start_file(
                format!("ppt/slides/slide{}.xml", slide_num),
                FileOptions::default(),
            )?;
            zip.write_all(slide.to_slide_xml().as_bytes())?;
        }

        // Finalize the ZIP file
        info!("Finalizing PPTX package");
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self, slides: &[RenderedSlide]) -> String {
        // Image extensions beyond the standard three need their own Default.
        let mut extra_defaults = String::new();
        let mut seen: Vec<&str> = Vec::new();
        for slide in slides {
            for asset in slide.media() {
                let ext = asset.extension.as_str();
                if matches!(ext, "xml" | "rels" | "jpeg" | "jpg" | "png") || seen.contains(&ext) {
                    continue;
                }
                seen.push(ext);
                extra_defaults.push_str(&format!(
                    r#"    <Default Extension="{}" ContentType="{}"/>"#,
                    ext,
                    image_content_type(ext)
                ));
                extra_defaults.push('\n');
            }
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="jpeg" ContentType="image/jpeg"/>
    <Default Extension="jpg" ContentType="image/jpeg"/>
    <Default Extension="png" ContentType="image/png"/>
{extra}    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
    {slides}
</Types>"#,
            extra = extra_defaults,
            slides = (0..slides.len()).map(|i| {
                format!(r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#, i + 1)
            }).collect::<Vec<String>>().join("\n    ")
        )
    }
}

fn image_content_type(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}
