// ABOUTME: Integration tests for document assembly
// ABOUTME: Verifies package structure, slide ordering, and failure containment via ZipArchive

use deckgen::{
    AssemblerOptions, DeckError, DocumentAssembler, ImageAssetResolver, ImageFetcher, Result,
    SlideRecord,
};
use std::io::{Cursor, Read};
use zip::ZipArchive;

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

fn png_bytes() -> Vec<u8> {
    let img = image::ImageBuffer::from_fn(16, 16, |x, y| {
        image::Rgb([(x * 16) as u8, (y * 16) as u8, 128u8])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .expect("Failed to encode test image");
    bytes
}

fn content_record(title: &str, pairs: usize, image: Option<&str>) -> SlideRecord {
    SlideRecord {
        title: Some(title.to_string()),
        points: (1..=pairs).map(|i| format!("{} point {}", title, i)).collect(),
        explanation: (1..=pairs)
            .map(|i| format!("{} explanation {}", title, i))
            .collect(),
        image: image.map(|s| s.to_string()),
        ..Default::default()
    }
}

fn failing_assembler() -> DocumentAssembler {
    DocumentAssembler::new(
        AssemblerOptions::default(),
        ImageAssetResolver::new(Box::new(FailingFetcher)),
    )
}

fn working_assembler() -> DocumentAssembler {
    DocumentAssembler::new(
        AssemblerOptions::default(),
        ImageAssetResolver::new(Box::new(StubFetcher { bytes: png_bytes() })),
    )
}

fn slide_xml_parts(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).expect("valid zip");
    let names: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .filter(|name| {
            name.starts_with("ppt/slides/slide") && name.ends_with(".xml")
        })
        .collect();

    let mut parts = Vec::new();
    let mut sorted = names.clone();
    sorted.sort();
    for name in sorted {
        let mut content = String::new();
        archive
            .by_name(&name)
            .expect("slide part")
            .read_to_string(&mut content)
            .expect("read slide part");
        parts.push((name, content));
    }
    parts
}

#[test]
fn test_title_flag_consumes_first_record() {
    let records = vec![
        SlideRecord {
            is_title_slide: true,
            title: Some("A".to_string()),
            ..Default::default()
        },
        content_record("B", 2, None),
    ];

    let bytes = failing_assembler().assemble(&records).expect("assembly");
    let parts = slide_xml_parts(&bytes);
    assert_eq!(parts.len(), 2, "one title slide plus one content slide");

    let (ref first_name, ref first_xml) = parts[0];
    assert_eq!(first_name, "ppt/slides/slide1.xml");
    assert!(first_xml.contains("<a:t>A</a:t>"));
    // Title slides carry no bullet marker.
    assert!(!first_xml.contains("◆"));

    let (_, ref second_xml) = parts[1];
    assert!(second_xml.contains("<a:t>B</a:t>"));
    assert!(second_xml.contains("◆ B point 1"));
}

#[test]
fn test_title_flag_rejected_after_first_position() {
    let records = vec![
        content_record("B", 2, None),
        SlideRecord {
            is_title_slide: true,
            title: Some("Late".to_string()),
            ..Default::default()
        },
    ];
    assert!(matches!(
        failing_assembler().assemble(&records),
        Err(DeckError::ValidationError(_))
    ));
}

#[test]
fn test_slide_order_matches_input_order() {
    let records = vec![
        content_record("First", 1, None),
        content_record("Second", 2, None),
        content_record("Third", 3, None),
    ];
    let bytes = failing_assembler().assemble(&records).expect("assembly");
    let parts = slide_xml_parts(&bytes);
    assert_eq!(parts.len(), 3);
    assert!(parts[0].1.contains("FIRST"));
    assert!(parts[1].1.contains("SECOND"));
    assert!(parts[2].1.contains("THIRD"));
}

#[test]
fn test_assembly_is_idempotent() {
    let records = vec![
        content_record("Stable", 3, Some("http://img.test/a.png")),
        content_record("Deck", 2, None),
    ];

    let first = working_assembler().assemble(&records).expect("assembly");
    let second = working_assembler().assemble(&records).expect("assembly");

    // Slide parts must match exactly; package metadata carries a timestamp,
    // so the comparison is per slide rather than whole-archive.
    assert_eq!(slide_xml_parts(&first), slide_xml_parts(&second));
}

#[test]
fn test_image_failure_does_not_change_slide_count() {
    let records = vec![
        content_record("One", 2, Some("http://img.test/a.png")),
        content_record("Two", 2, Some("http://img.test/b.png")),
    ];

    let control = working_assembler().assemble(&records).expect("assembly");
    let degraded = failing_assembler().assemble(&records).expect("assembly");

    assert_eq!(slide_xml_parts(&control).len(), slide_xml_parts(&degraded).len());

    let mut archive = ZipArchive::new(Cursor::new(degraded)).expect("valid zip");
    let media: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .filter(|name| name.starts_with("ppt/media/"))
        .collect();
    assert!(media.is_empty(), "degraded run should embed no media");
}

#[test]
fn test_missing_title_aborts_whole_request() {
    let records = vec![
        content_record("Good", 2, None),
        SlideRecord {
            points: vec!["p".to_string()],
            explanation: vec!["e".to_string()],
            ..Default::default()
        },
    ];
    assert!(matches!(
        failing_assembler().assemble(&records),
        Err(DeckError::ValidationError(_))
    ));
}

#[test]
fn test_package_structure_parts_present() {
    let records = vec![content_record("Structure", 2, Some("http://img.test/x.png"))];
    let bytes = working_assembler().assemble(&records).expect("assembly");

    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/app.xml",
        "docProps/core.xml",
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/slides/slide1.xml",
        "ppt/slides/_rels/slide1.xml.rels",
        "ppt/media/image1_1.png",
    ] {
        assert!(archive.by_name(part).is_ok(), "missing package part {}", part);
    }

    let mut presentation = String::new();
    archive
        .by_name("ppt/presentation.xml")
        .unwrap()
        .read_to_string(&mut presentation)
        .unwrap();
    assert!(presentation.contains(r#"cx="9144000" cy="6858000""#));
}
