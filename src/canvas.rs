// ABOUTME: Drawable-surface abstraction for a single slide
// ABOUTME: Collects shapes in paint order and serializes them to DrawingML

use crate::theme::Color;
use quick_xml::escape::escape;

/// English Metric Units per inch, the native unit of OOXML geometry.
pub const EMU_PER_INCH: i64 = 914_400;
/// English Metric Units per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

pub fn points(value: f64) -> i64 {
    (value * EMU_PER_POINT as f64).round() as i64
}

/// Position and extent of a shape in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Bounds {
    pub fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    pub fn from_inches(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(inches(x), inches(y), inches(w), inches(h))
    }
}

/// Stable handle for a shape on one canvas, independent of paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeId(u32);

/// Solid fill with optional transparency (0.0 opaque .. 1.0 invisible).
#[derive(Debug, Clone, Copy)]
pub struct Fill {
    pub color: Color,
    pub transparency: f64,
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            transparency: 0.0,
        }
    }

    pub fn translucent(color: Color, transparency: f64) -> Self {
        Self {
            color,
            transparency,
        }
    }
}

/// Solid outline stroke.
#[derive(Debug, Clone, Copy)]
pub struct Outline {
    pub color: Color,
    pub width_pt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn attr(&self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

/// One independently styled paragraph inside a text box.
#[derive(Debug, Clone)]
pub struct Paragraph {
    pub text: String,
    pub size_pt: f32,
    pub bold: bool,
    pub color: Color,
    pub align: Align,
    pub line_spacing: Option<f32>,
    pub space_before_pt: Option<f32>,
    pub space_after_pt: Option<f32>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, size_pt: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            size_pt,
            bold: false,
            color,
            align: Align::Left,
            line_spacing: None,
            space_before_pt: None,
            space_after_pt: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = Some(spacing);
        self
    }

    pub fn space_before(mut self, pt: f32) -> Self {
        self.space_before_pt = Some(pt);
        self
    }

    pub fn space_after(mut self, pt: f32) -> Self {
        self.space_after_pt = Some(pt);
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Geometry {
    Rect,
    /// Corner radius as a fraction of the shorter side (0.0..=0.5).
    RoundedRect(f64),
    Oval,
}

#[derive(Debug, Clone)]
enum ShapeKind {
    Auto {
        geometry: Geometry,
        fill: Option<Fill>,
        outline: Option<Outline>,
    },
    TextBox {
        paragraphs: Vec<Paragraph>,
    },
    Picture {
        media_index: usize,
    },
}

#[derive(Debug, Clone)]
struct Shape {
    id: ShapeId,
    bounds: Bounds,
    kind: ShapeKind,
}

/// Image bytes destined for the package's media directory.
#[derive(Debug, Clone)]
pub struct MediaAsset {
    pub bytes: Vec<u8>,
    pub extension: String,
}

/// Ordered drawing surface for one slide.
///
/// Shapes paint back-to-front in insertion order;
/// [`ShapeCanvas::send_to_back_above_base`] is the only way to reorder after
/// insertion. The canvas is exclusively owned by one slide builder during
/// construction and never mutated after hand-off to the assembler.
#[derive(Debug)]
pub struct ShapeCanvas {
    shapes: Vec<Shape>,
    media: Vec<MediaAsset>,
    next_id: u32,
}

impl ShapeCanvas {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            media: Vec::new(),
            // Drawing object id 1 belongs to the slide's group shape.
            next_id: 2,
        }
    }

    fn push(&mut self, bounds: Bounds, kind: ShapeKind) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.push(Shape { id, bounds, kind });
        id
    }

    /// Add a filled rectangle.
    pub fn add_rect(&mut self, bounds: Bounds, fill: Fill, outline: Option<Outline>) -> ShapeId {
        self.push(
            bounds,
            ShapeKind::Auto {
                geometry: Geometry::Rect,
                fill: Some(fill),
                outline,
            },
        )
    }

    /// Add a filled oval.
    pub fn add_oval(&mut self, bounds: Bounds, fill: Fill) -> ShapeId {
        self.push(
            bounds,
            ShapeKind::Auto {
                geometry: Geometry::Oval,
                fill: Some(fill),
                outline: None,
            },
        )
    }

    /// Add a rounded rectangle with the given corner radius fraction.
    pub fn add_rounded_rect(
        &mut self,
        bounds: Bounds,
        corner_radius: f64,
        fill: Fill,
        outline: Option<Outline>,
    ) -> ShapeId {
        self.push(
            bounds,
            ShapeKind::Auto {
                geometry: Geometry::RoundedRect(corner_radius),
                fill: Some(fill),
                outline,
            },
        )
    }

    /// Add a word-wrapping text box holding the given paragraphs.
    pub fn add_text_box(&mut self, bounds: Bounds, paragraphs: Vec<Paragraph>) -> ShapeId {
        self.push(bounds, ShapeKind::TextBox { paragraphs })
    }

    /// Add a picture from raw image bytes. The bytes become a media asset of
    /// the package; `extension` selects its content type (`jpeg`, `png`, ...).
    pub fn add_picture(&mut self, bounds: Bounds, bytes: Vec<u8>, extension: &str) -> ShapeId {
        let media_index = self.media.len();
        self.media.push(MediaAsset {
            bytes,
            extension: extension.to_string(),
        });
        self.push(bounds, ShapeKind::Picture { media_index })
    }

    /// Move a shape to the bottom of the paint order, directly above the
    /// slide's base group layer. A background sent here stays behind all
    /// decoration painted after it.
    pub fn send_to_back_above_base(&mut self, id: ShapeId) {
        if let Some(pos) = self.shapes.iter().position(|s| s.id == id) {
            let shape = self.shapes.remove(pos);
            self.shapes.insert(0, shape);
        }
    }

    /// Number of shapes currently on the canvas.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Media assets referenced by pictures on this canvas, in rId order.
    pub fn media(&self) -> &[MediaAsset] {
        &self.media
    }

    /// Paint-order position of a shape, back (0) to front.
    pub fn paint_position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// Serialize this canvas to a complete `p:sld` part.
    pub fn to_slide_xml(&self) -> String {
        let mut tree = String::new();
        for shape in &self.shapes {
            tree.push_str(&shape.to_xml());
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr>
                <a:xfrm>
                    <a:off x="0" y="0"/>
                    <a:ext cx="0" cy="0"/>
                    <a:chOff x="0" y="0"/>
                    <a:chExt cx="0" cy="0"/>
                </a:xfrm>
            </p:grpSpPr>
{tree}        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:sld>"#,
            tree = tree
        )
    }

    /// Relationship part for this slide, or None when it references no media.
    /// `slide_num` scopes media file names so slides never collide inside
    /// `ppt/media`.
    pub fn relationships_xml(&self, slide_num: usize) -> Option<String> {
        if self.media.is_empty() {
            return None;
        }

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
        );
        for (i, asset) in self.media.iter().enumerate() {
            rels.push_str(&format!(
                r#"    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{}"/>"#,
                i + 1,
                media_file_name(slide_num, i, &asset.extension),
            ));
            rels.push('\n');
        }
        rels.push_str("</Relationships>");
        Some(rels)
    }
}

/// A finalized canvas handed off to the document assembler. Never mutated
/// after hand-off.
pub type RenderedSlide = ShapeCanvas;

/// File name of a canvas media asset inside `ppt/media`.
pub fn media_file_name(slide_num: usize, index: usize, extension: &str) -> String {
    format!("image{}_{}.{}", slide_num, index + 1, extension)
}

fn fill_xml(fill: &Fill) -> String {
    let alpha = ((1.0 - fill.transparency) * 100_000.0).round() as i64;
    if alpha >= 100_000 {
        format!(
            "<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>",
            fill.color.hex()
        )
    } else {
        format!(
            "<a:solidFill><a:srgbClr val=\"{}\"><a:alpha val=\"{}\"/></a:srgbClr></a:solidFill>",
            fill.color.hex(),
            alpha.max(0)
        )
    }
}

fn outline_xml(outline: &Option<Outline>) -> String {
    match outline {
        Some(line) => format!(
            "<a:ln w=\"{}\"><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill></a:ln>",
            points(line.width_pt),
            line.color.hex()
        ),
        None => "<a:ln><a:noFill/></a:ln>".to_string(),
    }
}

fn geometry_xml(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Rect => "<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>".to_string(),
        Geometry::Oval => "<a:prstGeom prst=\"ellipse\"><a:avLst/></a:prstGeom>".to_string(),
        Geometry::RoundedRect(radius) => {
            let adj = (radius.clamp(0.0, 0.5) * 100_000.0).round() as i64;
            format!(
                "<a:prstGeom prst=\"roundRect\"><a:avLst><a:gd name=\"adj\" fmla=\"val {}\"/></a:avLst></a:prstGeom>",
                adj
            )
        }
    }
}

fn xfrm_xml(bounds: &Bounds) -> String {
    format!(
        "<a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>",
        bounds.x, bounds.y, bounds.cx, bounds.cy
    )
}

fn paragraph_xml(para: &Paragraph) -> String {
    let mut ppr_children = String::new();
    if let Some(spacing) = para.line_spacing {
        ppr_children.push_str(&format!(
            "<a:lnSpc><a:spcPct val=\"{}\"/></a:lnSpc>",
            (spacing * 100_000.0).round() as i64
        ));
    }
    if let Some(before) = para.space_before_pt {
        ppr_children.push_str(&format!(
            "<a:spcBef><a:spcPts val=\"{}\"/></a:spcBef>",
            (before * 100.0).round() as i64
        ));
    }
    if let Some(after) = para.space_after_pt {
        ppr_children.push_str(&format!(
            "<a:spcAft><a:spcPts val=\"{}\"/></a:spcAft>",
            (after * 100.0).round() as i64
        ));
    }

    let bold = if para.bold { " b=\"1\"" } else { "" };
    format!(
        concat!(
            "<a:p><a:pPr algn=\"{algn}\">{ppr}</a:pPr>",
            "<a:r><a:rPr lang=\"en-US\" sz=\"{sz}\"{bold}>",
            "<a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill>",
            "</a:rPr><a:t>{text}</a:t></a:r></a:p>"
        ),
        algn = para.align.attr(),
        ppr = ppr_children,
        sz = (para.size_pt * 100.0).round() as i64,
        bold = bold,
        color = para.color.hex(),
        text = escape(&para.text),
    )
}

impl Shape {
    fn to_xml(&self) -> String {
        match &self.kind {
            ShapeKind::Auto {
                geometry,
                fill,
                outline,
            } => {
                let fill_part = fill.as_ref().map(fill_xml).unwrap_or_default();
                format!(
                    concat!(
                        "            <p:sp>\n",
                        "                <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Shape {id}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\n",
                        "                <p:spPr>{xfrm}{geom}{fill}{line}</p:spPr>\n",
                        "            </p:sp>\n"
                    ),
                    id = self.id.0,
                    xfrm = xfrm_xml(&self.bounds),
                    geom = geometry_xml(geometry),
                    fill = fill_part,
                    line = outline_xml(outline),
                )
            }
            ShapeKind::TextBox { paragraphs } => {
                let mut body = String::new();
                for para in paragraphs {
                    body.push_str(&paragraph_xml(para));
                }
                format!(
                    concat!(
                        "            <p:sp>\n",
                        "                <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"TextBox {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\n",
                        "                <p:spPr>{xfrm}<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\n",
                        "                <p:txBody><a:bodyPr wrap=\"square\"/><a:lstStyle/>{body}</p:txBody>\n",
                        "            </p:sp>\n"
                    ),
                    id = self.id.0,
                    xfrm = xfrm_xml(&self.bounds),
                    body = body,
                )
            }
            ShapeKind::Picture { media_index } => {
                format!(
                    concat!(
                        "            <p:pic>\n",
                        "                <p:nvPicPr>\n",
                        "                    <p:cNvPr id=\"{id}\" name=\"Image {id}\"/>\n",
                        "                    <p:cNvPicPr><a:picLocks noChangeAspect=\"1\"/></p:cNvPicPr>\n",
                        "                    <p:nvPr/>\n",
                        "                </p:nvPicPr>\n",
                        "                <p:blipFill>\n",
                        "                    <a:blip r:embed=\"rId{rid}\"/>\n",
                        "                    <a:stretch><a:fillRect/></a:stretch>\n",
                        "                </p:blipFill>\n",
                        "                <p:spPr>{xfrm}<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\n",
                        "            </p:pic>\n"
                    ),
                    id = self.id.0,
                    rid = media_index + 1,
                    xfrm = xfrm_xml(&self.bounds),
                )
            }
        }
    }
}
