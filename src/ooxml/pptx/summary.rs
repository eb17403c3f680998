//! Read a saved presentation back into a flat summary.
//!
//! The summary follows the slide order of `ppt/presentation.xml` and records,
//! per slide, the paragraphs of every text box, the pictures with their frames
//! and media part, and the speaker notes text. It understands the parts this
//! crate writes; it is not a general PPTX reader.

use crate::common::xml::{unescape_text, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::pptx::writer::Frame;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Summary of a whole presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationSummary {
    /// Slide width in EMUs
    pub slide_width: i64,
    /// Slide height in EMUs
    pub slide_height: i64,
    /// Slides in presentation order
    pub slides: Vec<SlideSummary>,
}

/// Summary of one slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideSummary {
    /// Text boxes in z-order, each as its list of paragraph texts
    pub text_boxes: Vec<Vec<String>>,
    /// Pictures in z-order
    pub pictures: Vec<PictureSummary>,
    /// Speaker notes, one line per notes paragraph
    pub notes: Option<String>,
}

/// A picture placed on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureSummary {
    pub frame: Frame,
    /// Partname of the embedded media part
    pub media: PackURI,
}

impl SlideSummary {
    /// Get the paragraphs of the text box at `index`.
    pub fn text_box(&self, index: usize) -> Option<&[String]> {
        self.text_boxes.get(index).map(Vec::as_slice)
    }
}

impl PresentationSummary {
    /// Read a summary from a .pptx file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = PhysPkgReader::open(path)?;
        Self::from_reader(reader)
    }

    /// Read a summary from .pptx bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let reader = PhysPkgReader::from_bytes(data)?;
        Self::from_reader(reader)
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn from_reader(mut reader: PhysPkgReader) -> Result<Self> {
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let package_rels = load_rels(&mut reader, &package_uri)?;
        let pres_uri = package_rels
            .part_with_reltype(rt::OFFICE_DOCUMENT)?
            .target_partname()?;

        let pres_xml = read_xml(&mut reader, &pres_uri)?;
        let pres_rels = load_rels(&mut reader, &pres_uri)?;
        let (slide_width, slide_height, slide_rel_ids) = parse_presentation(&pres_xml)?;

        let mut slides = Vec::with_capacity(slide_rel_ids.len());
        for rel_id in &slide_rel_ids {
            let slide_uri = resolve(&pres_rels, rel_id)?;
            slides.push(read_slide(&mut reader, &slide_uri)?);
        }

        Ok(Self {
            slide_width,
            slide_height,
            slides,
        })
    }
}

fn read_slide(reader: &mut PhysPkgReader, slide_uri: &PackURI) -> Result<SlideSummary> {
    let slide_xml = read_xml(reader, slide_uri)?;
    let slide_rels = load_rels(reader, slide_uri)?;

    let mut summary = SlideSummary::default();
    for shape in scan_shapes(&slide_xml)? {
        match shape {
            ScannedShape::Text { paragraphs, .. } => summary.text_boxes.push(paragraphs),
            ScannedShape::Picture { embed, frame } => {
                let media = resolve(&slide_rels, &embed)?;
                summary.pictures.push(PictureSummary { frame, media });
            },
        }
    }

    if let Some(notes_rel) = slide_rels.with_reltype(rt::NOTES_SLIDE).next() {
        let notes_uri = notes_rel.target_partname()?;
        let notes_xml = read_xml(reader, &notes_uri)?;
        summary.notes = scan_shapes(&notes_xml)?
            .into_iter()
            .find_map(|shape| match shape {
                ScannedShape::Text {
                    placeholder: Some(kind),
                    paragraphs,
                } if kind == "body" => Some(paragraphs.join("\n")),
                _ => None,
            });
    }

    Ok(summary)
}

fn read_xml(reader: &mut PhysPkgReader, uri: &PackURI) -> Result<String> {
    let blob = reader.blob_for(uri)?;
    String::from_utf8(blob).map_err(|e| OoxmlError::Xml(format!("{}: {}", uri, e)))
}

fn load_rels(reader: &mut PhysPkgReader, source_uri: &PackURI) -> Result<Relationships> {
    let mut rels = Relationships::new(source_uri.base_uri().to_string());
    let Some(blob) = reader.rels_xml_for(source_uri)? else {
        return Ok(rels);
    };
    let xml = String::from_utf8(blob).map_err(|e| OoxmlError::Xml(e.to_string()))?;

    let mut xml_reader = Reader::from_str(&xml);
    loop {
        match xml_reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let r_id = attr_value(&e, b"Id")?.unwrap_or_default();
                let reltype = attr_value(&e, b"Type")?.unwrap_or_default();
                let target = attr_value(&e, b"Target")?.unwrap_or_default();
                rels.add_relationship(reltype, target, r_id);
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(rels)
}

fn resolve(rels: &Relationships, r_id: &str) -> Result<PackURI> {
    let rel = rels
        .get(r_id)
        .ok_or_else(|| OpcError::RelationshipNotFound(r_id.to_string()))?;
    Ok(rel.target_partname()?)
}

/// Get an attribute by local name, unescaped.
fn attr_value(element: &BytesStart<'_>, local_name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes().flatten() {
        if attr.key.local_name().as_ref() == local_name {
            let value =
                std::str::from_utf8(&attr.value).map_err(|e| OoxmlError::Xml(e.to_string()))?;
            return Ok(Some(unescape_xml(value)));
        }
    }
    Ok(None)
}

fn attr_i64(element: &BytesStart<'_>, local_name: &[u8]) -> Result<i64> {
    let value = attr_value(element, local_name)?.unwrap_or_default();
    value
        .parse()
        .map_err(|_| OoxmlError::Xml(format!("invalid integer attribute: {:?}", value)))
}

/// Parse slide size and the ordered slide relationship IDs.
fn parse_presentation(xml: &str) -> Result<(i64, i64, Vec<String>)> {
    let mut reader = Reader::from_str(xml);
    let mut size = (0, 0);
    let mut slide_rel_ids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"sldId" => {
                    if let Some(r_id) = attr_r_id(&e) {
                        slide_rel_ids.push(r_id);
                    }
                },
                b"sldSz" => size = (attr_i64(&e, b"cx")?, attr_i64(&e, b"cy")?),
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok((size.0, size.1, slide_rel_ids))
}

/// The `r:id` attribute; `id` alone is the slide ID.
fn attr_r_id(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r:id")
        .and_then(|attr| std::str::from_utf8(&attr.value).ok().map(str::to_string))
}

/// A shape found in a slide or notes slide shape tree.
#[derive(Debug)]
enum ScannedShape {
    Text {
        /// Placeholder type, if the shape is a placeholder
        placeholder: Option<String>,
        paragraphs: Vec<String>,
    },
    Picture {
        embed: String,
        frame: Frame,
    },
}

/// Collect text-bearing shapes and pictures in document order.
fn scan_shapes(xml: &str) -> Result<Vec<ScannedShape>> {
    let mut reader = Reader::from_str(xml);
    let mut shapes = Vec::new();

    let mut in_sp = false;
    let mut in_pic = false;
    let mut in_text = false;
    let mut placeholder: Option<String> = None;
    let mut paragraphs: Option<Vec<String>> = None;
    let mut paragraph: Option<String> = None;
    let mut embed: Option<String> = None;
    let mut frame = Frame::new(0, 0, 0, 0);

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"sp" => {
                    in_sp = true;
                    placeholder = None;
                    paragraphs = None;
                },
                b"pic" => {
                    in_pic = true;
                    embed = None;
                    frame = Frame::new(0, 0, 0, 0);
                },
                b"txBody" if in_sp => paragraphs = Some(Vec::new()),
                b"p" if paragraphs.is_some() => paragraph = Some(String::new()),
                b"t" if paragraph.is_some() => in_text = true,
                b"br" => push_line_break(&mut paragraph),
                _ => {},
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"br" => push_line_break(&mut paragraph),
                b"ph" if in_sp => {
                    placeholder = Some(attr_value(&e, b"type")?.unwrap_or_else(|| "body".into()))
                },
                b"p" => {
                    if let Some(list) = paragraphs.as_mut() {
                        list.push(String::new());
                    }
                },
                b"blip" if in_pic => embed = attr_value(&e, b"embed")?,
                b"off" if in_pic => {
                    frame.x = attr_i64(&e, b"x")?;
                    frame.y = attr_i64(&e, b"y")?;
                },
                b"ext" if in_pic => {
                    frame.width = attr_i64(&e, b"cx")?;
                    frame.height = attr_i64(&e, b"cy")?;
                },
                _ => {},
            },
            Event::Text(e) if in_text => {
                if let Some(text) = paragraph.as_mut() {
                    let raw = std::str::from_utf8(e.as_ref())
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    text.push_str(raw);
                }
            },
            Event::GeneralRef(e) if in_text => {
                if let Some(text) = paragraph.as_mut() {
                    let name = std::str::from_utf8(e.as_ref())
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    text.push('&');
                    text.push_str(name);
                    text.push(';');
                }
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let (Some(list), Some(text)) = (paragraphs.as_mut(), paragraph.take()) {
                        list.push(unescape_text(&unescape_xml(&text)));
                    }
                },
                b"sp" => {
                    if let Some(list) = paragraphs.take() {
                        shapes.push(ScannedShape::Text {
                            placeholder: placeholder.take(),
                            paragraphs: list,
                        });
                    }
                    in_sp = false;
                },
                b"pic" => {
                    if let Some(embed) = embed.take() {
                        shapes.push(ScannedShape::Picture { embed, frame });
                    }
                    in_pic = false;
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(shapes)
}

/// A line break inside a paragraph reads back as a vertical tab.
fn push_line_break(paragraph: &mut Option<String>) {
    if let Some(text) = paragraph.as_mut() {
        text.push('\u{0B}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::format::TextFormat;
    use crate::ooxml::pptx::writer::MutablePresentation;

    #[test]
    fn test_scan_text_with_entities() {
        let xml = r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree>
            <p:sp><p:txBody><a:p><a:r><a:t>GDP &amp; CO&lt;2&gt;</a:t></a:r></a:p><a:p/></p:txBody></p:sp>
            </p:spTree></p:cSld></p:sld>"#;
        let shapes = scan_shapes(xml).unwrap();
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            ScannedShape::Text {
                placeholder,
                paragraphs,
            } => {
                assert!(placeholder.is_none());
                assert_eq!(paragraphs, &vec!["GDP & CO<2>".to_string(), String::new()]);
            },
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_through_writer() {
        let mut pres = MutablePresentation::widescreen();
        let slide = pres.add_slide();
        slide
            .add_text_box(0, 0, 100, 100)
            .add_paragraph("first", TextFormat::new())
            .add_paragraph("second 'quoted' & more", TextFormat::new().bold(true));
        slide.set_notes("  leading spaces\n\nand a blank line");
        pres.add_slide();

        let summary = PresentationSummary::from_bytes(pres.to_bytes().unwrap()).unwrap();
        assert_eq!(summary.slide_width, 12188952);
        assert_eq!(summary.slide_height, 6858000);
        assert_eq!(summary.slide_count(), 2);

        let first = &summary.slides[0];
        assert_eq!(
            first.text_box(0),
            Some(&["first".to_string(), "second 'quoted' & more".to_string()][..])
        );
        assert_eq!(
            first.notes.as_deref(),
            Some("  leading spaces\n\nand a blank line")
        );
        assert!(summary.slides[1].text_boxes.is_empty());
        assert!(summary.slides[1].notes.is_none());
    }

    #[test]
    fn test_line_breaks_and_control_characters_read_back() {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide();
        slide
            .add_text_box(0, 0, 100, 100)
            .add_paragraph("line\u{0B}tab", TextFormat::new())
            .add_paragraph("two\nlines", TextFormat::new())
            .add_paragraph("bell\u{7} and _x0041_", TextFormat::new());
        slide.set_notes("note\u{0B}x\nsecond");

        let summary = PresentationSummary::from_bytes(pres.to_bytes().unwrap()).unwrap();
        let slide = &summary.slides[0];
        assert_eq!(
            slide.text_box(0),
            Some(
                &[
                    "line\u{0B}tab".to_string(),
                    "two\u{0B}lines".to_string(),
                    "bell\u{7} and _x0041_".to_string(),
                ][..]
            )
        );
        assert_eq!(slide.notes.as_deref(), Some("note\u{0B}x\nsecond"));
    }

    #[test]
    fn test_not_a_package() {
        assert!(PresentationSummary::from_bytes(b"not a zip".to_vec()).is_err());
    }
}
