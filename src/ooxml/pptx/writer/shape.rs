/// Shape types and XML serialization for PPTX slides.
use crate::common::unit::pt_to_centipoints;
use crate::common::xml::{escape_text, escape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

// Import shared format types
pub use super::super::format::{ImageFormat, TextFormat};

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Frame {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn write_xfrm(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<a:xfrm>");
        write!(xml, r#"<a:off x="{}" y="{}"/>"#, self.x, self.y)?;
        write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, self.width, self.height)?;
        xml.push_str("</a:xfrm>");
        Ok(())
    }
}

/// One paragraph of a text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParagraph {
    text: String,
    /// Outline level, 0 is the top level
    level: u8,
    format: TextFormat,
}

impl TextParagraph {
    pub fn new(text: &str, format: TextFormat) -> Self {
        Self {
            text: text.to_string(),
            level: 0,
            format,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<a:p>");
        if self.level > 0 {
            write!(xml, r#"<a:pPr lvl="{}"/>"#, self.level)?;
        }
        write_runs(xml, &self.text, &self.format)?;
        xml.push_str("</a:p>");
        Ok(())
    }
}

/// Write the runs of one paragraph.
///
/// A line feed or vertical tab becomes an `<a:br>` line break inside the
/// paragraph, which reads back as a vertical tab.
pub(crate) fn write_runs(xml: &mut String, text: &str, format: &TextFormat) -> Result<()> {
    for (i, line) in text.split(['\n', '\u{0B}']).enumerate() {
        if i > 0 {
            xml.push_str("<a:br>");
            write_run_properties(xml, format)?;
            xml.push_str("</a:br>");
        }
        xml.push_str("<a:r>");
        write_run_properties(xml, format)?;
        write!(xml, "<a:t>{}</a:t>", escape_text(line))?;
        xml.push_str("</a:r>");
    }
    Ok(())
}

/// Write `<a:rPr>` in schema order: attributes, fill, then typefaces.
fn write_run_properties(xml: &mut String, format: &TextFormat) -> Result<()> {
    xml.push_str("<a:rPr dirty=\"0\"");

    if let Some(size) = format.size {
        write!(xml, " sz=\"{}\"", pt_to_centipoints(size))?;
    }

    if let Some(bold) = format.bold {
        xml.push_str(if bold { " b=\"1\"" } else { " b=\"0\"" });
    }

    if let Some(italic) = format.italic {
        xml.push_str(if italic { " i=\"1\"" } else { " i=\"0\"" });
    }

    if let Some(true) = format.underline {
        xml.push_str(" u=\"sng\"");
    }

    if format.color.is_none() && format.font.is_none() {
        xml.push_str("/>");
        return Ok(());
    }

    xml.push('>');

    if let Some(ref color) = format.color {
        write!(
            xml,
            "<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>",
            escape_xml(color)
        )?;
    }

    if let Some(ref font) = format.font {
        write!(xml, "<a:latin typeface=\"{}\"/>", escape_xml(font))?;
    }

    xml.push_str("</a:rPr>");
    Ok(())
}

/// A shape on a slide (text box or picture).
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID, unique within the slide
    pub(crate) shape_id: u32,
    pub(crate) shape_type: ShapeType,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    TextBox {
        frame: Frame,
        paragraphs: Vec<TextParagraph>,
        word_wrap: bool,
    },
    Picture {
        frame: Frame,
        data: Vec<u8>,
        format: ImageFormat,
        description: String,
    },
}

impl MutableShape {
    /// Create a new empty text box shape.
    pub(crate) fn new_text_box(shape_id: u32, frame: Frame) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::TextBox {
                frame,
                paragraphs: Vec::new(),
                word_wrap: false,
            },
        }
    }

    /// Create a new picture shape.
    pub(crate) fn new_picture(
        shape_id: u32,
        data: Vec<u8>,
        format: ImageFormat,
        frame: Frame,
        description: String,
    ) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Picture {
                frame,
                data,
                format,
                description,
            },
        }
    }

    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    pub fn frame(&self) -> Frame {
        match &self.shape_type {
            ShapeType::TextBox { frame, .. } | ShapeType::Picture { frame, .. } => *frame,
        }
    }

    pub fn is_picture(&self) -> bool {
        matches!(self.shape_type, ShapeType::Picture { .. })
    }

    /// Paragraphs of a text box; empty for pictures.
    pub fn paragraphs(&self) -> &[TextParagraph] {
        match &self.shape_type {
            ShapeType::TextBox { paragraphs, .. } => paragraphs,
            ShapeType::Picture { .. } => &[],
        }
    }

    /// Append a level-0 paragraph (only for text boxes).
    ///
    /// The text is one paragraph however many lines it has: `\n` and `\u{0B}`
    /// are written as line breaks within it.
    pub fn add_paragraph(&mut self, text: &str, format: TextFormat) -> &mut Self {
        self.add_paragraph_at_level(text, 0, format)
    }

    /// Append a paragraph at an outline level (only for text boxes).
    pub fn add_paragraph_at_level(&mut self, text: &str, level: u8, format: TextFormat) -> &mut Self {
        if let ShapeType::TextBox {
            ref mut paragraphs, ..
        } = self.shape_type
        {
            let mut paragraph = TextParagraph::new(text, format);
            paragraph.level = level;
            paragraphs.push(paragraph);
        }
        self
    }

    /// Builder method: wrap text at the shape boundary (only for text boxes).
    pub fn word_wrap(&mut self, wrap: bool) -> &mut Self {
        if let ShapeType::TextBox {
            ref mut word_wrap, ..
        } = self.shape_type
        {
            *word_wrap = wrap;
        }
        self
    }

    /// Get image data if this shape is a picture.
    pub(crate) fn get_image_data(&self) -> Option<(&[u8], ImageFormat)> {
        match &self.shape_type {
            ShapeType::Picture { data, format, .. } => Some((data.as_slice(), *format)),
            ShapeType::TextBox { .. } => None,
        }
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need the relationship ID of their media part.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox {
                frame,
                paragraphs,
                word_wrap,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )?;
                xml.push_str("<p:cNvSpPr txBox=\"1\"/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                frame.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("<a:noFill/>");
                xml.push_str("</p:spPr>");

                xml.push_str("<p:txBody>");
                write!(
                    xml,
                    r#"<a:bodyPr wrap="{}" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#,
                    if *word_wrap { "square" } else { "none" }
                )?;
                xml.push_str("<a:lstStyle/>");
                if paragraphs.is_empty() {
                    xml.push_str("<a:p/>");
                }
                for paragraph in paragraphs {
                    paragraph.to_xml(xml)?;
                }
                xml.push_str("</p:txBody>");

                xml.push_str("</p:sp>");
            },
            ShapeType::Picture {
                frame, description, ..
            } => {
                let rid = rel_id.ok_or_else(|| {
                    OoxmlError::Xml(format!(
                        "picture {} has no image relationship",
                        self.shape_id
                    ))
                })?;

                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    self.shape_id,
                    self.shape_id - 1,
                    escape_text(description)
                )?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, escape_xml(rid))?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</p:blipFill>");

                xml.push_str("<p:spPr>");
                frame.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr>");
                xml.push_str("</p:pic>");
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(548_640, 457_200, 6_858_000, 1_463_040)
    }

    #[test]
    fn test_text_box_xml() {
        let mut shape = MutableShape::new_text_box(2, frame());
        shape.add_paragraph(
            "GDP & CO2",
            TextFormat::new().font("Arial").size(36.0).bold(true).color("0B3A66"),
        );

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert!(xml.contains(r#"<p:cNvPr id="2" name="TextBox 1"/>"#));
        assert!(xml.contains(r#"<a:off x="548640" y="457200"/>"#));
        assert!(xml.contains(r#"<a:bodyPr wrap="none""#));
        assert!(xml.contains(r#"sz="3600" b="1""#));
        assert!(xml.contains(
            r#"<a:solidFill><a:srgbClr val="0B3A66"/></a:solidFill><a:latin typeface="Arial"/>"#
        ));
        assert!(xml.contains("<a:t>GDP &amp; CO2</a:t>"));
    }

    #[test]
    fn test_paragraphs_in_order() {
        let mut shape = MutableShape::new_text_box(3, frame());
        shape
            .word_wrap(true)
            .add_paragraph("first", TextFormat::new())
            .add_paragraph_at_level("second", 1, TextFormat::new());

        assert_eq!(shape.paragraphs().len(), 2);
        assert_eq!(shape.paragraphs()[1].level(), 1);

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"wrap="square""#));
        assert!(xml.contains(r#"<a:pPr lvl="1"/>"#));
        assert!(xml.find("first").unwrap() < xml.find("second").unwrap());
    }

    #[test]
    fn test_line_breaks_stay_in_one_paragraph() {
        let mut shape = MutableShape::new_text_box(2, frame());
        shape.add_paragraph("one\ntwo\u{0B}three", TextFormat::new().size(18.0));

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert_eq!(xml.matches("<a:p>").count(), 1);
        assert_eq!(xml.matches("<a:br>").count(), 2);
        assert!(xml.contains(
            r#"<a:t>one</a:t></a:r><a:br><a:rPr dirty="0" sz="1800"/></a:br><a:r>"#
        ));
        assert!(!xml.contains('\n'));
        assert!(!xml.contains('\u{0B}'));
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let mut shape = MutableShape::new_text_box(2, frame());
        shape.add_paragraph("bell\u{7}", TextFormat::new());

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains("<a:t>bell_x0007_</a:t>"));
    }

    #[test]
    fn test_empty_text_box_has_paragraph() {
        let shape = MutableShape::new_text_box(2, frame());
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains("<a:lstStyle/><a:p/></p:txBody>"));
    }

    #[test]
    fn test_picture_requires_rel_id() {
        let shape = MutableShape::new_picture(
            4,
            vec![0x89, 0x50, 0x4E, 0x47],
            ImageFormat::Png,
            frame(),
            "chart".to_string(),
        );
        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, None).is_err());

        xml.clear();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"name="Picture 3" descr="chart""#));
        assert!(shape.paragraphs().is_empty());
    }
}
