/// Slide types and XML serialization for PPTX presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;
use std::path::Path;

// Import shared format types
use super::super::format::{ImageFormat, TextFormat};
use super::relmap::RelationshipMapper;
use super::shape::{Frame, MutableShape, write_runs};

/// A mutable slide in a presentation.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Presentation-level slide ID (256 and up)
    pub(crate) slide_id: u32,
    pub(crate) shapes: Vec<MutableShape>,
    /// Speaker notes for the slide
    pub(crate) notes: Option<String>,
}

impl MutableSlide {
    /// Create a new empty slide.
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
            notes: None,
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Set speaker notes for the slide.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = Some(notes.to_string());
    }

    /// Get the speaker notes for the slide.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Check if the slide has speaker notes.
    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    /// Shape IDs start at 2; 1 is the slide's shape tree.
    fn next_shape_id(&self) -> u32 {
        self.shapes.iter().map(|s| s.shape_id).max().unwrap_or(1) + 1
    }

    /// Add an empty text box to the slide and return it for filling in.
    pub fn add_text_box(&mut self, x: i64, y: i64, width: i64, height: i64) -> &mut MutableShape {
        let shape = MutableShape::new_text_box(
            self.next_shape_id(),
            Frame::new(x, y, width, height),
        );
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Add a picture to the slide from a file and return its shape ID.
    ///
    /// Fails if the file cannot be read or is not a recognized image.
    pub fn add_picture<P: AsRef<Path>>(
        &mut self,
        image_path: P,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Result<u32> {
        let image_path = image_path.as_ref();
        let data = std::fs::read(image_path)?;
        let description = image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        self.add_picture_from_bytes(data, x, y, width, height, description)
    }

    /// Add a picture to the slide from bytes and return its shape ID.
    pub fn add_picture_from_bytes(
        &mut self,
        data: Vec<u8>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: Option<String>,
    ) -> Result<u32> {
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| OoxmlError::InvalidFormat("Unknown image format".to_string()))?;

        #[cfg(feature = "imgconv")]
        image::load_from_memory_with_format(&data, format.to_image_format())
            .map_err(|e| OoxmlError::InvalidFormat(e.to_string()))?;

        let shape_id = self.next_shape_id();
        let desc = description.unwrap_or_else(|| "Picture".to_string());
        let shape =
            MutableShape::new_picture(shape_id, data, format, Frame::new(x, y, width, height), desc);
        self.shapes.push(shape);

        Ok(shape_id)
    }

    /// Get the shapes on the slide, in z-order.
    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    /// Get the number of shapes on the slide.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Collect image data from the slide's pictures, in shape order.
    pub(crate) fn collect_images(&self) -> Vec<(&[u8], ImageFormat)> {
        self.shapes
            .iter()
            .filter_map(|shape| shape.get_image_data())
            .collect()
    }

    /// Generate slide XML for a slide without pictures.
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with_rels(None, None)
    }

    /// Generate slide XML content with relationship IDs from the mapper.
    ///
    /// # Arguments
    /// * `slide_index` - The index of this slide (used to look up relationships)
    /// * `rel_mapper` - The relationship mapper containing actual relationship IDs
    pub(crate) fn to_xml_with_rels(
        &self,
        slide_index: Option<usize>,
        rel_mapper: Option<&RelationshipMapper>,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )?;

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");
        write_group_shape_properties(&mut xml);

        let mut image_counter = 0;
        for shape in &self.shapes {
            let rel_id = if shape.is_picture() {
                let rid = slide_index
                    .zip(rel_mapper)
                    .and_then(|(si, rm)| rm.get_image_id(si, image_counter));
                image_counter += 1;
                rid
            } else {
                None
            };

            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Generate notes slide XML content.
    ///
    /// Each line of the notes becomes one paragraph of the body placeholder.
    /// Placeholder indices match the notes master so geometry is inherited.
    pub(crate) fn generate_notes_xml(&self) -> Option<Result<String>> {
        let notes_text = self.notes.as_ref()?;
        Some(Self::notes_xml(notes_text))
    }

    fn notes_xml(notes_text: &str) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<p:notes xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )?;

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");
        write_group_shape_properties(&mut xml);

        // Slide image placeholder, geometry inherited from the notes master
        xml.push_str("<p:sp><p:nvSpPr>");
        xml.push_str(r#"<p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#);
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#);
        xml.push_str(r#"<p:nvPr><p:ph type="sldImg" idx="2"/></p:nvPr>"#);
        xml.push_str("</p:nvSpPr><p:spPr/></p:sp>");

        // Notes text placeholder
        xml.push_str("<p:sp><p:nvSpPr>");
        xml.push_str(r#"<p:cNvPr id="3" name="Notes Placeholder 2"/>"#);
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
        xml.push_str(r#"<p:nvPr><p:ph type="body" sz="quarter" idx="3"/></p:nvPr>"#);
        xml.push_str("</p:nvSpPr><p:spPr/>");
        xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
        let format = TextFormat::new();
        for line in notes_text.split('\n') {
            xml.push_str("<a:p>");
            write_runs(&mut xml, line, &format)?;
            xml.push_str("</a:p>");
        }
        xml.push_str("</p:txBody></p:sp>");

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:notes>");

        Ok(xml)
    }
}

/// Write the (required) non-visual and visual properties of the shape tree.
fn write_group_shape_properties(xml: &mut String) {
    xml.push_str("<p:nvGrpSpPr>");
    xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    xml.push_str("<p:cNvGrpSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr>");
    xml.push_str("<a:xfrm>");
    xml.push_str(r#"<a:off x="0" y="0"/>"#);
    xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
    xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
    xml.push_str("</a:xfrm>");
    xml.push_str("</p:grpSpPr>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_shape_ids_are_sequential() {
        let mut slide = MutableSlide::new(256);
        assert_eq!(slide.add_text_box(0, 0, 100, 100).shape_id(), 2);
        assert_eq!(slide.add_text_box(0, 0, 100, 100).shape_id(), 3);
        let pic_id = slide
            .add_picture_from_bytes(PNG_1X1.to_vec(), 0, 0, 100, 100, None)
            .unwrap();
        assert_eq!(pic_id, 4);
        assert_eq!(slide.shape_count(), 3);
    }

    #[test]
    fn test_add_picture_from_file() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(PNG_1X1).unwrap();

        let mut slide = MutableSlide::new(256);
        slide.add_picture(file.path(), 10, 20, 30, 40).unwrap();

        let images = slide.collect_images();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].1, ImageFormat::Png);
        assert_eq!(slide.shapes()[0].frame(), Frame::new(10, 20, 30, 40));
    }

    #[test]
    fn test_add_picture_failures_leave_slide_untouched() {
        let mut slide = MutableSlide::new(256);

        let missing = slide.add_picture("does/not/exist.png", 0, 0, 1, 1);
        assert!(matches!(missing, Err(OoxmlError::Io(_))));

        let garbage = slide.add_picture_from_bytes(b"plain text".to_vec(), 0, 0, 1, 1, None);
        assert!(matches!(garbage, Err(OoxmlError::InvalidFormat(_))));

        assert_eq!(slide.shape_count(), 0);
    }

    #[cfg(feature = "imgconv")]
    #[test]
    fn test_undecodable_picture_is_rejected() {
        let mut slide = MutableSlide::new(256);
        let truncated = slide.add_picture_from_bytes(PNG_1X1[..20].to_vec(), 0, 0, 1, 1, None);
        assert!(matches!(truncated, Err(OoxmlError::InvalidFormat(_))));
        assert_eq!(slide.shape_count(), 0);
    }

    #[cfg(not(feature = "imgconv"))]
    #[test]
    fn test_picture_accepted_on_magic_bytes() {
        let mut slide = MutableSlide::new(256);
        slide
            .add_picture_from_bytes(PNG_1X1[..20].to_vec(), 0, 0, 1, 1, None)
            .unwrap();
        assert_eq!(slide.collect_images()[0].1, ImageFormat::Png);
    }

    #[test]
    fn test_slide_xml() {
        let mut slide = MutableSlide::new(256);
        slide
            .add_text_box(0, 0, 100, 100)
            .add_paragraph("Title", TextFormat::new().bold(true));

        let xml = slide.to_xml().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0""#));
        assert!(xml.contains("<p:sld "));
        assert!(xml.contains(r#"<p:cNvPr id="1" name=""/>"#));
        assert!(xml.contains("<a:t>Title</a:t>"));
        assert!(xml.ends_with("</p:sld>"));
    }

    #[test]
    fn test_picture_xml_uses_mapped_rel_id() {
        let mut slide = MutableSlide::new(256);
        slide
            .add_picture_from_bytes(PNG_1X1.to_vec(), 0, 0, 100, 100, None)
            .unwrap();

        assert!(slide.to_xml().is_err());

        let mut mapper = RelationshipMapper::new();
        mapper.add_image(3, 0, "rId2".to_string());
        let xml = slide.to_xml_with_rels(Some(3), Some(&mapper)).unwrap();
        assert!(xml.contains(r#"r:embed="rId2""#));
    }

    #[test]
    fn test_notes_xml() {
        let mut slide = MutableSlide::new(256);
        assert!(slide.generate_notes_xml().is_none());

        slide.set_notes("line one & more\nline two");
        assert!(slide.has_notes());
        let xml = slide.generate_notes_xml().unwrap().unwrap();
        assert!(xml.contains(r#"<p:ph type="sldImg" idx="2"/>"#));
        assert!(xml.contains(r#"<p:ph type="body" sz="quarter" idx="3"/>"#));
        assert!(xml.contains(r#"<a:p><a:r><a:rPr dirty="0"/><a:t>line one &amp; more</a:t></a:r></a:p>"#));
        assert!(xml.contains("<a:t>line two</a:t>"));
    }
}
