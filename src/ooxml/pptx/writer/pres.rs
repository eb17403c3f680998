/// Presentation writer for PPTX.
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::{OpcPackage, PackageWriter};
use std::fmt::Write as FmtWrite;
use std::path::Path;

use super::assemble;
use super::slide::MutableSlide;

/// Standard 4:3 slide width, 10 inches.
pub const STANDARD_SLIDE_WIDTH: i64 = 9_144_000;
/// Widescreen 16:9 slide width, 13.33 inches.
pub const WIDESCREEN_SLIDE_WIDTH: i64 = 12_188_952;
/// Slide height shared by both sizes, 7.5 inches.
pub const SLIDE_HEIGHT: i64 = 6_858_000;

/// First ID in the presentation's slide ID list.
const FIRST_SLIDE_ID: u32 = 256;

/// A mutable PowerPoint presentation for writing.
///
/// Provides methods to add and modify slides, set dimensions, and configure presentation settings.
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    /// Title stored in the core document properties
    title: Option<String>,
}

impl MutablePresentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self::with_size(STANDARD_SLIDE_WIDTH, SLIDE_HEIGHT)
    }

    /// Create a new empty 16:9 presentation (13.33" x 7.5").
    pub fn widescreen() -> Self {
        Self::with_size(WIDESCREEN_SLIDE_WIDTH, SLIDE_HEIGHT)
    }

    fn with_size(slide_width: i64, slide_height: i64) -> Self {
        Self {
            slides: Vec::new(),
            slide_width,
            slide_height,
            title: None,
        }
    }

    /// Append a new blank slide to the presentation.
    pub fn add_slide(&mut self) -> &mut MutableSlide {
        let slide_id = FIRST_SLIDE_ID + self.slides.len() as u32;
        self.slides.push(MutableSlide::new(slide_id));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get a slide by index (0-based).
    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.slides.get(index)
    }

    /// Get all slides in presentation order.
    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Get the document title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the document title written to the core properties.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Check whether any slide carries speaker notes.
    pub fn has_notes(&self) -> bool {
        self.slides.iter().any(|s| s.has_notes())
    }

    /// Generate presentation.xml content with actual relationship IDs.
    ///
    /// # Arguments
    /// * `master_rel_id` - Relationship ID of the slide master
    /// * `slide_rel_ids` - Relationship IDs of the slides, in slide order
    /// * `notes_master_rel_id` - Relationship ID of the notes master, if any slide has notes
    pub(crate) fn generate_presentation_xml_with_rels(
        &self,
        master_rel_id: &str,
        slide_rel_ids: &[String],
        notes_master_rel_id: Option<&str>,
    ) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )?;

        // Write slide master ID list
        xml.push_str("<p:sldMasterIdLst>");
        write!(
            xml,
            r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#,
            master_rel_id
        )?;
        xml.push_str("</p:sldMasterIdLst>");

        if let Some(rel_id) = notes_master_rel_id {
            write!(
                xml,
                r#"<p:notesMasterIdLst><p:notesMasterId r:id="{}"/></p:notesMasterIdLst>"#,
                rel_id
            )?;
        }

        // Write slide ID list
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        // Write slide size
        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )?;

        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }

    /// Assemble the complete OPC package for this presentation.
    pub fn to_package(&self) -> Result<OpcPackage> {
        assemble::build_package(self)
    }

    /// Serialize the presentation to .pptx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_package()?;
        Ok(PackageWriter::to_bytes(&package)?)
    }

    /// Save the presentation to a .pptx file.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use slidepack::ooxml::pptx::MutablePresentation;
    ///
    /// let mut pres = MutablePresentation::widescreen();
    /// pres.add_slide();
    /// pres.save("output.pptx")?;
    /// # Ok::<(), slidepack::OoxmlError>(())
    /// ```
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let package = self.to_package()?;
        PackageWriter::write(path, &package)?;
        Ok(())
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_presentation() {
        let pres = MutablePresentation::new();
        assert_eq!(pres.slide_count(), 0);
        assert_eq!(pres.slide_width(), 9144000);
        assert_eq!(pres.slide_height(), 6858000);
        assert!(pres.title().is_none());
        assert!(!pres.has_notes());

        let wide = MutablePresentation::widescreen();
        assert_eq!(wide.slide_width(), 12188952);
    }

    #[test]
    fn test_add_slide() {
        let mut pres = MutablePresentation::new();
        assert_eq!(pres.add_slide().slide_id(), 256);
        assert_eq!(pres.add_slide().slide_id(), 257);
        assert_eq!(pres.slide_count(), 2);
        assert_eq!(pres.slide(1).map(|s| s.slide_id()), Some(257));
        assert!(pres.slide(2).is_none());
    }

    #[test]
    fn test_add_text_box() {
        let mut pres = MutablePresentation::new();
        pres.add_slide().add_text_box(100, 100, 500, 200);
        assert_eq!(pres.slide(0).map(|s| s.shape_count()), Some(1));
    }

    #[test]
    fn test_xml_generation() {
        let mut pres = MutablePresentation::widescreen();
        pres.add_slide();
        pres.add_slide();

        let rel_ids = vec!["rId2".to_string(), "rId3".to_string()];
        let xml = pres
            .generate_presentation_xml_with_rels("rId1", &rel_ids, None)
            .unwrap();
        assert!(xml.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="12188952" cy="6858000"/>"#));
        assert!(!xml.contains("notesMasterIdLst"));

        let xml = pres
            .generate_presentation_xml_with_rels("rId1", &rel_ids, Some("rId4"))
            .unwrap();
        assert!(xml.contains(r#"<p:notesMasterId r:id="rId4"/>"#));
    }

    #[test]
    fn test_to_bytes_is_zip() {
        let mut pres = MutablePresentation::new();
        pres.add_slide();
        let bytes = pres.to_bytes().unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
