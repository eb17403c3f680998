/// Package assembly for new presentations.
///
/// Relationships are created part by part first; slide and presentation XML is
/// generated afterwards so it can reference the relationship IDs actually assigned.
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{OpcPackage, PackURI, Part};
use crate::ooxml::pptx::template;
use chrono::Utc;
use log::debug;
use std::collections::HashMap;

use super::pres::MutablePresentation;
use super::relmap::RelationshipMapper;

fn pack_uri(uri: impl Into<String>) -> Result<PackURI> {
    Ok(PackURI::new(uri).map_err(OpcError::InvalidPackUri)?)
}

/// Build the complete OPC package for a presentation.
pub(crate) fn build_package(pres: &MutablePresentation) -> Result<OpcPackage> {
    let mut package = OpcPackage::new();

    let pres_uri = pack_uri("/ppt/presentation.xml")?;
    let master_uri = pack_uri("/ppt/slideMasters/slideMaster1.xml")?;
    let layout_uri = pack_uri("/ppt/slideLayouts/slideLayout1.xml")?;
    let theme_uri = pack_uri("/ppt/theme/theme1.xml")?;
    let notes_theme_uri = pack_uri("/ppt/theme/theme2.xml")?;
    let notes_master_uri = pack_uri("/ppt/notesMasters/notesMaster1.xml")?;
    let pres_props_uri = pack_uri("/ppt/presProps.xml")?;
    let view_props_uri = pack_uri("/ppt/viewProps.xml")?;
    let table_styles_uri = pack_uri("/ppt/tableStyles.xml")?;
    let core_uri = pack_uri("/docProps/core.xml")?;
    let app_uri = pack_uri("/docProps/app.xml")?;

    // Package relationships
    package.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
    package.relate_to(&core_uri, rt::CORE_PROPERTIES);
    package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

    let mut pres_part = Part::new(pres_uri, ct::PML_PRESENTATION_MAIN, Vec::new());
    let master_rel_id = pres_part.relate_to(&master_uri, rt::SLIDE_MASTER);

    let mut master_part = Part::from_xml(
        master_uri.clone(),
        ct::PML_SLIDE_MASTER,
        template::SLIDE_MASTER_XML,
    );
    master_part.relate_to(&layout_uri, rt::SLIDE_LAYOUT);
    master_part.relate_to(&theme_uri, rt::THEME);

    let mut layout_part = Part::from_xml(
        layout_uri.clone(),
        ct::PML_SLIDE_LAYOUT,
        template::BLANK_LAYOUT_XML,
    );
    layout_part.relate_to(&master_uri, rt::SLIDE_MASTER);

    // Slides, their media and notes slides
    let mut rel_mapper = RelationshipMapper::new();
    let mut media_parts: HashMap<&[u8], PackURI> = HashMap::new();
    let mut content_parts: Vec<Part> = Vec::new();
    let mut slide_rel_ids = Vec::with_capacity(pres.slide_count());
    let mut notes_count = 0;

    for (slide_index, slide) in pres.slides().iter().enumerate() {
        let slide_number = slide_index + 1;
        let slide_uri = pack_uri(format!("/ppt/slides/slide{}.xml", slide_number))?;
        let mut slide_part = Part::new(slide_uri.clone(), ct::PML_SLIDE, Vec::new());
        slide_part.relate_to(&layout_uri, rt::SLIDE_LAYOUT);

        for (image_index, (data, format)) in slide.collect_images().into_iter().enumerate() {
            let media_uri = match media_parts.get(data) {
                Some(uri) => uri.clone(),
                None => {
                    let uri = pack_uri(format!(
                        "/ppt/media/image{}.{}",
                        media_parts.len() + 1,
                        format.extension()
                    ))?;
                    debug!("adding media part {} ({} bytes)", uri, data.len());
                    content_parts.push(Part::new(uri.clone(), format.mime_type(), data.to_vec()));
                    media_parts.insert(data, uri.clone());
                    uri
                },
            };
            let rel_id = slide_part.relate_to(&media_uri, rt::IMAGE);
            rel_mapper.add_image(slide_index, image_index, rel_id);
        }

        if let Some(notes_xml) = slide.generate_notes_xml() {
            notes_count += 1;
            let notes_uri = pack_uri(format!("/ppt/notesSlides/notesSlide{}.xml", slide_number))?;
            let mut notes_part = Part::from_xml(notes_uri.clone(), ct::PML_NOTES_SLIDE, notes_xml?);
            notes_part.relate_to(&notes_master_uri, rt::NOTES_MASTER);
            notes_part.relate_to(&slide_uri, rt::SLIDE);
            slide_part.relate_to(&notes_uri, rt::NOTES_SLIDE);
            content_parts.push(notes_part);
        }

        let slide_xml = slide.to_xml_with_rels(Some(slide_index), Some(&rel_mapper))?;
        slide_part.set_blob(slide_xml.into_bytes());
        debug!(
            "assembled {} with {} shapes",
            slide_part.partname(),
            slide.shape_count()
        );

        slide_rel_ids.push(pres_part.relate_to(&slide_uri, rt::SLIDE));
        content_parts.push(slide_part);
    }

    // The notes master only exists when at least one slide has notes
    let notes_master_rel_id = if notes_count > 0 {
        let rel_id = pres_part.relate_to(&notes_master_uri, rt::NOTES_MASTER);
        let mut notes_master_part = Part::from_xml(
            notes_master_uri.clone(),
            ct::PML_NOTES_MASTER,
            template::NOTES_MASTER_XML,
        );
        notes_master_part.relate_to(&notes_theme_uri, rt::THEME);
        content_parts.push(notes_master_part);
        content_parts.push(Part::from_xml(
            notes_theme_uri,
            ct::OFC_THEME,
            template::theme_xml("Office Theme")?,
        ));
        Some(rel_id)
    } else {
        None
    };

    pres_part.relate_to(&pres_props_uri, rt::PRES_PROPS);
    pres_part.relate_to(&view_props_uri, rt::VIEW_PROPS);
    pres_part.relate_to(&theme_uri, rt::THEME);
    pres_part.relate_to(&table_styles_uri, rt::TABLE_STYLES);

    let pres_xml = pres.generate_presentation_xml_with_rels(
        &master_rel_id,
        &slide_rel_ids,
        notes_master_rel_id.as_deref(),
    )?;
    pres_part.set_blob(pres_xml.into_bytes());

    let now = Utc::now();

    package.add_part(pres_part)?;
    package.add_part(master_part)?;
    package.add_part(layout_part)?;
    package.add_part(Part::from_xml(
        theme_uri,
        ct::OFC_THEME,
        template::theme_xml("Office Theme")?,
    ))?;
    for part in content_parts {
        package.add_part(part)?;
    }
    package.add_part(Part::from_xml(
        pres_props_uri,
        ct::PML_PRES_PROPS,
        template::PRES_PROPS_XML,
    ))?;
    package.add_part(Part::from_xml(
        view_props_uri,
        ct::PML_VIEW_PROPS,
        template::VIEW_PROPS_XML,
    ))?;
    package.add_part(Part::from_xml(
        table_styles_uri,
        ct::PML_TABLE_STYLES,
        template::TABLE_STYLES_XML,
    ))?;
    package.add_part(Part::from_xml(
        core_uri,
        ct::OPC_CORE_PROPERTIES,
        template::core_props_xml(pres.title(), now, now)?,
    ))?;
    package.add_part(Part::from_xml(
        app_uri,
        ct::OFC_EXTENDED_PROPERTIES,
        template::app_props_xml(pres.slide_count(), notes_count)?,
    ))?;

    debug!(
        "assembled package: {} slides, {} media parts, {} parts total",
        pres.slide_count(),
        media_parts.len(),
        package.part_count()
    );

    Ok(package)
}
