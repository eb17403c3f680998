/// Deck builder driving the presentation writer.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::{MutablePresentation, MutableSlide, TextFormat};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::layout::{self, InchRect};
use super::spec::{SlideBody, SlideSpec};

/// A picture that could not be placed on a slide.
#[derive(Error, Debug)]
#[error("can't load image {}: {source}", .path.display())]
pub struct ImageLoadError {
    pub path: PathBuf,
    pub source: OoxmlError,
}

/// Identifies a slide appended by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideHandle {
    /// 0-based position in the deck
    pub index: usize,
    /// Presentation-level slide ID
    pub slide_id: u32,
}

/// Builds a widescreen deck one slide at a time and writes it out once.
#[derive(Debug)]
pub struct DeckBuilder {
    presentation: MutablePresentation,
    skipped_images: Vec<ImageLoadError>,
}

impl DeckBuilder {
    /// Start an empty 16:9 deck.
    pub fn new() -> Self {
        Self {
            presentation: MutablePresentation::widescreen(),
            skipped_images: Vec::new(),
        }
    }

    /// Set the title stored in the document properties.
    pub fn with_title(mut self, title: &str) -> Self {
        self.presentation.set_title(title);
        self
    }

    /// Append a title slide: title, subtitle, optional picture and notes.
    pub fn build_title_slide(
        &mut self,
        title: &str,
        subtitle: &str,
        image_path: Option<&Path>,
        speaker_note: Option<&str>,
    ) -> SlideHandle {
        let index = self.presentation.slide_count();
        let slide = self.presentation.add_slide();

        add_text(
            slide,
            layout::TITLE_SLIDE_TITLE,
            title,
            layout::title_slide_title_format(),
        );
        add_text(
            slide,
            layout::TITLE_SLIDE_SUBTITLE,
            subtitle,
            layout::title_slide_subtitle_format(),
        );

        if let Some(path) = image_path {
            place_picture(
                &mut self.skipped_images,
                slide,
                path,
                layout::TITLE_SLIDE_PICTURE,
            );
        }
        if let Some(note) = speaker_note {
            slide.set_notes(note);
        }

        debug!("built title slide {}: {}", index + 1, title);
        SlideHandle {
            index,
            slide_id: slide.slide_id(),
        }
    }

    /// Append a bullet slide: title, one paragraph per bullet, optional
    /// picture and notes.
    pub fn build_bullet_slide<S: AsRef<str>>(
        &mut self,
        title: &str,
        bullets: &[S],
        image_path: Option<&Path>,
        speaker_note: Option<&str>,
    ) -> SlideHandle {
        let index = self.presentation.slide_count();
        let slide = self.presentation.add_slide();

        add_text(
            slide,
            layout::BULLET_SLIDE_TITLE,
            title,
            layout::bullet_slide_title_format(),
        );

        let body = layout::BULLET_SLIDE_BODY.to_frame();
        let text_box = slide.add_text_box(body.x, body.y, body.width, body.height);
        text_box.word_wrap(true);
        for bullet in bullets {
            text_box.add_paragraph_at_level(bullet.as_ref(), 0, layout::bullet_format());
        }

        if let Some(path) = image_path {
            place_picture(
                &mut self.skipped_images,
                slide,
                path,
                layout::BULLET_SLIDE_PICTURE,
            );
        }
        if let Some(note) = speaker_note {
            slide.set_notes(note);
        }

        debug!(
            "built bullet slide {}: {} ({} bullets)",
            index + 1,
            title,
            bullets.len()
        );
        SlideHandle {
            index,
            slide_id: slide.slide_id(),
        }
    }

    /// Append one slide described by `spec`.
    pub fn build(&mut self, spec: &SlideSpec) -> SlideHandle {
        let image_path = spec.image_path.as_deref();
        let speaker_note = spec.speaker_note.as_deref();
        match &spec.body {
            SlideBody::Subtitle(subtitle) => {
                self.build_title_slide(&spec.title, subtitle, image_path, speaker_note)
            },
            SlideBody::Bullets(bullets) => {
                self.build_bullet_slide(&spec.title, bullets.as_slice(), image_path, speaker_note)
            },
        }
    }

    /// Append one slide per spec, in order.
    pub fn build_all(&mut self, specs: &[SlideSpec]) -> Vec<SlideHandle> {
        specs.iter().map(|spec| self.build(spec)).collect()
    }

    /// Number of slides built so far.
    pub fn slide_count(&self) -> usize {
        self.presentation.slide_count()
    }

    /// Pictures that were skipped, in the order they were attempted.
    pub fn skipped_images(&self) -> &[ImageLoadError] {
        &self.skipped_images
    }

    /// The presentation being built.
    pub fn presentation(&self) -> &MutablePresentation {
        &self.presentation
    }

    /// Write the deck to `output_path` and return the path written.
    pub fn finalize<P: AsRef<Path>>(self, output_path: P) -> Result<PathBuf> {
        let output_path = output_path.as_ref();
        self.presentation.save(output_path)?;
        debug!(
            "wrote {} slides to {} ({} images skipped)",
            self.presentation.slide_count(),
            output_path.display(),
            self.skipped_images.len()
        );
        Ok(output_path.to_path_buf())
    }
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn add_text(slide: &mut MutableSlide, rect: InchRect, text: &str, format: TextFormat) {
    let frame = rect.to_frame();
    slide
        .add_text_box(frame.x, frame.y, frame.width, frame.height)
        .add_paragraph(text, format);
}

/// Load a picture into `rect`, returning its shape ID.
fn try_place_picture(
    slide: &mut MutableSlide,
    image_path: &Path,
    rect: InchRect,
) -> std::result::Result<u32, ImageLoadError> {
    let frame = rect.to_frame();
    slide
        .add_picture(image_path, frame.x, frame.y, frame.width, frame.height)
        .map_err(|source| ImageLoadError {
            path: image_path.to_path_buf(),
            source,
        })
}

/// Place a picture, or log and record why it was skipped.
fn place_picture(
    skipped: &mut Vec<ImageLoadError>,
    slide: &mut MutableSlide,
    image_path: &Path,
    rect: InchRect,
) {
    match try_place_picture(slide, image_path, rect) {
        Ok(shape_id) => debug!("placed {} as shape {}", image_path.display(), shape_id),
        Err(err) => {
            warn!("{}", err);
            skipped.push(err);
        },
    }
}
