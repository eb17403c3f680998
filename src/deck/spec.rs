use std::path::PathBuf;

/// What goes below a slide's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideBody {
    /// A single subtitle line (title slides)
    Subtitle(String),
    /// One paragraph per bullet, in order
    Bullets(Vec<String>),
}

/// Declarative description of one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSpec {
    pub title: String,
    pub body: SlideBody,
    /// Picture placed on the right-hand side, if it can be loaded
    pub image_path: Option<PathBuf>,
    /// Speaker notes, attached verbatim
    pub speaker_note: Option<String>,
}

impl SlideSpec {
    /// A title slide with a subtitle.
    pub fn title_slide(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: SlideBody::Subtitle(subtitle.into()),
            image_path: None,
            speaker_note: None,
        }
    }

    /// A bullet slide.
    pub fn bullets<I, S>(title: impl Into<String>, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            body: SlideBody::Bullets(bullets.into_iter().map(Into::into).collect()),
            image_path: None,
            speaker_note: None,
        }
    }

    pub fn with_image(mut self, image_path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }

    pub fn with_note(mut self, speaker_note: impl Into<String>) -> Self {
        self.speaker_note = Some(speaker_note.into());
        self
    }

    /// Whether this is a title slide.
    pub fn is_title_slide(&self) -> bool {
        matches!(self.body, SlideBody::Subtitle(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let spec = SlideSpec::bullets("Agenda", ["one", "two"])
            .with_image("image2.png")
            .with_note("navigate");

        assert!(!spec.is_title_slide());
        assert_eq!(
            spec.body,
            SlideBody::Bullets(vec!["one".to_string(), "two".to_string()])
        );
        assert_eq!(spec.image_path, Some(PathBuf::from("image2.png")));
        assert_eq!(spec.speaker_note.as_deref(), Some("navigate"));

        let title = SlideSpec::title_slide("T", "S");
        assert!(title.is_title_slide());
        assert!(title.image_path.is_none());
        assert!(title.speaker_note.is_none());
    }
}
