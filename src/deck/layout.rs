//! Fixed slide geometry and text styles.
//!
//! Positions are in inches on a 13.33" x 7.5" slide; text sits on the left and
//! pictures in a column on the right.

use crate::common::inches_to_emu;
use crate::ooxml::pptx::{Frame, TextFormat};

/// A rectangle on the slide, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InchRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl InchRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Convert to a shape frame in EMUs.
    pub fn to_frame(self) -> Frame {
        Frame::new(
            inches_to_emu(self.left),
            inches_to_emu(self.top),
            inches_to_emu(self.width),
            inches_to_emu(self.height),
        )
    }
}

/// Typeface used for every run in the deck.
pub const FONT_FAMILY: &str = "Arial";

// Title slide
pub const TITLE_SLIDE_TITLE: InchRect = InchRect::new(0.6, 0.5, 7.5, 1.6);
pub const TITLE_SLIDE_SUBTITLE: InchRect = InchRect::new(0.6, 2.0, 7.5, 0.6);
pub const TITLE_SLIDE_PICTURE: InchRect = InchRect::new(9.0, 0.4, 3.1, 3.6);

// Bullet slide
pub const BULLET_SLIDE_TITLE: InchRect = InchRect::new(0.6, 0.3, 11.5, 0.6);
pub const BULLET_SLIDE_BODY: InchRect = InchRect::new(0.6, 1.1, 7.8, 5.5);
pub const BULLET_SLIDE_PICTURE: InchRect = InchRect::new(9.0, 1.0, 3.1, 4.5);

/// Dark blue
pub const TITLE_COLOR: &str = "0B3A66";
/// Medium blue
pub const SUBTITLE_COLOR: &str = "336699";
pub const BULLET_COLOR: &str = "000000";

pub fn title_slide_title_format() -> TextFormat {
    TextFormat::new()
        .font(FONT_FAMILY)
        .size(36.0)
        .bold(true)
        .color(TITLE_COLOR)
}

pub fn title_slide_subtitle_format() -> TextFormat {
    TextFormat::new()
        .font(FONT_FAMILY)
        .size(18.0)
        .color(SUBTITLE_COLOR)
}

/// Bullet slide titles keep the theme text color.
pub fn bullet_slide_title_format() -> TextFormat {
    TextFormat::new().font(FONT_FAMILY).size(28.0).bold(true)
}

pub fn bullet_format() -> TextFormat {
    TextFormat::new()
        .font(FONT_FAMILY)
        .size(18.0)
        .color(BULLET_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_in_emu() {
        assert_eq!(
            TITLE_SLIDE_PICTURE.to_frame(),
            Frame::new(8_229_600, 365_760, 2_834_640, 3_291_840)
        );
        assert_eq!(
            BULLET_SLIDE_BODY.to_frame(),
            Frame::new(548_640, 1_005_840, 7_132_320, 5_029_200)
        );
    }

    #[test]
    fn test_text_stays_left_of_pictures() {
        for (text, picture) in [
            (TITLE_SLIDE_TITLE, TITLE_SLIDE_PICTURE),
            (TITLE_SLIDE_SUBTITLE, TITLE_SLIDE_PICTURE),
            (BULLET_SLIDE_BODY, BULLET_SLIDE_PICTURE),
        ] {
            assert!(text.left + text.width <= picture.left);
        }
    }

    #[test]
    fn test_formats() {
        let title = title_slide_title_format();
        assert_eq!(title.font.as_deref(), Some("Arial"));
        assert_eq!(title.size, Some(36.0));
        assert_eq!(title.bold, Some(true));
        assert_eq!(title.color.as_deref(), Some("0B3A66"));

        assert!(bullet_slide_title_format().color.is_none());
        assert_eq!(bullet_format().color.as_deref(), Some("000000"));
    }
}
