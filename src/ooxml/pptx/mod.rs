//! PowerPoint (.pptx) presentation support.
//!
//! Writing goes through [`MutablePresentation`]: slides are appended, filled with
//! text boxes and pictures, and the whole package (slide master, blank layout,
//! theme, notes slides, media) is assembled when the presentation is saved.
//! [`PresentationSummary`] reads a saved file back for verification.
//!
//! # Example
//!
//! ```rust,no_run
//! use slidepack::common::inches_to_emu;
//! use slidepack::ooxml::pptx::{MutablePresentation, PresentationSummary, TextFormat};
//!
//! let mut pres = MutablePresentation::widescreen();
//! let slide = pres.add_slide();
//! slide
//!     .add_text_box(inches_to_emu(0.6), inches_to_emu(0.5), inches_to_emu(7.5), inches_to_emu(1.6))
//!     .add_paragraph("Quarterly review", TextFormat::new().font("Arial").size(36.0).bold(true));
//! slide.set_notes("Open with the headline number.");
//! pres.save("review.pptx")?;
//!
//! let summary = PresentationSummary::open("review.pptx")?;
//! assert_eq!(summary.slide_count(), 1);
//! # Ok::<(), slidepack::OoxmlError>(())
//! ```

pub mod format;
pub mod summary;
pub mod template;
pub mod writer;

pub use format::{ImageFormat, TextFormat};
pub use summary::{PictureSummary, PresentationSummary, SlideSummary};
pub use writer::{Frame, MutablePresentation, MutableShape, MutableSlide, TextParagraph};
