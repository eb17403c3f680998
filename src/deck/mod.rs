//! Fixed-layout slide deck building.
//!
//! A [`DeckBuilder`] owns one widescreen presentation and appends slides to it
//! from [`SlideSpec`]s: a title slide (title and subtitle) or a bullet slide
//! (title and a list of bullets), each with an optional picture on the right
//! and optional speaker notes. Every shape goes to a fixed position defined in
//! [`layout`]. Pictures that can't be loaded are logged and skipped; only
//! writing the final file can fail.
//!
//! # Example
//!
//! ```rust,no_run
//! use slidepack::deck::{DeckBuilder, SlideSpec};
//!
//! let mut builder = DeckBuilder::new();
//! builder.build_all(&[
//!     SlideSpec::title_slide("Quarterly review", "Finance team").with_image("logo.png"),
//!     SlideSpec::bullets("Agenda", ["Results", "Outlook"]).with_note("Keep it short."),
//! ]);
//! let path = builder.finalize("review.pptx")?;
//! println!("Saved presentation to {}", path.display());
//! # Ok::<(), slidepack::OoxmlError>(())
//! ```

mod builder;
pub mod content;
pub mod layout;
mod spec;

pub use builder::{DeckBuilder, ImageLoadError, SlideHandle};
pub use content::{DECK_TITLE, OUTPUT_FILE, carbon_gdp_slides};
pub use spec::{SlideBody, SlideSpec};
