//! slidepack - build fixed-layout PowerPoint decks
//!
//! This library writes Office Open XML presentations (.pptx) from a declarative
//! list of slides. It carries its own small PresentationML writer rather than
//! wrapping an Office automation layer.
//!
//! # Layers
//!
//! - **`deck`**: [`DeckBuilder`] turns [`SlideSpec`]s into title and bullet slides
//!   at fixed positions, with optional pictures and speaker notes
//! - **`ooxml::pptx`**: the mutable presentation model, package assembly and a
//!   summary reader for saved files
//! - **`ooxml::opc`**: part names, relationships, content types and the ZIP container
//! - **`common`**: XML escaping and EMU unit conversion
//!
//! # Example
//!
//! ```no_run
//! use slidepack::{DeckBuilder, SlideSpec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = DeckBuilder::new().with_title("Carbon and GDP");
//! builder.build(&SlideSpec::title_slide("Carbon and GDP", "Decoupling paths").with_image("image1.png"));
//! builder.build(&SlideSpec::bullets("Agenda", ["Background", "Method", "Findings"]));
//!
//! for skipped in builder.skipped_images() {
//!     println!("skipped: {}", skipped);
//! }
//! builder.finalize("deck.pptx")?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod deck;
pub mod ooxml;

pub use deck::{DeckBuilder, ImageLoadError, SlideBody, SlideHandle, SlideSpec};
pub use ooxml::{OoxmlError, Result};
