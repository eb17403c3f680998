//! Office Open XML (OOXML) support for writing PowerPoint packages.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **PresentationML** (`pptx`): the mutable presentation model, its XML
//!    serialization, and a summary reader for saved packages
//!
//! # Example
//!
//! ```rust,no_run
//! use slidepack::ooxml::pptx::{MutablePresentation, TextFormat};
//!
//! let mut pres = MutablePresentation::widescreen();
//! let slide = pres.add_slide();
//! slide
//!     .add_text_box(548_640, 457_200, 6_858_000, 1_463_040)
//!     .add_paragraph("Hello", TextFormat::new().size(36.0).bold(true));
//! pres.save("hello.pptx")?;
//! # Ok::<(), slidepack::OoxmlError>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

pub use error::{OoxmlError, Result};
