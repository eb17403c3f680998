/// Open Packaging Conventions (OPC) implementation.
///
/// The subset of Open Packaging Conventions needed to write (and read back) a
/// PresentationML package:
///
/// - Part names and relative references (`PackURI`)
/// - Part and package relationships (`.rels` parts)
/// - `[Content_Types].xml` generation
/// - ZIP-based physical packaging
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
