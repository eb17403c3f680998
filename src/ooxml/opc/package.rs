/// The in-memory OPC package.
///
/// OpcPackage holds package-level relationships and the parts to be written,
/// in the order they were added.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;

#[derive(Debug)]
pub struct OpcPackage {
    /// Package-level relationships (`/_rels/.rels`)
    rels: Relationships,

    parts: Vec<Part>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: Vec::new(),
        }
    }

    /// Add a part, rejecting a second part with the same partname.
    pub fn add_part(&mut self, part: Part) -> Result<&mut Part> {
        if self.contains(part.partname()) {
            return Err(OpcError::DuplicatePart(part.partname().to_string()));
        }
        self.parts.push(part);
        let last = self.parts.len() - 1;
        Ok(&mut self.parts[last])
    }

    /// Check whether a part with this partname exists.
    pub fn contains(&self, partname: &PackURI) -> bool {
        self.parts.iter().any(|p| p.partname() == partname)
    }

    /// Get a part by partname.
    pub fn part(&self, partname: &PackURI) -> Result<&Part> {
        self.parts
            .iter()
            .find(|p| p.partname() == partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get mutable access to a part by partname.
    pub fn part_mut(&mut self, partname: &PackURI) -> Result<&mut Part> {
        self.parts
            .iter_mut()
            .find(|p| p.partname() == partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Add or get a package-level relationship to a part and return its rId.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        self.rels
            .get_or_add(reltype, &target.relative_ref(PACKAGE_URI))
    }

    /// Get the package-level relationships.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Iterate over all parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Get the number of parts.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_part_rejected() {
        let mut pkg = OpcPackage::new();
        let uri = PackURI::new("/ppt/presentation.xml").unwrap();
        pkg.add_part(Part::from_xml(uri.clone(), "application/xml", "<a/>"))
            .unwrap();

        let err = pkg
            .add_part(Part::from_xml(uri.clone(), "application/xml", "<b/>"))
            .unwrap_err();
        assert!(matches!(err, OpcError::DuplicatePart(_)));
        assert_eq!(pkg.part_count(), 1);
        assert_eq!(pkg.part(&uri).unwrap().blob(), b"<a/>");
    }

    #[test]
    fn test_package_relationship_target() {
        let mut pkg = OpcPackage::new();
        let uri = PackURI::new("/ppt/presentation.xml").unwrap();
        let r_id = pkg.relate_to(&uri, "officeDocument");
        assert_eq!(r_id, "rId1");
        assert_eq!(
            pkg.rels().get("rId1").unwrap().target_ref(),
            "ppt/presentation.xml"
        );
    }
}
