//! Fixed predicate/type vocabulary for the Gutenberg catalog corpus.
//!
//! These IRIs are part of the interchange contract with the existing corpus
//! of per-book RDF documents and must match it exactly.

/// `pgterms:` — Project Gutenberg terms.
pub const PGTERMS_NS: &str = "http://www.gutenberg.org/2009/pgterms/";
/// `dcterms:` — Dublin Core terms.
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
/// `dcam:` — Dublin Core abstract model. Carried by source documents (e.g.
/// on `memberOf` annotations inside subject wrappers); the projection never
/// dereferences it, but it is part of the corpus vocabulary.
pub const DCAM_NS: &str = "http://purl.org/dc/dcam/";
/// `rdf:` — RDF syntax namespace.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

// rdf:
pub const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";

// pgterms: — the catalog-entry type and its direct fields.
pub const PG_EBOOK: &str = "http://www.gutenberg.org/2009/pgterms/ebook";
pub const PG_DOWNLOADS: &str = "http://www.gutenberg.org/2009/pgterms/downloads";
pub const PG_MARC508: &str = "http://www.gutenberg.org/2009/pgterms/marc508";
pub const PG_MARC520: &str = "http://www.gutenberg.org/2009/pgterms/marc520";
pub const PG_BOOKSHELF: &str = "http://www.gutenberg.org/2009/pgterms/bookshelf";

// pgterms: — agent (creator) fields.
pub const PG_NAME: &str = "http://www.gutenberg.org/2009/pgterms/name";
pub const PG_BIRTHDATE: &str = "http://www.gutenberg.org/2009/pgterms/birthdate";
pub const PG_DEATHDATE: &str = "http://www.gutenberg.org/2009/pgterms/deathdate";
pub const PG_ALIAS: &str = "http://www.gutenberg.org/2009/pgterms/alias";
pub const PG_WEBPAGE: &str = "http://www.gutenberg.org/2009/pgterms/webpage";

// dcterms: — scalar and multi-valued entry fields.
pub const DC_PUBLISHER: &str = "http://purl.org/dc/terms/publisher";
pub const DC_ISSUED: &str = "http://purl.org/dc/terms/issued";
pub const DC_RIGHTS: &str = "http://purl.org/dc/terms/rights";
pub const DC_TITLE: &str = "http://purl.org/dc/terms/title";
pub const DC_ALTERNATIVE: &str = "http://purl.org/dc/terms/alternative";
pub const DC_DESCRIPTION: &str = "http://purl.org/dc/terms/description";
pub const DC_LANGUAGE: &str = "http://purl.org/dc/terms/language";
pub const DC_SUBJECT: &str = "http://purl.org/dc/terms/subject";
pub const DC_TYPE: &str = "http://purl.org/dc/terms/type";
pub const DC_CREATOR: &str = "http://purl.org/dc/terms/creator";

// dcterms: — file (format) fields.
pub const DC_HAS_FORMAT: &str = "http://purl.org/dc/terms/hasFormat";
pub const DC_EXTENT: &str = "http://purl.org/dc/terms/extent";
pub const DC_MODIFIED: &str = "http://purl.org/dc/terms/modified";
pub const DC_FORMAT: &str = "http://purl.org/dc/terms/format";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_iris_live_in_their_namespaces() {
        for iri in [PG_EBOOK, PG_DOWNLOADS, PG_NAME, PG_BOOKSHELF] {
            assert!(iri.starts_with(PGTERMS_NS), "{iri}");
        }
        for iri in [DC_TITLE, DC_CREATOR, DC_HAS_FORMAT, DC_FORMAT] {
            assert!(iri.starts_with(DCTERMS_NS), "{iri}");
        }
        assert!(RDF_VALUE.starts_with(RDF_NS));
    }
}
