//! RDF term model and queryable graph for Gutenmeta (boundary adapter).
//!
//! This crate parses per-book RDF catalog documents (untrusted input) into an
//! in-memory, insertion-ordered [`Graph`] and exposes the handful of query
//! operations the metadata projection needs:
//!
//! - find subjects carrying a given `rdf:type`,
//! - look up the first object of a (subject, predicate) pair,
//! - iterate all objects of a (subject, predicate) pair in parse order.
//!
//! Parsing uses **Sophia** and accepts the common RDF serializations:
//! N-Triples (`.nt`), Turtle (`.ttl`), N-Quads (`.nq`), TriG (`.trig`) and
//! RDF/XML (`.rdf`, `.owl`, `.xml` — the Gutenberg corpus format).
//! Parser internals never escape this crate; failures surface as
//! [`ParseError`] carrying the source identifier and the underlying cause.

pub mod loader;

pub use loader::{ParseError, RdfFormat};

pub const RDF_TYPE_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

// ============================================================================
// Term model
// ============================================================================

/// A non-literal RDF term: a named resource or a blank node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Iri(String),
    Blank(String),
}

impl Node {
    /// Text form used when a node appears where the projection wants a
    /// string: the IRI itself, or the blank node label.
    pub fn as_text(&self) -> &str {
        match self {
            Node::Iri(iri) => iri,
            Node::Blank(label) => label,
        }
    }
}

/// An RDF literal. Datatype and language tag are retained but the projection
/// only ever reads the lexical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

/// The object position of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    Node(Node),
    Literal(Literal),
}

impl Object {
    /// String form of the object: lexical form for literals, IRI or blank
    /// label for nodes. Mirrors how downstream consumers stringify values.
    pub fn as_text(&self) -> &str {
        match self {
            Object::Node(node) => node.as_text(),
            Object::Literal(lit) => &lit.lexical,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Object::Node(node) => Some(node),
            Object::Literal(_) => None,
        }
    }
}

/// One (subject, predicate, object) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub subject: Node,
    pub predicate: String,
    pub object: Object,
}

// ============================================================================
// Graph
// ============================================================================

/// An immutable set of statements from one source document.
///
/// Statements are stored in parse order, so every iteration below is stable
/// within one parse of one document. "First" always means first in parse
/// order, not sorted order.
#[derive(Debug, Clone)]
pub struct Graph {
    source_id: String,
    statements: Vec<Statement>,
}

impl Graph {
    pub(crate) fn new(source_id: String, statements: Vec<Statement>) -> Self {
        Self {
            source_id,
            statements,
        }
    }

    /// Identifier of the document this graph was parsed from (path or
    /// `<memory>`).
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Subjects asserted to be of `type_iri` via `rdf:type`, in parse order.
    ///
    /// Callers that need a single root entity take the first; when a document
    /// declares several, the first in parse order is authoritative.
    pub fn subjects_with_type<'a>(
        &'a self,
        type_iri: &'a str,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.statements.iter().filter_map(move |stmt| {
            if stmt.predicate != RDF_TYPE_IRI {
                return None;
            }
            match &stmt.object {
                Object::Node(Node::Iri(iri)) if iri == type_iri => Some(&stmt.subject),
                _ => None,
            }
        })
    }

    /// First object of (subject, predicate) in parse order.
    ///
    /// The catalog schema does not repeat scalar predicates; when a malformed
    /// document does, this is documented first-value behavior.
    pub fn value<'a>(&'a self, subject: &'a Node, predicate: &'a str) -> Option<&'a Object> {
        self.objects(subject, predicate).next()
    }

    /// All objects of (subject, predicate), in parse order.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Node,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.statements.iter().filter_map(move |stmt| {
            if stmt.subject == *subject && stmt.predicate == predicate {
                Some(&stmt.object)
            } else {
                None
            }
        })
    }

    /// Resolve the string value of property `predicate` on `subject`:
    /// first object in parse order, stringified via [`Object::as_text`].
    pub fn text_value<'a>(&'a self, subject: &'a Node, predicate: &'a str) -> Option<&'a str> {
        self.value(subject, predicate).map(Object::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph {
        let ex = |name: &str| format!("http://example.org/{name}");
        let lit = |s: &str| {
            Object::Literal(Literal {
                lexical: s.to_string(),
                datatype: None,
                language: None,
            })
        };
        let statements = vec![
            Statement {
                subject: Node::Iri(ex("book")),
                predicate: RDF_TYPE_IRI.to_string(),
                object: Object::Node(Node::Iri(ex("Book"))),
            },
            Statement {
                subject: Node::Iri(ex("book")),
                predicate: ex("title"),
                object: lit("first"),
            },
            Statement {
                subject: Node::Iri(ex("book")),
                predicate: ex("title"),
                object: lit("second"),
            },
            Statement {
                subject: Node::Iri(ex("shelf")),
                predicate: RDF_TYPE_IRI.to_string(),
                object: Object::Node(Node::Iri(ex("Book"))),
            },
        ];
        Graph::new("<memory>".to_string(), statements)
    }

    #[test]
    fn subjects_with_type_yields_parse_order() {
        let g = graph();
        let subjects: Vec<&Node> = g.subjects_with_type("http://example.org/Book").collect();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0], &Node::Iri("http://example.org/book".into()));
    }

    #[test]
    fn value_takes_first_in_parse_order() {
        let g = graph();
        let subject = Node::Iri("http://example.org/book".into());
        assert_eq!(
            g.text_value(&subject, "http://example.org/title"),
            Some("first")
        );
    }

    #[test]
    fn objects_preserve_order() {
        let g = graph();
        let subject = Node::Iri("http://example.org/book".into());
        let titles: Vec<&str> = g
            .objects(&subject, "http://example.org/title")
            .map(Object::as_text)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn missing_predicate_is_none() {
        let g = graph();
        let subject = Node::Iri("http://example.org/book".into());
        assert!(g.value(&subject, "http://example.org/missing").is_none());
    }
}
