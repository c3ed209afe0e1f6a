//! Document loading: bytes/file → [`Graph`].
//!
//! Sophia hands terms back in their N-Triples-ish display form; a small term
//! parser lifts those into our own model so the rest of the workspace never
//! sees sophia types. Quad formats are accepted but graph names are dropped:
//! a catalog document holds exactly one entry, so named graphs carry nothing
//! the projection reads.

use crate::{Graph, Literal, Node, Object, Statement};
use sophia::api::prelude::*;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Serializations accepted by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    NQuads,
    TriG,
    RdfXml,
}

impl RdfFormat {
    /// Map a file extension (lowercased) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nq" | "nquads" => Some(RdfFormat::NQuads),
            "trig" => Some(RdfFormat::TriG),
            "rdf" | "owl" | "xml" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }
}

/// A source document that could not be loaded. Carries the source identifier
/// so a multi-record run can report which record was skipped.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read {source_id}: {source}")]
    Io {
        source_id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported RDF format {extension:?} for {source_id}")]
    UnsupportedFormat {
        source_id: String,
        extension: String,
    },
    #[error("malformed RDF in {source_id}: {message}")]
    Malformed { source_id: String, message: String },
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TermError(String);

impl Graph {
    /// Load a graph from a file, picking the format from the extension.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        let source_id = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        let format =
            RdfFormat::from_extension(&extension).ok_or_else(|| ParseError::UnsupportedFormat {
                source_id: source_id.clone(),
                extension: extension.clone(),
            })?;
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            source_id: source_id.clone(),
            source,
        })?;
        Self::from_bytes(&bytes, format, &source_id)
    }

    /// Parse a graph from raw bytes in a known format.
    pub fn from_bytes(bytes: &[u8], format: RdfFormat, source_id: &str) -> Result<Self, ParseError> {
        let reader = BufReader::new(Cursor::new(bytes));
        let mut statements: Vec<Statement> = Vec::new();

        let malformed = |message: String| ParseError::Malformed {
            source_id: source_id.to_string(),
            message,
        };

        match format {
            RdfFormat::NTriples => {
                let mut parser = sophia::turtle::parser::nt::parse_bufread(reader);
                parser
                    .try_for_each_triple(|t| {
                        push_statement(
                            &mut statements,
                            &t.s().to_string(),
                            &t.p().to_string(),
                            &t.o().to_string(),
                        )
                    })
                    .map_err(|e| malformed(format!("N-Triples parse failed: {e}")))?;
            }
            RdfFormat::Turtle => {
                let mut parser = sophia::turtle::parser::turtle::parse_bufread(reader);
                parser
                    .try_for_each_triple(|t| {
                        push_statement(
                            &mut statements,
                            &t.s().to_string(),
                            &t.p().to_string(),
                            &t.o().to_string(),
                        )
                    })
                    .map_err(|e| malformed(format!("Turtle parse failed: {e}")))?;
            }
            RdfFormat::NQuads => {
                let mut parser = sophia::turtle::parser::nq::parse_bufread(reader);
                parser
                    .try_for_each_quad(|q| {
                        push_statement(
                            &mut statements,
                            &q.s().to_string(),
                            &q.p().to_string(),
                            &q.o().to_string(),
                        )
                    })
                    .map_err(|e| malformed(format!("N-Quads parse failed: {e}")))?;
            }
            RdfFormat::TriG => {
                let mut parser = sophia::turtle::parser::trig::parse_bufread(reader);
                parser
                    .try_for_each_quad(|q| {
                        push_statement(
                            &mut statements,
                            &q.s().to_string(),
                            &q.p().to_string(),
                            &q.o().to_string(),
                        )
                    })
                    .map_err(|e| malformed(format!("TriG parse failed: {e}")))?;
            }
            RdfFormat::RdfXml => {
                let mut parser = sophia::xml::parser::parse_bufread(reader);
                parser
                    .try_for_each_triple(|t| {
                        push_statement(
                            &mut statements,
                            &t.s().to_string(),
                            &t.p().to_string(),
                            &t.o().to_string(),
                        )
                    })
                    .map_err(|e| malformed(format!("RDF/XML parse failed: {e}")))?;
            }
        }

        tracing::debug!(source_id, statements = statements.len(), "parsed graph");
        Ok(Graph::new(source_id.to_string(), statements))
    }
}

fn push_statement(
    out: &mut Vec<Statement>,
    subject: &str,
    predicate: &str,
    object: &str,
) -> Result<(), TermError> {
    let subject = parse_node(subject)?;
    // Predicates are IRIs by construction; anything else is a parser artifact
    // we have no use for.
    let Node::Iri(predicate) = parse_node(predicate)? else {
        return Ok(());
    };
    let object = parse_term(object)?;
    out.push(Statement {
        subject,
        predicate,
        object,
    });
    Ok(())
}

fn parse_node(term: &str) -> Result<Node, TermError> {
    match parse_term(term)? {
        Object::Node(node) => Ok(node),
        Object::Literal(_) => Err(TermError(format!(
            "expected IRI or blank node, got literal: {term}"
        ))),
    }
}

/// Parse a term from its N-Triples-ish display form: `<iri>`, `_:label`, or
/// `"lexical"@lang` / `"lexical"^^<datatype>`.
fn parse_term(term: &str) -> Result<Object, TermError> {
    let s = term.trim();

    if let Some(iri) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(Object::Node(Node::Iri(iri.to_string())));
    }

    if let Some(label) = s.strip_prefix("_:") {
        return Ok(Object::Node(Node::Blank(label.to_string())));
    }

    if s.starts_with('"') {
        let end = closing_quote(s)
            .ok_or_else(|| TermError(format!("literal missing closing quote: {s}")))?;
        let lexical = unescape_literal(&s[1..end]);
        let suffix = s[end + 1..].trim();

        let mut language = None;
        let mut datatype = None;
        if let Some(lang) = suffix.strip_prefix('@') {
            language = Some(lang.to_string());
        } else if let Some(dt) = suffix.strip_prefix("^^") {
            let dt = dt.trim();
            datatype = dt
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .or(if dt.is_empty() { None } else { Some(dt) })
                .map(str::to_string);
        }

        return Ok(Object::Literal(Literal {
            lexical,
            datatype,
            language,
        }));
    }

    Err(TermError(format!("unsupported RDF term form: {s}")))
}

/// Byte index of the first unescaped closing quote, or None.
fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in s.char_indices().skip(1) {
        match ch {
            '"' if !escaped => return Some(i),
            '\\' => escaped = !escaped,
            _ => escaped = false,
        }
    }
    None
}

fn unescape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
