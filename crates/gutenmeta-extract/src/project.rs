//! The graph-to-record projection.
//!
//! Given a parsed graph and a record id, locate the first `pgterms:ebook`
//! subject and walk a fixed set of predicate paths into a [`BookRecord`].
//! Absence of a root entity is a handled outcome (`None`), not an error.
//!
//! Determinism: "first" always means first in parse order (the graph is
//! insertion-ordered), and every sequence is collected in traversal order.
//! Where the corpus schema does not repeat a predicate but a document does,
//! the projection takes the first value; this is documented behavior, not a
//! merge.

use crate::record::{BookRecord, Creator, FileFormat, IntOrString};
use crate::vocab;
use gutenmeta_rdf::{Graph, Node, Object};

/// A projected record plus its populated top-level field count.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub record: BookRecord,
    pub populated: usize,
}

/// Project `graph` into a metadata record.
///
/// Returns `None` when the graph holds no `pgterms:ebook` subject; the caller
/// logs and skips that record.
pub fn project(graph: &Graph, record_id: &str) -> Option<Projection> {
    let root = graph.subjects_with_type(vocab::PG_EBOOK).next()?.clone();

    let mut record = BookRecord {
        publisher: scalar(graph, &root, vocab::DC_PUBLISHER),
        issued: scalar(graph, &root, vocab::DC_ISSUED),
        rights: scalar(graph, &root, vocab::DC_RIGHTS),
        title: scalar(graph, &root, vocab::DC_TITLE),
        alternative_title: scalar(graph, &root, vocab::DC_ALTERNATIVE),
        description: scalar(graph, &root, vocab::DC_DESCRIPTION),
        marc508: scalar(graph, &root, vocab::PG_MARC508),
        marc520: scalar(graph, &root, vocab::PG_MARC520),
        downloads: int_field(graph, &root, vocab::PG_DOWNLOADS),
        ..Default::default()
    };

    for creator in graph.objects(&root, vocab::DC_CREATOR) {
        record.creators.push(project_creator(graph, creator));
    }

    record.languages = wrapped_values(graph, &root, vocab::DC_LANGUAGE);
    record.subjects = wrapped_values(graph, &root, vocab::DC_SUBJECT);
    record.types = wrapped_values(graph, &root, vocab::DC_TYPE);
    record.bookshelves = wrapped_values(graph, &root, vocab::PG_BOOKSHELF);

    for file in graph.objects(&root, vocab::DC_HAS_FORMAT) {
        record.formats.push(project_format(graph, file));
    }

    let populated = record.populated_fields();
    tracing::debug!(record_id, populated, "projected catalog entry");
    Some(Projection { record, populated })
}

/// First value of (subject, predicate), stringified. Empty strings count as
/// absent, matching the corpus convention that an empty literal carries no
/// information.
fn scalar(graph: &Graph, subject: &Node, predicate: &str) -> Option<String> {
    graph
        .text_value(subject, predicate)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Scalar with integer coercion and string fallback. A present-but-malformed
/// value is kept as text, never dropped.
fn int_field(graph: &Graph, subject: &Node, predicate: &str) -> Option<IntOrString> {
    scalar(graph, subject, predicate).map(|s| IntOrString::coerce(&s))
}

/// Two-hop dereference: predicate → wrapper node → `rdf:value` literal.
/// Collects non-empty values in traversal order.
fn wrapped_values(graph: &Graph, subject: &Node, predicate: &str) -> Vec<String> {
    graph
        .objects(subject, predicate)
        .filter_map(Object::as_node)
        .filter_map(|wrapper| scalar(graph, wrapper, vocab::RDF_VALUE))
        .collect()
}

/// One sub-record per creator object, even when nothing is extractable from
/// it. A literal in creator position yields an empty sub-record: there is no
/// node to look fields up on.
fn project_creator(graph: &Graph, creator: &Object) -> Creator {
    let Some(agent) = creator.as_node() else {
        return Creator::default();
    };
    Creator {
        name: scalar(graph, agent, vocab::PG_NAME),
        birthdate: int_field(graph, agent, vocab::PG_BIRTHDATE),
        deathdate: int_field(graph, agent, vocab::PG_DEATHDATE),
        alias: scalar(graph, agent, vocab::PG_ALIAS),
        webpage: scalar(graph, agent, vocab::PG_WEBPAGE),
    }
}

/// The URL is the file node's own identifier and is always set; the
/// remaining fields are independent optional lookups.
fn project_format(graph: &Graph, file: &Object) -> FileFormat {
    let mut out = FileFormat::new(file.as_text());
    if let Some(node) = file.as_node() {
        out.extent = int_field(graph, node, vocab::DC_EXTENT);
        out.modified = scalar(graph, node, vocab::DC_MODIFIED);
        out.format = wrapped_values(graph, node, vocab::DC_FORMAT);
    }
    out
}
