//! Gutenmeta CLI
//!
//! Extracts metadata records from per-book RDF catalog documents and stores
//! them in a record sink (local JSON directory, or Firestore).
//!
//! One diagnostic line per record; a bad record is skipped, never fatal.

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use gutenmeta_extract::project;
use gutenmeta_rdf::Graph;
use gutenmeta_store::{FirestoreSink, JsonDirSink, RecordSink};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gutenmeta")]
#[command(author, version, about = "Gutenberg RDF catalog extraction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records from per-book RDF files and store them.
    ///
    /// Each book id resolves to `<base-dir>/<id>/pg<id>.rdf`. Records go to
    /// a JSON directory by default, or to Firestore with `--firestore`.
    Extract {
        /// Book ids to process (repeatable).
        ids: Vec<String>,

        /// Read additional book ids from a file (one per line; `#` comments
        /// allowed).
        #[arg(long)]
        ids_file: Option<PathBuf>,

        /// Directory holding the per-book RDF files.
        #[arg(long, default_value = "./tmp/cache/epub")]
        base_dir: PathBuf,

        /// Output directory for the JSON sink.
        #[arg(long, default_value = "build/records")]
        out_dir: PathBuf,

        /// Store records in Firestore instead of the JSON directory.
        #[arg(long)]
        firestore: bool,

        /// Google Cloud project id (defaults to $GOOGLE_CLOUD_PROJECT).
        #[arg(long)]
        project: Option<String>,

        /// Firestore collection path for the records.
        #[arg(long)]
        collection: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            ids,
            ids_file,
            base_dir,
            out_dir,
            firestore,
            project,
            collection,
        } => run_extract(
            ids, ids_file, base_dir, out_dir, firestore, project, collection,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_extract(
    mut ids: Vec<String>,
    ids_file: Option<PathBuf>,
    base_dir: PathBuf,
    out_dir: PathBuf,
    firestore: bool,
    project_id: Option<String>,
    collection: Option<String>,
) -> Result<()> {
    if let Some(path) = &ids_file {
        ids.extend(read_ids_file(path)?);
    }
    if ids.is_empty() {
        bail!("no book ids given (pass ids as arguments or via --ids-file)");
    }

    let sink = build_sink(firestore, &out_dir, project_id, collection)?;

    let mut stored = 0usize;
    let mut skipped = 0usize;
    for id in &ids {
        match process_book(sink.as_ref(), &base_dir, id) {
            Ok(populated) => {
                println!(
                    "{} {id}: stored record ({populated} fields)",
                    "ok".green().bold()
                );
                stored += 1;
            }
            Err(reason) => {
                println!("{} {id}: {reason}", "skip".yellow().bold());
                skipped += 1;
            }
        }
    }

    println!(
        "{} {stored} stored, {skipped} skipped",
        "done".bold()
    );
    if stored == 0 {
        bail!("no record was stored");
    }
    Ok(())
}

/// One record, end to end: locate → load → project → put. Every failure is a
/// per-record skip reason, never fatal for the run.
fn process_book(sink: &dyn RecordSink, base_dir: &Path, id: &str) -> Result<usize, String> {
    let path = base_dir.join(id).join(format!("pg{id}.rdf"));
    if !path.exists() {
        return Err(format!("source file not found at {}", path.display()));
    }
    let graph = Graph::from_file(&path).map_err(|e| e.to_string())?;
    let projection = project(&graph, id).ok_or_else(|| "no catalog entry in graph".to_string())?;
    sink.put(id, &projection.record).map_err(|e| e.to_string())?;
    Ok(projection.populated)
}

fn build_sink(
    firestore: bool,
    out_dir: &Path,
    project_id: Option<String>,
    collection: Option<String>,
) -> Result<Box<dyn RecordSink>> {
    if !firestore {
        return Ok(Box::new(JsonDirSink::new(out_dir)?));
    }

    let project_id = project_id
        .or_else(|| env::var("GOOGLE_CLOUD_PROJECT").ok())
        .ok_or_else(|| anyhow!("--firestore needs --project or $GOOGLE_CLOUD_PROJECT"))?;
    let token = env::var("GOOGLE_APPLICATION_TOKEN")
        .map_err(|_| anyhow!("--firestore needs an OAuth token in $GOOGLE_APPLICATION_TOKEN"))?;

    let mut sink = FirestoreSink::new(project_id, token)?;
    if let Some(path) = collection {
        sink = sink.with_collection_path(path);
    }
    Ok(Box::new(sink))
}

/// One id per line; blank lines and `#` comments are ignored.
fn read_ids_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read ids file {}: {e}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn ids_file_skips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# favorites").unwrap();
        writeln!(file, "11").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  2701  ").unwrap();
        let ids = read_ids_file(file.path()).unwrap();
        assert_eq!(ids, vec!["11", "2701"]);
    }

    #[test]
    fn missing_source_file_is_a_skip_reason() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = JsonDirSink::new(tmp.path().join("out")).unwrap();
        let reason = process_book(&sink, tmp.path(), "999").expect_err("no source file");
        assert!(reason.contains("not found"), "got: {reason}");
    }

    #[test]
    fn bad_record_does_not_abort_the_next_one() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();

        // Book 1: unparseable document.
        fs::create_dir_all(base.join("1")).unwrap();
        fs::write(base.join("1/pg1.rdf"), b"not rdf at all").unwrap();

        // Book 2: well-formed entry.
        fs::create_dir_all(base.join("2")).unwrap();
        fs::write(
            base.join("2/pg2.rdf"),
            br#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dcterms="http://purl.org/dc/terms/"
         xmlns:pgterms="http://www.gutenberg.org/2009/pgterms/">
  <pgterms:ebook rdf:about="http://www.gutenberg.org/ebooks/2">
    <dcterms:title>Second Book</dcterms:title>
  </pgterms:ebook>
</rdf:RDF>
"#,
        )
        .unwrap();

        let sink = JsonDirSink::new(base.join("out")).unwrap();
        assert!(process_book(&sink, base, "1").is_err());
        let populated = process_book(&sink, base, "2").expect("second record stored");
        assert_eq!(populated, 1);
        assert!(base.join("out/2.json").exists());
    }
}
