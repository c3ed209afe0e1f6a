//! Firestore REST sink.
//!
//! Stores each record at
//! `projects/<project>/databases/(default)/documents/<collection>/<id>`
//! via a `PATCH` with no field mask, which replaces the document whole.
//! Records are re-encoded into Firestore's typed value JSON
//! (`stringValue` / `integerValue` / `arrayValue` / `mapValue`).
//!
//! Auth is a caller-supplied OAuth bearer token; minting one (service
//! accounts, ADC) is outside this crate.

use crate::{RecordSink, SinkError};
use gutenmeta_extract::BookRecord;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

/// Collection path used by the Gutenberg corpus.
pub const DEFAULT_COLLECTION_PATH: &str = "repositories/projectgutenberg/books";

const FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com/v1/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct FirestoreSink {
    client: Client,
    project_id: String,
    token: String,
    collection_path: String,
}

impl FirestoreSink {
    /// Build the HTTP client and bind it to a project. The sink owns the
    /// connection for its lifetime; drop it after the last `put`.
    pub fn new(project_id: impl Into<String>, token: impl Into<String>) -> Result<Self, SinkError> {
        let project_id = project_id.into();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SinkError::Init {
                message: format!("failed to build http client: {e}"),
            })?;
        Ok(Self {
            client,
            project_id,
            token: token.into(),
            collection_path: DEFAULT_COLLECTION_PATH.to_string(),
        })
    }

    pub fn with_collection_path(mut self, path: impl Into<String>) -> Self {
        self.collection_path = path.into();
        self
    }

    fn document_url(&self, record_id: &str) -> Result<Url, SinkError> {
        let path = format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.project_id, self.collection_path, record_id
        );
        Url::parse(FIRESTORE_ENDPOINT)
            .and_then(|base| base.join(&path))
            .map_err(|e| SinkError::Remote {
                record_id: record_id.to_string(),
                message: format!("invalid document url: {e}"),
            })
    }
}

impl RecordSink for FirestoreSink {
    fn put(&self, record_id: &str, record: &BookRecord) -> Result<(), SinkError> {
        let json = serde_json::to_value(record).map_err(|source| SinkError::Serialize {
            record_id: record_id.to_string(),
            source,
        })?;
        let body = serde_json::json!({ "fields": firestore_fields(&json) });

        let url = self.document_url(record_id)?;
        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| SinkError::Remote {
                record_id: record_id.to_string(),
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(SinkError::Remote {
                record_id: record_id.to_string(),
                message: format!("http status {status}: {detail}"),
            });
        }
        tracing::debug!(record_id, "stored record in firestore");
        Ok(())
    }
}

// ============================================================================
// Typed value mapping
// ============================================================================

/// Map a plain JSON object to Firestore's `fields` map.
fn firestore_fields(value: &serde_json::Value) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    if let Some(map) = value.as_object() {
        for (k, v) in map {
            fields.insert(k.clone(), firestore_value(v));
        }
    }
    serde_json::Value::Object(fields)
}

fn firestore_value(value: &serde_json::Value) -> serde_json::Value {
    use serde_json::json;
    match value {
        serde_json::Value::Null => json!({ "nullValue": null }),
        serde_json::Value::Bool(b) => json!({ "booleanValue": b }),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Firestore wants 64-bit integers as strings.
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        serde_json::Value::String(s) => json!({ "stringValue": s }),
        serde_json::Value::Array(items) => {
            let values: Vec<serde_json::Value> = items.iter().map(firestore_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        serde_json::Value::Object(_) => {
            json!({ "mapValue": { "fields": firestore_fields(value) } })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_map_to_typed_values() {
        assert_eq!(
            firestore_value(&json!("Moby-Dick")),
            json!({"stringValue": "Moby-Dick"})
        );
        assert_eq!(
            firestore_value(&json!(500000)),
            json!({"integerValue": "500000"})
        );
        assert_eq!(firestore_value(&json!(null)), json!({"nullValue": null}));
    }

    #[test]
    fn nested_record_maps_to_array_and_map_values() {
        let record = json!({
            "title": "Moby-Dick",
            "languages": ["en"],
            "creators": [{"name": "Melville, Herman", "birthdate": 1819}],
        });
        let fields = firestore_fields(&record);
        assert_eq!(fields["title"], json!({"stringValue": "Moby-Dick"}));
        assert_eq!(
            fields["languages"],
            json!({"arrayValue": {"values": [{"stringValue": "en"}]}})
        );
        assert_eq!(
            fields["creators"]["arrayValue"]["values"][0]["mapValue"]["fields"]["birthdate"],
            json!({"integerValue": "1819"})
        );
    }

    #[test]
    fn document_url_embeds_project_collection_and_id() {
        let sink = FirestoreSink::new("demo-project", "token").unwrap();
        let url = sink.document_url("2701").unwrap();
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/demo-project/databases/(default)/documents/repositories/projectgutenberg/books/2701"
        );
    }
}
