//! Firestore REST adapter.
//!
//! Talks to the Firestore v1 REST API: `runQuery` for equality-filtered
//! lookups, `createDocument` for inserts, `patch` with an `updateMask` for
//! field-level merges, and plain `DELETE` for removals. Plain JSON field
//! maps are converted to and from Firestore's typed value encoding here so
//! nothing above this module sees `integerValue` strings.
//!
//! Authentication is a bearer token supplied by the environment; minting
//! one from a service-account key is left to the deployment.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::{Document, DocumentRef, DocumentStore, Fields, StoreError};

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

pub struct FirestoreStore {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    auth_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        project_id: String,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url,
            project_id,
            auth_token,
        }
    }

    /// `{base}/v1/projects/{p}/databases/(default)/documents`
    fn documents_root(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        )
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<Value, StoreError> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        response.json().await.map_err(StoreError::from)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn find(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.documents_root());
        let body = run_query_body(collection, filters, limit);

        let results = self.execute(self.http.post(&url).json(&body)).await?;
        let entries = results
            .as_array()
            .ok_or_else(|| StoreError::Decode("runQuery response is not an array".into()))?;

        let mut documents = Vec::new();
        for entry in entries {
            // Entries without a `document` key carry only a readTime.
            let Some(doc) = entry.get("document") else {
                continue;
            };
            documents.push(decode_document(doc)?);
        }
        Ok(documents)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<DocumentRef, StoreError> {
        let url = format!("{}/{collection}", self.documents_root());
        let body = json!({ "fields": encode_fields(&fields) });

        let created = self.execute(self.http.post(&url).json(&body)).await?;
        let name = created
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Decode("created document has no name".into()))?;
        Ok(DocumentRef(name.to_string()))
    }

    async fn update(&self, doc: &DocumentRef, fields: Fields) -> Result<(), StoreError> {
        let url = format!("{}/v1/{}", self.base_url, doc.0);
        // The updateMask restricts the patch to the supplied fields, which
        // is what makes this a merge rather than a replace.
        let mask: Vec<(&str, &String)> = fields
            .keys()
            .map(|name| ("updateMask.fieldPaths", name))
            .collect();
        let body = json!({ "fields": encode_fields(&fields) });

        self.execute(self.http.patch(&url).query(&mask).json(&body))
            .await?;
        Ok(())
    }

    async fn delete(&self, doc: &DocumentRef) -> Result<(), StoreError> {
        let url = format!("{}/v1/{}", self.base_url, doc.0);
        self.execute(self.http.delete(&url)).await?;
        Ok(())
    }
}

fn run_query_body(collection: &str, filters: &[(&str, Value)], limit: Option<u32>) -> Value {
    let field_filters: Vec<Value> = filters
        .iter()
        .map(|(name, value)| {
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": name },
                    "op": "EQUAL",
                    "value": encode_value(value),
                }
            })
        })
        .collect();

    let mut query = json!({
        "from": [{ "collectionId": collection }],
        "where": {
            "compositeFilter": { "op": "AND", "filters": field_filters }
        },
    });
    if let Some(n) = limit {
        query["limit"] = json!(n);
    }
    json!({ "structuredQuery": query })
}

fn decode_document(doc: &Value) -> Result<Document, StoreError> {
    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode("document has no name".into()))?;
    let fields = match doc.get("fields") {
        Some(raw) => decode_fields(raw)?,
        None => Fields::new(),
    };
    Ok(Document {
        reference: DocumentRef(name.to_string()),
        fields,
    })
}

// Typed value codec

fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect();
    Value::Object(encoded)
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Firestore carries 64-bit integers as decimal strings.
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => {
            let encoded: Map<String, Value> = map
                .iter()
                .map(|(name, v)| (name.clone(), encode_value(v)))
                .collect();
            json!({ "mapValue": { "fields": encoded } })
        }
    }
}

fn decode_fields(raw: &Value) -> Result<Fields, StoreError> {
    let map = raw
        .as_object()
        .ok_or_else(|| StoreError::Decode("fields is not an object".into()))?;
    let mut fields = Fields::new();
    for (name, value) in map {
        fields.insert(name.clone(), decode_value(value)?);
    }
    Ok(fields)
}

fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let map = value
        .as_object()
        .ok_or_else(|| StoreError::Decode("value is not a typed object".into()))?;
    let (kind, inner) = map
        .iter()
        .next()
        .ok_or_else(|| StoreError::Decode("empty typed value".into()))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(inner.clone()),
        "integerValue" => {
            let text = inner
                .as_str()
                .ok_or_else(|| StoreError::Decode("integerValue is not a string".into()))?;
            let n: i64 = text
                .parse()
                .map_err(|_| StoreError::Decode(format!("bad integerValue {text:?}")))?;
            Ok(json!(n))
        }
        "doubleValue" => Ok(inner.clone()),
        "stringValue" => Ok(inner.clone()),
        "timestampValue" => Ok(inner.clone()),
        "arrayValue" => {
            let items = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(items))
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(raw) => decode_fields(raw)?,
                None => Fields::new(),
            };
            Ok(Value::Object(fields))
        }
        other => Err(StoreError::Decode(format!("unsupported value kind {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_integers_as_strings() {
        let encoded = encode_value(&json!(42));
        assert_eq!(encoded, json!({ "integerValue": "42" }));
    }

    #[test]
    fn codec_round_trips_a_frequency_shaped_document() {
        let mut fields = Fields::new();
        fields.insert("id".into(), json!(3));
        fields.insert("user_id".into(), json!("u1"));
        fields.insert("dosage".into(), json!(2));
        fields.insert("times".into(), json!(["08:00", "20:00"]));

        let encoded = encode_fields(&fields);
        let decoded = decode_fields(&encoded).unwrap();
        assert_eq!(decoded, fields);
    }

    #[test]
    fn decodes_integer_value_strings() {
        let decoded = decode_value(&json!({ "integerValue": "-7" })).unwrap();
        assert_eq!(decoded, json!(-7));
    }

    #[test]
    fn rejects_unknown_value_kind() {
        let err = decode_value(&json!({ "geoPointValue": {} })).unwrap_err();
        assert!(err.to_string().contains("unsupported value kind"));
    }

    #[test]
    fn run_query_body_ands_filters_and_sets_limit() {
        let body = run_query_body(
            "medications",
            &[("user_id", json!("u1")), ("id", json!(5))],
            Some(1),
        );
        let query = &body["structuredQuery"];
        assert_eq!(query["from"][0]["collectionId"], "medications");
        assert_eq!(query["limit"], 1);
        let filters = query["where"]["compositeFilter"]["filters"]
            .as_array()
            .unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0]["fieldFilter"]["op"], "EQUAL");
        assert_eq!(
            filters[1]["fieldFilter"]["value"],
            json!({ "integerValue": "5" })
        );
    }

    #[test]
    fn decode_document_without_fields_is_empty() {
        let doc = decode_document(&json!({ "name": "projects/p/databases/(default)/documents/settings/x" }))
            .unwrap();
        assert!(doc.fields.is_empty());
        assert_eq!(doc.reference.id(), "x");
    }
}
