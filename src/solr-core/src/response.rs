use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::error::ParseError;

/// One matched document, as returned by the query handler.
pub type Hit = HashMap<String, serde_json::Value>;

/// Query-specific payload of a select response.
#[derive(Debug, Clone, Default)]
pub struct QueryData {
    pub total_hits: usize,
    pub start: usize,
    pub max_score: Option<f64>,
    pub hits: Vec<Hit>,
}

/// A parsed server response.
///
/// Transport-level failures never reach this type; a `Response` always means
/// the HTTP exchange completed. Semantic rejections (e.g. an unknown field)
/// show up as [`ok`](Response::ok) being `false` together with the server's
/// `ERROR:...` message.
#[derive(Debug, Clone)]
pub struct Response {
    raw: String,
    status_code: String,
    status_message: String,
    query: Option<QueryData>,
}

// Legacy update handler answer: <result status="0">message</result>
static RESULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<result\s+status="([^"]*)"[^>]*>(.*?)</result>"#).unwrap());

/// `wt=json` envelope.
#[derive(Deserialize)]
struct JsonEnvelope {
    #[serde(rename = "responseHeader")]
    response_header: JsonHeader,
    #[serde(default)]
    response: Option<JsonBody>,
}

#[derive(Deserialize)]
struct JsonHeader {
    status: i64,
}

#[derive(Deserialize)]
struct JsonBody {
    #[serde(rename = "numFound")]
    num_found: usize,
    #[serde(default)]
    start: usize,
    #[serde(rename = "maxScore", default)]
    max_score: Option<f64>,
    #[serde(default)]
    docs: Vec<Hit>,
}

impl Response {
    /// Parse an XML body from the update or ping handlers.
    ///
    /// Handlers other than `update` answer with an arbitrary status page; a
    /// body without a `<result>` element therefore counts as success, since
    /// the HTTP exchange itself already completed.
    pub fn from_xml(raw: String) -> Result<Self, ParseError> {
        if let Some(caps) = RESULT_RE.captures(&raw) {
            let status_code = caps[1].to_string();
            let status_message = caps[2].trim().to_string();
            debug!(status = %status_code, "parsed update result");
            Ok(Self {
                raw,
                status_code,
                status_message,
                query: None,
            })
        } else if raw.contains("<result") {
            Err(ParseError::Xml(snippet(&raw)))
        } else {
            Ok(Self {
                raw,
                status_code: "0".to_string(),
                status_message: String::new(),
                query: None,
            })
        }
    }

    /// Parse a `wt=json` body from the select handler.
    pub fn from_json(raw: String) -> Result<Self, ParseError> {
        let envelope: JsonEnvelope = serde_json::from_str(&raw)?;
        let status_code = envelope.response_header.status.to_string();
        let query = envelope.response.map(|body| QueryData {
            total_hits: body.num_found,
            start: body.start,
            max_score: body.max_score,
            hits: body.docs,
        });
        if let Some(data) = &query {
            debug!(total_hits = data.total_hits, "parsed select response");
        }
        Ok(Self {
            raw,
            status_code,
            status_message: String::new(),
            query,
        })
    }

    /// The response body exactly as the server sent it.
    pub fn raw_response(&self) -> &str {
        &self.raw
    }

    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// Human-readable message on failure, of the form `ERROR:<description>`.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// `true` iff the server reported the success status code `"0"`.
    pub fn ok(&self) -> bool {
        self.status_code == "0"
    }

    /// Query payload, present only for select responses.
    pub fn query(&self) -> Option<&QueryData> {
        self.query.as_ref()
    }

    /// Total number of matching documents; `0` for non-query responses.
    pub fn total_hits(&self) -> usize {
        self.query.as_ref().map(|q| q.total_hits).unwrap_or(0)
    }

    /// The returned page of hits, in rank order.
    pub fn hits(&self) -> &[Hit] {
        self.query.as_ref().map(|q| q.hits.as_slice()).unwrap_or(&[])
    }
}

fn snippet(raw: &str) -> String {
    raw.chars().take(120).collect()
}
