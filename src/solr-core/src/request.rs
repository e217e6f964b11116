use std::fmt;

use crate::document::Document;
use crate::xml;

/// Writer types a request can declare for its response body.
///
/// Only [`Xml`](ResponseFormat::Xml) and [`Json`](ResponseFormat::Json) can
/// be decoded by this client. The remaining writer types are understood by
/// the server and may be declared by custom [`Request`] implementations, but
/// sending one through a connection fails before any network traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Xml,
    Json,
    Ruby,
    Python,
    Php,
    Csv,
}

impl ResponseFormat {
    /// The `wt` parameter value for this format.
    pub fn as_wt(&self) -> &'static str {
        match self {
            ResponseFormat::Xml => "xml",
            ResponseFormat::Json => "json",
            ResponseFormat::Ruby => "ruby",
            ResponseFormat::Python => "python",
            ResponseFormat::Php => "php",
            ResponseFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wt())
    }
}

/// One operation against the search server.
///
/// Implementations describe the handler they target, how their parameters go
/// onto the wire, and the format they expect the answer in.
pub trait Request {
    /// Handler path relative to the core URL, e.g. `select` or `update`.
    fn handler(&self) -> &str;

    /// Query-string parameters.
    fn params(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// XML message body; `Some` makes the request a POST.
    fn body(&self) -> Option<String> {
        None
    }

    /// The format the server is expected to answer in.
    fn response_format(&self) -> ResponseFormat;
}

/// Lightweight availability check against the admin ping handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ping;

impl Request for Ping {
    fn handler(&self) -> &str {
        "admin/ping"
    }

    fn response_format(&self) -> ResponseFormat {
        ResponseFormat::Xml
    }
}

/// Flushes pending changes to the index.
#[derive(Debug, Clone, Copy, Default)]
pub struct Commit;

impl Request for Commit {
    fn handler(&self) -> &str {
        "update"
    }

    fn body(&self) -> Option<String> {
        Some("<commit/>".to_string())
    }

    fn response_format(&self) -> ResponseFormat {
        ResponseFormat::Xml
    }
}

/// Asks the server to optimize its index.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimize;

impl Request for Optimize {
    fn handler(&self) -> &str {
        "update"
    }

    fn body(&self) -> Option<String> {
        Some("<optimize/>".to_string())
    }

    fn response_format(&self) -> ResponseFormat {
        ResponseFormat::Xml
    }
}

/// Submits one or more documents to the update handler.
#[derive(Debug, Clone)]
pub struct AddDocument {
    documents: Vec<Document>,
}

impl AddDocument {
    pub fn new(document: Document) -> Self {
        Self {
            documents: vec![document],
        }
    }

    /// Batch several documents into a single `<add>` message.
    pub fn many(documents: impl IntoIterator<Item = Document>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
        }
    }
}

impl Request for AddDocument {
    fn handler(&self) -> &str {
        "update"
    }

    fn body(&self) -> Option<String> {
        let docs: String = self.documents.iter().map(|d| d.to_xml()).collect();
        Some(format!("<add>{}</add>", docs))
    }

    fn response_format(&self) -> ResponseFormat {
        ResponseFormat::Xml
    }
}

/// Removes documents either by unique key or by query.
#[derive(Debug, Clone)]
pub enum Delete {
    ById(String),
    ByQuery(String),
}

impl Delete {
    pub fn by_id(id: impl ToString) -> Self {
        Delete::ById(id.to_string())
    }

    pub fn by_query(query: impl Into<String>) -> Self {
        Delete::ByQuery(query.into())
    }
}

impl Request for Delete {
    fn handler(&self) -> &str {
        "update"
    }

    fn body(&self) -> Option<String> {
        let body = match self {
            Delete::ById(id) => format!("<delete><id>{}</id></delete>", xml::escape(id)),
            Delete::ByQuery(query) => {
                format!("<delete><query>{}</query></delete>", xml::escape(query))
            }
        };
        Some(body)
    }

    fn response_format(&self) -> ResponseFormat {
        ResponseFormat::Xml
    }
}

/// Default boolean operator for query terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

/// A query against the standard request handler.
#[derive(Debug, Clone)]
pub struct Standard {
    query: String,
    start: Option<usize>,
    rows: Option<usize>,
    field_list: Vec<String>,
    filter_queries: Vec<String>,
    sort: Option<String>,
    operator: Option<Operator>,
}

impl Standard {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            start: None,
            rows: None,
            field_list: Vec::new(),
            filter_queries: Vec::new(),
            sort: None,
            operator: None,
        }
    }

    /// Offset of the first hit to return.
    pub fn start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    /// Maximum number of hits to return.
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Restrict the stored fields returned with each hit.
    pub fn field_list<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_list = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add a filter query; may be called repeatedly.
    pub fn filter_query(mut self, filter: impl Into<String>) -> Self {
        self.filter_queries.push(filter.into());
        self
    }

    /// Sort clause, e.g. `"id asc"`.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }
}

impl Request for Standard {
    fn handler(&self) -> &str {
        "select"
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("q".to_string(), self.query.clone())];
        if let Some(start) = self.start {
            params.push(("start".to_string(), start.to_string()));
        }
        if let Some(rows) = self.rows {
            params.push(("rows".to_string(), rows.to_string()));
        }
        if !self.field_list.is_empty() {
            params.push(("fl".to_string(), self.field_list.join(",")));
        }
        for filter in &self.filter_queries {
            params.push(("fq".to_string(), filter.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(operator) = self.operator {
            let op = match operator {
                Operator::And => "AND",
                Operator::Or => "OR",
            };
            params.push(("q.op".to_string(), op.to_string()));
        }
        params
    }

    fn response_format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_body() {
        assert_eq!(Commit.body().as_deref(), Some("<commit/>"));
        assert_eq!(Commit.handler(), "update");
    }

    #[test]
    fn test_optimize_body() {
        assert_eq!(Optimize.body().as_deref(), Some("<optimize/>"));
    }

    #[test]
    fn test_add_document_body() {
        let request = AddDocument::new(Document::new().field("id", 999).field("text", "hi there!"));
        assert_eq!(
            request.body().unwrap(),
            "<add><doc><field name=\"id\">999</field><field name=\"text\">hi there!</field></doc></add>"
        );
    }

    #[test]
    fn test_add_many_documents() {
        let request = AddDocument::many(vec![
            Document::new().field("id", 1),
            Document::new().field("id", 2),
        ]);
        let body = request.body().unwrap();
        assert!(body.starts_with("<add><doc>"));
        assert!(body.contains("<field name=\"id\">1</field>"));
        assert!(body.contains("<field name=\"id\">2</field>"));
    }

    #[test]
    fn test_delete_bodies() {
        assert_eq!(
            Delete::by_id(123456).body().unwrap(),
            "<delete><id>123456</id></delete>"
        );
        assert_eq!(
            Delete::by_query("[* TO *]").body().unwrap(),
            "<delete><query>[* TO *]</query></delete>"
        );
    }

    #[test]
    fn test_delete_body_is_escaped() {
        assert_eq!(
            Delete::by_query("a & b").body().unwrap(),
            "<delete><query>a &amp; b</query></delete>"
        );
    }

    #[test]
    fn test_standard_params() {
        let request = Standard::new("Borges")
            .start(10)
            .rows(5)
            .field_list(["id", "text"])
            .filter_query("inStock:true")
            .sort("id asc")
            .operator(Operator::And);
        assert_eq!(request.handler(), "select");
        assert_eq!(
            request.params(),
            vec![
                ("q".to_string(), "Borges".to_string()),
                ("start".to_string(), "10".to_string()),
                ("rows".to_string(), "5".to_string()),
                ("fl".to_string(), "id,text".to_string()),
                ("fq".to_string(), "inStock:true".to_string()),
                ("sort".to_string(), "id asc".to_string()),
                ("q.op".to_string(), "AND".to_string()),
            ]
        );
    }

    #[test]
    fn test_standard_defaults_to_query_only() {
        let request = Standard::new("Borges");
        assert_eq!(
            request.params(),
            vec![("q".to_string(), "Borges".to_string())]
        );
        assert_eq!(request.response_format(), ResponseFormat::Json);
        assert!(request.body().is_none());
    }

    #[test]
    fn test_ping_is_a_bare_get() {
        assert_eq!(Ping.handler(), "admin/ping");
        assert!(Ping.body().is_none());
        assert!(Ping.params().is_empty());
    }
}
