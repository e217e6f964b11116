use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use tracing::debug;
use url::Url;

use solr_core::document::Document;
use solr_core::error::ParseError;
use solr_core::request::{
    AddDocument, Commit, Delete, Optimize, Ping, Request, ResponseFormat, Standard,
};
use solr_core::response::Response;

use crate::{Error, Result};

/// Connection to a Solr core over HTTP.
///
/// Holds the endpoint and configuration only; the server is first contacted
/// when a request is sent, so an unreachable endpoint surfaces on the first
/// [`send`](Connection::send) rather than at construction.
#[derive(Debug)]
pub struct Connection {
    base_url: String,
    autocommit: bool,
    timeout: Option<Duration>,
    http: HttpClient,
}

impl Connection {
    /// Create a connection to a core URL, e.g. `http://localhost:8983/solr`.
    ///
    /// Only URL syntax is validated here; nothing goes over the wire.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        Url::parse(&base_url)?;
        Ok(Self {
            base_url,
            autocommit: false,
            timeout: None,
            http: HttpClient::new(),
        })
    }

    /// Commit automatically after each mutating convenience call.
    pub fn with_autocommit(mut self, autocommit: bool) -> Self {
        self.autocommit = autocommit;
        self
    }

    /// Bound each HTTP exchange; the transport default applies otherwise.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn autocommit(&self) -> bool {
        self.autocommit
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a single request and parse the server's answer.
    ///
    /// Fails with [`Error::UnsupportedResponseFormat`] before any network
    /// traffic if the request declares a format this client cannot decode,
    /// with [`Error::Network`] when the endpoint is unreachable, and with
    /// [`Error::Server`] when it answers with a non-success HTTP status.
    pub async fn send<R: Request + ?Sized>(&self, request: &R) -> Result<Response> {
        let format = request.response_format();
        let parse: fn(String) -> std::result::Result<Response, ParseError> = match format {
            ResponseFormat::Xml => Response::from_xml,
            ResponseFormat::Json => Response::from_json,
            other => return Err(Error::UnsupportedResponseFormat(other)),
        };

        let url = format!("{}/{}", self.base_url, request.handler());
        let mut builder = match request.body() {
            Some(body) => {
                debug!(
                    handler = request.handler(),
                    bytes = body.len(),
                    "posting update message"
                );
                self.http
                    .post(&url)
                    .header(CONTENT_TYPE, "text/xml; charset=utf-8")
                    .body(body)
            }
            None => {
                let mut params = request.params();
                params.push(("wt".to_string(), format.as_wt().to_string()));
                debug!(handler = request.handler(), "sending query");
                self.http.get(&url).query(&params)
            }
        };
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http_response = builder.send().await?;
        let status = http_response.status();
        let body = http_response.text().await?;
        if !status.is_success() {
            return Err(Error::Server {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(parse(body)?)
    }

    /// `true` if the server answers the ping handler.
    ///
    /// Unlike every other operation, transport failures of any kind are
    /// swallowed into `false`. Send a [`Ping`] directly to distinguish an
    /// unreachable host from a bad path.
    pub async fn ping(&self) -> bool {
        match self.send(&Ping).await {
            Ok(response) => response.ok(),
            Err(_) => false,
        }
    }

    /// Run a query against the standard request handler.
    pub async fn query(&self, query: impl Into<String>) -> Result<Response> {
        self.send(&Standard::new(query)).await
    }

    /// Index one document. Returns the server's ok flag.
    pub async fn add(&self, document: Document) -> Result<bool> {
        let response = self.send(&AddDocument::new(document)).await?;
        self.maybe_commit().await?;
        Ok(response.ok())
    }

    /// Re-index a document; with a unique key this replaces the stored copy.
    pub async fn update(&self, document: Document) -> Result<bool> {
        self.add(document).await
    }

    /// Delete the document with the given unique key.
    pub async fn delete(&self, id: impl ToString) -> Result<bool> {
        let response = self.send(&Delete::by_id(id)).await?;
        self.maybe_commit().await?;
        Ok(response.ok())
    }

    /// Delete every document matching the query.
    pub async fn delete_by_query(&self, query: impl Into<String>) -> Result<bool> {
        let response = self.send(&Delete::by_query(query)).await?;
        self.maybe_commit().await?;
        Ok(response.ok())
    }

    /// Flush pending changes.
    pub async fn commit(&self) -> Result<bool> {
        Ok(self.send(&Commit).await?.ok())
    }

    /// Ask the server to optimize its index.
    pub async fn optimize(&self) -> Result<bool> {
        Ok(self.send(&Optimize).await?.ok())
    }

    async fn maybe_commit(&self) -> Result<()> {
        if self.autocommit {
            self.send(&Commit).await?;
        }
        Ok(())
    }
}
