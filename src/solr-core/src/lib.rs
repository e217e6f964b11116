//! Solr Core Library
//!
//! Wire-level building blocks shared by the Solr client:
//! - Documents and field values
//! - Request types and their XML / query-string serialization
//! - Response parsing for the legacy XML update format and `wt=json`
//! - Escaping helpers for XML messages and query strings

pub mod document;
pub mod error;
pub mod request;
pub mod response;
pub mod util;
pub mod xml;

// Re-export commonly used types
pub use document::{Document, Field, FieldValue};
pub use error::ParseError;
pub use request::{Request, ResponseFormat};
pub use response::{Hit, QueryData, Response};
