//! Data models for intercepted requests and stored responses.
//!
//! - `Request`: the identity of an intercepted request (method + URL)
//! - `Response`: a response snapshot (status, headers, raw body bytes)
//!
//! Snapshots are stored verbatim at install time and served verbatim on a
//! cache hit; nothing in between inspects or rewrites them.

pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;
