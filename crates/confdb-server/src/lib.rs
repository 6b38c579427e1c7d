//! HTTP server for confdb.
//!
//! Translates requests onto the path namespace. The URI path is the
//! namespace path:
//!
//! | Request | Namespace call | Success |
//! |---|---|---|
//! | `GET /a/b` | `get("/a/b")` | 200, raw value |
//! | `GET /a/` | `list("/a")` | 200, one child path per line |
//! | `PUT /a/b` | `put("/a/b", body)` | 204 |
//! | `DELETE /a/b` | `delete("/a/b")` | 204 |
//!
//! Missing paths answer 404, malformed paths 400, any other method 405.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{parse_bind_addr, ServerConfig, DEFAULT_BIND_ADDR};
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::ConfdbServer;
