//! HTTP protocol implementation.
//!
//! This module implements the subset of HTTP/1.1 needed to serve static
//! files: one GET request per connection, answered with the file or an
//! error page, then the connection is closed.
//!
//! # Architecture
//!
//! - **`parser`**: Turns the raw bytes of one read into a `Request`
//! - **`request`**: Request line and Host header representation
//! - **`validate`**: Fixed-order checks producing a `ValidationOutcome`
//! - **`mime`**: Extension to content-type table
//! - **`response`**: Status codes and response construction
//! - **`writer`**: Serializes and writes a response to the client
//! - **`connection`**: The per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One bounded read, parse, validate
//!        └──────┬──────┘
//!               │ ValidationOutcome
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Load resource or build error page
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Single write, shutdown, log
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Validation order
//!
//! | Check    | Failure status |
//! |----------|----------------|
//! | syntax   | 400            |
//! | method   | 405            |
//! | resource | 400, 404, 403  |
//! | version  | 505            |
//! | host     | 502            |

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod validate;
pub mod writer;
