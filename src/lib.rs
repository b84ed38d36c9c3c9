//! weft — run Fabric AI patterns as isolated model calls.
//!
//! A pattern is a specialized system prompt from the Fabric catalog
//! (<https://github.com/danielmiessler/fabric>). weft picks the right
//! pattern for a task description with a deterministic rule table, loads
//! the content to process from a source reference (file, web page,
//! YouTube transcript, PDF, GitHub repository), runs the pattern in a
//! single isolated completion, and wraps the outcome in a JSON or
//! tagged-text envelope.
//!
//! See `DESIGN.md` for full architecture documentation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod envelope;
pub mod logging;
pub mod patterns;
pub mod providers;
pub mod run;
pub mod select;
pub mod source;
