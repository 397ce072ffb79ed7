//! Todoist MCP gateway library.
//!
//! Provides the tool-call [`server::router`], the upstream
//! [`todoist::TodoistClient`], and the protocol wire types. Used by the
//! `todoist-mcp` binary and available for integration testing.

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod todoist;
