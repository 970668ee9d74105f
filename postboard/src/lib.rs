//! Browse employees, their posts and the comments on each post.
//!
//! Data comes from a JSONPlaceholder-style REST service; the page is an
//! in-memory document tree that can be serialized to HTML.

#[macro_use]
pub mod logging;

pub mod api;
pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod page;
pub mod render;
pub mod server_config;
