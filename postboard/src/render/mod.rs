//! Turning fetched employees, posts and comments into document nodes.
//!
//! The synchronous helpers take the document directly; [`Renderer`] owns the
//! shared page and the HTTP client for the steps that fetch.

pub mod generation;
pub mod helpers;
pub mod listeners;
pub mod pipeline;
pub mod toggle;

pub use generation::{Generations, RenderTicket};
pub use helpers::{create_elem_with_text, create_select_options, delete_child_elements};
pub use listeners::{add_button_listeners, remove_button_listeners};
pub use pipeline::{create_comments, populate_select_menu, Refresh, Renderer};
pub use toggle::{
    find_comment_button, find_comment_section, toggle_comment_button, toggle_comment_section,
    toggle_comments,
};
