//! The page shell and the shared handle to it.

use std::sync::{Arc, Mutex, PoisonError};

use crate::dom::{DomResult, Document, NodeId};
use crate::render::helpers::create_elem_with_text;

pub const SELECT_MENU_ID: &str = "selectMenu";
pub const DEFAULT_TEXT: &str = "Select an Employee to display their posts.";
pub const DEFAULT_TEXT_CLASS: &str = "default-text";

/// Nodes of the shell that the pipeline writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shell {
    pub select: NodeId,
    pub main: NodeId,
}

/// Build the static page: a header with the employee dropdown and a
/// `main` holding the placeholder text.
pub fn build_shell(doc: &mut Document) -> DomResult<Shell> {
    let root = doc.root();
    let html = doc.create_element("html");
    doc.append_child(root, html)?;

    let head = doc.create_element("head");
    let title = create_elem_with_text(doc, "title", "Postboard", None)?;
    doc.append_child(head, title)?;
    doc.append_child(html, head)?;

    let body = doc.create_element("body");
    doc.append_child(html, body)?;

    let header = doc.create_element("header");
    let heading = create_elem_with_text(doc, "h1", "Employee Posts", None)?;
    doc.append_child(header, heading)?;

    let select = doc.create_element("select");
    doc.set_attribute(select, "id", SELECT_MENU_ID)?;
    let placeholder = create_elem_with_text(doc, "option", "Employees", None)?;
    doc.set_attribute(placeholder, "value", "")?;
    doc.append_child(select, placeholder)?;
    doc.append_child(header, select)?;
    doc.append_child(body, header)?;

    let main = doc.create_element("main");
    let default_text = create_elem_with_text(doc, "p", DEFAULT_TEXT, Some(DEFAULT_TEXT_CLASS))?;
    doc.append_child(main, default_text)?;
    doc.append_child(body, main)?;

    Ok(Shell { select, main })
}

pub fn main_element(doc: &Document) -> Option<NodeId> {
    doc.query_tag("main")
}

pub fn select_menu(doc: &Document) -> Option<NodeId> {
    doc.get_element_by_id(SELECT_MENU_ID)
}

/// Cloneable handle to the document shared by the render pipeline.
///
/// The lock is only ever taken for synchronous DOM work, never across an
/// await.
#[derive(Debug, Clone, Default)]
pub struct Page {
    document: Arc<Mutex<Document>>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
        }
    }

    /// A page holding the standard shell
    pub fn shell() -> DomResult<Self> {
        let mut doc = Document::new();
        build_shell(&mut doc)?;
        Ok(Self::new(doc))
    }

    /// Run `f` with exclusive access to the document
    pub fn with<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut doc = self.document.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *doc)
    }

    pub fn to_html(&self) -> String {
        self.with(|doc| doc.to_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_layout() {
        let page = Page::shell().unwrap();
        page.with(|doc| {
            let select = select_menu(doc).unwrap();
            let main = main_element(doc).unwrap();
            assert_eq!(doc.tag_name(select), Some("select"));
            assert_eq!(doc.value(select).as_deref(), Some(""));

            let children = doc.element_children(main);
            assert_eq!(children.len(), 1);
            assert_eq!(doc.class_name(children[0]), Some(DEFAULT_TEXT_CLASS));
            assert_eq!(doc.text_content(children[0]), DEFAULT_TEXT);
        });
    }

    #[test]
    fn test_page_html_starts_with_doctype() {
        let page = Page::shell().unwrap();
        let html = page.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<select id=\"selectMenu\">"));
        assert!(html.contains("<main><p class=\"default-text\">"));
    }

    #[test]
    fn test_clones_share_one_document() {
        let page = Page::shell().unwrap();
        let other = page.clone();
        other.with(|doc| {
            let main = main_element(doc).unwrap();
            doc.set_text_content(main, "").unwrap();
        });
        assert!(page.with(|doc| {
            let main = main_element(doc).unwrap();
            doc.children(main).is_empty()
        }));
    }
}
