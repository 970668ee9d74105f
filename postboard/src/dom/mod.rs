//! In-memory document tree.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Removed nodes stay in the arena, detached, so ids handed out
//! earlier never dangle. Every operation takes the document explicitly; there
//! is no global page.

mod events;
mod html;

pub use events::{Event, EventType, Handler};
pub use html::escape_text;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("node {0:?} cannot have children")]
    NotAParent(NodeId),

    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("inserting {child:?} into {parent:?} would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

pub type DomResult<T> = Result<T, DomError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Fragment,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag_name: String,
    // insertion order is kept so serialized output is stable
    attrs: Vec<(String, String)>,
    listeners: Vec<(EventType, Handler)>,
    listener_flag: bool,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| k != name);
        self.attrs.len() != before
    }

    fn classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|value| value.split_whitespace().map(ToOwned::to_owned).collect())
            .unwrap_or_default()
    }

    fn set_classes(&mut self, classes: &[String]) {
        if classes.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", &classes.join(" "));
        }
    }
}

/// The document tree.
///
/// The arena only grows: removed subtrees keep their slots so that stale
/// [`NodeId`]s still resolve. Every re-render of `main` leaves the previous
/// pass behind, so a long-lived page that re-renders indefinitely should be
/// rebuilt from a fresh shell now and then.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id))
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    // Construction

    /// Create a detached element with the given tag name (lowercased)
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push_node(NodeKind::Element(Element {
            tag_name: tag_name.to_ascii_lowercase(),
            ..Element::default()
        }))
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.push_node(NodeKind::Text(text.to_string()))
    }

    pub fn create_document_fragment(&mut self) -> NodeId {
        self.push_node(NodeKind::Fragment)
    }

    // Node kind queries

    pub fn contains_node(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn is_fragment(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0).map(|n| &n.kind), Some(NodeKind::Fragment))
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag_name.as_str())
    }

    // Tree structure

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    pub fn last_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .iter()
            .rev()
            .copied()
            .find(|child| self.is_element(*child))
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains_node(id) && self.is_inclusive_ancestor(self.root, id)
    }

    fn detach(&mut self, child: NodeId) -> DomResult<()> {
        if let Some(parent) = self.node(child)?.parent {
            self.node_mut(parent)?.children.retain(|c| *c != child);
            self.node_mut(child)?.parent = None;
        }
        Ok(())
    }

    /// Append `child` to `parent`, moving it out of any previous parent.
    ///
    /// Appending a fragment moves the fragment's children instead, leaving the
    /// fragment empty.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        match self.node(parent)?.kind {
            NodeKind::Text(_) => return Err(DomError::NotAParent(parent)),
            NodeKind::Document | NodeKind::Fragment | NodeKind::Element(_) => {}
        }
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        if self.is_fragment(child) {
            let moved = std::mem::take(&mut self.node_mut(child)?.children);
            for grandchild in &moved {
                self.node_mut(*grandchild)?.parent = Some(parent);
            }
            self.node_mut(parent)?.children.extend(moved);
            return Ok(child);
        }

        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(child)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child)?;
        Ok(child)
    }

    /// Pre-order descendants of `scope`, excluding `scope` itself
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Descendant elements of `scope` with the given tag, in document order
    pub fn elements_by_tag_name(&self, scope: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| {
                self.tag_name(*id)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case(tag_name))
            })
            .collect()
    }

    /// First descendant element of the document with the given tag
    pub fn query_tag(&self, tag_name: &str) -> Option<NodeId> {
        self.elements_by_tag_name(self.root, tag_name).into_iter().next()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.attribute(*node, "id") == Some(id))
    }

    // Text

    pub fn text_content(&self, id: NodeId) -> String {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(_) => self
                .children(id)
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
            None => String::new(),
        }
    }

    /// Replace all children of an element with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if let NodeKind::Text(existing) = &mut self.node_mut(id)?.kind {
            *existing = text.to_string();
            return Ok(());
        }
        for child in self.children(id).to_vec() {
            self.detach(child)?;
        }
        if !text.is_empty() {
            let node = self.create_text_node(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    // Attributes

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)
            .ok_or(DomError::NotAnElement(id))?
            .set_attr(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id)
            .map(|e| e.remove_attr(name))
            .unwrap_or(false)
    }

    // Classes

    pub fn class_name(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, "class")
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.classes().iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        let mut classes = element.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            element.set_classes(&classes);
        }
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        let mut classes = element.classes();
        classes.retain(|c| c != class);
        element.set_classes(&classes);
        Ok(())
    }

    /// Flip a class; returns whether it is present afterwards
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        if self.has_class(id, class) {
            self.remove_class(id, class)?;
            Ok(false)
        } else {
            self.add_class(id, class)?;
            Ok(true)
        }
    }

    // Form values

    /// Current value of a form control.
    ///
    /// For a `select` this is the value of the selected option, or of the
    /// first option when none is marked selected. An option without a
    /// `value` attribute uses its text.
    pub fn value(&self, id: NodeId) -> Option<String> {
        match self.tag_name(id)? {
            "select" => {
                let options = self.elements_by_tag_name(id, "option");
                let chosen = options
                    .iter()
                    .find(|o| self.has_attribute(**o, "selected"))
                    .or(options.first())?;
                self.value(*chosen)
            }
            "option" => Some(
                self.attribute(id, "value")
                    .map(str::to_string)
                    .unwrap_or_else(|| self.text_content(id)),
            ),
            _ => self.attribute(id, "value").map(str::to_string),
        }
    }

    /// Select the option of a `select` whose value matches; false if none does
    pub fn set_value(&mut self, id: NodeId, value: &str) -> DomResult<bool> {
        if self.tag_name(id) != Some("select") {
            self.set_attribute(id, "value", value)?;
            return Ok(true);
        }
        let options = self.elements_by_tag_name(id, "option");
        let Some(target) = options
            .iter()
            .copied()
            .find(|o| self.value(*o).as_deref() == Some(value))
        else {
            return Ok(false);
        };
        for option in options {
            self.remove_attribute(option, "selected");
        }
        self.set_attribute(target, "selected", "")?;
        Ok(true)
    }

    // Listeners

    /// Register a listener; an identical (type, handler) pair is kept once
    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        event_type: EventType,
        handler: Handler,
    ) -> DomResult<bool> {
        let element = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        if element
            .listeners
            .iter()
            .any(|(t, h)| *t == event_type && *h == handler)
        {
            return Ok(false);
        }
        element.listeners.push((event_type, handler));
        Ok(true)
    }

    pub fn remove_event_listener(
        &mut self,
        id: NodeId,
        event_type: EventType,
        handler: &Handler,
    ) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        let before = element.listeners.len();
        element
            .listeners
            .retain(|(t, h)| !(*t == event_type && h == handler));
        element.listeners.len() != before
    }

    pub fn listeners(&self, id: NodeId, event_type: EventType) -> Vec<Handler> {
        self.element(id)
            .map(|e| {
                e.listeners
                    .iter()
                    .filter(|(t, _)| *t == event_type)
                    .map(|(_, h)| h.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Expando flag set on a node once a click has been handled for it
    pub fn listener_flag(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.listener_flag)
    }

    pub fn set_listener_flag(&mut self, id: NodeId) -> DomResult<()> {
        self.element_mut(id)
            .ok_or(DomError::NotAnElement(id))?
            .listener_flag = true;
        Ok(())
    }
}
