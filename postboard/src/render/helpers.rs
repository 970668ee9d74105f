use crate::dom::{DomResult, Document, NodeId};
use postboard_types::User;

/// Create a detached element holding `text`, with an optional class
pub fn create_elem_with_text(
    doc: &mut Document,
    tag_name: &str,
    text: &str,
    class_name: Option<&str>,
) -> DomResult<NodeId> {
    let element = doc.create_element(tag_name);
    doc.set_text_content(element, text)?;

    if let Some(class_name) = class_name.filter(|c| !c.is_empty()) {
        doc.set_attribute(element, "class", class_name)?;
    }

    Ok(element)
}

/// One `option` per user (value = id, label = name).
///
/// Returns `None` rather than an empty list when there are no users to read.
pub fn create_select_options(
    doc: &mut Document,
    users: Option<&[User]>,
) -> DomResult<Option<Vec<NodeId>>> {
    let Some(users) = users else {
        return Ok(None);
    };

    let mut options = Vec::with_capacity(users.len());
    for user in users {
        let option = create_elem_with_text(doc, "option", &user.name, None)?;
        doc.set_attribute(option, "value", &user.id.to_string())?;
        options.push(option);
    }

    Ok(Some(options))
}

/// Remove every element child of `parent`, last first.
///
/// Returns `None` when `parent` is not an element node.
pub fn delete_child_elements(doc: &mut Document, parent: NodeId) -> Option<NodeId> {
    if !doc.is_element(parent) {
        return None;
    }

    while let Some(child) = doc.last_element_child(parent) {
        doc.remove_child(parent, child).ok()?;
    }

    Some(parent)
}
