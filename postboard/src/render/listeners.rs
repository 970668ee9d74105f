use crate::dom::{Document, DomResult, EventType, Handler, NodeId};
use crate::page::main_element;
use postboard_types::PostId;

use super::toggle::POST_ID_ATTR;

/// Every `button` under `main` paired with its post id, if it has one
fn main_buttons(doc: &Document) -> Vec<(NodeId, Option<PostId>)> {
    let Some(main) = main_element(doc) else {
        return Vec::new();
    };
    doc.elements_by_tag_name(main, "button")
        .into_iter()
        .map(|button| {
            let post_id = doc.attribute(button, POST_ID_ATTR).and_then(PostId::parse);
            (button, post_id)
        })
        .collect()
}

/// Attach a comment-toggling click listener to each keyed button in `main`.
///
/// Returns every button found, keyed or not.
pub fn add_button_listeners(doc: &mut Document) -> DomResult<Vec<NodeId>> {
    let buttons = main_buttons(doc);
    for (button, post_id) in &buttons {
        if let Some(post_id) = post_id {
            doc.add_event_listener(*button, EventType::Click, Handler::ToggleComments(*post_id))?;
        }
    }
    Ok(buttons.into_iter().map(|(button, _)| button).collect())
}

/// Detach the listeners attached by [`add_button_listeners`]
pub fn remove_button_listeners(doc: &mut Document) -> Vec<NodeId> {
    let buttons = main_buttons(doc);
    for (button, post_id) in &buttons {
        if let Some(post_id) = post_id {
            doc.remove_event_listener(*button, EventType::Click, &Handler::ToggleComments(*post_id));
        }
    }
    buttons.into_iter().map(|(button, _)| button).collect()
}
