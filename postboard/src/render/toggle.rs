use crate::dom::{Document, Event, NodeId};
use crate::error::{RenderError, RenderResult};
use postboard_types::PostId;

pub const POST_ID_ATTR: &str = "data-post-id";
pub const HIDE_CLASS: &str = "hide";
pub const SHOW_COMMENTS: &str = "Show Comments";
pub const HIDE_COMMENTS: &str = "Hide Comments";

/// First element with `tag_name` whose post-id attribute matches
fn find_keyed(doc: &Document, tag_name: &str, post_id: PostId) -> Option<NodeId> {
    let key = post_id.to_string();
    doc.elements_by_tag_name(doc.root(), tag_name)
        .into_iter()
        .find(|node| doc.attribute(*node, POST_ID_ATTR) == Some(key.as_str()))
}

pub fn find_comment_section(doc: &Document, post_id: PostId) -> Option<NodeId> {
    find_keyed(doc, "section", post_id)
}

pub fn find_comment_button(doc: &Document, post_id: PostId) -> Option<NodeId> {
    find_keyed(doc, "button", post_id)
}

/// Flip the `hide` class on the post's comment section.
///
/// `Ok(None)` when no section carries the id.
pub fn toggle_comment_section(
    doc: &mut Document,
    post_id: Option<PostId>,
) -> RenderResult<Option<NodeId>> {
    let post_id = post_id.ok_or(RenderError::MissingArgument("post_id"))?;

    let Some(section) = find_comment_section(doc, post_id) else {
        return Ok(None);
    };
    doc.toggle_class(section, HIDE_CLASS)?;
    Ok(Some(section))
}

/// Swap the button label between "Show Comments" and "Hide Comments".
///
/// Any other label is left as it is.
pub fn toggle_comment_button(
    doc: &mut Document,
    post_id: Option<PostId>,
) -> RenderResult<Option<NodeId>> {
    let post_id = post_id.ok_or(RenderError::MissingArgument("post_id"))?;

    let Some(button) = find_comment_button(doc, post_id) else {
        return Ok(None);
    };
    let label = doc.text_content(button);
    if label == SHOW_COMMENTS {
        doc.set_text_content(button, HIDE_COMMENTS)?;
    } else if label == HIDE_COMMENTS {
        doc.set_text_content(button, SHOW_COMMENTS)?;
    }
    Ok(Some(button))
}

/// Click handler for a post's comment button: flips section and label together
pub fn toggle_comments(
    doc: &mut Document,
    event: Option<&Event>,
    post_id: Option<PostId>,
) -> RenderResult<(Option<NodeId>, Option<NodeId>)> {
    let event = event.ok_or(RenderError::MissingArgument("event"))?;
    let post_id = post_id.ok_or(RenderError::MissingArgument("post_id"))?;

    doc.set_listener_flag(event.target)?;

    let section = toggle_comment_section(doc, Some(post_id))?;
    let button = toggle_comment_button(doc, Some(post_id))?;
    Ok((section, button))
}
