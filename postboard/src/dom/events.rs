use postboard_types::PostId;

use super::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Change,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::Change => "change",
        }
    }
}

/// What a registered listener does when its event fires.
///
/// Handlers are values, so removing one only needs an equal value; there is
/// no closure identity to keep around.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Flip the comment section and button label of one post
    ToggleComments(PostId),
    /// Load the posts of the employee chosen in the dropdown
    SelectUser,
}

/// A dispatched event and the node it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Self {
            event_type: EventType::Click,
            target,
        }
    }

    pub fn change(target: NodeId) -> Self {
        Self {
            event_type: EventType::Change,
            target,
        }
    }
}
