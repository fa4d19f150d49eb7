/// Task identifiers are opaque strings assigned by the backend on
/// submission. The client never parses or fabricates them.
pub type TaskId = String;
