use thiserror::Error;

/// Reason a graph edit was refused.
///
/// Rejections leave the model untouched. Their `Display` text is shown to the
/// user and `as_ref()` yields the snake_case notice code.
#[derive(Error, Debug, Clone, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Rejection {
    #[error("cannot connect a node to itself")]
    SelfLoop,

    #[error("cannot connect into the start node")]
    IntoStart,

    #[error("start node may have only one outgoing connection")]
    StartFanOut,

    #[error("connection already exists in this direction")]
    DuplicateDirection,

    #[error("pair is already bidirectional")]
    AlreadyBidirectional,

    #[error("the start node cannot be deleted, designate another start node first")]
    StartNodeRemoval,

    #[error("assistant {0} is already part of this workflow")]
    DuplicateAssistant(String),

    #[error("node {0} already exists")]
    DuplicateNode(String),

    #[error("node {0} not found")]
    UnknownNode(String),
}

impl Rejection {
    /// Silent rejections are dropped without a notice.
    pub fn is_silent(&self) -> bool {
        matches!(self, Rejection::SelfLoop)
    }
}
