//! Incremental change sets emitted by the canvas.

use serde::{Deserialize, Serialize};

use crate::workflow::{
    edge::EdgeId,
    node::{NodeId, Position},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeChange {
    /// node dragged to a new position
    Position {
        id: NodeId,
        position: Position,
    },
    /// node selection toggled
    Select {
        id: NodeId,
        selected: bool,
    },
    /// node deleted
    Remove {
        id: NodeId,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeChange {
    /// edge selection toggled
    Select {
        id: EdgeId,
        selected: bool,
    },
    /// edge deleted
    Remove {
        id: EdgeId,
    },
}

impl NodeChange {
    pub fn id(&self) -> &NodeId {
        match self {
            NodeChange::Position {
                id,
                ..
            }
            | NodeChange::Select {
                id,
                ..
            }
            | NodeChange::Remove {
                id,
            } => id,
        }
    }
}

impl EdgeChange {
    pub fn id(&self) -> &EdgeId {
        match self {
            EdgeChange::Select {
                id,
                ..
            }
            | EdgeChange::Remove {
                id,
            } => id,
        }
    }
}
