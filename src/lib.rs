//! # Handoff Studio
//!
//! Editing-time graph model for assistant handoff workflows: the state behind
//! a visual builder where assistants are placed as nodes and connected by
//! single or bidirectional handoff edges.
//!
//! ## Core Features
//!
//! - **Invariant-keeping graph store**: one start node, no self-loops, one edge per node pair
//! - **Connection rules**: new edges, in-place upgrades to bidirectional, and user-facing rejections
//! - **Wire mapping**: lossless translation to and from the backend workflow schema
//! - **Pluggable storage**: in-memory store (testing) and HTTP store (production)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use handoff_studio::{AssistantRef, Connection, Position, SessionBuilder};
//!
//! let mut session = SessionBuilder::new().build()?;
//! session.create("Support", None).await?;
//! session.add_assistant(&AssistantRef::new("triage", "Triage", ""), Position::new(0.0, 0.0));
//! session.add_assistant(&AssistantRef::new("billing", "Billing", ""), Position::new(240.0, 0.0));
//! session.connect(&Connection::new(triage_node_id, billing_node_id));
//! session.save().await?;
//! ```

mod builder;
mod config;
mod error;
pub mod events;
pub mod mapper;
pub mod model;
pub mod router;
mod session;
pub mod store;
mod utils;
pub mod workflow;

use std::sync::{Arc, RwLock};

pub use builder::SessionBuilder;
pub use config::{Config, EditorConfig, HttpConfig, StoreConfig, StoreType};
pub use error::EditorError;
pub use events::{Notice, NoticeLevel, Notifier};
pub use mapper::WorkflowDtoMapper;
pub use router::{PathRouter, RoutedPath};
pub use session::{EditorSession, LOAD_FAILED, NO_OPEN_WORKFLOW, PERSISTENCE_FAILED, SAVED};
pub use store::{AssistantDirectory, HttpStore, MemStore, WorkflowStore};
pub use workflow::{
    Connection, ConnectionOutcome, ConnectionPolicy, GraphStore, Rejection, StartNodeManager, Workflow, WorkflowSummary,
    assistant::{Assistant, AssistantPlugin, AssistantRef},
    changes::{EdgeChange, NodeChange},
    edge::{EdgeId, EdgeMode, WorkflowEdge},
    node::{AssistantNode, NodeId, NodeKind, NodeType, Position, WorkflowNode},
};

/// Result type alias for fallible editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
