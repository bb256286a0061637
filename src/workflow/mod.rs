//! Editing-time workflow graph.
//!
//! Domain types for nodes, edges and workflows, plus the components that own
//! the graph rules: [`GraphStore`], [`ConnectionPolicy`] and
//! [`StartNodeManager`].

pub mod assistant;
pub mod changes;
pub mod edge;
pub mod graph;
pub mod node;
pub mod policy;
pub mod rejection;
pub mod start;
mod workflow;

pub use graph::GraphStore;
pub use policy::{Connection, ConnectionOutcome, ConnectionPolicy};
pub use rejection::Rejection;
pub use start::StartNodeManager;
pub use workflow::{Workflow, WorkflowSummary};
