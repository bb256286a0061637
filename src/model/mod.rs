//! Wire schema exchanged with the remote workflow API.
//!
//! These types mirror the backend's JSON exactly; the editor never works on
//! them directly. See [`crate::mapper`] for the translation into the domain
//! model.

mod assistant;
mod edge;
mod node;
mod workflow;

pub use assistant::{AssistantModel, ConfigFieldModel, PluginModel};
pub use edge::EdgeModel;
pub use node::NodeModel;
pub use workflow::{CreateWorkflowModel, WorkflowModel, WorkflowSummaryModel};
