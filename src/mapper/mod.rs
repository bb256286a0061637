//! Translation between the wire schema ([`crate::model`]) and the editor's
//! domain model ([`crate::workflow`]).
//!
//! The wire side uses its own field names (`from_node_id`/`to_node_id`,
//! `is_start_node`, flat positions) and carries plugin configuration as a
//! field/value list. None of that leaks past this module.

mod assistant;
mod workflow;

pub use assistant::{entries_to_map, map_to_entries};

use crate::{
    Result,
    model::{AssistantModel, WorkflowModel, WorkflowSummaryModel},
    workflow::{Workflow, WorkflowSummary, assistant::Assistant},
};

pub struct WorkflowDtoMapper;

impl WorkflowDtoMapper {
    /// Wire workflow to domain workflow. A missing start flag is kept as-is;
    /// [`crate::GraphStore::load`] repairs it.
    pub fn to_domain(dto: &WorkflowModel) -> Result<Workflow> {
        Workflow::try_from(dto)
    }

    pub fn to_wire(workflow: &Workflow) -> WorkflowModel {
        WorkflowModel::from(workflow)
    }

    pub fn summary_to_domain(dto: &WorkflowSummaryModel) -> WorkflowSummary {
        WorkflowSummary::from(dto)
    }

    pub fn assistant_to_domain(dto: &AssistantModel) -> Assistant {
        Assistant::from(dto)
    }

    pub fn assistant_to_wire(assistant: &Assistant) -> AssistantModel {
        AssistantModel::from(assistant)
    }
}
