use std::str::FromStr;

use crate::{
    EditorError, Result,
    model::{EdgeModel, NodeModel, WorkflowModel, WorkflowSummaryModel},
    workflow::{
        Workflow, WorkflowSummary,
        edge::{EdgeMode, WorkflowEdge},
        node::{AssistantNode, NodeKind, NodeType, Position, WorkflowNode},
    },
};

impl TryFrom<&NodeModel> for WorkflowNode {
    type Error = EditorError;

    fn try_from(dto: &NodeModel) -> Result<Self> {
        let node_type = NodeType::from_str(&dto.node_type).map_err(|_| EditorError::Convert(format!("node {} has unknown type '{}'", dto.id, dto.node_type)))?;
        let kind = match node_type {
            NodeType::Assistant => NodeKind::Assistant(AssistantNode {
                assistant_id: dto.assistant_id.clone(),
                label: dto.label.clone().unwrap_or_default(),
                description: dto.description.clone().unwrap_or_default(),
            }),
        };

        Ok(WorkflowNode {
            id: dto.id.clone(),
            kind,
            position: Position::new(dto.position_x, dto.position_y),
            is_start: dto.is_start_node.unwrap_or(false),
            selected: false,
        })
    }
}

impl From<&WorkflowNode> for NodeModel {
    fn from(node: &WorkflowNode) -> Self {
        let (assistant_id, label, description) = match &node.kind {
            NodeKind::Assistant(a) => (a.assistant_id.clone(), a.label.clone(), a.description.clone()),
        };

        NodeModel {
            id: node.id.clone(),
            node_type: node.kind.node_type().as_ref().to_string(),
            assistant_id,
            position_x: node.position.x,
            position_y: node.position.y,
            is_start_node: Some(node.is_start),
            label: Some(label),
            description: (!description.is_empty()).then_some(description),
        }
    }
}

impl TryFrom<&EdgeModel> for WorkflowEdge {
    type Error = EditorError;

    fn try_from(dto: &EdgeModel) -> Result<Self> {
        let mode = match dto.mode.as_deref() {
            None => EdgeMode::default(),
            Some(mode) => EdgeMode::from_str(mode).map_err(|_| EditorError::Convert(format!("edge {} has unknown mode '{}'", dto.id, mode)))?,
        };

        Ok(WorkflowEdge {
            id: dto.id.clone(),
            source: dto.from_node_id.clone(),
            target: dto.to_node_id.clone(),
            source_handle: dto.source_handle.clone(),
            target_handle: dto.target_handle.clone(),
            mode,
            selected: false,
        })
    }
}

impl From<&WorkflowEdge> for EdgeModel {
    fn from(edge: &WorkflowEdge) -> Self {
        EdgeModel {
            id: edge.id.clone(),
            from_node_id: edge.source.clone(),
            to_node_id: edge.target.clone(),
            source_handle: edge.source_handle.clone(),
            target_handle: edge.target_handle.clone(),
            mode: Some(edge.mode.as_ref().to_string()),
        }
    }
}

impl TryFrom<&WorkflowModel> for Workflow {
    type Error = EditorError;

    fn try_from(dto: &WorkflowModel) -> Result<Self> {
        let nodes = dto.nodes.iter().map(WorkflowNode::try_from).collect::<Result<Vec<_>>>()?;
        let edges = dto.edges.iter().map(WorkflowEdge::try_from).collect::<Result<Vec<_>>>()?;

        Ok(Workflow {
            id: dto.id.clone(),
            name: dto.name.clone(),
            description: dto.description.clone(),
            nodes,
            edges,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        })
    }
}

impl From<&Workflow> for WorkflowModel {
    fn from(workflow: &Workflow) -> Self {
        WorkflowModel {
            id: workflow.id.clone(),
            name: workflow.name.clone(),
            description: workflow.description.clone(),
            nodes: workflow.nodes.iter().map(NodeModel::from).collect(),
            edges: workflow.edges.iter().map(EdgeModel::from).collect(),
            created_at: workflow.created_at,
            updated_at: workflow.updated_at,
        }
    }
}

impl From<&WorkflowSummaryModel> for WorkflowSummary {
    fn from(dto: &WorkflowSummaryModel) -> Self {
        WorkflowSummary {
            id: dto.id.clone(),
            name: dto.name.clone(),
            description: dto.description.clone(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}
