//! Remote collaborators: the workflow store and the assistant directory.
//!
//! Both speak the wire schema of [`crate::model`]. Two backends are provided:
//! - `MemStore`: in-process storage for tests and offline use
//! - `HttpStore`: JSON over HTTP against the workflow API

mod http;
mod mem;

use std::error::Error;

use async_trait::async_trait;

use crate::{
    EditorError, Result,
    model::{AssistantModel, CreateWorkflowModel, WorkflowModel, WorkflowSummaryModel},
};

pub use http::HttpStore;
pub use mem::MemStore;

/// Maps backend errors to EditorError.
fn map_store_err(err: impl Error) -> EditorError {
    EditorError::Store(err.to_string())
}

/// Persistence of workflows.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Lists all workflows as summaries.
    async fn list(&self) -> Result<Vec<WorkflowSummaryModel>>;

    /// Fetches a full workflow by ID.
    async fn get(
        &self,
        id: &str,
    ) -> Result<WorkflowModel>;

    /// Creates a new, empty workflow.
    async fn create(
        &self,
        data: &CreateWorkflowModel,
    ) -> Result<WorkflowModel>;

    /// Replaces the stored graph of an existing workflow.
    async fn save(
        &self,
        data: &WorkflowModel,
    ) -> Result<WorkflowSummaryModel>;

    /// Deletes a workflow by ID.
    async fn delete(
        &self,
        id: &str,
    ) -> Result<()>;
}

/// Read-only list of assistants that can be placed on the canvas.
#[async_trait]
pub trait AssistantDirectory: Send + Sync {
    async fn assistants(&self) -> Result<Vec<AssistantModel>>;
}
