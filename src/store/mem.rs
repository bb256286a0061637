use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tracing::trace;

use crate::{
    EditorError, Result, ShareLock,
    model::{AssistantModel, CreateWorkflowModel, WorkflowModel, WorkflowSummaryModel},
    store::{AssistantDirectory, WorkflowStore},
    utils,
};

/// In-process workflow store and assistant directory.
///
/// Workflows are listed in creation order. `set_offline(true)` makes every
/// call fail, which is how persistence failures are simulated.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    workflows: ShareLock<Vec<WorkflowModel>>,
    assistants: ShareLock<Vec<AssistantModel>>,
    offline: Arc<AtomicBool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            workflows: Arc::new(RwLock::new(Vec::new())),
            assistants: Arc::new(RwLock::new(Vec::new())),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_assistants(assistants: Vec<AssistantModel>) -> Self {
        let store = Self::new();
        *store.assistants.write().unwrap() = assistants;
        store
    }

    /// seed a workflow as-is, replacing one with the same id
    pub fn insert(
        &self,
        workflow: WorkflowModel,
    ) {
        let mut workflows = self.workflows.write().unwrap();
        workflows.retain(|w| w.id != workflow.id);
        workflows.push(workflow);
    }

    pub fn set_offline(
        &self,
        offline: bool,
    ) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(EditorError::Store("workflow store is unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl WorkflowStore for MemStore {
    async fn list(&self) -> Result<Vec<WorkflowSummaryModel>> {
        trace!("store::list()");
        self.ensure_online()?;
        Ok(self.workflows.read().unwrap().iter().map(WorkflowModel::summary).collect())
    }

    async fn get(
        &self,
        id: &str,
    ) -> Result<WorkflowModel> {
        trace!("store::get({})", id);
        self.ensure_online()?;
        self.workflows.read().unwrap().iter().find(|w| w.id == id).cloned().ok_or(EditorError::Store(format!("workflow {} not found", id)))
    }

    async fn create(
        &self,
        data: &CreateWorkflowModel,
    ) -> Result<WorkflowModel> {
        trace!("store::create({})", data.name);
        self.ensure_online()?;
        if data.name.trim().is_empty() {
            return Err(EditorError::Workflow("workflow name is required".into()));
        }
        let now = utils::time::time_millis();
        let workflow = WorkflowModel {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name.clone(),
            description: data.description.clone().unwrap_or_default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.workflows.write().unwrap().push(workflow.clone());
        Ok(workflow)
    }

    async fn save(
        &self,
        data: &WorkflowModel,
    ) -> Result<WorkflowSummaryModel> {
        trace!("store::save({})", data.id);
        self.ensure_online()?;
        let mut workflows = self.workflows.write().unwrap();
        let stored = workflows.iter_mut().find(|w| w.id == data.id).ok_or(EditorError::Store(format!("workflow {} not found", data.id)))?;

        let created_at = stored.created_at;
        *stored = data.clone();
        stored.created_at = created_at;
        stored.updated_at = utils::time::time_millis();
        Ok(stored.summary())
    }

    async fn delete(
        &self,
        id: &str,
    ) -> Result<()> {
        trace!("store::delete({})", id);
        self.ensure_online()?;
        let mut workflows = self.workflows.write().unwrap();
        let before = workflows.len();
        workflows.retain(|w| w.id != id);
        if workflows.len() == before {
            return Err(EditorError::Store(format!("workflow {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl AssistantDirectory for MemStore {
    async fn assistants(&self) -> Result<Vec<AssistantModel>> {
        trace!("store::assistants()");
        self.ensure_online()?;
        Ok(self.assistants.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeModel, NodeModel};

    fn create(name: &str) -> CreateWorkflowModel {
        CreateWorkflowModel {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_list_and_get() {
        let store = MemStore::new();
        let a = store.create(&create("a")).await.unwrap();
        let b = store.create(&create("b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.nodes.is_empty());

        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.get(&b.id).await.unwrap(), b);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let store = MemStore::new();
        assert!(store.create(&create("  ")).await.is_err());
    }

    #[tokio::test]
    async fn test_save_replaces_graph_and_keeps_created_at() {
        let store = MemStore::new();
        let mut wf = store.create(&create("a")).await.unwrap();
        wf.nodes.push(NodeModel {
            id: "n1".to_string(),
            node_type: "assistant".to_string(),
            assistant_id: "x".to_string(),
            ..Default::default()
        });
        wf.edges.push(EdgeModel::default());
        wf.created_at = 1;

        let summary = store.save(&wf).await.unwrap();
        assert_eq!(summary.id, wf.id);

        let stored = store.get(&wf.id).await.unwrap();
        assert_eq!(stored.nodes.len(), 1);
        assert_ne!(stored.created_at, 1);
        assert!(stored.updated_at >= stored.created_at);
    }

    #[tokio::test]
    async fn test_missing_records() {
        let store = MemStore::new();
        assert!(store.get("nope").await.is_err());
        assert!(store.delete("nope").await.is_err());
        assert!(store.save(&WorkflowModel::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemStore::new();
        let wf = store.create(&create("a")).await.unwrap();
        store.set_offline(true);
        assert!(matches!(store.list().await, Err(EditorError::Store(_))));
        assert!(store.get(&wf.id).await.is_err());
        assert!(store.assistants().await.is_err());

        store.set_offline(false);
        store.delete(&wf.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
