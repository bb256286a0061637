//! Editor session - the entry point of the editor core.
//!
//! A session owns at most one open workflow and coordinates:
//! - loading and saving through the remote [`WorkflowStore`]
//! - user gestures against the [`GraphStore`]
//! - notices for rejected edits and persistence failures
//!
//! Sessions share nothing mutable; two sessions editing the same workflow
//! each hold their own graph.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    EditorError, Result,
    events::Notifier,
    mapper::WorkflowDtoMapper,
    model::CreateWorkflowModel,
    router::{PathRouter, RoutedPath},
    store::{AssistantDirectory, WorkflowStore},
    workflow::{
        Connection, GraphStore, WorkflowSummary,
        assistant::{Assistant, AssistantRef},
        changes::{EdgeChange, NodeChange},
        node::{Position, WorkflowNode},
    },
};

/// Notice code for gestures made while nothing is open.
pub const NO_OPEN_WORKFLOW: &str = "no_open_workflow";
/// Notice code for failed list/create/save/delete calls.
pub const PERSISTENCE_FAILED: &str = "persistence";
/// Notice code for a workflow that could not be opened.
pub const LOAD_FAILED: &str = "load_failed";
/// Notice code for a completed save.
pub const SAVED: &str = "saved";

struct OpenWorkflow {
    summary: WorkflowSummary,
    graph: GraphStore,
    /// graph revision matching the remote copy
    saved_revision: u64,
}

pub struct EditorSession {
    store: Arc<dyn WorkflowStore>,
    directory: Arc<dyn AssistantDirectory>,
    notifier: Arc<Notifier>,
    router: PathRouter,
    open: Option<OpenWorkflow>,
}

impl EditorSession {
    pub fn new(
        store: Arc<dyn WorkflowStore>,
        directory: Arc<dyn AssistantDirectory>,
        notifier: Arc<Notifier>,
        router: PathRouter,
    ) -> Self {
        Self {
            store,
            directory,
            notifier,
            router,
            open: None,
        }
    }

    pub fn notifier(&self) -> Arc<Notifier> {
        self.notifier.clone()
    }

    pub fn router(&self) -> &PathRouter {
        &self.router
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// summary of the open workflow
    pub fn current(&self) -> Option<&WorkflowSummary> {
        self.open.as_ref().map(|o| &o.summary)
    }

    /// read access to the open graph
    pub fn graph(&self) -> Option<&GraphStore> {
        self.open.as_ref().map(|o| &o.graph)
    }

    /// true when the open graph differs from what was last loaded or saved
    pub fn is_dirty(&self) -> bool {
        self.open.as_ref().is_some_and(|o| o.graph.revision() != o.saved_revision)
    }

    // ==================== remote operations ====================

    pub async fn list(&self) -> Result<Vec<WorkflowSummary>> {
        let summaries = self.store.list().await.map_err(|e| self.persistence_failed("list workflows", e))?;
        Ok(summaries.iter().map(WorkflowDtoMapper::summary_to_domain).collect())
    }

    pub async fn assistants(&self) -> Result<Vec<Assistant>> {
        let assistants = self.directory.assistants().await.map_err(|e| self.persistence_failed("list assistants", e))?;
        Ok(assistants.iter().map(WorkflowDtoMapper::assistant_to_domain).collect())
    }

    /// Opens `id`, discarding whatever was open. On failure the previous
    /// workflow stays open.
    pub async fn open(
        &mut self,
        id: &str,
    ) -> Result<()> {
        let loaded = match self.store.get(id).await {
            Ok(dto) => WorkflowDtoMapper::to_domain(&dto),
            Err(e) => Err(e),
        };
        let workflow = loaded.map_err(|e| self.load_failed(id, e))?;

        let mut graph = GraphStore::new(self.notifier.clone());
        graph.load(&workflow);
        info!("session::open({}) nodes: {}, edges: {}", workflow.id, graph.len(), graph.edges().len());

        self.open = Some(OpenWorkflow {
            summary: workflow.summary(),
            saved_revision: graph.revision(),
            graph,
        });
        Ok(())
    }

    /// Discards the open workflow without saving.
    pub fn close(&mut self) {
        if let Some(open) = self.open.take() {
            debug!("session::close({}) dirty: {}", open.summary.id, open.graph.revision() != open.saved_revision);
        }
    }

    /// Creates a workflow and opens it right away.
    pub async fn create(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<WorkflowSummary> {
        let data = CreateWorkflowModel {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        let dto = self.store.create(&data).await.map_err(|e| self.persistence_failed("create workflow", e))?;
        let workflow = WorkflowDtoMapper::to_domain(&dto).map_err(|e| self.load_failed(&dto.id, e))?;

        let mut graph = GraphStore::new(self.notifier.clone());
        graph.load(&workflow);
        let summary = workflow.summary();
        info!("session::create({})", summary.id);

        self.open = Some(OpenWorkflow {
            summary: summary.clone(),
            saved_revision: graph.revision(),
            graph,
        });
        Ok(summary)
    }

    /// Persists the open graph. A failure keeps every local edit so the save
    /// can simply be retried.
    pub async fn save(&mut self) -> Result<WorkflowSummary> {
        let Some(open) = self.open.as_ref() else {
            self.notifier.warn(NO_OPEN_WORKFLOW, "no workflow is open");
            return Err(EditorError::Session("no workflow is open".into()));
        };
        let revision = open.graph.revision();
        let dto = WorkflowDtoMapper::to_wire(&open.graph.to_workflow(&open.summary));

        let saved = self.store.save(&dto).await.map_err(|e| self.persistence_failed("save workflow", e))?;
        let summary = WorkflowDtoMapper::summary_to_domain(&saved);

        if let Some(open) = self.open.as_mut() {
            open.summary = summary.clone();
            open.saved_revision = revision;
        }
        self.notifier.info(SAVED, format!("workflow {} saved", summary.name));
        Ok(summary)
    }

    /// Deletes a workflow; closes it when it is the open one.
    pub async fn delete(
        &mut self,
        id: &str,
    ) -> Result<()> {
        self.store.delete(id).await.map_err(|e| self.persistence_failed("delete workflow", e))?;
        if self.current().is_some_and(|s| s.id == id) {
            self.close();
        }
        Ok(())
    }

    // ==================== gestures ====================

    /// Places `assistant` on the canvas.
    pub fn add_assistant(
        &mut self,
        assistant: &AssistantRef,
        position: Position,
    ) -> bool {
        let node = WorkflowNode::for_assistant(assistant, position);
        self.editing().is_some_and(|graph| graph.add_node(node))
    }

    /// Handles a drop on the canvas. Payloads that are not an assistant
    /// reference are ignored without a notice.
    pub fn drop_payload(
        &mut self,
        payload: &str,
        position: Position,
    ) -> bool {
        match AssistantRef::from_drop_payload(payload) {
            Some(assistant) => self.add_assistant(&assistant, position),
            None => false,
        }
    }

    pub fn connect(
        &mut self,
        connection: &Connection,
    ) -> bool {
        self.editing().is_some_and(|graph| graph.connect(connection))
    }

    pub fn apply_node_changes(
        &mut self,
        changes: Vec<NodeChange>,
    ) -> usize {
        self.editing().map_or(0, |graph| graph.apply_node_changes(changes))
    }

    pub fn apply_edge_changes(
        &mut self,
        changes: Vec<EdgeChange>,
    ) -> usize {
        self.editing().map_or(0, |graph| graph.apply_edge_changes(changes))
    }

    pub fn designate_start(
        &mut self,
        id: &str,
    ) -> bool {
        self.editing().is_some_and(|graph| graph.designate_start(id))
    }

    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> bool {
        self.editing().is_some_and(|graph| graph.remove_node(id))
    }

    /// Path for drawing edge `id` between its endpoints' positions.
    pub fn route_edge(
        &self,
        id: &str,
    ) -> Option<RoutedPath> {
        let graph = self.graph()?;
        let edge = graph.edge(id)?;
        let source = graph.node(&edge.source)?;
        let target = graph.node(&edge.target)?;
        Some(self.router.route(source.position, target.position))
    }

    fn editing(&mut self) -> Option<&mut GraphStore> {
        match self.open.as_mut() {
            Some(open) => Some(&mut open.graph),
            None => {
                self.notifier.warn(NO_OPEN_WORKFLOW, "open or create a workflow first");
                None
            }
        }
    }

    fn load_failed(
        &self,
        id: &str,
        err: EditorError,
    ) -> EditorError {
        self.notifier.error(LOAD_FAILED, format!("failed to open workflow {}: {}", id, err));
        err
    }

    fn persistence_failed(
        &self,
        action: &str,
        err: EditorError,
    ) -> EditorError {
        self.notifier.error(PERSISTENCE_FAILED, format!("failed to {}: {}", action, err));
        err
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        model::{AssistantModel, NodeModel, WorkflowModel, WorkflowSummaryModel},
        store::MemStore,
        workflow::edge::EdgeMode,
    };

    /// Backend whose freshly created workflows already carry `seed`.
    struct SeededStore {
        inner: MemStore,
        seed: NodeModel,
    }

    #[async_trait]
    impl WorkflowStore for SeededStore {
        async fn list(&self) -> Result<Vec<WorkflowSummaryModel>> {
            self.inner.list().await
        }

        async fn get(
            &self,
            id: &str,
        ) -> Result<WorkflowModel> {
            self.inner.get(id).await
        }

        async fn create(
            &self,
            data: &CreateWorkflowModel,
        ) -> Result<WorkflowModel> {
            let mut workflow = self.inner.create(data).await?;
            workflow.nodes.push(self.seed.clone());
            Ok(workflow)
        }

        async fn save(
            &self,
            data: &WorkflowModel,
        ) -> Result<WorkflowSummaryModel> {
            self.inner.save(data).await
        }

        async fn delete(
            &self,
            id: &str,
        ) -> Result<()> {
            self.inner.delete(id).await
        }
    }

    fn session(store: &MemStore) -> EditorSession {
        let store = Arc::new(store.clone());
        EditorSession::new(store.clone(), store, Arc::new(Notifier::default()), PathRouter::default())
    }

    fn assistant(id: &str) -> AssistantRef {
        AssistantRef::new(id, id.to_uppercase(), "")
    }

    fn node_id(
        s: &EditorSession,
        assistant_id: &str,
    ) -> String {
        s.graph().unwrap().nodes().iter().find(|n| n.assistant_id() == assistant_id).unwrap().id.clone()
    }

    fn codes(s: &EditorSession) -> Vec<String> {
        s.notifier().notices().into_iter().map(|n| n.code).collect()
    }

    // ==================== lifecycle ====================

    #[tokio::test]
    async fn test_create_opens_empty_workflow() {
        let store = MemStore::new();
        let mut s = session(&store);
        let summary = s.create("Support", Some("tier one")).await.unwrap();

        assert!(s.is_open());
        assert_eq!(s.current().unwrap().id, summary.id);
        assert_eq!(s.current().unwrap().description, "tier one");
        assert!(s.graph().unwrap().is_empty());
        assert!(!s.is_dirty());
    }

    #[tokio::test]
    async fn test_save_then_reopen_reproduces_graph() {
        let store = MemStore::new();
        let mut s = session(&store);
        let summary = s.create("Support", None).await.unwrap();

        assert!(s.add_assistant(&assistant("x"), Position::new(0.0, 0.0)));
        assert!(s.add_assistant(&assistant("y"), Position::new(200.0, 0.0)));
        let (x, y) = (node_id(&s, "x"), node_id(&s, "y"));
        assert!(s.connect(&Connection::new(&x, &y)));
        assert!(s.is_dirty());

        s.save().await.unwrap();
        assert!(!s.is_dirty());
        assert_eq!(codes(&s).last().unwrap(), SAVED);

        let mut other = session(&store);
        other.open(&summary.id).await.unwrap();
        let graph = other.graph().unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.node(&x).unwrap().is_start);
        assert_eq!(graph.edge_between(&x, &y).unwrap().mode, EdgeMode::Single);
    }

    #[tokio::test]
    async fn test_open_repairs_missing_start_and_dangling_edges() {
        let store = MemStore::new();
        store.insert(WorkflowModel {
            id: "wf".to_string(),
            name: "legacy".to_string(),
            nodes: vec![
                NodeModel {
                    id: "a".to_string(),
                    node_type: "assistant".to_string(),
                    assistant_id: "x".to_string(),
                    ..Default::default()
                },
            ],
            edges: vec![crate::model::EdgeModel {
                id: "e".to_string(),
                from_node_id: "a".to_string(),
                to_node_id: "missing".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });

        let mut s = session(&store);
        s.open("wf").await.unwrap();
        let graph = s.graph().unwrap();
        assert!(graph.node("a").unwrap().is_start);
        assert!(graph.edges().is_empty());
        assert!(s.notifier().is_empty());
    }

    #[tokio::test]
    async fn test_failed_open_keeps_current_workflow() {
        let store = MemStore::new();
        let mut s = session(&store);
        let summary = s.create("a", None).await.unwrap();

        assert!(s.open("missing").await.is_err());
        assert_eq!(s.current().unwrap().id, summary.id);
        assert_eq!(codes(&s), vec![LOAD_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_unreadable_created_workflow_reports_load_failure() {
        let mem = MemStore::new();
        let store = Arc::new(SeededStore {
            inner: mem.clone(),
            seed: NodeModel {
                id: "n".to_string(),
                node_type: "router".to_string(),
                assistant_id: "x".to_string(),
                ..Default::default()
            },
        });
        let mut s = EditorSession::new(store, Arc::new(mem), Arc::new(Notifier::default()), PathRouter::default());

        assert!(matches!(s.create("a", None).await, Err(EditorError::Convert(_))));
        assert!(!s.is_open());
        assert_eq!(codes(&s), vec![LOAD_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_local_edits() {
        let store = MemStore::new();
        let mut s = session(&store);
        s.create("a", None).await.unwrap();
        s.add_assistant(&assistant("x"), Position::default());

        store.set_offline(true);
        assert!(s.save().await.is_err());
        assert_eq!(s.graph().unwrap().len(), 1);
        assert!(s.is_dirty());
        assert!(s.notifier().last().unwrap().is_error());

        store.set_offline(false);
        s.save().await.unwrap();
        assert!(!s.is_dirty());
    }

    #[tokio::test]
    async fn test_save_without_open_workflow() {
        let mut s = session(&MemStore::new());
        assert!(matches!(s.save().await, Err(EditorError::Session(_))));
        assert_eq!(codes(&s), vec![NO_OPEN_WORKFLOW.to_string()]);
    }

    #[tokio::test]
    async fn test_delete_open_workflow_closes_it() {
        let store = MemStore::new();
        let mut s = session(&store);
        let a = s.create("a", None).await.unwrap();
        let b = s.create("b", None).await.unwrap();

        s.delete(&a.id).await.unwrap();
        assert_eq!(s.current().unwrap().id, b.id);

        s.delete(&b.id).await.unwrap();
        assert!(!s.is_open());
        assert!(s.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_close_discards_unsaved_edits() {
        let store = MemStore::new();
        let mut s = session(&store);
        let summary = s.create("a", None).await.unwrap();
        s.add_assistant(&assistant("x"), Position::default());
        s.close();

        s.open(&summary.id).await.unwrap();
        assert!(s.graph().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assistants_are_mapped() {
        let store = MemStore::with_assistants(vec![AssistantModel {
            id: "a1".to_string(),
            name: "Billing".to_string(),
            ..Default::default()
        }]);
        let s = session(&store);
        let assistants = s.assistants().await.unwrap();
        assert_eq!(assistants.len(), 1);
        assert_eq!(AssistantRef::from(&assistants[0]), AssistantRef::new("a1", "Billing", ""));
    }

    // ==================== gestures ====================

    #[test]
    fn test_gestures_without_open_workflow_warn() {
        let mut s = session(&MemStore::new());
        assert!(!s.add_assistant(&assistant("x"), Position::default()));
        assert!(!s.connect(&Connection::new("a", "b")));
        assert_eq!(
            s.apply_node_changes(vec![NodeChange::Remove {
                id: "a".to_string(),
            }]),
            0
        );
        assert_eq!(codes(&s), vec![NO_OPEN_WORKFLOW.to_string(); 3]);
    }

    #[tokio::test]
    async fn test_drop_payload() {
        let mut s = session(&MemStore::new());
        s.create("a", None).await.unwrap();

        assert!(!s.drop_payload("{broken", Position::default()));
        assert!(s.notifier().is_empty());

        assert!(s.drop_payload(r#"{"id":"x","name":"X","description":"d"}"#, Position::new(3.0, 4.0)));
        let node = &s.graph().unwrap().nodes()[0];
        assert_eq!(node.label(), "X");
        assert_eq!(node.position, Position::new(3.0, 4.0));
        assert!(node.is_start);
    }

    #[tokio::test]
    async fn test_route_edge_uses_node_positions() {
        let mut s = session(&MemStore::new());
        s.create("a", None).await.unwrap();
        s.add_assistant(&assistant("x"), Position::new(0.0, 0.0));
        s.add_assistant(&assistant("y"), Position::new(100.0, 40.0));
        let (x, y) = (node_id(&s, "x"), node_id(&s, "y"));
        s.connect(&Connection::new(&x, &y));

        let edge_id = s.graph().unwrap().edges()[0].id.clone();
        let path = s.route_edge(&edge_id).unwrap();
        assert_eq!(path.d, "M 0 0 L 92 0 Q 100 0 100 8 L 100 40");
        assert!(s.route_edge("nope").is_none());
    }
}
