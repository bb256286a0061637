use std::sync::Arc;

use crate::{
    Config, EditorError, EditorSession, Result, StoreType,
    events::Notifier,
    router::PathRouter,
    store::{AssistantDirectory, HttpStore, MemStore, WorkflowStore},
};

type Backend = (Arc<dyn WorkflowStore>, Arc<dyn AssistantDirectory>);

#[derive(Default)]
pub struct SessionBuilder {
    config: Config,
    store: Option<Arc<dyn WorkflowStore>>,
    directory: Option<Arc<dyn AssistantDirectory>>,
    notifier: Option<Arc<Notifier>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn store(
        mut self,
        store: Arc<dyn WorkflowStore>,
    ) -> Self {
        self.store = Some(store);
        self
    }

    pub fn directory(
        mut self,
        directory: Arc<dyn AssistantDirectory>,
    ) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn notifier(
        mut self,
        notifier: Arc<Notifier>,
    ) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(&self) -> Result<EditorSession> {
        let (store, directory) = match (&self.store, &self.directory) {
            (Some(store), Some(directory)) => (store.clone(), directory.clone()),
            (store, directory) => {
                let (default_store, default_directory) = self.backend()?;
                (store.clone().unwrap_or(default_store), directory.clone().unwrap_or(default_directory))
            }
        };
        let notifier = match &self.notifier {
            Some(notifier) => notifier.clone(),
            None => Arc::new(Notifier::new(self.config.editor.notice_capacity)),
        };
        let router = PathRouter::new(self.config.editor.corner_radius);

        Ok(EditorSession::new(store, directory, notifier, router))
    }

    fn backend(&self) -> Result<Backend> {
        match self.config.store.store_type {
            StoreType::Mem => {
                let mem = Arc::new(MemStore::new());
                let store: Arc<dyn WorkflowStore> = mem.clone();
                let directory: Arc<dyn AssistantDirectory> = mem;
                Ok((store, directory))
            }
            StoreType::Http => {
                let http = self.config.store.http.as_ref().ok_or(EditorError::Config("http configuration is required when store type is http".into()))?;
                let http = Arc::new(HttpStore::new(http)?);
                let store: Arc<dyn WorkflowStore> = http.clone();
                let directory: Arc<dyn AssistantDirectory> = http;
                Ok((store, directory))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults_to_mem_store() {
        let session = SessionBuilder::new().build().unwrap();
        assert!(!session.is_open());
        assert_eq!(session.router().radius(), 8.0);
    }

    #[test]
    fn test_build_applies_editor_config() {
        let config = Config::load_from_str("[editor]\ncorner_radius = 4.0\nnotice_capacity = 1\n").unwrap();
        let session = SessionBuilder::new().config(config).build().unwrap();
        assert_eq!(session.router().radius(), 4.0);

        let notifier = session.notifier();
        notifier.warn("a", "a");
        notifier.warn("b", "b");
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_http_store_requires_http_section() {
        let config = Config::load_from_str("[store]\nstore_type = \"http\"\n").unwrap();
        assert!(matches!(SessionBuilder::new().config(config).build(), Err(EditorError::Config(_))));
    }

    #[test]
    fn test_explicit_notifier_is_shared() {
        let notifier = Arc::new(Notifier::default());
        let session = SessionBuilder::new().notifier(notifier.clone()).build().unwrap();
        session.notifier().warn("x", "x");
        assert_eq!(notifier.len(), 1);
    }
}
