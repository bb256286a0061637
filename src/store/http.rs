use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use crate::{
    HttpConfig, Result,
    model::{AssistantModel, CreateWorkflowModel, WorkflowModel, WorkflowSummaryModel},
    store::{AssistantDirectory, WorkflowStore, map_store_err},
};

/// Workflow store backed by the JSON workflow API.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_millis(config.timeout_ms)).build().map_err(map_store_err)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(
        &self,
        path: &str,
    ) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn workflow_url(
        &self,
        id: &str,
    ) -> String {
        self.url(&format!("workflows/{}", id))
    }
}

#[async_trait]
impl WorkflowStore for HttpStore {
    async fn list(&self) -> Result<Vec<WorkflowSummaryModel>> {
        trace!("store::list()");
        let res = self.client.get(self.url("workflows")).send().await?.error_for_status()?;
        Ok(res.json().await?)
    }

    async fn get(
        &self,
        id: &str,
    ) -> Result<WorkflowModel> {
        trace!("store::get({})", id);
        let res = self.client.get(self.workflow_url(id)).send().await?.error_for_status()?;
        Ok(res.json().await?)
    }

    async fn create(
        &self,
        data: &CreateWorkflowModel,
    ) -> Result<WorkflowModel> {
        trace!("store::create({})", data.name);
        let res = self.client.post(self.url("workflows")).json(data).send().await?.error_for_status()?;
        Ok(res.json().await?)
    }

    async fn save(
        &self,
        data: &WorkflowModel,
    ) -> Result<WorkflowSummaryModel> {
        trace!("store::save({})", data.id);
        let res = self.client.put(self.workflow_url(&data.id)).json(data).send().await?.error_for_status()?;
        Ok(res.json().await?)
    }

    async fn delete(
        &self,
        id: &str,
    ) -> Result<()> {
        trace!("store::delete({})", id);
        self.client.delete(self.workflow_url(id)).send().await?.error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl AssistantDirectory for HttpStore {
    async fn assistants(&self) -> Result<Vec<AssistantModel>> {
        trace!("store::assistants()");
        let res = self.client.get(self.url("assistants")).send().await?.error_for_status()?;
        Ok(res.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> HttpConfig {
        HttpConfig {
            base_url: base_url.to_string(),
            timeout_ms: 500,
        }
    }

    #[test]
    fn test_urls_are_joined_without_double_slashes() {
        let store = HttpStore::new(&config("http://localhost:8000/api/")).unwrap();
        assert_eq!(store.base_url(), "http://localhost:8000/api");
        assert_eq!(store.url("/workflows"), "http://localhost:8000/api/workflows");
        assert_eq!(store.workflow_url("wf-1"), "http://localhost:8000/api/workflows/wf-1");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_store_error() {
        let store = HttpStore::new(&config("http://127.0.0.1:9")).unwrap();
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, crate::EditorError::Store(_)));
    }
}
