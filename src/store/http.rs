use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ErrorResponse;
use crate::models::{
    Ack, ObservationDraft, Project, ProjectDraft, ProjectPatch, ProjectRecord, ProjectRequest,
    RequestMethod, Visit, VisitDraft, VisitPatch, VisitRecord, VisitRequest,
};
use crate::store::{ProjectStore, StoreError, StoreResult, VisitStore};

const PROJECTS_PATH: &str = "/api/projects";
const VISITS_PATH: &str = "/api/visits";

/// Store client speaking the JSON envelope protocol over HTTP
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<B, T>(&self, path: &str, body: &B) -> StoreResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response: Response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.message(),
                Err(_) => format!("HTTP {}", status),
            };
            return Err(StoreError::Rejected(message));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn acknowledge<B: Serialize + Sync>(&self, path: &str, body: &B) -> StoreResult<Ack> {
        let ack: Ack = self.send(path, body).await?;
        if !ack.success {
            return Err(StoreError::Rejected("Request was not acknowledged".to_string()));
        }
        Ok(ack)
    }

    async fn created<B: Serialize + Sync>(&self, path: &str, body: &B) -> StoreResult<Uuid> {
        self.acknowledge(path, body)
            .await?
            .id
            .ok_or_else(|| StoreError::Decode("acknowledgement without id".to_string()))
    }
}

fn encode<T: Serialize>(data: &T) -> StoreResult<serde_json::Value> {
    serde_json::to_value(data).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl ProjectStore for HttpStore {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let records: Vec<ProjectRecord> = self
            .send(PROJECTS_PATH, &ProjectRequest::new(RequestMethod::GetAll))
            .await?;

        records
            .into_iter()
            .map(|record| {
                let id = record.id;
                Project::try_from(record)
                    .map_err(|e| StoreError::Decode(format!("project {}: {}", id, e)))
            })
            .collect()
    }

    async fn create_project(&self, draft: &ProjectDraft) -> StoreResult<Uuid> {
        let request = ProjectRequest::new(RequestMethod::Create).with_data(encode(draft)?);
        self.created(PROJECTS_PATH, &request).await
    }

    async fn update_project(&self, id: Uuid, patch: &ProjectPatch) -> StoreResult<()> {
        let request = ProjectRequest::new(RequestMethod::Update)
            .with_id(id)
            .with_data(encode(patch)?);
        self.acknowledge(PROJECTS_PATH, &request).await?;
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<()> {
        let request = ProjectRequest::new(RequestMethod::Delete).with_id(id);
        self.acknowledge(PROJECTS_PATH, &request).await?;
        Ok(())
    }

    async fn append_observation(&self, id: Uuid, draft: &ObservationDraft) -> StoreResult<Uuid> {
        let request = ProjectRequest::new(RequestMethod::AddObservation)
            .with_id(id)
            .with_data(encode(draft)?);
        self.created(PROJECTS_PATH, &request).await
    }
}

#[async_trait]
impl VisitStore for HttpStore {
    async fn list_visits(&self) -> StoreResult<Vec<Visit>> {
        let records: Vec<VisitRecord> = self
            .send(VISITS_PATH, &VisitRequest::new(RequestMethod::GetAll))
            .await?;

        records
            .into_iter()
            .map(|record| {
                let id = record.id;
                Visit::try_from(record)
                    .map_err(|e| StoreError::Decode(format!("visit {}: {}", id, e)))
            })
            .collect()
    }

    async fn create_visit(&self, draft: &VisitDraft) -> StoreResult<Uuid> {
        let request = VisitRequest::new(RequestMethod::Create).with_data(encode(draft)?);
        self.created(VISITS_PATH, &request).await
    }

    async fn update_visit(&self, id: Uuid, patch: &VisitPatch) -> StoreResult<()> {
        let request = VisitRequest::new(RequestMethod::Update)
            .with_id(id)
            .with_data(encode(patch)?);
        self.acknowledge(VISITS_PATH, &request).await?;
        Ok(())
    }

    async fn delete_visit(&self, id: Uuid) -> StoreResult<()> {
        let request = VisitRequest::new(RequestMethod::Delete).with_id(id);
        self.acknowledge(VISITS_PATH, &request).await?;
        Ok(())
    }
}
