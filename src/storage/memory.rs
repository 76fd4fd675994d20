use crate::model::{Form, Response, StorageError};
use crate::storage::{FeedbackWriter, FormRepository, ResponseRepository};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collections {
    forms: Vec<Form>,
    responses: Vec<Response>,
}

/// Process-local store for tests and the offline demo. Never fails.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn response_count(&self) -> usize {
        self.inner.read().await.responses.len()
    }
}

#[async_trait]
impl FormRepository for InMemoryStore {
    async fn get_form_by_id(&self, id: &str) -> Result<Option<Form>, StorageError> {
        let data = self.inner.read().await;
        Ok(data.forms.iter().find(|f| f.id == id).cloned())
    }

    async fn list_forms(&self, user_id: Option<&str>) -> Result<Vec<Form>, StorageError> {
        let data = self.inner.read().await;
        let mut forms: Vec<Form> = data
            .forms
            .iter()
            .filter(|f| user_id.is_none_or(|u| f.user_id == u))
            .cloned()
            .collect();
        forms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(forms)
    }
}

#[async_trait]
impl ResponseRepository for InMemoryStore {
    async fn get_responses(&self, form_id: &str) -> Result<Vec<Response>, StorageError> {
        let data = self.inner.read().await;
        Ok(data
            .responses
            .iter()
            .filter(|r| r.form_id == form_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FeedbackWriter for InMemoryStore {
    async fn insert_form(&self, mut form: Form) -> Result<(), StorageError> {
        form.sort_fields();
        let mut data = self.inner.write().await;
        match data.forms.iter_mut().find(|f| f.id == form.id) {
            Some(existing) => *existing = form,
            None => data.forms.push(form),
        }
        Ok(())
    }

    async fn insert_response(&self, response: Response) -> Result<(), StorageError> {
        let mut data = self.inner.write().await;
        match data.responses.iter_mut().find(|r| r.id == response.id) {
            Some(existing) => *existing = response,
            None => data.responses.push(response),
        }
        Ok(())
    }

    async fn delete_form(&self, id: &str) -> Result<bool, StorageError> {
        let mut data = self.inner.write().await;
        let before = data.forms.len();
        data.forms.retain(|f| f.id != id);
        if data.forms.len() == before {
            return Ok(false);
        }
        data.responses.retain(|r| r.form_id != id);
        Ok(true)
    }
}
