use crate::client::{ApiResult, ScriptsApi};
use crate::error::ApiError;
use crate::model::{
    ListQuery, PaginatedScriptsResponse, PaginationInfo, ScriptFormData, ScriptLine, ScriptSnip,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory stand-in for the scripts API.
///
/// "Random" is deterministic: scripts come back in insertion order, skipping
/// excluded ids. Every call is recorded as a short string for assertions.
#[derive(Default)]
pub struct FakeApi {
    scripts: Mutex<Vec<ScriptSnip>>,
    calls: Mutex<Vec<String>>,
    next_id: Mutex<u32>,
    fail_with: Mutex<Option<String>>,
}

pub fn script(id: &str, title: &str) -> ScriptSnip {
    ScriptSnip {
        id: id.to_string(),
        title: Some(title.to_string()),
        characters: vec!["ALICE".into(), "BOB".into()],
        lines: vec![
            ScriptLine::new("ALICE", "Did you hear that?"),
            ScriptLine::new("BOB", "Hear what?"),
        ],
        created_at: "2024-03-01T10:00:00.000Z".into(),
        updated_at: "2024-03-01T10:00:00.000Z".into(),
    }
}

impl FakeApi {
    pub fn with_scripts(scripts: Vec<ScriptSnip>) -> Self {
        let api = Self::default();
        *api.scripts.lock().unwrap() = scripts;
        api
    }

    /// Make every following call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.scripts
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(ApiError::new(message.clone())),
            None => Ok(()),
        }
    }

    pub fn find(&self, id: &str) -> ApiResult<ScriptSnip> {
        self.scripts
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::new("Script not found"))
    }
}

#[async_trait]
impl ScriptsApi for FakeApi {
    async fn list_scripts(&self, query: &ListQuery) -> ApiResult<PaginatedScriptsResponse> {
        self.record(format!("list page={} limit={}", query.page, query.limit))?;
        let all: Vec<ScriptSnip> = self
            .scripts
            .lock()
            .unwrap()
            .iter()
            .filter(|s| match &query.search {
                Some(term) => s.title.as_deref().unwrap_or("").contains(term.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        let limit = query.limit.max(1) as usize;
        let start = (query.page.saturating_sub(1) as usize) * limit;
        let data: Vec<ScriptSnip> = all.iter().skip(start).take(limit).cloned().collect();
        Ok(PaginatedScriptsResponse {
            data,
            pagination: PaginationInfo {
                total_scripts: all.len() as u64,
                current_page: query.page,
                total_pages: all.len().div_ceil(limit) as u32,
                limit: query.limit,
                sort_by: query.sort_by,
                sort_order: query.sort_order,
            },
        })
    }

    async fn get_script(&self, id: &str) -> ApiResult<ScriptSnip> {
        self.record(format!("get {}", id))?;
        self.find(id)
    }

    async fn get_random_script(&self) -> ApiResult<ScriptSnip> {
        self.record("random".to_string())?;
        self.scripts
            .lock()
            .unwrap()
            .first()
            .cloned()
            .ok_or_else(|| ApiError::new("No scripts available"))
    }

    async fn get_random_scripts(
        &self,
        count: u32,
        exclude_ids: &[String],
    ) -> ApiResult<Vec<ScriptSnip>> {
        self.record(format!("random-multiple {} [{}]", count, exclude_ids.join(",")))?;
        Ok(self
            .scripts
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !exclude_ids.contains(&s.id))
            .take(count as usize)
            .cloned()
            .collect())
    }

    async fn get_scripts_by_ids(&self, ids: &[String]) -> ApiResult<Vec<ScriptSnip>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.record(format!("batch [{}]", ids.join(",")))?;
        // Server order, not request order.
        Ok(self
            .scripts
            .lock()
            .unwrap()
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn create_script(&self, form: &ScriptFormData) -> ApiResult<ScriptSnip> {
        self.record("create".to_string())?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = ScriptSnip {
            id: format!("new-{}", *next_id),
            title: form.title.clone(),
            characters: form.characters.clone(),
            lines: form.lines.clone(),
            created_at: "2024-04-01T00:00:00.000Z".into(),
            updated_at: "2024-04-01T00:00:00.000Z".into(),
        };
        self.scripts.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_script(&self, id: &str, form: &ScriptFormData) -> ApiResult<ScriptSnip> {
        self.record(format!("update {}", id))?;
        let mut scripts = self.scripts.lock().unwrap();
        let existing = scripts
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ApiError::new("Script not found"))?;
        existing.title = form.title.clone();
        existing.characters = form.characters.clone();
        existing.lines = form.lines.clone();
        existing.updated_at = "2024-04-02T00:00:00.000Z".into();
        Ok(existing.clone())
    }

    async fn delete_script(&self, id: &str) -> ApiResult<()> {
        self.record(format!("delete {}", id))?;
        let mut scripts = self.scripts.lock().unwrap();
        let before = scripts.len();
        scripts.retain(|s| s.id != id);
        if scripts.len() == before {
            return Err(ApiError::new("Script not found"));
        }
        Ok(())
    }
}
