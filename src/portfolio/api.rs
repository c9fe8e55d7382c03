//! CRUD calls for the portfolio resources.

use std::sync::Arc;

use super::models::{
    NewProject, NewSkill, PersonalInfo, PersonalInfoUpdate, Project, ProjectUpdate, Skill,
};
use crate::client::ApiClient;
use crate::error::ClientResult;

const PERSONAL_INFO_PATH: &str = "/api/personal-info";
const PROJECT_PATH: &str = "/api/project";
const SKILL_PATH: &str = "/api/skill";

/// Typed access to the portfolio endpoints. Every call goes through the
/// authenticated pipeline.
#[derive(Debug, Clone)]
pub struct PortfolioApi {
    client: Arc<ApiClient>,
}

impl PortfolioApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// GET /api/personal-info
    ///
    /// The endpoint returns a list; the profile is its first entry.
    pub async fn personal_info(&self) -> ClientResult<Option<PersonalInfo>> {
        let entries: Option<Vec<PersonalInfo>> = self.client.get_json(PERSONAL_INFO_PATH).await?;
        Ok(entries.and_then(|entries| entries.into_iter().next()))
    }

    /// PATCH /api/personal-info/{id}
    pub async fn update_personal_info(
        &self,
        id: &str,
        update: &PersonalInfoUpdate,
    ) -> ClientResult<PersonalInfo> {
        self.client
            .patch_json(&format!("{}/{}", PERSONAL_INFO_PATH, id), update)
            .await
    }

    /// GET /api/project
    pub async fn projects(&self) -> ClientResult<Vec<Project>> {
        let projects: Option<Vec<Project>> = self.client.get_json(PROJECT_PATH).await?;
        Ok(projects.unwrap_or_default())
    }

    /// POST /api/project
    pub async fn create_project(&self, project: &NewProject) -> ClientResult<Project> {
        self.client.post_json(PROJECT_PATH, project).await
    }

    /// PATCH /api/project/{id}
    pub async fn update_project(&self, id: &str, update: &ProjectUpdate) -> ClientResult<Project> {
        self.client
            .patch_json(&format!("{}/{}", PROJECT_PATH, id), update)
            .await
    }

    /// DELETE /api/project/{id}
    pub async fn delete_project(&self, id: &str) -> ClientResult<()> {
        self.client
            .delete(&format!("{}/{}", PROJECT_PATH, id))
            .await
    }

    /// GET /api/skill
    pub async fn skills(&self) -> ClientResult<Vec<Skill>> {
        let skills: Option<Vec<Skill>> = self.client.get_json(SKILL_PATH).await?;
        Ok(skills.unwrap_or_default())
    }

    /// POST /api/skill
    pub async fn create_skill(&self, skill: &NewSkill) -> ClientResult<Skill> {
        self.client.post_json(SKILL_PATH, skill).await
    }

    /// DELETE /api/skill/{id}
    pub async fn delete_skill(&self, id: &str) -> ClientResult<()> {
        self.client
            .delete(&format!("{}/{}", SKILL_PATH, id))
            .await
    }
}
