//! Command handlers for the folio CLI.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::auth::{SessionManager, SessionStatus};
use crate::client::ApiClient;
use crate::error::{AuthError, ClientResult};
use crate::portfolio::{PersonalInfo, PortfolioApi, Project, Skill};

use super::args::CliCommand;

/// Execute a session or portfolio command against `client`.
///
/// `Version`, `Help` and `Invalid` are handled by the caller and are no-ops
/// here.
pub async fn run_command(command: CliCommand, client: Arc<ApiClient>) -> ClientResult<()> {
    let session = SessionManager::new(client.clone());
    let portfolio = PortfolioApi::new(client);

    match command {
        CliCommand::Login { email, password } => {
            let user = session.login(&email, &password).await?;
            let name = user
                .get("email")
                .and_then(|value| value.as_str())
                .unwrap_or(&email);
            println!("Signed in as {}", name);
        }
        CliCommand::Logout => session.logout()?,
        CliCommand::Status => match session.check_auth().await? {
            SessionStatus::Authenticated { user } => {
                let who = user
                    .as_ref()
                    .and_then(|u| u.get("email"))
                    .and_then(|value| value.as_str())
                    .unwrap_or("unknown user");
                println!("Signed in as {}", who);
            }
            SessionStatus::Unauthenticated => println!("Not signed in"),
        },
        CliCommand::PersonalInfo => {
            match portfolio.personal_info().await? {
                Some(info) => print!("{}", format_personal_info(&info)),
                None => println!("No personal info yet"),
            }
        }
        CliCommand::Projects => {
            print!("{}", format_projects(&portfolio.projects().await?));
        }
        CliCommand::Skills => {
            print!("{}", format_skills(&portfolio.skills().await?));
        }
        CliCommand::DeleteProject { id } => {
            require_session(&session)?;
            portfolio.delete_project(&id).await?;
            println!("Deleted project {}", id);
        }
        CliCommand::DeleteSkill { id } => {
            require_session(&session)?;
            portfolio.delete_skill(&id).await?;
            println!("Deleted skill {}", id);
        }
        CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_) => {}
    }
    Ok(())
}

fn require_session(session: &SessionManager) -> Result<(), AuthError> {
    if session.client().credentials().has_access_token() {
        Ok(())
    } else {
        Err(AuthError::NotAuthenticated)
    }
}

pub fn format_personal_info(info: &PersonalInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", info.name, info.job_title);
    let _ = writeln!(out, "  email:        {}", info.email);
    let _ = writeln!(out, "  experience:   {} years", info.years_experience);
    let _ = writeln!(out, "  projects:     {}", info.total_projects);
    let _ = writeln!(out, "  technologies: {}", info.total_technologies);
    if !info.bio.is_empty() {
        let _ = writeln!(out, "  bio:          {}", info.bio);
    }
    out
}

pub fn format_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects\n".to_string();
    }
    let mut out = String::new();
    for project in projects {
        let _ = writeln!(out, "{}  {}", project.id, project.title);
        if !project.technologies.is_empty() {
            let names: Vec<&str> = project
                .technologies
                .iter()
                .map(|tech| tech.display_name())
                .collect();
            let _ = writeln!(out, "    {}", names.join(", "));
        }
        if let Some(ref link) = project.demo_link {
            let _ = writeln!(out, "    demo:   {}", link);
        }
        if let Some(ref link) = project.github_link {
            let _ = writeln!(out, "    github: {}", link);
        }
    }
    out
}

pub fn format_skills(skills: &[Skill]) -> String {
    if skills.is_empty() {
        return "No skills\n".to_string();
    }
    let width = skills.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for skill in skills {
        let _ = writeln!(
            out,
            "{}  {:width$}  {}",
            skill.id,
            skill.name,
            skill.category,
            width = width
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse, RecordingNotifier};
    use crate::config::ClientConfig;
    use crate::error::ClientError;
    use crate::portfolio::SkillCategory;
    use serde_json::json;

    fn skill(id: &str, name: &str, category: SkillCategory) -> Skill {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            icon: None,
            category,
        }
    }

    #[test]
    fn test_format_skills_aligns_names() {
        let out = format_skills(&[
            skill("1", "Rust", SkillCategory::Other),
            skill("2", "React Native", SkillCategory::MobileDevelopment),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1  Rust          Other"));
        assert!(lines[1].ends_with("Mobile Development"));
    }

    #[test]
    fn test_format_empty_lists() {
        assert_eq!(format_skills(&[]), "No skills\n");
        assert_eq!(format_projects(&[]), "No projects\n");
    }

    fn anonymous_client(mock: &MockHttpClient) -> Arc<ApiClient> {
        Arc::new(ApiClient::new(
            ClientConfig::new().with_base_url("http://api.test"),
            Arc::new(mock.clone()),
            Arc::new(InMemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        ))
    }

    #[tokio::test]
    async fn test_listing_is_public() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/api/skill",
            MockResponse::json(200, json!({ "status": true, "data": [] })),
        );

        run_command(CliCommand::Skills, anonymous_client(&mock))
            .await
            .unwrap();

        assert_eq!(mock.authorizations_to("http://api.test/api/skill"), vec![None]);
    }

    #[tokio::test]
    async fn test_delete_without_session_fails_fast() {
        let mock = MockHttpClient::new();

        let err = run_command(
            CliCommand::DeleteSkill {
                id: "7".to_string(),
            },
            anonymous_client(&mock),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ClientError::Auth(AuthError::NotAuthenticated)));
        assert!(mock.get_requests().is_empty());
    }
}
