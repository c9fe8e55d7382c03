//! Portfolio resource models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Deserialize an id given as either a string or an integer.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Deserialize `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a server timestamp. Unparseable values read as `None`.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The portfolio owner's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// URL of the profile photo
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub years_experience: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_projects: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_technologies: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

impl PersonalInfo {
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

/// Fields of [`PersonalInfo`] to change. Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonalInfoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_projects: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_technologies: Option<u32>,
}

/// Skill grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "WEB_DEVELOPMENT")]
    WebDevelopment,
    #[serde(rename = "MOBILE_DEVELOPMENT")]
    MobileDevelopment,
    #[serde(rename = "Other")]
    Other,
}

impl SkillCategory {
    /// The value used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::WebDevelopment => "WEB_DEVELOPMENT",
            SkillCategory::MobileDevelopment => "MOBILE_DEVELOPMENT",
            SkillCategory::Other => "Other",
        }
    }

    /// Label for display.
    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::WebDevelopment => "Web Development",
            SkillCategory::MobileDevelopment => "Mobile Development",
            SkillCategory::Other => "Other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A skill shown on the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub category: SkillCategory,
}

/// Payload for creating a skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSkill {
    pub name: String,
    pub category: SkillCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A skill attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default)]
    pub skill: Option<Skill>,
}

impl Technology {
    /// Id of the underlying skill, falling back to the link's own id.
    pub fn skill_id(&self) -> &str {
        self.skill
            .as_ref()
            .map(|skill| skill.id.as_str())
            .unwrap_or(&self.id)
    }

    /// Display name, preferring the linked skill's.
    pub fn display_name(&self) -> &str {
        match &self.skill {
            Some(skill) => &skill.name,
            None => &self.name,
        }
    }
}

/// Reference to a skill when creating or editing a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyRef {
    pub skill_id: String,
}

impl TechnologyRef {
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
        }
    }
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// URL of the thumbnail image
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<Technology>,
}

impl Project {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// The project's technologies as skill references.
    pub fn technology_refs(&self) -> Vec<TechnologyRef> {
        self.technologies
            .iter()
            .map(|tech| TechnologyRef::new(tech.skill_id()))
            .collect()
    }
}

/// Payload for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub demo_link: String,
    pub github_link: String,
    pub technologies: Vec<TechnologyRef>,
}

/// Fields of a [`Project`] to change. Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    /// Replaces the full technology list when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<TechnologyRef>>,
}
