//! Portfolio resources: personal info, projects and skills.

pub mod api;
pub mod models;

pub use api::PortfolioApi;
pub use models::{
    NewProject, NewSkill, PersonalInfo, PersonalInfoUpdate, Project, ProjectUpdate, Skill,
    SkillCategory, Technology, TechnologyRef,
};
