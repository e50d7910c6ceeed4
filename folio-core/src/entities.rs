//! Portfolio records: profile, skills and projects.
//!
//! Field names serialize as camelCase, the shape the site has always
//! consumed. Structured columns (location, services, links, ...) are stored
//! as jsonb and decoded into the nested types below.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{RecordId, Timestamp};

// ============================================================================
// PROFILE
// ============================================================================

/// Postal location shown on the profile card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Location {
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

/// One offered service with its description paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceItem {
    pub title: String,
    pub description: Vec<String>,
}

/// One principle of the ethos section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EthosItem {
    pub title: String,
    pub tagline: String,
    pub description: String,
}

/// Contact channel (email, phone, social link, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactInfo {
    pub link: String,
    pub label: String,
}

/// Intro paragraph followed by a list of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Section<T> {
    pub intro: String,
    pub content: Vec<T>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            intro: String::new(),
            content: Vec::new(),
        }
    }
}

/// The single profile row backing the site header and about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub pronouns: String,
    pub motto: String,
    pub location: Location,
    pub bio: Vec<String>,
    pub services: Section<ServiceItem>,
    pub ethos: Section<EthosItem>,
    /// Keyed by channel name (`email`, `phone`, ...).
    pub contact: BTreeMap<String, ContactInfo>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl Profile {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Look up a contact channel by key.
    pub fn contact_for(&self, channel: &str) -> Option<&ContactInfo> {
        self.contact.get(channel)
    }
}

// ============================================================================
// SKILLS
// ============================================================================

/// Skill grouping used for ordering and section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Tools,
    Languages,
    Other,
}

impl SkillCategory {
    /// All categories in declaration order.
    pub const ALL: [SkillCategory; 6] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Database,
        SkillCategory::Tools,
        SkillCategory::Languages,
        SkillCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Database => "Database",
            SkillCategory::Tools => "Tools",
            SkillCategory::Languages => "Languages",
            SkillCategory::Other => "Other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown skill category: {}", s))
    }
}

/// A skill with a 1-5 proficiency rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: RecordId,
    pub name: String,
    pub icon: String,
    pub proficiency: i32,
    pub category: SkillCategory,
    pub is_active: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl Skill {
    pub const MIN_PROFICIENCY: i32 = 1;
    pub const MAX_PROFICIENCY: i32 = 5;

    /// Whether the proficiency rating is inside the 1-5 scale.
    pub fn has_valid_proficiency(&self) -> bool {
        (Self::MIN_PROFICIENCY..=Self::MAX_PROFICIENCY).contains(&self.proficiency)
    }
}

// ============================================================================
// PROJECTS
// ============================================================================

/// Background and title-card images of a project page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectPhotos {
    pub background: String,
    pub titlecard: String,
}

/// Skill icons displayed on a project card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectSkills {
    pub icons: Vec<String>,
}

/// External or internal link attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectLink {
    #[serde(rename = "type")]
    pub link_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A gallery project, addressable by its unique `project_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub project_code: String,
    pub category: String,
    pub title: String,
    pub subtitle: String,
    /// Markdown paragraphs, rendered by the presentation layer.
    pub contents: Vec<String>,
    pub is_active: bool,
    /// Theme name the project page switches to.
    pub display_theme: String,
    pub photos: ProjectPhotos,
    pub skills: ProjectSkills,
    pub links: Option<Vec<ProjectLink>>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

// ============================================================================
// SEED DOCUMENT
// ============================================================================

/// Everything needed to populate an empty database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    pub profile: Profile,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_profile() -> Profile {
        let mut contact = BTreeMap::new();
        contact.insert(
            "email".to_string(),
            ContactInfo {
                link: "mailto:ada@example.com".to_string(),
                label: "ada@example.com".to_string(),
            },
        );
        Profile {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            title: "Engineer".to_string(),
            pronouns: "she/her".to_string(),
            motto: "Build things".to_string(),
            location: Location {
                city: "London".to_string(),
                region: "Greater London".to_string(),
                postal_code: "N1".to_string(),
                country: "UK".to_string(),
            },
            bio: vec!["First paragraph".to_string()],
            services: Section::default(),
            ethos: Section::default(),
            contact,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_profile().full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_profile_serializes_camel_case() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(sample_profile())?;
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["location"]["postal_code"], "N1");
        assert_eq!(json["contact"]["email"]["label"], "ada@example.com");
        assert!(json.get("first_name").is_none());
        Ok(())
    }

    #[test]
    fn test_contact_lookup() {
        let profile = sample_profile();
        assert!(profile.contact_for("email").is_some());
        assert!(profile.contact_for("fax").is_none());
    }

    #[test]
    fn test_skill_category_parse() {
        assert_eq!("Backend".parse::<SkillCategory>(), Ok(SkillCategory::Backend));
        assert!("backend".parse::<SkillCategory>().is_err());
        for category in SkillCategory::ALL {
            assert_eq!(category.to_string().parse::<SkillCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_skill_proficiency_bounds() {
        let mut skill = Skill {
            id: 1,
            name: "Rust".to_string(),
            icon: "mdi-language-rust".to_string(),
            proficiency: 5,
            category: SkillCategory::Languages,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(skill.has_valid_proficiency());
        skill.proficiency = 0;
        assert!(!skill.has_valid_proficiency());
        skill.proficiency = 6;
        assert!(!skill.has_valid_proficiency());
    }

    #[test]
    fn test_project_link_type_field() -> Result<(), serde_json::Error> {
        let link: ProjectLink =
            serde_json::from_str(r#"{"type":"github","path":"https://github.com/x/y"}"#)?;
        assert_eq!(link.link_type, "github");
        assert_eq!(link.label, None);

        let json = serde_json::to_value(&link)?;
        assert_eq!(json["type"], "github");
        assert!(json.get("label").is_none());
        Ok(())
    }
}
