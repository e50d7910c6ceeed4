//! Folio Test Utilities
//!
//! Shared test infrastructure for the folio workspace:
//! - Proptest generators for content records and theme inputs
//! - Fixtures for a small but complete portfolio
//! - Mock fetchers for the single-flight cache

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

pub use folio_core::{
    ContactInfo, EthosItem, FetchError, Location, Profile, Project, ProjectLink, ProjectPhotos,
    ProjectSkills, Section, SeedData, ServiceItem, Skill, SkillCategory, ThemeEntry, ThemeMode,
    ThemeSelection, ThemeTable, Timestamp, TokenMap,
};
pub use folio_storage::{FetchResult, InMemoryStore, KeyValueStore, ValueFetcher};

// ============================================================================
// MOCK FETCHERS
// ============================================================================

/// Fetcher that replays a script of outcomes and counts calls.
///
/// Once the script runs out the last outcome repeats.
#[derive(Debug)]
pub struct MockFetcher<T> {
    outcomes: Mutex<VecDeque<FetchResult<T>>>,
    last: Mutex<Option<FetchResult<T>>>,
    calls: AtomicUsize,
}

impl<T: Clone> MockFetcher<T> {
    pub fn new(outcomes: impl IntoIterator<Item = FetchResult<T>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always succeeds with `value`.
    pub fn always(value: T) -> Self {
        Self::new([Ok(value)])
    }

    /// Always fails with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self::new([Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl<T> ValueFetcher<T> for MockFetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch(&self) -> FetchResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match next {
            Some(outcome) => {
                *last = Some(outcome.clone());
                outcome
            }
            None => last.clone().unwrap_or(Err(FetchError::Transport {
                reason: "mock fetcher has no outcomes".to_string(),
            })),
        }
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        // 2020-01-01 .. 2030-01-01
        (1_577_836_800i64..1_893_456_000i64)
            .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now))
    }

    pub fn arb_theme_mode() -> impl Strategy<Value = ThemeMode> {
        prop_oneof![Just(ThemeMode::Light), Just(ThemeMode::Dark)]
    }

    /// A name from the builtin table.
    pub fn arb_builtin_theme_name() -> impl Strategy<Value = String> {
        let names = ThemeTable::builtin().names();
        proptest::sample::select(names)
    }

    /// Lowercase names that never collide with a builtin theme.
    pub fn arb_unknown_theme_name() -> impl Strategy<Value = String> {
        let builtin = ThemeTable::builtin();
        "[a-z]{1,12}".prop_filter("must not be a builtin theme", move |name| {
            !builtin.contains(name)
        })
    }

    /// Mode strings that fail to parse as light or dark.
    pub fn arb_invalid_mode() -> impl Strategy<Value = String> {
        "[a-zA-Z]{0,10}".prop_filter("must not be light or dark", |mode| {
            mode.parse::<ThemeMode>().is_err()
        })
    }

    pub fn arb_skill_category() -> impl Strategy<Value = SkillCategory> {
        proptest::sample::select(SkillCategory::ALL.to_vec())
    }

    pub fn arb_skill() -> impl Strategy<Value = Skill> {
        (
            1..10_000i32,
            "[A-Za-z][A-Za-z0-9+#.]{0,15}",
            Skill::MIN_PROFICIENCY..=Skill::MAX_PROFICIENCY,
            arb_skill_category(),
            any::<bool>(),
            arb_timestamp(),
        )
            .prop_map(|(id, name, proficiency, category, is_active, created_at)| Skill {
                id,
                icon: format!("devicon-{}-plain", name.to_lowercase()),
                name,
                proficiency,
                category,
                is_active,
                created_at,
                updated_at: created_at,
            })
    }

    pub fn arb_project() -> impl Strategy<Value = Project> {
        (
            1..10_000i32,
            "[a-z][a-z0-9-]{2,20}",
            "[A-Z][a-z ]{2,30}",
            proptest::collection::vec("[A-Za-z ,.]{1,80}", 0..4),
            any::<bool>(),
            arb_builtin_theme_name(),
            arb_timestamp(),
        )
            .prop_map(
                |(id, project_code, title, contents, is_active, display_theme, created_at)| {
                    Project {
                        id,
                        photos: ProjectPhotos {
                            background: format!("/img/{}/bg.webp", project_code),
                            titlecard: format!("/img/{}/title.webp", project_code),
                        },
                        project_code,
                        category: "web".to_string(),
                        subtitle: String::new(),
                        title,
                        contents,
                        is_active,
                        display_theme,
                        skills: ProjectSkills::default(),
                        links: None,
                        created_at,
                        updated_at: created_at,
                    }
                },
            )
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    pub fn fixed_timestamp() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    pub fn sample_profile() -> Profile {
        let mut contact = BTreeMap::new();
        contact.insert(
            "email".to_string(),
            ContactInfo {
                link: "mailto:hello@folio.dev".to_string(),
                label: "hello@folio.dev".to_string(),
            },
        );
        contact.insert(
            "github".to_string(),
            ContactInfo {
                link: "https://github.com/folio-site".to_string(),
                label: "folio-site".to_string(),
            },
        );

        Profile {
            id: 1,
            first_name: "Robin".to_string(),
            last_name: "Vale".to_string(),
            title: "Full-stack developer".to_string(),
            pronouns: "they/them".to_string(),
            motto: "Small tools, sharp edges.".to_string(),
            location: Location {
                city: "Portland".to_string(),
                region: "OR".to_string(),
                postal_code: "97201".to_string(),
                country: "USA".to_string(),
            },
            bio: vec![
                "Builds web applications end to end.".to_string(),
                "Prefers boring infrastructure and expressive interfaces.".to_string(),
            ],
            services: Section {
                intro: "What I can help with".to_string(),
                content: vec![ServiceItem {
                    title: "Web development".to_string(),
                    description: vec!["Single-page apps and their APIs.".to_string()],
                }],
            },
            ethos: Section {
                intro: "How I work".to_string(),
                content: vec![EthosItem {
                    title: "Clarity".to_string(),
                    tagline: "Say what it does".to_string(),
                    description: "Code and prose should be read once.".to_string(),
                }],
            },
            contact,
            created_at: fixed_timestamp(),
            updated_at: fixed_timestamp(),
        }
    }

    pub fn skill(id: i32, name: &str, category: SkillCategory, proficiency: i32) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            icon: format!("devicon-{}-plain", name.to_lowercase()),
            proficiency,
            category,
            is_active: true,
            created_at: fixed_timestamp(),
            updated_at: fixed_timestamp(),
        }
    }

    pub fn sample_skills() -> Vec<Skill> {
        vec![
            skill(1, "Rust", SkillCategory::Languages, 4),
            skill(2, "Vue", SkillCategory::Frontend, 5),
            skill(3, "PostgreSQL", SkillCategory::Database, 4),
            skill(4, "Docker", SkillCategory::Tools, 3),
        ]
    }

    pub fn project(id: i32, code: &str, display_theme: &str, is_active: bool) -> Project {
        Project {
            id,
            project_code: code.to_string(),
            category: "web".to_string(),
            title: code.replace('-', " "),
            subtitle: "A portfolio piece".to_string(),
            contents: vec!["First paragraph.".to_string(), "Second paragraph.".to_string()],
            is_active,
            display_theme: display_theme.to_string(),
            photos: ProjectPhotos {
                background: format!("/img/{}/bg.webp", code),
                titlecard: format!("/img/{}/title.webp", code),
            },
            skills: ProjectSkills {
                icons: vec!["devicon-rust-plain".to_string()],
            },
            links: Some(vec![ProjectLink {
                link_type: "external".to_string(),
                label: Some("Live site".to_string()),
                path: format!("https://{}.folio.dev", code),
                icon: None,
            }]),
            created_at: fixed_timestamp(),
            updated_at: fixed_timestamp(),
        }
    }

    pub fn sample_projects() -> Vec<Project> {
        vec![
            project(1, "star-map", "galaxy", true),
            project(2, "tide-log", "ocean", true),
            project(3, "old-blog", "cloud", false),
        ]
    }

    pub fn sample_seed() -> SeedData {
        SeedData {
            profile: sample_profile(),
            skills: sample_skills(),
            projects: sample_projects(),
        }
    }

    /// Two-theme table; "ink" has no light variant.
    pub fn small_theme_table() -> ThemeTable {
        let tokens = |background: &str| -> TokenMap {
            let mut map = TokenMap::new();
            map.insert("background".to_string(), background.to_string());
            map
        };
        let entries = vec![
            ThemeEntry {
                name: "paper".to_string(),
                icon: "mdi-file".to_string(),
                light: Some(tokens("#ffffff")),
                dark: Some(tokens("#222222")),
            },
            ThemeEntry {
                name: "ink".to_string(),
                icon: "mdi-pen".to_string(),
                light: None,
                dark: Some(tokens("#000000")),
            },
        ];
        ThemeTable::from_entries(entries).unwrap_or_else(|_| ThemeTable::builtin())
    }

    /// In-memory store pre-filled with a stored selection.
    pub fn store_with_selection(label: &str, name: &str, mode: &str) -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::with_entries(
            label,
            [
                (folio_storage::THEME_NAME_KEY, name),
                (folio_storage::THEME_MODE_KEY, mode),
            ],
        ))
    }

    pub fn seed_json() -> String {
        serde_json::to_string_pretty(&sample_seed()).unwrap_or_default()
    }
}
