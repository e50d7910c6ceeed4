//! Plain-text rendering of API records for the terminal.

use std::fmt::Write;

use folio_core::{truncate_words, Profile, Project, Skill, ThemeMetadata};
use folio_storage::PersistedSelection;

/// Word limit of the project summary line.
pub const SUMMARY_WORDS: usize = 24;

pub fn profile(profile: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", profile.full_name(), profile.pronouns);
    let _ = writeln!(out, "{}", profile.title);
    let _ = writeln!(
        out,
        "{}, {}, {}",
        profile.location.city, profile.location.region, profile.location.country
    );
    if !profile.motto.is_empty() {
        let _ = writeln!(out, "\"{}\"", profile.motto);
    }
    for (channel, info) in &profile.contact {
        let _ = writeln!(out, "  {:<10} {}", channel, info.label);
    }
    out
}

/// One line per skill, grouped under category headers.
pub fn skills(skills: &[Skill]) -> String {
    let mut out = String::new();
    let mut current = None;
    for skill in skills {
        if current != Some(skill.category) {
            let _ = writeln!(out, "{}", skill.category);
            current = Some(skill.category);
        }
        let rating = skill.proficiency.clamp(0, Skill::MAX_PROFICIENCY) as usize;
        let _ = writeln!(
            out,
            "  {:<20} {}{}",
            skill.name,
            "#".repeat(rating),
            ".".repeat(Skill::MAX_PROFICIENCY as usize - rating)
        );
    }
    out
}

pub fn projects(projects: &[Project]) -> String {
    let mut out = String::new();
    for project in projects {
        let _ = writeln!(out, "{:<20} {}", project.project_code, project.title);
    }
    out
}

pub fn project(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", project.title, project.project_code);
    if !project.subtitle.is_empty() {
        let _ = writeln!(out, "{}", project.subtitle);
    }
    if let Some(first) = project.contents.first() {
        let _ = writeln!(out, "{}", truncate_words(first, SUMMARY_WORDS));
    }
    for link in project.links.iter().flatten() {
        let label = link.label.as_deref().unwrap_or(&link.link_type);
        let _ = writeln!(out, "  {}: {}", label, link.path);
    }
    let _ = writeln!(out, "theme: {}", project.display_theme);
    out
}

/// Theme list with the active one marked.
pub fn themes(themes: &[ThemeMetadata], active: &str) -> String {
    let mut out = String::new();
    for theme in themes {
        let marker = if theme.name == active { '*' } else { ' ' };
        let mut variants = Vec::new();
        if theme.has_light_variant {
            variants.push("light");
        }
        if theme.has_dark_variant {
            variants.push("dark");
        }
        let _ = writeln!(
            out,
            "{} {:<12} {}",
            marker,
            theme.display_name,
            variants.join("/")
        );
    }
    out
}

pub fn selection(selection: &PersistedSelection) -> String {
    let current = selection.current();
    let mut out = String::new();
    let _ = writeln!(out, "{}", selection.composite_key());
    let _ = writeln!(out, "name: {}", current.name);
    let _ = writeln!(out, "mode: {}", current.mode);
    match selection.tokens() {
        Some(tokens) => {
            for (token, value) in tokens {
                let _ = writeln!(out, "  {:<16} {}", token, value);
            }
        }
        None => {
            let _ = writeln!(out, "  (theme has no {} variant)", current.mode);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_test_utils::fixtures::{project as fixture_project, sample_profile, sample_skills};

    #[test]
    fn test_profile_lines() {
        let text = profile(&sample_profile());
        assert!(text.starts_with("Robin Vale (they/them)\n"));
        assert!(text.contains("Portland, OR, USA"));
        assert!(text.contains("hello@folio.dev"));
    }

    #[test]
    fn test_skills_grouped_by_category() {
        let mut rows = sample_skills();
        rows.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str()));
        let text = skills(&rows);
        assert!(text.contains("Database\n  PostgreSQL"));
        assert!(text.contains("####."));
    }

    #[test]
    fn test_project_summary_truncated() {
        let mut p = fixture_project(1, "star-map", "galaxy", true);
        p.contents = vec!["word ".repeat(40)];
        let text = project(&p);
        assert!(text.contains("..."));
        assert!(text.contains("Live site: https://star-map.folio.dev"));
    }

    #[test]
    fn test_themes_marks_active() {
        let table = folio_core::ThemeTable::builtin();
        let metadata: Vec<_> = table.iter().map(|e| e.metadata()).collect();
        let text = themes(&metadata, "galaxy");
        assert!(text.lines().any(|l| l.starts_with("* Galaxy")));
        assert!(text.lines().any(|l| l.starts_with("  Cloud")));
    }
}
