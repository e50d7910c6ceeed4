//! End-to-end smoke tests against a live PostgreSQL.
//!
//! Enabled with `--features db-tests`; connection settings come from the
//! `FOLIO_DB_*` variables.

use folio_api::{ApiResult, DbClient, DbConfig};

#[allow(dead_code)]
fn test_db() -> ApiResult<DbClient> {
    DbClient::from_config(&DbConfig::from_env())
}

#[tokio::test]
#[cfg(feature = "db-tests")]
async fn smoke_test_seed_then_read() -> ApiResult<()> {
    use folio_test_utils::fixtures::sample_seed;

    let db = test_db()?;
    db.reset().await?;
    db.migrate().await?;

    let seed = sample_seed();
    let summary = db.seed(&seed).await?;
    assert_eq!(summary.skills, seed.skills.len());
    assert_eq!(summary.projects, seed.projects.len());

    let profile = db.profile_get().await?.expect("profile seeded");
    assert_eq!(profile.full_name(), seed.profile.full_name());

    let skills = db.skills_list_active().await?;
    assert!(skills.iter().all(|s| s.is_active));
    let categories: Vec<_> = skills.iter().map(|s| s.category).collect();
    let mut sorted = categories.clone();
    sorted.sort_by_key(|c| c.as_str());
    assert_eq!(categories, sorted);

    let projects = db.projects_list_active().await?;
    assert!(projects.iter().all(|p| p.is_active));
    assert!(projects.iter().all(|p| p.project_code != "old-blog"));

    let inactive = db.project_get_by_code("old-blog").await?;
    assert!(inactive.is_some_and(|p| !p.is_active));
    assert!(db.project_get_by_code("missing").await?.is_none());
    Ok(())
}

#[tokio::test]
#[cfg(feature = "db-tests")]
async fn smoke_test_seed_rejects_bad_proficiency() -> ApiResult<()> {
    use folio_test_utils::fixtures::sample_seed;

    let db = test_db()?;
    db.reset().await?;
    db.migrate().await?;

    let mut seed = sample_seed();
    seed.skills[0].proficiency = 9;
    let err = db.seed(&seed).await.expect_err("proficiency 9 is out of range");
    assert_eq!(err.code, folio_api::ErrorCode::InvalidInput);
    assert!(db.profile_get().await?.is_none());
    Ok(())
}
