// SQLite Activity Repository Implementation
//
// One adapter implementing the three read ports the aggregator needs
// (profiles, applications, job postings), plus the write helpers the
// surrounding platform and the tests use to seed those records.

use crate::offer_repository::map_sqlx_error;
use async_trait::async_trait;
use joblink_core::domain::{
    ApplicationRecord, ApplicationStatus, JobPosting, SeekerProfile, UserId,
};
use joblink_core::error::Result;
use joblink_core::port::{ApplicationStore, JobCatalog, SeekerProfileStore};
use sqlx::SqlitePool;

pub struct SqliteActivityRepository {
    pool: SqlitePool,
}

impl SqliteActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace a seeker profile snapshot
    pub async fn upsert_profile(&self, profile: &SeekerProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO seeker_profiles (user_id, state, skills, completeness, cv_count, plan_expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                state = excluded.state,
                skills = excluded.skills,
                completeness = excluded.completeness,
                cv_count = excluded.cv_count,
                plan_expires_at = excluded.plan_expires_at
            "#,
        )
        .bind(&profile.user_id)
        .bind(&profile.state)
        .bind(&profile.skills)
        .bind(profile.completeness)
        .bind(profile.cv_count)
        .bind(profile.plan_expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    /// Insert an application record, returning its id
    pub async fn insert_application(
        &self,
        seeker_id: &UserId,
        job_id: i64,
        job_title: &str,
        company_name: &str,
        status: ApplicationStatus,
        updated_at: i64,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO applications (seeker_id, job_id, job_title, company_name, status, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(seeker_id)
        .bind(job_id)
        .bind(job_title)
        .bind(company_name)
        .bind(status.to_string())
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a public job posting, returning its id
    pub async fn insert_job(
        &self,
        title: &str,
        company_name: &str,
        state: &str,
        description: &str,
        created_at: i64,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO jobs (title, company_name, state, description, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind(company_name)
        .bind(state)
        .bind(description)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl SeekerProfileStore for SqliteActivityRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<SeekerProfile>> {
        let row: Option<ProfileRow> =
            sqlx::query_as("SELECT * FROM seeker_profiles WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_profile()))
    }
}

#[async_trait]
impl ApplicationStore for SqliteActivityRepository {
    async fn recent_updates(
        &self,
        seeker_id: &UserId,
        since_millis: i64,
    ) -> Result<Vec<ApplicationRecord>> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT * FROM applications
            WHERE seeker_id = ? AND updated_at >= ?
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .bind(seeker_id)
        .bind(since_millis)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }
}

#[async_trait]
impl JobCatalog for SqliteActivityRepository {
    async fn created_since(&self, since_millis: i64) -> Result<Vec<JobPosting>> {
        let rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT * FROM jobs
            WHERE created_at >= ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(since_millis)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_posting()).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    state: Option<String>,
    skills: Option<String>,
    completeness: i32,
    cv_count: i32,
    plan_expires_at: Option<i64>,
}

impl ProfileRow {
    fn into_profile(self) -> SeekerProfile {
        SeekerProfile {
            user_id: self.user_id,
            state: self.state,
            skills: self.skills,
            completeness: self.completeness,
            cv_count: self.cv_count,
            plan_expires_at: self.plan_expires_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: i64,
    seeker_id: String,
    job_id: i64,
    job_title: String,
    company_name: String,
    status: String,
    updated_at: i64,
}

impl ApplicationRow {
    fn into_record(self) -> ApplicationRecord {
        ApplicationRecord {
            id: self.id,
            seeker_id: self.seeker_id,
            job_id: self.job_id,
            job_title: self.job_title,
            company_name: self.company_name,
            status: ApplicationStatus::parse(&self.status).unwrap_or(ApplicationStatus::Pending),
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: i64,
    title: String,
    company_name: String,
    state: String,
    description: String,
    created_at: i64,
}

impl JobRow {
    fn into_posting(self) -> JobPosting {
        JobPosting {
            id: self.id,
            title: self.title,
            company_name: self.company_name,
            state: self.state,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};

    async fn setup() -> SqliteActivityRepository {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteActivityRepository::new(pool)
    }

    #[tokio::test]
    async fn test_profile_upsert_and_find() {
        let repo = setup().await;

        let mut profile = SeekerProfile {
            user_id: "seeker-1".to_string(),
            state: Some("Lagos".to_string()),
            skills: Some("sql, excel".to_string()),
            completeness: 40,
            cv_count: 0,
            plan_expires_at: None,
        };
        repo.upsert_profile(&profile).await.unwrap();

        profile.completeness = 75;
        profile.cv_count = 2;
        repo.upsert_profile(&profile).await.unwrap();

        let found = repo.find(&"seeker-1".to_string()).await.unwrap().unwrap();
        assert_eq!(found.completeness, 75);
        assert_eq!(found.cv_count, 2);
        assert_eq!(found.state.as_deref(), Some("Lagos"));

        assert!(repo.find(&"seeker-2".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent_updates_window() {
        let repo = setup().await;
        let seeker = "seeker-1".to_string();

        repo.insert_application(&seeker, 1, "Accountant", "Zenith", ApplicationStatus::Shortlisted, 5000)
            .await
            .unwrap();
        repo.insert_application(&seeker, 2, "Auditor", "PwC", ApplicationStatus::Rejected, 1000)
            .await
            .unwrap();

        let recent = repo.recent_updates(&seeker, 2000).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].job_id, 1);
        assert_eq!(recent[0].status, ApplicationStatus::Shortlisted);
    }

    #[tokio::test]
    async fn test_created_since() {
        let repo = setup().await;

        repo.insert_job("Driver", "GIG Logistics", "Kano", "Fleet driver", 1000)
            .await
            .unwrap();
        let fresh = repo
            .insert_job("Accountant", "Zenith", "Lagos", "IFRS reporting", 9000)
            .await
            .unwrap();

        let jobs = repo.created_since(5000).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, fresh);
    }
}
