// SQLite OfferRepository Implementation

use crate::SqliteOfferTransaction;
use async_trait::async_trait;
use joblink_core::domain::{OfferId, OfferStatus, OfferTerms, PrivateOffer, UserId};
use joblink_core::error::{AppError, Result};
use joblink_core::port::{
    OfferRepository, OfferStoreTransaction, TransactionalOfferStore,
};
use sqlx::SqlitePool;

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extract database-specific error code and message
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => AppError::Database(format!(
                        "Unique constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "787" | "3850" => AppError::Database(format!(
                        "Foreign key constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "5" => AppError::Database(format!(
                        "Database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    "13" => AppError::Database(format!("Database full: {}", db_err.message())),
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => AppError::Database(err.to_string()),
    }
}

pub(crate) fn parse_status(s: &str) -> OfferStatus {
    match s {
        "PENDING" => OfferStatus::Pending,
        "VIEWED" => OfferStatus::Viewed,
        "ACCEPTED" => OfferStatus::Accepted,
        "REJECTED" => OfferStatus::Rejected,
        "EXPIRED" => OfferStatus::Expired,
        // Unknown rows surface as expired rather than open
        _ => OfferStatus::Expired,
    }
}

pub struct SqliteOfferRepository {
    pool: SqlitePool,
}

impl SqliteOfferRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(crate) const INSERT_OFFER_SQL: &str = r#"
    INSERT INTO offers (
        id, employer_id, seeker_id,
        job_title, description, job_type, category,
        location_type, city, state,
        salary_min, salary_max, salary_period,
        experience_level, education_level, skills, benefits,
        start_date, personal_message,
        status, created_at, viewed_at, responded_at, response_message, deadline
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Bind every offer column in INSERT_OFFER_SQL order.
macro_rules! bind_offer {
    ($query:expr, $offer:expr) => {
        $query
            .bind(&$offer.id)
            .bind(&$offer.employer_id)
            .bind(&$offer.seeker_id)
            .bind(&$offer.terms.job_title)
            .bind(&$offer.terms.description)
            .bind(&$offer.terms.job_type)
            .bind(&$offer.terms.category)
            .bind(&$offer.terms.location_type)
            .bind(&$offer.terms.city)
            .bind(&$offer.terms.state)
            .bind($offer.terms.salary_min)
            .bind($offer.terms.salary_max)
            .bind(&$offer.terms.salary_period)
            .bind(&$offer.terms.experience_level)
            .bind(&$offer.terms.education_level)
            .bind(&$offer.terms.skills)
            .bind(&$offer.terms.benefits)
            .bind(&$offer.terms.start_date)
            .bind(&$offer.terms.personal_message)
            .bind($offer.status.to_string())
            .bind($offer.created_at)
            .bind($offer.viewed_at)
            .bind($offer.responded_at)
            .bind(&$offer.response_message)
            .bind($offer.deadline)
    };
}

pub(crate) use bind_offer;

#[async_trait]
impl OfferRepository for SqliteOfferRepository {
    async fn insert(&self, offer: &PrivateOffer) -> Result<()> {
        bind_offer!(sqlx::query(INSERT_OFFER_SQL), offer)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &OfferId) -> Result<Option<PrivateOffer>> {
        let row = sqlx::query_as::<_, OfferRow>("SELECT * FROM offers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_offer()))
    }

    async fn find_for_seeker(&self, seeker_id: &UserId) -> Result<Vec<PrivateOffer>> {
        let rows: Vec<OfferRow> = sqlx::query_as(
            "SELECT * FROM offers WHERE seeker_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(seeker_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_offer()).collect())
    }

    async fn find_for_employer(&self, employer_id: &UserId) -> Result<Vec<PrivateOffer>> {
        let rows: Vec<OfferRow> = sqlx::query_as(
            "SELECT * FROM offers WHERE employer_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_offer()).collect())
    }

    async fn mark_viewed(&self, id: &OfferId, viewed_at: i64) -> Result<bool> {
        // Conditional update: the PENDING guard doubles as the optimistic
        // concurrency check, so a racing view cannot reset viewed_at
        let result = sqlx::query(
            r#"
            UPDATE offers
            SET status = 'VIEWED', viewed_at = ?
            WHERE id = ? AND status = 'PENDING'
            "#,
        )
        .bind(viewed_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_response(
        &self,
        id: &OfferId,
        status: OfferStatus,
        responded_at: i64,
        message: &str,
    ) -> Result<bool> {
        if !status.is_terminal() {
            return Err(AppError::Internal(format!(
                "record_response called with non-terminal status {}",
                status
            )));
        }

        // Guard on open state AND deadline: a respond racing the deadline
        // must lose even when the caller's pre-check passed
        let result = sqlx::query(
            r#"
            UPDATE offers
            SET status = ?, responded_at = ?, response_message = ?
            WHERE id = ?
              AND status IN ('PENDING', 'VIEWED')
              AND deadline >= ?
            "#,
        )
        .bind(status.to_string())
        .bind(responded_at)
        .bind(message)
        .bind(id)
        .bind(responded_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_lapsed(&self, now_millis: i64) -> Result<Vec<PrivateOffer>> {
        let rows: Vec<OfferRow> = sqlx::query_as(
            r#"
            SELECT * FROM offers
            WHERE status IN ('PENDING', 'VIEWED') AND deadline < ?
            ORDER BY deadline ASC
            "#,
        )
        .bind(now_millis)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_offer()).collect())
    }

    async fn count_by_status(&self, status: OfferStatus) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM offers WHERE status = ?")
            .bind(status.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }
}

#[async_trait]
impl TransactionalOfferStore for SqliteOfferRepository {
    async fn begin_transaction(&self) -> Result<Box<dyn OfferStoreTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteOfferTransaction::new(tx)))
    }
}

/// SQLite row representation of an offer
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OfferRow {
    id: String,
    employer_id: String,
    seeker_id: String,

    job_title: String,
    description: String,
    job_type: String,
    category: String,
    location_type: String,
    city: String,
    state: String,
    salary_min: Option<i64>,
    salary_max: Option<i64>,
    salary_period: Option<String>,
    experience_level: Option<String>,
    education_level: Option<String>,
    skills: String,
    benefits: Option<String>,
    start_date: Option<String>,
    personal_message: Option<String>,

    status: String,
    created_at: i64,
    viewed_at: Option<i64>,
    responded_at: Option<i64>,
    response_message: Option<String>,
    deadline: i64,
}

impl OfferRow {
    pub(crate) fn into_offer(self) -> PrivateOffer {
        PrivateOffer {
            id: self.id,
            employer_id: self.employer_id,
            seeker_id: self.seeker_id,
            terms: OfferTerms {
                job_title: self.job_title,
                description: self.description,
                job_type: self.job_type,
                category: self.category,
                location_type: self.location_type,
                city: self.city,
                state: self.state,
                salary_min: self.salary_min,
                salary_max: self.salary_max,
                salary_period: self.salary_period,
                experience_level: self.experience_level,
                education_level: self.education_level,
                skills: self.skills,
                benefits: self.benefits,
                start_date: self.start_date,
                personal_message: self.personal_message,
            },
            status: parse_status(&self.status),
            created_at: self.created_at,
            viewed_at: self.viewed_at,
            responded_at: self.responded_at,
            response_message: self.response_message,
            deadline: self.deadline,
        }
    }
}
