// SQLite NotificationRepository Implementation

use crate::offer_repository::map_sqlx_error;
use async_trait::async_trait;
use joblink_core::domain::{
    NotificationDraft, NotificationId, OfferNotification, OfferNotificationKind, UserId,
};
use joblink_core::error::Result;
use joblink_core::port::NotificationRepository;
use sqlx::SqlitePool;

pub struct SqliteNotificationRepository {
    pool: SqlitePool,
}

impl SqliteNotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepository {
    async fn insert(&self, draft: &NotificationDraft) -> Result<NotificationId> {
        let result = sqlx::query(
            r#"
            INSERT INTO offer_notifications (offer_id, recipient_id, kind, is_read, created_at)
            VALUES (?, ?, ?, 0, ?)
            "#,
        )
        .bind(&draft.offer_id)
        .bind(&draft.recipient_id)
        .bind(draft.kind.to_string())
        .bind(draft.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<OfferNotification>> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT * FROM offer_notifications
            WHERE recipient_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_notification()).collect())
    }

    async fn mark_read(&self, id: NotificationId, user_id: &UserId) -> Result<bool> {
        // Scoped by recipient so one user cannot touch another's rows;
        // matching an already-read row still counts (idempotent)
        let result = sqlx::query(
            "UPDATE offer_notifications SET is_read = 1 WHERE id = ? AND recipient_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64> {
        let result =
            sqlx::query("UPDATE offer_notifications SET is_read = 1 WHERE recipient_id = ?")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM offer_notifications WHERE recipient_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(count)
    }
}

/// SQLite row representation of a stored notification
#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: i64,
    offer_id: String,
    recipient_id: String,
    kind: String,
    is_read: i32, // SQLite boolean as integer
    created_at: i64,
}

impl NotificationRow {
    fn into_notification(self) -> OfferNotification {
        OfferNotification {
            id: self.id,
            offer_id: self.offer_id,
            recipient_id: self.recipient_id,
            kind: OfferNotificationKind::parse(&self.kind)
                .unwrap_or(OfferNotificationKind::NewOffer),
            is_read: self.is_read != 0,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use joblink_core::domain::PrivateOffer;
    use joblink_core::port::OfferRepository;

    async fn setup() -> (SqlitePool, String) {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        // Satisfy the offer foreign key
        let offer = PrivateOffer::new_test("employer-1", "seeker-1");
        crate::SqliteOfferRepository::new(pool.clone())
            .insert(&offer)
            .await
            .unwrap();

        (pool, offer.id)
    }

    fn draft(offer_id: &str, recipient: &str, created_at: i64) -> NotificationDraft {
        NotificationDraft::new(
            offer_id,
            recipient,
            OfferNotificationKind::NewOffer,
            created_at,
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (pool, offer_id) = setup().await;
        let repo = SqliteNotificationRepository::new(pool);

        let id = repo.insert(&draft(&offer_id, "seeker-1", 1000)).await.unwrap();
        assert!(id > 0);

        let found = repo.find_for_user(&"seeker-1".to_string()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert!(!found[0].is_read);
        assert_eq!(found[0].kind, OfferNotificationKind::NewOffer);
    }

    #[tokio::test]
    async fn test_mark_read_scoped_by_recipient() {
        let (pool, offer_id) = setup().await;
        let repo = SqliteNotificationRepository::new(pool);

        let id = repo.insert(&draft(&offer_id, "seeker-1", 1000)).await.unwrap();

        // Someone else's id does not match
        assert!(!repo.mark_read(id, &"seeker-2".to_string()).await.unwrap());
        // Owner marks it read; repeat stays true (idempotent)
        assert!(repo.mark_read(id, &"seeker-1".to_string()).await.unwrap());
        assert!(repo.mark_read(id, &"seeker-1".to_string()).await.unwrap());
        // Unknown id
        assert!(!repo.mark_read(99_999, &"seeker-1".to_string()).await.unwrap());

        let found = repo.find_for_user(&"seeker-1".to_string()).await.unwrap();
        assert!(found[0].is_read);
    }

    #[tokio::test]
    async fn test_mark_all_read() {
        let (pool, offer_id) = setup().await;
        let repo = SqliteNotificationRepository::new(pool);

        for i in 0..3 {
            repo.insert(&draft(&offer_id, "seeker-1", 1000 + i)).await.unwrap();
        }
        repo.insert(&draft(&offer_id, "employer-1", 2000)).await.unwrap();

        let touched = repo.mark_all_read(&"seeker-1".to_string()).await.unwrap();
        assert_eq!(touched, 3);

        // The other recipient's row is untouched
        let other = repo.find_for_user(&"employer-1".to_string()).await.unwrap();
        assert!(!other[0].is_read);
    }
}
