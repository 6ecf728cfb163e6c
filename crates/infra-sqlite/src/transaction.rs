// SQLite Transaction Implementation

use crate::offer_repository::{bind_offer, map_sqlx_error, INSERT_OFFER_SQL};
use async_trait::async_trait;
use joblink_core::domain::{NotificationDraft, NotificationId, OfferId, PrivateOffer};
use joblink_core::error::Result;
use joblink_core::port::{OfferStoreTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};

pub struct SqliteOfferTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteOfferTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteOfferTransaction<'_> {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl OfferStoreTransaction for SqliteOfferTransaction<'_> {
    async fn insert_offer(&mut self, offer: &PrivateOffer) -> Result<()> {
        bind_offer!(sqlx::query(INSERT_OFFER_SQL), offer)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn insert_notification(&mut self, draft: &NotificationDraft) -> Result<NotificationId> {
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
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn mark_viewed(&mut self, id: &OfferId, viewed_at: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE offers
            SET status = 'VIEWED', viewed_at = ?
            WHERE id = ? AND status = 'PENDING'
            "#,
        )
        .bind(viewed_at)
        .bind(id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_expired(&mut self, id: &OfferId, now_millis: i64) -> Result<bool> {
        // Only open offers actually past their deadline expire
        let result = sqlx::query(
            r#"
            UPDATE offers
            SET status = 'EXPIRED'
            WHERE id = ?
              AND status IN ('PENDING', 'VIEWED')
              AND deadline < ?
            "#,
        )
        .bind(id)
        .bind(now_millis)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
