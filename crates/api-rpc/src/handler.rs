//! RPC Method Handlers
//!
//! Implements the business logic for each JSON-RPC method.

use crate::error::to_rpc_error;
use crate::rate_limiter::RateLimiter;
use crate::session::SessionDismissals;
use crate::types::{
    CreateOfferRequest, CreateOfferResponse, DismissRequest, DismissResponse, FeedRequest,
    FeedResponse, GetOfferRequest, GetOfferResponse, ListOffersRequest, ListOffersResponse,
    MarkAllReadRequest, MarkAllReadResponse, MarkReadRequest, MarkReadResponse, OfferSummary,
    RespondRequest, RespondResponse, SweepRequest, SweepResponse, StatsRequest, StatsResponse,
    ViewOfferRequest, ViewOfferResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use joblink_core::application::notifications::FeedRequest as CoreFeedRequest;
use joblink_core::application::offers;
use joblink_core::application::{NotificationService, OfferService};
use joblink_core::domain::{OfferStatus, FULL_FEED_LIMIT, PREVIEW_FEED_LIMIT};
use joblink_core::error::AppError;
use joblink_core::port::OfferRepository;
use std::sync::Arc;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    offer_service: Arc<OfferService>,
    notification_service: Arc<NotificationService>,
    offers: Arc<dyn OfferRepository>,
    sessions: SessionDismissals,
    rate_limiter: Arc<RateLimiter>,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(
        offer_service: Arc<OfferService>,
        notification_service: Arc<NotificationService>,
        offers: Arc<dyn OfferRepository>,
    ) -> Self {
        // Default: 200 burst, 100 req/sec (configurable via env)
        let max_burst: u32 = std::env::var("JOBLINK_RATE_LIMIT_BURST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(200);

        let rate_per_sec: u32 = std::env::var("JOBLINK_RATE_LIMIT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            offer_service,
            notification_service,
            offers,
            sessions: SessionDismissals::new(),
            rate_limiter: Arc::new(RateLimiter::new(max_burst, rate_per_sec)),
            start_time: std::time::Instant::now(),
        }
    }

    async fn throttle(&self) -> Result<(), ErrorObjectOwned> {
        if self.rate_limiter.check().await {
            Ok(())
        } else {
            Err(ErrorObjectOwned::owned(
                crate::error::code::THROTTLED,
                "Rate limit exceeded. Please slow down.",
                None::<()>,
            ))
        }
    }

    /// offer.create.v1
    pub async fn create_offer(
        &self,
        params: CreateOfferRequest,
    ) -> Result<CreateOfferResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let req = offers::CreateOfferRequest {
            employer_id: params.employer_id,
            seeker_id: params.seeker_id,
            terms: params.terms,
            deadline: params.deadline,
        };

        let offer_id = self
            .offer_service
            .create(req)
            .await
            .map_err(to_rpc_error)?;

        Ok(CreateOfferResponse {
            offer_id,
            status: OfferStatus::Pending.to_string(),
        })
    }

    /// offer.list.v1
    pub async fn list_offers(
        &self,
        params: ListOffersRequest,
    ) -> Result<ListOffersResponse, ErrorObjectOwned> {
        let offers = match params.role.as_str() {
            "seeker" => self.offer_service.list_for_seeker(&params.user_id).await,
            "employer" => self.offer_service.list_for_employer(&params.user_id).await,
            other => Err(AppError::Validation(format!(
                "Unknown role '{}' (expected 'seeker' or 'employer')",
                other
            ))),
        }
        .map_err(to_rpc_error)?;

        Ok(ListOffersResponse {
            offers: offers.iter().map(OfferSummary::from).collect(),
        })
    }

    /// offer.get.v1
    pub async fn get_offer(
        &self,
        params: GetOfferRequest,
    ) -> Result<GetOfferResponse, ErrorObjectOwned> {
        let offer = self
            .offer_service
            .get(&params.offer_id, &params.user_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(GetOfferResponse { offer })
    }

    /// offer.view.v1
    pub async fn view_offer(
        &self,
        params: ViewOfferRequest,
    ) -> Result<ViewOfferResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let status = self
            .offer_service
            .view(offers::ViewOfferRequest {
                offer_id: params.offer_id.clone(),
                acting_user: params.user_id,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(ViewOfferResponse {
            offer_id: params.offer_id,
            status: status.to_string(),
        })
    }

    /// offer.respond.v1
    pub async fn respond(
        &self,
        params: RespondRequest,
    ) -> Result<RespondResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let offer = self
            .offer_service
            .respond(offers::RespondRequest {
                offer_id: params.offer_id,
                acting_user: params.user_id,
                decision: params.decision,
                message: params.message,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(RespondResponse {
            offer_id: offer.id,
            status: offer.status.to_string(),
            responded_at: offer.responded_at,
        })
    }

    /// notifications.feed.v1
    pub async fn feed(&self, params: FeedRequest) -> Result<FeedResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let max_items = if params.preview {
            PREVIEW_FEED_LIMIT
        } else {
            FULL_FEED_LIMIT
        };

        let mut req = CoreFeedRequest::new(params.user_id.clone(), max_items);
        req.dismissed = self.sessions.dismissed_for(&params.user_id);

        let page = self
            .notification_service
            .feed(req)
            .await
            .map_err(to_rpc_error)?;

        Ok(FeedResponse {
            items: page.items,
            unread_count: page.unread_count,
        })
    }

    /// notifications.mark_read.v1
    pub async fn mark_read(
        &self,
        params: MarkReadRequest,
    ) -> Result<MarkReadResponse, ErrorObjectOwned> {
        let updated = self
            .notification_service
            .mark_read(&params.user_id, &params.notification_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(MarkReadResponse { updated })
    }

    /// notifications.mark_all_read.v1
    pub async fn mark_all_read(
        &self,
        params: MarkAllReadRequest,
    ) -> Result<MarkAllReadResponse, ErrorObjectOwned> {
        let updated = self
            .notification_service
            .mark_all_read(&params.user_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(MarkAllReadResponse { updated })
    }

    /// notifications.dismiss.v1
    pub async fn dismiss(
        &self,
        params: DismissRequest,
    ) -> Result<DismissResponse, ErrorObjectOwned> {
        self.sessions.dismiss(&params.user_id, params.reminder);
        Ok(DismissResponse { dismissed: true })
    }

    /// admin.expire_sweep.v1
    pub async fn expire_sweep(
        &self,
        _params: SweepRequest,
    ) -> Result<SweepResponse, ErrorObjectOwned> {
        let swept = self
            .offer_service
            .sweep_expired()
            .await
            .map_err(to_rpc_error)?;

        Ok(SweepResponse { swept })
    }

    /// admin.stats.v1
    pub async fn stats(&self, _params: StatsRequest) -> Result<StatsResponse, ErrorObjectOwned> {
        let count = |status| self.offers.count_by_status(status);

        Ok(StatsResponse {
            pending_offers: count(OfferStatus::Pending).await.map_err(to_rpc_error)?,
            viewed_offers: count(OfferStatus::Viewed).await.map_err(to_rpc_error)?,
            accepted_offers: count(OfferStatus::Accepted).await.map_err(to_rpc_error)?,
            rejected_offers: count(OfferStatus::Rejected).await.map_err(to_rpc_error)?,
            expired_offers: count(OfferStatus::Expired).await.map_err(to_rpc_error)?,
            uptime_seconds: self.start_time.elapsed().as_secs() as i64,
        })
    }
}
