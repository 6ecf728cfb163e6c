//! JSON-RPC Server
//!
//! Implements the JSON-RPC 2.0 server over localhost TCP. The surrounding
//! web application is the only intended caller; nothing here binds beyond
//! 127.0.0.1.

use crate::handler::RpcHandler;
use crate::types::{
    CreateOfferRequest, DismissRequest, FeedRequest, GetOfferRequest, ListOffersRequest,
    MarkAllReadRequest, MarkReadRequest, RespondRequest, StatsRequest, SweepRequest,
    ViewOfferRequest,
};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use joblink_core::application::{NotificationService, OfferService};
use joblink_core::port::OfferRepository;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9544;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        offer_service: Arc<OfferService>,
        notification_service: Arc<NotificationService>,
        offers: Arc<dyn OfferRepository>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(offer_service, notification_service, offers)),
        }
    }

    /// Start the JSON-RPC server
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server on TCP (localhost only)"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let mut module = RpcModule::new(());

        // Offer lifecycle
        let handler = self.handler.clone();
        module
            .register_async_method("offer.create.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CreateOfferRequest = params.parse()?;
                    handler.create_offer(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("offer.list.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: ListOffersRequest = params.parse()?;
                    handler.list_offers(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("offer.get.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: GetOfferRequest = params.parse()?;
                    handler.get_offer(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("offer.view.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: ViewOfferRequest = params.parse()?;
                    handler.view_offer(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("offer.respond.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: RespondRequest = params.parse()?;
                    handler.respond(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        // Notification feed
        let handler = self.handler.clone();
        module
            .register_async_method("notifications.feed.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: FeedRequest = params.parse()?;
                    handler.feed(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("notifications.mark_read.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: MarkReadRequest = params.parse()?;
                    handler.mark_read(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("notifications.mark_all_read.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: MarkAllReadRequest = params.parse()?;
                    handler.mark_all_read(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("notifications.dismiss.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: DismissRequest = params.parse()?;
                    handler.dismiss(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        // Admin APIs
        let handler = self.handler.clone();
        module
            .register_async_method("admin.expire_sweep.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: SweepRequest = params.parse()?;
                    handler.expire_sweep(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("admin.stats.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: StatsRequest = params.parse()?;
                    handler.stats(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!("JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(handle)
    }
}
