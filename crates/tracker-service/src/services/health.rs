//! Health service
//!
//! Dependency checks backing the readiness probe.

use tracing::{instrument, warn};

use crate::dto::ReadinessResponse;

use super::context::ServiceContext;

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    /// Create a new HealthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check every dependency the API needs to serve requests
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessResponse {
        let database_healthy = match self.ctx.user_repo().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Document store unreachable");
                false
            }
        };

        ReadinessResponse::ready(database_healthy)
    }
}
