//! Readiness and liveness probes for the panel process.
//!
//! Readiness also reports which platform backend answers user lookups, so a
//! deployment still serving fixture users is visible from the probe body.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

/// Where user lookups and suspensions are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PlatformBackend {
    /// The platform admin API.
    AdminApi,
    /// In-process fixture adapters.
    Fixtures,
}

/// Probe state shared with the server; readiness flips once the listener
/// is bound.
pub struct HealthState {
    ready: AtomicBool,
    backend: PlatformBackend,
}

impl HealthState {
    pub fn new(backend: PlatformBackend) -> Self {
        Self {
            ready: AtomicBool::new(false),
            backend,
        }
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn backend(&self) -> PlatformBackend {
        self.backend
    }
}

/// Probe response body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthReport {
    /// `ready`, `starting` or `alive`.
    #[schema(example = "ready")]
    pub status: &'static str,
    /// Backend serving user lookups; readiness only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformBackend>,
}

fn no_store(mut response: actix_web::HttpResponseBuilder, report: &HealthReport) -> HttpResponse {
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(report)
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Ready to serve operators", body = HealthReport),
        (status = 503, description = "Still starting", body = HealthReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let (builder, status) = if state.is_ready() {
        (HttpResponse::Ok(), "ready")
    } else {
        (HttpResponse::ServiceUnavailable(), "starting")
    };
    no_store(
        builder,
        &HealthReport {
            status,
            platform: Some(state.backend()),
        },
    )
}

/// Liveness probe. Answers whenever the worker can run a handler.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Process alive", body = HealthReport))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    no_store(
        HttpResponse::Ok(),
        &HealthReport {
            status: "alive",
            platform: None,
        },
    )
}
