use axum::{extract::State, Json};
use serde::Serialize;
use std::time::Instant;

use crate::{db, DbPool};

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub uptime_seconds: u64,
}

pub async fn health_handler(State(pool): State<DbPool>) -> Json<HealthResponse> {
    let database = match db::ping(&pool) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach database: {:#}", e);
            false
        }
    };
    let uptime_seconds = START_TIME
        .get()
        .map(|t| t.elapsed().as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        uptime_seconds,
    })
}
