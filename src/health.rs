use actix_web::{get, web, HttpResponse, Responder};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Checks the database
#[get("/ready")]
pub async fn readiness(db: web::Data<Arc<DatabaseConnection>>) -> impl Responder {
    let probe = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1",
        ))
        .await;

    match probe {
        Ok(_) => HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            database: "ok",
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                status: "unhealthy",
                database: "unhealthy",
            })
        }
    }
}
