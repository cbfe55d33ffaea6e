use actix_web::{web, HttpResponse, Result};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set,
    Statement,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::course::adapter::outgoing::sea_orm_entity::courses;

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(rename = "nombre", alias = "name")]
    name: String,
    #[serde(rename = "categoria", alias = "category")]
    category: String,
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    id: i64,
    name: String,
    category: String,
}

impl From<courses::Model> for CourseResponse {
    fn from(model: courses::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
        }
    }
}

/// Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    id: i64,
    name: String,
    email: String,
}

#[derive(Serialize)]
pub struct CleanupResponse {
    deleted_topics: u64,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    environment: String,
}

fn internal(context: &str, e: sea_orm::DbErr) -> actix_web::Error {
    tracing::error!(error = %e, "{}", context);
    actix_web::error::ErrorInternalServerError(format!("{}: {}", context, e))
}

/// Create a course
/// POST /test/cursos
pub async fn create_course(
    payload: web::Json<CreateCourseRequest>,
    db: web::Data<Arc<DatabaseConnection>>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();

    if payload.name.trim().is_empty() || payload.category.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "name and category are required"
        })));
    }

    let model = courses::ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        category: Set(payload.category),
    };

    let inserted = model
        .insert(db.get_ref().as_ref())
        .await
        .map_err(|e| internal("Failed to create course", e))?;

    tracing::info!(course_id = inserted.id, "Test course created");

    Ok(HttpResponse::Created().json(CourseResponse::from(inserted)))
}

/// List courses
/// GET /test/cursos
pub async fn list_courses(db: web::Data<Arc<DatabaseConnection>>) -> Result<HttpResponse> {
    let rows = courses::Entity::find()
        .order_by_asc(courses::Column::Id)
        .all(db.get_ref().as_ref())
        .await
        .map_err(|e| internal("Failed to list courses", e))?;

    let body: Vec<CourseResponse> = rows.into_iter().map(CourseResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// List users without their hashes
/// GET /test/usuarios
pub async fn list_users(db: web::Data<Arc<DatabaseConnection>>) -> Result<HttpResponse> {
    let rows = users::Entity::find()
        .order_by_asc(users::Column::Id)
        .all(db.get_ref().as_ref())
        .await
        .map_err(|e| internal("Failed to list users", e))?;

    let body: Vec<UserSummary> = rows
        .into_iter()
        .map(|u| UserSummary {
            id: u.id,
            name: u.name,
            email: u.email,
        })
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// Remove every topic
/// DELETE /test/cleanup
pub async fn cleanup_topics(db: web::Data<Arc<DatabaseConnection>>) -> Result<HttpResponse> {
    let result = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "DELETE FROM topics",
        ))
        .await
        .map_err(|e| internal("Failed to delete topics", e))?;

    tracing::warn!(deleted = result.rows_affected(), "Test cleanup removed topics");

    Ok(HttpResponse::Ok().json(CleanupResponse {
        deleted_topics: result.rows_affected(),
    }))
}

/// Health check for test helpers
/// GET /test/health
pub async fn health_check() -> Result<HttpResponse> {
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    if env == "production" {
        tracing::error!("Test helper routes active in production");
        return Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "error",
            "reason": "test-helper-running-in-production"
        })));
    }

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        environment: env,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/test")
            .route("/health", web::get().to(health_check))
            .route("/cursos", web::post().to(create_course))
            .route("/cursos", web::get().to(list_courses))
            .route("/usuarios", web::get().to(list_users))
            .route("/cleanup", web::delete().to(cleanup_topics)),
    );
}
