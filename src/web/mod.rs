// src/web/mod.rs
//! HTTP API over one shared resume session, mounted under `/api`.

pub mod handlers;
pub mod types;

pub use handlers::SharedSession;
pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, put, routes, Request, Response, State};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::ai::HttpModelClient;
use crate::config::AppConfig;
use crate::controller::ResumeSession;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[get("/resume")]
pub async fn get_resume(session: &State<SharedSession>) -> Json<DataResponse<crate::types::ResumeData>> {
    handlers::get_resume_handler(session).await
}

#[get("/resume/ai-state")]
pub async fn get_ai_state(
    session: &State<SharedSession>,
) -> Json<DataResponse<crate::types::AiAnalysisState>> {
    handlers::get_ai_state_handler(session).await
}

#[put("/resume/personal", data = "<request>")]
pub async fn put_personal(
    request: Json<PersonalDetailsRequest>,
    session: &State<SharedSession>,
) -> Json<ActionResponse> {
    handlers::put_personal_handler(request, session).await
}

#[put("/resume/objective", data = "<request>")]
pub async fn put_objective(
    request: Json<ObjectiveRequest>,
    session: &State<SharedSession>,
) -> Json<ActionResponse> {
    handlers::put_objective_handler(request, session).await
}

#[post("/resume/education")]
pub async fn post_education(session: &State<SharedSession>) -> Json<DataResponse<EntryCreated>> {
    handlers::post_education_handler(session).await
}

#[put("/resume/education/<id>", data = "<request>")]
pub async fn put_education(
    id: Uuid,
    request: Json<EducationRequest>,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::put_education_handler(id, request, session).await
}

#[delete("/resume/education/<id>")]
pub async fn delete_education(
    id: Uuid,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_education_handler(id, session).await
}

#[post("/resume/experience")]
pub async fn post_experience(session: &State<SharedSession>) -> Json<DataResponse<EntryCreated>> {
    handlers::post_experience_handler(session).await
}

#[put("/resume/experience/<id>", data = "<request>")]
pub async fn put_experience(
    id: Uuid,
    request: Json<ExperienceRequest>,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::put_experience_handler(id, request, session).await
}

#[delete("/resume/experience/<id>")]
pub async fn delete_experience(
    id: Uuid,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_experience_handler(id, session).await
}

#[post("/resume/experience/<id>/responsibilities")]
pub async fn post_responsibility(
    id: Uuid,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::post_responsibility_handler(id, session).await
}

#[put("/resume/experience/<id>/responsibilities/<index>", data = "<request>")]
pub async fn put_responsibility(
    id: Uuid,
    index: usize,
    request: Json<ResponsibilityRequest>,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::put_responsibility_handler(id, index, request, session).await
}

#[delete("/resume/experience/<id>/responsibilities/<index>")]
pub async fn delete_responsibility(
    id: Uuid,
    index: usize,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_responsibility_handler(id, index, session).await
}

#[put("/resume/lists/<field>", data = "<request>")]
pub async fn put_list(
    field: &str,
    request: Json<ListReplaceRequest>,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::put_list_handler(field, request, session).await
}

#[post("/resume/lists/<field>", data = "<request>")]
pub async fn post_list_item(
    field: &str,
    request: Json<ListItemRequest>,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::post_list_item_handler(field, request, session).await
}

#[delete("/resume/lists/<field>/<index>")]
pub async fn delete_list_item(
    field: &str,
    index: usize,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_list_item_handler(field, index, session).await
}

#[post("/resume/photo", data = "<request>")]
pub async fn post_photo(
    request: Json<PhotoUploadRequest>,
    session: &State<SharedSession>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::post_photo_handler(request, session).await
}

#[delete("/resume/photo")]
pub async fn delete_photo(session: &State<SharedSession>) -> Json<ActionResponse> {
    handlers::delete_photo_handler(session).await
}

#[post("/ai/objective")]
pub async fn post_objective_flow(
    session: &State<SharedSession>,
) -> Result<Json<DataResponse<ObjectiveData>>, Json<StandardErrorResponse>> {
    handlers::post_objective_flow_handler(session).await
}

#[post("/ai/analyze", data = "<request>")]
pub async fn post_analyze(
    request: Json<JobDescriptionRequest>,
    session: &State<SharedSession>,
) -> Result<Json<DataResponse<AnalysisData>>, Json<StandardErrorResponse>> {
    handlers::post_analyze_handler(request, session).await
}

#[post("/ai/enhance", data = "<request>")]
pub async fn post_enhance(
    request: Json<EnhanceRequest>,
    session: &State<SharedSession>,
) -> Result<Json<DataResponse<EnhanceData>>, Json<StandardErrorResponse>> {
    handlers::post_enhance_handler(request, session).await
}

#[post("/export")]
pub async fn post_export(
    session: &State<SharedSession>,
) -> Result<PdfResponse, Json<StandardErrorResponse>> {
    handlers::post_export_handler(session).await
}

#[get("/notifications")]
pub async fn get_notifications(
    session: &State<SharedSession>,
) -> Json<DataResponse<Vec<NotificationDto>>> {
    handlers::get_notifications_handler(session).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST",
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND",
        vec!["Check the request path".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR",
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    config.ensure_directories().await?;

    let model = HttpModelClient::new(&config.model_service_url)
        .map_err(|e| anyhow::anyhow!("model client setup failed: {}", e))?;
    let session: SharedSession = RwLock::new(ResumeSession::new(model));

    info!("Starting resume builder API server");
    info!("Model service: {}", config.model_service_url);
    info!("Output directory: {}", config.output_path.display());

    let figment = rocket::Config::figment().merge(("port", config.port));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(session)
        .register("/api", catchers![bad_request, not_found, internal_error])
        .mount(
            "/api",
            routes![
                health,
                get_resume,
                get_ai_state,
                put_personal,
                put_objective,
                post_education,
                put_education,
                delete_education,
                post_experience,
                put_experience,
                delete_experience,
                post_responsibility,
                put_responsibility,
                delete_responsibility,
                put_list,
                post_list_item,
                delete_list_item,
                post_photo,
                delete_photo,
                post_objective_flow,
                post_analyze,
                post_enhance,
                post_export,
                get_notifications,
                options,
            ],
        )
        .launch()
        .await?;

    Ok(())
}
