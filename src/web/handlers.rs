// src/web/handlers.rs
//! Route handler bodies. Routes in `web::mod` delegate here; every handler
//! works against the shared session behind an async RwLock.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rocket::serde::json::Json;
use rocket::State;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::*;
use crate::ai::HttpModelClient;
use crate::controller::ResumeSession;
use crate::error::BuilderError;
use crate::types::{AiAnalysisState, ListField, ResumeData};

pub type SharedSession = RwLock<ResumeSession<HttpModelClient>>;

fn error_response(e: &BuilderError) -> Json<StandardErrorResponse> {
    let (code, suggestions) = match e {
        BuilderError::Validation(errors) => (
            "VALIDATION_FAILED",
            errors
                .iter()
                .map(|fe| format!("{}: {}", fe.field, fe.message))
                .collect(),
        ),
        BuilderError::EmptyInput(_) => (
            "EMPTY_INPUT",
            vec!["Provide the missing input and retry".to_string()],
        ),
        BuilderError::OperationInFlight(_) => (
            "OPERATION_IN_FLIGHT",
            vec!["Wait for the running operation to finish".to_string()],
        ),
        BuilderError::UnknownEntry { .. } | BuilderError::IndexOutOfRange(_) => {
            ("NOT_FOUND", vec!["Reload the resume and retry".to_string()])
        }
        BuilderError::InvalidPhoto(_) => (
            "INVALID_PHOTO",
            vec!["Upload a PNG or JPEG under 10MB".to_string()],
        ),
        BuilderError::ModelCall(_) | BuilderError::ModelReply(_) => (
            "MODEL_SERVICE_ERROR",
            vec!["Check that the model service is reachable".to_string()],
        ),
        _ => ("INTERNAL_ERROR", vec!["Try again in a few moments".to_string()]),
    };
    Json(StandardErrorResponse::new(e.to_string(), code, suggestions))
}

fn parse_list_field(field: &str) -> Result<ListField, Json<StandardErrorResponse>> {
    ListField::parse(field).ok_or_else(|| {
        Json(StandardErrorResponse::new(
            format!("unknown list field: {}", field),
            "NOT_FOUND",
            vec!["Use skills, strengths, weaknesses or achievements".to_string()],
        ))
    })
}

type ApiResult<T> = Result<T, Json<StandardErrorResponse>>;

pub async fn health_handler() -> Json<TextResponse> {
    Json(TextResponse::success("Resume builder API is running"))
}

pub async fn get_resume_handler(session: &State<SharedSession>) -> Json<DataResponse<ResumeData>> {
    let session = session.read().await;
    Json(DataResponse::success("Current resume", session.data().clone()))
}

pub async fn get_ai_state_handler(
    session: &State<SharedSession>,
) -> Json<DataResponse<AiAnalysisState>> {
    let session = session.read().await;
    Json(DataResponse::success(
        "Current assist state",
        session.ai_state().clone(),
    ))
}

pub async fn put_personal_handler(
    request: Json<PersonalDetailsRequest>,
    session: &State<SharedSession>,
) -> Json<ActionResponse> {
    let mut session = session.write().await;
    session.update_personal_details(request.into_inner().details);
    Json(ActionResponse::success("personal_updated", "Personal details updated"))
}

pub async fn put_objective_handler(
    request: Json<ObjectiveRequest>,
    session: &State<SharedSession>,
) -> Json<ActionResponse> {
    let mut session = session.write().await;
    session.update_objective(request.into_inner().objective);
    Json(ActionResponse::success("objective_updated", "Objective updated"))
}

pub async fn post_education_handler(
    session: &State<SharedSession>,
) -> Json<DataResponse<EntryCreated>> {
    let mut session = session.write().await;
    let id = session.add_education();
    Json(DataResponse::success("Education entry added", EntryCreated { id }))
}

pub async fn put_education_handler(
    id: Uuid,
    request: Json<EducationRequest>,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let mut session = session.write().await;
    session
        .update_education(id, request.into_inner().entry)
        .map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success("education_updated", "Education entry updated")))
}

pub async fn delete_education_handler(
    id: Uuid,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let mut session = session.write().await;
    session.remove_education(id).map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success("education_removed", "Education entry removed")))
}

pub async fn post_experience_handler(
    session: &State<SharedSession>,
) -> Json<DataResponse<EntryCreated>> {
    let mut session = session.write().await;
    let id = session.add_experience();
    Json(DataResponse::success("Experience entry added", EntryCreated { id }))
}

pub async fn put_experience_handler(
    id: Uuid,
    request: Json<ExperienceRequest>,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let mut session = session.write().await;
    session
        .update_experience(id, request.into_inner().entry)
        .map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success("experience_updated", "Experience entry updated")))
}

pub async fn delete_experience_handler(
    id: Uuid,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let mut session = session.write().await;
    session.remove_experience(id).map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success("experience_removed", "Experience entry removed")))
}

pub async fn post_responsibility_handler(
    id: Uuid,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let mut session = session.write().await;
    session.add_responsibility(id).map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success("responsibility_added", "Responsibility added")))
}

pub async fn put_responsibility_handler(
    id: Uuid,
    index: usize,
    request: Json<ResponsibilityRequest>,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let mut session = session.write().await;
    session
        .update_responsibility(id, index, request.into_inner().text)
        .map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success("responsibility_updated", "Responsibility updated")))
}

pub async fn delete_responsibility_handler(
    id: Uuid,
    index: usize,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let mut session = session.write().await;
    session
        .remove_responsibility(id, index)
        .map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success("responsibility_removed", "Responsibility removed")))
}

pub async fn put_list_handler(
    field: &str,
    request: Json<ListReplaceRequest>,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let field = parse_list_field(field)?;
    let mut session = session.write().await;
    session.replace_list(field, request.into_inner().items);
    Ok(Json(ActionResponse::success(
        "list_replaced",
        format!("{} list replaced", field.name()),
    )))
}

pub async fn post_list_item_handler(
    field: &str,
    request: Json<ListItemRequest>,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let field = parse_list_field(field)?;
    let mut session = session.write().await;
    session.add_list_item(field, request.into_inner().item);
    Ok(Json(ActionResponse::success(
        "list_item_added",
        format!("Item added to {}", field.name()),
    )))
}

pub async fn delete_list_item_handler(
    field: &str,
    index: usize,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let field = parse_list_field(field)?;
    let mut session = session.write().await;
    session
        .remove_list_item(field, index)
        .map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success(
        "list_item_removed",
        format!("Item removed from {}", field.name()),
    )))
}

pub async fn post_photo_handler(
    request: Json<PhotoUploadRequest>,
    session: &State<SharedSession>,
) -> ApiResult<Json<ActionResponse>> {
    let bytes = BASE64.decode(&request.data).map_err(|e| {
        Json(StandardErrorResponse::new(
            format!("invalid base64 photo data: {}", e),
            "INVALID_PHOTO",
            vec!["Send the photo as standard base64".to_string()],
        ))
    })?;
    let mut session = session.write().await;
    session.upload_photo(bytes).map_err(|e| error_response(&e))?;
    Ok(Json(ActionResponse::success("photo_uploaded", "Photo uploaded")))
}

pub async fn delete_photo_handler(session: &State<SharedSession>) -> Json<ActionResponse> {
    let mut session = session.write().await;
    session.remove_photo();
    Json(ActionResponse::success("photo_removed", "Photo removed"))
}

pub async fn post_objective_flow_handler(
    session: &State<SharedSession>,
) -> ApiResult<Json<DataResponse<ObjectiveData>>> {
    let mut session = session.write().await;
    session
        .generate_objective()
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(DataResponse::success(
        "Objective generated",
        ObjectiveData {
            objective: session.data().objective.clone(),
        },
    )))
}

pub async fn post_analyze_handler(
    request: Json<JobDescriptionRequest>,
    session: &State<SharedSession>,
) -> ApiResult<Json<DataResponse<AnalysisData>>> {
    let mut session = session.write().await;
    session.set_job_description(request.into_inner().job_description);
    session
        .analyze_job_description()
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(DataResponse::success(
        "Job description analyzed",
        AnalysisData {
            suggestions: session.ai_state().analysis_suggestions.clone(),
        },
    )))
}

pub async fn post_enhance_handler(
    request: Json<EnhanceRequest>,
    session: &State<SharedSession>,
) -> ApiResult<Json<DataResponse<EnhanceData>>> {
    let request = request.into_inner();
    let mut session = session.write().await;
    let suggestions = session
        .enhance_responsibility(request.experience_id, request.index)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(DataResponse::success(
        "Suggestions ready",
        EnhanceData {
            suggested_responsibilities: suggestions,
        },
    )))
}

pub async fn post_export_handler(session: &State<SharedSession>) -> ApiResult<PdfResponse> {
    let mut session = session.write().await;
    let artifact = session.export().map_err(|e| error_response(&e))?;
    Ok(PdfResponse {
        data: artifact.bytes,
        filename: artifact.filename,
    })
}

pub async fn get_notifications_handler(
    session: &State<SharedSession>,
) -> Json<DataResponse<Vec<NotificationDto>>> {
    let mut session = session.write().await;
    let toasts: Vec<NotificationDto> = session
        .take_notifications()
        .into_iter()
        .map(NotificationDto::from)
        .collect();
    Json(DataResponse::success("Pending notifications", toasts))
}
