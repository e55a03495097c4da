// src/web/types.rs
//! Request and response bodies for the HTTP API.

use rocket::http::ContentType;
use rocket::response::{self, Responder};
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};
use uuid::Uuid;

use crate::controller::{Notification, NotificationKind};
use crate::types::{EducationEntry, ExperienceEntry, PersonalDetails};

/// Raw PDF bytes served as a download.
pub struct PdfResponse {
    pub data: Vec<u8>,
    pub filename: String,
}

impl<'r> Responder<'r, 'static> for PdfResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::PDF)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .sized_body(self.data.len(), std::io::Cursor::new(self.data))
            .ok()
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

impl TextResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message: message.into(),
            data,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
}

impl ActionResponse {
    pub fn success(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message: message.into(),
            action: action.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: &str, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code: error_code.to_string(),
            suggestions,
        }
    }
}

// Request bodies.

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ObjectiveRequest {
    pub objective: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PersonalDetailsRequest {
    #[serde(flatten)]
    pub details: PersonalDetails,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct EducationRequest {
    #[serde(flatten)]
    pub entry: EducationEntry,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ExperienceRequest {
    #[serde(flatten)]
    pub entry: ExperienceEntry,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ResponsibilityRequest {
    pub text: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ListItemRequest {
    pub item: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ListReplaceRequest {
    pub items: Vec<String>,
}

/// Photo upload as base64 in a JSON body.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PhotoUploadRequest {
    pub data: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct EnhanceRequest {
    pub experience_id: Uuid,
    pub index: usize,
}

// Response payloads.

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct EntryCreated {
    pub id: Uuid,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ObjectiveData {
    pub objective: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AnalysisData {
    pub suggestions: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct EnhanceData {
    pub suggested_responsibilities: Vec<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct NotificationDto {
    pub kind: String,
    pub title: String,
    pub message: String,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            kind: match n.kind {
                NotificationKind::Success => "success".to_string(),
                NotificationKind::Error => "error".to_string(),
            },
            title: n.title,
            message: n.message,
        }
    }
}
