//! Backend seam and endpoint layout
//!
//! Every page talks to the external backend through [`Backend`]. Hosts
//! implement it once (reqwest natively, gloo-net in the browser) so that the
//! HTTP plumbing and the failure categorization live in a single helper.

use crate::error::ApiResult;
use crate::types::{
    AuthResponse, DietPlan, HistoryPayload, ImageUpload, LoginRequest, MessageBody,
    PredictionResponse, Profile, RecordId, RegisterRequest, SaveDetectionRequest,
};
use async_trait::async_trait;

/// Fixed local backend origin.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:5000";

/// Assistant page served next to the frontend.
pub const DEFAULT_CHATBOT_URL: &str = "/chatbot.html";

/// Chatbot page to embed: the configured URL, or the default when unset or blank.
pub fn chatbot_url(configured: Option<&str>) -> &str {
    configured
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_CHATBOT_URL)
}

/// URL layout of the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    origin: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl Endpoints {
    /// Endpoints under `origin`; trailing slashes are ignored.
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// The configured origin
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn register(&self) -> String {
        format!("{}/register", self.origin)
    }

    pub fn login(&self) -> String {
        format!("{}/login", self.origin)
    }

    pub fn predict(&self) -> String {
        format!("{}/predict", self.origin)
    }

    pub fn save_detection(&self) -> String {
        format!("{}/save_detection", self.origin)
    }

    pub fn history(&self) -> String {
        format!("{}/history", self.origin)
    }

    pub fn history_entry(&self, id: &RecordId) -> String {
        format!("{}/history/{}", self.origin, id)
    }

    pub fn planner(&self, vitamin: &str) -> String {
        format!("{}/planner/{}", self.origin, vitamin)
    }

    pub fn profile(&self) -> String {
        format!("{}/profile", self.origin)
    }

    /// Navigation target that downloads the PDF report for `vitamin`
    pub fn report(&self, vitamin: &str) -> String {
        format!("{}/generate-report?vita={}", self.origin, vitamin)
    }
}

/// The external backend as seen by the pages.
///
/// Implementations classify failures into [`ApiError`](crate::ApiError)
/// categories; a 401 is always `Unauthorized`. No call is retried and no
/// timeout is applied.
#[async_trait(?Send)]
pub trait Backend {
    /// Endpoint layout in use (for navigation targets such as reports)
    fn endpoints(&self) -> &Endpoints;

    /// `POST /register`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<MessageBody>;

    /// `POST /login`
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    /// `POST /predict`, multipart field `image`
    async fn predict(&self, image: &ImageUpload) -> ApiResult<PredictionResponse>;

    /// `POST /save_detection`, bearer-authenticated
    async fn save_detection(&self, token: &str, request: &SaveDetectionRequest) -> ApiResult<()>;

    /// `GET /history`, bearer-authenticated
    async fn history(&self, token: &str) -> ApiResult<HistoryPayload>;

    /// `DELETE /history/:id`, bearer-authenticated
    async fn delete_history(&self, token: &str, id: &RecordId) -> ApiResult<()>;

    /// `GET /planner/:vitamin`
    async fn planner(&self, vitamin: &str) -> ApiResult<DietPlan>;

    /// `GET /profile`, bearer-authenticated
    async fn profile(&self, token: &str) -> ApiResult<Profile>;

    /// `GET /generate-report?vita=:vitamin`, opened as a navigation target
    fn report_url(&self, vitamin: &str) -> String {
        self.endpoints().report(vitamin)
    }
}
