//! Mock backend for testing.
//!
//! Responses are configured per endpoint; every call is recorded so tests can
//! assert which requests were (or were not) issued.

use async_trait::async_trait;
use std::cell::RefCell;
use vitahealth_core::api::{Backend, Endpoints};
use vitahealth_core::error::{ApiError, ApiResult};
use vitahealth_core::types::{
    AuthResponse, DietPlan, HistoryPayload, ImageUpload, LoginRequest, MessageBody,
    PredictionResponse, Profile, RecordId, RegisterRequest, SaveDetectionRequest,
};

/// Mock backend with configurable responses.
///
/// # Examples
///
/// ```ignore
/// let backend = MockBackend::new()
///     .with_history(json!([{"id": 1, "deficiency": "Vitamin C Deficiency"}]))
///     .with_plan(DietPlan::default());
/// ```
pub struct MockBackend {
    endpoints: Endpoints,
    pub register: ApiResult<MessageBody>,
    pub login: ApiResult<AuthResponse>,
    pub predict: ApiResult<PredictionResponse>,
    pub save_detection: ApiResult<()>,
    pub history: ApiResult<serde_json::Value>,
    pub delete_history: ApiResult<()>,
    pub planner: ApiResult<DietPlan>,
    pub profile: ApiResult<Profile>,
    calls: RefCell<Vec<String>>,
    saved: RefCell<Vec<SaveDetectionRequest>>,
}

impl MockBackend {
    /// A backend where every call fails with a connectivity error.
    pub fn new() -> Self {
        let down = || ApiError::Connectivity("mock backend down".to_string());
        Self {
            endpoints: Endpoints::default(),
            register: Err(down()),
            login: Err(down()),
            predict: Err(down()),
            save_detection: Err(down()),
            history: Err(down()),
            delete_history: Err(down()),
            planner: Err(down()),
            profile: Err(down()),
            calls: RefCell::new(Vec::new()),
            saved: RefCell::new(Vec::new()),
        }
    }

    pub fn with_history(mut self, body: serde_json::Value) -> Self {
        self.history = Ok(body);
        self
    }

    pub fn with_plan(mut self, plan: DietPlan) -> Self {
        self.planner = Ok(plan);
        self
    }

    pub fn with_prediction(mut self, response: PredictionResponse) -> Self {
        self.predict = Ok(response);
        self
    }

    /// Names of the endpoints hit, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn saved_detections(&self) -> Vec<SaveDetectionRequest> {
        self.saved.borrow().clone()
    }

    fn record(&self, name: &str) {
        self.calls.borrow_mut().push(name.to_string());
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn register(&self, _request: &RegisterRequest) -> ApiResult<MessageBody> {
        self.record("register");
        self.register.clone()
    }

    async fn login(&self, _request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.record("login");
        self.login.clone()
    }

    async fn predict(&self, _image: &ImageUpload) -> ApiResult<PredictionResponse> {
        self.record("predict");
        self.predict.clone()
    }

    async fn save_detection(&self, _token: &str, request: &SaveDetectionRequest) -> ApiResult<()> {
        self.record("save_detection");
        self.saved.borrow_mut().push(request.clone());
        self.save_detection.clone()
    }

    async fn history(&self, _token: &str) -> ApiResult<HistoryPayload> {
        self.record("history");
        self.history.clone().and_then(|body| {
            serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
        })
    }

    async fn delete_history(&self, _token: &str, id: &RecordId) -> ApiResult<()> {
        self.record(&format!("delete_history/{}", id));
        self.delete_history.clone()
    }

    async fn planner(&self, vitamin: &str) -> ApiResult<DietPlan> {
        self.record(&format!("planner/{}", vitamin));
        self.planner.clone()
    }

    async fn profile(&self, _token: &str) -> ApiResult<Profile> {
        self.record("profile");
        self.profile.clone()
    }
}
