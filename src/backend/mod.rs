//! reqwest implementation of the backend seam
//!
//! All requests go through [`HttpBackend::execute`], which turns transport
//! failures into [`ApiError::Connectivity`] and non-2xx statuses into
//! [`ApiError::from_status`] carrying the body's `message` field.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use vitahealth_core::api::{Backend, Endpoints};
use vitahealth_core::error::{ApiError, ApiResult};
use vitahealth_core::types::{
    AuthResponse, DietPlan, HistoryPayload, ImageUpload, LoginRequest, MessageBody,
    PredictionResponse, Profile, RecordId, RegisterRequest, SaveDetectionRequest,
};

/// Multipart field the prediction service reads the image from
pub const IMAGE_FIELD: &str = "image";

/// HTTP client for the VitaHealth backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    /// Client for the backend at `origin`
    pub fn new(origin: &str) -> Self {
        Self::with_client(Client::new(), Endpoints::new(origin))
    }

    pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Send and categorize the outcome. No timeout, no retry.
    async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Connectivity(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageBody>(&text)
            .ok()
            .and_then(|body| body.message);
        debug!(status = status.as_u16(), ?message, "Backend returned an error status");
        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn image_form(image: &ImageUpload) -> ApiResult<Form> {
    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.mime_type)
        .map_err(|e| ApiError::Validation(format!("Invalid image type '{}': {}", image.mime_type, e)))?;
    Ok(Form::new().part(IMAGE_FIELD, part))
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[instrument(skip_all, fields(email = %request.email))]
    async fn register(&self, request: &RegisterRequest) -> ApiResult<MessageBody> {
        let response = self
            .execute(self.client.post(self.endpoints.register()).json(request))
            .await?;

        // Only the status matters; tolerate empty or non-JSON acknowledgements
        let text = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    #[instrument(skip_all, fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.execute_json(self.client.post(self.endpoints.login()).json(request))
            .await
    }

    #[instrument(skip_all, fields(file = %image.file_name, bytes = image.bytes.len()))]
    async fn predict(&self, image: &ImageUpload) -> ApiResult<PredictionResponse> {
        let form = image_form(image)?;
        self.execute_json(self.client.post(self.endpoints.predict()).multipart(form))
            .await
    }

    #[instrument(skip_all)]
    async fn save_detection(&self, token: &str, request: &SaveDetectionRequest) -> ApiResult<()> {
        self.execute(
            self.client
                .post(self.endpoints.save_detection())
                .bearer_auth(token)
                .json(request),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn history(&self, token: &str) -> ApiResult<HistoryPayload> {
        self.execute_json(self.client.get(self.endpoints.history()).bearer_auth(token))
            .await
    }

    #[instrument(skip(self, token))]
    async fn delete_history(&self, token: &str, id: &RecordId) -> ApiResult<()> {
        self.execute(
            self.client
                .delete(self.endpoints.history_entry(id))
                .bearer_auth(token),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn planner(&self, vitamin: &str) -> ApiResult<DietPlan> {
        self.execute_json(self.client.get(self.endpoints.planner(vitamin)))
            .await
    }

    #[instrument(skip_all)]
    async fn profile(&self, token: &str) -> ApiResult<Profile> {
        self.execute_json(self.client.get(self.endpoints.profile()).bearer_auth(token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_form_rejects_bad_mime() {
        let image = ImageUpload {
            file_name: "eye.jpg".to_string(),
            mime_type: "not a mime".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(matches!(image_form(&image), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_endpoints_follow_origin() {
        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(backend.endpoints().origin(), "http://localhost:5000");
        assert_eq!(
            backend.report_url("VitaminD"),
            "http://localhost:5000/generate-report?vita=VitaminD"
        );
    }
}
