//! API client for communicating with the VitaHealth backend

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use vitahealth_core::api::{Backend, Endpoints};
use vitahealth_core::error::{ApiError, ApiResult};
use vitahealth_core::types::{
    AuthResponse, DietPlan, HistoryPayload, ImageUpload, LoginRequest, MessageBody,
    PredictionResponse, Profile, RecordId, RegisterRequest, SaveDetectionRequest,
};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// Backend reached through the browser's fetch
#[derive(Debug, Clone, PartialEq)]
pub struct GlooBackend {
    endpoints: Endpoints,
}

impl GlooBackend {
    pub fn new(origin: &str) -> Self {
        Self {
            endpoints: Endpoints::new(origin),
        }
    }
}

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

fn with_json<T: Serialize>(builder: RequestBuilder, body: &T) -> ApiResult<Request> {
    builder
        .json(body)
        .map_err(|e| ApiError::Validation(format!("Failed to serialize request: {}", e)))
}

fn without_body(builder: RequestBuilder) -> ApiResult<Request> {
    builder
        .build()
        .map_err(|e| ApiError::Validation(format!("Failed to build request: {}", e)))
}

/// Multipart body with the image under the `image` field
fn image_form(image: &ImageUpload) -> ApiResult<FormData> {
    let js = |e: JsValue| ApiError::Validation(format!("Failed to prepare image: {:?}", e));

    let bytes = js_sys::Uint8Array::from(image.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(&image.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js)?;

    let form = FormData::new().map_err(js)?;
    form.append_with_blob_and_filename("image", &blob, &image.file_name)
        .map_err(js)?;
    Ok(form)
}

/// Send and categorize; the one place failures are classified.
async fn execute(request: Request) -> ApiResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Connectivity(e.to_string()))?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let message = response
        .json::<MessageBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    Err(ApiError::from_status(status, message))
}

async fn execute_json<T: DeserializeOwned>(request: Request) -> ApiResult<T> {
    execute(request)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl Backend for GlooBackend {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<MessageBody> {
        let request = with_json(Request::post(&self.endpoints.register()), request)?;
        let response = execute(request).await?;
        Ok(response.json::<MessageBody>().await.unwrap_or_default())
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        execute_json(with_json(Request::post(&self.endpoints.login()), request)?).await
    }

    async fn predict(&self, image: &ImageUpload) -> ApiResult<PredictionResponse> {
        let form = image_form(image)?;
        let request = Request::post(&self.endpoints.predict())
            .body(form)
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        execute_json(request).await
    }

    async fn save_detection(&self, token: &str, request: &SaveDetectionRequest) -> ApiResult<()> {
        let builder = bearer(Request::post(&self.endpoints.save_detection()), token);
        execute(with_json(builder, request)?).await?;
        Ok(())
    }

    async fn history(&self, token: &str) -> ApiResult<HistoryPayload> {
        let builder = bearer(Request::get(&self.endpoints.history()), token);
        execute_json(without_body(builder)?).await
    }

    async fn delete_history(&self, token: &str, id: &RecordId) -> ApiResult<()> {
        let builder = bearer(Request::delete(&self.endpoints.history_entry(id)), token);
        execute(without_body(builder)?).await?;
        Ok(())
    }

    async fn planner(&self, vitamin: &str) -> ApiResult<DietPlan> {
        execute_json(without_body(Request::get(&self.endpoints.planner(vitamin)))?).await
    }

    async fn profile(&self, token: &str) -> ApiResult<Profile> {
        let builder = bearer(Request::get(&self.endpoints.profile()), token);
        execute_json(without_body(builder)?).await
    }
}
