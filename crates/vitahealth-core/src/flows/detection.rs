//! Detection page
//!
//! `Idle → ImageSelected → Analyzing → ResultShown`, with failures falling
//! back to `ImageSelected`. Choosing a new file discards the previous image
//! and result; there is no undo.

use super::Modal;
use crate::api::Backend;
use crate::error::{ApiError, ApiResult};
use crate::planner_key::planner_key;
use crate::routes::Route;
use crate::session::Session;
use crate::types::{DetectionResult, ImageUpload, PredictionResponse, SaveDetectionRequest};
use tracing::{debug, error, warn};

pub const NO_IMAGE_MESSAGE: &str = "Please select an image first to start detection.";
pub const SUCCESS_MESSAGE: &str = "Detection Successful! View your personalized diet plan.";
pub const FAILURE_FALLBACK: &str = "Prediction failed due to server error.";
pub const CONNECTION_MESSAGE: &str =
    "Error connecting to the detection service. Please ensure the backend server is running.";

/// A chosen image plus whatever the host needs to preview it
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub upload: ImageUpload,
    /// Host-specific preview handle (object URL in the browser, path natively)
    pub preview: Option<String>,
}

/// Where the page is in its flow
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetectionState {
    #[default]
    Idle,
    ImageSelected(SelectedImage),
    Analyzing(SelectedImage),
    ResultShown {
        image: SelectedImage,
        result: DetectionResult,
    },
}

/// Detection page controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionPage {
    state: DetectionState,
    modal: Option<Modal>,
}

impl DetectionPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetectionState {
        &self.state
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, DetectionState::Analyzing(_))
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        match &self.state {
            DetectionState::Idle => None,
            DetectionState::ImageSelected(image)
            | DetectionState::Analyzing(image)
            | DetectionState::ResultShown { image, .. } => Some(image),
        }
    }

    pub fn result(&self) -> Option<&DetectionResult> {
        match &self.state {
            DetectionState::ResultShown { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Choose a file, discarding any previous image and result.
    ///
    /// Ignored while a request is in flight. Returns the discarded image so
    /// the host can release its preview handle.
    pub fn select_image(&mut self, image: SelectedImage) -> Option<SelectedImage> {
        if self.is_analyzing() {
            debug!("Ignoring image selection while analyzing");
            return None;
        }

        let previous = match std::mem::take(&mut self.state) {
            DetectionState::Idle => None,
            DetectionState::ImageSelected(prev)
            | DetectionState::Analyzing(prev)
            | DetectionState::ResultShown { image: prev, .. } => Some(prev),
        };
        self.state = DetectionState::ImageSelected(image);
        previous
    }

    /// Enter `Analyzing` and hand back the upload to send.
    ///
    /// Without an image a warning modal is raised and nothing is returned, so
    /// no request is issued.
    pub fn start_analysis(&mut self) -> Option<ImageUpload> {
        let image = match std::mem::take(&mut self.state) {
            DetectionState::ImageSelected(image) | DetectionState::ResultShown { image, .. } => {
                image
            }
            other @ DetectionState::Analyzing(_) => {
                self.state = other;
                return None;
            }
            DetectionState::Idle => {
                self.modal = Some(Modal::warning("No Image Selected", NO_IMAGE_MESSAGE));
                return None;
            }
        };

        let upload = image.upload.clone();
        self.state = DetectionState::Analyzing(image);
        Some(upload)
    }

    /// Apply the prediction outcome. Returns the result on success so the
    /// host can fire the best-effort history save.
    pub fn finish_analysis(
        &mut self,
        outcome: ApiResult<PredictionResponse>,
    ) -> Option<DetectionResult> {
        let image = match std::mem::take(&mut self.state) {
            DetectionState::Analyzing(image) => image,
            other => {
                warn!("Prediction finished outside of analysis, ignoring");
                self.state = other;
                return None;
            }
        };

        match outcome {
            Ok(response) => {
                let result = DetectionResult::from(response);
                debug!(deficiency = %result.deficiency, confidence = result.confidence, "Detection complete");
                self.state = DetectionState::ResultShown {
                    image,
                    result: result.clone(),
                };
                self.modal = Some(Modal::success("Success", SUCCESS_MESSAGE));
                Some(result)
            }
            Err(e) => {
                error!(error = %e, "Prediction failed");
                self.state = DetectionState::ImageSelected(image);
                self.modal = Some(failure_modal(&e));
                None
            }
        }
    }

    /// Planner route for the shown result
    pub fn planner_route(&self) -> Option<Route> {
        self.result().map(|result| Route::Planner {
            vitamin: planner_key(&result.deficiency),
        })
    }
}

fn failure_modal(err: &ApiError) -> Modal {
    match err {
        ApiError::Connectivity(_) => Modal::error("Connection Error", CONNECTION_MESSAGE),
        other => Modal::error("Prediction Failed", other.message_or(FAILURE_FALLBACK)),
    }
}

/// Record a detection in the backend history. Failures are logged only.
pub async fn save_detection_best_effort<B>(backend: &B, session: &Session, result: &DetectionResult)
where
    B: Backend + ?Sized,
{
    let Some(token) = session.token() else {
        warn!("No session token, skipping history save");
        return;
    };

    let request = SaveDetectionRequest::from(result);
    if let Err(e) = backend.save_detection(token, &request).await {
        warn!(error = %e, "Failed to save history");
    }
}

/// Run a whole detection: analyze, apply, then save to history.
pub async fn run_detection<B>(
    page: &mut DetectionPage,
    backend: &B,
    session: &Session,
) -> Option<DetectionResult>
where
    B: Backend + ?Sized,
{
    let upload = page.start_analysis()?;
    let outcome = backend.predict(&upload).await;
    let result = page.finish_analysis(outcome)?;
    save_detection_best_effort(backend, session, &result).await;
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> SelectedImage {
        SelectedImage {
            upload: ImageUpload {
                file_name: name.to_string(),
                mime_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF],
            },
            preview: None,
        }
    }

    fn prediction(deficiency: &str, confidence: f64) -> PredictionResponse {
        PredictionResponse {
            predicted_disease: Some("Bitot's spots".to_string()),
            vitamin_deficiency: Some(deficiency.to_string()),
            confidence: Some(confidence),
        }
    }

    #[test]
    fn test_detect_without_image_warns() {
        let mut page = DetectionPage::new();
        assert!(page.start_analysis().is_none());
        assert_eq!(page.state(), &DetectionState::Idle);
        assert_eq!(page.modal().map(|m| m.message.as_str()), Some(NO_IMAGE_MESSAGE));
    }

    #[test]
    fn test_happy_path() {
        let mut page = DetectionPage::new();
        page.select_image(image("eye.jpg"));
        assert!(page.start_analysis().is_some());
        assert!(page.is_analyzing());

        let result = page
            .finish_analysis(Ok(prediction("Vitamin A Deficiency", 0.91)))
            .unwrap();
        assert_eq!(result.deficiency, "Vitamin A Deficiency");
        assert_eq!(
            page.planner_route(),
            Some(Route::Planner { vitamin: "VitaminA".to_string() })
        );
        assert!(!page.modal().unwrap().is_error());
    }

    #[test]
    fn test_new_selection_discards_result() {
        let mut page = DetectionPage::new();
        page.select_image(image("one.jpg"));
        page.start_analysis();
        page.finish_analysis(Ok(prediction("Iron Deficiency", 0.5)));
        assert!(page.result().is_some());

        let discarded = page.select_image(image("two.jpg"));
        assert_eq!(discarded.unwrap().upload.file_name, "one.jpg");
        assert!(page.result().is_none());
        assert_eq!(page.selected().unwrap().upload.file_name, "two.jpg");
    }

    #[test]
    fn test_failure_returns_to_selected() {
        let mut page = DetectionPage::new();
        page.select_image(image("eye.jpg"));
        page.start_analysis();
        let result = page.finish_analysis(Err(ApiError::Backend {
            status: 500,
            message: Some("Model not loaded".to_string()),
        }));

        assert!(result.is_none());
        assert!(matches!(page.state(), DetectionState::ImageSelected(_)));
        let modal = page.modal().unwrap();
        assert_eq!(modal.title, "Prediction Failed");
        assert_eq!(modal.message, "Model not loaded");
    }

    #[test]
    fn test_connectivity_failure_modal() {
        let mut page = DetectionPage::new();
        page.select_image(image("eye.jpg"));
        page.start_analysis();
        page.finish_analysis(Err(ApiError::Connectivity("refused".to_string())));
        assert_eq!(page.modal().unwrap().title, "Connection Error");
    }

    #[test]
    fn test_selection_ignored_while_analyzing() {
        let mut page = DetectionPage::new();
        page.select_image(image("eye.jpg"));
        page.start_analysis();
        assert!(page.select_image(image("other.jpg")).is_none());
        assert_eq!(page.selected().unwrap().upload.file_name, "eye.jpg");
    }
}
