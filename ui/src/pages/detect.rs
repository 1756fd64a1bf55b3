//! Detection page

use crate::components::{LoadingSpinner, ModalDialog};
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;
use vitahealth_core::flows::detection::{save_detection_best_effort, DetectionPage, SelectedImage};
use vitahealth_core::types::ImageUpload;
use vitahealth_core::Backend;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement, Url};

async fn read_file(file: File) -> Result<SelectedImage, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let preview = Url::create_object_url_with_blob(&file).ok();

    Ok(SelectedImage {
        upload: ImageUpload {
            file_name: file.name(),
            mime_type: file.type_(),
            bytes,
        },
        preview,
    })
}

fn release_preview(image: Option<SelectedImage>) {
    if let Some(url) = image.and_then(|image| image.preview) {
        if let Err(e) = Url::revoke_object_url(&url) {
            warn!(error = ?e, "Failed to revoke preview URL");
        }
    }
}

#[component]
pub fn DetectPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let page = RwSignal::new(DetectionPage::new());

    on_cleanup(move || {
        if let Some(image) = page.try_with_untracked(|p| p.selected().cloned()).flatten() {
            release_preview(Some(image));
        }
    });

    let on_file = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        spawn_local(async move {
            match read_file(file).await {
                Ok(image) => {
                    // Discards the previous image and result
                    let discarded = page.try_update(|p| p.select_image(image)).flatten();
                    release_preview(discarded);
                }
                Err(e) => warn!(error = ?e, "Failed to read selected file"),
            }
        });
    };

    let on_analyze = move |_| {
        let Some(upload) = page.try_update(|p| p.start_analysis()).flatten() else {
            return;
        };
        let backend = state.backend.clone();
        let session = state.session.get_untracked();

        spawn_local(async move {
            let outcome = backend.predict(&upload).await;
            if let Some(result) = page.try_update(|p| p.finish_analysis(outcome)).flatten() {
                save_detection_best_effort(&backend, &session, &result).await;
            }
        });
    };

    let is_analyzing = move || page.with(|p| p.is_analyzing());
    let preview = move || page.with(|p| p.selected().and_then(|image| image.preview.clone()));
    let modal = Signal::derive(move || page.with(|p| p.modal().cloned()));

    let result = move || {
        page.with(|p| {
            let result = p.result()?.clone();
            let planner = p.planner_route()?.path();
            Some(view! {
                <section class="card" style="margin-top: 1.5rem">
                    <h2>"Detection Result"</h2>
                    <div class="result-grid">
                        <div>
                            <p class="muted">"Disease"</p>
                            <h3>{result.disease.clone()}</h3>
                        </div>
                        <div>
                            <p class="muted">"Deficiency"</p>
                            <h3>{result.deficiency.clone()}</h3>
                        </div>
                        <div>
                            <p class="muted">"Confidence"</p>
                            <h3>{result.confidence_percent()}</h3>
                        </div>
                    </div>
                    <a href=planner class="btn btn-primary">"View Diet Plan"</a>
                </section>
            })
        })
    };

    view! {
        <div class="page">
            <h1>"Deficiency Detection"</h1>
            <p class="muted">"Upload a clear photo of the affected area to analyze it."</p>

            <section class="card">
                <input type="file" accept="image/*" on:change=on_file disabled=is_analyzing />
                {move || preview().map(|src| view! {
                    <div style="margin-top: 1rem">
                        <img src=src alt="Selected image" class="preview" />
                    </div>
                })}
                <div style="margin-top: 1rem">
                    <button class="btn btn-primary" on:click=on_analyze disabled=is_analyzing>
                        <Show when=is_analyzing>
                            <LoadingSpinner />
                        </Show>
                        {move || if is_analyzing() { "Analyzing..." } else { "Detect Deficiency" }}
                    </button>
                </div>
            </section>

            {result}

            <ModalDialog modal=modal on_close=move |_| page.update(|p| p.close_modal()) />
        </div>
    }
}
