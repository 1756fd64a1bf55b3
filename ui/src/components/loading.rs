//! Loading indicators

use leptos::prelude::*;

/// Inline spinner for buttons
#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! { <span class="spinner"></span> }
}

/// Full-page loading state
#[component]
pub fn LoadingOverlay(
    #[prop(default = "Loading...")] message: &'static str,
) -> impl IntoView {
    view! {
        <div class="page" style="text-align: center">
            <p class="muted">{message}</p>
        </div>
    }
}
