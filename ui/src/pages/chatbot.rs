//! Chatbot page: the assistant is a standalone page embedded full height

use leptos::prelude::*;
use vitahealth_core::chatbot_url;

/// Set `VITAHEALTH_CHATBOT_URL` when running `trunk build` to embed another
/// page; the browser has no config file, so the URL is fixed at build time.
pub fn configured_chatbot_url() -> &'static str {
    chatbot_url(option_env!("VITAHEALTH_CHATBOT_URL"))
}

#[component]
pub fn ChatbotPage() -> impl IntoView {
    view! {
        <div class="page">
            <iframe src=configured_chatbot_url() title="VitaHealth Assistant" class="chatbot-frame"></iframe>
        </div>
    }
}
