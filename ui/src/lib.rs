//! VitaHealth web frontend
//!
//! Leptos CSR app over the page controllers in `vitahealth-core`.

pub mod api;
pub mod components;
pub mod pages;
pub mod state;
pub mod storage;

use leptos::ev;
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use components::{Guarded, Navbar};
use pages::{
    about::AboutPage, chatbot::ChatbotPage, detect::DetectPage, features::FeaturesPage,
    home::HomePage, login::LoginPage, planner::PlannerPage, profile::ProfilePage,
    register::RegisterPage,
};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Initialize global state
    let app_state = AppState::new();
    provide_context(app_state.clone());

    // Same-tab writes dispatch `storage` too, so one listener covers both
    let handle = window_event_listener(ev::storage, move |_| app_state.resync());
    on_cleanup(move || handle.remove());

    view! {
        <Title text="VitaHealth" />
        <Router>
            <Navbar />
            <main>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/home") view=HomePage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/features") view=FeaturesPage />
                    <Route path=path!("/about") view=AboutPage />
                    <Route path=path!("/chatbot") view=ChatbotPage />
                    <Route
                        path=path!("/detect")
                        view=|| view! { <Guarded><DetectPage /></Guarded> }
                    />
                    <Route
                        path=path!("/planner/:vitamin")
                        view=|| view! { <Guarded><PlannerPage /></Guarded> }
                    />
                    <Route
                        path=path!("/profile")
                        view=|| view! { <Guarded><ProfilePage /></Guarded> }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page" style="text-align: center">
            <h1 style="font-size: 4rem" class="muted">"404"</h1>
            <p class="muted">"Page not found"</p>
            <a href="/" class="btn btn-primary">"Go Home"</a>
        </div>
    }
}
