//! Home/landing page

use crate::state::AppState;
use leptos::prelude::*;
use vitahealth_core::routes::Route;

const HIGHLIGHTS: &[(&str, &str)] = &[
    ("Vitamin Detection", "Deficiency screening from a single photo."),
    ("Disease Insights", "Understand the condition behind a result and how to prevent it."),
    ("Diet Planner", "A day-by-day meal plan matched to your detected deficiency."),
];

/// Home page with hero section
#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_auth = Signal::derive(move || state.is_authenticated());
    let cta = move || {
        if is_auth.get() {
            (Route::Detect.path(), "Start Detection")
        } else {
            (Route::Register.path(), "Get Started")
        }
    };

    view! {
        <div class="page">
            <section style="text-align: center; padding: 3rem 0">
                <h1>"Know what your body is missing"</h1>
                <p class="muted">
                    "VitaHealth screens for vitamin and mineral deficiencies and turns the result into a plan you can follow."
                </p>
                <a href=move || cta().0 class="btn btn-primary">{move || cta().1}</a>
            </section>

            <section class="result-grid">
                {HIGHLIGHTS
                    .iter()
                    .map(|(title, desc)| view! {
                        <div class="card">
                            <h3>{*title}</h3>
                            <p class="muted">{*desc}</p>
                        </div>
                    })
                    .collect_view()}
            </section>

            <footer class="muted" style="margin-top: 3rem; text-align: center; font-size: 0.85rem">
                "This tool provides general health insights and is not a substitute for professional medical advice."
            </footer>
        </div>
    }
}
