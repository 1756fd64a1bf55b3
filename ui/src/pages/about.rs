//! About page

use leptos::prelude::*;

const PILLARS: &[(&str, &str)] = &[
    (
        "AI-Powered Accuracy",
        "Models trained on curated image sets give quick, non-invasive predictions.",
    ),
    (
        "Evidence-Based Planning",
        "Meal plans follow current dietary recommendations for reversing each deficiency.",
    ),
    (
        "Health Accessibility",
        "Preliminary nutritional screening should be affordable and available to everyone.",
    ),
];

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page">
            <h1>"About VitaHealth"</h1>
            <section class="card">
                <h2>"Our Mission"</h2>
                <p>
                    "We help people spot nutritional deficiencies early and act on them with practical, food-first plans."
                </p>
            </section>
            <h2 style="text-align: center">"Our Core Pillars"</h2>
            <div class="result-grid">
                {PILLARS
                    .iter()
                    .map(|(title, desc)| view! {
                        <div class="card">
                            <h3>{*title}</h3>
                            <p class="muted">{*desc}</p>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
