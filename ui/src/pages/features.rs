//! Features page

use leptos::prelude::*;

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "AI Deficiency Detection",
        "Upload a photo of skin, nails or tongue and get a likely deficiency with the model's confidence.",
        "/detect",
    ),
    (
        "Personalized Planner",
        "A meal plan tailored to the detected deficiency, with daily progress tracking.",
        "/detect",
    ),
    (
        "Nutritional Insights",
        "Short facts about each nutrient, its food sources and what a deficiency does.",
        "/about",
    ),
    (
        "Health History",
        "Every detection is saved to your profile so you can follow trends over time.",
        "/profile",
    ),
];

#[component]
pub fn FeaturesPage() -> impl IntoView {
    view! {
        <div class="page">
            <p class="muted">"Core Services"</p>
            <h1>"Everything you need to close the gap"</h1>
            <div class="day-grid">
                {FEATURES
                    .iter()
                    .map(|(title, desc, href)| view! {
                        <div class="card">
                            <h3>{*title}</h3>
                            <p class="muted">{*desc}</p>
                            <a href=*href class="nav-link active">"Learn more"</a>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
