//! Planner page

use crate::components::LoadingOverlay;
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use tracing::error;
use vitahealth_core::flows::planner::{load_planner, PlannerBoard, PlannerView};
use vitahealth_core::routes::Route;
use vitahealth_core::types::PlanDay;
use vitahealth_core::Backend;

fn meal_class(meal_type: &str) -> &'static str {
    match meal_type.to_ascii_lowercase().as_str() {
        "breakfast" => "meal meal-breakfast",
        "lunch" => "meal meal-lunch",
        "dinner" => "meal meal-dinner",
        "snack" => "meal meal-snack",
        _ => "meal meal-other",
    }
}

#[component]
pub fn PlannerPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let params = use_params_map();
    let vitamin = Memo::new(move |_| params.read().get("vitamin").unwrap_or_default());
    let view_state = RwSignal::new(PlannerView::Loading);

    // Load on entry and whenever the key in the URL changes
    {
        let state = state.clone();
        Effect::new(move |_| {
            let vitamin = vitamin.get();
            let session = state.session.get_untracked();
            let backend = state.backend.clone();
            let progress = state.progress();
            view_state.set(PlannerView::Loading);

            spawn_local(async move {
                let loaded = load_planner(&backend, &progress, &session, &vitamin).await;
                view_state.set(loaded);
            });
        });
    }

    // Progress written elsewhere (another view or tab)
    {
        let state = state.clone();
        Effect::new(move |_| {
            state.storage_version.track();
            let progress = state.progress();
            view_state.update(|view| {
                if let PlannerView::Ready(board) = view {
                    board.refresh_progress(&progress);
                }
            });
        });
    }

    let toggle = {
        let state = state.clone();
        move |day: String, done: bool| {
            let progress = state.progress();
            view_state.update(|view| {
                if let PlannerView::Ready(board) = view {
                    if let Err(e) = board.toggle_day(&progress, &day, done) {
                        error!(error = %e, day, "Failed to save planner progress");
                    }
                }
            });
        }
    };

    let report_url = move || state.backend.report_url(&vitamin.get());

    move || match view_state.get() {
        PlannerView::Loading => view! { <LoadingOverlay message="Loading your planner..." /> }.into_any(),
        PlannerView::NoActivePlanner => view! { <NoActivePlanner /> }.into_any(),
        PlannerView::Ready(board) => {
            let toggle = toggle.clone();
            let report = report_url.clone();
            view! { <Board board=board toggle=toggle report_url=report() /> }.into_any()
        }
    }
}

#[component]
fn NoActivePlanner() -> impl IntoView {
    view! {
        <div class="page" style="text-align: center">
            <div class="card">
                <h2>"No Active Planner Available"</h2>
                <p class="muted">
                    "Run a deficiency detection first. Your personalized plan unlocks once a matching result is in your history."
                </p>
                <a href=Route::Detect.path() class="btn btn-primary">"Start Deficiency Detection"</a>
            </div>
        </div>
    }
}

#[component]
fn Board<F>(board: PlannerBoard, toggle: F, report_url: String) -> impl IntoView
where
    F: Fn(String, bool) + Clone + Send + Sync + 'static,
{
    let percent = board.percentage();
    let days: Vec<(PlanDay, bool)> = board
        .days()
        .iter()
        .map(|day| (day.clone(), board.is_done(&day.day)))
        .collect();

    view! {
        <div class="page">
            <h1>{format!("{} Diet Planner", board.vitamin())}</h1>
            {(!board.fact().is_empty()).then(|| view! { <p class="card muted">{board.fact().to_string()}</p> })}

            <section style="margin: 1.5rem 0">
                <p>
                    {format!("{}% complete ({}/{} days)", percent, board.completed_days(), board.total_days())}
                </p>
                <div class="progress-track">
                    <div class="progress-fill" style=format!("width: {}%", percent)></div>
                </div>
            </section>

            <div class="day-grid">
                {days
                    .into_iter()
                    .map(|(day, done)| {
                        let toggle = toggle.clone();
                        let label = day.day.clone();
                        view! {
                            <div class=if done { "card day-card done" } else { "card day-card" }>
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=done
                                        on:change=move |_| toggle(label.clone(), !done)
                                    />
                                    <strong>{day.day.clone()}</strong>
                                </label>
                                {day
                                    .meals
                                    .into_iter()
                                    .map(|meal| view! {
                                        <div class=meal_class(&meal.meal_type)>
                                            <strong>{meal.meal_type}</strong>": "{meal.food}
                                        </div>
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <a href=report_url target="_blank" rel="noopener" class="btn btn-primary" style="margin-top: 1.5rem">
                "Download Full PDF Report"
            </a>
        </div>
    }
}
