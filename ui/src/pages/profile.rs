//! Profile page

use crate::components::LoadingOverlay;
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use tracing::warn;
use vitahealth_core::flows::profile::{load_profile, ProfileFetch, ProfilePage as Page, DELETE_CONFIRMATION};
use vitahealth_core::types::RecordId;
use vitahealth_core::Backend;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let page = RwSignal::new(Option::<Page>::None);

    {
        let state = state.clone();
        spawn_local(async move {
            let session = state.session.get_untracked();
            match load_profile(&state.backend, &state.sessions(), &session).await {
                Ok(loaded) => page.set(Some(loaded)),
                Err(ProfileFetch::Expired { alert, redirect }) => {
                    if let Err(e) = window().alert_with_message(&alert) {
                        warn!(error = ?e, "Failed to show alert");
                    }
                    state.resync();
                    navigate(&redirect.path(), Default::default());
                }
                Err(_) => page.set(Some(Page::default())),
            }
        });
    }

    let on_delete = move |id: RecordId| {
        if !window().confirm_with_message(DELETE_CONFIRMATION).unwrap_or(false) {
            return;
        }
        let Some(token) = state.session.with_untracked(|s| s.token().map(str::to_string)) else {
            return;
        };

        // Gone from the list right away; not restored if the call fails
        page.update(|p| {
            if let Some(p) = p {
                p.remove_record(&id);
            }
        });

        let backend = state.backend.clone();
        spawn_local(async move {
            if let Err(e) = backend.delete_history(&token, &id).await {
                warn!(%id, error = %e, "Error deleting history record");
            }
        });
    };

    move || match page.get() {
        None => view! { <LoadingOverlay message="Loading your profile..." /> }.into_any(),
        Some(loaded) => {
            let on_delete = on_delete.clone();
            view! {
                <div class="page">
                    <h1>"My Profile"</h1>
                    <section class="card">
                        {match loaded.profile {
                            Some(profile) => view! {
                                <p><strong>"Name: "</strong>{format!("{} {}", profile.firstname, profile.lastname)}</p>
                                <p><strong>"Email: "</strong>{profile.email}</p>
                            }.into_any(),
                            None => view! { <p class="muted">"Profile details unavailable."</p> }.into_any(),
                        }}
                    </section>

                    <section class="card" style="margin-top: 1.5rem">
                        <h2>"Detection History"</h2>
                        {loaded
                            .history
                            .is_empty()
                            .then(|| view! { <p class="muted">"No detection history yet."</p> })}
                        {loaded
                            .history
                            .iter()
                            .map(|record| {
                                let on_delete = on_delete.clone();
                                let id = record.id.clone();
                                let deletable = !id.is_missing();
                                let planner = Page::planner_route(record).path();
                                view! {
                                    <div class="history-item">
                                        <div>
                                            <strong>{record.summary()}</strong>
                                            <p class="muted">{record.timestamp.clone().unwrap_or_default()}</p>
                                        </div>
                                        <div>
                                            <a href=planner class="nav-link active">"View Planner"</a>
                                            {deletable.then(|| view! {
                                                <button class="btn btn-danger" on:click=move |_| on_delete(id.clone())>
                                                    "Delete"
                                                </button>
                                            })}
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </section>
                </div>
            }
            .into_any()
        }
    }
}
