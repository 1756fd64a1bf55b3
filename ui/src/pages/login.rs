//! Login page

use crate::components::{LoadingSpinner, ModalDialog};
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use vitahealth_core::flows::login::{submit_login, LoginForm, LoginOutcome};
use vitahealth_core::flows::Modal;

/// Login page
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let modal = RwSignal::new(Option::<Modal>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let state = state.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            is_loading.set(true);
            let outcome = submit_login(&state.backend, &state.sessions(), &form).await;
            is_loading.set(false);

            match outcome {
                LoginOutcome::LoggedIn { session, redirect } => {
                    state.session.set(session);
                    navigate(&redirect.path(), Default::default());
                }
                LoginOutcome::Rejected(rejected) => modal.set(Some(rejected)),
            }
        });
    };

    view! {
        <div class="page" style="max-width: 28rem">
            <div class="card">
                <h1>"Welcome Back"</h1>
                <p class="muted">"Sign in to continue"</p>

                <form on:submit=on_submit class="form">
                    <label>
                        "Email"
                        <input
                            type="email"
                            class="input"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Password"
                        <input
                            type="password"
                            class="input"
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                        <Show when=move || is_loading.get()>
                            <LoadingSpinner />
                        </Show>
                        "Login"
                    </button>
                </form>

                <p class="muted">
                    "Don't have an account? "
                    <a href="/register" class="nav-link active">"Register"</a>
                </p>
            </div>
            <ModalDialog modal=modal on_close=move |_| modal.set(None) />
        </div>
    }
}
