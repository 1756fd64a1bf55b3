//! Registration page

use crate::components::{LoadingSpinner, ModalDialog};
use crate::state::AppState;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use vitahealth_core::flows::register::{submit_registration, RegisterForm, RegisterOutcome};
use vitahealth_core::flows::Modal;

/// Delay before leaving the page after a successful registration
const REDIRECT_DELAY_MS: u32 = 1500;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let firstname = RwSignal::new(String::new());
    let lastname = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let modal = RwSignal::new(Option::<Modal>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = RegisterForm {
            firstname: firstname.get_untracked(),
            lastname: lastname.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let backend = state.backend.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            is_loading.set(true);
            let outcome = submit_registration(&backend, &form).await;
            is_loading.set(false);

            match outcome {
                RegisterOutcome::Registered { modal: success, redirect } => {
                    modal.set(Some(success));
                    Timeout::new(REDIRECT_DELAY_MS, move || {
                        navigate(&redirect.path(), Default::default());
                    })
                    .forget();
                }
                RegisterOutcome::Rejected(rejected) => modal.set(Some(rejected)),
            }
        });
    };

    let field = |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    class="input"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <div class="page" style="max-width: 28rem">
            <div class="card">
                <h1>"Create Account"</h1>
                <p class="muted">"Register to start your screening"</p>

                <form on:submit=on_submit class="form">
                    {field("First name", "text", firstname)}
                    {field("Last name", "text", lastname)}
                    {field("Email", "email", email)}
                    {field("Password", "password", password)}
                    <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                        <Show when=move || is_loading.get()>
                            <LoadingSpinner />
                        </Show>
                        "Register"
                    </button>
                </form>

                <p class="muted">
                    "Already have an account? "
                    <a href="/login" class="nav-link active">"Login"</a>
                </p>
            </div>
            <ModalDialog modal=modal on_close=move |_| modal.set(None) />
        </div>
    }
}
