//! Route guard wrapper

use crate::state::AppState;
use crate::storage::LocalStore;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;
use vitahealth_core::routes::{guard, GuardOutcome, Route};

/// Renders its children when a token is stored, otherwise redirects to login.
///
/// Re-evaluated only when the authenticated flag flips, so logging out in
/// another tab sends this one to the login page while unrelated storage
/// writes leave the mounted page alone.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppState>();
    let location = use_location();
    let authenticated = Memo::new(move |_| state.session.with(|s| s.is_authenticated()));

    move || {
        authenticated.track();
        let destination = Route::parse(&location.pathname.get_untracked());
        match guard(destination, &LocalStore) {
            GuardOutcome::Allow(_) => children().into_any(),
            GuardOutcome::Redirect(to) => view! { <Redirect path=to.path() /> }.into_any(),
        }
    }
}
