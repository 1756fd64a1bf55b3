//! Navigation bar
//!
//! Public chrome for anonymous visitors, dashboard chrome with a user menu
//! once a token is stored.

use crate::state::AppState;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use vitahealth_core::routes::{nav_links, Route};

/// Main application navbar
#[component]
pub fn Navbar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let location = use_location();
    let navigate = use_navigate();
    let menu_open = RwSignal::new(false);

    let links = {
        let state = state.clone();
        move || {
            let current = location.pathname.get();
            state.session.with(|session| {
                nav_links(session)
                    .iter()
                    .map(|link| {
                        let class = match (link.primary, link.is_active(&current)) {
                            (true, _) => "btn btn-primary",
                            (false, true) => "nav-link active",
                            (false, false) => "nav-link",
                        };
                        view! { <a href=link.path class=class>{link.label}</a> }
                    })
                    .collect_view()
            })
        }
    };

    let user_menu = move || {
        if !state.is_authenticated() {
            return None;
        }
        let name = state.session.with(|s| s.display_name().to_string());
        let state = state.clone();
        let navigate = navigate.clone();
        Some(view! {
            <div class="user-menu">
                <button class="btn btn-ghost" on:click=move |_| menu_open.update(|open| *open = !*open)>
                    {name}
                </button>
                <Show when=move || menu_open.get()>
                    <div class="user-menu-items">
                        <a href=Route::Profile.path() on:click=move |_| menu_open.set(false)>
                            "Profile"
                        </a>
                        <button on:click={
                            let state = state.clone();
                            let navigate = navigate.clone();
                            move |_| {
                                menu_open.set(false);
                                state.logout();
                                navigate("/home", Default::default());
                            }
                        }>
                            "Logout"
                        </button>
                    </div>
                </Show>
            </div>
        })
    };

    view! {
        <nav class="navbar">
            <a href="/" class="brand">"VitaHealth"</a>
            <div class="nav-links">
                {links}
                {user_menu}
            </div>
        </nav>
    }
}
