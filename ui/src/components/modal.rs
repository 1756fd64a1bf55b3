//! Blocking message dialog

use leptos::prelude::*;
use vitahealth_core::flows::{Modal, Tone};

/// Shows `modal` when set; the close button calls `on_close`.
#[component]
pub fn ModalDialog(
    #[prop(into)] modal: Signal<Option<Modal>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    move || {
        modal.get().map(|modal| {
            let tone = match modal.tone {
                Tone::Success => "success",
                Tone::Warning => "warning",
                Tone::Error => "error",
            };
            view! {
                <div class="modal-backdrop">
                    <div class=format!("card modal {}", tone)>
                        <h3>{modal.title}</h3>
                        <p>{modal.message}</p>
                        <button class="btn btn-primary" on:click=move |_| on_close.run(())>
                            "Close"
                        </button>
                    </div>
                </div>
            }
        })
    }
}
