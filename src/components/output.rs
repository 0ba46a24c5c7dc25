//! Output pane.
//!
//! The sandbox library renders the live preview into the `#preview`
//! container; this component owns that container plus the compile
//! diagnostics list underneath it.

use leptos::prelude::*;

use crate::app::PlaygroundContext;

stylance::import_crate_style!(css, "src/components/output.module.css");

#[component]
pub fn OutputPane() -> impl IntoView {
    let ctx = use_context::<PlaygroundContext>().expect("PlaygroundContext must be provided");
    let store = ctx.store;
    let ready = ctx.ready;

    let errors = Memo::new(move |_| store.with(|s| s.errors.clone()));
    let show_diagnostics = store.with_untracked(|s| s.user_options.show_compile_output);

    view! {
        <section class=css::output>
            <Show when=move || !ready.get()>
                <div class=css::loading>"Loading compiler..."</div>
            </Show>
            <div class=css::preview id="preview"></div>
            <Show when=move || show_diagnostics && !errors.get().is_empty()>
                <div class=css::diagnostics>
                    {move || {
                        errors
                            .get()
                            .into_iter()
                            .map(|e| view! { <pre class=css::diagnostic>{e.0}</pre> })
                            .collect_view()
                    }}
                </div>
            </Show>
        </section>
    }
}
