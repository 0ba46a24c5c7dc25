//! Toolbar component.
//!
//! Hosts the version pickers, the nightly toggle, the CDN provider
//! selection, and the share/download actions.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::PlaygroundContext;
use crate::components::icons as ic;
use crate::core::dependency::{
    supported_element_plus_versions, supported_versions, supported_vue_versions,
};
use crate::models::{CdnProvider, VersionKey};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/toolbar.module.css");

/// Top toolbar with toolchain controls and project actions.
#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<PlaygroundContext>().expect("PlaygroundContext must be provided");
    let store = ctx.store;

    let nightly = Memo::new(move |_| store.with(|s| s.nightly));
    let provider = Memo::new(move |_| store.with(|s| s.provider));

    let on_nightly = {
        let ctx = ctx.clone();
        move |ev: leptos::ev::Event| {
            ctx.toggle_nightly(event_target_checked(&ev));
        }
    };
    let on_provider = {
        let ctx = ctx.clone();
        move |ev: leptos::ev::Event| {
            if let Some(provider) = CdnProvider::from_id(&event_target_value(&ev)) {
                ctx.set_provider(provider);
            }
        }
    };
    let on_share = {
        let ctx = ctx.clone();
        move |_: leptos::ev::MouseEvent| ctx.share()
    };
    let on_download = {
        let ctx = ctx.clone();
        move |_: leptos::ev::MouseEvent| ctx.download()
    };

    view! {
        <nav class=css::toolbar>
            <h1 class=css::title>"Element Plus Playground"</h1>

            <div class=css::pickers>
                {VersionKey::ALL
                    .iter()
                    .map(|key| view! { <VersionPicker key=*key /> })
                    .collect_view()}

                <label class=css::toggle>
                    <input
                        type="checkbox"
                        prop:checked=move || nightly.get()
                        on:change=on_nightly
                    />
                    "nightly"
                </label>

                <label class=css::picker>
                    <span class=css::pickerLabel>"CDN"</span>
                    <select class=css::select on:change=on_provider>
                        {move || {
                            let current = provider.get();
                            CdnProvider::ALL
                                .iter()
                                .map(|p| {
                                    view! {
                                        <option value=p.id() selected=*p == current>
                                            {p.id()}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
            </div>

            <div class=css::actions>
                <button class=css::iconButton title="Copy share link" on:click=on_share>
                    <Icon icon=ic::SHARE />
                </button>
                <button class=css::iconButton title="Download project" on:click=on_download>
                    <Icon icon=ic::DOWNLOAD />
                </button>
            </div>
        </nav>
    }
}

/// Version dropdown for one library.
///
/// The version list loads lazily from the registry; until it arrives the
/// dropdown offers only "latest". The Element Plus list is refetched when
/// the nightly toggle flips, since nightly builds live under a different
/// package.
#[component]
fn VersionPicker(key: VersionKey) -> impl IntoView {
    let ctx = use_context::<PlaygroundContext>().expect("PlaygroundContext must be provided");
    let store = ctx.store;

    let versions = RwSignal::new(Vec::<String>::new());
    let nightly = Memo::new(move |_| store.with(|s| s.nightly));
    let selected = Memo::new(move |_| store.with(|s| s.versions.get(key).to_string()));

    Effect::new(move |prev: Option<()>| {
        let nightly = nightly.get();
        // Only the Element Plus list depends on the nightly flag
        if prev.is_some() && key != VersionKey::ElementPlus {
            return;
        }
        spawn_local(async move {
            let result = match key {
                VersionKey::Vue => supported_vue_versions().await,
                VersionKey::ElementPlus => supported_element_plus_versions(nightly).await,
                _ => supported_versions(key.package()).await,
            };
            match result {
                Ok(list) => versions.set(list),
                Err(e) => {
                    dom::console_warn(&format!("failed to load {} versions: {e}", key.label()));
                }
            }
        });
    });

    let on_change = move |ev: leptos::ev::Event| {
        ctx.set_version(key, event_target_value(&ev));
    };

    view! {
        <label class=css::picker>
            <span class=css::pickerLabel>{key.label()}</span>
            <select class=css::select on:change=on_change>
                {move || {
                    let current = selected.get();
                    std::iter::once("latest".to_string())
                        .chain(versions.get())
                        .map(|v| {
                            let is_selected = v == current;
                            view! {
                                <option value=v.clone() selected=is_selected>
                                    {v.clone()}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}
