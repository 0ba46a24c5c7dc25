//! Editor component.
//!
//! File tab bar over a plain-text source editor. Tabs cover the visible
//! project files; double-click renames, the close button deletes, and the
//! trailing "+" creates a new file.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::PlaygroundContext;
use crate::components::icons as ic;
use crate::config::{PROTECTED_FILES, SRC_PREFIX};
use crate::models::VirtualFile;

stylance::import_crate_style!(css, "src/components/editor.module.css");

/// Paths typed into the new-file and rename prompts get the project source
/// prefix when they carry no directory of their own.
fn qualify(path: &str) -> String {
    if path.contains('/') {
        path.to_string()
    } else {
        format!("{SRC_PREFIX}{path}")
    }
}

#[component]
pub fn Editor() -> impl IntoView {
    let ctx = use_context::<PlaygroundContext>().expect("PlaygroundContext must be provided");
    let store = ctx.store;

    let files = Memo::new(move |_| {
        store.with(|s| s.visible_files().cloned().collect::<Vec<VirtualFile>>())
    });
    let active = Memo::new(move |_| store.with(|s| s.active_path().to_string()));
    let content = Memo::new(move |_| {
        store.with(|s| {
            s.active_file()
                .map(|f| f.content.clone())
                .unwrap_or_default()
        })
    });

    let on_add = {
        let ctx = ctx.clone();
        move |_: leptos::ev::MouseEvent| {
            if let Some(name) = crate::utils::dom::prompt("New file name", "Component.vue") {
                let name = name.trim();
                if !name.is_empty() {
                    ctx.add_file(&qualify(name));
                }
            }
        }
    };
    let on_input = {
        let ctx = ctx.clone();
        move |ev: leptos::ev::Event| {
            ctx.update_active_content(&event_target_value(&ev));
        }
    };

    view! {
        <section class=css::editor>
            <div class=css::tabs>
                {move || {
                    let active = active.get();
                    files
                        .get()
                        .into_iter()
                        .map(|file| {
                            let is_active = file.path == active;
                            view! { <FileTab file=file is_active=is_active /> }
                        })
                        .collect_view()
                }}
                <button class=css::addButton title="New file" on:click=on_add>
                    <Icon icon=ic::PLUS />
                </button>
            </div>
            <textarea
                class=css::code
                spellcheck="false"
                autocomplete="off"
                prop:value=move || content.get()
                on:input=on_input
            ></textarea>
        </section>
    }
}

/// A single file tab.
#[component]
fn FileTab(file: VirtualFile, is_active: bool) -> impl IntoView {
    let ctx = use_context::<PlaygroundContext>().expect("PlaygroundContext must be provided");

    let path = file.path.clone();
    let display = file.display_name().to_string();
    let protected = PROTECTED_FILES.contains(&path.as_str());

    let class = if is_active {
        format!("{} {}", css::tab, css::tabActive)
    } else {
        css::tab.to_string()
    };

    let on_select = {
        let ctx = ctx.clone();
        let path = path.clone();
        move |_: leptos::ev::MouseEvent| ctx.set_active(&path)
    };
    let on_rename = {
        let ctx = ctx.clone();
        let path = path.clone();
        let display = display.clone();
        move |_: leptos::ev::MouseEvent| {
            if protected {
                return;
            }
            if let Some(name) = crate::utils::dom::prompt("Rename file", &display) {
                let name = name.trim();
                if !name.is_empty() {
                    ctx.rename_file(&path, &qualify(name));
                }
            }
        }
    };
    let on_delete = {
        let ctx = ctx.clone();
        let path = path.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            ctx.delete_file(&path);
        }
    };

    view! {
        <div class=class on:click=on_select on:dblclick=on_rename>
            <span class=css::tabLabel>{display}</span>
            {(!protected)
                .then(|| {
                    view! {
                        <button class=css::closeButton title="Delete file" on:click=on_delete>
                            <Icon icon=ic::CLOSE />
                        </button>
                    }
                })}
        </div>
    }
}
