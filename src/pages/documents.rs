use std::rc::Rc;

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, download_blob, open_blob, ApiClient};
use crate::icons;
use crate::models::{list_from_value, FileRecord};
use crate::pages::{error_alert, page_shell, use_api};

async fn load_file_history(
    api: Rc<ApiClient>,
    files: UseStateHandle<Vec<FileRecord>>,
    loading: UseStateHandle<bool>,
    error_msg: UseStateHandle<Option<String>>,
) {
    match api.get("/api/files/history").await {
        Ok(resp) if resp.ok() => {
            let value = resp.json::<serde_json::Value>().await.unwrap_or_default();
            files.set(list_from_value(value));
        }
        Ok(resp) => {
            let msg = api::error_detail(resp, "Could not load the file history.").await;
            error_msg.set(Some(msg));
        }
        Err(e) => {
            error!(format!("file history: {}", e));
            error_msg.set(Some(e.user_message()));
        }
    }
    loading.set(false);
}

/// Fetches a stored file's bytes and hands them to a consumption mode.
pub fn fetch_file_bytes(
    api: Rc<ApiClient>,
    file: &FileRecord,
    download: bool,
    error_msg: UseStateHandle<Option<String>>,
) {
    let path = if download {
        format!("/api/files/{}/download", file.id)
    } else {
        format!("/api/files/{}/view", file.id)
    };
    let filename = file.display_name();
    spawn_local(async move {
        match api.get(&path).await {
            Ok(resp) if resp.ok() => {
                if let Ok(bytes) = resp.binary().await {
                    if download {
                        download_blob(&bytes, "application/octet-stream", &filename);
                    } else {
                        open_blob(&bytes, "application/pdf");
                    }
                }
            }
            Ok(resp) => {
                let msg = api::error_detail(resp, "Could not fetch this file.").await;
                error_msg.set(Some(msg));
            }
            Err(e) => {
                error!(format!("file fetch: {}", e));
                error_msg.set(Some(e.user_message()));
            }
        }
    });
}

#[function_component(DocumentsPage)]
pub fn documents_page() -> Html {
    let api = use_api();

    let picked = use_state(|| None::<web_sys::File>);
    let analyzing = use_state(|| false);
    let form_error = use_state(|| None::<String>);
    let result = use_state(|| None::<serde_json::Value>);

    let files = use_state(Vec::<FileRecord>::new);
    let loading = use_state(|| true);
    let error_msg = use_state(|| None::<String>);

    {
        let api = api.clone();
        let files = files.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(load_file_history(api, files, loading, error_msg));
                || ()
            },
            (),
        );
    }

    let on_pick = {
        let picked = picked.clone();
        let form_error = form_error.clone();
        let result = result.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            form_error.set(None);
            result.set(None);
            picked.set(input.files().and_then(|list| list.get(0)));
        })
    };

    let on_analyze = {
        let api = api.clone();
        let picked = picked.clone();
        let analyzing = analyzing.clone();
        let form_error = form_error.clone();
        let result = result.clone();
        let files = files.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();

        Callback::from(move |_| {
            let Some(file) = (*picked).clone() else {
                form_error.set(Some("Pick a file first.".to_string()));
                return;
            };
            let Ok(form) = web_sys::FormData::new() else {
                return;
            };
            if form.append_with_blob("file", &file).is_err() {
                form_error.set(Some("Could not read the selected file.".to_string()));
                return;
            }

            form_error.set(None);
            result.set(None);
            analyzing.set(true);

            let api = api.clone();
            let analyzing = analyzing.clone();
            let form_error = form_error.clone();
            let result = result.clone();
            let files = files.clone();
            let loading = loading.clone();
            let error_msg = error_msg.clone();

            spawn_local(async move {
                match api.post_multipart("/api/analyze-file", form).await {
                    Ok(resp) if resp.ok() => {
                        let data = resp.json::<serde_json::Value>().await.unwrap_or_default();
                        result.set(Some(data));
                        spawn_local(load_file_history(api, files, loading, error_msg));
                    }
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "The analysis failed.").await;
                        form_error.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("analyze file: {}", e));
                        form_error.set(Some(e.user_message()));
                    }
                }
                analyzing.set(false);
            });
        })
    };

    page_shell(
        "Document analysis",
        html! {},
        html! {
            <>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-4">{"Upload a document"}</h3>
                        <label class="flex items-center gap-2 w-fit cursor-pointer bg-secondary text-secondary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                            { icons::icon_upload() }
                            <span>{"Choose a file"}</span>
                            <input type="file" accept=".pdf,.png,.jpg,.jpeg" class="hidden" onchange={on_pick} />
                        </label>
                        <p class="mt-3 text-sm text-muted-foreground">
                            { match &*picked {
                                Some(file) => file.name(),
                                None => "No file selected".to_string(),
                            }}
                        </p>
                        { if let Some(msg) = &*form_error {
                            html! { <div class="mt-3">{ error_alert(msg) }</div> }
                        } else { html!{} } }
                        <button onclick={on_analyze} disabled={*analyzing}
                            class="mt-4 bg-primary text-primary-foreground px-6 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                            { if *analyzing { "Analyzing..." } else { "Analyze" } }
                        </button>
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-4">{"Result"}</h3>
                        { match &*result {
                            None => html! { <p class="text-sm text-muted-foreground">{"No result yet."}</p> },
                            Some(data) => html! {
                                <pre class="bg-muted/40 rounded-lg p-4 text-xs text-foreground whitespace-pre-wrap break-words">
                                    { serde_json::to_string_pretty(data).unwrap_or_default() }
                                </pre>
                            },
                        }}
                    </div>
                </div>

                { if let Some(msg) = &*error_msg { error_alert(msg) } else { html!{} } }

                <div class="bg-card rounded-[10px] border border-border overflow-hidden">
                    <div class="p-4 border-b border-border flex items-center justify-between">
                        <h3 class="font-bold text-foreground">{"File history"}</h3>
                        <span class="text-xs text-muted-foreground">
                            { if *loading { "Loading...".to_string() } else { format!("{} file(s)", files.len()) } }
                        </span>
                    </div>
                    { if files.is_empty() && !*loading {
                        html! { <p class="p-4 text-sm text-muted-foreground">{"No analyzed files yet."}</p> }
                    } else {
                        html! {
                            <div class="divide-y divide-border">
                                { for files.iter().map(|file| {
                                    let on_view = {
                                        let api = api.clone();
                                        let file = file.clone();
                                        let error_msg = error_msg.clone();
                                        Callback::from(move |_| {
                                            fetch_file_bytes(api.clone(), &file, false, error_msg.clone())
                                        })
                                    };
                                    let on_download = {
                                        let api = api.clone();
                                        let file = file.clone();
                                        let error_msg = error_msg.clone();
                                        Callback::from(move |_| {
                                            fetch_file_bytes(api.clone(), &file, true, error_msg.clone())
                                        })
                                    };
                                    html! {
                                        <div key={file.id} class="p-4 flex items-center justify-between gap-4">
                                            <div>
                                                <p class="font-semibold text-sm text-foreground">{ file.display_name() }</p>
                                                <p class="text-xs text-muted-foreground">
                                                    { format!("{}{}",
                                                        file.file_type.clone().unwrap_or_else(|| "Document".to_string()),
                                                        file.amount.clone().map(|a| format!(" • {}", a)).unwrap_or_default()) }
                                                </p>
                                            </div>
                                            <div class="flex items-center gap-2">
                                                <span class="text-xs text-muted-foreground mr-2">{ file.created_at.clone().unwrap_or_default() }</span>
                                                <button onclick={on_view} title="View" class="p-2 rounded-lg hover:bg-muted text-foreground">{ icons::icon_eye() }</button>
                                                <button onclick={on_download} title="Download" class="p-2 rounded-lg hover:bg-muted text-foreground">{ icons::icon_download() }</button>
                                            </div>
                                        </div>
                                    }
                                }) }
                            </div>
                        }
                    }}
                </div>
            </>
        },
    )
}
