use std::cell::RefCell;
use std::rc::Rc;

use gloo_console::error;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiClient};
use crate::icons;
use crate::models::{list_from_value, FileRecord, TenantDetail, TenantSummary};
use crate::pages::documents::fetch_file_bytes;
use crate::pages::{error_alert, page_shell, use_api};
use crate::reconcile::{doc_label, missing_count, normalize_file_ids, partition_files, stale_ids};

/// Pending confirmation before a destructive action on the open dossier.
#[derive(Clone, Copy, PartialEq)]
enum Confirm {
    Unlink(i64),
    DeleteFile(i64),
    DeleteTenant(i64),
}

/// The dossier to open after a list (re)load: the first one, unless a dossier
/// is already open.
fn auto_select_target(current: Option<i64>, tenants: &[TenantSummary]) -> Option<i64> {
    if current.is_some() {
        return None;
    }
    tenants.first().map(|t| t.id)
}

async fn load_tenants(
    api: Rc<ApiClient>,
    tenants: UseStateHandle<Vec<TenantSummary>>,
    loading: UseStateHandle<bool>,
    error_msg: UseStateHandle<Option<String>>,
    current: Option<i64>,
    select: Callback<i64>,
) {
    match api.get("/tenant-files").await {
        Ok(resp) if resp.ok() => {
            let value = resp.json::<serde_json::Value>().await.unwrap_or_default();
            let list: Vec<TenantSummary> = list_from_value(value);
            if let Some(id) = auto_select_target(current, &list) {
                select.emit(id);
            }
            tenants.set(list);
        }
        Ok(resp) => {
            let msg = api::error_detail(resp, "Could not load the dossiers.").await;
            error_msg.set(Some(msg));
        }
        Err(e) => {
            error!(format!("tenant list: {}", e));
            error_msg.set(Some(e.user_message()));
        }
    }
    loading.set(false);
}

/// Loads one dossier. The response is only applied while `generation` is still
/// the latest issued request, so a slow older fetch never overwrites a newer one.
async fn load_detail(
    api: Rc<ApiClient>,
    tenant_id: i64,
    generation: u64,
    latest: Rc<RefCell<u64>>,
    detail: UseStateHandle<Option<TenantDetail>>,
    error_msg: UseStateHandle<Option<String>>,
) {
    match api.get(&format!("/tenant-files/{}", tenant_id)).await {
        Ok(resp) if resp.ok() => {
            if let Ok(data) = resp.json::<TenantDetail>().await {
                if *latest.borrow() == generation {
                    detail.set(Some(data));
                }
            }
        }
        Ok(resp) => {
            let msg = api::error_detail(resp, "Could not load this dossier.").await;
            if *latest.borrow() == generation {
                error_msg.set(Some(msg));
            }
        }
        Err(e) => {
            error!(format!("tenant detail: {}", e));
            if *latest.borrow() == generation {
                error_msg.set(Some(e.user_message()));
            }
        }
    }
}

async fn load_file_pool(
    api: Rc<ApiClient>,
    files: UseStateHandle<Vec<FileRecord>>,
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
            error!(format!("file pool: {}", e));
            error_msg.set(Some(e.user_message()));
        }
    }
}

fn status_badge(status: &str) -> Html {
    let class = match status {
        "complet" | "complete" => "bg-emerald-500/10 text-emerald-600",
        "incomplet" | "incomplete" => "bg-amber-500/10 text-amber-600",
        _ => "bg-muted text-muted-foreground",
    };
    html! {
        <span class={format!("px-2 py-0.5 rounded-full text-xs font-bold {}", class)}>
            { status.to_string() }
        </span>
    }
}

#[function_component(TenantsPage)]
pub fn tenants_page() -> Html {
    let api = use_api();

    let tenants = use_state(Vec::<TenantSummary>::new);
    let list_loading = use_state(|| true);
    let detail = use_state(|| None::<TenantDetail>);
    let selected_id = use_state(|| None::<i64>);
    let generation = use_mut_ref(|| 0u64);

    let file_pool = use_state(Vec::<FileRecord>::new);
    let error_msg = use_state(|| None::<String>);

    let new_email = use_state(String::new);
    let creating = use_state(|| false);
    let attach_choice = use_state(String::new);
    let busy = use_state(|| false);
    let upload_msg = use_state(|| None::<String>);
    let confirm = use_state(|| None::<Confirm>);

    let select_tenant = {
        let api = api.clone();
        let detail = detail.clone();
        let selected_id = selected_id.clone();
        let generation = generation.clone();
        let error_msg = error_msg.clone();
        let upload_msg = upload_msg.clone();
        Callback::from(move |id: i64| {
            selected_id.set(Some(id));
            upload_msg.set(None);
            let gen = {
                let mut latest = generation.borrow_mut();
                *latest += 1;
                *latest
            };
            spawn_local(load_detail(
                api.clone(),
                id,
                gen,
                generation.clone(),
                detail.clone(),
                error_msg.clone(),
            ));
        })
    };

    let refresh_detail = {
        let select_tenant = select_tenant.clone();
        let selected_id = selected_id.clone();
        Callback::from(move |_: ()| {
            if let Some(id) = *selected_id {
                select_tenant.emit(id);
            }
        })
    };

    {
        let api = api.clone();
        let tenants = tenants.clone();
        let list_loading = list_loading.clone();
        let file_pool = file_pool.clone();
        let error_msg = error_msg.clone();
        let select_tenant = select_tenant.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(load_tenants(
                    api.clone(),
                    tenants,
                    list_loading,
                    error_msg.clone(),
                    None,
                    select_tenant,
                ));
                spawn_local(load_file_pool(api, file_pool, error_msg));
                || ()
            },
            (),
        );
    }

    let on_create = {
        let api = api.clone();
        let new_email = new_email.clone();
        let creating = creating.clone();
        let tenants = tenants.clone();
        let list_loading = list_loading.clone();
        let error_msg = error_msg.clone();
        let select_tenant = select_tenant.clone();
        let selected_id = selected_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email = new_email.trim().to_string();
            if email.is_empty() {
                error_msg.set(Some("Enter the candidate's email address.".to_string()));
                return;
            }
            creating.set(true);
            error_msg.set(None);
            let current = *selected_id;

            let api = api.clone();
            let new_email = new_email.clone();
            let creating = creating.clone();
            let tenants = tenants.clone();
            let list_loading = list_loading.clone();
            let error_msg = error_msg.clone();
            let select_tenant = select_tenant.clone();
            spawn_local(async move {
                match api
                    .post_json("/tenant-files", json!({ "candidate_email": email }))
                    .await
                {
                    Ok(resp) if resp.ok() => {
                        new_email.set(String::new());
                        let mut current = current;
                        if let Ok(created) = resp.json::<TenantDetail>().await {
                            current = Some(created.id);
                            select_tenant.emit(created.id);
                        }
                        load_tenants(
                            api,
                            tenants,
                            list_loading,
                            error_msg,
                            current,
                            select_tenant,
                        )
                        .await;
                    }
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "Could not create the dossier.").await;
                        error_msg.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("create dossier: {}", e));
                        error_msg.set(Some(e.user_message()));
                    }
                }
                creating.set(false);
            });
        })
    };

    let on_refresh = {
        let api = api.clone();
        let tenants = tenants.clone();
        let list_loading = list_loading.clone();
        let file_pool = file_pool.clone();
        let error_msg = error_msg.clone();
        let refresh_detail = refresh_detail.clone();
        let selected_id = selected_id.clone();
        let select_tenant = select_tenant.clone();
        Callback::from(move |_| {
            list_loading.set(true);
            spawn_local(load_tenants(
                api.clone(),
                tenants.clone(),
                list_loading.clone(),
                error_msg.clone(),
                *selected_id,
                select_tenant.clone(),
            ));
            spawn_local(load_file_pool(
                api.clone(),
                file_pool.clone(),
                error_msg.clone(),
            ));
            refresh_detail.emit(());
        })
    };

    let attach_file = {
        let api = api.clone();
        let busy = busy.clone();
        let error_msg = error_msg.clone();
        let refresh_detail = refresh_detail.clone();
        Callback::from(move |(tenant_id, file_id): (i64, i64)| {
            busy.set(true);
            let api = api.clone();
            let busy = busy.clone();
            let error_msg = error_msg.clone();
            let refresh_detail = refresh_detail.clone();
            spawn_local(async move {
                match api
                    .post_json(
                        &format!("/tenant-files/{}/attach-document", tenant_id),
                        json!({ "file_id": file_id }),
                    )
                    .await
                {
                    Ok(resp) if resp.ok() => refresh_detail.emit(()),
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "Could not attach the file.").await;
                        error_msg.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("attach file: {}", e));
                        error_msg.set(Some(e.user_message()));
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_attach_existing = {
        let attach_choice = attach_choice.clone();
        let attach_file = attach_file.clone();
        let selected_id = selected_id.clone();
        Callback::from(move |_| {
            let Some(tenant_id) = *selected_id else { return };
            if let Ok(file_id) = attach_choice.parse::<i64>() {
                attach_file.emit((tenant_id, file_id));
                attach_choice.set(String::new());
            }
        })
    };

    let on_upload_attach = {
        let api = api.clone();
        let selected_id = selected_id.clone();
        let busy = busy.clone();
        let upload_msg = upload_msg.clone();
        let file_pool = file_pool.clone();
        let error_msg = error_msg.clone();
        let refresh_detail = refresh_detail.clone();
        Callback::from(move |e: Event| {
            let Some(tenant_id) = *selected_id else { return };
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            input.set_value("");
            let Ok(form) = web_sys::FormData::new() else {
                return;
            };
            if form.append_with_blob("file", &file).is_err() {
                upload_msg.set(Some("Could not read the selected file.".to_string()));
                return;
            }

            busy.set(true);
            upload_msg.set(None);

            let api = api.clone();
            let busy = busy.clone();
            let upload_msg = upload_msg.clone();
            let file_pool = file_pool.clone();
            let error_msg = error_msg.clone();
            let refresh_detail = refresh_detail.clone();
            spawn_local(async move {
                let analyzed = match api.post_multipart("/api/analyze-file", form).await {
                    Ok(resp) if resp.ok() => {
                        resp.json::<serde_json::Value>().await.unwrap_or_default()
                    }
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "The upload failed.").await;
                        upload_msg.set(Some(msg));
                        busy.set(false);
                        return;
                    }
                    Err(e) => {
                        error!(format!("upload: {}", e));
                        upload_msg.set(Some(e.user_message()));
                        busy.set(false);
                        return;
                    }
                };

                let Some(file_id) = analyzed.get("file_id").and_then(|v| v.as_i64()) else {
                    upload_msg.set(Some(
                        "The upload did not return a file reference; nothing was attached."
                            .to_string(),
                    ));
                    busy.set(false);
                    return;
                };

                match api
                    .post_json(
                        &format!("/tenant-files/{}/attach-document", tenant_id),
                        json!({ "file_id": file_id }),
                    )
                    .await
                {
                    Ok(resp) if resp.ok() => refresh_detail.emit(()),
                    Ok(resp) => {
                        let detail_msg =
                            api::error_detail(resp, "The link to the dossier failed.").await;
                        upload_msg.set(Some(format!(
                            "The file was uploaded to the history but could not be attached: {}",
                            detail_msg
                        )));
                    }
                    Err(e) => {
                        error!(format!("attach after upload: {}", e));
                        upload_msg.set(Some(format!(
                            "The file was uploaded to the history but could not be attached: {}",
                            e.user_message()
                        )));
                    }
                }
                load_file_pool(api, file_pool, error_msg).await;
                busy.set(false);
            });
        })
    };

    let run_confirm = {
        let api = api.clone();
        let busy = busy.clone();
        let confirm = confirm.clone();
        let error_msg = error_msg.clone();
        let refresh_detail = refresh_detail.clone();
        let selected_id = selected_id.clone();
        let detail = detail.clone();
        let tenants = tenants.clone();
        let list_loading = list_loading.clone();
        let file_pool = file_pool.clone();
        let select_tenant = select_tenant.clone();
        Callback::from(move |action: Confirm| {
            confirm.set(None);
            busy.set(true);

            let api = api.clone();
            let busy = busy.clone();
            let error_msg = error_msg.clone();
            let refresh_detail = refresh_detail.clone();
            let selected_id = selected_id.clone();
            let detail = detail.clone();
            let tenants = tenants.clone();
            let list_loading = list_loading.clone();
            let file_pool = file_pool.clone();
            let select_tenant = select_tenant.clone();
            spawn_local(async move {
                let tenant_id = *selected_id;
                let outcome = match action {
                    Confirm::Unlink(file_id) => {
                        let Some(tenant_id) = tenant_id else {
                            busy.set(false);
                            return;
                        };
                        api.post_json(
                            &format!("/tenant-files/{}/detach-document", tenant_id),
                            json!({ "file_id": file_id }),
                        )
                        .await
                    }
                    Confirm::DeleteFile(file_id) => {
                        api.delete(&format!("/api/files/{}", file_id)).await
                    }
                    Confirm::DeleteTenant(id) => api.delete(&format!("/tenant-files/{}", id)).await,
                };
                match outcome {
                    Ok(resp) if resp.ok() => match action {
                        Confirm::DeleteTenant(_) => {
                            selected_id.set(None);
                            detail.set(None);
                            load_tenants(api, tenants, list_loading, error_msg, None, select_tenant)
                                .await;
                        }
                        Confirm::DeleteFile(_) => {
                            load_file_pool(api, file_pool, error_msg).await;
                            refresh_detail.emit(());
                        }
                        Confirm::Unlink(_) => refresh_detail.emit(()),
                    },
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "The operation failed.").await;
                        error_msg.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("dossier action: {}", e));
                        error_msg.set(Some(e.user_message()));
                    }
                }
                busy.set(false);
            });
        })
    };

    let detail_pane = match &*detail {
        None => html! {
            <div class="bg-card rounded-[10px] p-8 border border-border text-center text-sm text-muted-foreground">
                { if selected_id.is_some() { "Loading the dossier..." } else { "Select a dossier to see its documents." } }
            </div>
        },
        Some(d) => {
            let linked_ids = normalize_file_ids(&d.file_ids);
            let (linked, unlinked) = partition_files(&file_pool, &linked_ids);
            let stale = stale_ids(&linked_ids, &file_pool);
            let checklist = d.parsed_checklist();
            let missing = missing_count(checklist.as_ref());

            html! {
                <div class="bg-card rounded-[10px] border border-border overflow-hidden">
                    <div class="p-4 border-b border-border flex items-center justify-between gap-4">
                        <div>
                            <p class="font-bold text-foreground">{ d.candidate_email.clone().unwrap_or_default() }</p>
                            <div class="flex items-center gap-2 mt-1">
                                { status_badge(d.status.as_deref().unwrap_or("pending")) }
                                { if missing > 0 {
                                    html! {
                                        <span class="px-2 py-0.5 rounded-full text-xs font-bold bg-red-500/10 text-red-600">
                                            { format!("{} missing", missing) }
                                        </span>
                                    }
                                } else { html!{} } }
                            </div>
                        </div>
                        <button
                            onclick={{
                                let confirm = confirm.clone();
                                let id = d.id;
                                Callback::from(move |_| confirm.set(Some(Confirm::DeleteTenant(id))))
                            }}
                            class="p-2 rounded-lg hover:bg-red-500/10 text-red-500" title="Delete dossier">
                            { icons::icon_trash() }
                        </button>
                    </div>

                    { if let Some(check) = &checklist {
                        html! {
                            <div class="p-4 border-b border-border">
                                <p class="text-xs font-bold text-muted-foreground uppercase mb-2">{"Checklist"}</p>
                                <div class="flex flex-wrap gap-2">
                                    { for check.received.iter().map(|doc| html! {
                                        <span class="px-2 py-1 rounded-lg text-xs font-semibold bg-emerald-500/10 text-emerald-600">
                                            { doc_label(doc) }
                                        </span>
                                    }) }
                                    { for check.missing.iter().map(|doc| html! {
                                        <span class="px-2 py-1 rounded-lg text-xs font-semibold bg-red-500/10 text-red-600">
                                            { doc_label(doc) }
                                        </span>
                                    }) }
                                </div>
                            </div>
                        }
                    } else { html!{} } }

                    <div class="p-4 border-b border-border space-y-3">
                        <p class="text-xs font-bold text-muted-foreground uppercase">{"Add a document"}</p>
                        <div class="flex items-center gap-2">
                            <select
                                value={(*attach_choice).clone()}
                                onchange={{
                                    let attach_choice = attach_choice.clone();
                                    Callback::from(move |e: Event| {
                                        let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        attach_choice.set(select.value());
                                    })
                                }}
                                class="flex-1 bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground">
                                <option value="" selected={attach_choice.is_empty()}>{"Attach an existing file..."}</option>
                                { for unlinked.iter().map(|file| html! {
                                    <option value={file.id.to_string()}>{ file.display_name() }</option>
                                }) }
                            </select>
                            <button onclick={on_attach_existing.clone()} disabled={*busy || attach_choice.is_empty()}
                                class="bg-primary text-primary-foreground px-3 py-2 rounded-xl text-sm font-bold hover:opacity-90">
                                { icons::icon_link() }
                            </button>
                        </div>
                        <label class="flex items-center gap-2 w-fit cursor-pointer bg-secondary text-secondary-foreground px-3 py-2 rounded-xl text-sm font-bold hover:opacity-90">
                            { icons::icon_upload() }
                            <span>{ if *busy { "Working..." } else { "Upload and attach" } }</span>
                            <input type="file" accept=".pdf,.png,.jpg,.jpeg" class="hidden" onchange={on_upload_attach.clone()} disabled={*busy} />
                        </label>
                        { if let Some(msg) = &*upload_msg { error_alert(msg) } else { html!{} } }
                    </div>

                    { if !stale.is_empty() {
                        html! {
                            <div class="m-4 flex items-center gap-2 bg-amber-500/10 text-amber-700 text-sm rounded-xl p-3">
                                { icons::icon_alert() }
                                <span>{ format!(
                                    "{} linked document(s) are not in the loaded history. Refresh to resynchronize.",
                                    stale.len()) }
                                </span>
                            </div>
                        }
                    } else { html!{} } }

                    <div class="divide-y divide-border">
                        { if linked.is_empty() {
                            html! { <p class="p-4 text-sm text-muted-foreground">{"No documents attached yet."}</p> }
                        } else {
                            html! {
                                { for linked.iter().map(|file| {
                                    let on_view = {
                                        let api = api.clone();
                                        let file = (*file).clone();
                                        let error_msg = error_msg.clone();
                                        Callback::from(move |_| fetch_file_bytes(api.clone(), &file, false, error_msg.clone()))
                                    };
                                    let on_download = {
                                        let api = api.clone();
                                        let file = (*file).clone();
                                        let error_msg = error_msg.clone();
                                        Callback::from(move |_| fetch_file_bytes(api.clone(), &file, true, error_msg.clone()))
                                    };
                                    let on_unlink = {
                                        let confirm = confirm.clone();
                                        let id = file.id;
                                        Callback::from(move |_| confirm.set(Some(Confirm::Unlink(id))))
                                    };
                                    let on_delete = {
                                        let confirm = confirm.clone();
                                        let id = file.id;
                                        Callback::from(move |_| confirm.set(Some(Confirm::DeleteFile(id))))
                                    };
                                    html! {
                                        <div key={file.id} class="p-4 flex items-center justify-between gap-4">
                                            <div>
                                                <p class="font-semibold text-sm text-foreground">{ file.display_name() }</p>
                                                <p class="text-xs text-muted-foreground">
                                                    { file.file_type.clone().unwrap_or_else(|| "Document".to_string()) }
                                                </p>
                                            </div>
                                            <div class="flex items-center gap-1">
                                                <button onclick={on_view} title="View" class="p-2 rounded-lg hover:bg-muted text-foreground">{ icons::icon_eye() }</button>
                                                <button onclick={on_download} title="Download" class="p-2 rounded-lg hover:bg-muted text-foreground">{ icons::icon_download() }</button>
                                                <button onclick={on_unlink} title="Remove from dossier" class="p-2 rounded-lg hover:bg-amber-500/10 text-amber-600">{ icons::icon_link() }</button>
                                                <button onclick={on_delete} title="Delete permanently" class="p-2 rounded-lg hover:bg-red-500/10 text-red-500">{ icons::icon_trash() }</button>
                                            </div>
                                        </div>
                                    }
                                }) }
                            }
                        }}
                    </div>
                </div>
            }
        }
    };

    let confirm_modal = confirm.as_ref().map(|action| {
        let (title, body, button) = match action {
            Confirm::Unlink(_) => (
                "Remove from dossier",
                "The document stays in the agency history and can be attached again later.",
                "Remove",
            ),
            Confirm::DeleteFile(_) => (
                "Delete permanently",
                "The file is removed from the agency history as well. This cannot be undone.",
                "Delete",
            ),
            Confirm::DeleteTenant(_) => (
                "Delete dossier",
                "The dossier and its checklist are removed. Attached files stay in the history. This cannot be undone.",
                "Delete",
            ),
        };
        let action = action.clone();
        let on_confirm = {
            let run_confirm = run_confirm.clone();
            Callback::from(move |_| run_confirm.emit(action.clone()))
        };
        let on_cancel = {
            let confirm = confirm.clone();
            Callback::from(move |_| confirm.set(None))
        };
        html! {
            <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
                <div class="bg-card rounded-[10px] border border-border p-6 w-full max-w-sm">
                    <h3 class="font-bold text-foreground text-lg mb-2">{ title }</h3>
                    <p class="text-sm text-muted-foreground mb-6">{ body }</p>
                    <div class="flex justify-end gap-2">
                        <button onclick={on_cancel}
                            class="px-4 py-2 rounded-xl text-sm font-bold bg-muted text-foreground hover:opacity-90">
                            {"Cancel"}
                        </button>
                        <button onclick={on_confirm}
                            class="px-4 py-2 rounded-xl text-sm font-bold bg-red-500 text-white hover:opacity-90">
                            { button }
                        </button>
                    </div>
                </div>
            </div>
        }
    });

    page_shell(
        "Tenant files",
        html! {
            <button onclick={on_refresh}
                class="flex items-center gap-2 bg-secondary text-secondary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                { icons::icon_refresh() }
                <span>{"Refresh"}</span>
            </button>
        },
        html! {
            <>
                { if let Some(msg) = &*error_msg { error_alert(msg) } else { html!{} } }

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6 items-start">
                    <div class="space-y-4">
                        <form onsubmit={on_create}
                            class="bg-card rounded-[10px] p-4 border border-border flex items-center gap-2">
                            <input
                                type="email"
                                placeholder="candidate@email.com"
                                value={(*new_email).clone()}
                                oninput={{
                                    let new_email = new_email.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        new_email.set(input.value());
                                    })
                                }}
                                class="flex-1 bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground" />
                            <button type="submit" disabled={*creating}
                                class="bg-primary text-primary-foreground p-2 rounded-xl hover:opacity-90">
                                { icons::icon_plus() }
                            </button>
                        </form>

                        <div class="bg-card rounded-[10px] border border-border divide-y divide-border overflow-hidden">
                            { if *list_loading {
                                html! { <p class="p-4 text-sm text-muted-foreground">{"Loading..."}</p> }
                            } else if tenants.is_empty() {
                                html! { <p class="p-4 text-sm text-muted-foreground">{"No dossiers yet. Create one above."}</p> }
                            } else {
                                html! {
                                    { for tenants.iter().map(|tenant| {
                                        let active = *selected_id == Some(tenant.id);
                                        let onclick = {
                                            let select_tenant = select_tenant.clone();
                                            let id = tenant.id;
                                            Callback::from(move |_| select_tenant.emit(id))
                                        };
                                        html! {
                                            <button key={tenant.id} {onclick}
                                                class={classes!(
                                                    "w-full", "text-left", "p-4", "flex", "items-center",
                                                    "justify-between", "gap-2", "hover:bg-muted/40",
                                                    active.then_some("bg-muted/40"))}>
                                                <span class="text-sm font-semibold text-foreground truncate">
                                                    { tenant.candidate_email.clone().unwrap_or_default() }
                                                </span>
                                                { status_badge(tenant.status.as_deref().unwrap_or("pending")) }
                                            </button>
                                        }
                                    }) }
                                }
                            }}
                        </div>
                    </div>

                    <div class="lg:col-span-2">
                        { detail_pane }
                    </div>
                </div>

                { confirm_modal.unwrap_or_default() }
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summaries(ids: &[i64]) -> Vec<TenantSummary> {
        ids.iter()
            .map(|id| serde_json::from_value(json!({ "id": id })).unwrap())
            .collect()
    }

    #[test]
    fn first_dossier_opens_when_none_is_selected() {
        assert_eq!(auto_select_target(None, &summaries(&[7, 3, 9])), Some(7));
    }

    #[test]
    fn an_open_dossier_is_kept_across_reloads() {
        assert_eq!(auto_select_target(Some(3), &summaries(&[7, 3, 9])), None);
    }

    #[test]
    fn an_empty_list_selects_nothing() {
        assert_eq!(auto_select_target(None, &summaries(&[])), None);
    }
}
