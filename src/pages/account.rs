use gloo_console::error;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, redirect_to_login};
use crate::models::AccountProfile;
use crate::pages::{error_alert, page_shell, success_alert, use_api};
use crate::session;

#[function_component(AccountPage)]
pub fn account_page() -> Html {
    let api = use_api();

    let profile = use_state(|| None::<AccountProfile>);
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let agency_name = use_state(String::new);
    let language = use_state(|| "fr".to_string());

    let loading = use_state(|| true);
    let saving = use_state(|| false);
    let error_msg = use_state(|| None::<String>);
    let saved_msg = use_state(|| None::<String>);
    let confirm_delete = use_state(|| false);
    let deleting = use_state(|| false);

    {
        let api = api.clone();
        let profile = profile.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let agency_name = agency_name.clone();
        let language = language.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.get("/account/me").await {
                        Ok(resp) if resp.ok() => {
                            if let Ok(me) = resp.json::<AccountProfile>().await {
                                first_name.set(me.first_name.clone().unwrap_or_default());
                                last_name.set(me.last_name.clone().unwrap_or_default());
                                agency_name.set(me.agency_name.clone().unwrap_or_default());
                                if let Some(lang) = me.preferred_language.clone() {
                                    language.set(lang);
                                }
                                profile.set(Some(me));
                            }
                        }
                        Ok(resp) => {
                            let msg = api::error_detail(resp, "Could not load your profile.").await;
                            error_msg.set(Some(msg));
                        }
                        Err(e) => {
                            error!(format!("account: {}", e));
                            error_msg.set(Some(e.user_message()));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let is_admin = profile.as_ref().map(|p| p.is_admin()).unwrap_or(false);

    let on_save = {
        let api = api.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let agency_name = agency_name.clone();
        let language = language.clone();
        let saving = saving.clone();
        let error_msg = error_msg.clone();
        let saved_msg = saved_msg.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            saving.set(true);
            error_msg.set(None);
            saved_msg.set(None);

            let mut payload = json!({
                "first_name": (*first_name).clone(),
                "last_name": (*last_name).clone(),
                "preferred_language": (*language).clone(),
            });
            if is_admin {
                payload["agency_name"] = json!((*agency_name).clone());
            }

            let api = api.clone();
            let saving = saving.clone();
            let error_msg = error_msg.clone();
            let saved_msg = saved_msg.clone();
            spawn_local(async move {
                match api.patch_json("/account/me", payload).await {
                    Ok(resp) if resp.ok() => {
                        saved_msg.set(Some("Profile updated.".to_string()));
                    }
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "Could not update your profile.").await;
                        error_msg.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("update account: {}", e));
                        error_msg.set(Some(e.user_message()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let api = api.clone();
        let deleting = deleting.clone();
        let error_msg = error_msg.clone();
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_| {
            deleting.set(true);
            let api = api.clone();
            let deleting = deleting.clone();
            let error_msg = error_msg.clone();
            let confirm_delete = confirm_delete.clone();
            spawn_local(async move {
                match api.delete("/account/me?mode=purge").await {
                    Ok(resp) if resp.ok() => {
                        session::clear();
                        redirect_to_login();
                    }
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "Could not delete the account.").await;
                        error_msg.set(Some(msg));
                        confirm_delete.set(false);
                    }
                    Err(e) => {
                        error!(format!("delete account: {}", e));
                        error_msg.set(Some(e.user_message()));
                        confirm_delete.set(false);
                    }
                }
                deleting.set(false);
            });
        })
    };

    let bind = |handle: UseStateHandle<String>| {
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            handle.set(input.value());
        })
    };

    page_shell(
        "My account",
        html! {},
        html! {
            <div class="max-w-2xl space-y-6">
                { if let Some(msg) = &*error_msg { error_alert(msg) } else { html!{} } }
                { if let Some(msg) = &*saved_msg { success_alert(msg) } else { html!{} } }

                { if *loading {
                    html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
                } else {
                    html! {
                        <>
                            <form onsubmit={on_save} class="bg-card rounded-[10px] p-6 border border-border space-y-4">
                                <div>
                                    <label class="block text-sm font-bold text-foreground mb-1">{"Email"}</label>
                                    <p class="text-sm text-muted-foreground">
                                        { profile.as_ref().and_then(|p| p.email.clone()).unwrap_or_default() }
                                    </p>
                                </div>
                                <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                                    <div>
                                        <label class="block text-sm font-bold text-foreground mb-1">{"First name"}</label>
                                        <input type="text" value={(*first_name).clone()} oninput={bind(first_name.clone())}
                                            class="w-full bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground" />
                                    </div>
                                    <div>
                                        <label class="block text-sm font-bold text-foreground mb-1">{"Last name"}</label>
                                        <input type="text" value={(*last_name).clone()} oninput={bind(last_name.clone())}
                                            class="w-full bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground" />
                                    </div>
                                </div>
                                { if is_admin {
                                    html! {
                                        <div>
                                            <label class="block text-sm font-bold text-foreground mb-1">{"Agency name"}</label>
                                            <input type="text" value={(*agency_name).clone()} oninput={bind(agency_name.clone())}
                                                class="w-full bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground" />
                                        </div>
                                    }
                                } else { html!{} } }
                                <div>
                                    <label class="block text-sm font-bold text-foreground mb-1">{"Preferred language"}</label>
                                    <select
                                        onchange={{
                                            let language = language.clone();
                                            Callback::from(move |e: Event| {
                                                let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                                language.set(select.value());
                                            })
                                        }}
                                        class="bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground">
                                        <option value="fr" selected={*language == "fr"}>{"Français"}</option>
                                        <option value="en" selected={*language == "en"}>{"English"}</option>
                                    </select>
                                </div>
                                <button type="submit" disabled={*saving}
                                    class="bg-primary text-primary-foreground px-6 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                                    { if *saving { "Saving..." } else { "Save changes" } }
                                </button>
                            </form>

                            <div class="bg-card rounded-[10px] p-6 border border-red-500/30">
                                <h3 class="font-bold text-red-600 mb-2">{"Danger zone"}</h3>
                                <p class="text-sm text-muted-foreground mb-4">
                                    {"Deleting your account removes your data permanently."}
                                </p>
                                <button
                                    onclick={{
                                        let confirm_delete = confirm_delete.clone();
                                        Callback::from(move |_| confirm_delete.set(true))
                                    }}
                                    class="bg-red-500/10 text-red-600 px-4 py-2 rounded-xl font-bold text-sm hover:bg-red-500/20 transition-all">
                                    {"Delete my account"}
                                </button>
                            </div>
                        </>
                    }
                }}

                { if *confirm_delete {
                    html! {
                        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
                            <div class="bg-card rounded-[10px] border border-border p-6 w-full max-w-sm">
                                <h3 class="font-bold text-foreground text-lg mb-2">{"Delete account"}</h3>
                                <p class="text-sm text-muted-foreground mb-6">
                                    {"All of your data is erased and you are signed out. This cannot be undone."}
                                </p>
                                <div class="flex justify-end gap-2">
                                    <button
                                        onclick={{
                                            let confirm_delete = confirm_delete.clone();
                                            Callback::from(move |_| confirm_delete.set(false))
                                        }}
                                        class="px-4 py-2 rounded-xl text-sm font-bold bg-muted text-foreground hover:opacity-90">
                                        {"Cancel"}
                                    </button>
                                    <button onclick={on_delete} disabled={*deleting}
                                        class="px-4 py-2 rounded-xl text-sm font-bold bg-red-500 text-white hover:opacity-90">
                                        { if *deleting { "Deleting..." } else { "Delete" } }
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                } else { html!{} } }
            </div>
        },
    )
}
