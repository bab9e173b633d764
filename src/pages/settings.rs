use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::models::AgencySettings;
use crate::pages::{error_alert, page_shell, success_alert, use_api};

fn text_field(
    label: &str,
    value: &str,
    placeholder: &str,
    oninput: Callback<InputEvent>,
) -> Html {
    html! {
        <div>
            <label class="block text-sm font-bold text-foreground mb-1">{ label.to_string() }</label>
            <input type="text" value={value.to_string()} placeholder={placeholder.to_string()} {oninput}
                class="w-full bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground" />
        </div>
    }
}

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let api = use_api();

    let company_name = use_state(String::new);
    let agent_name = use_state(String::new);
    let tone = use_state(String::new);
    let signature = use_state(String::new);
    let logo = use_state(String::new);

    let loading = use_state(|| true);
    let saving = use_state(|| false);
    let error_msg = use_state(|| None::<String>);
    let saved_msg = use_state(|| None::<String>);

    {
        let api = api.clone();
        let company_name = company_name.clone();
        let agent_name = agent_name.clone();
        let tone = tone.clone();
        let signature = signature.clone();
        let logo = logo.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.get("/settings").await {
                        Ok(resp) if resp.ok() => {
                            if let Ok(settings) = resp.json::<AgencySettings>().await {
                                company_name.set(settings.company_name.unwrap_or_default());
                                agent_name.set(settings.agent_name.unwrap_or_default());
                                tone.set(settings.tone.unwrap_or_default());
                                signature.set(settings.signature.unwrap_or_default());
                                logo.set(settings.logo.unwrap_or_default());
                            }
                        }
                        Ok(resp) => {
                            let msg =
                                api::error_detail(resp, "Could not load the settings.").await;
                            error_msg.set(Some(msg));
                        }
                        Err(e) => {
                            error!(format!("settings: {}", e));
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

    let on_save = {
        let api = api.clone();
        let company_name = company_name.clone();
        let agent_name = agent_name.clone();
        let tone = tone.clone();
        let signature = signature.clone();
        let logo = logo.clone();
        let saving = saving.clone();
        let error_msg = error_msg.clone();
        let saved_msg = saved_msg.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            saving.set(true);
            error_msg.set(None);
            saved_msg.set(None);

            let payload = AgencySettings {
                company_name: Some((*company_name).clone()),
                agent_name: Some((*agent_name).clone()),
                tone: Some((*tone).clone()),
                signature: Some((*signature).clone()),
                logo: Some((*logo).clone()),
            };
            let api = api.clone();
            let saving = saving.clone();
            let error_msg = error_msg.clone();
            let saved_msg = saved_msg.clone();
            spawn_local(async move {
                match serde_json::to_value(&payload) {
                    Ok(body) => match api.post_json("/settings", body).await {
                        Ok(resp) if resp.ok() => {
                            saved_msg.set(Some("Settings saved.".to_string()));
                        }
                        Ok(resp) => {
                            let msg = api::error_detail(resp, "Could not save the settings.").await;
                            error_msg.set(Some(msg));
                        }
                        Err(e) => {
                            error!(format!("save settings: {}", e));
                            error_msg.set(Some(e.user_message()));
                        }
                    },
                    Err(e) => error_msg.set(Some(e.to_string())),
                }
                saving.set(false);
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
        "Agency settings",
        html! {},
        html! {
            <div class="max-w-2xl">
                { if let Some(msg) = &*error_msg { error_alert(msg) } else { html!{} } }
                { if let Some(msg) = &*saved_msg { success_alert(msg) } else { html!{} } }

                { if *loading {
                    html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
                } else {
                    html! {
                        <form onsubmit={on_save} class="bg-card rounded-[10px] p-6 border border-border space-y-4">
                            { text_field("Company name", &company_name, "LocaFlow Agency", bind(company_name.clone())) }
                            { text_field("Agent name", &agent_name, "Jane Doe", bind(agent_name.clone())) }
                            { text_field("Tone of replies", &tone, "professional and warm", bind(tone.clone())) }
                            <div>
                                <label class="block text-sm font-bold text-foreground mb-1">{"Email signature"}</label>
                                <textarea rows="4" value={(*signature).clone()}
                                    oninput={{
                                        let signature = signature.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                            signature.set(area.value());
                                        })
                                    }}
                                    class="w-full bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground">
                                </textarea>
                            </div>
                            { text_field("Logo URL", &logo, "https://...", bind(logo.clone())) }
                            <button type="submit" disabled={*saving}
                                class="bg-primary text-primary-foreground px-6 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                                { if *saving { "Saving..." } else { "Save settings" } }
                            </button>
                        </form>
                    }
                }}
            </div>
        },
    )
}
