use std::rc::Rc;

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiClient};
use crate::icons;
use crate::models::{list_from_value, sort_newest_first, EmailRecord, InboxMessage};
use crate::pages::{error_alert, page_shell, success_alert, use_api};

async fn load_inbox(
    api: Rc<ApiClient>,
    inbox: UseStateHandle<Option<Vec<InboxMessage>>>,
    checking: UseStateHandle<bool>,
    inbox_error: UseStateHandle<Option<String>>,
) {
    match api.get("/inbox/refresh").await {
        Ok(resp) if resp.ok() => {
            let value = resp.json::<serde_json::Value>().await.unwrap_or_default();
            inbox.set(Some(list_from_value(value)));
        }
        Ok(resp) => {
            let msg = api::error_detail(resp, "Could not check the inbox.").await;
            inbox_error.set(Some(msg));
        }
        Err(e) => {
            error!(format!("inbox refresh: {}", e));
            inbox_error.set(Some(e.user_message()));
        }
    }
    checking.set(false);
}

async fn load_history(
    api: Rc<ApiClient>,
    emails: UseStateHandle<Vec<EmailRecord>>,
    selected_id: UseStateHandle<Option<i64>>,
    loading: UseStateHandle<bool>,
    error_msg: UseStateHandle<Option<String>>,
) {
    match api.get("/email/history").await {
        Ok(resp) if resp.ok() => {
            let value = resp.json::<serde_json::Value>().await.unwrap_or_default();
            let mut list: Vec<EmailRecord> = list_from_value(value);
            sort_newest_first(&mut list);
            if selected_id.is_none() {
                selected_id.set(list.first().map(|e| e.id));
            }
            emails.set(list);
        }
        Ok(resp) => {
            let msg = api::error_detail(resp, "Could not load the email history.").await;
            error_msg.set(Some(msg));
        }
        Err(e) => {
            error!(format!("email history: {}", e));
            error_msg.set(Some(e.user_message()));
        }
    }
    loading.set(false);
}

#[function_component(EmailsPage)]
pub fn emails_page() -> Html {
    let api = use_api();

    // process form
    let from_email = use_state(String::new);
    let subject = use_state(String::new);
    let content = use_state(String::new);
    let processing = use_state(|| false);
    let form_error = use_state(|| None::<String>);
    let result = use_state(|| None::<serde_json::Value>);

    // history
    let emails = use_state(Vec::<EmailRecord>::new);
    let selected_id = use_state(|| None::<i64>);
    let loading = use_state(|| true);
    let error_msg = use_state(|| None::<String>);

    // mailbox pull, only on demand
    let inbox = use_state(|| None::<Vec<InboxMessage>>);
    let checking = use_state(|| false);
    let inbox_error = use_state(|| None::<String>);

    {
        let api = api.clone();
        let emails = emails.clone();
        let selected_id = selected_id.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(load_history(api, emails, selected_id, loading, error_msg));
                || ()
            },
            (),
        );
    }

    let on_refresh = {
        let api = api.clone();
        let emails = emails.clone();
        let selected_id = selected_id.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();
        Callback::from(move |_| {
            loading.set(true);
            error_msg.set(None);
            spawn_local(load_history(
                api.clone(),
                emails.clone(),
                selected_id.clone(),
                loading.clone(),
                error_msg.clone(),
            ));
        })
    };

    let on_check_inbox = {
        let api = api.clone();
        let inbox = inbox.clone();
        let checking = checking.clone();
        let inbox_error = inbox_error.clone();
        Callback::from(move |_| {
            checking.set(true);
            inbox_error.set(None);
            spawn_local(load_inbox(
                api.clone(),
                inbox.clone(),
                checking.clone(),
                inbox_error.clone(),
            ));
        })
    };

    let on_process = {
        let api = api.clone();
        let from_email = from_email.clone();
        let subject = subject.clone();
        let content = content.clone();
        let processing = processing.clone();
        let form_error = form_error.clone();
        let result = result.clone();
        let emails = emails.clone();
        let selected_id = selected_id.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let from_val = from_email.trim().to_string();
            let subject_val = subject.trim().to_string();
            let content_val = content.trim().to_string();

            if from_val.is_empty() || subject_val.is_empty() || content_val.is_empty() {
                form_error.set(Some(
                    "Sender email, subject and content are all required.".to_string(),
                ));
                return;
            }

            form_error.set(None);
            result.set(None);
            processing.set(true);

            let api = api.clone();
            let processing = processing.clone();
            let form_error = form_error.clone();
            let result = result.clone();
            let emails = emails.clone();
            let selected_id = selected_id.clone();
            let loading = loading.clone();
            let error_msg = error_msg.clone();

            spawn_local(async move {
                let payload = serde_json::json!({
                    "from_email": from_val,
                    "subject": subject_val,
                    "content": content_val,
                    "send_email": false,
                });
                match api.post_json("/email/process", payload).await {
                    Ok(resp) if resp.ok() => {
                        let data = resp.json::<serde_json::Value>().await.unwrap_or_default();
                        result.set(Some(data));
                        spawn_local(load_history(api, emails, selected_id, loading, error_msg));
                    }
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "The analysis failed.").await;
                        form_error.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("email process: {}", e));
                        form_error.set(Some(e.user_message()));
                    }
                }
                processing.set(false);
            });
        })
    };

    let selected = emails
        .iter()
        .find(|e| Some(e.id) == *selected_id)
        .cloned();

    page_shell(
        "Email processing",
        html! {
            <button onclick={on_refresh} disabled={*loading}
                class="flex items-center gap-2 bg-secondary text-secondary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                { icons::icon_refresh() }
                {"Refresh"}
            </button>
        },
        html! {
            <>
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h3 class="font-bold text-foreground text-lg mb-4">{"Analyze an email"}</h3>
                    <form class="grid grid-cols-1 md:grid-cols-2 gap-4" onsubmit={on_process}>
                        <input type="email" placeholder="Sender email" value={(*from_email).clone()}
                            oninput={{
                                let from_email = from_email.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    from_email.set(input.value());
                                })
                            }}
                            class="p-2.5 bg-input border border-input rounded-lg text-sm" />
                        <input placeholder="Subject" value={(*subject).clone()}
                            oninput={{
                                let subject = subject.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    subject.set(input.value());
                                })
                            }}
                            class="p-2.5 bg-input border border-input rounded-lg text-sm" />
                        <textarea placeholder="Email content" value={(*content).clone()}
                            oninput={{
                                let content = content.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                    content.set(input.value());
                                })
                            }}
                            class="md:col-span-2 p-2.5 bg-input border border-input rounded-lg text-sm min-h-[110px]" />
                        { if let Some(msg) = &*form_error {
                            html! { <div class="md:col-span-2">{ error_alert(msg) }</div> }
                        } else { html!{} } }
                        <div class="md:col-span-2">
                            <button type="submit" disabled={*processing}
                                class="bg-primary text-primary-foreground px-6 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                                { if *processing { "Analyzing..." } else { "Analyze" } }
                            </button>
                        </div>
                    </form>

                    { if let Some(data) = &*result {
                        let category = data.pointer("/analyse/category").and_then(|v| v.as_str()).unwrap_or("-").to_string();
                        let urgency = data.pointer("/analyse/urgency").and_then(|v| v.as_str()).unwrap_or("-").to_string();
                        let summary = data.pointer("/analyse/summary").and_then(|v| v.as_str()).unwrap_or("").to_string();
                        let reply = data.pointer("/reponse/reply").and_then(|v| v.as_str()).unwrap_or("").to_string();
                        html! {
                            <div class="mt-6 space-y-3">
                                { success_alert("Analysis complete.") }
                                <div class="flex gap-2 text-xs">
                                    <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full font-bold">{ category }</span>
                                    <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full font-bold">{ format!("urgency: {}", urgency) }</span>
                                </div>
                                { if !summary.is_empty() {
                                    html! { <p class="text-sm text-muted-foreground">{ summary }</p> }
                                } else { html!{} } }
                                { if !reply.is_empty() {
                                    html! {
                                        <div class="bg-muted/40 rounded-lg p-4 text-sm text-foreground whitespace-pre-wrap">{ reply }</div>
                                    }
                                } else { html!{} } }
                            </div>
                        }
                    } else { html!{} } }
                </div>

                <div class="bg-card rounded-[10px] border border-border overflow-hidden">
                    <div class="p-4 border-b border-border flex items-center justify-between">
                        <h3 class="font-bold text-foreground">{"Inbox"}</h3>
                        <button onclick={on_check_inbox} disabled={*checking}
                            class="flex items-center gap-2 bg-secondary text-secondary-foreground px-3 py-1.5 rounded-xl font-bold text-xs hover:opacity-90 transition-all">
                            { icons::icon_refresh() }
                            { if *checking { "Checking..." } else { "Check inbox" } }
                        </button>
                    </div>
                    { if let Some(msg) = &*inbox_error {
                        html! { <div class="p-4">{ error_alert(msg) }</div> }
                    } else { html!{} } }
                    { match &*inbox {
                        None => html! {
                            <p class="p-4 text-sm text-muted-foreground">{"Pull the connected mailbox to see unprocessed messages."}</p>
                        },
                        Some(messages) if messages.is_empty() => html! {
                            <p class="p-4 text-sm text-muted-foreground">{"No new emails."}</p>
                        },
                        Some(messages) => html! {
                            <div class="divide-y divide-border max-h-[320px] overflow-y-auto">
                                { for messages.iter().enumerate().map(|(i, message)| html! {
                                    <div key={i} class="p-4">
                                        <p class="font-semibold text-sm text-foreground">
                                            { message.subject.clone().unwrap_or_else(|| "(no subject)".to_string()) }
                                        </p>
                                        <p class="text-xs text-muted-foreground">
                                            { format!("{} • {}",
                                                message.from_email.clone().unwrap_or_default(),
                                                message.date.clone().unwrap_or_default()) }
                                        </p>
                                    </div>
                                }) }
                            </div>
                        },
                    }}
                </div>

                { if let Some(msg) = &*error_msg { error_alert(msg) } else { html!{} } }

                <div class="grid grid-cols-1 lg:grid-cols-5 gap-6">
                    <div class="lg:col-span-2 bg-card rounded-[10px] border border-border overflow-hidden">
                        <div class="p-4 border-b border-border flex items-center justify-between">
                            <h3 class="font-bold text-foreground">{"History"}</h3>
                            <span class="text-xs text-muted-foreground">
                                { if *loading { "Loading...".to_string() } else { format!("{} email(s)", emails.len()) } }
                            </span>
                        </div>
                        { if emails.is_empty() && !*loading {
                            html! { <p class="p-4 text-sm text-muted-foreground">{"No analyzed emails yet."}</p> }
                        } else {
                            html! {
                                <div class="divide-y divide-border max-h-[480px] overflow-y-auto">
                                    { for emails.iter().map(|email| {
                                        let active = Some(email.id) == *selected_id;
                                        let onclick = {
                                            let selected_id = selected_id.clone();
                                            let id = email.id;
                                            Callback::from(move |_| selected_id.set(Some(id)))
                                        };
                                        html! {
                                            <button key={email.id} type="button" {onclick}
                                                class={format!("w-full text-left p-4 hover:bg-muted/30 transition-colors {}",
                                                    if active { "bg-muted/50" } else { "" })}>
                                                <p class="font-semibold text-sm text-foreground">
                                                    { email.subject.clone().unwrap_or_else(|| "(no subject)".to_string()) }
                                                </p>
                                                <p class="text-xs text-muted-foreground">
                                                    { format!("{} • {}",
                                                        email.category.clone().unwrap_or_else(|| "Other".to_string()),
                                                        email.sender_email.clone().unwrap_or_default()) }
                                                </p>
                                            </button>
                                        }
                                    }) }
                                </div>
                            }
                        }}
                    </div>

                    <div class="lg:col-span-3 bg-card rounded-[10px] border border-border p-6">
                        { match &selected {
                            None => html! { <p class="text-sm text-muted-foreground">{"Select an email on the left."}</p> },
                            Some(email) => html! {
                                <div class="space-y-4">
                                    <div>
                                        <h3 class="font-bold text-foreground text-lg">
                                            { email.subject.clone().unwrap_or_else(|| "(no subject)".to_string()) }
                                        </h3>
                                        <p class="text-xs text-muted-foreground">
                                            { format!("{} • {} • {}",
                                                email.sender_email.clone().unwrap_or_default(),
                                                email.category.clone().unwrap_or_else(|| "Other".to_string()),
                                                email.urgency.clone().unwrap_or_default()) }
                                        </p>
                                    </div>
                                    { if let Some(summary) = &email.summary {
                                        html! { <p class="text-sm text-muted-foreground">{ summary.clone() }</p> }
                                    } else { html!{} } }
                                    <div>
                                        <h4 class="font-bold text-sm text-foreground mb-2">{"Suggested reply"}</h4>
                                        <div class="bg-muted/40 rounded-lg p-4 text-sm text-foreground whitespace-pre-wrap">
                                            { email.suggested_response_text.clone()
                                                .unwrap_or_else(|| "No suggested reply.".to_string()) }
                                        </div>
                                    </div>
                                </div>
                            },
                        }}
                    </div>
                </div>
            </>
        },
    )
}
