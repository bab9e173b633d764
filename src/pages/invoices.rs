use std::rc::Rc;

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, download_blob, open_blob, ApiClient};
use crate::icons;
use crate::models::{list_from_value, Invoice};
use crate::pages::{error_alert, page_shell, success_alert, use_api};

const PDF_MIME: &str = "application/pdf";

/// References come from the server but are user-influenced free text.
fn reprint_path(reference: &str) -> String {
    format!("/api/invoices/{}/pdf", urlencoding::encode(reference))
}

#[derive(Clone, Copy, PartialEq)]
enum PdfMode {
    Preview,
    Download,
}

async fn load_invoices(
    api: Rc<ApiClient>,
    invoices: UseStateHandle<Vec<Invoice>>,
    loading: UseStateHandle<bool>,
    error_msg: UseStateHandle<Option<String>>,
) {
    match api.get("/api/invoices").await {
        Ok(resp) if resp.ok() => {
            let value = resp.json::<serde_json::Value>().await.unwrap_or_default();
            invoices.set(list_from_value(value));
        }
        Ok(resp) => {
            let msg = api::error_detail(resp, "Could not load the invoice history.").await;
            error_msg.set(Some(msg));
        }
        Err(e) => {
            error!(format!("invoice history: {}", e));
            error_msg.set(Some(e.user_message()));
        }
    }
    loading.set(false);
}

#[function_component(InvoicesPage)]
pub fn invoices_page() -> Html {
    let api = use_api();

    let client_name = use_state(String::new);
    let invoice_number = use_state(String::new);
    let amount = use_state(String::new);
    let date = use_state(String::new);
    let item_desc = use_state(|| "Rent".to_string());
    let generating = use_state(|| false);
    let form_error = use_state(|| None::<String>);
    let form_success = use_state(|| None::<String>);

    let invoices = use_state(Vec::<Invoice>::new);
    let loading = use_state(|| true);
    let error_msg = use_state(|| None::<String>);

    {
        let api = api.clone();
        let invoices = invoices.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(load_invoices(api, invoices, loading, error_msg));
                || ()
            },
            (),
        );
    }

    let generate = {
        let api = api.clone();
        let client_name = client_name.clone();
        let invoice_number = invoice_number.clone();
        let amount = amount.clone();
        let date = date.clone();
        let item_desc = item_desc.clone();
        let generating = generating.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        let invoices = invoices.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();

        move |mode: PdfMode| {
            let client_val = client_name.trim().to_string();
            let number_val = invoice_number.trim().to_string();
            let amount_val = amount.trim().to_string();
            let date_val = date.trim().to_string();
            let desc_val = item_desc.trim().to_string();

            if client_val.is_empty() || number_val.is_empty() || amount_val.is_empty() {
                form_error.set(Some(
                    "Client name, invoice number and amount are required.".to_string(),
                ));
                return;
            }
            if amount_val.parse::<f64>().is_err() {
                form_error.set(Some("Amount must be a number.".to_string()));
                return;
            }

            form_error.set(None);
            form_success.set(None);
            generating.set(true);

            let api = api.clone();
            let generating = generating.clone();
            let form_error = form_error.clone();
            let form_success = form_success.clone();
            let invoices = invoices.clone();
            let loading = loading.clone();
            let error_msg = error_msg.clone();

            spawn_local(async move {
                let payload = serde_json::json!({
                    "client_name": client_val,
                    "invoice_number": number_val,
                    "amount": amount_val,
                    "date": date_val,
                    "items": [{ "desc": desc_val, "price": amount_val }],
                });
                match api.post_json("/api/generate-invoice", payload).await {
                    Ok(resp) if resp.ok() => match resp.binary().await {
                        Ok(bytes) => {
                            match mode {
                                PdfMode::Preview => open_blob(&bytes, PDF_MIME),
                                PdfMode::Download => download_blob(
                                    &bytes,
                                    PDF_MIME,
                                    &format!("invoice_{}.pdf", number_val),
                                ),
                            }
                            form_success.set(Some(format!("Invoice {} generated.", number_val)));
                            spawn_local(load_invoices(api, invoices, loading, error_msg));
                        }
                        Err(e) => {
                            error!(format!("invoice bytes: {}", e));
                            form_error.set(Some("The PDF could not be read.".to_string()));
                        }
                    },
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "Invoice generation failed.").await;
                        form_error.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("invoice generate: {}", e));
                        form_error.set(Some(e.user_message()));
                    }
                }
                generating.set(false);
            });
        }
    };

    let on_preview = {
        let generate = generate.clone();
        Callback::from(move |_| generate(PdfMode::Preview))
    };
    let on_download = Callback::from(move |_| generate(PdfMode::Download));

    let reprint = {
        let api = api.clone();
        let error_msg = error_msg.clone();
        move |reference: String| {
            let api = api.clone();
            let error_msg = error_msg.clone();
            spawn_local(async move {
                match api.get(&reprint_path(&reference)).await {
                    Ok(resp) if resp.ok() => {
                        if let Ok(bytes) = resp.binary().await {
                            open_blob(&bytes, PDF_MIME);
                        }
                    }
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "Could not re-print this invoice.").await;
                        error_msg.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("invoice reprint: {}", e));
                        error_msg.set(Some(e.user_message()));
                    }
                }
            });
        }
    };

    page_shell(
        "Invoices",
        html! {},
        html! {
            <>
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h3 class="font-bold text-foreground text-lg mb-4">{"Generate an invoice"}</h3>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <input placeholder="Client name" value={(*client_name).clone()}
                            oninput={{
                                let client_name = client_name.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    client_name.set(input.value());
                                })
                            }}
                            class="p-2.5 bg-input border border-input rounded-lg text-sm" />
                        <input placeholder="Invoice number (e.g. INV-001)" value={(*invoice_number).clone()}
                            oninput={{
                                let invoice_number = invoice_number.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    invoice_number.set(input.value());
                                })
                            }}
                            class="p-2.5 bg-input border border-input rounded-lg text-sm" />
                        <input placeholder="Amount" value={(*amount).clone()}
                            oninput={{
                                let amount = amount.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    amount.set(input.value());
                                })
                            }}
                            class="p-2.5 bg-input border border-input rounded-lg text-sm" />
                        <input type="date" value={(*date).clone()}
                            oninput={{
                                let date = date.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    date.set(input.value());
                                })
                            }}
                            class="p-2.5 bg-input border border-input rounded-lg text-sm" />
                        <input placeholder="Line item description" value={(*item_desc).clone()}
                            oninput={{
                                let item_desc = item_desc.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    item_desc.set(input.value());
                                })
                            }}
                            class="md:col-span-2 p-2.5 bg-input border border-input rounded-lg text-sm" />
                    </div>

                    { if let Some(msg) = &*form_error {
                        html! { <div class="mt-4">{ error_alert(msg) }</div> }
                    } else if let Some(msg) = &*form_success {
                        html! { <div class="mt-4">{ success_alert(msg) }</div> }
                    } else { html!{} } }

                    <div class="flex gap-3 mt-4">
                        <button onclick={on_preview} disabled={*generating}
                            class="flex items-center gap-2 bg-secondary text-secondary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                            { icons::icon_eye() }
                            { if *generating { "Working..." } else { "Preview" } }
                        </button>
                        <button onclick={on_download} disabled={*generating}
                            class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                            { icons::icon_download() }
                            { if *generating { "Working..." } else { "Download" } }
                        </button>
                    </div>
                </div>

                { if let Some(msg) = &*error_msg { error_alert(msg) } else { html!{} } }

                <div class="bg-card rounded-[10px] border border-border overflow-hidden">
                    <div class="p-4 border-b border-border">
                        <h3 class="font-bold text-foreground">{"History"}</h3>
                    </div>
                    <div class="overflow-x-auto">
                        <table class="w-full text-left border-collapse">
                            <thead>
                                <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                    <th class="px-6 py-3 font-bold">{"Reference"}</th>
                                    <th class="px-6 py-3 font-bold">{"Date"}</th>
                                    <th class="px-6 py-3 font-bold">{"Client"}</th>
                                    <th class="px-6 py-3 font-bold text-right">{"Amount"}</th>
                                    <th class="px-6 py-3 font-bold text-right">{"PDF"}</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                { if *loading {
                                    html! { <tr><td colspan="5" class="px-6 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
                                } else if invoices.is_empty() {
                                    html! { <tr><td colspan="5" class="px-6 py-6 text-center text-muted-foreground">{"No invoices yet."}</td></tr> }
                                } else {
                                    html! {
                                        <>
                                            { for invoices.iter().map(|inv| {
                                                let onclick = {
                                                    let reprint = reprint.clone();
                                                    let reference = inv.reference.clone();
                                                    Callback::from(move |_| reprint(reference.clone()))
                                                };
                                                html! {
                                                    <tr key={inv.reference.clone()} class="text-sm hover:bg-muted/30 transition-colors">
                                                        <td class="px-6 py-3 font-semibold text-foreground">{ inv.reference.clone() }</td>
                                                        <td class="px-6 py-3 text-muted-foreground">{ inv.date_issued.clone().unwrap_or_default() }</td>
                                                        <td class="px-6 py-3 text-foreground">{ inv.client_name.clone().unwrap_or_default() }</td>
                                                        <td class="px-6 py-3 text-right text-foreground">{ inv.amount_total.clone().unwrap_or_default() }</td>
                                                        <td class="px-6 py-3 text-right">
                                                            <button {onclick} class="text-primary font-semibold hover:underline">{"Open"}</button>
                                                        </td>
                                                    </tr>
                                                }
                                            }) }
                                        </>
                                    }
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reprint_references_are_url_encoded() {
        assert_eq!(reprint_path("INV-001"), "/api/invoices/INV-001/pdf");
        assert_eq!(
            reprint_path("FAC 2026/08#1"),
            "/api/invoices/FAC%202026%2F08%231/pdf"
        );
    }
}
