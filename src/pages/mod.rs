pub mod account;
pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod emails;
pub mod invoices;
pub mod settings;
pub mod tenants;

use std::rc::Rc;

use yew::prelude::*;

use crate::api::ApiClient;

/// The request client every screen uses, provided at the app root.
#[hook]
pub fn use_api() -> Rc<ApiClient> {
    use_context::<Rc<ApiClient>>().unwrap_or_default()
}

pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|v| !v.is_empty())
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            { children }
        </div>
    }
}

pub fn error_alert(message: &str) -> Html {
    html! {
        <div class="p-3 rounded-lg bg-red-50 border border-red-200 text-red-600 text-sm">
            { message.to_string() }
        </div>
    }
}

pub fn success_alert(message: &str) -> Html {
    html! {
        <div class="p-3 rounded-lg bg-green-50 border border-green-200 text-green-700 text-sm">
            { message.to_string() }
        </div>
    }
}
