mod api;
mod icons;
mod models;
mod pages;
mod reconcile;
mod session;
mod stats;

use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::icons::*;
use crate::pages::account::AccountPage;
use crate::pages::auth::AuthScreen;
use crate::pages::dashboard::DashboardPage;
use crate::pages::documents::DocumentsPage;
use crate::pages::emails::EmailsPage;
use crate::pages::invoices::InvoicesPage;
use crate::pages::query_param;
use crate::pages::settings::SettingsPage;
use crate::pages::tenants::TenantsPage;

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Dashboard,
    Emails,
    Invoices,
    Tenants,
    Documents,
    Settings,
    Account,
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
    on_logout: Callback<()>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar
                    active_page={props.active_page}
                    on_select={props.on_select.clone()}
                    on_logout={props.on_logout.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
    on_logout: Callback<()>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            page: Page::Dashboard,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Emails",
            page: Page::Emails,
            icon: icon_mail,
        },
        NavItem {
            label: "Invoices",
            page: Page::Invoices,
            icon: icon_file_text,
        },
        NavItem {
            label: "Tenant files",
            page: Page::Tenants,
            icon: icon_folder,
        },
        NavItem {
            label: "Documents",
            page: Page::Documents,
            icon: icon_upload,
        },
        NavItem {
            label: "Settings",
            page: Page::Settings,
            icon: icon_settings,
        },
        NavItem {
            label: "My account",
            page: Page::Account,
            icon: icon_user,
        },
    ];

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <div class="w-[220px] h-screen bg-card border-r border-border p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-10 h-10 bg-primary rounded-xl flex items-center justify-center text-primary-foreground">
                    { icon_zap() }
                </div>
                <span class="text-foreground text-xl font-black tracking-tight">{"LocaFlow"}</span>
            </div>

            <nav class="flex-1 space-y-1">
                { for nav_items.iter().map(|item| {
                    let is_active = item.page == props.active_page;
                    let class_name = if is_active {
                        "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-primary/10 text-primary w-full"
                    } else {
                        "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-muted-foreground hover:bg-muted/40 hover:text-foreground w-full"
                    };
                    let on_select = props.on_select.clone();
                    let page = item.page;

                    html! {
                        <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                            <span class="shrink-0">{ (item.icon)() }</span>
                            <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                        </button>
                    }
                }) }
            </nav>

            <div class="mt-auto pt-4 border-t border-border">
                <p class="px-4 pb-2 text-xs text-muted-foreground truncate">
                    { session::email().unwrap_or_default() }
                </p>
                <button onclick={on_logout}
                    class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-muted/40 transition-colors text-[13px] font-medium text-muted-foreground">
                    { icon_log_out() }
                    <span>{"Log out"}</span>
                </button>
            </div>
        </div>
    }
}

/// Picks up a token handed back in the query string after an OAuth round trip,
/// stores it, and strips the credentials from the visible URL.
fn consume_oauth_redirect() {
    let Some(token) = query_param("access_token") else {
        return;
    };
    if token.is_empty() {
        return;
    }
    let email = query_param("user_email");
    session::store(&token, email.as_deref());

    if let Some(window) = web_sys::window() {
        if let Ok(path) = window.location().pathname() {
            let _ = window
                .history()
                .and_then(|h| h.replace_state_with_url(&JsValue::NULL, "", Some(&path)));
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let authed = use_state(|| {
        consume_oauth_redirect();
        session::token().is_some()
    });
    let active_page = use_state(|| Page::Dashboard);
    let client = use_memo(|_| ApiClient::default(), ());

    if !*authed {
        let authed = authed.clone();
        return html! {
            <AuthScreen on_authenticated={Callback::from(move |_| authed.set(true))} />
        };
    }

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    let on_logout = {
        let authed = authed.clone();
        let client = client.clone();
        Callback::from(move |_| {
            let client = client.clone();
            let authed = authed.clone();
            spawn_local(async move {
                // Best effort; the session is discarded locally either way.
                let _ = client.post_json("/auth/logout", serde_json::json!({})).await;
                session::clear();
                authed.set(false);
            });
        })
    };

    html! {
        <ContextProvider<Rc<ApiClient>> context={client.clone()}>
            <Layout active_page={*active_page} {on_select} {on_logout}>
                {
                    match *active_page {
                        Page::Dashboard => html! { <DashboardPage /> },
                        Page::Emails => html! { <EmailsPage /> },
                        Page::Invoices => html! { <InvoicesPage /> },
                        Page::Tenants => html! { <TenantsPage /> },
                        Page::Documents => html! { <DocumentsPage /> },
                        Page::Settings => html! { <SettingsPage /> },
                        Page::Account => html! { <AccountPage /> },
                    }
                }
            </Layout>
        </ContextProvider<Rc<ApiClient>>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
