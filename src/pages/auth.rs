use gloo_console::error;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiClient, API_BASE_URL};
use crate::models::TokenResponse;
use crate::pages::{error_alert, query_param, success_alert};
use crate::session;

#[derive(Clone, PartialEq)]
enum AuthMode {
    Login,
    Register,
    Forgot,
    Reset { token: String },
    Verify { token: Option<String> },
}

fn verify_link(pathname: &str) -> bool {
    pathname.trim_end_matches('/').ends_with("verify-email")
}

/// Deep links decide the starting screen: an email-verification link lands on
/// the verify flow even without its token, a reset link on the reset form.
fn initial_mode(
    pathname: &str,
    reset_token: Option<String>,
    verify_token: Option<String>,
) -> AuthMode {
    if verify_link(pathname) {
        return AuthMode::Verify {
            token: verify_token.filter(|t| !t.is_empty()),
        };
    }
    match reset_token {
        Some(token) if !token.is_empty() => AuthMode::Reset { token },
        _ => AuthMode::Login,
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProps {
    pub on_authenticated: Callback<()>,
}

fn field(
    label: &str,
    kind: &str,
    value: &str,
    placeholder: &str,
    oninput: Callback<InputEvent>,
) -> Html {
    html! {
        <div>
            <label class="block text-sm font-bold text-foreground mb-1">{ label.to_string() }</label>
            <input
                type={kind.to_string()}
                value={value.to_string()}
                placeholder={placeholder.to_string()}
                {oninput}
                class="w-full bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground" />
        </div>
    }
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthProps) -> Html {
    let api = use_state(ApiClient::default);
    let mode = use_state(|| {
        let pathname = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        initial_mode(&pathname, query_param("reset_token"), query_param("token"))
    });

    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let busy = use_state(|| false);
    let error_msg = use_state(|| None::<String>);
    let info_msg = use_state(|| None::<String>);

    let switch = {
        let mode = mode.clone();
        let error_msg = error_msg.clone();
        let info_msg = info_msg.clone();
        move |target: AuthMode| {
            let mode = mode.clone();
            let error_msg = error_msg.clone();
            let info_msg = info_msg.clone();
            Callback::from(move |_: MouseEvent| {
                error_msg.set(None);
                info_msg.set(None);
                mode.set(target.clone());
            })
        }
    };

    let on_submit = {
        let api = api.clone();
        let mode = mode.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let busy = busy.clone();
        let error_msg = error_msg.clone();
        let info_msg = info_msg.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error_msg.set(None);
            info_msg.set(None);

            let email_val = email.trim().to_string();
            let password_val = (*password).clone();
            let current = (*mode).clone();

            match &current {
                AuthMode::Forgot => {
                    if email_val.is_empty() {
                        error_msg.set(Some("Enter your email address.".to_string()));
                        return;
                    }
                }
                AuthMode::Reset { .. } => {
                    if password_val.is_empty() {
                        error_msg.set(Some("Enter a new password.".to_string()));
                        return;
                    }
                    if password_val != *confirm {
                        error_msg.set(Some("The passwords do not match.".to_string()));
                        return;
                    }
                }
                AuthMode::Login => {
                    if email_val.is_empty() || password_val.is_empty() {
                        error_msg.set(Some("Enter your email and password.".to_string()));
                        return;
                    }
                }
                AuthMode::Register => {
                    if email_val.is_empty() || password_val.is_empty() {
                        error_msg.set(Some("Enter your email and password.".to_string()));
                        return;
                    }
                    if password_val != *confirm {
                        error_msg.set(Some("The passwords do not match.".to_string()));
                        return;
                    }
                }
                AuthMode::Verify { .. } => return,
            }

            busy.set(true);
            let api = api.clone();
            let mode = mode.clone();
            let busy = busy.clone();
            let error_msg = error_msg.clone();
            let info_msg = info_msg.clone();
            let on_authenticated = on_authenticated.clone();
            spawn_local(async move {
                let result = match &current {
                    AuthMode::Login => {
                        api.post_json_public(
                            "/auth/login",
                            json!({ "email": email_val, "password": password_val }),
                        )
                        .await
                    }
                    AuthMode::Register => {
                        api.post_json_public(
                            "/auth/register",
                            json!({ "email": email_val, "password": password_val }),
                        )
                        .await
                    }
                    AuthMode::Forgot => {
                        api.post_json_public("/auth/forgot-password", json!({ "email": email_val }))
                            .await
                    }
                    AuthMode::Reset { token } => {
                        api.post_json_public(
                            "/auth/reset-password",
                            json!({ "token": token, "new_password": password_val }),
                        )
                        .await
                    }
                    AuthMode::Verify { .. } => return,
                };

                match result {
                    Ok(resp) if resp.ok() => match &current {
                        AuthMode::Login | AuthMode::Register => {
                            match resp.json::<TokenResponse>().await {
                                Ok(token) => {
                                    session::store(
                                        &token.access_token,
                                        token.user_email.as_deref(),
                                    );
                                    on_authenticated.emit(());
                                }
                                Err(e) => {
                                    error!(format!("token decode: {}", e));
                                    error_msg.set(Some(
                                        "The server response could not be read.".to_string(),
                                    ));
                                }
                            }
                        }
                        AuthMode::Forgot => {
                            // Same message whether or not the account exists.
                            info_msg.set(Some(
                                "If an account exists for this address, a reset link has been sent."
                                    .to_string(),
                            ));
                        }
                        AuthMode::Reset { .. } => {
                            info_msg.set(Some(
                                "Password updated. You can sign in now.".to_string(),
                            ));
                            mode.set(AuthMode::Login);
                        }
                        AuthMode::Verify { .. } => {}
                    },
                    Ok(resp) => {
                        let msg = api::error_detail(resp, "Authentication failed.").await;
                        error_msg.set(Some(msg));
                    }
                    Err(e) => {
                        error!(format!("auth: {}", e));
                        error_msg.set(Some(e.user_message()));
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_google = Callback::from(|_| {
        if let Some(window) = web_sys::window() {
            let _ = window
                .location()
                .set_href(&format!("{}/auth/google/login", API_BASE_URL));
        }
    });

    let bind = |handle: UseStateHandle<String>| {
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            handle.set(input.value());
        })
    };

    if let AuthMode::Verify { token } = &*mode {
        let on_back = {
            let mode = mode.clone();
            Callback::from(move |_| mode.set(AuthMode::Login))
        };
        return html! { <VerifyEmailScreen token={token.clone()} {on_back} /> };
    }

    let title = match &*mode {
        AuthMode::Login => "Sign in",
        AuthMode::Register => "Create your account",
        AuthMode::Forgot => "Forgot password",
        AuthMode::Reset { .. } => "Choose a new password",
        AuthMode::Verify { .. } => "",
    };
    let submit_label = if *busy {
        "Please wait..."
    } else {
        match &*mode {
            AuthMode::Login => "Sign in",
            AuthMode::Register => "Create account",
            AuthMode::Forgot => "Send reset link",
            AuthMode::Reset { .. } => "Update password",
            AuthMode::Verify { .. } => "",
        }
    };

    html! {
        <div class="min-h-screen bg-background flex items-center justify-center p-4">
            <div class="w-full max-w-md">
                <div class="text-center mb-8">
                    <h1 class="text-3xl font-extrabold text-foreground">{"LocaFlow"}</h1>
                    <p class="text-sm text-muted-foreground mt-1">{"Your rental agency, on autopilot"}</p>
                </div>
                <div class="bg-card rounded-[10px] border border-border p-6">
                    <h2 class="font-bold text-foreground text-lg mb-4">{ title }</h2>

                    { if let Some(msg) = &*error_msg { error_alert(msg) } else { html!{} } }
                    { if let Some(msg) = &*info_msg { success_alert(msg) } else { html!{} } }

                    <form onsubmit={on_submit} class="space-y-4 mt-2">
                        { if !matches!(&*mode, AuthMode::Reset { .. }) {
                            field("Email", "email", &email, "you@agency.com", bind(email.clone()))
                        } else { html!{} } }
                        { if !matches!(&*mode, AuthMode::Forgot) {
                            field(
                                if matches!(&*mode, AuthMode::Reset { .. }) { "New password" } else { "Password" },
                                "password", &password, "••••••••", bind(password.clone()))
                        } else { html!{} } }
                        { if matches!(&*mode, AuthMode::Register | AuthMode::Reset { .. }) {
                            field("Confirm password", "password", &confirm, "••••••••", bind(confirm.clone()))
                        } else { html!{} } }
                        <button type="submit" disabled={*busy}
                            class="w-full bg-primary text-primary-foreground py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                            { submit_label }
                        </button>
                    </form>

                    { if matches!(&*mode, AuthMode::Login | AuthMode::Register) {
                        html! {
                            <button onclick={on_google}
                                class="w-full mt-3 border border-border text-foreground py-2 rounded-xl font-bold text-sm hover:bg-muted/40 transition-all">
                                {"Continue with Google"}
                            </button>
                        }
                    } else { html!{} } }

                    <div class="mt-6 text-center text-sm text-muted-foreground space-y-2">
                        { match &*mode {
                            AuthMode::Login => html! {
                                <>
                                    <p>
                                        {"No account yet? "}
                                        <button onclick={switch(AuthMode::Register)} class="text-primary font-bold hover:underline">
                                            {"Create one"}
                                        </button>
                                    </p>
                                    <p>
                                        <button onclick={switch(AuthMode::Forgot)} class="text-primary font-bold hover:underline">
                                            {"Forgot your password?"}
                                        </button>
                                    </p>
                                </>
                            },
                            _ => html! {
                                <p>
                                    <button onclick={switch(AuthMode::Login)} class="text-primary font-bold hover:underline">
                                        {"Back to sign in"}
                                    </button>
                                </p>
                            },
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum VerifyStatus {
    Checking,
    Confirmed,
    Failed,
}

#[derive(Properties, PartialEq)]
struct VerifyProps {
    token: Option<String>,
    on_back: Callback<MouseEvent>,
}

/// Landing screen for the verification link sent at registration.
#[function_component(VerifyEmailScreen)]
fn verify_email_screen(props: &VerifyProps) -> Html {
    let api = use_state(ApiClient::default);
    let status = use_state(|| VerifyStatus::Checking);
    let message = use_state(|| "Checking your verification link...".to_string());
    let resend_email = use_state(String::new);
    let resending = use_state(|| false);

    {
        let api = api.clone();
        let status = status.clone();
        let message = message.clone();
        let token = props.token.clone();
        use_effect_with_deps(
            move |_| {
                match token {
                    None => {
                        status.set(VerifyStatus::Failed);
                        message.set("This verification link is missing its token.".to_string());
                    }
                    Some(token) => {
                        spawn_local(async move {
                            let path = format!(
                                "/auth/verify-email?token={}",
                                urlencoding::encode(&token)
                            );
                            match api.get_public(&path).await {
                                Ok(resp) if resp.ok() => {
                                    status.set(VerifyStatus::Confirmed);
                                    message.set(
                                        "Your email is confirmed. You can sign in now."
                                            .to_string(),
                                    );
                                }
                                Ok(resp) => {
                                    let msg = api::error_detail(
                                        resp,
                                        "Verification failed. The link may have expired.",
                                    )
                                    .await;
                                    status.set(VerifyStatus::Failed);
                                    message.set(msg);
                                }
                                Err(e) => {
                                    error!(format!("verify email: {}", e));
                                    status.set(VerifyStatus::Failed);
                                    message.set(e.user_message());
                                }
                            }
                        });
                    }
                }
                || ()
            },
            (),
        );
    }

    let on_resend = {
        let api = api.clone();
        let status = status.clone();
        let message = message.clone();
        let resend_email = resend_email.clone();
        let resending = resending.clone();
        Callback::from(move |_| {
            let email = resend_email.trim().to_string();
            if email.is_empty() {
                return;
            }
            resending.set(true);

            let api = api.clone();
            let status = status.clone();
            let message = message.clone();
            let resending = resending.clone();
            spawn_local(async move {
                match api
                    .post_json_public("/auth/resend-verification", json!({ "email": email }))
                    .await
                {
                    Ok(resp) if resp.ok() => {
                        status.set(VerifyStatus::Confirmed);
                        message.set("Verification email sent. Check your inbox.".to_string());
                    }
                    Ok(resp) => {
                        let msg =
                            api::error_detail(resp, "Could not resend the email.").await;
                        message.set(msg);
                    }
                    Err(e) => {
                        error!(format!("resend verification: {}", e));
                        message.set(e.user_message());
                    }
                }
                resending.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen bg-background flex items-center justify-center p-4">
            <div class="w-full max-w-md">
                <div class="text-center mb-8">
                    <h1 class="text-3xl font-extrabold text-foreground">{"LocaFlow"}</h1>
                </div>
                <div class="bg-card rounded-[10px] border border-border p-6">
                    <h2 class="font-bold text-foreground text-lg mb-4">{"Email verification"}</h2>

                    { match *status {
                        VerifyStatus::Checking => html! {
                            <p class="text-sm text-muted-foreground">{ (*message).clone() }</p>
                        },
                        VerifyStatus::Confirmed => success_alert(&message),
                        VerifyStatus::Failed => error_alert(&message),
                    }}

                    { if *status == VerifyStatus::Failed {
                        html! {
                            <div class="mt-4 space-y-2">
                                <input type="email" placeholder="Your email, to resend the link"
                                    value={(*resend_email).clone()}
                                    oninput={{
                                        let resend_email = resend_email.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                            resend_email.set(input.value());
                                        })
                                    }}
                                    class="w-full bg-muted/40 border border-border rounded-xl px-3 py-2 text-sm text-foreground" />
                                <button onclick={on_resend} disabled={*resending}
                                    class="w-full border border-border text-foreground py-2 rounded-xl font-bold text-sm hover:bg-muted/40 transition-all">
                                    { if *resending { "Sending..." } else { "Resend the link" } }
                                </button>
                            </div>
                        }
                    } else { html!{} } }

                    <button onclick={props.on_back.clone()}
                        class="w-full mt-4 bg-primary text-primary-foreground py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        {"Go to sign in"}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_links_open_the_verify_screen() {
        let mode = initial_mode("/verify-email", None, Some("abc".to_string()));
        assert!(matches!(mode, AuthMode::Verify { token: Some(t) } if t == "abc"));
        // Trailing slash variants from emailed links.
        assert!(verify_link("/verify-email/"));
    }

    #[test]
    fn tokenless_verification_links_still_land_on_verify() {
        let mode = initial_mode("/verify-email", None, None);
        assert!(matches!(mode, AuthMode::Verify { token: None }));
    }

    #[test]
    fn reset_links_open_the_reset_form() {
        let mode = initial_mode("/", Some("rst".to_string()), None);
        assert!(matches!(mode, AuthMode::Reset { token } if token == "rst"));
    }

    #[test]
    fn plain_visits_land_on_login() {
        assert!(matches!(initial_mode("/", None, None), AuthMode::Login));
        assert!(matches!(
            initial_mode("/", Some(String::new()), None),
            AuthMode::Login
        ));
    }
}
