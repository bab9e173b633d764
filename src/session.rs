//! Session store: the bearer token and last-known user email, persisted in
//! localStorage so a page reload keeps the session alive.
//!
//! Storage keys are defined here and nowhere else. An older build stored the
//! token under a bare `token` key; reads fall back to it, writes always go to
//! the canonical key, and `clear` removes both.

const LS_TOKEN: &str = "locaflow_token";
const LS_TOKEN_LEGACY: &str = "token";
const LS_EMAIL: &str = "locaflow_email";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn read_key(key: &str) -> Option<String> {
    storage().and_then(|s| s.get_item(key).ok().flatten())
}

/// Picks the canonical token when present, otherwise the legacy one.
/// Empty strings count as absent.
fn resolve_token(canonical: Option<String>, legacy: Option<String>) -> Option<String> {
    canonical
        .filter(|t| !t.is_empty())
        .or_else(|| legacy.filter(|t| !t.is_empty()))
}

pub fn token() -> Option<String> {
    resolve_token(read_key(LS_TOKEN), read_key(LS_TOKEN_LEGACY))
}

pub fn email() -> Option<String> {
    read_key(LS_EMAIL)
}

pub fn store(token: &str, email: Option<&str>) {
    if let Some(s) = storage() {
        let _ = s.set_item(LS_TOKEN, token);
        if let Some(email) = email {
            let _ = s.set_item(LS_EMAIL, email);
        }
    }
}

pub fn clear() {
    if let Some(s) = storage() {
        let _ = s.remove_item(LS_TOKEN);
        let _ = s.remove_item(LS_TOKEN_LEGACY);
        let _ = s.remove_item(LS_EMAIL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_wins_over_legacy() {
        let t = resolve_token(Some("new".into()), Some("old".into()));
        assert_eq!(t.as_deref(), Some("new"));
    }

    #[test]
    fn legacy_key_used_when_canonical_absent() {
        let t = resolve_token(None, Some("old".into()));
        assert_eq!(t.as_deref(), Some("old"));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        assert_eq!(resolve_token(Some(String::new()), None), None);
        let t = resolve_token(Some(String::new()), Some("old".into()));
        assert_eq!(t.as_deref(), Some("old"));
    }

    #[test]
    fn key_names_are_stable() {
        // Renaming these keys logs every existing user out.
        assert_eq!(LS_TOKEN, "locaflow_token");
        assert_eq!(LS_EMAIL, "locaflow_email");
    }
}
