//! Typed views over the backend's JSON. The server owns every entity here;
//! the client only holds re-fetchable copies.
//!
//! Two backend quirks are absorbed at this boundary instead of leaking into
//! screens: list endpoints sometimes wrap their array in an envelope object
//! (`list_from_value`), and a dossier's checklist arrives either as an object
//! or as a JSON-encoded string (`TenantDetail::parsed_checklist`).

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub user_email: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct TenantSummary {
    pub id: i64,
    #[serde(default)]
    pub candidate_email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub documents_count: Option<i64>,
}

#[derive(Clone, PartialEq, Default, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub received: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct TenantDetail {
    pub id: i64,
    #[serde(default)]
    pub candidate_email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Array of ids, JSON-encoded string, or comma-separated string,
    /// depending on the backend version. Normalized in `reconcile`.
    #[serde(default)]
    pub file_ids: serde_json::Value,
    #[serde(default)]
    pub checklist_json: serde_json::Value,
}

impl TenantDetail {
    pub fn parsed_checklist(&self) -> Option<Checklist> {
        match &self.checklist_json {
            serde_json::Value::String(raw) => serde_json::from_str(raw).ok(),
            value @ serde_json::Value::Object(_) => {
                serde_json::from_value(value.clone()).ok()
            }
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct FileRecord {
    #[serde(alias = "file_id")]
    pub id: i64,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, alias = "doc_type")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default, alias = "extracted_date")]
    pub created_at: Option<String>,
}

impl FileRecord {
    pub fn display_name(&self) -> String {
        match &self.filename {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("document_{}", self.id),
        }
    }
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct Invoice {
    pub reference: String,
    #[serde(default)]
    pub date_issued: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub amount_total: Option<String>,
}

#[derive(Clone, PartialEq, Default, Deserialize)]
pub struct Kpis {
    #[serde(default)]
    pub total_emails: i64,
    #[serde(default)]
    pub high_urgency: i64,
    #[serde(default)]
    pub invoices: i64,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Clone, PartialEq, Default, Deserialize)]
pub struct Charts {
    #[serde(default)]
    pub distribution: Vec<ChartSlice>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct RecentEmail {
    pub id: i64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Clone, PartialEq, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub kpis: Kpis,
    #[serde(default)]
    pub charts: Charts,
    #[serde(default)]
    pub recents: Vec<RecentEmail>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct EmailRecord {
    pub id: i64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub suggested_response_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A raw message pulled from the connected mailbox, before any analysis.
#[derive(Clone, PartialEq, Deserialize)]
pub struct InboxMessage {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default, alias = "created_at")]
    pub date: Option<String>,
}

#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgencySettings {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Clone, PartialEq, Default, Deserialize)]
pub struct AccountProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub agency_name: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl AccountProfile {
    pub fn is_admin(&self) -> bool {
        let role = self.role.as_deref().unwrap_or("").to_lowercase();
        role.contains("agency_admin") || role.contains("super_admin")
    }
}

/// List endpoints return either a bare array or an envelope object whose
/// array sits under one of a few historical keys. Entries that no longer
/// deserialize are dropped rather than failing the whole list.
pub fn list_from_value<T>(value: serde_json::Value) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => {
            let mut found = Vec::new();
            for key in ["items", "emails", "data", "results"] {
                if let Some(serde_json::Value::Array(items)) = map.remove(key) {
                    found = items;
                    break;
                }
            }
            found
        }
        _ => Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

/// Newest first, by `created_at`. ISO timestamps compare lexicographically;
/// records without one sink to the bottom.
pub fn sort_newest_first(emails: &mut [EmailRecord]) {
    emails.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_passes_through() {
        let value = json!([{"id": 1}, {"id": 2}]);
        let files: Vec<FileRecord> = list_from_value(value);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].id, 1);
    }

    #[test]
    fn enveloped_arrays_are_unwrapped() {
        for key in ["items", "emails", "data", "results"] {
            let value = json!({ key: [{"id": 7, "subject": "hello"}] });
            let emails: Vec<EmailRecord> = list_from_value(value);
            assert_eq!(emails.len(), 1, "envelope key {key}");
            assert_eq!(emails[0].id, 7);
        }
    }

    #[test]
    fn non_list_payloads_become_empty() {
        let emails: Vec<EmailRecord> = list_from_value(json!("oops"));
        assert!(emails.is_empty());
        let emails: Vec<EmailRecord> = list_from_value(json!({"detail": "err"}));
        assert!(emails.is_empty());
    }

    #[test]
    fn undecodable_entries_are_dropped() {
        let value = json!([{"id": 1}, {"no_id": true}, {"id": 3}]);
        let files: Vec<FileRecord> = list_from_value(value);
        assert_eq!(files.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn file_record_accepts_both_id_spellings() {
        let a: FileRecord = serde_json::from_value(json!({"id": 5})).unwrap();
        let b: FileRecord = serde_json::from_value(json!({"file_id": 5})).unwrap();
        assert_eq!(a.id, b.id);

        let c: FileRecord =
            serde_json::from_value(json!({"id": 5, "doc_type": "payslip"})).unwrap();
        assert_eq!(c.file_type.as_deref(), Some("payslip"));
    }

    #[test]
    fn checklist_parses_from_string_and_object() {
        let as_string: TenantDetail = serde_json::from_value(json!({
            "id": 1,
            "checklist_json": "{\"received\":[\"payslip\"],\"missing\":[\"id\",\"tax\"]}"
        }))
        .unwrap();
        let as_object: TenantDetail = serde_json::from_value(json!({
            "id": 1,
            "checklist_json": {"received": ["payslip"], "missing": ["id", "tax"]}
        }))
        .unwrap();

        let a = as_string.parsed_checklist().unwrap();
        let b = as_object.parsed_checklist().unwrap();
        assert_eq!(a.received, b.received);
        assert_eq!(a.missing, b.missing);
        assert_eq!(a.missing.len(), 2);
    }

    #[test]
    fn malformed_checklist_is_none_not_panic() {
        let detail: TenantDetail =
            serde_json::from_value(json!({"id": 1, "checklist_json": "{broken"})).unwrap();
        assert!(detail.parsed_checklist().is_none());
    }

    #[test]
    fn inbox_messages_accept_both_date_spellings() {
        let a: InboxMessage =
            serde_json::from_value(json!({"subject": "s", "date": "2026-02-01"})).unwrap();
        let b: InboxMessage =
            serde_json::from_value(json!({"subject": "s", "created_at": "2026-02-01"})).unwrap();
        assert_eq!(a.date, b.date);
    }

    #[test]
    fn emails_sort_newest_first() {
        let mut emails: Vec<EmailRecord> = list_from_value(json!([
            {"id": 1, "created_at": "2026-01-01T10:00:00"},
            {"id": 2, "created_at": "2026-03-01T10:00:00"},
            {"id": 3}
        ]));
        sort_newest_first(&mut emails);
        assert_eq!(emails.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }
}
