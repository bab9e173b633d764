//! Reconciles a dossier's linked-file-id list against the agency-wide file
//! history. Pure data shaping, no I/O: the screens re-run these on every
//! render so the derivations can never go stale relative to fetched state.

use crate::models::{Checklist, FileRecord};

/// The backend has shipped three encodings of a dossier's file-id list over
/// time: a JSON array (numbers or strings), a JSON-encoded string, and a
/// comma-separated string. All three normalize to the same ordered,
/// deduplicated list of string ids. Anything unreadable yields an empty list;
/// the caller logs and surfaces a message instead of crashing.
pub fn normalize_file_ids(raw: &serde_json::Value) -> Vec<String> {
    let ids = match raw {
        serde_json::Value::Array(items) => ids_from_array(items),
        serde_json::Value::String(s) => match serde_json::from_str::<serde_json::Value>(s) {
            Ok(serde_json::Value::Array(items)) => ids_from_array(&items),
            _ => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        },
        _ => Vec::new(),
    };
    dedup_preserving_order(ids)
}

fn ids_from_array(items: &[serde_json::Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Splits the file history into the dossier's files and the rest. Ids compare
/// as strings on both sides. Every history entry lands in exactly one half.
pub fn partition_files(
    history: &[FileRecord],
    linked_ids: &[String],
) -> (Vec<FileRecord>, Vec<FileRecord>) {
    let linked_set: std::collections::HashSet<&str> =
        linked_ids.iter().map(String::as_str).collect();
    let mut linked = Vec::new();
    let mut unlinked = Vec::new();
    for file in history {
        if linked_set.contains(file.id.to_string().as_str()) {
            linked.push(file.clone());
        } else {
            unlinked.push(file.clone());
        }
    }
    (linked, unlinked)
}

/// Dossier ids with no counterpart in the loaded history. Non-empty means the
/// history view is stale and the screen shows a refresh prompt instead of
/// silently rendering fewer linked files.
pub fn stale_ids(linked_ids: &[String], history: &[FileRecord]) -> Vec<String> {
    let known: std::collections::HashSet<String> =
        history.iter().map(|f| f.id.to_string()).collect();
    linked_ids
        .iter()
        .filter(|id| !known.contains(*id))
        .cloned()
        .collect()
}

pub fn missing_count(checklist: Option<&Checklist>) -> usize {
    checklist.map(|c| c.missing.len()).unwrap_or(0)
}

/// Document-kind codes as the checklist stores them, mapped to display copy.
pub fn doc_label(code: &str) -> &str {
    match code {
        "payslip" => "Payslip",
        "id" => "Identity document",
        "tax" => "Tax notice",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history(ids: &[i64]) -> Vec<FileRecord> {
        ids.iter()
            .map(|id| {
                serde_json::from_value(json!({"id": id, "filename": format!("f{id}.pdf")}))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn three_encodings_normalize_identically() {
        let as_array = normalize_file_ids(&json!([5, "9"]));
        let as_json_string = normalize_file_ids(&json!("[5, \"9\"]"));
        let as_csv = normalize_file_ids(&json!("5, 9"));

        assert_eq!(as_array, vec!["5", "9"]);
        assert_eq!(as_array, as_json_string);
        assert_eq!(as_array, as_csv);
    }

    #[test]
    fn malformed_ids_yield_empty_not_panic() {
        assert!(normalize_file_ids(&json!(null)).is_empty());
        assert!(normalize_file_ids(&json!(42)).is_empty());
        assert!(normalize_file_ids(&json!({"ids": [1]})).is_empty());
        assert!(normalize_file_ids(&json!("")).is_empty());
    }

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        assert_eq!(normalize_file_ids(&json!(["5", 9, "5", 9])), vec!["5", "9"]);
    }

    #[test]
    fn partition_matches_linked_records() {
        let history = history(&[5, 7, 9]);
        let linked_ids = vec!["5".to_string(), "9".to_string()];
        let (linked, unlinked) = partition_files(&history, &linked_ids);

        let mut linked_ids_found: Vec<i64> = linked.iter().map(|f| f.id).collect();
        linked_ids_found.sort();
        assert_eq!(linked_ids_found, vec![5, 9]);
        assert_eq!(unlinked.iter().map(|f| f.id).collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn partition_covers_history_exactly_once() {
        let history = history(&[1, 2, 3, 4]);
        let linked_ids = vec!["2".to_string(), "4".to_string(), "99".to_string()];
        let (linked, unlinked) = partition_files(&history, &linked_ids);

        assert_eq!(linked.len() + unlinked.len(), history.len());
        let linked_set: std::collections::HashSet<i64> = linked.iter().map(|f| f.id).collect();
        assert!(unlinked.iter().all(|f| !linked_set.contains(&f.id)));
    }

    #[test]
    fn stale_ids_flag_missing_history_entries() {
        let history = history(&[5]);
        let linked_ids = vec!["5".to_string(), "9".to_string()];
        assert_eq!(stale_ids(&linked_ids, &history), vec!["9"]);
        assert!(stale_ids(&["5".to_string()], &history).is_empty());
    }

    #[test]
    fn missing_count_reads_freshest_checklist() {
        let checklist = Checklist {
            received: vec!["payslip".into()],
            missing: vec!["id".into(), "tax".into()],
        };
        assert_eq!(missing_count(Some(&checklist)), 2);
        assert_eq!(missing_count(None), 0);
    }

    #[test]
    fn unknown_doc_codes_pass_through() {
        assert_eq!(doc_label("payslip"), "Payslip");
        assert_eq!(doc_label("rental_history"), "rental_history");
    }
}
