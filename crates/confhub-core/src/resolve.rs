//! Pure lookup over candidate rows sharing one (application, profile) pair.

use crate::model::ConfigProperty;

/// Select the row answering a `(label, key)` lookup among candidates.
///
/// Key matching is exact and case-sensitive. A stored label of `None` acts
/// as a wildcard and matches any target; a stored label of `Some(s)` matches
/// only a target of `Some(t)` with `s == t`. When the target carries no
/// label, only unlabelled rows are eligible.
///
/// An exact stored-label match outranks the unlabelled wildcard: the two are
/// distinct tuples and may legitimately coexist for the same key. Among
/// equal-specificity duplicates, which can only exist if the store's
/// uniqueness constraint was bypassed, the first candidate in store-return
/// order wins; that ordering is undefined precedence and must not be relied
/// upon.
///
/// `None` is a legitimate negative result, not a failure.
#[must_use]
pub fn resolve<'a>(
    candidates: &'a [ConfigProperty],
    key: &str,
    label: Option<&str>,
) -> Option<&'a ConfigProperty> {
    let mut wildcard = None;
    for candidate in candidates {
        if candidate.key != key {
            continue;
        }
        match (candidate.label.as_deref(), label) {
            (Some(stored), Some(target)) if stored == target => return Some(candidate),
            (None, _) => {
                if wildcard.is_none() {
                    wildcard = Some(candidate);
                }
            }
            _ => {}
        }
    }
    wildcard
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::row;

    #[test]
    fn exact_key_match_only() {
        let candidates = vec![row("myapp", "dev", None, "server.port", "8080")];
        assert!(resolve(&candidates, "server", None).is_none());
        assert!(resolve(&candidates, "server.port.extra", None).is_none());
        assert!(resolve(&candidates, "Server.Port", None).is_none());
        assert_eq!(
            resolve(&candidates, "server.port", None).map(|p| p.value.as_str()),
            Some("8080")
        );
    }

    #[test]
    fn unlabelled_row_matches_any_target_label() {
        let candidates = vec![row("myapp", "dev", None, "server.port", "8080")];
        assert!(resolve(&candidates, "server.port", Some("v2")).is_some());
        assert!(resolve(&candidates, "server.port", None).is_some());
    }

    #[test]
    fn labelled_row_matches_only_its_own_label() {
        let candidates = vec![row("myapp", "dev", Some("v2"), "server.port", "9090")];
        assert!(resolve(&candidates, "server.port", Some("v2")).is_some());
        assert!(resolve(&candidates, "server.port", Some("v3")).is_none());
        assert!(resolve(&candidates, "server.port", None).is_none());
    }

    #[test]
    fn exact_label_outranks_wildcard() {
        let candidates = vec![
            row("myapp", "dev", None, "server.port", "8080"),
            row("myapp", "dev", Some("v1"), "server.port", "9090"),
        ];
        assert_eq!(
            resolve(&candidates, "server.port", Some("v1")).map(|p| p.value.as_str()),
            Some("9090")
        );
        assert_eq!(
            resolve(&candidates, "server.port", None).map(|p| p.value.as_str()),
            Some("8080")
        );
    }

    #[test]
    fn duplicate_wildcards_pick_first_in_store_order() {
        // Only reachable when the store constraint was bypassed out-of-band.
        let candidates = vec![
            row("myapp", "dev", None, "server.port", "first"),
            row("myapp", "dev", None, "server.port", "second"),
        ];
        assert_eq!(
            resolve(&candidates, "server.port", None).map(|p| p.value.as_str()),
            Some("first")
        );
    }

    #[test]
    fn empty_candidate_set_is_a_clean_miss() {
        assert!(resolve(&[], "server.port", None).is_none());
    }
}
