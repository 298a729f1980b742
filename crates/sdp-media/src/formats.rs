//! Format list reconciliation
//!
//! Implements the offer/answer rule of RFC 3264 for the format list of a
//! single media line: a peer is never asked to enable a format it did not
//! offer, unless the caller forces the new list.
//!
//! ## Reconciliation rules
//!
//! | Offered       | Current list | `force` | Result                                  |
//! |---------------|--------------|---------|-----------------------------------------|
//! | empty / same  | any          | any     | unchanged                               |
//! | one format    | empty        | any     | accepted                                |
//! | one format    | non-empty    | false   | accepted only if already in the list    |
//! | several       | non-empty    | false   | ordered intersection, rejected if empty |
//! | anything      | any          | true    | accepted verbatim                       |

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Ordered list of format tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatList(Vec<String>);

impl FormatList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated format list, skipping empty tokens
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// The comma joined external representation
    pub fn join(&self) -> String {
        self.0.join(",")
    }

    /// First (preferred) format
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn contains_token(&self, format: &str) -> bool {
        self.0.iter().any(|f| f == format)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tokens of `self`, in their order, that also appear in `other`
    pub fn intersect_ordered(&self, other: &FormatList) -> FormatList {
        FormatList(
            self.0
                .iter()
                .filter(|f| other.contains_token(f))
                .cloned()
                .collect(),
        )
    }
}

impl fmt::Display for FormatList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl<S: Into<String>> FromIterator<S> for FormatList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Outcome of reconciling an offered format list with the current one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing offered, or the offer equals the current list
    Unchanged,
    /// The offer was acceptable; this is the new list
    Accepted(FormatList),
    /// A single format that does not occur in the current list text
    RejectedSingle,
    /// Several formats, none of which is part of the current list
    RejectedDisjoint,
}

impl Reconciliation {
    /// The newly accepted list, if any
    pub fn accepted(&self) -> Option<&FormatList> {
        match self {
            Self::Accepted(list) => Some(list),
            _ => None,
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Reconcile an offered raw format list against the current one.
pub fn reconcile(current: &FormatList, offered_raw: &str, force: bool) -> Reconciliation {
    let offered = FormatList::parse(offered_raw);
    if offered.is_empty() || offered == *current {
        return Reconciliation::Unchanged;
    }

    let candidate = if force || current.is_empty() {
        offered
    } else if offered.len() == 1 {
        let single = offered.first().unwrap_or_default();
        if !current.join().contains(single) {
            debug!("Not changing to '{}' from '{}'", offered_raw, current);
            return Reconciliation::RejectedSingle;
        }
        offered
    } else {
        let kept = offered.intersect_ordered(current);
        if kept.is_empty() {
            debug!("Not changing formats '{}', none of '{}' offered before", current, offered_raw);
            return Reconciliation::RejectedDisjoint;
        }
        kept
    };

    if candidate == *current {
        return Reconciliation::Unchanged;
    }
    info!(
        "Choosing offered format '{}' from '{}'",
        candidate.first().unwrap_or_default(),
        candidate
    );
    Reconciliation::Accepted(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(raw: &str) -> FormatList {
        FormatList::parse(raw)
    }

    #[test]
    fn test_parse_and_join() {
        let formats = list("g711, g729,,gsm");
        assert_eq!(formats.iter().collect::<Vec<_>>(), vec!["g711", "g729", "gsm"]);
        assert_eq!(formats.join(), "g711,g729,gsm");
        assert_eq!(formats.first(), Some("g711"));
        assert!(list("").is_empty());
        assert!(list(" , ").is_empty());
    }

    #[test]
    fn test_single_format_in_current_list() {
        let result = reconcile(&list("g711,g729"), "g729", false);
        assert_eq!(result, Reconciliation::Accepted(list("g729")));
    }

    #[test]
    fn test_single_format_not_in_current_list() {
        assert_eq!(
            reconcile(&list("g711,g729"), "speex", false),
            Reconciliation::RejectedSingle
        );
    }

    #[test]
    fn test_single_format_matches_within_current_text() {
        // "g729" only appears inside "g729a"
        assert_eq!(
            reconcile(&list("g729a,alaw"), "g729", false),
            Reconciliation::Accepted(list("g729"))
        );
    }

    #[test]
    fn test_multiple_formats_keep_offered_order() {
        let result = reconcile(&list("g711,g729,gsm"), "gsm,ilbc,g711", false);
        assert_eq!(result, Reconciliation::Accepted(list("gsm,g711")));
    }

    #[test]
    fn test_multiple_formats_disjoint() {
        assert_eq!(
            reconcile(&list("g711,g729"), "speex,ilbc", false),
            Reconciliation::RejectedDisjoint
        );
    }

    #[test]
    fn test_intersection_equal_to_current_is_unchanged() {
        assert_eq!(
            reconcile(&list("g711,g729"), "g711,speex,g729", false),
            Reconciliation::Unchanged
        );
    }

    #[test]
    fn test_empty_current_list_accepts_verbatim() {
        assert_eq!(
            reconcile(&FormatList::new(), "speex,g711", false),
            Reconciliation::Accepted(list("speex,g711"))
        );
        assert_eq!(
            reconcile(&FormatList::new(), "speex", false),
            Reconciliation::Accepted(list("speex"))
        );
    }

    #[test]
    fn test_force_accepts_verbatim() {
        assert_eq!(
            reconcile(&list("g711,g729"), "x", true),
            Reconciliation::Accepted(list("x"))
        );
        assert_eq!(
            reconcile(&list("g711"), "ilbc,speex", true),
            Reconciliation::Accepted(list("ilbc,speex"))
        );
    }

    #[test]
    fn test_empty_or_same_offer() {
        assert_eq!(reconcile(&list("g711"), "", false), Reconciliation::Unchanged);
        assert_eq!(reconcile(&list("g711"), "", true), Reconciliation::Unchanged);
        assert_eq!(
            reconcile(&list("g711,g729"), "g711,g729", true),
            Reconciliation::Unchanged
        );
    }
}
