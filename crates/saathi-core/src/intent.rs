//! Intent classification for user input.
//!
//! Decides whether a user utterance is asking for a URL safety scan, and
//! extracts the target URL when one is present. Both functions are pure,
//! deterministic, and total over arbitrary input.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trigger phrases that mark an utterance as a scan request.
/// Matching is case-insensitive substring containment.
const SCAN_TRIGGERS: &[&str] = &[
    "scan url",
    "check url",
    "check website",
    "scan website",
    "is this site safe",
    "website safety",
    "url safety",
    "scan this site",
];

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid URL pattern"));

/// Returns true when the input contains any scan trigger phrase.
///
/// `"Scan URL http://x"` and `"please scan url now"` both classify true;
/// the empty string classifies false.
pub fn is_url_scan_request(input: &str) -> bool {
    let lowered = input.to_lowercase();
    SCAN_TRIGGERS.iter().any(|trigger| lowered.contains(trigger))
}

/// Extracts the first scheme-qualified URL token from the input.
///
/// A token is `http://` or `https://` followed greedily by non-whitespace,
/// returned verbatim including any trailing path or query. Returns `None`
/// when no such token exists; a scan request without a URL is a valid
/// ambiguous-intent outcome, not an error.
pub fn extract_url(input: &str) -> Option<&str> {
    URL_PATTERN.find(input).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_is_case_insensitive_substring() {
        assert!(is_url_scan_request("Scan URL http://x"));
        assert!(is_url_scan_request("please scan url now"));
        assert!(is_url_scan_request("IS THIS SITE SAFE? example.com"));
        assert!(is_url_scan_request("could you check website safety for me"));
    }

    #[test]
    fn test_classifier_rejects_general_chat() {
        assert!(!is_url_scan_request("how do I report a cyber crime?"));
        assert!(!is_url_scan_request(""));
        assert!(!is_url_scan_request("what is phishing"));
    }

    #[test]
    fn test_extract_first_url_verbatim() {
        assert_eq!(
            extract_url("scan url https://example.com/a?b=1 and http://other.io"),
            Some("https://example.com/a?b=1")
        );
        assert_eq!(extract_url("see http://x.io."), Some("http://x.io."));
    }

    #[test]
    fn test_extract_none_without_scheme() {
        assert_eq!(extract_url("scan this site example.com"), None);
        assert_eq!(extract_url(""), None);
        assert_eq!(extract_url("ftp://not.http"), None);
    }

    #[test]
    fn test_scan_intent_without_target_is_valid() {
        let input = "scan this site";
        assert!(is_url_scan_request(input));
        assert_eq!(extract_url(input), None);
    }
}
