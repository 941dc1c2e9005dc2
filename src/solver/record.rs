use crate::dnspod::{Record, DEFAULT_RECORD_LINE};
use crate::zone::un_fqdn;

/// Compute the provider-relative record label for `fqdn` within `zone`.
///
/// Matches on the literal substring `"." + zone`: everything before the first
/// occurrence is the relative label. When the zone doesn't appear as a suffix
/// separator the whole FQDN is returned with its trailing dot stripped. These
/// are exact string semantics, not hierarchical label matching, and the
/// fallback branch is intentional.
#[must_use]
pub fn extract_record_name(fqdn: &str, zone: &str) -> String {
    match fqdn.find(&format!(".{zone}")) {
        Some(idx) => fqdn[..idx].to_string(),
        None => un_fqdn(fqdn).to_string(),
    }
}

/// Build the TXT record attributes presented for a challenge.
pub(super) fn new_txt_record(zone: &str, fqdn: &str, value: &str, ttl: u32) -> Record {
    Record {
        id: String::new(),
        record_type: "TXT".to_string(),
        name: extract_record_name(fqdn, zone),
        value: value.to_string(),
        ttl: ttl.to_string(),
        line: DEFAULT_RECORD_LINE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_label_before_zone_suffix() {
        assert_eq!(
            extract_record_name("_acme-challenge.example.com.", "example.com."),
            "_acme-challenge"
        );
    }

    #[test]
    fn nested_label_is_kept_whole() {
        assert_eq!(
            extract_record_name("_acme-challenge.www.example.com.", "example.com."),
            "_acme-challenge.www"
        );
    }

    #[test]
    fn fallback_strips_trailing_dot_when_zone_is_not_a_suffix() {
        assert_eq!(extract_record_name("foo.bar.", "baz."), "foo.bar");
    }

    #[test]
    fn txt_record_carries_line_and_ttl() {
        let record = new_txt_record("example.com.", "_acme-challenge.example.com.", "proof", 120);
        assert_eq!(record.record_type, "TXT");
        assert_eq!(record.name, "_acme-challenge");
        assert_eq!(record.value, "proof");
        assert_eq!(record.ttl, "120");
        assert_eq!(record.line, DEFAULT_RECORD_LINE);
    }
}
