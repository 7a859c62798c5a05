//! Registrable-domain extraction
//!
//! The zone owning a hostname is looked up by its registrable domain: the
//! public suffix plus one label (`foo.bar.example.co.uk` → `example.co.uk`).
//!
//! Only the ICANN section of the public suffix list counts. Private entries
//! (`github.io`, `herokuapp.com`, ...) are registrable domains themselves,
//! not suffixes, since they are zones someone owns.

use crate::error::{Error, Result};
use psl::{Suffix, Type};

/// Canonical spelling of a hostname: trimmed, lowercase, no root dot
pub fn normalize_hostname(hostname: &str) -> String {
    hostname.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Registrable domain of `hostname`
///
/// Matching is case-insensitive and ignores a trailing root dot. Hostnames
/// that are a bare suffix, a single label, or end in a suffix missing from
/// the public suffix list have no registrable domain.
pub fn registrable_domain(hostname: &str) -> Result<String> {
    let name = normalize_hostname(hostname);
    let unresolvable = || Error::UnresolvableDomain(hostname.to_string());

    let suffix = icann_suffix(name.as_bytes()).ok_or_else(unresolvable)?;
    let suffix_len = suffix.as_bytes().len();

    // at least one label in front of the suffix
    if name.len() <= suffix_len + 1 || name.as_bytes()[name.len() - suffix_len - 1] != b'.' {
        return Err(unresolvable());
    }

    let prefix = &name[..name.len() - suffix_len - 1];
    let label = prefix.rsplit('.').next().unwrap_or(prefix);
    if label.is_empty() {
        return Err(unresolvable());
    }

    Ok(format!("{}.{}", label, &name[name.len() - suffix_len..]))
}

/// Longest ICANN suffix of `name`
///
/// A private rule always sits below an ICANN one, so dropping its leftmost
/// label and matching again walks down to the ICANN rule.
fn icann_suffix(name: &[u8]) -> Option<Suffix<'_>> {
    let mut suffix = psl::suffix(name).filter(|s| s.is_known())?;

    while suffix.typ() == Some(Type::Private) {
        let bytes = suffix.as_bytes();
        let dot = bytes.iter().position(|b| *b == b'.')?;
        suffix = psl::suffix(&bytes[dot + 1..]).filter(|s| s.is_known())?;
    }

    Some(suffix)
}
