//! Certificate identifier generation

use chrono::{Datelike, Utc};
use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 9;

/// Generate a human-readable certificate identifier, e.g.
/// `CERT-2026-K3QX07WPD`: the current year plus nine characters drawn
/// uniformly from `A-Z0-9`.
///
/// No uniqueness check is performed here. Callers that rely on global
/// uniqueness must check against their store and retry; with a 36^9
/// keyspace a collision is vanishingly rare but not impossible.
pub fn generate_certificate_id() -> String {
    let mut rng = rand::thread_rng();
    let mut id = format!("CERT-{}-", Utc::now().year());
    for _ in 0..SUFFIX_LEN {
        let idx = rng.gen_range(0..ALPHABET.len());
        id.push(ALPHABET[idx] as char);
    }
    id
}

/// Whether a string has the `CERT-<year>-<9 alphanumerics>` shape.
pub fn is_well_formed_certificate_id(id: &str) -> bool {
    let mut parts = id.splitn(3, '-');
    let (Some(prefix), Some(year), Some(suffix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == "CERT"
        && year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_well_formed() {
        for _ in 0..100 {
            let id = generate_certificate_id();
            assert!(is_well_formed_certificate_id(&id), "malformed id: {id}");
            assert!(id.starts_with(&format!("CERT-{}-", Utc::now().year())));
        }
    }

    #[test]
    fn ten_thousand_draws_yield_no_duplicates() {
        // Statistical, not absolute: with a 36^9 keyspace the chance of a
        // collision in 10k draws is ~5e-7.
        let ids: HashSet<String> = (0..10_000).map(|_| generate_certificate_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in [
            "",
            "CERT-2026-ABC",
            "CERT-26-ABCDEFGHI",
            "cert-2026-ABCDEFGHI",
            "CERT-2026-abcdefghi",
            "CERT-2026-ABCDEFGH!",
            "ID-2026-ABCDEFGHI",
        ] {
            assert!(!is_well_formed_certificate_id(bad), "accepted: {bad}");
        }
        assert!(is_well_formed_certificate_id("CERT-2026-A1B2C3D4E"));
    }
}
