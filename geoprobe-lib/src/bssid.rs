//! Synthetic BSSID generation and validation.
//!
//! Every probe embeds one randomly generated 6-byte hardware address,
//! formatted as uppercase colon-separated hex pairs (`3F:0A:E2:BB:11:00`).
//! Addresses are drawn independently and uniformly; collisions are possible
//! and deliberately not deduplicated.

use lazy_static::lazy_static;
use rand::{rng, Rng};
use regex::Regex;

lazy_static! {
    static ref BSSID_RE: Regex =
        Regex::new(r"^([0-9A-F]{2}:){5}[0-9A-F]{2}$").expect("BSSID regex is valid");
}

/// Generate a random BSSID.
///
/// # Example
///
/// ```rust
/// let bssid = geoprobe_lib::bssid::generate();
/// assert!(geoprobe_lib::bssid::is_valid(&bssid));
/// ```
pub fn generate() -> String {
    let bytes: [u8; 6] = rng().random();
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Check whether a string is a well-formed uppercase colon-hex BSSID.
pub fn is_valid(bssid: &str) -> bool {
    BSSID_RE.is_match(bssid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_bssids_match_pattern() {
        for _ in 0..1000 {
            let bssid = generate();
            assert!(is_valid(&bssid), "malformed BSSID: {}", bssid);
        }
    }

    #[test]
    fn test_generated_bssid_shape() {
        let bssid = generate();
        assert_eq!(bssid.len(), 17);
        assert_eq!(bssid.matches(':').count(), 5);
    }

    #[test]
    fn test_is_valid_rejects_bad_input() {
        assert!(is_valid("3F:0A:E2:BB:11:00"));
        assert!(!is_valid("3f:0a:e2:bb:11:00")); // lowercase
        assert!(!is_valid("3F:0A:E2:BB:11")); // five pairs
        assert!(!is_valid("3F:0A:E2:BB:11:00:22")); // seven pairs
        assert!(!is_valid("3F-0A-E2-BB-11-00")); // wrong separator
        assert!(!is_valid(""));
        assert!(!is_valid("GG:0A:E2:BB:11:00")); // non-hex
    }
}
