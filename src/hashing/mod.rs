//! Company-name normalization and cache-key derivation.
//!
//! Two normal forms exist:
//!
//! - the *display* form ([`normalize_company_name`]): trimmed, internal whitespace
//!   collapsed, case and punctuation preserved. This is what callers see in
//!   `CompanyResult::company`.
//! - the *key* form ([`fold_company_name`]): lowercased, `.` and `,` dropped,
//!   whitespace collapsed. Only its BLAKE3 digest is ever stored.
//!
//! `"Apple Inc."`, `"apple inc"` and `"  Apple Inc  "` share one key. Other symbols
//! are significant: `"AT&T"` and `"ATT"` do not.

use std::fmt;

/// Fixed-length cache key: the 32-byte BLAKE3 digest of the folded company name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompanyKey([u8; 32]);

impl CompanyKey {
    /// Returns the raw digest bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short hex prefix, suitable for log fields.
    pub fn short_hex(&self) -> String {
        self.0[..6].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for CompanyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompanyKey({})", self.short_hex())
    }
}

impl fmt::Display for CompanyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "esg:company:")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Trims and collapses runs of whitespace to a single space.
pub fn normalize_company_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Separators dropped from the key form; everything else is kept.
const IGNORED_SEPARATORS: &[char] = &['.', ','];

/// Lowercases, drops `.` and `,` and collapses whitespace.
pub fn fold_company_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !IGNORED_SEPARATORS.contains(c))
        .flat_map(char::to_lowercase)
        .collect();
    normalize_company_name(&stripped)
}

/// Derives the cache key for a company name.
#[inline]
pub fn company_cache_key(name: &str) -> CompanyKey {
    let folded = fold_company_name(name);
    CompanyKey(*blake3::hash(folded.as_bytes()).as_bytes())
}

/// Computes a 64-bit hash of the input using BLAKE3, truncated from 256 bits.
///
/// Used for compact identifiers in logs (e.g. user ids); collisions only affect
/// log correlation, never cache lookups.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_company_name_collapses_whitespace() {
        assert_eq!(normalize_company_name("  Apple   Inc.  "), "Apple Inc.");
        assert_eq!(normalize_company_name("\tTata\nSteel "), "Tata Steel");
        assert_eq!(normalize_company_name("   "), "");
    }

    #[test]
    fn test_fold_company_name_drops_case_and_separators() {
        assert_eq!(fold_company_name("Apple Inc."), "apple inc");
        assert_eq!(fold_company_name("  Apple Inc  "), "apple inc");
        assert_eq!(fold_company_name("Apple, Inc."), "apple inc");
        assert_eq!(fold_company_name("Nestlé S.A."), "nestlé sa");
    }

    #[test]
    fn test_fold_company_name_keeps_symbols() {
        assert_eq!(fold_company_name("AT&T"), "at&t");
        assert_eq!(fold_company_name("C++ Corp"), "c++ corp");
        assert_eq!(fold_company_name("Yahoo!"), "yahoo!");
    }

    #[test]
    fn test_company_cache_key_distinguishes_symbols() {
        let pairs = [("C++ Corp", "C Corp"), ("AT&T", "ATT"), ("E*Trade", "ETrade"), ("Yahoo!", "Yahoo")];
        for (a, b) in pairs {
            assert_ne!(company_cache_key(a), company_cache_key(b), "{a} vs {b}");
        }
    }

    #[test]
    fn test_company_cache_key_equivalent_spellings() {
        let a = company_cache_key("Apple Inc.");
        let b = company_cache_key("apple inc");
        let c = company_cache_key("  Apple Inc  ");

        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_company_cache_key_uniqueness() {
        let names = ["Apple Inc", "Apple", "Alphabet Inc", "Apple Incorporated"];
        let keys: HashSet<_> = names.iter().map(|n| company_cache_key(n)).collect();
        assert_eq!(keys.len(), names.len());
    }

    #[test]
    fn test_company_cache_key_fixed_length() {
        let short = company_cache_key("X");
        let long = company_cache_key(&"very long company name ".repeat(100));
        assert_eq!(short.as_bytes().len(), 32);
        assert_eq!(long.as_bytes().len(), 32);
    }

    #[test]
    fn test_company_key_display_prefix() {
        let key = company_cache_key("Shell plc");
        let rendered = key.to_string();
        assert!(rendered.starts_with("esg:company:"));
        assert_eq!(rendered.len(), "esg:company:".len() + 64);
        assert_eq!(key.short_hex().len(), 12);
    }

    #[test]
    fn test_hash_to_u64_determinism() {
        let data = b"user-42";
        assert_eq!(hash_to_u64(data), hash_to_u64(data));
        assert_ne!(hash_to_u64(b"user-42"), hash_to_u64(b"user-43"));
    }
}
