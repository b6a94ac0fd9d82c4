//! Text canonicalization for `name`, `address` and `city`.
//!
//! `normalize` strips everything except word characters, whitespace and the
//! apostrophe, lower-cases, then expands abbreviations token by token. A
//! token is a maximal run of non-whitespace, so `"joe's"` is one token and the
//! `s` inside it is never expanded. Expansions are emitted as-is and not
//! re-scanned.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::abbreviations::Abbreviations;
use crate::model::{NormalizedRecord, SanitizedRecord};

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s']").unwrap());

/// Steps 1 and 2: strip punctuation, then lower-case.
pub fn clean(text: &str) -> String {
    PUNCTUATION.replace_all(text, "").to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    abbreviations: Abbreviations,
}

impl Normalizer {
    pub fn new(abbreviations: Abbreviations) -> Self {
        Self { abbreviations }
    }

    pub fn normalize(&self, text: &str) -> String {
        let cleaned = clean(text);
        self.expand(&cleaned)
    }

    /// Replace whole tokens found in the table, preserving whitespace runs.
    fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while !rest.is_empty() {
            let gap = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
            out.push_str(&rest[..gap]);
            rest = &rest[gap..];

            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let token = &rest[..end];
            out.push_str(self.abbreviations.expand(token).unwrap_or(token));
            rest = &rest[end..];
        }
        out
    }

    pub fn normalize_record(&self, record: &SanitizedRecord) -> NormalizedRecord {
        NormalizedRecord {
            side: record.side,
            id: record.id.clone(),
            name: record.name.as_deref().map(|n| self.normalize(n)),
            address: self.normalize(&record.address),
            city: self.normalize(&record.city),
            state: record.state.clone(),
            postal: record.postal.clone(),
        }
    }
}

/// Normalize with the built-in abbreviation table.
pub fn normalize(text: &str) -> String {
    static DEFAULT: Lazy<Normalizer> = Lazy::new(Normalizer::default);
    DEFAULT.normalize(text)
}

pub fn normalize_records(records: &[SanitizedRecord], normalizer: &Normalizer) -> Vec<NormalizedRecord> {
    records.iter().map(|r| normalizer.normalize_record(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Side;
    use proptest::prelude::*;

    #[test]
    fn expands_directions_and_suffixes() {
        assert_eq!(normalize("100 n main st"), "100 north main street");
        assert_eq!(normalize("100 N. Main St."), "100 north main street");
        assert_eq!(normalize("2nd Ave"), "second avenue");
        assert_eq!(normalize("1200 MLK Blvd, Ste 4"), "1200 martin luther king boulevard suite 4");
    }

    #[test]
    fn only_whole_tokens_expand() {
        assert_eq!(normalize("brandt"), "brandt");
        assert_eq!(normalize("west end"), "west end");
        assert_eq!(normalize("stn"), "stn");
        assert_eq!(normalize("joe's pizza"), "joe's pizza");
        assert_eq!(normalize("Mary's N St"), "mary's north street");
    }

    #[test]
    fn strips_punctuation_keeps_apostrophe() {
        assert_eq!(normalize("Joe's Pizza & Grill!"), "joe's pizza  grill");
        assert_eq!(normalize("A-1 Auto (Repair)"), "a1 auto repair");
    }

    #[test]
    fn whitespace_is_preserved() {
        assert_eq!(normalize("  n   st "), "  north   street ");
        assert_eq!(normalize("a\tb"), "a\tb");
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "   ");
        assert_eq!(normalize("…«»—"), "");
        assert_eq!(normalize("Café Ñandú"), "café ñandú");
    }

    #[test]
    fn custom_table() {
        let table = Abbreviations::from_pairs([("hwy", "highway")]).unwrap();
        let normalizer = Normalizer::new(table);
        assert_eq!(normalizer.normalize("Old Hwy 9 N"), "old highway 9 n");
    }

    #[test]
    fn record_fields_are_normalized() {
        let record = SanitizedRecord {
            side: Side::Left,
            id: "B1".into(),
            name: Some("Joe's Pizza".into()),
            address: "100 N Main St".into(),
            city: "St. Louis".into(),
            state: "MO".into(),
            postal: "63101".into(),
        };
        let n = Normalizer::default().normalize_record(&record);
        assert_eq!(n.id, "B1");
        assert_eq!(n.name.as_deref(), Some("joe's pizza"));
        assert_eq!(n.address, "100 north main street");
        assert_eq!(n.city, "street louis");
        assert_eq!(n.state, "MO");
    }

    #[test]
    fn absent_name_stays_absent() {
        let record = SanitizedRecord {
            side: Side::Right,
            id: "E1".into(),
            name: None,
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal: String::new(),
        };
        let n = Normalizer::default().normalize_record(&record);
        assert_eq!(n.name, None);
        assert_eq!(n.address, "");
    }

    proptest! {
        #[test]
        fn idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn idempotent_on_address_like_text(s in "[0-9]{1,5}( [NSEWnsew]\\.?)? [A-Za-z]{1,10} (St|Ave|Blvd|Rd|st|ave)\\.?") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn output_has_no_punctuation(s in any::<String>()) {
            let out = normalize(&s);
            prop_assert!(out.chars().all(|c| c.is_alphanumeric() || c.is_whitespace() || c == '\'' || c == '_' || !c.is_ascii()));
            prop_assert!(!out.chars().any(|c| c.is_ascii_uppercase()));
        }
    }
}
