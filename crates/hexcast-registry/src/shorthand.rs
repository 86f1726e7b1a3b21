//! Human-typed names for registry entries.
//!
//! Every entry is reachable by its id, its name and its display name. The
//! display name also expands into shorter aliases: common suffixes are
//! abbreviated or dropped, `vector` becomes `vec`, possessives and colons are
//! stripped, and every `ii` becomes `2`. So `Compass' Purification II`
//! also answers to `compass pur 2`.

use hexcast_geometry::{Direction, Pattern};
use hexcast_handlers::{parse_rational, SpecialHandlerInfo};

use crate::info::PatternInfo;

/// Suffix abbreviations, applied in order. Each replacement yields a new
/// candidate; the unreplaced text stays a candidate too.
const SUFFIX_GROUPS: [(&str, &[&str]); 7] = [
    (" reflection", &["", " ref", " refl"]),
    (" purification", &["", " pur", " prfn", " prf"]),
    (" distillation", &["", " dist", " distill"]),
    (" exaltation", &["", " ex", " exalt"]),
    (" decomposition", &["", " dec", " decomp"]),
    (" disintegration", &["", " dis", " disint"]),
    (" gambit", &["", " gam"]),
];

/// Lowercase, trim and collapse runs of whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text that would be read as a direction, number or mask if typed alone.
pub fn is_reserved(alias: &str) -> bool {
    alias.parse::<Direction>().is_ok()
        || parse_rational(alias).is_some()
        || alias.chars().all(|c| c == '-' || c == 'v')
}

/// All aliases for a display name, in generation order, without duplicates
/// or reserved words. The normalized display name itself comes first.
pub fn aliases(display_name: &str) -> Vec<String> {
    let mut candidates = vec![normalize(display_name)];

    for (suffix, replacements) in SUFFIX_GROUPS {
        for i in 0..candidates.len() {
            if candidates[i].contains(suffix) {
                for replacement in replacements {
                    let alias = candidates[i].replace(suffix, replacement);
                    candidates.push(alias);
                }
            }
        }
    }

    let rewrites: [fn(&str) -> String; 4] = [
        |s| s.replace("vector ", "vec "),
        |s| s.replace("'s", "s").replace("s'", "s"),
        |s| s.replace(':', ""),
        |s| s.replace("ii", "2"),
    ];
    for rewrite in rewrites {
        for i in 0..candidates.len() {
            let alias = rewrite(&candidates[i]);
            if alias != candidates[i] {
                candidates.push(alias);
            }
        }
    }

    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .map(|alias| normalize(&alias))
        .filter(|alias| !alias.is_empty() && !is_reserved(alias))
        .filter(|alias| seen.insert(alias.clone()))
        .collect()
}

/// What a piece of shorthand resolved to.
#[derive(Debug, Clone)]
pub enum ShorthandTarget<'a> {
    Pattern(&'a PatternInfo),
    Special(&'a SpecialHandlerInfo),
    /// Text that was a literal `direction [signature]`.
    Raw(Pattern),
}

/// A resolved shorthand, with the argument for parameterized families.
#[derive(Debug, Clone)]
pub struct Shorthand<'a> {
    pub target: ShorthandTarget<'a>,
    pub argument: Option<String>,
}

impl<'a> Shorthand<'a> {
    pub(crate) fn bare(target: ShorthandTarget<'a>) -> Self {
        Self {
            target,
            argument: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(aliases: &[String], alias: &str) -> bool {
        aliases.iter().any(|a| a == alias)
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize("  Mind's   Reflection "), "mind's reflection");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn suffix_groups_expand() {
        let aliases = aliases("Mind's Reflection");
        assert_eq!(aliases[0], "mind's reflection");
        for alias in [
            "mind's",
            "mind's ref",
            "mind's refl",
            "minds reflection",
            "minds",
            "minds ref",
        ] {
            assert!(has(&aliases, alias), "missing {alias}");
        }
    }

    #[test]
    fn plural_possessive_and_numeral() {
        let aliases = aliases("Compass' Purification II");
        for alias in [
            "compass' purification ii",
            "compass purification ii",
            "compass purification 2",
            "compass pur 2",
            "compass 2",
        ] {
            assert!(has(&aliases, alias), "missing {alias}");
        }

        // The numeral rewrite is plain substring replacement.
        let inner = super::aliases("Hawaii Reflection");
        assert!(has(&inner, "hawa2 reflection"));
        assert!(has(&inner, "hawa2 ref"));
        assert!(has(&inner, "hawaii"));
    }

    #[test]
    fn vector_colon_and_duplicates() {
        let aliases = aliases("Vector Exaltation");
        assert!(has(&aliases, "vec exaltation"));
        assert!(has(&aliases, "vec ex"));
        assert!(has(&aliases, "vector"));
        // The rewrite needs a following word.
        assert!(!has(&aliases, "vec"));

        let colon = super::aliases("Nullary: Reflection");
        assert!(has(&colon, "nullary reflection"));

        let mut sorted = aliases.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), aliases.len());
    }

    #[test]
    fn reserved_words_are_dropped() {
        assert!(is_reserved("east"));
        assert!(is_reserved("north_west"));
        assert!(is_reserved("12"));
        assert!(is_reserved("-v-"));
        assert!(!is_reserved("gemini"));
        // "East Reflection" would shorten to a direction.
        let aliases = aliases("East Reflection");
        assert!(!has(&aliases, "east"));
        assert!(has(&aliases, "east ref"));
    }
}
