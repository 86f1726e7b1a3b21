//! Base-game patterns.

use hexcast_geometry::{Direction, Pattern};

use crate::info::PatternInfo;

use hexcast_geometry::Direction::{
    East as E, NorthEast as NE, NorthWest as NW, SouthEast as SE, SouthWest as SW, West as W,
};

const NAMESPACE: &str = "hexcasting";

/// `(name, translation, start, signature)` for stroke-identified patterns.
const ORDINARY: &[(&str, &str, Direction, &str)] = &[
    // Basic
    ("get_caster", "Mind's Reflection", NE, "qaq"),
    ("entity_pos/eye", "Compass' Purification", E, "aa"),
    ("entity_pos/foot", "Compass' Purification II", NE, "dd"),
    ("get_entity_look", "Alidade's Purification", E, "wa"),
    ("get_entity_height", "Stadiometer's Purification", E, "awq"),
    ("get_entity_velocity", "Pace Purification", E, "wq"),
    ("raycast", "Archer's Distillation", E, "wqaawdd"),
    ("raycast/axis", "Architect's Distillation", E, "weddwaa"),
    ("raycast/entity", "Scout's Distillation", E, "weaqa"),
    ("circle/impetus_pos", "Waystone Reflection", NE, "eaqwqae"),
    ("print", "Reveal", NE, "de"),
    // Math
    ("add", "Additive Distillation", NE, "waaw"),
    ("sub", "Subtractive Distillation", NW, "wddw"),
    ("mul_dot", "Multiplicative Distillation", SE, "waqaw"),
    ("div_cross", "Division Distillation", NE, "wdedw"),
    ("abs_len", "Length Purification", NE, "wqaqw"),
    ("pow_proj", "Power Distillation", NW, "wedew"),
    ("floor", "Floor Purification", E, "ewq"),
    ("ceil", "Ceiling Purification", E, "qwe"),
    ("construct_vec", "Vector Exaltation", E, "eqqqqq"),
    ("deconstruct_vec", "Vector Disintegration", E, "qeeeee"),
    ("coerce_axial", "Axial Purification", NW, "qqqqqaww"),
    ("modulo", "Modulus Distillation", NE, "addwaad"),
    ("sin", "Sine Purification", SE, "qqqqqaa"),
    ("cos", "Cosine Purification", SE, "qqqqqad"),
    ("tan", "Tangent Purification", SW, "wqqqqqadq"),
    ("random", "Entropy Reflection", NW, "eqqq"),
    // Constants
    ("const/null", "Nullary Reflection", E, "d"),
    ("const/true", "True Reflection", SE, "aqae"),
    ("const/false", "False Reflection", NE, "dedq"),
    ("const/vec/0", "Vector Reflection Zero", NW, "qqqqq"),
    ("const/double/pi", "Arc's Reflection", NE, "qdwdq"),
    ("const/double/tau", "Circle's Reflection", NW, "eawae"),
    ("const/double/e", "Euler's Reflection", E, "aaq"),
    // Stack
    ("duplicate", "Gemini Decomposition", E, "aadaa"),
    ("duplicate_n", "Gemini's Gambit", SE, "aadaadaa"),
    ("swap", "Jester's Gambit", E, "aawdd"),
    ("rotate", "Rotation Gambit", E, "aaeaa"),
    ("rotate_reverse", "Rotation Gambit II", NE, "ddqdd"),
    ("over", "Prospector's Gambit", E, "aaedd"),
    ("tuck", "Undertaker's Gambit", E, "ddqaa"),
    ("2dup", "Dioscuri Gambit", E, "aadadaaw"),
    ("stack_len", "Flock's Reflection", NW, "qwaeawqaeaqa"),
    ("fisherman", "Fisherman's Gambit", W, "ddad"),
    ("fisherman/copy", "Fisherman's Gambit II", E, "aada"),
    // Meta
    ("eval", "Hermes' Gambit", SE, "deaqq"),
    ("for_each", "Thoth's Gambit", NE, "dadad"),
    ("eval/cc", "Iris' Gambit", NW, "qwaqde"),
    ("halt", "Charon's Gambit", SW, "aqdee"),
    ("open_paren", "Introspection", W, "qqq"),
    ("close_paren", "Retrospection", E, "eee"),
    ("escape", "Consideration", W, "qqqaw"),
    ("undo", "Evanition", E, "eeedw"),
    // Lists
    ("empty_list", "Vacant Reflection", NE, "qqaeaae"),
    ("append", "Integration Distillation", SW, "edqde"),
    ("unappend", "Derivation Decomposition", NE, "qaeaq"),
    ("index", "Selection Distillation", NW, "deeed"),
    // Logic
    ("bool_coerce", "Augur's Purification", NE, "aw"),
    ("not", "Negation Purification", NW, "dw"),
    ("or", "Disjunction Distillation", NW, "waw"),
    ("and", "Conjunction Distillation", NE, "wdw"),
    ("equals", "Equality Distillation", E, "ad"),
    ("not_equals", "Inequality Distillation", E, "da"),
    ("greater", "Maximus Distillation", SE, "e"),
    ("less", "Minimus Distillation", SW, "q"),
    ("greater_eq", "Maximus Distillation II", SE, "ee"),
    ("less_eq", "Minimus Distillation II", SW, "qq"),
    ("if", "Augur's Exaltation", SE, "awdd"),
];

/// Great spells, identified by shape. The stroke order here is one valid
/// drawing.
const PER_WORLD: &[(&str, &str, Direction, &str)] = &[
    ("teleport/great", "Greater Teleport", E, "wwwqqqwwwqqeqqwwwqqwqqdqqqqqdqq"),
    ("brainsweep", "Flay Mind", NE, "qeqwqwqwqwqeqaeqeaqeqaeqaqded"),
    ("lightning", "Summon Lightning", E, "waadwawdaaweewq"),
    ("create_lava", "Create Lava", E, "eaqawqadaqd"),
    ("craft/battery", "Craft Phial", SW, "aqqqaqwwaqqqqqeqaqqqawwqwqwqwqwqw"),
];

fn entry(name: &str, translation: &str, start: Direction, signature: &'static str) -> PatternInfo {
    PatternInfo::new(
        format!("{NAMESPACE}:{name}"),
        name,
        Pattern::from_static(start, signature),
    )
    .with_translation(translation)
}

/// Every built-in pattern, ordinary ones first.
pub fn builtin_patterns() -> Vec<PatternInfo> {
    let ordinary = ORDINARY
        .iter()
        .map(|&(name, translation, start, signature)| entry(name, translation, start, signature));
    let per_world = PER_WORLD.iter().map(|&(name, translation, start, signature)| {
        entry(name, translation, start, signature).per_world()
    });
    ordinary.chain(per_world).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn signatures_use_the_turn_alphabet() {
        for info in builtin_patterns() {
            let sig = info.pattern.signature();
            assert!(
                Pattern::new(info.pattern.start(), sig).is_ok(),
                "{} has signature {sig:?}",
                info.id
            );
        }
    }

    #[test]
    fn identities_are_distinct() {
        let patterns = builtin_patterns();
        let ids: HashSet<_> = patterns.iter().map(|p| &p.id).collect();
        let names: HashSet<_> = patterns.iter().map(|p| p.display_name()).collect();
        assert_eq!(ids.len(), patterns.len());
        assert_eq!(names.len(), patterns.len());
    }

    #[test]
    fn great_spells_are_per_world() {
        let patterns = builtin_patterns();
        let per_world: Vec<_> = patterns.iter().filter(|p| p.is_per_world).collect();
        assert_eq!(per_world.len(), PER_WORLD.len());
        assert!(per_world.iter().all(|p| p.id.starts_with("hexcasting:")));
    }
}
