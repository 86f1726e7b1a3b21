//! Hexcast Reveal
//!
//! Reads the textual dumps the game prints for iota lists and writes them
//! back out, naming every pattern the registry recognizes.
//!
//! Three historical pattern spellings are accepted and parse identically:
//!
//! ```text
//! HexPattern(NORTH_EAST qaq)
//! HexPattern[NORTH_EAST, qaq]
//! <north_east,qaq>
//! ```
//!
//! Printed output uses display names where it can (`Mind's Reflection`),
//! and those names parse back through shorthand lookup, so parsing is
//! idempotent over printing.

mod error;
mod iota;
mod lexer;
mod parser;
mod printer;

pub use error::{Error, Result};
pub use iota::{ContinuationKind, Iota, Matrix, PatternIota};
pub use lexer::Span;
pub use parser::{RevealParser, MAX_DEPTH};
pub use printer::IotaPrinter;

#[cfg(test)]
mod proptests {
    use super::*;
    use hexcast_geometry::{Direction, Pattern};
    use hexcast_registry::{PatternRegistry, RegistryBuilder};
    use proptest::prelude::*;
    use std::sync::OnceLock;

    fn registry() -> &'static PatternRegistry {
        static REGISTRY: OnceLock<PatternRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| RegistryBuilder::with_builtins().build().unwrap())
    }

    fn pattern_text() -> impl Strategy<Value = String> {
        (0usize..6, "[wqeads]{0,8}", 0usize..3).prop_map(|(dir, sig, dialect)| {
            let dir = Direction::ALL[dir];
            let pattern = Pattern::new(dir, sig.clone()).unwrap();
            match dialect {
                0 => format!("HexPattern({pattern})"),
                1 => format!("HexPattern[{dir}, {sig}]"),
                _ => format!("<{},{sig}>", dir.to_string().to_lowercase()),
            }
        })
    }

    fn iota_text() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            pattern_text(),
            (-1000i32..1000, 0u32..4).prop_map(|(n, places)| {
                format!("{:.*}", places as usize, f64::from(n) / 8.0)
            }),
            Just("True".to_string()),
            Just("NULL".to_string()),
            Just("[Jump]".to_string()),
            Just("Mind's Reflection".to_string()),
            Just("Bookkeeper's Gambit: v-v".to_string()),
            Just("(1, 2.5, -3)".to_string()),
            Just("[(2, 2) | 1, 2; 3, 4]".to_string()),
        ];
        leaf.prop_recursive(3, 24, 6, |inner| {
            prop::collection::vec(inner, 0..6).prop_map(|items| format!("[{}]", items.join(", ")))
        })
    }

    proptest! {
        #[test]
        fn printing_is_idempotent(text in iota_text()) {
            let parser = RevealParser::new(registry());
            let printer = IotaPrinter::new().with_registry(registry());

            let once = parser.parse(&text).unwrap();

            let pretty = printer.pretty(&once);
            let again = parser.parse(&pretty).unwrap();
            prop_assert_eq!(printer.pretty(&again), pretty);

            let inline = printer.inline(&once);
            let again = parser.parse(&inline).unwrap();
            prop_assert_eq!(printer.inline(&again), inline);
        }

        #[test]
        fn dialects_parse_identically(dir in 0usize..6, sig in "[wqeads]{0,10}") {
            let dir = Direction::ALL[dir];
            let lower = dir.to_string().to_lowercase();
            let parser = RevealParser::new(registry());
            let forms = [
                format!("HexPattern({dir} {sig})"),
                format!("HexPattern[{dir}, {sig}]"),
                format!("<{lower},{sig}>"),
            ];
            let first = parser.parse(&forms[0]).unwrap();
            for form in &forms[1..] {
                prop_assert_eq!(&parser.parse(form).unwrap(), &first);
            }
        }
    }
}
