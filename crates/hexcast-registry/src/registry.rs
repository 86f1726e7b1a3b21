//! The published, read-only registry.

use std::collections::HashMap;

use hexcast_geometry::{Pattern, SegmentSet};
use hexcast_handlers::SpecialHandlerInfo;

use crate::info::{Entry, PatternInfo, PatternMatch};
use crate::shorthand::{normalize, Shorthand, ShorthandTarget};

/// Position of an entry in one of the two entry lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Pattern(usize),
    Special(usize),
}

/// Lookup store for pattern metadata.
///
/// Built by [`RegistryBuilder`](crate::RegistryBuilder), immutable afterward
/// and safe to share between threads. Ordinary patterns are keyed by
/// signature, since the signature already encodes every stroke relative to
/// the start. Per-world patterns are keyed by all six rotations of their
/// canonical shape.
#[derive(Debug, Default)]
pub struct PatternRegistry {
    pub(crate) patterns: Vec<PatternInfo>,
    pub(crate) handlers: Vec<SpecialHandlerInfo>,
    pub(crate) by_signature: HashMap<String, usize>,
    pub(crate) by_shape: HashMap<SegmentSet, usize>,
    pub(crate) by_id: HashMap<String, Slot>,
    pub(crate) by_name: HashMap<String, Slot>,
    pub(crate) by_display_name: HashMap<String, Slot>,
    pub(crate) shorthand: HashMap<String, Slot>,
}

impl PatternRegistry {
    /// A registry with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn patterns(&self) -> &[PatternInfo] {
        &self.patterns
    }

    pub fn handlers(&self) -> &[SpecialHandlerInfo] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.patterns.len() + self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn entry(&self, slot: Slot) -> Entry<'_> {
        match slot {
            Slot::Pattern(i) => Entry::Pattern(&self.patterns[i]),
            Slot::Special(i) => Entry::Special(&self.handlers[i]),
        }
    }

    pub fn get(&self, id: &str) -> Option<Entry<'_>> {
        self.by_id.get(id).map(|slot| self.entry(*slot))
    }

    pub fn by_name(&self, name: &str) -> Option<Entry<'_>> {
        self.by_name.get(name).map(|slot| self.entry(*slot))
    }

    pub fn handler(&self, id: &str) -> Option<&SpecialHandlerInfo> {
        match self.by_id.get(id)? {
            Slot::Special(i) => self.handlers.get(*i),
            Slot::Pattern(_) => None,
        }
    }

    /// Ordinary pattern with exactly this signature.
    pub fn lookup_exact(&self, pattern: &Pattern) -> Option<&PatternInfo> {
        self.by_signature
            .get(pattern.signature())
            .map(|i| &self.patterns[*i])
    }

    /// Per-world pattern with this drawn shape, in any rotation or stroke order.
    pub fn lookup_shape(&self, pattern: &Pattern) -> Option<&PatternInfo> {
        self.by_shape
            .get(&pattern.segments().canonicalize())
            .map(|i| &self.patterns[*i])
    }

    /// Exact signature first, then shape.
    pub fn lookup_by_pattern(&self, pattern: &Pattern) -> Option<&PatternInfo> {
        self.lookup_exact(pattern)
            .or_else(|| self.lookup_shape(pattern))
    }

    /// Name a drawn pattern: exact signature, then special handlers in
    /// registration order, then shape.
    pub fn identify(&self, pattern: &Pattern) -> PatternMatch<'_> {
        if let Some(info) = self.lookup_exact(pattern) {
            return PatternMatch::Pattern(info);
        }
        for info in &self.handlers {
            if let Some(value) = info.try_match(pattern) {
                return PatternMatch::Special { info, value };
            }
        }
        match self.lookup_shape(pattern) {
            Some(info) => PatternMatch::Pattern(info),
            None => PatternMatch::Unknown,
        }
    }

    /// Resolve human-typed text.
    ///
    /// Tried in order: a registered name or alias; `name: value` or
    /// `name value` where `name` is a special handler; a bare number or mask
    /// literal; a raw `direction [signature]`.
    pub fn lookup_by_shorthand(&self, text: &str) -> Option<Shorthand<'_>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(slot) = self.shorthand.get(&normalize(text)) {
            return Some(Shorthand::bare(self.target(*slot)));
        }

        let split = text
            .split_once(':')
            .into_iter()
            .chain(text.rsplit_once(char::is_whitespace));
        for (head, argument) in split {
            let argument = argument.trim();
            if argument.is_empty() {
                continue;
            }
            if let Some(Slot::Special(i)) = self.shorthand.get(&normalize(head)) {
                return Some(Shorthand {
                    target: ShorthandTarget::Special(&self.handlers[*i]),
                    argument: Some(argument.to_string()),
                });
            }
        }

        if let Some(info) = self
            .handlers
            .iter()
            .find(|info| info.parse_argument(text).is_some())
        {
            return Some(Shorthand {
                target: ShorthandTarget::Special(info),
                argument: Some(text.to_string()),
            });
        }

        text.parse::<Pattern>()
            .ok()
            .map(|pattern| Shorthand::bare(ShorthandTarget::Raw(pattern)))
    }

    fn target(&self, slot: Slot) -> ShorthandTarget<'_> {
        match self.entry(slot) {
            Entry::Pattern(info) => ShorthandTarget::Pattern(info),
            Entry::Special(info) => ShorthandTarget::Special(info),
        }
    }

    /// Number of distinct shorthand keys, aliases included.
    pub fn shorthand_count(&self) -> usize {
        self.shorthand.len()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::RegistryBuilder;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_great_spell_survives_rotation(index in 0usize..5, steps in 0usize..6) {
            let registry = RegistryBuilder::with_builtins().build().unwrap();
            let great: Vec<_> = registry.patterns().iter().filter(|p| p.is_per_world).collect();
            let info = great[index % great.len()];
            let found = registry.lookup_by_pattern(&info.pattern.rotated(steps));
            prop_assert_eq!(found.map(|p| p.id.as_str()), Some(info.id.as_str()));
        }
    }
}
