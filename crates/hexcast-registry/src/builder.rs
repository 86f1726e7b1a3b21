//! Registry construction with duplicate detection.

use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use std::io::Read;

use hexcast_geometry::rotated_canonical_variants;
use hexcast_handlers::{builtin_handlers, SpecialHandlerInfo};
use tracing::{debug, info, warn};

use crate::builtin::builtin_patterns;
use crate::error::{Attribute, Conflict, DuplicatePatternError, Error, Result};
use crate::info::PatternInfo;
use crate::registry::{PatternRegistry, Slot};
use crate::shorthand::{aliases, normalize};

/// Collects registrations and publishes a [`PatternRegistry`].
///
/// A rejected registration is returned to the caller and also remembered;
/// [`build`](Self::build) refuses to publish while any were rejected, and
/// reports all of them at once.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: PatternRegistry,
    rejected: Vec<DuplicatePatternError>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder preloaded with the built-in handlers and base-game patterns.
    pub fn with_builtins() -> Self {
        let mut builder = Self::new();
        for handler in builtin_handlers() {
            let _ = builder.add_handler(handler);
        }
        for pattern in builtin_patterns() {
            let _ = builder.add(pattern);
        }
        builder
    }

    /// Registrations rejected so far.
    pub fn rejected(&self) -> &[DuplicatePatternError] {
        &self.rejected
    }

    /// Register a pattern, or report every attribute it collides on.
    pub fn add(&mut self, info: PatternInfo) -> std::result::Result<(), DuplicatePatternError> {
        let mut conflicts = self.identity_conflicts(&info.id, &info.name, info.display_name());

        let shapes = if info.is_per_world {
            let variants = rotated_canonical_variants(&info.pattern.segments());
            let mut owners: Vec<usize> = variants
                .iter()
                .filter_map(|shape| self.registry.by_shape.get(shape).copied())
                .collect();
            owners.sort_unstable();
            owners.dedup();
            for owner in owners {
                conflicts.push(Conflict {
                    attribute: Attribute::Shape,
                    existing: self.registry.patterns[owner].id.clone(),
                });
            }
            Some(variants)
        } else {
            if let Some(owner) = self.registry.by_signature.get(info.pattern.signature()) {
                conflicts.push(Conflict {
                    attribute: Attribute::Pattern,
                    existing: self.registry.patterns[*owner].id.clone(),
                });
            }
            None
        };

        if !conflicts.is_empty() {
            return Err(self.reject(info.id, conflicts));
        }

        let index = self.registry.patterns.len();
        let slot = Slot::Pattern(index);
        self.claim_identity(&info.id, &info.name, info.display_name(), slot);
        match shapes {
            Some(variants) => {
                for shape in variants {
                    self.registry.by_shape.entry(shape).or_insert(index);
                }
            }
            None => {
                self.registry
                    .by_signature
                    .insert(info.pattern.signature().to_string(), index);
            }
        }
        debug!(id = %info.id, per_world = info.is_per_world, "registered pattern");
        self.registry.patterns.push(info);
        Ok(())
    }

    /// Register a special handler, or report every attribute it collides on.
    pub fn add_handler(
        &mut self,
        info: SpecialHandlerInfo,
    ) -> std::result::Result<(), DuplicatePatternError> {
        let conflicts = self.identity_conflicts(&info.id, &info.name, &info.display_name);
        if !conflicts.is_empty() {
            return Err(self.reject(info.id, conflicts));
        }

        let slot = Slot::Special(self.registry.handlers.len());
        self.claim_identity(&info.id, &info.name, &info.display_name, slot);
        debug!(id = %info.id, "registered special handler");
        self.registry.handlers.push(info);
        Ok(())
    }

    /// Register every pattern in a JSON array of [`PatternInfo`] records.
    ///
    /// Returns how many were accepted; the rest are in [`rejected`](Self::rejected).
    pub fn extend_from_json<R: Read>(&mut self, reader: R) -> Result<usize> {
        let records: Vec<PatternInfo> = serde_json::from_reader(reader)?;
        let total = records.len();
        let accepted = records
            .into_iter()
            .map(|info| self.add(info))
            .filter(std::result::Result::is_ok)
            .count();
        info!(accepted, rejected = total - accepted, "loaded pattern metadata");
        Ok(accepted)
    }

    /// Publish the registry, computing shorthand aliases.
    pub fn build(self) -> Result<PatternRegistry> {
        if !self.rejected.is_empty() {
            for err in &self.rejected {
                warn!(%err, "duplicate registration");
            }
            return Err(Error::Duplicates(self.rejected));
        }

        let mut registry = self.registry;
        let mut shorthand = HashMap::new();

        let slots: Vec<Slot> = (0..registry.handlers.len())
            .map(Slot::Special)
            .chain((0..registry.patterns.len()).map(Slot::Pattern))
            .collect();

        for slot in &slots {
            let entry = registry.entry(*slot);
            for key in [
                entry.id().to_string(),
                entry.name().to_string(),
                entry.name().replace('_', " "),
                entry.display_name().to_string(),
            ] {
                shorthand.entry(normalize(&key)).or_insert(*slot);
            }
        }

        for slot in &slots {
            let entry = registry.entry(*slot);
            for alias in aliases(entry.display_name()) {
                match shorthand.entry(alias) {
                    MapEntry::Vacant(vacant) => {
                        vacant.insert(*slot);
                    }
                    MapEntry::Occupied(occupied) if *occupied.get() != *slot => {
                        debug!(
                            alias = %occupied.key(),
                            id = entry.id(),
                            owner = registry.entry(*occupied.get()).id(),
                            "alias already claimed"
                        );
                    }
                    MapEntry::Occupied(_) => {}
                }
            }
        }

        registry.shorthand = shorthand;
        info!(
            patterns = registry.patterns.len(),
            handlers = registry.handlers.len(),
            shorthand = registry.shorthand.len(),
            "pattern registry built"
        );
        Ok(registry)
    }

    fn identity_conflicts(&self, id: &str, name: &str, display_name: &str) -> Vec<Conflict> {
        let checks = [
            (Attribute::Id, self.registry.by_id.get(id)),
            (Attribute::Name, self.registry.by_name.get(name)),
            (
                Attribute::DisplayName,
                self.registry.by_display_name.get(&normalize(display_name)),
            ),
        ];
        checks
            .into_iter()
            .filter_map(|(attribute, slot)| {
                slot.map(|slot| Conflict {
                    attribute,
                    existing: self.registry.entry(*slot).id().to_string(),
                })
            })
            .collect()
    }

    fn claim_identity(&mut self, id: &str, name: &str, display_name: &str, slot: Slot) {
        self.registry.by_id.insert(id.to_string(), slot);
        self.registry.by_name.insert(name.to_string(), slot);
        self.registry
            .by_display_name
            .insert(normalize(display_name), slot);
    }

    fn reject(&mut self, id: String, conflicts: Vec<Conflict>) -> DuplicatePatternError {
        let err = DuplicatePatternError { id, conflicts };
        debug!(%err, "rejected registration");
        self.rejected.push(err.clone());
        err
    }
}
