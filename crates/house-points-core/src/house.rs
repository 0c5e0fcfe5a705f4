//! Houses and the registry of valid house names.

use std::fmt;

use serde::Serialize;

use crate::error::DomainError;

/// House names used when no registry is configured.
pub const DEFAULT_HOUSES: [&str; 4] = ["gryffindor", "slytherin", "ravenclaw", "hufflepuff"];

/// A validated house name, stored in its canonical lowercase form.
///
/// Values are only handed out by a [`HouseRegistry`], so holding a `House`
/// means the name passed registry validation at some point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct House(String);

impl House {
    /// Returns the canonical (lowercase) name used as the store key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with its first character uppercased, e.g. `Gryffindor`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed, ordered set of houses a bot instance keeps score for.
///
/// # Invariants
/// - Never empty.
/// - Names are lowercase, non-blank, contain no whitespace and are unique.
/// - Order is the configured order and is used for every listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseRegistry {
    houses: Vec<House>,
}

impl HouseRegistry {
    /// Builds a registry from configured names.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if the list is empty, a name
    /// is blank or contains whitespace, or two names collide case-insensitively.
    pub fn new<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut houses: Vec<House> = Vec::new();
        for raw in names {
            let name = raw.as_ref().trim().to_lowercase();
            if name.is_empty() {
                return Err(DomainError::InvalidConfiguration(
                    "house names must not be blank".to_owned(),
                ));
            }
            if name.chars().any(char::is_whitespace) {
                return Err(DomainError::InvalidConfiguration(format!(
                    "house name {name:?} must not contain whitespace"
                )));
            }
            if houses.iter().any(|h| h.0 == name) {
                return Err(DomainError::InvalidConfiguration(format!(
                    "house {name:?} is listed more than once"
                )));
            }
            houses.push(House(name));
        }
        if houses.is_empty() {
            return Err(DomainError::InvalidConfiguration(
                "at least one house must be configured".to_owned(),
            ));
        }
        Ok(Self { houses })
    }

    /// Looks up a house by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&House> {
        let wanted = name.trim().to_lowercase();
        self.houses.iter().find(|h| h.0 == wanted)
    }

    /// Whether `house` belongs to this registry.
    #[must_use]
    pub fn contains(&self, house: &House) -> bool {
        self.houses.contains(house)
    }

    /// All houses, in registry order.
    #[must_use]
    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    /// Iterates over the houses in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, House> {
        self.houses.iter()
    }

    /// Number of houses. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.houses.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }
}

impl Default for HouseRegistry {
    fn default() -> Self {
        Self {
            houses: DEFAULT_HOUSES.iter().map(|n| House((*n).to_owned())).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HouseRegistry {
    type Item = &'a House;
    type IntoIter = std::slice::Iter<'a, House>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
