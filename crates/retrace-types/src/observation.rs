//! Sightings awaiting resolution.

use serde::{Deserialize, Serialize};

/// A `(name, world)` pair observed in the live environment but not yet
/// resolved to a stable identity. Lives only in the observation queue;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingObservation {
    /// Full display name as observed.
    pub name: String,
    /// World the sighting occurred on.
    pub world: String,
}

impl PendingObservation {
    /// Create a pending observation.
    pub fn new(name: &str, world: &str) -> Self {
        Self {
            name: name.to_owned(),
            world: world.to_owned(),
        }
    }
}

/// Normalize one part of a character name: first character uppercased, the
/// rest lowercased (`"foO"` becomes `"Foo"`).
///
/// The lookup service matches names case-sensitively, so user input must be
/// normalized before resolution or cache lookup.
pub fn capitalize_name_part(part: &str) -> String {
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    first
        .to_uppercase()
        .chain(chars.as_str().to_lowercase().chars())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_lowers_tail() {
        assert_eq!(capitalize_name_part("foO"), "Foo");
        assert_eq!(capitalize_name_part("GILGAMESH"), "Gilgamesh");
        assert_eq!(capitalize_name_part("bar"), "Bar");
    }

    #[test]
    fn capitalize_empty_is_empty() {
        assert_eq!(capitalize_name_part(""), "");
    }

    #[test]
    fn capitalize_single_char() {
        assert_eq!(capitalize_name_part("x"), "X");
    }
}
