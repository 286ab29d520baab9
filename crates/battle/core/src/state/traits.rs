//! Trait sources: equipment, classes, status effects and the like.
//!
//! A trait source carries free-form note tags written as `<key:value>` (or a
//! bare `<key>` flag). The slip subsystem reads numeric tags from them.

use std::collections::BTreeMap;

/// Where a trait source comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TraitSourceKind {
    Actor,
    Class,
    Enemy,
    Weapon,
    Armor,
    State,
}

/// A modifier attached to a battler, with its note tags.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitSource {
    pub kind: TraitSourceKind,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    notes: BTreeMap<String, String>,
}

impl TraitSource {
    pub fn new(kind: TraitSourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            notes: BTreeMap::new(),
        }
    }

    /// Builds a source from raw note text, extracting every `<key:value>` tag.
    pub fn from_note(kind: TraitSourceKind, name: impl Into<String>, note: &str) -> Self {
        Self {
            kind,
            name: name.into(),
            notes: parse_note_tags(note),
        }
    }

    #[must_use]
    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }

    pub fn note(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }

    pub fn notes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.notes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Numeric value of a tag; absent or malformed tags read as 0.
    pub fn note_value(&self, key: &str) -> f64 {
        self.note(key).map(parse_numeric).unwrap_or(0.0)
    }
}

/// Parses a tag value leniently: surrounding whitespace is ignored and
/// anything that is not a finite number reads as 0.
pub fn parse_numeric(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Extracts `<key:value>` and `<key>` tags from note text.
///
/// A bare `<key>` records the value `"true"`. A key may not contain `<`, `>`
/// or `:`; a stray `<` inside a would-be key restarts the scan there. Later
/// duplicates overwrite earlier ones.
pub fn parse_note_tags(note: &str) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    let mut rest = note;

    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            break;
        };
        let inner = &after[..close];
        let key_end = inner.find(':').unwrap_or(inner.len());

        if let Some(nested) = inner[..key_end].find('<') {
            rest = &after[nested..];
            continue;
        }

        let key = &inner[..key_end];
        if !key.is_empty() {
            let value = if key_end < inner.len() {
                &inner[key_end + 1..]
            } else {
                "true"
            };
            tags.insert(key.to_string(), value.to_string());
        }
        rest = &after[close + 1..];
    }

    tags
}
