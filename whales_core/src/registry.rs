use crate::count::Count;
use crate::counter::Counter;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{self, Display};

/// A name a widget can be registered under. Follows the custom-element rules:
/// an ASCII lowercase letter to start, then lowercase letters, digits, and
/// hyphens, with at least one hyphen somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    /// Validate a raw tag name.
    pub fn new(raw: &str) -> Result<Self, Error> {
        let mut chars = raw.chars();

        let valid_start = chars.next().is_some_and(|c| c.is_ascii_lowercase());
        let valid_rest =
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if valid_start && valid_rest && raw.contains('-') {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::InvalidTag(raw.to_string()))
        }
    }

    /// The tag as registered.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to build a fresh widget for a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// The count a new widget starts from when the host doesn't supply one.
    pub initial: Count,
}

/// The host-owned registration map. There is deliberately no global registry:
/// whoever builds the app decides which tags exist, and collisions surface as
/// errors instead of silent overwrites.
#[derive(Debug, Default)]
pub struct Registry {
    /// What each tag resolves to.
    definitions: HashMap<TagName, Definition>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under a tag. Registering a tag that already
    /// exists is an error.
    pub fn define(&mut self, tag: TagName, definition: Definition) -> Result<(), Error> {
        match self.definitions.entry(tag) {
            Entry::Occupied(entry) => Err(Error::DuplicateTag(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(definition);

                Ok(())
            }
        }
    }

    /// Build a widget from a registered tag. `initial` (the host-supplied
    /// property value) overrides the definition's default when present.
    pub fn instantiate(&self, tag: &TagName, initial: Option<Count>) -> Result<Counter, Error> {
        let definition = self
            .definitions
            .get(tag)
            .ok_or_else(|| Error::UnknownTag(tag.clone()))?;

        Ok(Counter::new(initial.unwrap_or(definition.initial)))
    }

    /// The tags registered so far, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &TagName> {
        self.definitions.keys()
    }
}

/// Ways registration can go wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The tag doesn't follow the naming rules.
    #[error("invalid tag name {0:?} (lowercase letters, digits, and hyphens, with at least one hyphen)")]
    InvalidTag(String),

    /// The tag is already taken.
    #[error("tag <{0}> is already registered")]
    DuplicateTag(TagName),

    /// Nobody registered this tag.
    #[error("tag <{0}> is not registered")]
    UnknownTag(TagName),
}

#[cfg(test)]
mod test {
    use super::*;

    fn tag(raw: &str) -> TagName {
        TagName::new(raw).unwrap()
    }

    #[test]
    fn accepts_custom_element_style_names() {
        assert!(TagName::new("whale-counter").is_ok());
        assert!(TagName::new("x-2-wide").is_ok());
    }

    #[test]
    fn rejects_bad_names() {
        for bad in ["", "whale", "Whale-Counter", "-counter", "whale counter"] {
            assert_eq!(TagName::new(bad), Err(Error::InvalidTag(bad.to_string())));
        }
    }

    #[test]
    fn defining_the_same_tag_twice_fails() {
        let mut registry = Registry::new();
        registry
            .define(tag("whale-counter"), Definition { initial: Count::zero() })
            .unwrap();

        assert_eq!(
            registry.define(tag("whale-counter"), Definition { initial: Count(3) }),
            Err(Error::DuplicateTag(tag("whale-counter")))
        );
    }

    #[test]
    fn instantiates_with_the_host_count() {
        let mut registry = Registry::new();
        registry
            .define(tag("whale-counter"), Definition { initial: Count(1) })
            .unwrap();

        let widget = registry
            .instantiate(&tag("whale-counter"), Some(Count(3)))
            .unwrap();

        assert_eq!(widget.count(), Count(3));
    }

    #[test]
    fn instantiates_with_the_definition_default() {
        let mut registry = Registry::new();
        registry
            .define(tag("whale-counter"), Definition { initial: Count(1) })
            .unwrap();

        let widget = registry.instantiate(&tag("whale-counter"), None).unwrap();

        assert_eq!(widget.count(), Count(1));
    }

    #[test]
    fn unknown_tags_fail() {
        let registry = Registry::new();

        assert_eq!(
            registry.instantiate(&tag("whale-counter"), None),
            Err(Error::UnknownTag(tag("whale-counter")))
        );
    }
}
