//! Tag validation and normalization.
//!
//! Callers hand tags over in many shapes: a single string, a list of
//! strings, or a JSON value read from a file or the command line. Every shape
//! converts into [`Tag`] or [`TagList`] through `TryFrom`, so malformed input
//! is rejected before a request is built.

use std::fmt;

use serde_json::Value;

use super::ValidationError;

/// A single non-empty tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// Validates and wraps a tag.
    pub fn new(tag: impl Into<String>) -> Result<Self, ValidationError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        Ok(Self(tag))
    }

    /// Returns the tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the tag, returning its text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Tag {
    type Error = ValidationError;

    fn try_from(tag: &str) -> Result<Self, Self::Error> {
        Tag::new(tag)
    }
}

impl TryFrom<String> for Tag {
    type Error = ValidationError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        Tag::new(tag)
    }
}

impl TryFrom<&String> for Tag {
    type Error = ValidationError;

    fn try_from(tag: &String) -> Result<Self, Self::Error> {
        Tag::new(tag.as_str())
    }
}

impl TryFrom<&Value> for Tag {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(tag) => Tag::new(tag.as_str()),
            other => Err(ValidationError::TagNotAString {
                found: value_kind(other),
            }),
        }
    }
}

impl TryFrom<Value> for Tag {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Tag::try_from(&value)
    }
}

/// A de-duplicated list of tags, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<Tag>);

impl TagList {
    /// Builds a list from already-validated tags, dropping duplicates.
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut list: Vec<Tag> = Vec::new();
        for tag in tags {
            if !list.contains(&tag) {
                list.push(tag);
            }
        }
        Self(list)
    }

    /// Validates every element, then de-duplicates.
    pub fn parse<I, T>(tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let tags = tags
            .into_iter()
            .map(|tag| Tag::new(tag.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_tags(tags))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    /// Returns the tags as plain strings, ready for the wire.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|tag| tag.0.clone()).collect()
    }
}

impl From<Tag> for TagList {
    fn from(tag: Tag) -> Self {
        Self(vec![tag])
    }
}

impl TryFrom<&str> for TagList {
    type Error = ValidationError;

    fn try_from(tag: &str) -> Result<Self, Self::Error> {
        Ok(Tag::new(tag)?.into())
    }
}

impl TryFrom<String> for TagList {
    type Error = ValidationError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        Ok(Tag::new(tag)?.into())
    }
}

impl<T: AsRef<str>> TryFrom<Vec<T>> for TagList {
    type Error = ValidationError;

    fn try_from(tags: Vec<T>) -> Result<Self, Self::Error> {
        TagList::parse(tags)
    }
}

impl<T: AsRef<str>> TryFrom<&[T]> for TagList {
    type Error = ValidationError;

    fn try_from(tags: &[T]) -> Result<Self, Self::Error> {
        TagList::parse(tags)
    }
}

impl<T: AsRef<str>, const N: usize> TryFrom<[T; N]> for TagList {
    type Error = ValidationError;

    fn try_from(tags: [T; N]) -> Result<Self, Self::Error> {
        TagList::parse(tags)
    }
}

impl TryFrom<&Value> for TagList {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(_) => Ok(Tag::try_from(value)?.into()),
            Value::Array(items) => {
                let tags = items
                    .iter()
                    .map(Tag::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TagList::from_tags(tags))
            }
            other => Err(ValidationError::TagsNotAList {
                found: value_kind(other),
            }),
        }
    }
}

impl TryFrom<Value> for TagList {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        TagList::try_from(&value)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
