//! Field metadata: `"name,opt1,opt2"` strings resolved into a [`Tag`].

use std::fmt;

/// The only option with a defined meaning: skip the field when it holds its
/// zero value.
pub const OMIT_EMPTY: &str = "omitempty";

/// Name that excludes a field from traversal.
pub const EXCLUDED: &str = "-";

/// A field's resolved name and option set.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    name: &'a str,
    options: TagOptions<'a>,
}

impl<'a> Tag<'a> {
    /// Resolves the tag of a field declared as `ident` with optional raw
    /// metadata.
    ///
    /// The name is everything before the first comma; an empty name falls back
    /// to `ident`.
    ///
    /// ```
    /// use qs_form::Tag;
    ///
    /// let tag = Tag::resolve("int_val", Some(",omitempty"));
    /// assert_eq!(tag.name(), "int_val");
    /// assert!(tag.omit_empty());
    ///
    /// let tag = Tag::resolve("b_value", Some("b_val"));
    /// assert_eq!(tag.name(), "b_val");
    /// assert!(!tag.omit_empty());
    /// ```
    pub fn resolve(ident: &'a str, raw: Option<&'a str>) -> Self {
        let (name, options) = match raw {
            Some(raw) => match raw.split_once(',') {
                Some((name, options)) => (name, TagOptions(Some(options))),
                None => (raw, TagOptions(None)),
            },
            None => ("", TagOptions(None)),
        };
        let name = if name.is_empty() { ident } else { name };
        Tag { name, options }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn options(&self) -> TagOptions<'a> {
        self.options
    }

    /// `true` for fields named `-`.
    pub fn is_excluded(&self) -> bool {
        self.name == EXCLUDED
    }

    pub fn omit_empty(&self) -> bool {
        self.options.contains(OMIT_EMPTY)
    }
}

impl fmt::Debug for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish()
    }
}

/// The comma-separated flags following a tag's name, without the leading
/// comma.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOptions<'a>(Option<&'a str>);

impl<'a> TagOptions<'a> {
    pub fn contains(&self, option: &str) -> bool {
        self.iter().any(|o| o == option)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.0.into_iter().flat_map(|s| s.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for TagOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
