//! Tracked immutable strings.

use super::base_def;
use crate::error::{EngineError, Result};
use crate::markers::{Hashable, Structure};
use crate::state::{State, StateSet};
use crate::types::{StateType, ValueId};
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

/// Builds the states of one [`TrackedString`].
#[derive(Clone, Debug)]
struct StringState {
    id: ValueId,
    name: String,
}

impl StringState {
    fn declare(&self, body: &str, comments: String) -> State {
        let mut def = base_def(self.id, &self.name);
        def.insert("body".into(), body.into());
        State::new(StateType::StringDeclare, Some(def), comments)
    }

    fn iter(&self, body: &str, index: usize, comments: String) -> State {
        let mut def = base_def(self.id, &self.name);
        def.insert("body".into(), body.into());
        def.insert("index".into(), index.into());
        State::new(StateType::StringIter, Some(def), comments)
    }

    fn append(&self, body: &str, element: &str, comments: String) -> State {
        let mut def = base_def(self.id, &self.name);
        def.insert("body".into(), body.into());
        def.insert("element".into(), element.into());
        State::new(StateType::StringAppend, Some(def), comments)
    }
}

/// A string whose content accesses are recorded.
///
/// Characters cannot be replaced in place; the only way to grow the body
/// is [`TrackedString::append`]. Slicing and concatenation produce new
/// tracked strings recording into the same set.
///
/// Positions count characters, not bytes.
pub struct TrackedString {
    generator: StringState,
    set: StateSet,
    body: String,
}

impl TrackedString {
    pub fn new(
        name: impl Into<String>,
        set: &StateSet,
        body: impl Into<String>,
        comments: impl Into<String>,
    ) -> Result<Self> {
        let generator = StringState {
            id: ValueId::next(),
            name: name.into(),
        };
        let body = body.into();

        set.add_state(generator.declare(&body, comments.into()))?;

        Ok(Self {
            generator,
            set: set.clone(),
            body,
        })
    }

    /// Read the character at `index`, recording a `string_iter` state.
    pub fn char_at(&self, index: usize) -> Result<char> {
        let ch = self
            .body
            .chars()
            .nth(index)
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: self.len(),
            })?;

        self.set.add_state(self.generator.iter(
            &self.body,
            index,
            format!("accessing character at {index}"),
        ))?;
        Ok(ch)
    }

    /// Take a substring as a new tracked string named `<name>_sub`.
    ///
    /// Nothing is recorded for `self`; the child records its own
    /// declaration. Bounds past the end are clamped.
    pub fn slice<R>(&self, range: R) -> Result<TrackedString>
    where
        R: RangeBounds<usize> + fmt::Debug,
    {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);

        let text: String = self
            .body
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect();

        TrackedString::new(
            format!("{}_sub", self.name()),
            &self.set,
            text,
            format!("creating new substring for {range:?}"),
        )
    }

    /// Replacing a character is not supported; this always fails and
    /// records nothing.
    pub fn set_char(&mut self, index: usize, _ch: char) -> Result<()> {
        tracing::warn!(name = %self.name(), index, "rejected item assignment on string");
        Err(EngineError::UnsupportedOperation(
            "'TrackedString' object does not support item assignment".into(),
        ))
    }

    /// Append text (or another tracked string's body) to this string.
    pub fn append(&mut self, value: impl AsRef<str>) -> Result<()> {
        self.append_with_comments(value, "")
    }

    pub fn append_with_comments(
        &mut self,
        value: impl AsRef<str>,
        comments: impl Into<String>,
    ) -> Result<()> {
        let element = value.as_ref();
        let body = format!("{}{}", self.body, element);

        self.set
            .add_state(self.generator.append(&body, element, comments.into()))?;
        self.body = body;
        Ok(())
    }

    /// Build a new string `<name>_super` holding `self` followed by
    /// `value`. `self` is left unchanged.
    pub fn concat(&self, value: impl AsRef<str>) -> Result<TrackedString> {
        let element = value.as_ref();
        let mut child = TrackedString::new(
            format!("{}_super", self.name()),
            &self.set,
            self.body.clone(),
            format!("creating new string with {element} appended to the original string"),
        )?;
        child.append(element)?;
        Ok(child)
    }

    /// A fresh iterator; each yielded character records a `string_iter`.
    pub fn iter(&self) -> StringIter<'_> {
        StringIter::new(self)
    }

    /// Number of characters. Not recorded.
    pub fn len(&self) -> usize {
        self.body.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The current text, read without recording.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn name(&self) -> &str {
        &self.generator.name
    }

    pub fn id(&self) -> ValueId {
        self.generator.id
    }

    /// The log this string records into.
    pub fn state_set(&self) -> &StateSet {
        &self.set
    }
}

impl AsRef<str> for TrackedString {
    fn as_ref(&self) -> &str {
        &self.body
    }
}

impl Hashable for TrackedString {}
impl Structure for TrackedString {}

impl fmt::Display for TrackedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl fmt::Debug for TrackedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackedString({:?})", self.body)
    }
}

impl<'a> IntoIterator for &'a TrackedString {
    type Item = Result<char>;
    type IntoIter = StringIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only iterator over a [`TrackedString`].
///
/// Reads go through [`TrackedString::char_at`], so every yielded
/// character is recorded. Iteration stops after the first error.
pub struct StringIter<'a> {
    string: &'a TrackedString,
    index: usize,
    size: usize,
}

impl<'a> StringIter<'a> {
    fn new(string: &'a TrackedString) -> Self {
        Self {
            string,
            index: 0,
            size: string.len(),
        }
    }
}

impl Iterator for StringIter<'_> {
    type Item = Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.size {
            return None;
        }
        let result = self.string.char_at(self.index);
        self.index = if result.is_ok() {
            self.index + 1
        } else {
            self.size
        };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size - self.index;
        (remaining.min(1), Some(remaining))
    }
}

impl FusedIterator for StringIter<'_> {}
