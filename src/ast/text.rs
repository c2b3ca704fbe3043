use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, Range};
use std::sync::Arc;

/// String storage for parsed values.
///
/// A `Shared` text is a byte range of the document buffer it was parsed
/// from; holding it keeps that buffer alive. `Owned` texts come from
/// programmatic construction or from strings that needed unescaping.
#[derive(Clone)]
pub enum Text {
    Shared { source: Arc<str>, range: Range<usize> },
    Owned(Box<str>),
}

impl Text {
    /// Slice of `source`. The range must lie on char boundaries.
    pub fn shared(source: &Arc<str>, range: Range<usize>) -> Self {
        debug_assert!(source.is_char_boundary(range.start) && source.is_char_boundary(range.end));
        Text::Shared {
            source: Arc::clone(source),
            range,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Text::Shared { source, range } => &source[range.clone()],
            Text::Owned(s) => s,
        }
    }

    /// True if the text borrows from a document buffer.
    pub fn is_shared(&self) -> bool {
        matches!(self, Text::Shared { .. })
    }
}

impl Default for Text {
    fn default() -> Self {
        Text::Owned(Box::from(""))
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Text {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::Owned(Box::from(s))
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::Owned(s.into_boxed_str())
    }
}

impl From<Text> for String {
    fn from(t: Text) -> Self {
        t.as_str().to_string()
    }
}
