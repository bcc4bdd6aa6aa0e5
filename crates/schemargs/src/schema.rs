use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ArgsError;

/// The value type a flag carries, selected by its suffix in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgumentKind {
    /// No suffix. Present or absent, never takes a value.
    Boolean,
    /// `*`
    String,
    /// `#`
    Integer,
    /// `##`
    Double,
    /// `[*]`
    StringArray,
    /// `&`
    Map,
}

/// Suffixes ordered so that a longer suffix is tried before its prefix.
const SUFFIXES: [(&str, ArgumentKind); 5] = [
    ("##", ArgumentKind::Double),
    ("#", ArgumentKind::Integer),
    ("[*]", ArgumentKind::StringArray),
    ("&", ArgumentKind::Map),
    ("*", ArgumentKind::String),
];

impl ArgumentKind {
    /// The schema suffix that selects this kind.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Boolean => "",
            Self::String => "*",
            Self::Integer => "#",
            Self::Double => "##",
            Self::StringArray => "[*]",
            Self::Map => "&",
        }
    }

    /// Human-readable name, as used in messages and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::StringArray => "string-array",
            Self::Map => "map",
        }
    }

    /// Whether a flag of this kind pulls a value token from argv.
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::Boolean)
    }

    fn strip_suffix(tail: &str) -> (Self, &str) {
        SUFFIXES
            .iter()
            .find_map(|(suffix, kind)| tail.strip_prefix(suffix).map(|rest| (*kind, rest)))
            .unwrap_or((Self::Boolean, tail))
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled flag schema.
///
/// The source grammar is a list of elements, each a single ASCII letter
/// followed by an optional type suffix. Elements may be separated by `,` or
/// whitespace, or simply written back to back:
///
/// ```
/// use schemargs::{ArgumentKind, Schema};
///
/// let schema = Schema::compile("l, p#, d*, n##, f[*], m&").unwrap();
/// assert_eq!(schema.kind('l'), Some(ArgumentKind::Boolean));
/// assert_eq!(schema.kind('n'), Some(ArgumentKind::Double));
/// assert_eq!(schema, Schema::compile("lp#d*n##f[*]m&").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    entries: IndexMap<char, ArgumentKind>,
}

impl Schema {
    /// Compile `source` into a schema.
    ///
    /// Fails with [`ArgsError::InvalidArgumentName`] when an element does not
    /// start with an ASCII letter, [`ArgsError::InvalidArgumentFormat`] when a
    /// letter is followed by an unknown suffix, and
    /// [`ArgsError::DuplicateArgument`] when a letter is declared twice.
    pub fn compile(source: &str) -> Result<Self, ArgsError> {
        let mut entries = IndexMap::new();
        let mut rest = source;

        loop {
            rest = rest.trim_start_matches(is_separator);
            let Some(id) = rest.chars().next() else {
                break;
            };
            if !id.is_ascii_alphabetic() {
                return Err(ArgsError::InvalidArgumentName(id));
            }

            // `id` is ASCII, so the tail starts at byte 1.
            let tail = &rest[1..];
            let (kind, after) = ArgumentKind::strip_suffix(tail);
            if after
                .chars()
                .next()
                .is_some_and(|c| !is_separator(c) && !c.is_ascii_alphabetic())
            {
                let end = tail.find(is_separator).unwrap_or(tail.len());
                return Err(ArgsError::InvalidArgumentFormat {
                    id,
                    parameter: tail[..end].to_string(),
                });
            }

            if entries.insert(id, kind).is_some() {
                return Err(ArgsError::DuplicateArgument(id));
            }
            rest = after;
        }

        tracing::debug!(schema = source, flags = entries.len(), "compiled argument schema");
        Ok(Self { entries })
    }

    /// The kind declared for `id`, if any.
    pub fn kind(&self, id: char) -> Option<ArgumentKind> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: char) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared flags in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (char, ArgumentKind)> + '_ {
        self.entries.iter().map(|(id, kind)| (*id, *kind))
    }
}

impl FromStr for Schema {
    type Err = ArgsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

/// Canonical form: elements joined with `,`, e.g. `x,y*,z#`.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, kind)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{id}{}", kind.suffix())?;
        }
        Ok(())
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}
