//! Per-flag value marshaling.
//!
//! Each recognized flag owns one [`Value`] for the duration of a parse. The
//! value starts at the zero of its [`ArgumentKind`] and is updated every time
//! the flag occurs, pulling its parameter (if any) from the shared token cursor.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ArgsError;
use crate::schema::ArgumentKind;

/// Key/value pairs collected by a map flag, in first-seen key order.
pub type StringMap = IndexMap<String, String>;

/// Cursor over the raw argument tokens.
#[derive(Debug, Clone)]
pub(crate) struct Tokens<'a> {
    argv: &'a [&'a str],
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(argv: &'a [&'a str]) -> Self {
        Self { argv, pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.argv.get(self.pos).copied()
    }

    /// Index of the next unconsumed token.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }
}

/// A typed flag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    String(String),
    Integer(i32),
    Double(f64),
    StringArray(Vec<String>),
    Map(StringMap),
}

impl Value {
    /// The value a flag of `kind` has before it has been seen.
    pub fn zero(kind: ArgumentKind) -> Self {
        match kind {
            ArgumentKind::Boolean => Self::Boolean(false),
            ArgumentKind::String => Self::String(String::new()),
            ArgumentKind::Integer => Self::Integer(0),
            ArgumentKind::Double => Self::Double(0.0),
            ArgumentKind::StringArray => Self::StringArray(Vec::new()),
            ArgumentKind::Map => Self::Map(StringMap::new()),
        }
    }

    pub fn kind(&self) -> ArgumentKind {
        match self {
            Self::Boolean(_) => ArgumentKind::Boolean,
            Self::String(_) => ArgumentKind::String,
            Self::Integer(_) => ArgumentKind::Integer,
            Self::Double(_) => ArgumentKind::Double,
            Self::StringArray(_) => ArgumentKind::StringArray,
            Self::Map(_) => ArgumentKind::Map,
        }
    }

    /// Record one occurrence of flag `id`, taking its parameter from `tokens`.
    ///
    /// Scalars are overwritten by later occurrences; string arrays append and
    /// maps merge, with later keys replacing earlier ones.
    pub(crate) fn consume(&mut self, id: char, tokens: &mut Tokens<'_>) -> Result<(), ArgsError> {
        match self {
            Self::Boolean(value) => *value = true,
            Self::String(value) => {
                let parameter = tokens.next().ok_or(ArgsError::MissingString(id))?;
                *value = parameter.to_string();
            }
            Self::Integer(value) => {
                let parameter = tokens.next().ok_or(ArgsError::MissingInteger(id))?;
                *value = parameter.parse().map_err(|_| ArgsError::InvalidInteger {
                    id,
                    parameter: parameter.to_string(),
                })?;
            }
            Self::Double(value) => {
                let parameter = tokens.next().ok_or(ArgsError::MissingDouble(id))?;
                *value = parameter.parse().map_err(|_| ArgsError::InvalidDouble {
                    id,
                    parameter: parameter.to_string(),
                })?;
            }
            Self::StringArray(items) => {
                let parameter = tokens.next().ok_or(ArgsError::MissingString(id))?;
                items.push(parameter.to_string());
            }
            Self::Map(map) => {
                let parameter = tokens.next().ok_or(ArgsError::MissingMap(id))?;
                for (key, value) in split_map_entries(id, parameter)? {
                    map.insert(key.to_string(), value.to_string());
                }
            }
        }
        Ok(())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_string_array(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&StringMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Split `k1:v1,k2:v2` into pairs.
///
/// Every pair needs a non-empty key and exactly one `:`. Separators cannot be
/// escaped, so a value containing `:` is rejected rather than guessed at.
fn split_map_entries(id: char, parameter: &str) -> Result<Vec<(&str, &str)>, ArgsError> {
    parameter
        .split(',')
        .map(|entry| match entry.split_once(':') {
            Some((key, value)) if !key.is_empty() && !value.contains(':') => Ok((key, value)),
            _ => Err(ArgsError::MalformedMap {
                id,
                parameter: parameter.to_string(),
            }),
        })
        .collect()
}
