use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::error::ArgsError;
use crate::marshal::{StringMap, Value};
use crate::parser;
use crate::schema::Schema;

static EMPTY_MAP: LazyLock<StringMap> = LazyLock::new(StringMap::new);

/// The outcome of parsing argv against a schema.
///
/// Typed getters never fail: a flag that is absent, or declared with another
/// kind, reads as the zero value of the requested type. Use [`Args::has`] to
/// tell "absent" from "present with a zero value".
#[derive(Debug, Clone, Default)]
pub struct Args {
    schema: Schema,
    values: IndexMap<char, Value>,
    error: Option<ArgsError>,
    next_argument: usize,
    rest: Vec<String>,
}

impl Args {
    /// Compile `schema` and parse `argv` against it.
    ///
    /// A malformed schema is returned as `Err`. Problems with `argv` itself are
    /// recorded in the result; check [`Args::is_valid`].
    pub fn new<S: AsRef<str>>(schema: &str, argv: &[S]) -> Result<Self, ArgsError> {
        let schema = Schema::compile(schema)?;
        Ok(Self::with_schema(&schema, argv))
    }

    /// Like [`Args::new`], but argument errors are returned as `Err` too.
    pub fn parse<S: AsRef<str>>(schema: &str, argv: &[S]) -> Result<Self, ArgsError> {
        Self::new(schema, argv)?.into_result()
    }

    /// Parse `argv` against an already compiled schema.
    pub fn with_schema<S: AsRef<str>>(schema: &Schema, argv: &[S]) -> Self {
        let argv: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();
        parser::parse(schema, &argv)
    }

    pub(crate) fn from_parts(
        schema: Schema,
        values: IndexMap<char, Value>,
        error: Option<ArgsError>,
        next_argument: usize,
        rest: Vec<String>,
    ) -> Self {
        Self {
            schema,
            values,
            error,
            next_argument,
            rest,
        }
    }

    /// Turn a recorded argument error into `Err`.
    pub fn into_result(mut self) -> Result<Self, ArgsError> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&ArgsError> {
        self.error.as_ref()
    }

    /// The error rendered for users, or an empty string if parsing succeeded.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of distinct flags that were given.
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    pub fn has(&self, id: char) -> bool {
        self.values.contains_key(&id)
    }

    pub fn get(&self, id: char) -> Option<&Value> {
        self.values.get(&id)
    }

    /// Flags that were given, in the order they first appeared.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Value)> + '_ {
        self.values.iter().map(|(id, value)| (*id, value))
    }

    pub fn get_boolean(&self, id: char) -> bool {
        self.get(id).and_then(Value::as_bool).unwrap_or_default()
    }

    pub fn get_string(&self, id: char) -> &str {
        self.get(id).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get_int(&self, id: char) -> i32 {
        self.get(id).and_then(Value::as_int).unwrap_or_default()
    }

    pub fn get_double(&self, id: char) -> f64 {
        self.get(id).and_then(Value::as_double).unwrap_or_default()
    }

    pub fn get_string_array(&self, id: char) -> &[String] {
        self.get(id)
            .and_then(Value::as_string_array)
            .unwrap_or_default()
    }

    pub fn get_map(&self, id: char) -> &StringMap {
        self.get(id).and_then(Value::as_map).unwrap_or(&EMPTY_MAP)
    }

    /// Index into argv of the first positional argument.
    pub fn next_argument(&self) -> usize {
        self.next_argument
    }

    /// Positional arguments, i.e. argv from [`Args::next_argument`] on.
    ///
    /// Empty when parsing failed.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }
}
