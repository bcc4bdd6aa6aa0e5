use indexmap::IndexMap;

use crate::args::Args;
use crate::error::ArgsError;
use crate::marshal::{Tokens, Value};
use crate::schema::Schema;

/// Walk `argv` against `schema`.
///
/// Flag groups are consumed left to right until the first token that is not
/// one. `--` is an ordinary flag group, so its `-` is an unexpected flag.
/// Parsing is fail-fast: on the first error nothing that was collected so far
/// is kept.
pub(crate) fn parse(schema: &Schema, argv: &[&str]) -> Args {
    let mut parser = Parser {
        schema,
        tokens: Tokens::new(argv),
        values: IndexMap::new(),
    };
    let outcome = parser.run();
    let next_argument = parser.tokens.position();

    let args = match outcome {
        Ok(()) => Args::from_parts(
            schema.clone(),
            parser.values,
            None,
            next_argument,
            argv[next_argument..].iter().map(|s| s.to_string()).collect(),
        ),
        Err(err) => Args::from_parts(
            schema.clone(),
            IndexMap::new(),
            Some(err),
            next_argument,
            Vec::new(),
        ),
    };

    tracing::debug!(
        valid = args.is_valid(),
        cardinality = args.cardinality(),
        next_argument,
        "parsed arguments"
    );
    args
}

struct Parser<'s, 'a> {
    schema: &'s Schema,
    tokens: Tokens<'a>,
    values: IndexMap<char, Value>,
}

impl Parser<'_, '_> {
    fn run(&mut self) -> Result<(), ArgsError> {
        while let Some(token) = self.tokens.peek() {
            let Some(group) = flag_group(token) else {
                break;
            };
            self.tokens.next();
            for id in group.chars() {
                self.parse_flag(id)?;
            }
        }
        Ok(())
    }

    fn parse_flag(&mut self, id: char) -> Result<(), ArgsError> {
        let kind = self
            .schema
            .kind(id)
            .ok_or(ArgsError::UnexpectedArgument(id))?;
        let value = self.values.entry(id).or_insert_with(|| Value::zero(kind));
        value.consume(id, &mut self.tokens)?;
        tracing::trace!(flag = %id, kind = %kind, "consumed flag");
        Ok(())
    }
}

/// The flag characters of `token`, if it is a flag group (`-` plus at least
/// one character).
fn flag_group(token: &str) -> Option<&str> {
    token.strip_prefix('-').filter(|group| !group.is_empty())
}
