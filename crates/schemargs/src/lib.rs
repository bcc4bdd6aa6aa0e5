//! Schema-driven short flag parsing.
//!
//! A schema is a compact string that declares one-letter flags and the type of
//! value each one takes:
//!
//! | suffix | kind         | example argv            |
//! |--------|--------------|-------------------------|
//! | none   | boolean      | `-v`                    |
//! | `*`    | string       | `-o out.txt`            |
//! | `#`    | integer      | `-n 3`                  |
//! | `##`   | double       | `-r 0.5`                |
//! | `[*]`  | string array | `-i a -i b`             |
//! | `&`    | string map   | `-e k1:v1,k2:v2`        |
//!
//! Flags may be grouped (`-vn 3`); every value-taking flag in a group takes the
//! next unconsumed token. Scanning stops at the first token that is not a flag
//! group (one that does not start with `-`, or a bare `-`), and everything from
//! there on is positional.
//!
//! ```
//! use schemargs::Args;
//!
//! let args = Args::new("l,p#,d*", &["-lp", "8080", "-d", "/tmp", "extra"]).unwrap();
//! assert!(args.is_valid());
//! assert!(args.get_boolean('l'));
//! assert_eq!(args.get_int('p'), 8080);
//! assert_eq!(args.get_string('d'), "/tmp");
//! assert_eq!(args.rest(), ["extra"]);
//!
//! let args = Args::new("p#", &["-p", "eighty"]).unwrap();
//! assert_eq!(args.error_message(), "Argument -p expects an integer but was 'eighty'.");
//! ```
//!
//! Parsing is fail-fast: the first problem in argv invalidates the whole
//! result. [`Args::new`] records it for inspection, [`Args::parse`] returns it
//! as `Err`. A malformed schema is always an `Err`.

mod args;
mod error;
mod marshal;
mod parser;
mod schema;

pub use args::Args;
pub use error::{ArgsError, ErrorCode};
pub use marshal::{StringMap, Value};
pub use schema::{ArgumentKind, Schema};
