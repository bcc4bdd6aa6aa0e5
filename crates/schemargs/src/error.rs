use serde::Serialize;
use thiserror::Error;

/// Machine-readable classification of an [`ArgsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnexpectedArgument,
    InvalidArgumentName,
    InvalidArgumentFormat,
    DuplicateArgument,
    MissingString,
    MissingInteger,
    InvalidInteger,
    MissingDouble,
    InvalidDouble,
    MissingMap,
    MalformedMap,
}

/// Schema or argument error.
///
/// Every variant carries the flag character it is about. Conversion failures
/// also carry the raw text that could not be converted, see
/// [`ArgsError::parameter`]. The `Display` output is the message shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Argument -{0} unexpected.")]
    UnexpectedArgument(char),

    #[error("'{0}' is not a valid argument name.")]
    InvalidArgumentName(char),

    #[error("'{parameter}' is not a valid argument format.")]
    InvalidArgumentFormat { id: char, parameter: String },

    #[error("Argument -{0} is declared more than once.")]
    DuplicateArgument(char),

    #[error("Could not find string parameter for -{0}.")]
    MissingString(char),

    #[error("Could not find integer parameter for -{0}.")]
    MissingInteger(char),

    #[error("Argument -{id} expects an integer but was '{parameter}'.")]
    InvalidInteger { id: char, parameter: String },

    #[error("Could not find double parameter for -{0}.")]
    MissingDouble(char),

    #[error("Argument -{id} expects a double but was '{parameter}'.")]
    InvalidDouble { id: char, parameter: String },

    #[error("Could not find map parameter for -{0}.")]
    MissingMap(char),

    #[error("Map string for -{id} is not of form k1:v1,k2:v2... but was '{parameter}'.")]
    MalformedMap { id: char, parameter: String },
}

impl ArgsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnexpectedArgument(_) => ErrorCode::UnexpectedArgument,
            Self::InvalidArgumentName(_) => ErrorCode::InvalidArgumentName,
            Self::InvalidArgumentFormat { .. } => ErrorCode::InvalidArgumentFormat,
            Self::DuplicateArgument(_) => ErrorCode::DuplicateArgument,
            Self::MissingString(_) => ErrorCode::MissingString,
            Self::MissingInteger(_) => ErrorCode::MissingInteger,
            Self::InvalidInteger { .. } => ErrorCode::InvalidInteger,
            Self::MissingDouble(_) => ErrorCode::MissingDouble,
            Self::InvalidDouble { .. } => ErrorCode::InvalidDouble,
            Self::MissingMap(_) => ErrorCode::MissingMap,
            Self::MalformedMap { .. } => ErrorCode::MalformedMap,
        }
    }

    /// The flag character the error refers to.
    ///
    /// For [`ArgsError::InvalidArgumentName`] this is the offending schema
    /// character, which is by definition not a valid flag.
    pub fn argument_id(&self) -> char {
        match self {
            Self::UnexpectedArgument(id)
            | Self::InvalidArgumentName(id)
            | Self::DuplicateArgument(id)
            | Self::MissingString(id)
            | Self::MissingInteger(id)
            | Self::MissingDouble(id)
            | Self::MissingMap(id) => *id,
            Self::InvalidArgumentFormat { id, .. }
            | Self::InvalidInteger { id, .. }
            | Self::InvalidDouble { id, .. }
            | Self::MalformedMap { id, .. } => *id,
        }
    }

    /// The raw text that failed, if the error is about a specific literal.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::InvalidArgumentFormat { parameter, .. }
            | Self::InvalidInteger { parameter, .. }
            | Self::InvalidDouble { parameter, .. }
            | Self::MalformedMap { parameter, .. } => Some(parameter),
            _ => None,
        }
    }

    /// Whether the error comes from the schema rather than from argv.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::InvalidArgumentName
                | ErrorCode::InvalidArgumentFormat
                | ErrorCode::DuplicateArgument
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_flag_and_parameter() {
        let err = ArgsError::InvalidDouble {
            id: 'x',
            parameter: "Forty two".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Argument -x expects a double but was 'Forty two'."
        );
        assert_eq!(err.code(), ErrorCode::InvalidDouble);
        assert_eq!(err.argument_id(), 'x');
        assert_eq!(err.parameter(), Some("Forty two"));

        let err = ArgsError::MissingDouble('x');
        assert_eq!(err.to_string(), "Could not find double parameter for -x.");
        assert_eq!(err.parameter(), None);
    }

    #[test]
    fn schema_errors_are_classified() {
        assert!(ArgsError::InvalidArgumentName('*').is_schema_error());
        assert!(
            ArgsError::InvalidArgumentFormat {
                id: 'f',
                parameter: "~".to_string()
            }
            .is_schema_error()
        );
        assert!(!ArgsError::UnexpectedArgument('x').is_schema_error());
        assert!(!ArgsError::MissingString('x').is_schema_error());
    }

    #[test]
    fn codes_serialize_in_screaming_case() {
        let json = serde_json::to_string(&ErrorCode::MalformedMap).unwrap();
        assert_eq!(json, "\"MALFORMED_MAP\"");
    }
}
