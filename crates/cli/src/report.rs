use indexmap::IndexMap;
use schemargs::{Args, ArgsError, ArgumentKind, ErrorCode, Schema, Value};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub schema: String,
    pub valid: bool,
    pub cardinality: usize,
    pub values: IndexMap<String, Value>,
    pub next_argument: usize,
    pub rest: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub argument: char,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub schema: String,
    pub flags: Vec<FlagReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagReport {
    pub flag: char,
    pub kind: ArgumentKind,
    pub takes_value: bool,
}

impl ErrorReport {
    pub fn from_error(err: &ArgsError) -> Self {
        Self {
            code: err.code(),
            argument: err.argument_id(),
            parameter: err.parameter().map(str::to_string),
            message: err.to_string(),
        }
    }
}

impl ParseReport {
    pub fn from_args(args: &Args) -> Self {
        Self {
            schema: args.schema().to_string(),
            valid: args.is_valid(),
            cardinality: args.cardinality(),
            values: args
                .iter()
                .map(|(id, value)| (id.to_string(), value.clone()))
                .collect(),
            next_argument: args.next_argument(),
            rest: args.rest().to_vec(),
            error: args.error().map(ErrorReport::from_error),
        }
    }

    pub fn print_human(&self) {
        eprintln!();
        eprintln!("=== Parse Results ===");
        eprintln!("Schema: {}", self.schema);

        if let Some(err) = &self.error {
            eprintln!("ERROR: {}", err.message);
            return;
        }

        eprintln!("Flags given: {}", self.cardinality);
        for (flag, value) in &self.values {
            eprintln!("  -{flag}  {:<12}  {}", value.kind().name(), render_value(value));
        }
        if !self.rest.is_empty() {
            eprintln!(
                "Positional (from index {}): {}",
                self.next_argument,
                self.rest.join(" ")
            );
        }
    }
}

impl CheckReport {
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            schema: schema.to_string(),
            flags: schema
                .iter()
                .map(|(flag, kind)| FlagReport {
                    flag,
                    kind,
                    takes_value: kind.takes_value(),
                })
                .collect(),
        }
    }

    pub fn print_human(&self) {
        eprintln!();
        eprintln!("=== Schema Check Results ===");
        eprintln!("Schema: {}", self.schema);
        eprintln!("Flags declared: {}", self.flags.len());
        for flag in &self.flags {
            eprintln!("  -{}  {}", flag.flag, flag.kind);
        }
    }
}

/// Compact JSON rendering, e.g. `"alpha"`, `42`, `["a","b"]`.
fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_report_serializes_values_by_flag() {
        let args = Args::new("x,y*,n#", &["-x", "-y", "alpha", "-n", "3", "beta"]).unwrap();
        let report = ParseReport::from_args(&args);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["schema"], "x,y*,n#");
        assert_eq!(json["valid"], true);
        assert_eq!(json["cardinality"], 3);
        assert_eq!(json["values"]["x"], true);
        assert_eq!(json["values"]["y"], "alpha");
        assert_eq!(json["values"]["n"], 3);
        assert_eq!(json["nextArgument"], 5);
        assert_eq!(json["rest"][0], "beta");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn parse_report_carries_error_fields() {
        let args = Args::new("x#", &["-x", "Forty two"]).unwrap();
        let report = ParseReport::from_args(&args);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["valid"], false);
        assert_eq!(json["cardinality"], 0);
        assert_eq!(json["error"]["code"], "INVALID_INTEGER");
        assert_eq!(json["error"]["argument"], "x");
        assert_eq!(json["error"]["parameter"], "Forty two");
        assert_eq!(
            json["error"]["message"],
            "Argument -x expects an integer but was 'Forty two'."
        );
    }

    #[test]
    fn check_report_lists_flags_in_order() {
        let schema = Schema::compile("v, o*, i[*]").unwrap();
        let report = CheckReport::from_schema(&schema);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["schema"], "v,o*,i[*]");
        assert_eq!(json["flags"][0]["flag"], "v");
        assert_eq!(json["flags"][0]["kind"], "boolean");
        assert_eq!(json["flags"][0]["takesValue"], false);
        assert_eq!(json["flags"][2]["kind"], "string-array");
    }

    #[test]
    fn values_render_as_compact_json() {
        assert_eq!(render_value(&Value::Boolean(true)), "true");
        assert_eq!(render_value(&Value::String("a b".to_string())), "\"a b\"");
        assert_eq!(
            render_value(&Value::StringArray(vec!["a".to_string(), "b".to_string()])),
            "[\"a\",\"b\"]"
        );
    }
}
