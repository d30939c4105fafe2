use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

//==============================================================================
// Output format
//==============================================================================

/// Output data format, one file per exported sheet under `server/` and
/// `client/` subdirectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text, `<name>.csv`
    #[default]
    Csv,
    /// One compact JSON document per sheet, `<name>.json` (server side only)
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other} (expected csv or json)")),
        }
    }
}

//==============================================================================
// Export options
//==============================================================================

/// Options record handed to the export engine by the CLI (or any other
/// front end). Mirrors the shape of the persisted configuration file.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory containing the input workbooks
    pub input_dir: PathBuf,
    /// Directory receiving the `server/` and `client/` subdirectories
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Overwrite existing output files instead of skipping them
    pub force: bool,
    /// Optional error-log sink, created/truncated at run start
    pub error_log: Option<PathBuf>,
    /// Workbook file names to export; ignored when `all_files` is set
    pub filenames: HashSet<String>,
    pub all_files: bool,
}

impl ExportOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            format: OutputFormat::Csv,
            force: false,
            error_log: None,
            filenames: HashSet::new(),
            all_files: false,
        }
    }
}

//==============================================================================
// Type tags and coerced values
//==============================================================================

/// Column coercion kind declared on the type header row.
///
/// Anything that is not a recognized scalar tag passes the cell text through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Str,
    Passthrough,
}

impl TypeTag {
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "int" => TypeTag::Int,
            "string" => TypeTag::Str,
            _ => TypeTag::Passthrough,
        }
    }

    /// Coerce one cell value. Integer parsing is lenient: invalid or absent
    /// input yields 0, matching the tables' historical behavior.
    pub fn coerce(&self, value: &str) -> FieldValue {
        match self {
            TypeTag::Int => FieldValue::Int(value.trim().parse::<i64>().unwrap_or(0)),
            TypeTag::Str | TypeTag::Passthrough => FieldValue::Text(value.to_string()),
        }
    }
}

/// A coerced cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

//==============================================================================
// Records
//==============================================================================

/// One extracted data row for one target: field title -> coerced value,
/// in source column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_type_tag_parse() {
        assert_eq!(TypeTag::parse("int"), TypeTag::Int);
        assert_eq!(TypeTag::parse(" string "), TypeTag::Str);
        assert_eq!(TypeTag::parse("vec3"), TypeTag::Passthrough);
        assert_eq!(TypeTag::parse(""), TypeTag::Passthrough);
    }

    #[test]
    fn test_int_coercion_lenient() {
        assert_eq!(TypeTag::Int.coerce("42"), FieldValue::Int(42));
        assert_eq!(TypeTag::Int.coerce(" -7 "), FieldValue::Int(-7));
        assert_eq!(TypeTag::Int.coerce("42abc"), FieldValue::Int(0));
        assert_eq!(TypeTag::Int.coerce(""), FieldValue::Int(0));
    }

    #[test]
    fn test_string_coercion_passthrough() {
        assert_eq!(
            TypeTag::Str.coerce("42"),
            FieldValue::Text("42".to_string())
        );
        assert_eq!(
            TypeTag::Passthrough.coerce("1|2|3"),
            FieldValue::Text("1|2|3".to_string())
        );
    }

    #[test]
    fn test_record_preserves_column_order() {
        let mut record = Record::new();
        record.push("zeta", FieldValue::Int(1));
        record.push("alpha", FieldValue::Text("x".to_string()));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":"x"}"#);
    }
}
