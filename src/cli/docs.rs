//! Documentation content for the dataconv CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Paths,
    Formats,
}

impl DocCategory {
    /// Parse a topic name, accepting a few aliases
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "query" | "queries" => Some(Self::Syntax),
            "operators" | "ops" | "conditions" | "where" => Some(Self::Operators),
            "paths" | "path" | "extraction" => Some(Self::Paths),
            "formats" | "format" | "validation" => Some(Self::Formats),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"DATACONV DOCUMENTATION

dataconv converts structured documents between JSON, TOML, YAML and XML.
A single query names the source, the destination, an optional extraction
path and optional filter conditions.

DOCUMENTATION TOPICS

  syntax            Query structure, file references and literals
  operators         Comparison operators and how values are compared
  paths             Extraction paths and the wildcard segment
  formats           Supported formats and what each one can hold

QUICK REFERENCE

  from a.json to b.yaml                         Plain conversion
  from data.json[users.*] to users.toml         Extract, then convert
  from data.json[users.*] to out.yaml where age >= 26 and active == true

Run 'dataconv docs <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Paths) => Ok(PATHS_DOC),
        Some(DocCategory::Formats) => Ok(FORMATS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"QUERY SYNTAX

  from <source>[<path>] to <dest> where <condition> and <condition> ...

  Only 'from' and 'to' are required. Keywords are lowercase:
  from, to, where, and, true, false, null.

FILE REFERENCES
  Bare:    data/users.json
           Letters, digits, _, -, / and . only.
  Quoted:  "my data/users.json"
           Double quotes. Backslash escapes are kept as written.

EXTRACTION PATH
  Optional, in brackets directly after the file:
    from data.json[users.*] to out.yaml
  See 'dataconv docs paths'.

CONDITIONS
  where <field> <op> <value> [and <field> <op> <value> ...]

  Fields are top-level keys of each record. Conditions are AND-combined;
  there is no OR.

LITERALS
  Strings:   "active"
  Numbers:   30, -1.5, 2e3          (always compared as floating point)
  Booleans:  true, false
  Null:      null

EXAMPLES
  from test/test.json to output.yaml
  from data.json[users.*] to output.toml where age > 25
  from data.json to out.yaml where status == "active" and score >= 90
"#;

const OPERATORS_DOC: &str = r#"COMPARISON OPERATORS

  ==    Equal
  !=    Not equal
  >     Greater than
  <     Less than
  >=    Greater than or equal
  <=    Less than or equal

COMPARISON RULES
  Numbers:   integers and floats compare by value, so 30 == 30.0
  Null:      null == null is true; any ordering against null is false
  Strings:   compared lexicographically
  Booleans:  true == true; booleans are not numbers
  Mismatch:  ordering a string against a number is false (logged as a
             warning), never an error

MISSING FIELDS
  A record without the field is compared as if the field were null:
    where email == null     keeps records without an email
    where age > 25          drops records without an age

RECORDS
  Conditions apply to a list of records. A single object is treated as a
  one-item list. Items that are not objects never match.
"#;

const PATHS_DOC: &str = r#"EXTRACTION PATHS

  Dot-separated keys, with an optional final wildcard:

    users           The value under "users"
    meta.version    Nested lookup
    users.*         Every element of the "users" array

RESULTS
  One match:     the value itself (a scalar stays a scalar)
  Many matches:  a list
  No match:      an empty list

  A missing key, or a key looked up on something that is not an object,
  is simply no match. A wildcard on something that is not an array is no
  match as well.

RULES
  - The wildcard must be the last segment: users.*.name is rejected
  - Segments can't be empty: users..name is rejected
  - Extraction always happens before filtering
"#;

const FORMATS_DOC: &str = r##"FORMATS

  Extension      Format
  .json          JSON
  .toml          TOML
  .yaml, .yml    YAML
  .xml           XML

  Detection uses the file extension, case-insensitively.

VALIDATION
  Every conversion is checked against the destination format before
  anything is written. Errors abort the conversion; warnings don't.

  JSON   Finite numbers only; string keys only; no dates or binary data
  TOML   As JSON, plus dates and times; mixed-type lists warn
  YAML   Nearly everything; non-string keys warn; no NaN or infinity
  XML    String keys only; every value must be writable as text

LIST ROOTS
  TOML and XML documents need a mapping at the root. A list result is
  wrapped before saving:
    TOML   {"root": [...]}
    XML    {"root": {"item": [...]}}

YAML BINARY
  Binary data is written as base64 under the local tag !binary and read
  back as bytes. A core !!binary value from another tool loads as its
  base64 text.

XML MAPPING
  <user id="7">John</user>   ->   {"user": {"@id": "7", "#text": "John"}}
  Repeated tags become lists; an empty element is null.

  Check a file on its own with:
    dataconv validate-file data.json --format toml
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(DocCategory::from_name("Paths"), Some(DocCategory::Paths));
        assert_eq!(DocCategory::from_name("ops"), Some(DocCategory::Operators));
        assert!(get_doc_category("nope").is_err());
    }

    #[test]
    fn formats_doc_shows_xml_mapping() {
        let doc = get_doc_category("formats").unwrap();
        assert!(doc.contains(r##""#text": "John""##));
        assert!(doc.contains("--format toml"));
    }
}
