//! Parse a query and show its descriptor

use super::CliError;
use crate::parser;

/// Parse `query` and render the resulting descriptor as JSON.
pub fn execute_check(query: &str, pretty: bool) -> Result<String, CliError> {
    let descriptor = parser::parse_query(query)?;
    let json = if pretty {
        serde_json::to_string_pretty(&descriptor)
    } else {
        serde_json::to_string(&descriptor)
    }?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_descriptor() {
        let json = execute_check("from a.json to b.yaml", false).unwrap();
        assert_eq!(
            json,
            r#"{"source":{"file":"a.json","path":null},"dest":{"file":"b.yaml","path":null},"conditions":[]}"#
        );
    }
}
