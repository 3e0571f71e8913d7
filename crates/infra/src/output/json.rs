//! JSON output formatting.

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Format a value as indented JSON.
pub fn format_json_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_json_is_single_line() {
        let value = json!({ "name": "backend-np-infra-dev", "resources": ["a", "b"] });
        assert_eq!(
            format_json(&value),
            r#"{"name":"backend-np-infra-dev","resources":["a","b"]}"#
        );
    }

    #[test]
    fn test_format_json_pretty_is_indented() {
        let value = json!({ "name": "backend-np-infra-dev" });
        assert_eq!(
            format_json_pretty(&value),
            "{\n  \"name\": \"backend-np-infra-dev\"\n}"
        );
    }
}
