//! Shapes shared by several endpoints.

use serde::{Deserialize, Serialize};

/// A field the server accepts as either one string or a list of strings
/// (prompts, stop sequences, embedding input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Single(String),
    List(Vec<String>),
}

impl Default for StringOrList {
    fn default() -> Self {
        StringOrList::Single(String::new())
    }
}

impl From<&str> for StringOrList {
    fn from(value: &str) -> Self {
        StringOrList::Single(value.to_string())
    }
}

impl From<String> for StringOrList {
    fn from(value: String) -> Self {
        StringOrList::Single(value)
    }
}

impl From<Vec<String>> for StringOrList {
    fn from(values: Vec<String>) -> Self {
        StringOrList::List(values)
    }
}

impl From<Vec<&str>> for StringOrList {
    fn from(values: Vec<&str>) -> Self {
        StringOrList::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Token accounting for a generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_or_list_serializes_untagged() {
        let single: StringOrList = "hello".into();
        assert_eq!(serde_json::to_string(&single).unwrap(), r#""hello""#);

        let list: StringOrList = vec!["a", "b"].into();
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_string_or_list_deserializes_both_forms() {
        let single: StringOrList = serde_json::from_str(r#""x""#).unwrap();
        assert_eq!(single, StringOrList::Single("x".to_string()));
        let list: StringOrList = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(list, StringOrList::List(vec!["x".to_string(), "y".to_string()]));
    }
}
