use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Front matter of a post, page or layout
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrontMatter {
    /// Document title
    pub title: Option<String>,

    /// Layout to wrap the document in
    pub layout: Option<String>,

    /// Explicit post id, overriding the date/slug derived one
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub id: Option<String>,

    /// URL slug, overriding the one taken from the filename
    pub slug: Option<String>,

    /// Output path, overriding the date/slug derived one
    pub permalink: Option<String>,

    /// Publication date, overriding the one in the filename
    pub date: Option<String>,

    /// Tags, as a list or a space separated string
    #[serde(default, deserialize_with = "deserialize_words")]
    pub tags: Vec<String>,

    /// Categories, as a list or a space separated string
    #[serde(default, deserialize_with = "deserialize_words")]
    pub categories: Vec<String>,

    /// Everything else
    #[serde(flatten)]
    pub custom: HashMap<String, serde_yaml::Value>,
}

// Ids are often written as bare numbers (`id: 42`)
fn deserialize_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

// Accepts either a single string of space separated words or a sequence of strings
fn deserialize_words<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Words;

    impl<'de> serde::de::Visitor<'de> for Words {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("string or sequence of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.split_whitespace().map(str::to_string).collect())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            let mut values = Vec::new();
            while let Some(value) = seq.next_element::<serde_yaml::Value>()? {
                match value {
                    serde_yaml::Value::String(s) => values.push(s),
                    serde_yaml::Value::Number(n) => values.push(n.to_string()),
                    _ => {}
                }
            }
            Ok(values)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(Words)
}
