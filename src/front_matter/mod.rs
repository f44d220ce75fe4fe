//! Front matter parsing and YAML to Liquid conversion

mod parser;
mod types;

pub use parser::parse;
pub use types::FrontMatter;

use liquid::model::Value;

/// Convert a YAML value to a Liquid value
pub fn yaml_to_liquid(yaml: &serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Nil,
        serde_yaml::Value::Bool(b) => Value::scalar(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::scalar(i)
            } else if let Some(f) = n.as_f64() {
                Value::scalar(f)
            } else {
                Value::scalar(n.to_string())
            }
        }
        serde_yaml::Value::String(s) => Value::scalar(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.iter().map(yaml_to_liquid).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut obj = liquid::Object::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(key) => key.clone(),
                    other => format!("{:?}", other),
                };
                obj.insert(key.into(), yaml_to_liquid(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_liquid(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquid::ValueView;

    #[test]
    fn test_yaml_to_liquid_nested() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("a: [1, two]\nb: {c: true}").unwrap();
        let obj = match yaml_to_liquid(&yaml) {
            Value::Object(obj) => obj,
            other => panic!("expected object, got {:?}", other),
        };

        match obj.get("a") {
            Some(Value::Array(items)) => assert_eq!(items.len(), 2),
            other => panic!("expected array, got {:?}", other),
        }
        match obj.get("b") {
            Some(Value::Object(b)) => assert_eq!(b.get("c").unwrap().to_kstr().as_str(), "true"),
            other => panic!("expected object, got {:?}", other),
        }
    }
}
