//! Nested addition and rename templates.
//!
//! A [`Template`] is an ordered list of `key -> value` entries where every
//! value is one of three shapes:
//!
//! - [`TemplateValue::Scalar`] — becomes a leaf element named `key`
//! - [`TemplateValue::Object`] — a sub-template for the `key` container
//! - [`TemplateValue::List`] — repeated `key` containers, one per element
//!
//! Entries keep insertion order and keys may repeat.

use serde_json::Value;

use cfgup_tree::NodePath;

use crate::error::{PlanError, PlanResult};

/// A single template value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateValue {
    /// Scalar text.
    Scalar(String),
    /// Nested sub-template.
    Object(Template),
    /// Ordered repeated sub-templates. Every element must be an `Object`.
    List(Vec<TemplateValue>),
}

impl TemplateValue {
    /// Short name of the shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::List(_) => "list",
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Template> for TemplateValue {
    fn from(value: Template) -> Self {
        Self::Object(value)
    }
}

/// Ordered nested `key -> value` structure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template {
    entries: Vec<(String, TemplateValue)>,
}

impl Template {
    /// Create an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, builder style.
    ///
    /// ```
    /// use cfgup_plan::Template;
    ///
    /// let template = Template::new()
    ///     .with("AddedNumber", "3")
    ///     .with("ExampleStructure", Template::new().with("DeepSettingTwo", "Two"));
    /// assert_eq!(template.len(), 2);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Append a list entry whose elements are sub-templates.
    pub fn with_list(mut self, key: impl Into<String>, items: Vec<Template>) -> Self {
        self.entries.push((
            key.into(),
            TemplateValue::List(items.into_iter().map(TemplateValue::Object).collect()),
        ));
        self
    }

    /// Append an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TemplateValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TemplateValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every key is an element name and every list holds only
    /// sub-templates.
    pub fn validate(&self) -> PlanResult<()> {
        self.validate_at("")
    }

    fn validate_at(&self, at: &str) -> PlanResult<()> {
        for (key, value) in &self.entries {
            let location = format!("{at}/{key}");
            validate_key(key, &location)?;
            match value {
                TemplateValue::Scalar(_) => {}
                TemplateValue::Object(inner) => inner.validate_at(&location)?,
                TemplateValue::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let item_location = format!("{location}[{index}]");
                        match item {
                            TemplateValue::Object(inner) => inner.validate_at(&item_location)?,
                            other => {
                                return Err(PlanError::malformed(
                                    item_location,
                                    format!("list elements must be objects, found {}", other.kind()),
                                ))
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Convert a JSON object into a template.
    ///
    /// Strings, numbers and booleans become scalars, objects become
    /// sub-templates and arrays become lists. `null` and arrays holding
    /// anything but objects are rejected.
    pub fn from_json(value: &Value) -> PlanResult<Self> {
        match value {
            Value::Object(_) => Self::from_json_object(value, ""),
            other => Err(PlanError::malformed(
                "/",
                format!("template root must be an object, found {}", json_kind(other)),
            )),
        }
    }

    fn from_json_object(value: &Value, at: &str) -> PlanResult<Self> {
        let mut template = Template::new();
        if let Value::Object(map) = value {
            for (key, value) in map {
                let location = format!("{at}/{key}");
                template.insert(key.clone(), json_to_value(value, &location)?);
            }
        }
        Ok(template)
    }
}

impl TryFrom<Value> for Template {
    type Error = PlanError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

fn json_to_value(value: &Value, at: &str) -> PlanResult<TemplateValue> {
    match value {
        Value::String(s) => Ok(TemplateValue::Scalar(s.clone())),
        Value::Number(n) => Ok(TemplateValue::Scalar(n.to_string())),
        Value::Bool(b) => Ok(TemplateValue::Scalar(b.to_string())),
        Value::Object(_) => Ok(TemplateValue::Object(Template::from_json_object(value, at)?)),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let location = format!("{at}[{index}]");
                match item {
                    Value::Object(_) => Ok(TemplateValue::Object(Template::from_json_object(
                        item, &location,
                    )?)),
                    other => Err(PlanError::malformed(
                        location,
                        format!("list elements must be objects, found {}", json_kind(other)),
                    )),
                }
            })
            .collect::<PlanResult<Vec<_>>>()
            .map(TemplateValue::List),
        Value::Null => Err(PlanError::malformed(at, "null is not a template value")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A template key must be usable as a single path segment.
fn validate_key(key: &str, location: &str) -> PlanResult<()> {
    if key.contains('/') {
        return Err(PlanError::malformed(location, "keys must not contain '/'"));
    }
    NodePath::from_segments([key])
        .map(|_| ())
        .map_err(|e| PlanError::malformed(location, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_keeps_insertion_order_and_duplicates() {
        let template = Template::new().with("b", "1").with("a", "2").with("b", "3");
        let keys: Vec<&str> = template.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a", "b"]);
        assert_eq!(template.get("b"), Some(&TemplateValue::from("1")));
    }

    #[test]
    fn validate_accepts_all_three_shapes() {
        let template = Template::new()
            .with("Scalar", "x")
            .with("Nested", Template::new().with("Inner", "y"))
            .with_list(
                "Items",
                vec![Template::new().with("Id", "1"), Template::new().with("Id", "2")],
            );
        assert!(template.validate().is_ok());
    }

    #[test]
    fn validate_rejects_scalar_list_element() {
        let template = Template::new().with(
            "Outer",
            Template::new().with("Items", TemplateValue::List(vec!["loose".into()])),
        );
        let err = template.validate().unwrap_err();
        assert!(matches!(
            err,
            PlanError::MalformedTemplate { ref key, .. } if key == "/Outer/Items[0]"
        ));
    }

    #[test]
    fn validate_rejects_bad_keys() {
        assert!(Template::new().with("", "x").validate().is_err());
        assert!(Template::new().with("a/b", "x").validate().is_err());
        assert!(Template::new().with("has space", "x").validate().is_err());
    }

    #[test]
    fn from_json_maps_shapes() {
        let template = Template::from_json(&json!({
            "AddedNumber": 3,
            "Enabled": true,
            "Name": "svc",
            "Structure": { "DeepSettingTwo": "Two" },
            "Items": [ { "Id": "1" }, { "Id": "2" } ]
        }))
        .unwrap();

        assert_eq!(template.get("AddedNumber"), Some(&TemplateValue::from("3")));
        assert_eq!(template.get("Enabled"), Some(&TemplateValue::from("true")));
        assert!(matches!(template.get("Structure"), Some(TemplateValue::Object(_))));
        match template.get("Items") {
            Some(TemplateValue::List(items)) => assert_eq!(items.len(), 2),
            other => panic!("expected list, got {other:?}"),
        }
        assert!(template.validate().is_ok());
    }

    #[test]
    fn from_json_preserves_document_order() {
        let template = Template::from_json(&json!({ "z": "1", "a": "2", "m": "3" })).unwrap();
        let keys: Vec<&str> = template.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn from_json_rejects_null_and_scalar_arrays() {
        assert!(matches!(
            Template::from_json(&json!({ "a": null })),
            Err(PlanError::MalformedTemplate { .. })
        ));
        assert!(matches!(
            Template::from_json(&json!({ "a": [1, 2] })),
            Err(PlanError::MalformedTemplate { ref key, .. }) if key == "/a[0]"
        ));
        assert!(Template::from_json(&json!(["not", "an", "object"])).is_err());
    }
}
