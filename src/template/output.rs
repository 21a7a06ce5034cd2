//! Output declarations and static mapping tables

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::section::Section;
use super::value::Value;

/// A named value the rendered stack exposes, optionally exported for other
/// stacks to import by name
#[derive(Debug, Clone)]
pub struct Output {
    value: Value,
    description: Option<String>,
    export_name: Option<Value>,
}

impl Output {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            description: None,
            export_name: None,
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Export under a name visible across stacks. The name is itself a value
    /// expression, typically an `Fn::Sub` over the stack name.
    pub fn with_export(mut self, name: impl Into<Value>) -> Self {
        self.export_name = Some(name.into());
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(description) = &self.description {
            map.serialize_entry("Description", description)?;
        }
        map.serialize_entry("Value", &self.value)?;
        if let Some(name) = &self.export_name {
            let mut export = std::collections::HashMap::with_capacity(1);
            export.insert("Name", name);
            map.serialize_entry("Export", &export)?;
        }
        map.end()
    }
}

/// A static two-level lookup table: top key, then second key, to a string.
///
/// Looked up symbolically at provision time via [`Value::find_in_map`]; the
/// assembler never indexes into it.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    rows: Section<Section<String>>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one top-level row. Later rows with a duplicate key are ignored,
    /// matching section semantics; the catalog data never hits that case.
    pub fn with_row<I, K, V>(mut self, key: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Section::new();
        for (name, value) in cells {
            row.insert(name.into(), value.into());
        }
        self.rows.insert(key, row);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_with_export() {
        let output = Output::new(Value::join(
            ":",
            vec![
                Value::get_att("cacheCluster", "ConfigurationEndpoint.Address"),
                Value::get_att("cacheCluster", "ConfigurationEndpoint.Port"),
            ],
        ))
        .with_description("Elasticache URI")
        .with_export(Value::sub("${AWS::StackName}-URI"));

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "Description": "Elasticache URI",
                "Value": {"Fn::Join": [":", [
                    {"Fn::GetAtt": ["cacheCluster", "ConfigurationEndpoint.Address"]},
                    {"Fn::GetAtt": ["cacheCluster", "ConfigurationEndpoint.Port"]},
                ]]},
                "Export": {"Name": {"Fn::Sub": "${AWS::StackName}-URI"}},
            })
        );
    }

    #[test]
    fn test_plain_output_has_no_export() {
        let output = Output::new(Value::reference("Name"));
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"Value": {"Ref": "Name"}})
        );
    }

    #[test]
    fn test_mapping_rows_keep_order() {
        let mapping = Mapping::new()
            .with_row("postgres", [("Version", "9.5.4")])
            .with_row("sqlserver-ee", [("Version", "13.00.2164.0.v1")]);
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(
            json,
            r#"{"postgres":{"Version":"9.5.4"},"sqlserver-ee":{"Version":"13.00.2164.0.v1"}}"#
        );
    }
}
