//! Property values and the expression forms they can take
//!
//! Values are a tagged union rather than free-form JSON: a symbolic reference
//! to another declaration is a different variant from the literal string that
//! happens to spell its name, and every intrinsic form serializes to the
//! fixed nested-object shape the provisioning engine expects. None of the
//! expressions are resolved here; the engine consuming the rendered template
//! does that.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Handle to a declaration registered in a template.
///
/// Returned by the `add_*` operations so later declarations can point at
/// earlier ones without spelling the logical name twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalId(String);

impl LogicalId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A `Ref` expression pointing at this declaration
    pub fn reference(&self) -> Value {
        Value::Ref(self.0.clone())
    }

    /// An `Fn::GetAtt` expression for an attribute of this declaration
    pub fn get_att(&self, attribute: impl Into<String>) -> Value {
        Value::GetAtt {
            target: self.0.clone(),
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&LogicalId> for String {
    fn from(id: &LogicalId) -> Self {
        id.0.clone()
    }
}

/// Pseudo parameters the engine predefines for every stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pseudo {
    Region,
    StackName,
    AccountId,
    NoValue,
}

impl Pseudo {
    pub fn name(&self) -> &'static str {
        match self {
            Pseudo::Region => "AWS::Region",
            Pseudo::StackName => "AWS::StackName",
            Pseudo::AccountId => "AWS::AccountId",
            Pseudo::NoValue => "AWS::NoValue",
        }
    }
}

impl From<Pseudo> for Value {
    fn from(pseudo: Pseudo) -> Self {
        Value::Ref(pseudo.name().to_string())
    }
}

/// A property value: a literal, or one of the symbolic expression forms
/// resolved downstream by the provisioning engine
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain JSON payload (string, number, bool, or a literal-only tree)
    Literal(serde_json::Value),
    /// List whose elements may themselves be expressions
    List(Vec<Value>),
    /// Nested object whose values may themselves be expressions, in insertion
    /// order
    Object(Vec<(String, Value)>),
    /// `{"Ref": name}` - symbolic pointer to a parameter or resource
    Ref(String),
    /// `{"Fn::GetAtt": [target, attribute]}` - attribute lookup on a resource
    GetAtt { target: String, attribute: String },
    /// `{"Fn::If": [condition, then, else]}` - conditional select
    If {
        condition: String,
        when_true: Box<Value>,
        when_false: Box<Value>,
    },
    /// `{"Fn::FindInMap": [map, top, second]}` - two-level table lookup
    FindInMap {
        map: String,
        top_key: Box<Value>,
        second_key: Box<Value>,
    },
    /// `{"Fn::Join": [separator, parts]}`
    Join { separator: String, parts: Vec<Value> },
    /// `{"Fn::Select": [index, list]}`
    Select { index: u32, list: Box<Value> },
    /// `{"Fn::Sub": text}` - `${...}` substitution in a string
    Sub(String),
    /// `{"Ref": "AWS::NoValue"}` - removes the property it appears under
    NoValue,
}

impl Value {
    pub fn reference(target: impl Into<String>) -> Self {
        Value::Ref(target.into())
    }

    pub fn get_att(target: impl Into<String>, attribute: impl Into<String>) -> Self {
        Value::GetAtt {
            target: target.into(),
            attribute: attribute.into(),
        }
    }

    /// Select between two values based on a named condition.
    ///
    /// Pass [`Value::NoValue`] as one branch to drop the enclosing property
    /// when the condition resolves that way downstream.
    pub fn select_if(
        condition: impl Into<String>,
        when_true: impl Into<Value>,
        when_false: impl Into<Value>,
    ) -> Self {
        Value::If {
            condition: condition.into(),
            when_true: Box::new(when_true.into()),
            when_false: Box::new(when_false.into()),
        }
    }

    pub fn find_in_map(
        map: impl Into<String>,
        top_key: impl Into<Value>,
        second_key: impl Into<Value>,
    ) -> Self {
        Value::FindInMap {
            map: map.into(),
            top_key: Box::new(top_key.into()),
            second_key: Box::new(second_key.into()),
        }
    }

    pub fn join(separator: impl Into<String>, parts: Vec<Value>) -> Self {
        Value::Join {
            separator: separator.into(),
            parts,
        }
    }

    pub fn select(index: u32, list: impl Into<Value>) -> Self {
        Value::Select {
            index,
            list: Box::new(list.into()),
        }
    }

    pub fn sub(text: impl Into<String>) -> Self {
        Value::Sub(text.into())
    }

    /// Build a nested object of named values, kept in the given order
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Literal(serde_json::Value::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Literal(serde_json::Value::String(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Literal(serde_json::Value::Bool(b))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Literal(serde_json::Value::from(n))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Literal(v)
    }
}

impl From<&LogicalId> for Value {
    fn from(id: &LogicalId) -> Self {
        id.reference()
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Serialize one `{"Fn::X": payload}` wrapper object
fn intrinsic<S, T>(serializer: S, tag: &'static str, payload: &T) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(tag, payload)?;
    map.end()
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Literal(v) => v.serialize(serializer),
            Value::List(items) => items.serialize(serializer),
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (name, value) in entries {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Value::Ref(target) => intrinsic(serializer, "Ref", target),
            Value::GetAtt { target, attribute } => {
                intrinsic(serializer, "Fn::GetAtt", &[target, attribute])
            }
            Value::If {
                condition,
                when_true,
                when_false,
            } => {
                let branches = (condition, when_true, when_false);
                intrinsic(serializer, "Fn::If", &branches)
            }
            Value::FindInMap {
                map,
                top_key,
                second_key,
            } => {
                let keys = (map, top_key, second_key);
                intrinsic(serializer, "Fn::FindInMap", &keys)
            }
            Value::Join { separator, parts } => {
                let args = (separator, parts);
                intrinsic(serializer, "Fn::Join", &args)
            }
            Value::Select { index, list } => {
                // The engine expects the index as a string, not a number
                let args = (index.to_string(), list);
                intrinsic(serializer, "Fn::Select", &args)
            }
            Value::Sub(text) => intrinsic(serializer, "Fn::Sub", text),
            Value::NoValue => intrinsic(serializer, "Ref", Pseudo::NoValue.name()),
        }
    }
}

/// A named boolean expression for the conditions section
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionExpr {
    /// `{"Fn::Equals": [a, b]}`
    Equals(Value, Value),
    /// `{"Fn::Not": [expr]}`
    Not(Box<ConditionExpr>),
    /// `{"Fn::And": [exprs...]}`
    And(Vec<ConditionExpr>),
    /// `{"Fn::Or": [exprs...]}`
    Or(Vec<ConditionExpr>),
}

impl ConditionExpr {
    pub fn equals(left: impl Into<Value>, right: impl Into<Value>) -> Self {
        ConditionExpr::Equals(left.into(), right.into())
    }

    pub fn not(expr: ConditionExpr) -> Self {
        ConditionExpr::Not(Box::new(expr))
    }
}

impl Serialize for ConditionExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConditionExpr::Equals(left, right) => {
                let pair = (left, right);
                intrinsic(serializer, "Fn::Equals", &pair)
            }
            ConditionExpr::Not(expr) => intrinsic(serializer, "Fn::Not", &[expr]),
            ConditionExpr::And(exprs) => intrinsic(serializer, "Fn::And", exprs),
            ConditionExpr::Or(exprs) => intrinsic(serializer, "Fn::Or", exprs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json(value: &Value) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn test_ref_is_distinct_from_literal() {
        let reference = Value::reference("Name");
        let literal = Value::from("Name");
        assert_eq!(to_json(&reference), json!({"Ref": "Name"}));
        assert_eq!(to_json(&literal), json!("Name"));
        assert_ne!(to_json(&reference), to_json(&literal));
    }

    #[test]
    fn test_get_att_shape() {
        let value = Value::get_att("db", "Endpoint.Address");
        assert_eq!(to_json(&value), json!({"Fn::GetAtt": ["db", "Endpoint.Address"]}));
    }

    #[test]
    fn test_select_if_with_no_value_branch() {
        let value = Value::select_if("RestoreSnapshot", Value::NoValue, Value::reference("dbName"));
        assert_eq!(
            to_json(&value),
            json!({"Fn::If": ["RestoreSnapshot", {"Ref": "AWS::NoValue"}, {"Ref": "dbName"}]})
        );
    }

    #[test]
    fn test_find_in_map_with_ref_key() {
        let value = Value::find_in_map("engineVersionList", Value::reference("dbEngine"), "Version");
        assert_eq!(
            to_json(&value),
            json!({"Fn::FindInMap": ["engineVersionList", {"Ref": "dbEngine"}, "Version"]})
        );
    }

    #[test]
    fn test_join_and_select() {
        let join = Value::join(":", vec![Value::get_att("cache", "Endpoint.Port"), Value::from("x")]);
        assert_eq!(
            to_json(&join),
            json!({"Fn::Join": [":", [{"Fn::GetAtt": ["cache", "Endpoint.Port"]}, "x"]]})
        );

        let select = Value::select(0, Value::reference("securityGroup"));
        assert_eq!(
            to_json(&select),
            json!({"Fn::Select": ["0", {"Ref": "securityGroup"}]})
        );
    }

    #[test]
    fn test_sub_and_pseudo() {
        let value = Value::sub("${AWS::StackName}-URI");
        assert_eq!(to_json(&value), json!({"Fn::Sub": "${AWS::StackName}-URI"}));

        let region: Value = Pseudo::Region.into();
        assert_eq!(to_json(&region), json!({"Ref": "AWS::Region"}));
    }

    #[test]
    fn test_object_keeps_expressions_and_order() {
        let rule = Value::object([
            ("ToPort", Value::from("65535")),
            ("IpProtocol", Value::from("tcp")),
            ("SourceSecurityGroupId", Value::select(0, Value::reference("securityGroup"))),
            ("FromPort", Value::from("0")),
        ]);
        assert_eq!(
            serde_json::to_string(&rule).unwrap(),
            r#"{"ToPort":"65535","IpProtocol":"tcp","SourceSecurityGroupId":{"Fn::Select":["0",{"Ref":"securityGroup"}]},"FromPort":"0"}"#
        );
    }

    #[test]
    fn test_condition_not_equals() {
        let expr = ConditionExpr::not(ConditionExpr::equals(
            Value::reference("existingDbSnapshot"),
            "",
        ));
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({"Fn::Not": [{"Fn::Equals": [{"Ref": "existingDbSnapshot"}, ""]}]})
        );
    }

    #[test]
    fn test_logical_id_handles() {
        let id = LogicalId::new("cacheCluster");
        assert_eq!(to_json(&id.reference()), json!({"Ref": "cacheCluster"}));
        assert_eq!(
            to_json(&id.get_att("ConfigurationEndpoint.Address")),
            json!({"Fn::GetAtt": ["cacheCluster", "ConfigurationEndpoint.Address"]})
        );
    }
}
