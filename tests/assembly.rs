//! End-to-end assembly tests through the public API
//!
//! These exercise the documented contract of the assembler: declarations in,
//! deterministic ordered JSON out, duplicates rejected, references kept
//! symbolic.

use pretty_assertions::assert_eq;
use serde_json::json;

use cfn_forge::{
    ConditionExpr, Output, Parameter, Resource, Template, TemplateError, Value,
};

fn parse(template: &Template) -> serde_json::Value {
    serde_json::from_str(&template.to_json().expect("render should succeed"))
        .expect("rendered template should be valid JSON")
}

#[test]
fn test_single_parameter_and_output() {
    let mut t = Template::new();
    let name = t
        .add_parameter("Name", Parameter::string().with_default("abc"))
        .unwrap();
    t.add_output("NameOut", Output::new(name.reference())).unwrap();

    let doc = parse(&t);
    let parameters = doc["Parameters"].as_object().unwrap();
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters["Name"], json!({"Type": "String", "Default": "abc"}));

    let outputs = doc["Outputs"].as_object().unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs["NameOut"]["Value"], json!({"Ref": "Name"}));
}

#[test]
fn test_every_declaration_reachable_by_name() {
    let mut t = Template::new();
    let names = ["alpha", "beta", "gamma", "delta"];
    for name in names {
        t.add_parameter(name, Parameter::string()).unwrap();
    }
    let doc = parse(&t);
    let parameters = doc["Parameters"].as_object().unwrap();
    assert_eq!(parameters.len(), names.len());
    for name in names {
        assert!(parameters.contains_key(name), "missing parameter {}", name);
    }
}

#[test]
fn test_duplicate_names_fail_regardless_of_kind() {
    let mut t = Template::new();
    t.add_resource("dup", Resource::new("AWS::EC2::SecurityGroup"))
        .unwrap();
    // Same section, different resource kind: still rejected
    let err = t
        .add_resource("dup", Resource::new("AWS::RDS::DBInstance"))
        .unwrap_err();
    match err {
        TemplateError::DuplicateName { name, .. } => assert_eq!(name, "dup"),
        other => panic!("expected DuplicateName, got {:?}", other),
    }
}

#[test]
fn test_duplicate_error_names_the_offender() {
    let mut t = Template::new();
    t.add_condition("EbsTrue", ConditionExpr::equals(Value::reference("x"), "True"))
        .unwrap();
    let err = t
        .add_condition("EbsTrue", ConditionExpr::equals(Value::reference("y"), "False"))
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("EbsTrue"), "message was: {}", message);
    assert!(message.contains("Conditions"), "message was: {}", message);
}

#[test]
fn test_render_is_byte_deterministic() {
    fn build() -> Template {
        let mut t = Template::new();
        t.set_version("2010-09-09");
        t.set_description("Determinism check");
        let subnet = t
            .add_parameter("subnet", Parameter::string())
            .unwrap();
        let group = t
            .add_resource(
                "group",
                Resource::new("AWS::EC2::SecurityGroup")
                    .with_property("VpcId", subnet.reference()),
            )
            .unwrap();
        t.add_output("groupId", Output::new(group.reference()))
            .unwrap();
        t
    }

    let first = build().to_json().unwrap();
    let second = build().to_json().unwrap();
    assert_eq!(first, second);

    // Repeated renders of the same unmutated template are also identical
    let t = build();
    assert_eq!(t.to_json().unwrap(), t.to_json().unwrap());
}

#[test]
fn test_sections_render_in_fixed_order() {
    let mut t = Template::new();
    // Declare in scrambled order; the render order must not follow it
    t.add_output("out", Output::new(Value::from("x"))).unwrap();
    t.add_resource("res", Resource::new("AWS::Route53::HostedZone"))
        .unwrap();
    t.add_parameter("param", Parameter::string()).unwrap();
    t.set_description("Ordering check");
    t.set_version("2010-09-09");

    let json = t.to_json().unwrap();
    let positions: Vec<usize> = [
        "\"AWSTemplateFormatVersion\"",
        "\"Description\"",
        "\"Parameters\"",
        "\"Resources\"",
        "\"Outputs\"",
    ]
    .iter()
    .map(|key| json.find(key).unwrap_or_else(|| panic!("{} missing", key)))
    .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "sections out of order in:\n{}", json);
}

#[test]
fn test_entries_render_in_insertion_order() {
    let mut t = Template::new();
    t.add_parameter("zebra", Parameter::string()).unwrap();
    t.add_parameter("apple", Parameter::string()).unwrap();
    let json = t.to_json().unwrap();
    assert!(json.find("zebra").unwrap() < json.find("apple").unwrap());
}

#[test]
fn test_reference_never_collides_with_literal() {
    let mut t = Template::new();
    let target = t.add_parameter("X", Parameter::string()).unwrap();
    t.add_output("AsRef", Output::new(target.reference())).unwrap();
    t.add_output("AsLiteral", Output::new(Value::from("X"))).unwrap();

    let doc = parse(&t);
    assert_eq!(doc["Outputs"]["AsRef"]["Value"], json!({"Ref": "X"}));
    assert_eq!(doc["Outputs"]["AsLiteral"]["Value"], json!("X"));
}

#[test]
fn test_omitting_branch_uses_no_value_shape() {
    let mut t = Template::new();
    t.add_resource(
        "db",
        Resource::new("AWS::RDS::DBInstance").with_property(
            "DBName",
            Value::select_if("RestoreSnapshot", Value::NoValue, Value::reference("dbName")),
        ),
    )
    .unwrap();

    let doc = parse(&t);
    assert_eq!(
        doc["Resources"]["db"]["Properties"]["DBName"],
        json!({"Fn::If": ["RestoreSnapshot", {"Ref": "AWS::NoValue"}, {"Ref": "dbName"}]})
    );
}

#[test]
fn test_unresolved_references_are_not_rejected() {
    // Reference validity is the provisioning engine's concern; the assembler
    // passes dangling names through untouched.
    let mut t = Template::new();
    t.add_output("Dangling", Output::new(Value::get_att("ghost", "Arn")))
        .unwrap();
    let doc = parse(&t);
    assert_eq!(
        doc["Outputs"]["Dangling"]["Value"],
        json!({"Fn::GetAtt": ["ghost", "Arn"]})
    );
}
