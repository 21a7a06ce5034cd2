//! Private DNS hosted zone template

use crate::profile::Profile;
use crate::template::{Parameter, ParameterType, Pseudo, Resource, Template, TemplateError, Value};

/// Internal Route53 hosted zone attached to the environment VPC.
///
/// Carries no metadata stamp and no outputs; the zone is looked up by name,
/// not imported.
pub fn internal_dns(_profile: &Profile) -> Result<Template, TemplateError> {
    let mut t = Template::new();

    t.set_version("2010-09-09");
    t.set_description("Private DNS");

    let dns = t.add_parameter(
        "DNS",
        Parameter::string()
            .with_default("")
            .with_description("Define the environment for the hosted zone"),
    )?;
    let vpc = t.add_parameter(
        "VPC",
        Parameter::new(ParameterType::VpcId)
            .with_default("")
            .with_description("Environment VPC"),
    )?;

    t.add_resource(
        "HostedZone",
        Resource::new("AWS::Route53::HostedZone")
            .with_property(
                "HostedZoneConfig",
                Value::object([("Comment", Value::from("Internal hosted zone"))]),
            )
            .with_property("Name", dns.reference())
            .with_property(
                "VPCs",
                vec![Value::object([
                    ("VPCId", vpc.reference()),
                    ("VPCRegion", Pseudo::Region.into()),
                ])],
            ),
    )?;

    Ok(t)
}
