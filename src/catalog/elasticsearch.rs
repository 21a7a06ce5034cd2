//! Elasticsearch domain template

use serde_json::json;

use crate::profile::Profile;
use crate::template::{
    ConditionExpr, Output, Parameter, Resource, Template, TemplateError, Value,
};

/// Zone-aware Elasticsearch domain with dedicated masters and optional EBS
/// data volumes, toggled by the `EbsTrue` condition.
pub fn elasticsearch(profile: &Profile) -> Result<Template, TemplateError> {
    let mut t = Template::new();

    t.set_version("2010-09-09");
    t.set_description("Elasticsearch template");
    t.set_metadata(profile.stamp());

    let domain_name = t.add_parameter(
        "elasticsearchDomainName",
        Parameter::string()
            .with_description("What is your Elasticsearch domain called?")
            .with_allowed_pattern("[a-z][a-z0-9\\-]+"),
    )?;
    let dedicated_master_instances = t.add_parameter(
        "elasticsearchDedicatedMasterInstances",
        Parameter::number()
            .with_default("2")
            .with_description("Number of Elasticsearch Dedicated Master instances. (Must be > 2)"),
    )?;
    let instances = t.add_parameter(
        "elastisearchInstances",
        Parameter::number()
            .with_default("4")
            .with_description("Even number of Elastisearch instances")
            .with_constraint_description("Even positive numbers only"),
    )?;
    let instance_type = t.add_parameter(
        "elasticsearchInstanceType",
        Parameter::string()
            .with_default("t2.micro.elasticsearch")
            .with_description("Which Elasticsearch instance type do you want to use?")
            .with_allowed_values([
                "t2.micro.elasticsearch",
                "t2.small.elasticsearch",
                "t2.medium.elasticsearch",
                "m3.medium.elasticsearch",
                "m3.large.elasticsearch",
                "m3.xlarge.elasticsearch",
                "m3.2xlarge.elasticsearch",
                "r3.large.elasticsearch",
                "r3.xlarge.elasticsearch",
                "r3.2xlarge.elasticsearch",
                "r3.4xlarge.elasticsearch",
                "r3.8xlarge.elasticsearch",
                "i2.xlarge.elasticsearch",
                "i2.2xlarge.elasticsearch",
            ])
            .with_constraint_description(
                "http://docs.aws.amazon.com/elasticsearch-service/latest/developerguide/es-createupdatedomains.html#es-createdomains-configure-cluster-cli",
            ),
    )?;

    let use_ebs_volume = t.add_parameter(
        "useEbsVolume",
        Parameter::string()
            .with_description("Use EBS volumes with Elasticsearch data instances (True/False)")
            .with_default("True")
            .with_allowed_values(["True", "False"])
            .with_constraint_description("True or False"),
    )?;
    let ebs_true = t.add_condition(
        "EbsTrue",
        ConditionExpr::equals(use_ebs_volume.reference(), "True"),
    )?;

    let ebs_volumesize = t.add_parameter(
        "elasticsearchEbsVolumesize",
        Parameter::number()
            .with_default("20")
            .with_description("How large EBS volume should each data-node have? (GB)"),
    )?;
    let snapshot_time = t.add_parameter(
        "elasticsearchSnapshotTime",
        Parameter::number().with_default("0").with_description(
            "When should automatic snapshots be taken of the Elasticsearch domain? (0-23)",
        ),
    )?;
    let version = t.add_parameter(
        "elasticsearchVersion",
        Parameter::string()
            .with_default("2.3")
            .with_allowed_values(["1.5", "2.3"])
            .with_description("AWS Elasticsearch version"),
    )?;

    let domain = t.add_resource(
        "ElasticsearchDomain",
        Resource::new("AWS::Elasticsearch::Domain")
            .with_property("DomainName", domain_name.reference())
            .with_property("ElasticsearchVersion", version.reference())
            .with_property(
                "ElasticsearchClusterConfig",
                Value::object([
                    ("DedicatedMasterEnabled", Value::from(true)),
                    ("InstanceCount", instances.reference()),
                    ("ZoneAwarenessEnabled", Value::from(true)),
                    ("InstanceType", instance_type.reference()),
                    ("DedicatedMasterType", instance_type.reference()),
                    ("DedicatedMasterCount", dedicated_master_instances.reference()),
                ]),
            )
            .with_property(
                "EBSOptions",
                Value::object([
                    (
                        "EBSEnabled",
                        Value::select_if(&ebs_true, use_ebs_volume.reference(), Value::NoValue),
                    ),
                    (
                        "VolumeSize",
                        Value::select_if(&ebs_true, ebs_volumesize.reference(), Value::NoValue),
                    ),
                ]),
            )
            .with_property(
                "SnapshotOptions",
                Value::object([("AutomatedSnapshotStartHour", snapshot_time.reference())]),
            )
            .with_property(
                "AccessPolicies",
                json!({
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Effect": "Allow",
                        "Principal": {"AWS": "*"},
                        "Action": "es:*",
                        "Resource": "*",
                    }],
                }),
            )
            .with_property(
                "AdvancedOptions",
                json!({"rest.action.multi.allow_explicit_index": "true"}),
            ),
    )?;

    t.add_output(
        "URL",
        Output::new(Value::join(":", vec![domain.get_att("DomainEndpoint")]))
            .with_description("Elasticsearch URI")
            .with_export(Value::sub("${AWS::StackName}-URI")),
    )?;

    Ok(t)
}
