//! Elasticache memcached cluster template

use serde_json::json;

use crate::profile::Profile;
use crate::template::{Output, Parameter, ParameterType, Resource, Template, TemplateError, Value};

/// Memcached cluster in private subnets, reachable from selected security
/// groups, with a dedicated subnet group and parameter group.
pub fn memcache(profile: &Profile) -> Result<Template, TemplateError> {
    let mut t = Template::new();

    t.set_version("2010-09-09");
    t.set_description("Elasticache memcached template");

    // Revision stamp plus the console's parameter grouping hints, in one bag
    let mut metadata = profile.stamp();
    metadata["AWS::CloudFormation::Interface"] = json!({
        "ParameterGroups": [
            {
                "Label": {"default": "VPC"},
                "Parameters": ["VPC", "securityGroup"],
            },
            {
                "Label": {"default": "Elasticache"},
                "Parameters": [
                    "cacheSubnets",
                    "numberOfCacheNodes",
                    "cacheNodeType",
                    "cacheSecurityGroup",
                    "cacheSubnetGroup",
                    "cacheCluster",
                    "cacheParameters",
                ],
            },
        ]
    });
    t.set_metadata(metadata);

    let vpc = t.add_parameter(
        "VPC",
        Parameter::new(ParameterType::VpcId).with_description("Environment VPC"),
    )?;
    let security_group = t.add_parameter(
        "securityGroup",
        Parameter::new(ParameterType::SecurityGroupIdList)
            .with_description("Which security groups to use"),
    )?;
    let cache_subnets = t.add_parameter(
        "cacheSubnets",
        Parameter::new(ParameterType::SubnetIdList)
            .with_description("Private subnets for the elasticache."),
    )?;
    let number_of_cache_nodes = t.add_parameter(
        "numberOfCacheNodes",
        Parameter::number()
            .with_description("The number of Cache Nodes the Cache Cluster should have")
            .with_default("1")
            .with_min_value("1")
            .with_max_value("10")
            .with_constraint_description("Must be between 1 and 10."),
    )?;
    let cache_node_type = t.add_parameter(
        "cacheNodeType",
        Parameter::string()
            .with_default("cache.t2.micro")
            .with_description("T = Small, M = General, C = CPU, R = Memory")
            .with_allowed_values([
                "cache.t2.micro",
                "cache.t2.small",
                "cache.t2.medium",
                "cache.m4.large",
                "cache.m4.xlarge",
                "cache.m4.2xlarge",
                "cache.m4.4xlarge",
                "cache.m4.10xlarge",
                "cache.c1.xlarge",
                "cache.r3.large",
                "cache.r3.xlarge",
                "cache.r3.2xlarge",
                "cache.r3.4xlarge",
                "cache.r3.8xlarge",
            ])
            .with_constraint_description("Must select a valid Cache Node type."),
    )?;

    let cache_security_group = t.add_resource(
        "cacheSecurityGroup",
        Resource::new("AWS::EC2::SecurityGroup")
            .with_property(
                "SecurityGroupIngress",
                vec![Value::object([
                    ("ToPort", Value::from("65535")),
                    ("IpProtocol", Value::from("tcp")),
                    (
                        "SourceSecurityGroupId",
                        Value::select(0, security_group.reference()),
                    ),
                    ("FromPort", Value::from("0")),
                ])],
            )
            .with_property("VpcId", vpc.reference())
            .with_property(
                "GroupDescription",
                "Allow access to the cache from selected security groups",
            ),
    )?;

    let cache_subnet_group = t.add_resource(
        "cacheSubnetGroup",
        Resource::new("AWS::ElastiCache::SubnetGroup")
            .with_property("SubnetIds", cache_subnets.reference())
            .with_property("Description", "Subnets available for the ElastiCache Cluster"),
    )?;

    // The memcached engine takes its own "Properties" bag of engine settings
    let cache_parameters = t.add_resource(
        "cacheParameters",
        Resource::new("AWS::ElastiCache::ParameterGroup")
            .with_property("Properties", json!({"cas_disabled": "1"}))
            .with_property("CacheParameterGroupFamily", "memcached1.4")
            .with_property("Description", "Elasticache memcached parameter group"),
    )?;

    let cache_cluster = t.add_resource(
        "cacheCluster",
        Resource::new("AWS::ElastiCache::CacheCluster")
            .with_property("Engine", "memcached")
            .with_property("NumCacheNodes", number_of_cache_nodes.reference())
            .with_property("CacheNodeType", cache_node_type.reference())
            .with_property("VpcSecurityGroupIds", vec![cache_security_group.reference()])
            .with_property("CacheSubnetGroupName", cache_subnet_group.reference())
            .with_property("CacheParameterGroupName", cache_parameters.reference()),
    )?;

    t.add_output(
        "URL",
        Output::new(Value::join(
            ":",
            vec![
                cache_cluster.get_att("ConfigurationEndpoint.Address"),
                cache_cluster.get_att("ConfigurationEndpoint.Port"),
            ],
        ))
        .with_description("Elasticache URI")
        .with_export(Value::sub("${AWS::StackName}-URI")),
    )?;

    Ok(t)
}
