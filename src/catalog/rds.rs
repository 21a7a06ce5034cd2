//! RDS database template for PostgreSQL and SQL Server

use crate::profile::Profile;
use crate::template::{
    ConditionExpr, DeletionPolicy, Mapping, Output, Parameter, ParameterType, Resource, Template,
    TemplateError, Value,
};

/// Database engines and the engine version each maps to
fn engine_version_list() -> Mapping {
    Mapping::new()
        .with_row("postgres", [("Version", "9.5.4")])
        .with_row("sqlserver-ee", [("Version", "13.00.2164.0.v1")])
        .with_row("sqlserver-se", [("Version", "13.00.2164.0.v1")])
        .with_row("sqlserver-ex", [("Version", "13.00.2164.0.v1")])
        .with_row("sqlserver-web", [("Version", "13.00.2164.0.v1")])
}

fn engine_license_list() -> Mapping {
    Mapping::new()
        .with_row("postgres", [("License", "postgresql-license")])
        .with_row("sqlserver-ee", [("License", "license-included")])
        .with_row("sqlserver-se", [("License", "license-included")])
        .with_row("sqlserver-ex", [("License", "license-included")])
        .with_row("sqlserver-web", [("License", "license-included")])
}

/// RDS instance in its own subnet group, open to the VPC, restorable from an
/// existing snapshot.
///
/// When the `RestoreSnapshot` condition holds, the name, storage, engine and
/// credential properties collapse to `AWS::NoValue` and the snapshot supplies
/// them instead. The instance keeps a `Snapshot` deletion policy so tearing
/// the stack down never loses data.
pub fn rds(profile: &Profile) -> Result<Template, TemplateError> {
    let mut t = Template::new();

    t.set_version("2010-09-09");
    t.set_description("RDS template for PostgreSQL and SQL server");
    t.set_metadata(profile.stamp());

    t.add_mapping("engineVersionList", engine_version_list())?;
    t.add_mapping("engineLicenseList", engine_license_list())?;

    let subnets = t.add_parameter(
        "subnets",
        Parameter::new(ParameterType::SubnetIdList)
            .with_description("Subnets to use for the database"),
    )?;
    let vpc = t.add_parameter(
        "VPC",
        Parameter::new(ParameterType::VpcId).with_description("Environment VPC"),
    )?;

    let existing_db_snapshot = t.add_parameter(
        "existingDbSnapshot",
        Parameter::string()
            .with_description("Existing Db snapshot to restore, leave blank to create a new")
            .with_default(""),
    )?;
    let db_multi_az = t.add_parameter(
        "dbMultiAz",
        Parameter::string()
            .with_description(
                "Multi AZ True/False for automatic failover if one availability zone goes down",
            )
            .with_default("False"),
    )?;
    let db_name = t.add_parameter(
        "dbName",
        Parameter::string()
            .with_default("")
            .with_description("sqlserver-ex/web/se/ee = No name."),
    )?;
    let db_user = t.add_parameter(
        "dbUser",
        Parameter::string()
            .with_no_echo()
            .with_description("The database admin account username")
            .with_min_length("1")
            .with_max_length("16")
            .with_allowed_pattern("[a-zA-Z][a-zA-Z0-9]*")
            .with_constraint_description(
                "Must begin with a letter and contain only alphanumeric characters.",
            ),
    )?;
    let db_password = t.add_parameter(
        "dbPassword",
        Parameter::string()
            .with_no_echo()
            .with_description("The database admin account password")
            .with_min_length("0")
            .with_max_length("41")
            .with_allowed_pattern("[a-zA-Z0-9]*")
            .with_constraint_description(
                "Must contain only alphanumeric characters. If you are restoring a snapshot leave this blank.",
            ),
    )?;
    let db_class = t.add_parameter(
        "dbClass",
        Parameter::string()
            .with_default("db.t2.small")
            .with_description("T = Small; M = Memory; R = CPU")
            .with_allowed_values([
                "db.t2.small",
                "db.t2.micro",
                "db.t2.medium",
                "db.t2.large",
                "db.m4.large",
                "db.m4.xlarge",
                "db.m4.2xlarge",
                "db.m4.4xlarge",
                "db.m4.10xlarge",
                "db.r3.large",
                "db.r3.xlarge",
                "db.r3.2xlarge",
                "db.r3.4xlarge",
                "db.r3.8xlarge",
            ])
            .with_constraint_description("Must select a valid database instance type."),
    )?;
    let db_allocatedstorage = t.add_parameter(
        "dbAllocatedstorage",
        Parameter::number()
            .with_default("20")
            .with_description(
                "postgresql 5 < 6000 GB, sqlserver-ex/web 20 < 200 GB, sqlserver-se/ee 200 < 4000 GB",
            )
            .with_min_value("5"),
    )?;
    let db_engine = t.add_parameter(
        "dbEngine",
        Parameter::string()
            .with_default("postgres")
            .with_description("Which database type do you want to use?")
            .with_allowed_values([
                "postgres",
                "sqlserver-ex",
                "sqlserver-web",
                "sqlserver-se",
                "sqlserver-ee",
            ])
            .with_constraint_description("postgres, sqlserver-ex/web/se/ee"),
    )?;

    let db_subnetgroup = t.add_resource(
        "dbSubnetgroup",
        Resource::new("AWS::RDS::DBSubnetGroup")
            .with_property(
                "DBSubnetGroupDescription",
                "Subnets available for the RDS DB Instance",
            )
            .with_property("SubnetIds", subnets.reference()),
    )?;

    let vpc_securitygroup = t.add_resource(
        "vpcSecuritygroup",
        Resource::new("AWS::EC2::SecurityGroup")
            .with_property("GroupDescription", "Security group for RDS DB Instance.")
            .with_property("VpcId", vpc.reference())
            .with_property(
                "SecurityGroupIngress",
                // The whole VPC
                vec![Value::object([
                    ("IpProtocol", Value::from("tcp")),
                    ("FromPort", Value::from("0")),
                    ("ToPort", Value::from("65535")),
                    ("CidrIp", Value::from("10.0.0.0/16")),
                ])],
            ),
    )?;

    let restore_snapshot = t.add_condition(
        "RestoreSnapshot",
        ConditionExpr::not(ConditionExpr::equals(existing_db_snapshot.reference(), "")),
    )?;

    let db = t.add_resource(
        "db",
        Resource::new("AWS::RDS::DBInstance")
            .with_property(
                "DBName",
                Value::select_if(&restore_snapshot, Value::NoValue, db_name.reference()),
            )
            .with_property(
                "AllocatedStorage",
                Value::select_if(
                    &restore_snapshot,
                    Value::NoValue,
                    db_allocatedstorage.reference(),
                ),
            )
            .with_property(
                "DBSnapshotIdentifier",
                Value::select_if(
                    &restore_snapshot,
                    existing_db_snapshot.reference(),
                    Value::NoValue,
                ),
            )
            .with_property("DBInstanceClass", db_class.reference())
            .with_property(
                "Engine",
                Value::select_if(&restore_snapshot, Value::NoValue, db_engine.reference()),
            )
            .with_property(
                "EngineVersion",
                Value::find_in_map("engineVersionList", db_engine.reference(), "Version"),
            )
            .with_property(
                "MasterUsername",
                Value::select_if(&restore_snapshot, Value::NoValue, db_user.reference()),
            )
            .with_property(
                "MasterUserPassword",
                Value::select_if(&restore_snapshot, Value::NoValue, db_password.reference()),
            )
            .with_property("DBSubnetGroupName", db_subnetgroup.reference())
            .with_property("VPCSecurityGroups", vec![vpc_securitygroup.reference()])
            .with_property("MultiAZ", db_multi_az.reference())
            .with_property(
                "LicenseModel",
                Value::find_in_map("engineLicenseList", db_engine.reference(), "License"),
            ),
    )?;

    t.set_deletion_policy(&db, DeletionPolicy::Snapshot)?;

    t.add_output(
        "JDBCConnectionString",
        Output::new(Value::join(
            "",
            vec![
                db.get_att("Endpoint.Address"),
                Value::from(":"),
                db.get_att("Endpoint.Port"),
                Value::from("/"),
                db_name.reference(),
            ],
        ))
        .with_description("JDBC connection string for database")
        .with_export(Value::sub("${AWS::StackName}-RDS")),
    )?;

    Ok(t)
}
