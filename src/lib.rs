//! cfn-forge - typed assembly of CloudFormation templates
//!
//! This library builds infrastructure templates from typed declarations and
//! renders them to the JSON document the provisioning engine consumes. A
//! built-in catalog covers the templates the team actually runs: a memcached
//! cluster, an Elasticsearch domain, a private DNS zone, and an RDS database.
//!
//! # Example
//!
//! ```rust
//! use cfn_forge::render;
//!
//! let json = render("internal-dns").unwrap();
//! assert!(json.contains("AWS::Route53::HostedZone"));
//! ```

pub mod catalog;
pub mod profile;
pub mod template;

pub use profile::{Profile, ProfileError};
pub use template::{
    ConditionExpr, DeletionPolicy, LogicalId, Mapping, Output, Parameter, ParameterType, Pseudo,
    Resource, Template, TemplateError, Value,
};

use thiserror::Error;

/// Errors that can occur when rendering a catalog template
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The requested name is not in the catalog
    #[error("unknown template: {name} (run --list for available templates)")]
    UnknownTemplate { name: String },

    /// Error while assembling or serializing the template
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Render a catalog template to JSON with the default metadata profile
///
/// This is the main entry point for the library: look the name up in the
/// catalog, assemble a fresh template, and serialize it.
pub fn render(name: &str) -> Result<String, ForgeError> {
    render_with_profile(name, &Profile::default())
}

/// Render a catalog template to JSON with a custom metadata profile
///
/// # Example
///
/// ```rust
/// use cfn_forge::{render_with_profile, Profile};
///
/// let profile = Profile::from_str(r#"
///     [metadata]
///     updated_by = "platform team"
/// "#).unwrap();
///
/// let json = render_with_profile("rds", &profile).unwrap();
/// assert!(json.contains("platform team"));
/// ```
pub fn render_with_profile(name: &str, profile: &Profile) -> Result<String, ForgeError> {
    let template = catalog::build(name, profile).ok_or_else(|| ForgeError::UnknownTemplate {
        name: name.to_string(),
    })??;
    Ok(template.to_json()?)
}
