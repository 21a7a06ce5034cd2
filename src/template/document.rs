//! The template document and its assembly operations

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use super::output::{Mapping, Output};
use super::parameter::Parameter;
use super::resource::{DeletionPolicy, Resource};
use super::section::{Section, SectionKind};
use super::value::{ConditionExpr, LogicalId};

/// Errors that can occur while assembling a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Two declarations in the same section share a logical name
    #[error("duplicate logical name in {section} section: {name}")]
    DuplicateName { section: SectionKind, name: String },

    /// Post-creation patch aimed at a resource that was never registered
    #[error("no resource named {name} to patch")]
    UnknownResource { name: String },

    /// The document could not be serialized
    #[error("failed to render template: {0}")]
    Render(#[from] serde_json::Error),
}

/// An infrastructure template under assembly.
///
/// Built empty, filled by `add_*` calls, rendered once at the end. Sections
/// keep insertion order and reject duplicate logical names; nothing is ever
/// removed. Cross-references between declarations are deliberately not
/// checked: a `Ref` to a name that does not exist passes through untouched
/// and is the provisioning engine's problem.
#[derive(Debug, Clone, Default)]
pub struct Template {
    version: Option<String>,
    description: Option<String>,
    metadata: Option<serde_json::Value>,
    parameters: Section<Parameter>,
    mappings: Section<Mapping>,
    conditions: Section<ConditionExpr>,
    resources: Section<Resource>,
    outputs: Section<Output>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the format version tag. Calling again overwrites.
    pub fn set_version(&mut self, tag: impl Into<String>) {
        self.version = Some(tag.into());
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = Some(text.into());
    }

    /// Set the free-form metadata bag. Calling again overwrites; callers that
    /// want to combine bags merge before setting.
    pub fn set_metadata(&mut self, bag: serde_json::Value) {
        self.metadata = Some(bag);
    }

    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        parameter: Parameter,
    ) -> Result<LogicalId, TemplateError> {
        let name = name.into();
        if !self.parameters.insert(name.clone(), parameter) {
            return Err(TemplateError::DuplicateName {
                section: SectionKind::Parameters,
                name,
            });
        }
        Ok(LogicalId::new(name))
    }

    pub fn add_mapping(
        &mut self,
        name: impl Into<String>,
        mapping: Mapping,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        if !self.mappings.insert(name.clone(), mapping) {
            return Err(TemplateError::DuplicateName {
                section: SectionKind::Mappings,
                name,
            });
        }
        Ok(())
    }

    pub fn add_condition(
        &mut self,
        name: impl Into<String>,
        expression: ConditionExpr,
    ) -> Result<LogicalId, TemplateError> {
        let name = name.into();
        if !self.conditions.insert(name.clone(), expression) {
            return Err(TemplateError::DuplicateName {
                section: SectionKind::Conditions,
                name,
            });
        }
        Ok(LogicalId::new(name))
    }

    pub fn add_resource(
        &mut self,
        name: impl Into<String>,
        resource: Resource,
    ) -> Result<LogicalId, TemplateError> {
        let name = name.into();
        if !self.resources.insert(name.clone(), resource) {
            return Err(TemplateError::DuplicateName {
                section: SectionKind::Resources,
                name,
            });
        }
        Ok(LogicalId::new(name))
    }

    pub fn add_output(
        &mut self,
        name: impl Into<String>,
        output: Output,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        if !self.outputs.insert(name.clone(), output) {
            return Err(TemplateError::DuplicateName {
                section: SectionKind::Outputs,
                name,
            });
        }
        Ok(())
    }

    /// Patch the deletion policy of an already-registered resource.
    ///
    /// The one sanctioned post-creation mutation; anything else about a
    /// declaration is fixed once added.
    pub fn set_deletion_policy(
        &mut self,
        resource: &LogicalId,
        policy: DeletionPolicy,
    ) -> Result<(), TemplateError> {
        match self.resources.get_mut(resource.as_str()) {
            Some(r) => {
                r.set_deletion_policy(policy);
                Ok(())
            }
            None => Err(TemplateError::UnknownResource {
                name: resource.as_str().to_string(),
            }),
        }
    }

    pub fn parameters(&self) -> &Section<Parameter> {
        &self.parameters
    }

    pub fn resources(&self) -> &Section<Resource> {
        &self.resources
    }

    pub fn outputs(&self) -> &Section<Output> {
        &self.outputs
    }

    /// Render the document as pretty-printed JSON.
    ///
    /// Sections appear in a fixed order and walk their entries in insertion
    /// order, so the same declarations always render byte-identically.
    /// Side-effect free; calling repeatedly on an unmutated template returns
    /// the same text.
    pub fn to_json(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render without indentation, for piping into other tools
    pub fn to_json_compact(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(version) = &self.version {
            map.serialize_entry("AWSTemplateFormatVersion", version)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("Description", description)?;
        }
        if let Some(metadata) = &self.metadata {
            map.serialize_entry("Metadata", metadata)?;
        }
        if !self.parameters.is_empty() {
            map.serialize_entry("Parameters", &self.parameters)?;
        }
        if !self.mappings.is_empty() {
            map.serialize_entry("Mappings", &self.mappings)?;
        }
        if !self.conditions.is_empty() {
            map.serialize_entry("Conditions", &self.conditions)?;
        }
        if !self.resources.is_empty() {
            map.serialize_entry("Resources", &self.resources)?;
        }
        if !self.outputs.is_empty() {
            map.serialize_entry("Outputs", &self.outputs)?;
        }
        map.end()
    }
}
