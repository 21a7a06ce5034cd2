//! Template assembly: typed declarations accumulated into an ordered
//! document, rendered once to JSON
//!
//! A [`Template`] starts empty, takes parameter, mapping, condition, resource
//! and output declarations keyed by logical name, and renders them in a fixed
//! section order. References between declarations stay symbolic; the
//! provisioning engine that consumes the rendered document resolves them.
//!
//! # Example
//!
//! ```rust
//! use cfn_forge::template::{Output, Parameter, Template};
//!
//! let mut t = Template::new();
//! t.set_description("Minimal example");
//! let name = t.add_parameter("Name", Parameter::string().with_default("abc"))?;
//! t.add_output("NameOut", Output::new(name.reference()))?;
//! let json = t.to_json()?;
//! assert!(json.contains("\"Ref\": \"Name\""));
//! # Ok::<(), cfn_forge::template::TemplateError>(())
//! ```

mod document;
mod output;
mod parameter;
mod resource;
mod section;
mod value;

pub use document::{Template, TemplateError};
pub use output::{Mapping, Output};
pub use parameter::{Parameter, ParameterType};
pub use resource::{DeletionPolicy, Resource};
pub use section::{Section, SectionKind};
pub use value::{ConditionExpr, LogicalId, Pseudo, Value};
