//! Built-in template catalog
//!
//! One builder per infrastructure template the team provisions: a memcached
//! cache cluster, an Elasticsearch cluster, a private DNS zone, and a
//! relational database. Each builder assembles a fresh [`Template`] from
//! scratch; nothing is shared between invocations.

mod elasticsearch;
mod internal_dns;
mod memcache;
mod rds;

pub use elasticsearch::elasticsearch;
pub use internal_dns::internal_dns;
pub use memcache::memcache;
pub use rds::rds;

use crate::profile::Profile;
use crate::template::{Template, TemplateError};

/// All catalog entries: name, one-line summary, builder
pub const ENTRIES: &[(
    &str,
    &str,
    fn(&Profile) -> Result<Template, TemplateError>,
)] = &[
    ("memcache", "Elasticache memcached cluster", memcache),
    ("elasticsearch", "Elasticsearch domain", elasticsearch),
    ("internal-dns", "Private Route53 hosted zone", internal_dns),
    ("rds", "RDS database (PostgreSQL / SQL Server)", rds),
];

/// Build a catalog template by name, or None if the name is unknown
pub fn build(name: &str, profile: &Profile) -> Option<Result<Template, TemplateError>> {
    ENTRIES
        .iter()
        .find(|(entry_name, _, _)| *entry_name == name)
        .map(|(_, _, builder)| builder(profile))
}

/// Names of all catalog templates, in catalog order
pub fn names() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|(name, _, _)| *name)
}
