//! Descriptor model — immutable licensing facts for one distribution
//!
//! The tree is built once by a loader through [`DescriptorBuilder`] and is
//! read-only afterwards:
//!
//! ```text
//! Descriptor
//!  └─ WithinDirectory (unique by name)
//!      ├─ public domain: ByOrganisation ─ Resource*
//!      └─ WithLicense (license + parameters)
//!          └─ ByOrganisation ─ Resource*
//! ```
//!
//! Licenses and organisations are shared between the id maps and the groups
//! that reference them, so they are held behind `Arc`.

pub mod license;
pub mod organisation;
pub mod resource;
pub mod groups;
pub mod descriptor;
pub mod builder;

pub use license::License;
pub use organisation::Organisation;
pub use resource::Resource;
pub use groups::{ByOrganisation, WithLicense, WithinDirectory};
pub use descriptor::Descriptor;
pub use builder::DescriptorBuilder;
