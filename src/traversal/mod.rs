//! Traversal protocol — the one walk over the descriptor tree
//!
//! Every derived analysis implements [`Visitor`] and is driven by the
//! `accept`/`traverse` methods below. The order is fixed:
//!
//! 1. the `WithinDirectory` itself
//! 2. each public-domain `ByOrganisation`, depth first
//! 3. each `WithLicense` in declaration order, depth first
//!    (its `ByOrganisation` groups, each followed by its resources)
//!
//! A visitor prunes whole layers through the `traverse_*` predicates:
//! declining license groups also skips everything beneath them.

use crate::model::{ByOrganisation, Descriptor, Resource, WithLicense, WithinDirectory};

/// A consumer of descriptor traversal.
///
/// All predicates default to descending and all callbacks default to doing
/// nothing, so implementations only override what they need.
pub trait Visitor {
    fn traverse_public_domain(&self) -> bool {
        true
    }

    fn traverse_with_license(&self) -> bool {
        true
    }

    fn traverse_by_organisation(&self) -> bool {
        true
    }

    fn traverse_resource(&self) -> bool {
        true
    }

    fn visit_within_directory(&mut self, _directory: &WithinDirectory) {}

    fn visit_with_license(&mut self, _license: &WithLicense) {}

    fn visit_by_organisation(&mut self, _organisation: &ByOrganisation) {}

    fn visit_resource(&mut self, _resource: &Resource) {}
}

impl Descriptor {
    /// Walk every directory in name order
    pub fn traverse<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for directory in self.directories() {
            directory.accept(visitor);
        }
    }

    /// Walk only the directory named `name`. Returns false when the
    /// descriptor declares no such directory.
    pub fn traverse_directory<V: Visitor + ?Sized>(&self, name: &str, visitor: &mut V) -> bool {
        match self.directory(name) {
            Some(directory) => {
                directory.accept(visitor);
                true
            }
            None => false,
        }
    }
}

impl WithinDirectory {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_within_directory(self);
        if visitor.traverse_public_domain() {
            for organisation in self.public_domain() {
                organisation.accept(visitor);
            }
        }
        if visitor.traverse_with_license() {
            for license in self.licenses() {
                license.accept(visitor);
            }
        }
    }
}

impl WithLicense {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_with_license(self);
        if visitor.traverse_by_organisation() {
            for organisation in self.organisations() {
                organisation.accept(visitor);
            }
        }
    }
}

impl ByOrganisation {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_by_organisation(self);
        if visitor.traverse_resource() {
            for resource in self.resources() {
                resource.accept(visitor);
            }
        }
    }
}

impl Resource {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_resource(self);
    }
}
