// Per-type bindings of the `Entity` trait: required fields and create paths.
//
// Validation is presence-only. Nothing here checks that a netmask is a
// netmask or a MAC is a MAC; the controller is the authority on that.

use crate::entity::{Entity, EntityKind};
use crate::error::Error;
use crate::models::{
    Domain, DomainTemplate, EntityMeta, Enterprise, Subnet, VMInterface, VPort, VirtualMachine,
    Zone, ZoneTemplate,
};

/// Description given to enterprises created without one.
pub const DEFAULT_ENTERPRISE_DESCRIPTION: &str = "Created by Golang API driver";

fn require(kind: EntityKind, field: &str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::validation(kind.label(), format!("empty {field}")));
    }
    Ok(())
}

fn under_parent(kind: EntityKind, meta: &EntityMeta) -> String {
    let parent = kind.list_parents().first().map_or("", |p| p.collection());
    format!("{parent}/{}/{}", meta.parent_id, kind.collection())
}

/// Implements the accessors every model shares.
macro_rules! entity_meta {
    () => {
        fn meta(&self) -> &EntityMeta {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut EntityMeta {
            &mut self.meta
        }
    };
}

impl Entity for Enterprise {
    const KIND: EntityKind = EntityKind::Enterprise;
    entity_meta!();

    fn display_name(&self) -> &str {
        &self.name
    }

    fn apply_defaults(&mut self) {
        if self.description.is_empty() {
            DEFAULT_ENTERPRISE_DESCRIPTION.clone_into(&mut self.description);
        }
    }

    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "name", &self.name)
    }

    fn create_path(&self) -> String {
        Self::KIND.collection().to_owned()
    }
}

impl Entity for DomainTemplate {
    const KIND: EntityKind = EntityKind::DomainTemplate;
    entity_meta!();

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "parent ID", &self.meta.parent_id)
    }

    fn create_path(&self) -> String {
        under_parent(Self::KIND, &self.meta)
    }
}

impl Entity for Domain {
    const KIND: EntityKind = EntityKind::Domain;
    entity_meta!();

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "parent ID", &self.meta.parent_id)?;
        require(Self::KIND, "template ID", &self.template_id)
    }

    fn create_path(&self) -> String {
        under_parent(Self::KIND, &self.meta)
    }
}

impl Entity for ZoneTemplate {
    const KIND: EntityKind = EntityKind::ZoneTemplate;
    entity_meta!();

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "parent ID", &self.meta.parent_id)
    }

    fn create_path(&self) -> String {
        under_parent(Self::KIND, &self.meta)
    }
}

impl Entity for Zone {
    const KIND: EntityKind = EntityKind::Zone;
    entity_meta!();

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "parent ID", &self.meta.parent_id)
    }

    fn create_path(&self) -> String {
        under_parent(Self::KIND, &self.meta)
    }
}

impl Entity for Subnet {
    const KIND: EntityKind = EntityKind::Subnet;
    entity_meta!();

    fn display_name(&self) -> &str {
        &self.name
    }

    /// Either a subnet template, or an explicit address and netmask.
    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "parent ID", &self.meta.parent_id)?;
        if self.template_id.is_empty() && (self.address.is_empty() || self.netmask.is_empty()) {
            return Err(Error::validation(
                Self::KIND.label(),
                "either a template ID or both address and netmask are required",
            ));
        }
        Ok(())
    }

    fn create_path(&self) -> String {
        under_parent(Self::KIND, &self.meta)
    }
}

impl Entity for VPort {
    const KIND: EntityKind = EntityKind::VPort;
    entity_meta!();

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "parent ID", &self.meta.parent_id)?;
        require(Self::KIND, "type", &self.port_type)?;
        require(Self::KIND, "address spoofing", &self.address_spoofing)
    }

    fn create_path(&self) -> String {
        under_parent(Self::KIND, &self.meta)
    }
}

impl Entity for VMInterface {
    const KIND: EntityKind = EntityKind::VMInterface;
    entity_meta!();

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.mac)
    }

    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "MAC", &self.mac)?;
        require(Self::KIND, "parent (VM) ID", &self.meta.parent_id)?;
        require(Self::KIND, "VPort ID", &self.vport_id)
    }

    // Interfaces hang off their VM; the vport binding is a field, not a path.
    fn create_path(&self) -> String {
        format!(
            "{}/{}/{}",
            EntityKind::VirtualMachine.collection(),
            self.meta.parent_id,
            Self::KIND.collection()
        )
    }
}

impl Entity for VirtualMachine {
    const KIND: EntityKind = EntityKind::VirtualMachine;
    entity_meta!();

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate_create(&self) -> Result<(), Error> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "UUID", &self.uuid)
    }

    fn create_path(&self) -> String {
        Self::KIND.collection().to_owned()
    }
}
