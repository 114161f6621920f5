// Typed entity layer
//
// `Entity` is implemented once per resource kind (see `schema`); the four
// per-type wrappers (create / get / delete / list) are written here once,
// generically, on top of the raw verbs in `operations`. Single-entity
// responses are one-element arrays and are unwrapped here, and the server's
// object is merged onto the caller's value rather than replacing it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::models::EntityMeta;
use crate::session::Session;

// ── Entity kinds ─────────────────────────────────────────────────────

/// The nine resource kinds of the VSD hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Enterprise,
    DomainTemplate,
    Domain,
    ZoneTemplate,
    Zone,
    Subnet,
    VPort,
    VMInterface,
    VirtualMachine,
}

impl EntityKind {
    pub const ALL: [Self; 9] = [
        Self::Enterprise,
        Self::DomainTemplate,
        Self::Domain,
        Self::ZoneTemplate,
        Self::Zone,
        Self::Subnet,
        Self::VPort,
        Self::VMInterface,
        Self::VirtualMachine,
    ];

    /// REST collection segment, e.g. `zonetemplates`.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Enterprise => "enterprises",
            Self::DomainTemplate => "domaintemplates",
            Self::Domain => "domains",
            Self::ZoneTemplate => "zonetemplates",
            Self::Zone => "zones",
            Self::Subnet => "subnets",
            Self::VPort => "vports",
            Self::VMInterface => "vminterfaces",
            Self::VirtualMachine => "vms",
        }
    }

    /// Human-readable name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::DomainTemplate => "DomainTemplate",
            Self::Domain => "Domain",
            Self::ZoneTemplate => "ZoneTemplate",
            Self::Zone => "Zone",
            Self::Subnet => "Subnet",
            Self::VPort => "VPort",
            Self::VMInterface => "VMInterface",
            Self::VirtualMachine => "VirtualMachine",
        }
    }

    /// Parent kinds under which this kind can be listed. The first entry is
    /// the parent the entity is created under, where one exists.
    pub fn list_parents(self) -> &'static [Self] {
        match self {
            Self::Enterprise | Self::VirtualMachine => &[],
            Self::DomainTemplate | Self::Domain => &[Self::Enterprise],
            Self::ZoneTemplate => &[Self::DomainTemplate],
            Self::Zone => &[Self::Domain],
            Self::Subnet => &[Self::Zone],
            Self::VPort | Self::VMInterface => &[Self::Subnet, Self::Domain],
        }
    }

    /// Whether the controller exposes a system-wide listing of this kind.
    pub fn global_listing(self) -> bool {
        !matches!(self, Self::DomainTemplate | Self::ZoneTemplate | Self::VPort)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    /// Accepts the collection name or its singular, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let kind = match key.as_str() {
            "enterprise" | "enterprises" => Self::Enterprise,
            "domaintemplate" | "domaintemplates" => Self::DomainTemplate,
            "domain" | "domains" => Self::Domain,
            "zonetemplate" | "zonetemplates" => Self::ZoneTemplate,
            "zone" | "zones" => Self::Zone,
            "subnet" | "subnets" => Self::Subnet,
            "vport" | "vports" => Self::VPort,
            "vminterface" | "vminterfaces" => Self::VMInterface,
            "vm" | "vms" | "virtualmachine" | "virtualmachines" => Self::VirtualMachine,
            _ => {
                return Err(Error::validation(
                    "EntityKind",
                    format!("unknown entity type '{s}'"),
                ));
            }
        };
        Ok(kind)
    }
}

// ── List scope ───────────────────────────────────────────────────────

/// Where a listing is rooted: the whole system, or one parent's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    Global,
    Parent { kind: EntityKind, id: String },
}

impl ListScope {
    pub fn parent(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::Parent {
            kind,
            id: id.into(),
        }
    }

    /// Scope a listing of `child` by a bare parent ID: empty means global,
    /// otherwise the ID is taken to name `child`'s primary parent kind.
    pub fn from_parent_id(child: EntityKind, parent_id: &str) -> Self {
        match child.list_parents().first() {
            Some(&kind) if !parent_id.is_empty() => Self::parent(kind, parent_id),
            _ if parent_id.is_empty() => Self::Global,
            // Globally-listed kinds have no parent; keep the ID so `path`
            // reports the mismatch instead of silently widening the scope.
            _ => Self::parent(child, parent_id),
        }
    }

    /// Relative collection path listing `child` within this scope.
    pub fn path(&self, child: EntityKind) -> Result<String, Error> {
        match self {
            Self::Global if child.global_listing() => Ok(child.collection().to_owned()),
            Self::Global => Err(Error::validation(
                child.label(),
                "a parent ID is required to list this type",
            )),
            Self::Parent { id, .. } if id.is_empty() => {
                Err(Error::validation(child.label(), "empty parent ID"))
            }
            Self::Parent { kind, id } if child.list_parents().contains(kind) => {
                Ok(format!("{}/{id}/{}", kind.collection(), child.collection()))
            }
            Self::Parent { kind, .. } => Err(Error::validation(
                child.label(),
                format!("cannot be listed under {kind}"),
            )),
        }
    }
}

// ── Entity trait ─────────────────────────────────────────────────────

/// A typed VSD resource.
pub trait Entity: Serialize + DeserializeOwned + Default + Clone + Send + Sync {
    const KIND: EntityKind;

    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    /// Short label for tables and log lines.
    fn display_name(&self) -> &str;

    /// Fill in defaults for fields the caller left empty. Runs before
    /// `validate_create`.
    fn apply_defaults(&mut self) {}

    /// Presence check of the fields the controller requires on create.
    fn validate_create(&self) -> Result<(), Error>;

    /// Collection path this entity is POSTed to. Only meaningful once
    /// `validate_create` has passed.
    fn create_path(&self) -> String;

    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Path of this entity's own resource, `{collection}/{ID}`.
    fn resource_path(&self) -> Result<String, Error> {
        let id = self.id();
        if id.is_empty() {
            return Err(Error::validation(Self::KIND.label(), "empty ID"));
        }
        Ok(format!("{}/{id}", Self::KIND.collection()))
    }
}

// ── Response decoding ────────────────────────────────────────────────

/// Decode a single-entity response: a JSON array holding exactly the one
/// object of interest.
pub fn decode_single(body: &[u8]) -> Result<Value, Error> {
    let items: Vec<Value> =
        serde_json::from_slice(body).map_err(|e| Error::deserialization(&e, body))?;
    items.into_iter().next().ok_or_else(|| Error::Deserialization {
        message: "expected a one-element array, got an empty one".into(),
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Overlay the server's object onto `local` and decode the result.
///
/// Server keys win; `null` from the server never erases a local value, and
/// local fields the server does not echo are kept.
pub fn merge_response<E: Entity>(local: &E, server: Value) -> Result<E, Error> {
    let Value::Object(incoming) = server else {
        return Err(Error::Deserialization {
            message: format!("expected a {} object", E::KIND),
            body: server.to_string(),
        });
    };

    let mut merged = serde_json::to_value(local)?;
    if let Value::Object(target) = &mut merged {
        for (key, value) in incoming {
            if !value.is_null() {
                target.insert(key, value);
            }
        }
    }

    serde_json::from_value(merged).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: String::new(),
    })
}

/// Decode a listing. An empty body is an empty list; any element that fails
/// to decode fails the whole call.
pub fn decode_list<E: Entity>(body: &[u8]) -> Result<Vec<E>, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(body).map_err(|e| Error::deserialization(&e, body))
}

// ── Typed operations ─────────────────────────────────────────────────

impl Session {
    /// Create `entity` under its parent and merge the server's copy into it.
    ///
    /// On success `entity` carries the server-assigned ID and audit fields.
    /// On failure it is left as the caller passed it (defaults applied).
    pub async fn create<E: Entity>(&self, entity: &mut E) -> Result<(), Error> {
        self.require_credential()?;
        entity.apply_defaults();
        entity.validate_create()?;

        let payload = serde_json::to_vec(entity)?;
        let body = self.create_entity(&entity.create_path(), &payload).await?;
        *entity = merge_response(entity, decode_single(&body)?)?;

        debug!(kind = %E::KIND, id = entity.id(), name = entity.display_name(), "created");
        Ok(())
    }

    /// Refresh `entity` from the controller. Its ID must be set.
    pub async fn get<E: Entity>(&self, entity: &mut E) -> Result<(), Error> {
        self.require_credential()?;
        let path = entity.resource_path()?;

        let body = self.get_entity(&path).await?;
        *entity = merge_response(entity, decode_single(&body)?)?;

        debug!(kind = %E::KIND, id = entity.id(), "fetched");
        Ok(())
    }

    /// Fetch one entity by ID.
    pub async fn fetch<E: Entity>(&self, id: &str) -> Result<E, Error> {
        let mut entity = E::default();
        entity.meta_mut().id = id.to_owned();
        self.get(&mut entity).await?;
        Ok(entity)
    }

    /// Delete `entity`, confirming if the controller asks to. Its ID must be set.
    pub async fn delete<E: Entity>(&self, entity: &E) -> Result<(), Error> {
        self.require_credential()?;
        let path = entity.resource_path()?;

        self.delete_entity(&path).await?;

        debug!(kind = %E::KIND, id = entity.id(), "deleted");
        Ok(())
    }

    /// List entities of type `E` within `scope`.
    pub async fn list<E: Entity>(&self, scope: &ListScope) -> Result<Vec<E>, Error> {
        self.require_credential()?;
        let path = scope.path(E::KIND)?;

        let body = self.get_entity(&path).await?;
        let items = decode_list(&body)?;

        debug!(kind = %E::KIND, path, count = items.len(), "listed");
        Ok(items)
    }
}
