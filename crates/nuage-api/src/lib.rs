// nuage-api: Async Rust client for the Nuage VSD REST API (v3.2 entity model)

pub mod auth;
pub mod entity;
pub mod error;
pub mod models;
pub mod operations;
pub mod schema;
pub mod session;
pub mod transport;

pub use auth::Credential;
pub use entity::{Entity, EntityKind, ListScope};
pub use error::Error;
pub use models::{
    Domain, DomainTemplate, EntityMeta, Enterprise, Subnet, VMInterface, VMResync, VPort,
    VirtualMachine, Zone, ZoneTemplate,
};
pub use operations::DeleteState;
pub use session::{Reply, Session, SessionConfig, base_url_for_host};
pub use transport::{TlsMode, TransportConfig};
