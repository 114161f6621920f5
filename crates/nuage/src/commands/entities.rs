//! Runs parsed entity requests against a session and renders the result.

use nuage_api::{
    Domain, DomainTemplate, Entity, EntityKind, EntityMeta, Enterprise, Session, Subnet,
    VMInterface, VPort, VirtualMachine, Zone, ZoneTemplate,
};
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

use super::grammar::{NewEntity, Request};

/// Bind `$E` to the model type for `$kind` and evaluate `$body`.
macro_rules! for_kind {
    ($kind:expr, $E:ident => $body:expr) => {
        match $kind {
            EntityKind::Enterprise => {
                type $E = Enterprise;
                $body
            }
            EntityKind::DomainTemplate => {
                type $E = DomainTemplate;
                $body
            }
            EntityKind::Domain => {
                type $E = Domain;
                $body
            }
            EntityKind::ZoneTemplate => {
                type $E = ZoneTemplate;
                $body
            }
            EntityKind::Zone => {
                type $E = Zone;
                $body
            }
            EntityKind::Subnet => {
                type $E = Subnet;
                $body
            }
            EntityKind::VPort => {
                type $E = VPort;
                $body
            }
            EntityKind::VMInterface => {
                type $E = VMInterface;
                $body
            }
            EntityKind::VirtualMachine => {
                type $E = VirtualMachine;
                $body
            }
        }
    };
}

/// What a request produced.
#[derive(Debug)]
pub enum Outcome {
    /// Text for stdout.
    Rendered(String),
    Deleted { kind: EntityKind, id: String },
}

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Parent Type")]
    parent_type: String,
    #[tabled(rename = "Parent ID")]
    parent_id: String,
}

fn to_row<E: Entity>(entity: &E) -> EntityRow {
    let meta = entity.meta();
    EntityRow {
        id: meta.id.clone(),
        name: entity.display_name().to_owned(),
        parent_type: meta.parent_type.clone().unwrap_or_default(),
        parent_id: meta.parent_id.clone(),
    }
}

fn id_of<E: Entity>(entity: &E) -> String {
    entity.id().to_owned()
}

pub async fn execute(
    session: &Session,
    request: Request,
    format: OutputFormat,
) -> Result<Outcome, CliError> {
    tracing::debug!(?request, "executing entity request");

    match request {
        Request::List { kind, scope } => for_kind!(kind, E => {
            let items: Vec<E> = session.list(&scope).await?;
            Ok(Outcome::Rendered(output::render_list(format, &items, to_row, id_of)?))
        }),

        Request::Show { kind, id } => for_kind!(kind, E => {
            let item: E = session.fetch(&id).await?;
            render_one(&item, format)
        }),

        Request::Create(new) => create(session, new, format).await,

        Request::Delete { kind, id } => {
            for_kind!(kind, E => {
                let mut target = E::default();
                *target.meta_mut() = EntityMeta::with_id(id.as_str());
                session.delete(&target).await?;
            });
            Ok(Outcome::Deleted { kind, id })
        }
    }
}

async fn create(
    session: &Session,
    new: NewEntity,
    format: OutputFormat,
) -> Result<Outcome, CliError> {
    match new {
        NewEntity::Enterprise(e) => create_one(session, e, format).await,
        NewEntity::DomainTemplate(e) => create_one(session, e, format).await,
        NewEntity::Domain(e) => create_one(session, e, format).await,
        NewEntity::ZoneTemplate(e) => create_one(session, e, format).await,
        NewEntity::Zone(e) => create_one(session, e, format).await,
        NewEntity::Subnet(e) => create_one(session, e, format).await,
        NewEntity::VPort(e) => create_one(session, e, format).await,
        NewEntity::VMInterface(e) => create_one(session, e, format).await,
        NewEntity::VirtualMachine(e) => create_one(session, e, format).await,
    }
}

async fn create_one<E: Entity>(
    session: &Session,
    mut entity: E,
    format: OutputFormat,
) -> Result<Outcome, CliError> {
    session.create(&mut entity).await?;
    tracing::info!(kind = %E::KIND, id = entity.id(), "created");
    render_one(&entity, format)
}

fn render_one<E: Entity>(entity: &E, format: OutputFormat) -> Result<Outcome, CliError> {
    output::render_single(format, entity, output::render_detail, id_of)
        .map(Outcome::Rendered)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn row_uses_display_name_and_parent() {
        let mut zone = Zone {
            name: "web".into(),
            meta: EntityMeta::under("d-1"),
            ..Zone::default()
        };
        zone.meta.id = "z-1".into();
        zone.meta.parent_type = Some("domain".into());

        let row = to_row(&zone);
        assert_eq!(row.id, "z-1");
        assert_eq!(row.name, "web");
        assert_eq!(row.parent_type, "domain");
        assert_eq!(row.parent_id, "d-1");
    }

    #[test]
    fn plain_output_is_the_id() {
        let vport = VPort {
            meta: EntityMeta::with_id("vp-1"),
            ..VPort::default()
        };
        match render_one(&vport, OutputFormat::Plain).unwrap() {
            Outcome::Rendered(text) => assert_eq!(text, "vp-1"),
            Outcome::Deleted { .. } => panic!("expected rendered output"),
        }
    }

    #[test]
    fn macro_binds_each_kind() {
        for kind in EntityKind::ALL {
            let bound = for_kind!(kind, E => E::KIND);
            assert_eq!(bound, kind);
        }
    }
}
