//! GET / CREATE / DELETE grammar shared by the one-shot subcommands and the
//! shell. Parsing is pure: it turns words into a typed `Request` and never
//! touches the network.

use nuage_api::{
    Domain, DomainTemplate, EntityKind, EntityMeta, Enterprise, ListScope, Subnet, VMInterface,
    VPort, VirtualMachine, Zone, ZoneTemplate,
};

use crate::cli::CREATE_USAGE;
use crate::error::CliError;

pub const GET_USAGE: &str = "GET <collection> [<ID> [<children>]]\n\
    collections: enterprises, domaintemplates, domains, zonetemplates, zones,\n\
    subnets, vports, vminterfaces, vms";

pub const DELETE_USAGE: &str = "DELETE <entity> <ID>";

/// Defaults for vports created from the command line.
const VPORT_TYPE: &str = "VM";
const VPORT_ADDRESS_SPOOFING: &str = "INHERITED";

/// A parsed entity command.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// List `kind` within `scope`.
    List { kind: EntityKind, scope: ListScope },
    /// Fetch one entity.
    Show { kind: EntityKind, id: String },
    Create(NewEntity),
    Delete { kind: EntityKind, id: String },
}

/// A locally-built entity ready to be created.
#[derive(Debug, Clone, PartialEq)]
pub enum NewEntity {
    Enterprise(Enterprise),
    DomainTemplate(DomainTemplate),
    Domain(Domain),
    ZoneTemplate(ZoneTemplate),
    Zone(Zone),
    Subnet(Subnet),
    VPort(VPort),
    VMInterface(VMInterface),
    VirtualMachine(VirtualMachine),
}

fn parse_kind(word: &str, usage: &str) -> Result<EntityKind, CliError> {
    word.parse()
        .map_err(|_| CliError::usage(format!("unknown entity type '{word}'"), usage))
}

/// `<collection> [<ID> [<children>]]`
pub fn parse_get(args: &[&str]) -> Result<Request, CliError> {
    match *args {
        [collection] => Ok(Request::List {
            kind: parse_kind(collection, GET_USAGE)?,
            scope: ListScope::Global,
        }),
        [collection, id] => Ok(Request::Show {
            kind: parse_kind(collection, GET_USAGE)?,
            id: id.to_owned(),
        }),
        [collection, id, children] => Ok(Request::List {
            kind: parse_kind(children, GET_USAGE)?,
            scope: ListScope::parent(parse_kind(collection, GET_USAGE)?, id),
        }),
        _ => Err(CliError::usage("GET takes one to three arguments", GET_USAGE)),
    }
}

/// `<entity> <ID>`
pub fn parse_delete(args: &[&str]) -> Result<Request, CliError> {
    match *args {
        [entity, id] => Ok(Request::Delete {
            kind: parse_kind(entity, DELETE_USAGE)?,
            id: id.to_owned(),
        }),
        _ => Err(CliError::usage("DELETE takes two arguments", DELETE_USAGE)),
    }
}

/// `<entity> <name> [args...]`, with per-type argument forms.
pub fn parse_create(args: &[&str]) -> Result<Request, CliError> {
    let Some((&entity, rest)) = args.split_first() else {
        return Err(CliError::usage("CREATE needs an entity type", CREATE_USAGE));
    };
    let kind = parse_kind(entity, CREATE_USAGE)?;
    let bad_form = || {
        CliError::usage(
            format!("wrong number of arguments for CREATE {}", entity.to_ascii_lowercase()),
            CREATE_USAGE,
        )
    };

    let new = match (kind, rest) {
        (EntityKind::Enterprise, [name]) => NewEntity::Enterprise(Enterprise {
            name: (*name).into(),
            ..Enterprise::default()
        }),
        (EntityKind::DomainTemplate, [name, enterprise]) => {
            NewEntity::DomainTemplate(DomainTemplate {
                name: (*name).into(),
                meta: EntityMeta::under(*enterprise),
                ..DomainTemplate::default()
            })
        }
        (EntityKind::Domain, [name, enterprise, template]) => NewEntity::Domain(Domain {
            name: (*name).into(),
            template_id: (*template).into(),
            meta: EntityMeta::under(*enterprise),
            ..Domain::default()
        }),
        (EntityKind::ZoneTemplate, [name, domain_template]) => {
            NewEntity::ZoneTemplate(ZoneTemplate {
                name: (*name).into(),
                meta: EntityMeta::under(*domain_template),
                ..ZoneTemplate::default()
            })
        }
        (EntityKind::Zone, [name, domain, template @ ..]) if template.len() <= 1 => {
            NewEntity::Zone(Zone {
                name: (*name).into(),
                template_id: template.first().map(|t| (*t).to_owned()).unwrap_or_default(),
                meta: EntityMeta::under(*domain),
                ..Zone::default()
            })
        }
        (EntityKind::Subnet, [name, zone, template]) => NewEntity::Subnet(Subnet {
            name: (*name).into(),
            template_id: (*template).into(),
            meta: EntityMeta::under(*zone),
            ..Subnet::default()
        }),
        (EntityKind::Subnet, [name, zone, address, netmask]) => NewEntity::Subnet(Subnet {
            name: (*name).into(),
            address: (*address).into(),
            netmask: (*netmask).into(),
            meta: EntityMeta::under(*zone),
            ..Subnet::default()
        }),
        (EntityKind::VPort, [name, subnet]) => NewEntity::VPort(VPort {
            name: (*name).into(),
            port_type: VPORT_TYPE.into(),
            address_spoofing: VPORT_ADDRESS_SPOOFING.into(),
            active: true,
            meta: EntityMeta::under(*subnet),
            ..VPort::default()
        }),
        (EntityKind::VMInterface, [name, vm, mac, vport]) => {
            NewEntity::VMInterface(VMInterface {
                name: Some((*name).into()),
                mac: (*mac).into(),
                vport_id: (*vport).into(),
                meta: EntityMeta::under(*vm),
                ..VMInterface::default()
            })
        }
        (EntityKind::VirtualMachine, [name, uuid, mac, vport]) => {
            NewEntity::VirtualMachine(VirtualMachine {
                name: (*name).into(),
                uuid: (*uuid).into(),
                interfaces: vec![VMInterface {
                    mac: (*mac).into(),
                    vport_id: (*vport).into(),
                    ..VMInterface::default()
                }],
                ..VirtualMachine::default()
            })
        }
        _ => return Err(bad_form()),
    };

    Ok(Request::Create(new))
}
