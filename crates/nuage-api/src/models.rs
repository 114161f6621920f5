// VSD v3.2 entity models
//
// One struct per resource kind. Every entity carries the shared `EntityMeta`
// (server-assigned ID, parent reference and audit fields) flattened into its
// JSON object. The controller sends `null` for unset strings, so plain
// `String` fields go through `nullable`, and everything that is not needed
// to address or create the entity is an `Option`.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat JSON `null` as the type's default.
fn nullable<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

// ── Shared shape ─────────────────────────────────────────────────────

/// Identity, parent reference and audit metadata common to all entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    #[serde(rename = "ID", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "parentID", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
    #[serde(rename = "parentType", default, skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,
    #[serde(rename = "creationDate", default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<i64>,
    #[serde(rename = "lastUpdatedBy", default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<String>,
    #[serde(rename = "lastUpdatedDate", default, skip_serializing_if = "Option::is_none")]
    pub last_updated_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "entityScope", default, skip_serializing_if = "Option::is_none")]
    pub entity_scope: Option<String>,
    #[serde(rename = "externalID", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl EntityMeta {
    /// Metadata for an entity to be created under `parent_id`.
    pub fn under(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            ..Self::default()
        }
    }

    /// Metadata addressing an existing entity by ID.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

// ── Enterprise ───────────────────────────────────────────────────────

/// Top-level organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(rename = "customerID", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(rename = "enterpriseProfileID", default, skip_serializing_if = "Option::is_none")]
    pub enterprise_profile_id: Option<String>,
    #[serde(rename = "DHCPLeaseInterval", alias = "DHCPLeaseinterval", default, skip_serializing_if = "Option::is_none")]
    pub dhcp_lease_interval: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ips_quota: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ips_used: Option<i64>,
    #[serde(rename = "LDAPEnabled", default, skip_serializing_if = "Option::is_none")]
    pub ldap_enabled: Option<bool>,
    #[serde(rename = "LDAPAuthorizationEnabled", default, skip_serializing_if = "Option::is_none")]
    pub ldap_authorization_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_gateway_management: Option<bool>,
    #[serde(rename = "allowAdvancedQOSConfiguration", default, skip_serializing_if = "Option::is_none")]
    pub allow_advanced_qos_configuration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_forwarding_classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_management_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_data: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

// ── Domain template / Domain ─────────────────────────────────────────

/// Blueprint from which L3 domains are instantiated. Parent: Enterprise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainTemplate {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multicast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_change_status: Option<String>,
    #[serde(rename = "associatedMulticastChannelMapID", default, skip_serializing_if = "Option::is_none")]
    pub associated_multicast_channel_map_id: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

/// L3 domain. Parent: Enterprise; instantiated from a `DomainTemplate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "templateID", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub template_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "customerID", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(rename = "serviceID", default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<i64>,
    #[serde(rename = "labelID", default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_distinguisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_route_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_route_target: Option<String>,
    #[serde(rename = "DHCPBehavior", default, skip_serializing_if = "Option::is_none")]
    pub dhcp_behavior: Option<String>,
    #[serde(rename = "DHCPServerAddress", default, skip_serializing_if = "Option::is_none")]
    pub dhcp_server_address: Option<String>,
    #[serde(rename = "ECMPCount", default, skip_serializing_if = "Option::is_none")]
    pub ecmp_count: Option<i64>,
    #[serde(rename = "PATEnabled", default, skip_serializing_if = "Option::is_none")]
    pub pat_enabled: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tunnel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multicast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_change_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplink_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stretched: Option<bool>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

// ── Zone template / Zone ─────────────────────────────────────────────

/// Zone blueprint. Parent: DomainTemplate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTemplate {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(rename = "IPType", default, skip_serializing_if = "Option::is_none")]
    pub ip_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_hosts_in_subnets: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_zone: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multicast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

/// Zone. Parent: Domain; optionally instantiated from a `ZoneTemplate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "templateID", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub template_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(rename = "IPType", default, skip_serializing_if = "Option::is_none")]
    pub ip_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_hosts_in_subnets: Option<i64>,
    #[serde(rename = "policyGroupID", default, skip_serializing_if = "Option::is_none")]
    pub policy_group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_zone: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multicast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

// ── Subnet ───────────────────────────────────────────────────────────

/// L3 subnet. Parent: Zone. Either `template_id` or `address` + `netmask`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub netmask: String,
    #[serde(rename = "templateID", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub template_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(rename = "gatewayMACAddress", default, skip_serializing_if = "Option::is_none")]
    pub gateway_mac_address: Option<String>,
    #[serde(rename = "IPType", default, skip_serializing_if = "Option::is_none")]
    pub ip_type: Option<String>,
    #[serde(rename = "PATEnabled", default, skip_serializing_if = "Option::is_none")]
    pub pat_enabled: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_distinguisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_target: Option<String>,
    #[serde(rename = "serviceID", default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<i64>,
    #[serde(rename = "vnId", default, skip_serializing_if = "Option::is_none")]
    pub vn_id: Option<i64>,
    #[serde(rename = "policyGroupID", default, skip_serializing_if = "Option::is_none")]
    pub policy_group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(rename = "proxyARP", default, skip_serializing_if = "Option::is_none")]
    pub proxy_arp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_subnet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multicast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

// ── VPort ────────────────────────────────────────────────────────────

/// Virtual port. Parent: Subnet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VPort {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// `VM`, `HOST`, `BRIDGE`, ...
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub port_type: String,
    /// `INHERITED`, `ENABLED` or `DISABLED`.
    #[serde(default, deserialize_with = "nullable")]
    pub address_spoofing: String,
    #[serde(default, deserialize_with = "nullable")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "VLANID", default, skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<String>,
    #[serde(rename = "domainID", default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(rename = "zoneID", default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(rename = "associatedFloatingIPID", default, skip_serializing_if = "Option::is_none")]
    pub associated_floating_ip_id: Option<String>,
    #[serde(rename = "multiNICVPortID", default, skip_serializing_if = "Option::is_none")]
    pub multi_nic_vport_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_attached_interfaces: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multicast: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

// ── VM interface / Virtual machine ───────────────────────────────────

/// A VM NIC. Parent: VirtualMachine; bound to a VPort through `vport_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VMInterface {
    #[serde(rename = "MAC", default, deserialize_with = "nullable")]
    pub mac: String,
    #[serde(rename = "VPortID", default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub vport_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "IPAddress", default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(rename = "VMUUID", default, skip_serializing_if = "Option::is_none")]
    pub vm_uuid: Option<String>,
    #[serde(rename = "VPortName", default, skip_serializing_if = "Option::is_none")]
    pub vport_name: Option<String>,
    #[serde(rename = "attachedNetworkID", default, skip_serializing_if = "Option::is_none")]
    pub attached_network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_network_type: Option<String>,
    #[serde(rename = "domainID", default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(rename = "zoneID", default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    #[serde(rename = "multiNICVPortName", default, skip_serializing_if = "Option::is_none")]
    pub multi_nic_vport_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_floating_ip_address: Option<String>,
    #[serde(rename = "policyDecisionID", default, skip_serializing_if = "Option::is_none")]
    pub policy_decision_id: Option<String>,
    #[serde(rename = "tierID", default, skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

/// Resync status reported for a VM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VMResync {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_request_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_time_resync_initiated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

/// Virtual machine, identified by its hypervisor UUID. Global collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "UUID", default, deserialize_with = "nullable")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub interfaces: Vec<VMInterface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_type: Option<String>,
    #[serde(rename = "enterpriseID", default, skip_serializing_if = "Option::is_none")]
    pub enterprise_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_name: Option<String>,
    #[serde(rename = "userID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(rename = "hypervisorIP", default, skip_serializing_if = "Option::is_none")]
    pub hypervisor_ip: Option<String>,
    #[serde(rename = "VRSID", default, skip_serializing_if = "Option::is_none")]
    pub vrs_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_expiry: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_identifier: Option<String>,
    #[serde(rename = "domainIDs", default, skip_serializing_if = "Option::is_none")]
    pub domain_ids: Option<Vec<String>>,
    #[serde(rename = "l2DomainIDs", default, skip_serializing_if = "Option::is_none")]
    pub l2_domain_ids: Option<Vec<String>>,
    #[serde(rename = "zoneIDs", default, skip_serializing_if = "Option::is_none")]
    pub zone_ids: Option<Vec<String>>,
    #[serde(rename = "subnetIDs", default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resync_info: Option<VMResync>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}
