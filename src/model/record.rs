//! Typed scan-result records returned by the search API.
//!
//! Records are flat attribute bags: everything except identifying keys is
//! optional, because the scanner only reports what it observed. The
//! [`Resource`] trait ties a record type to its endpoint name and the set of
//! attributes the backend accepts in filter and sort clauses.

use serde::{Deserialize, Serialize};

// ===== Resource =====

/// A record type that can be searched through the API.
///
/// `NAME` is the resource path segment (`/modules/<module>/search/<NAME>`).
/// `FIELDS` lists the queryable attributes; filter and sort clauses naming
/// anything else are a caller error and are rejected before any request is
/// made.
pub trait Resource: serde::de::DeserializeOwned + Send + 'static {
    /// Endpoint path segment for this record type.
    const NAME: &'static str;

    /// Attributes the backend accepts in filter and sort clauses.
    const FIELDS: &'static [&'static str];

    /// Whether `field` is a known queryable attribute.
    fn is_queryable(field: &str) -> bool {
        Self::FIELDS.contains(&field)
    }
}

// ===== Enumerated attribute values =====

/// Transport protocol of a scanned port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TCP port.
    Tcp,
    /// UDP port.
    Udp,
    /// SCTP port.
    Sctp,
}

/// Port state as reported by the scanner.
///
/// The combined states (`open|filtered`, `closed|filtered`) are reported when
/// the scanner cannot distinguish the two, and are kept as dedicated variants
/// rather than free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortState {
    /// Port accepted the probe.
    #[serde(rename = "open")]
    Open,
    /// Port actively refused the probe.
    #[serde(rename = "closed")]
    Closed,
    /// Probe was dropped, likely by a firewall.
    #[serde(rename = "filtered")]
    Filtered,
    /// Port is reachable but state could not be determined.
    #[serde(rename = "unfiltered")]
    Unfiltered,
    /// Scanner could not tell open from filtered.
    #[serde(rename = "open|filtered")]
    OpenFiltered,
    /// Scanner could not tell closed from filtered.
    #[serde(rename = "closed|filtered")]
    ClosedFiltered,
}

impl PortState {
    /// Display label matching the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            PortState::Open => "open",
            PortState::Closed => "closed",
            PortState::Filtered => "filtered",
            PortState::Unfiltered => "unfiltered",
            PortState::OpenFiltered => "open|filtered",
            PortState::ClosedFiltered => "closed|filtered",
        }
    }
}

// ===== Records =====

/// Output of one scan script run against a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptResult {
    /// Script identifier.
    pub id: String,
    /// Raw script output.
    pub output: String,
}

/// One port observed by a scan.
///
/// Stored separately from host metadata; `port` is the only required field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortRecord {
    /// Identifier of the scan that produced this record.
    #[serde(default)]
    pub scan_id: Option<String>,
    /// Identifier of the host this port belongs to.
    #[serde(default)]
    pub host_id: Option<String>,
    /// Port number.
    pub port: u16,
    /// Transport protocol.
    #[serde(default)]
    pub protocol: Option<Protocol>,
    /// Observed port state.
    #[serde(default)]
    pub port_state: Option<PortState>,
    /// Detected service name.
    #[serde(default)]
    pub service_name: Option<String>,
    /// Detected service product.
    #[serde(default)]
    pub service_product: Option<String>,
    /// Detected service version.
    #[serde(default)]
    pub service_version: Option<String>,
    /// Additional service detection detail.
    #[serde(default)]
    pub service_extra_info: Option<String>,
    /// Tunnel protocol wrapping the service (e.g. ssl).
    #[serde(default)]
    pub service_tunnel: Option<String>,
    /// Script results attached to this port.
    #[serde(default)]
    pub scripts: Option<Vec<ScriptResult>>,
}

impl Resource for PortRecord {
    const NAME: &'static str = "ports";

    const FIELDS: &'static [&'static str] = &[
        "scan_id",
        "host_id",
        "port",
        "protocol",
        "port_state",
        "service_name",
        "service_product",
        "service_version",
        "service_extra_info",
        "service_tunnel",
    ];
}

/// One host observed by a scan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostRecord {
    /// Host identifier.
    #[serde(default)]
    pub host_id: Option<String>,
    /// Primary address of the host.
    #[serde(default)]
    pub host: Option<String>,
    /// Operator comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// All addresses the host answered on.
    #[serde(default)]
    pub addresses: Option<Vec<String>>,
    /// Reverse-resolved hostnames.
    #[serde(default)]
    pub hostnames: Option<Vec<String>>,
    /// Host status (`up`, `down`, ...).
    #[serde(default)]
    pub host_status: Option<String>,
    /// Detected operating system.
    #[serde(default)]
    pub os_name: Option<String>,
    /// OS detection confidence, 0-100.
    #[serde(default)]
    pub os_accuracy: Option<u8>,
}

impl Resource for HostRecord {
    const NAME: &'static str = "hosts";

    const FIELDS: &'static [&'static str] = &[
        "host_id",
        "host",
        "comment",
        "addresses",
        "hostnames",
        "host_status",
        "os_name",
        "os_accuracy",
    ];
}
