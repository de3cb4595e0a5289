//! Per-record column and cell definitions for the results table.
//!
//! [`TableRow`] is what a record type must provide to be rendered: column
//! headers, which columns the sort keys cycle through, the attribute the
//! search box filters on, and its own cells. Absent optional attributes
//! render as an em dash.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

use crate::model::{HostRecord, PortRecord, PortState, Protocol, Resource};

/// Placeholder for absent optional attributes.
const MISSING: &str = "—";

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header label.
    pub title: &'static str,
    /// Queryable attribute backing this column, when it is sortable.
    pub field: Option<&'static str>,
}

/// A record type renderable as a table row.
pub trait TableRow: Resource {
    /// Columns of this record's table, in display order.
    const COLUMNS: &'static [Column];

    /// Attributes the sort keys cycle through.
    const SORTABLE: &'static [&'static str];

    /// Attribute the search box filters on.
    const FILTER_FIELD: &'static str;

    /// Cells for this record, one per column.
    fn cells(&self) -> Vec<Cell<'static>>;
}

// ===== Cell helpers =====

fn text_cell(value: Option<&str>) -> Cell<'static> {
    match value {
        Some(v) => Cell::from(v.to_string()),
        None => Cell::from(MISSING),
    }
}

fn emphasized_cell(value: Option<&str>) -> Cell<'static> {
    match value {
        Some(v) => Cell::from(v.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
        None => Cell::from(MISSING),
    }
}

/// Badge coloring for host status (`up` green, `down` red, unknown gray).
fn host_status_cell(status: Option<&str>) -> Cell<'static> {
    let color = match status {
        Some("up") => Color::Green,
        Some("down") => Color::Red,
        _ => Color::DarkGray,
    };
    Cell::from(status.unwrap_or("unknown").to_string()).style(Style::default().fg(color))
}

/// Badge coloring for port state (open green, closed red, filtered yellow,
/// everything else gray).
fn port_state_cell(state: Option<PortState>) -> Cell<'static> {
    let (label, color) = match state {
        Some(PortState::Open) => ("open", Color::Green),
        Some(PortState::Closed) => ("closed", Color::Red),
        Some(PortState::Filtered) => ("filtered", Color::Yellow),
        Some(other) => (other.as_str(), Color::DarkGray),
        None => ("unknown", Color::DarkGray),
    };
    Cell::from(label.to_string()).style(Style::default().fg(color))
}

// ===== Hosts =====

impl TableRow for HostRecord {
    const COLUMNS: &'static [Column] = &[
        Column {
            title: "Host IP",
            field: Some("host"),
        },
        Column {
            title: "Hostnames",
            field: None,
        },
        Column {
            title: "Status",
            field: Some("host_status"),
        },
        Column {
            title: "OS",
            field: Some("os_name"),
        },
    ];

    const SORTABLE: &'static [&'static str] = &["host", "host_status", "os_name"];

    const FILTER_FIELD: &'static str = "host";

    fn cells(&self) -> Vec<Cell<'static>> {
        let first_hostname = self
            .hostnames
            .as_ref()
            .and_then(|names| names.first())
            .map(String::as_str);
        vec![
            emphasized_cell(self.host.as_deref()),
            text_cell(first_hostname),
            host_status_cell(self.host_status.as_deref()),
            text_cell(self.os_name.as_deref()),
        ]
    }
}

// ===== Ports =====

impl TableRow for PortRecord {
    const COLUMNS: &'static [Column] = &[
        Column {
            title: "Service name",
            field: Some("service_name"),
        },
        Column {
            title: "Product",
            field: None,
        },
        Column {
            title: "Port",
            field: Some("port"),
        },
        Column {
            title: "Version",
            field: None,
        },
        Column {
            title: "Status",
            field: Some("port_state"),
        },
    ];

    const SORTABLE: &'static [&'static str] = &["service_name", "port"];

    const FILTER_FIELD: &'static str = "service_name";

    fn cells(&self) -> Vec<Cell<'static>> {
        // Unspecified protocol displays as tcp, the scanner default.
        let protocol = match self.protocol.unwrap_or(Protocol::Tcp) {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Sctp => "sctp",
        };
        vec![
            emphasized_cell(self.service_name.as_deref()),
            text_cell(self.service_product.as_deref()),
            Cell::from(format!("{}/{}", self.port, protocol)),
            text_cell(self.service_version.as_deref()),
            port_state_cell(self.port_state),
        ]
    }
}
