mod extract;

pub use extract::{
    apns, available_cells, carrier_aggregation, device_info, ethernet_traffic, interface_traffic,
    lte_traffic, primary_cell, secondary_cells, FastMileScraper, MAX_AVAILABLE_CELLS,
};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsedData {
    #[serde(rename = "val")]
    pub value: f64,
    pub unit: String,
}

impl fmt::Display for UsedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceTraffic {
    pub download: Option<UsedData>,
    pub upload: Option<UsedData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellRecord {
    pub pci: Option<i64>,
    pub earfcn: Option<i64>,
    pub rsrp: Option<i64>,
    pub rsrq: Option<i64>,
    pub rssi: Option<i64>,
    pub sinr: Option<i64>,
    #[serde(rename = "type")]
    pub cell_type: CellType,
}

/// A cell measured during the last scan, not necessarily attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableCellRecord {
    pub pci: Option<i64>,
    pub earfcn: Option<i64>,
    pub rsrp: Option<i64>,
    #[serde(rename = "rsqr")]
    pub rsrq: Option<i64>,
    pub rssi: Option<i64>,
    pub sinr: Option<i64>,
}

/// The attached eNodeB and the aggregated bands. The primary band is always
/// the first entry of both band lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarrierAggregationInfo {
    pub enb: Option<i64>,
    pub cid: Option<i64>,
    pub dl_bands: Vec<Option<i64>>,
    pub ul_bands: Vec<Option<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnRecord {
    pub name: String,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub model: String,
    pub sw_version: String,
    pub serial_number: String,
    pub imei: String,
    pub imsi: String,
    pub mac: String,
    pub lock_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataUsage {
    pub eth: InterfaceTraffic,
    pub lte: InterfaceTraffic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cells {
    /// Secondary cells first, the primary cell last.
    pub active: Vec<CellRecord>,
    pub available: Vec<AvailableCellRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LteStatus {
    pub ca: CarrierAggregationInfo,
    pub cells: Cells,
}

/// Everything the status page exposes, in the shape it is printed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub info: DeviceInfo,
    pub apns: Vec<ApnRecord>,
    pub data: DataUsage,
    pub lte: LteStatus,
}

fn opt<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "None".to_string(), ToString::to_string)
}

fn bands(bands: &[Option<i64>]) -> String {
    bands
        .iter()
        .map(|b| b.map_or_else(|| "?".to_string(), |b| format!("B{}", b)))
        .collect::<Vec<_>>()
        .join("+")
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = &self.info;
        writeln!(f, "Model           : {}", info.model)?;
        writeln!(f, "Software        : {}", info.sw_version)?;
        writeln!(f, "Serial Number   : {}", info.serial_number)?;
        writeln!(f, "IMEI            : {}", info.imei)?;
        writeln!(f, "IMSI            : {}", info.imsi)?;
        writeln!(f, "MAC             : {}", info.mac)?;
        writeln!(f, "Lock Status     : {}", info.lock_status)?;

        writeln!(f, "APNs            : ")?;
        for apn in &self.apns {
            writeln!(
                f,
                "> {} (IPv4 {}, IPv6 {})",
                apn.name,
                opt(&apn.ipv4),
                opt(&apn.ipv6)
            )?;
        }

        for (name, traffic) in [("Ethernet", &self.data.eth), ("LTE", &self.data.lte)] {
            writeln!(
                f,
                "{:<16}: down {}, up {}",
                name,
                opt(&traffic.download),
                opt(&traffic.upload)
            )?;
        }

        let ca = &self.lte.ca;
        writeln!(f, "eNodeB / CID    : {} / {}", opt(&ca.enb), opt(&ca.cid))?;
        writeln!(f, "Bands DL        : {}", bands(&ca.dl_bands))?;
        writeln!(f, "Bands UL        : {}", bands(&ca.ul_bands))?;

        writeln!(f, "Active Cells    : ")?;
        for cell in &self.lte.cells.active {
            writeln!(
                f,
                "> {:?} PCI {} EARFCN {} RSRP {} RSRQ {} RSSI {} SINR {}",
                cell.cell_type,
                opt(&cell.pci),
                opt(&cell.earfcn),
                opt(&cell.rsrp),
                opt(&cell.rsrq),
                opt(&cell.rssi),
                opt(&cell.sinr)
            )?;
        }

        writeln!(f, "Available Cells : ")?;
        for cell in &self.lte.cells.available {
            writeln!(
                f,
                "> PCI {} EARFCN {} RSRP {} RSRQ {} RSSI {} SINR {}",
                opt(&cell.pci),
                opt(&cell.earfcn),
                opt(&cell.rsrp),
                opt(&cell.rsrq),
                opt(&cell.rssi),
                opt(&cell.sinr)
            )?;
        }

        Ok(())
    }
}
