use fastmile_scraper::fastmile::{
    ApnRecord, CarrierAggregationInfo, CellRecord, CellType, Cells, DataUsage, DeviceInfo,
    InterfaceTraffic, LteStatus, StatusReport, UsedData,
};
use fastmile_scraper::{ScrapeError, ScraperConfig, StatusSession};
use pretty_assertions::assert_eq;

fn used(value: f64, unit: &str) -> Option<UsedData> {
    Some(UsedData {
        value,
        unit: unit.to_string(),
    })
}

fn session(path: &str) -> StatusSession {
    let mut session = StatusSession::new(ScraperConfig::default());
    session.load_file(path).expect("Invalid file path");
    session
}

#[test]
fn test_minimal_page_report() {
    let report = session("tests/htmls/minimal.html")
        .report()
        .expect("Report should be extracted");

    let expected = StatusReport {
        info: DeviceInfo {
            model: "FastMile 4G Gateway".to_string(),
            sw_version: "FM4G_19.03.01".to_string(),
            serial_number: "ALCLB0000001".to_string(),
            imei: "356000000000001".to_string(),
            imsi: "232010000000001".to_string(),
            mac: "00:11:22:33:44:55".to_string(),
            lock_status: "Locked".to_string(),
        },
        apns: vec![ApnRecord {
            name: "internet".to_string(),
            ipv4: Some("10.0.0.5".to_string()),
            ipv6: None,
        }],
        data: DataUsage {
            eth: InterfaceTraffic {
                download: used(1.0, "GB"),
                upload: used(2.0, "MB"),
            },
            lte: InterfaceTraffic {
                download: used(3.0, "GB"),
                upload: used(4.0, "MB"),
            },
        },
        lte: LteStatus {
            ca: CarrierAggregationInfo {
                enb: Some(100),
                cid: Some(5),
                dl_bands: vec![Some(3)],
                ul_bands: vec![Some(3)],
            },
            cells: Cells {
                active: vec![CellRecord {
                    pci: Some(104),
                    earfcn: Some(1300),
                    rsrp: Some(-95),
                    rsrq: Some(-10),
                    rssi: Some(-65),
                    sinr: Some(12),
                    cell_type: CellType::Primary,
                }],
                available: vec![],
            },
        },
    };
    assert_eq!(report, expected);
}

#[test]
fn test_minimal_page_json() {
    let report = session("tests/htmls/minimal.html").report().unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let keys = |v: &serde_json::Value| {
        v.as_object()
            .map(|o| o.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default()
    };
    assert_eq!(keys(&json), vec!["apns", "data", "info", "lte"]);
    assert_eq!(keys(&json["data"]), vec!["eth", "lte"]);
    assert_eq!(keys(&json["lte"]), vec!["ca", "cells"]);
    assert_eq!(keys(&json["lte"]["cells"]), vec!["active", "available"]);
    assert_eq!(
        json["lte"]["cells"]["active"][0],
        serde_json::json!({
            "pci": 104,
            "earfcn": 1300,
            "rsrp": -95,
            "rsrq": -10,
            "rssi": -65,
            "sinr": 12,
            "type": "primary"
        })
    );
}

#[test]
fn test_extractors_are_independent() {
    let session = session("tests/htmls/status.html");

    assert_eq!(session.secondary_cells().unwrap().len(), 2);
    assert_eq!(session.primary_cell().unwrap().pci, Some(104));
    assert_eq!(session.available_cells().unwrap().len(), 2);
    assert_eq!(session.apns().unwrap().len(), 2);
    assert_eq!(session.carrier_aggregation().unwrap().ul_bands, vec![Some(3)]);
    assert_eq!(
        session.interface_traffic("Ethernet").unwrap(),
        session.ethernet_traffic().unwrap()
    );
    assert_eq!(session.device_info().unwrap().imei, "356123456789012");
}

#[test]
fn test_foreign_page_fails() {
    let mut session = StatusSession::new(ScraperConfig::default());
    session.load_html("<html><body><h1>Login</h1></body></html>");

    assert!(matches!(
        session.report(),
        Err(ScrapeError::StructureMismatch { .. })
    ));
    assert!(matches!(session.apns(), Err(ScrapeError::NotFound(_))));
}
