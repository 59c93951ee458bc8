use crate::fastmile::{
    ApnRecord, AvailableCellRecord, CarrierAggregationInfo, CellRecord, CellType, Cells,
    DataUsage, DeviceInfo, InterfaceTraffic, LteStatus, StatusReport,
};
use crate::page::{element_text, Anchor, StatusPage};
use crate::parse::{parse_band_list, parse_int, parse_ip, parse_used_data};
use crate::{ScrapeError, Scraper};
use itertools::Itertools;
use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};
use tracing::{debug, warn};

/// Upper bound for the `available-cell-id-{n}` probe.
pub const MAX_AVAILABLE_CELLS: usize = 64;

const CELL_GROUP: usize = 7;
const APN_HEADER_ELEMENTS: usize = 2;
const CARD_VALUE_CLASS: &str = "name-of-value-in-card-bold";
const BYTES_CLASS: &str = "bytes";
const SINGLE_AVAILABLE_CELL_ID: &str = "available-cell-id";
const ATTACHED_CELL_ID: &str = "attached-cell-val";
const BAND_DL_ID: &str = "bandDL-val";
const BAND_UL_ID: &str = "bandUL-val";

const E: &str = "Invalid selector";
lazy_static! {
    static ref SPAN: Selector = Selector::parse("span").expect(E);
    static ref DIV_WITHOUT_ID: Selector = Selector::parse("div:not([id])").expect(E);
}

fn text_int(el: ElementRef<'_>) -> Option<i64> {
    parse_int(&element_text(el))
}

fn id_int(page: &StatusPage, id: &str) -> Option<i64> {
    page.find_id(id).and_then(text_int)
}

pub fn device_info(page: &StatusPage) -> Result<DeviceInfo, ScrapeError> {
    let field = |id: &str| {
        page.find_id(id)
            .map(element_text)
            .ok_or_else(|| ScrapeError::StructureMismatch {
                context: format!("device info field {:?}", id),
                expected: 1,
                found: 0,
            })
    };

    Ok(DeviceInfo {
        model: field("model-value")?,
        sw_version: field("software-version-val")?,
        serial_number: field("sn-value")?,
        imei: field("imei-value")?,
        imsi: field("imsi-name-value")?,
        mac: field("eth-mac-value")?,
        lock_status: field("lockStatus-name-value")?,
    })
}

/// Download and upload counters of the card whose class is `name`.
pub fn interface_traffic(page: &StatusPage, name: &str) -> Result<InterfaceTraffic, ScrapeError> {
    let card = page.by_class(name, None)?;
    let counters = page.all_by_class(BYTES_CLASS, Some(card));

    match counters.as_slice() {
        [download, upload, ..] => Ok(InterfaceTraffic {
            download: parse_used_data(&element_text(*download)),
            upload: parse_used_data(&element_text(*upload)),
        }),
        _ => Err(ScrapeError::StructureMismatch {
            context: format!("{} traffic counters", name),
            expected: 2,
            found: counters.len(),
        }),
    }
}

pub fn lte_traffic(page: &StatusPage) -> Result<InterfaceTraffic, ScrapeError> {
    interface_traffic(page, "LTE")
}

pub fn ethernet_traffic(page: &StatusPage) -> Result<InterfaceTraffic, ScrapeError> {
    interface_traffic(page, "Ethernet")
}

pub fn apns(page: &StatusPage) -> Result<Vec<ApnRecord>, ScrapeError> {
    let section = page.after_comment(Anchor::Apns)?;
    let values = section
        .select(&DIV_WITHOUT_ID)
        .skip(APN_HEADER_ELEMENTS)
        .map(element_text)
        .collect::<Vec<_>>();

    let dropped = values.len() % 3;
    if dropped > 0 {
        warn!(dropped, "Incomplete trailing APN entry ignored");
    }

    Ok(values
        .into_iter()
        .tuples()
        .map(|(name, ipv4, ipv6)| ApnRecord {
            name,
            ipv4: parse_ip(&ipv4),
            ipv6: parse_ip(&ipv6),
        })
        .collect())
}

fn card_values(page: &StatusPage, anchor: Anchor) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
    let section = page.after_comment(anchor)?;
    Ok(page.all_by_class(CARD_VALUE_CLASS, Some(section)))
}

/// One group of seven card values. The third value is not a signal metric.
fn cell_from_group(group: &[ElementRef<'_>], cell_type: CellType) -> CellRecord {
    let value = |i: usize| group.get(i).copied().and_then(text_int);
    CellRecord {
        pci: value(0),
        earfcn: value(1),
        rsrp: value(3),
        rsrq: value(4),
        rssi: value(5),
        sinr: value(6),
        cell_type,
    }
}

fn cells_from_values(values: &[ElementRef<'_>], cell_type: CellType) -> Vec<CellRecord> {
    let chunks = values.chunks_exact(CELL_GROUP);
    let dropped = chunks.remainder().len();
    if dropped > 0 {
        warn!(dropped, ?cell_type, "Incomplete trailing cell values ignored");
    }
    chunks
        .map(|group| cell_from_group(group, cell_type))
        .collect()
}

pub fn primary_cell(page: &StatusPage) -> Result<CellRecord, ScrapeError> {
    let values = card_values(page, Anchor::PrimaryCell)?;
    if values.len() < CELL_GROUP {
        return Err(ScrapeError::StructureMismatch {
            context: "primary cell card".to_string(),
            expected: CELL_GROUP,
            found: values.len(),
        });
    }
    Ok(cell_from_group(&values[..CELL_GROUP], CellType::Primary))
}

/// Secondary cells are only rendered under carrier aggregation, so a missing
/// card is an empty list.
pub fn secondary_cells(page: &StatusPage) -> Result<Vec<CellRecord>, ScrapeError> {
    match card_values(page, Anchor::SecondaryCell) {
        Ok(values) => Ok(cells_from_values(&values, CellType::Secondary)),
        Err(ScrapeError::NotFound(lookup)) => {
            debug!("No secondary cells: {}", lookup);
            Ok(vec![])
        }
        Err(e) => Err(e),
    }
}

/// Cells measured by the last scan. Pages using the single `available-cell-id`
/// layout report nothing here.
pub fn available_cells(page: &StatusPage) -> Result<Vec<AvailableCellRecord>, ScrapeError> {
    if page.find_id(SINGLE_AVAILABLE_CELL_ID).is_some() {
        debug!("Single available cell layout, skipping scan results");
        return Ok(vec![]);
    }

    let mut cells = vec![];
    for n in 0..MAX_AVAILABLE_CELLS {
        let Some(cell) = page.find_id(&format!("available-cell-id-{}", n)) else {
            break;
        };
        cells.push(AvailableCellRecord {
            pci: text_int(cell),
            earfcn: id_int(page, &format!("available-earfcn-{}", n)),
            rsrp: id_int(page, &format!("rsrp-{}", n)),
            rsrq: id_int(page, &format!("rsrq-{}", n)),
            rssi: id_int(page, &format!("rssi-{}", n)),
            sinr: id_int(page, &format!("sinr-{}", n)),
        });
    }

    if page
        .find_id(&format!("available-cell-id-{}", MAX_AVAILABLE_CELLS))
        .is_some()
    {
        warn!(
            limit = MAX_AVAILABLE_CELLS,
            "Available cell scan truncated"
        );
    }
    Ok(cells)
}

pub fn carrier_aggregation(page: &StatusPage) -> Result<CarrierAggregationInfo, ScrapeError> {
    let attached = page
        .by_id(ATTACHED_CELL_ID)?
        .select(&SPAN)
        .map(text_int)
        .collect::<Vec<_>>();

    let &[enb, cid, primary_band, ..] = attached.as_slice() else {
        return Err(ScrapeError::StructureMismatch {
            context: format!("{} spans", ATTACHED_CELL_ID),
            expected: 3,
            found: attached.len(),
        });
    };

    let extra_bands = |id: &str| -> Result<Vec<Option<i64>>, ScrapeError> {
        let text = element_text(page.by_id(id)?);
        let bands = parse_band_list(&text, id)?;
        Ok(std::iter::once(primary_band)
            .chain(bands.into_iter().map(Some))
            .collect())
    };

    Ok(CarrierAggregationInfo {
        enb,
        cid,
        dl_bands: extra_bands(BAND_DL_ID)?,
        ul_bands: extra_bands(BAND_UL_ID)?,
    })
}

#[derive(Debug)]
pub struct FastMileScraper;

impl Scraper for FastMileScraper {
    type Report = StatusReport;

    fn can_be_scraped(&self, page: &StatusPage) -> bool {
        page.find_id("model-value").is_some()
    }

    fn scrape(&self, page: &StatusPage) -> Result<StatusReport, ScrapeError> {
        let info = device_info(page)?;
        let apns = apns(page)?;
        let data = DataUsage {
            eth: ethernet_traffic(page)?,
            lte: lte_traffic(page)?,
        };
        let ca = carrier_aggregation(page)?;

        let mut active = secondary_cells(page)?;
        active.push(primary_cell(page)?);
        let available = available_cells(page)?;

        debug!(
            apns = apns.len(),
            active = active.len(),
            available = available.len(),
            "Scraped status page"
        );

        Ok(StatusReport {
            info,
            apns,
            data,
            lte: LteStatus {
                ca,
                cells: Cells { active, available },
            },
        })
    }
}
