//! Mandi price table
//!
//! Loads the commodity price CSV once at startup and answers
//! (commodity, district) lookups against it.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{normalize_lookup_key, PriceRecord};
use thiserror::Error;

const COMMODITY_COLUMN: &str = "Commodity";
const DISTRICT_COLUMN: &str = "District";
const MODAL_PRICE_COLUMN: &str = "Modal_Price";
const STATE_COLUMN: &str = "State";
const MARKET_COLUMN: &str = "Market";
const ARRIVAL_DATE_COLUMN: &str = "Arrival_Date";

const ARRIVAL_DATE_FORMAT: &str = "%d/%m/%Y";

/// Errors raised while loading the price table
#[derive(Error, Debug)]
pub enum PriceTableError {
    #[error("Price table not found: {0}")]
    NotFound(String),

    #[error("Failed to read price table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed price table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Price table is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Column positions resolved from the CSV header
struct Columns {
    commodity: usize,
    district: usize,
    modal_price: usize,
    state: Option<usize>,
    market: Option<usize>,
    arrival_date: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, PriceTableError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require =
            |name: &'static str| find(name).ok_or(PriceTableError::MissingColumn(name));

        Ok(Self {
            commodity: require(COMMODITY_COLUMN)?,
            district: require(DISTRICT_COLUMN)?,
            modal_price: require(MODAL_PRICE_COLUMN)?,
            state: find(STATE_COLUMN),
            market: find(MARKET_COLUMN),
            arrival_date: find(ARRIVAL_DATE_COLUMN),
        })
    }
}

/// Immutable, in-memory commodity price table
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    records: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    /// Load the table from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PriceTableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PriceTableError::NotFound(path.display().to_string()),
            _ => PriceTableError::Io(e),
        })?;
        Self::from_reader(file)
    }

    /// Parse the table from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PriceTableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);
        let columns = Columns::resolve(rdr.headers()?)?;

        let mut records = Vec::new();
        for (line, row) in rdr.records().enumerate() {
            let row = row?;
            match parse_row(&row, &columns) {
                Some(record) => records.push(record),
                None => tracing::warn!(
                    row = line + 2,
                    "Skipping price row without a usable modal price"
                ),
            }
        }

        tracing::debug!(records = records.len(), "Price table parsed");
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest price row for a commodity in a district.
    ///
    /// Both keys are trimmed and title-cased before matching. When several
    /// rows match, the last one in table order wins.
    pub fn lookup(&self, commodity: &str, district: &str) -> Option<&PriceRecord> {
        let commodity = normalize_lookup_key(commodity);
        let district = normalize_lookup_key(district);
        self.records
            .iter()
            .rev()
            .find(|r| r.commodity == commodity && r.district == district)
    }
}

fn parse_row(row: &csv::StringRecord, columns: &Columns) -> Option<PriceRecord> {
    let optional = |idx: Option<usize>| {
        idx.and_then(|i| row.get(i))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let modal_price = Decimal::from_str(row.get(columns.modal_price)?).ok()?;

    Some(PriceRecord {
        commodity: normalize_lookup_key(row.get(columns.commodity)?),
        district: normalize_lookup_key(row.get(columns.district)?),
        state: optional(columns.state),
        market: optional(columns.market),
        arrival_date: optional(columns.arrival_date)
            .and_then(|d| NaiveDate::parse_from_str(&d, ARRIVAL_DATE_FORMAT).ok()),
        modal_price_per_quintal: modal_price,
    })
}

/// Result of a price lookup against a possibly missing table
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLookup<'a> {
    Found(&'a PriceRecord),
    NotFound,
    TableMissing,
}

/// Look up a price when the table itself may have failed to load
pub fn lookup_price<'a>(
    table: Option<&'a PriceTable>,
    commodity: &str,
    district: &str,
) -> PriceLookup<'a> {
    match table {
        None => PriceLookup::TableMissing,
        Some(table) => table
            .lookup(commodity, district)
            .map_or(PriceLookup::NotFound, PriceLookup::Found),
    }
}
