//! Price table tests
//!
//! Covers:
//! - Loading from disk, including a missing file
//! - Key normalization (trim + title case) on both sides
//! - Last-row-wins among duplicate rows
//! - Per-kg derivation from the quintal price

use std::io::Write;

use farm_advisor::services::{PriceTable, PriceTableError};
use proptest::prelude::*;
use rust_decimal::Decimal;

const HEADER: &str =
    "State,District,Market,Commodity,Variety,Grade,Arrival_Date,Min_Price,Max_Price,Modal_Price";

fn csv_with_rows(rows: &[(&str, &str, i64)]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for (commodity, district, price) in rows {
        out.push_str(&format!(
            "Karnataka,{},Market,{},Local,FAQ,03/10/2024,0,0,{}\n",
            district, commodity, price
        ));
    }
    out
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("farm-advisor-prices-{}.csv", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(csv_with_rows(&[("Ragi", "Tumkur", 3846)]).as_bytes())
            .unwrap();
    }

    let table = PriceTable::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(table.len(), 1);
    let record = table.lookup("ragi", "TUMKUR").unwrap();
    assert_eq!(record.modal_price_per_quintal, Decimal::from(3846));
    assert_eq!(record.modal_price_per_kg(), Decimal::new(3846, 2));
    assert_eq!(record.state.as_deref(), Some("Karnataka"));
}

#[test]
fn test_missing_file_is_not_found() {
    let err = PriceTable::load("definitely/missing/latest_stock_data.csv").unwrap_err();
    assert!(matches!(err, PriceTableError::NotFound(_)));
}

#[test]
fn test_header_only_table_is_empty() {
    let table = PriceTable::from_reader(format!("{}\n", HEADER).as_bytes()).unwrap();
    assert!(table.is_empty());
    assert!(table.lookup("Cotton", "Guntur").is_none());
}

#[test]
fn test_multiword_names() {
    let csv = csv_with_rows(&[("green gram(moong)", "east godavari", 7200)]);
    let table = PriceTable::from_reader(csv.as_bytes()).unwrap();
    assert!(table.lookup("Green Gram(Moong)", "East Godavari").is_some());
    assert!(table.lookup("  GREEN GRAM(MOONG) ", "east GODAVARI").is_some());
}

// ============================================================================
// Property Tests
// ============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,10}( [a-z]{3,8})?"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The last matching row in table order is returned
    #[test]
    fn prop_last_row_wins(
        commodity in name_strategy(),
        district in name_strategy(),
        prices in proptest::collection::vec(1i64..20_000, 1..6),
    ) {
        let rows: Vec<(&str, &str, i64)> = prices
            .iter()
            .map(|p| (commodity.as_str(), district.as_str(), *p))
            .collect();
        let table = PriceTable::from_reader(csv_with_rows(&rows).as_bytes()).unwrap();

        let record = table.lookup(&commodity.to_uppercase(), &format!(" {} ", district)).unwrap();
        prop_assert_eq!(record.modal_price_per_quintal, Decimal::from(*prices.last().unwrap()));
    }

    /// Per-kg price is exactly the quintal price divided by 100
    #[test]
    fn prop_per_kg_derivation(price in 0i64..10_000_000, scale in 0u32..3) {
        let quintal = Decimal::new(price, scale);
        let csv = format!(
            "{}\nKerala,Idukki,Kattappana,Cardamoms,Small,FAQ,,0,0,{}\n",
            HEADER, quintal
        );
        let table = PriceTable::from_reader(csv.as_bytes()).unwrap();
        let record = table.lookup("cardamoms", "idukki").unwrap();
        prop_assert_eq!(record.modal_price_per_kg() * Decimal::from(100), quintal);
        prop_assert_eq!(record.modal_price_per_kg(), quintal / Decimal::from(100));
    }
}
