//! Builders for domain values used across tests.
//!
//! Concise factories so tests focus on assertions rather than construction
//! boilerplate.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{DailyCount, Exchange, ExchangeTotal, Listing, Statistics, DATE_FORMAT};

fn midnight(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .expect("valid test date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

/// A NASDAQ equity listing with the given id, symbol and listing date.
pub fn listing(id: i64, symbol: &str, date: &str) -> Listing {
    Listing {
        id,
        name: format!("{symbol} Holdings"),
        symbol: symbol.to_string(),
        listing_date: midnight(date),
        lot_size: 100,
        status: "New Listing".to_string(),
        exchange_id: Some(1),
        exchange_code: "NASDAQ".to_string(),
        url: None,
        listing_detail_url: None,
        security_type: "Equity".to_string(),
        created_at: None,
        updated_at: None,
    }
}

/// `n` distinct listings `L0..L{n-1}` on consecutive January days.
pub fn listings(n: usize) -> Vec<Listing> {
    (0..n)
        .map(|i| {
            let day = (i % 28) + 1;
            listing(i as i64, &format!("L{i}"), &format!("2024-01-{day:02}"))
        })
        .collect()
}

/// An exchange with the given id and code.
pub fn exchange(id: i64, code: &str) -> Exchange {
    Exchange {
        id,
        name: format!("{code} Exchange"),
        code: code.to_string(),
        url: format!("https://{}.example/listings", code.to_lowercase()),
        description: None,
    }
}

/// The three exchanges the scanner ships with.
pub fn exchanges() -> Vec<Exchange> {
    vec![exchange(1, "NASDAQ"), exchange(2, "HKEX"), exchange(3, "FSE")]
}

/// A small statistics snapshot with `total` listings on one day.
pub fn statistics(total: u64) -> Statistics {
    Statistics {
        total,
        total_all_time: total * 10,
        statuses: [("New Listing".to_string(), total)].into_iter().collect(),
        security_types: [("Equity".to_string(), total)].into_iter().collect(),
        daily_stats: vec![DailyCount {
            date: "2024-01-02".to_string(),
            count: total,
        }],
        exchange_stats: vec![ExchangeTotal {
            code: "NASDAQ".to_string(),
            name: "NASDAQ Exchange".to_string(),
            total_listings: total,
        }],
    }
}
