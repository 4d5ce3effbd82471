//! Table and summary rendering for listings, exchanges and statistics.

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::{Exchange, Listing, Statistics};

/// One row of the listings table.
#[derive(Tabled)]
pub struct ListingRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Symbol")]
    pub symbol: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Exchange")]
    pub exchange: String,
    #[tabled(rename = "Type")]
    pub security_type: String,
    #[tabled(rename = "Lot")]
    pub lot_size: i64,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        Self {
            date: listing.listing_date.format("%Y-%m-%d").to_string(),
            symbol: listing.symbol.clone(),
            name: truncate(&listing.name, 40),
            exchange: listing.exchange_code.clone(),
            security_type: listing.security_type.clone(),
            lot_size: listing.lot_size,
        }
    }
}

#[derive(Tabled)]
struct ExchangeRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Listings")]
    count: u64,
}

/// Listings newest first, capped at `rows`.
#[must_use]
pub fn listing_rows(listings: &[Listing], rows: usize) -> Vec<ListingRow> {
    let mut sorted: Vec<&Listing> = listings.iter().collect();
    sorted.sort_by(|a, b| b.listing_date.cmp(&a.listing_date));
    sorted.into_iter().take(rows).map(ListingRow::from).collect()
}

/// Print the listings table, newest first.
pub fn print_listings(listings: &[Listing], rows: usize) {
    if listings.is_empty() {
        output::note("No listings for this filter");
        return;
    }

    output::lines(&Table::new(listing_rows(listings, rows)).to_string());
    if listings.len() > rows {
        output::hint(&format!(
            "showing {rows} of {} (use --rows to see more)",
            listings.len()
        ));
    }
}

pub fn print_exchanges(exchanges: &[Exchange]) {
    if exchanges.is_empty() {
        output::note("No exchanges configured on the server");
        return;
    }

    let rows: Vec<ExchangeRow> = exchanges
        .iter()
        .map(|exchange| ExchangeRow {
            code: exchange.code.clone(),
            name: exchange.name.clone(),
            url: exchange.url.clone(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
}

/// Print a statistics summary followed by its breakdowns.
///
/// Days without listings are left out of the per-day table.
pub fn print_statistics(statistics: &Statistics, days: u32) {
    output::section(&format!("Last {days} days"));
    output::field("Listings", output::highlight(statistics.total));
    output::field("All time", statistics.total_all_time);
    if let Some(peak) = statistics.peak_day() {
        output::field("Peak day", format!("{} ({})", peak.date, peak.count));
    }

    if !statistics.exchange_stats.is_empty() {
        output::section("By exchange");
        let rows: Vec<CountRow> = statistics
            .exchange_stats
            .iter()
            .map(|total| CountRow {
                key: format!("{} ({})", total.name, total.code),
                count: total.total_listings,
            })
            .collect();
        output::lines(&Table::new(rows).to_string());
    }

    if !statistics.security_types.is_empty() {
        output::section("By security type");
        let rows: Vec<CountRow> = statistics
            .security_types
            .iter()
            .map(|(key, count)| CountRow {
                key: key.clone(),
                count: *count,
            })
            .collect();
        output::lines(&Table::new(rows).to_string());
    }

    let days_with_listings: Vec<CountRow> = statistics
        .daily_stats
        .iter()
        .filter(|day| day.count > 0)
        .map(|day| CountRow {
            key: day.date.clone(),
            count: day.count,
        })
        .collect();
    if !days_with_listings.is_empty() {
        output::section("By day");
        output::lines(&Table::new(days_with_listings).to_string());
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
