//! Revenue reports: income over time, revenue per client and the status mix.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use tracing::debug;

use crate::error::ParseError;
use crate::listing::collate;
use crate::models::{Invoice, InvoiceStatus};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Label used for the clients folded together below the top entries
pub const OTHER_CLIENTS: &str = "Other Clients";

/// Granularity of the income report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Monthly,
    Quarterly,
    #[default]
    Yearly,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Monthly => "monthly",
            TimeRange::Quarterly => "quarterly",
            TimeRange::Yearly => "yearly",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(TimeRange::Monthly),
            "quarterly" => Ok(TimeRange::Quarterly),
            "yearly" => Ok(TimeRange::Yearly),
            _ => Err(ParseError::UnknownTimeRange(s.to_string())),
        }
    }
}

/// One bar or slice of a report
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub amount: f64,
}

impl Bucket {
    fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Drafts have not been sent, so they are not revenue
fn billed(invoices: &[Invoice]) -> impl Iterator<Item = &Invoice> {
    invoices
        .iter()
        .filter(|invoice| invoice.status != InvoiceStatus::Draft)
}

/// Year of the most recently issued invoice
pub fn latest_year(invoices: &[Invoice]) -> Option<i32> {
    invoices.iter().map(|invoice| invoice.date.year()).max()
}

/// Billed amounts bucketed by issue date.
///
/// `Monthly` gives Jan to Dec of `year` and `Quarterly` gives Q1 to Q4 of
/// `year`, with empty periods kept at zero. `Yearly` ignores `year` and gives
/// one bucket per year that has billed invoices, oldest first.
pub fn income_by_period(invoices: &[Invoice], year: i32, range: TimeRange) -> Vec<Bucket> {
    match range {
        TimeRange::Monthly => {
            let mut totals = [0.0; 12];
            for invoice in billed(invoices).filter(|invoice| invoice.date.year() == year) {
                totals[invoice.date.month0() as usize] += invoice.amount;
            }
            MONTHS
                .iter()
                .zip(totals)
                .map(|(month, amount)| Bucket::new(*month, amount))
                .collect()
        }
        TimeRange::Quarterly => {
            let mut totals = [0.0; 4];
            for invoice in billed(invoices).filter(|invoice| invoice.date.year() == year) {
                totals[(invoice.date.month0() / 3) as usize] += invoice.amount;
            }
            totals
                .into_iter()
                .enumerate()
                .map(|(quarter, amount)| Bucket::new(format!("Q{}", quarter + 1), amount))
                .collect()
        }
        TimeRange::Yearly => {
            let mut years: Vec<(i32, f64)> = Vec::new();
            for invoice in billed(invoices) {
                let year = invoice.date.year();
                match years.iter_mut().find(|(seen, _)| *seen == year) {
                    Some((_, total)) => *total += invoice.amount,
                    None => years.push((year, invoice.amount)),
                }
            }
            years.sort_by_key(|(year, _)| *year);
            years
                .into_iter()
                .map(|(year, amount)| Bucket::new(year.to_string(), amount))
                .collect()
        }
    }
}

/// Billed revenue per client, largest first.
///
/// The first `top` clients are listed by name; the rest are summed into a
/// single [`OTHER_CLIENTS`] bucket, which is left out when nothing remains.
pub fn revenue_by_client(invoices: &[Invoice], top: usize) -> Vec<Bucket> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for invoice in billed(invoices) {
        *totals.entry(invoice.client.as_str()).or_default() += invoice.amount;
    }

    let mut ranked: Vec<Bucket> = totals
        .into_iter()
        .map(|(client, amount)| Bucket::new(client, amount))
        .collect();
    ranked.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| collate(&a.label, &b.label))
    });

    debug!(clients = ranked.len(), top, "ranked client revenue");

    if ranked.len() > top {
        let rest: f64 = ranked.drain(top..).map(|bucket| bucket.amount).sum();
        ranked.push(Bucket::new(OTHER_CLIENTS, rest));
    }
    ranked
}

/// Number of invoices in each status, in [`InvoiceStatus::ALL`] order
pub fn status_breakdown(invoices: &[Invoice]) -> Vec<(InvoiceStatus, usize)> {
    InvoiceStatus::ALL
        .into_iter()
        .map(|status| {
            let count = invoices
                .iter()
                .filter(|invoice| invoice.status == status)
                .count();
            (status, count)
        })
        .collect()
}
