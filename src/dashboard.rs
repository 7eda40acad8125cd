use chrono::NaiveDate;

use crate::listing::invoices::{SortDirection, SortField, SortState, sort};
use crate::models::{Invoice, InvoiceStatus};

/// Headline figures shown on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_invoiced: f64,
    pub paid: f64,
    /// Due plus overdue
    pub outstanding: f64,
    pub overdue_count: usize,
    pub draft_count: usize,
}

impl Summary {
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        let sum_where = |wanted: &[InvoiceStatus]| -> f64 {
            invoices
                .iter()
                .filter(|invoice| wanted.contains(&invoice.status))
                .map(|invoice| invoice.amount)
                .sum()
        };
        let count_where = |wanted: InvoiceStatus| {
            invoices
                .iter()
                .filter(|invoice| invoice.status == wanted)
                .count()
        };

        Self {
            total_invoiced: invoices.iter().map(|invoice| invoice.amount).sum(),
            paid: sum_where(&[InvoiceStatus::Paid]),
            outstanding: sum_where(&[InvoiceStatus::Due, InvoiceStatus::Overdue]),
            overdue_count: count_where(InvoiceStatus::Overdue),
            draft_count: count_where(InvoiceStatus::Draft),
        }
    }
}

/// The `n` most recently issued invoices
pub fn recent(invoices: &[Invoice], n: usize) -> Vec<Invoice> {
    let mut sorted = sort(invoices, SortState::new(SortField::Date, SortDirection::Desc));
    sorted.truncate(n);
    sorted
}

/// Due invoices that fall due on or after `today`, soonest first
pub fn upcoming(invoices: &[Invoice], today: NaiveDate, n: usize) -> Vec<Invoice> {
    let pending: Vec<Invoice> = invoices
        .iter()
        .filter(|invoice| invoice.status == InvoiceStatus::Due && invoice.due_date >= today)
        .cloned()
        .collect();

    let mut sorted = sort(&pending, SortState::new(SortField::DueDate, SortDirection::Asc));
    sorted.truncate(n);
    sorted
}
