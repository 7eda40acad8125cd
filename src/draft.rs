use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::calc;
use crate::error::ParseError;
use crate::models::{Invoice, InvoiceStatus, LineItem};

/// Suggest the next invoice number for `year`: `INV-<year>-<NNN>`, one past
/// the highest sequence already used that year.
pub fn next_invoice_number(year: i32, existing: &[Invoice]) -> String {
    let prefix = format!("INV-{}-", year);
    let highest = existing
        .iter()
        .filter_map(|invoice| invoice.id.strip_prefix(&prefix))
        .filter_map(|sequence| sequence.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    format!("{}{:03}", prefix, highest + 1)
}

/// An invoice being written, before it is added to the list
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    number: String,
    client: String,
    date: NaiveDate,
    due_date: NaiveDate,
    items: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Start a draft numbered after `existing`, due `due_in_days` after `date`
    pub fn new(client: &str, date: NaiveDate, due_in_days: u32, existing: &[Invoice]) -> Self {
        Self {
            number: next_invoice_number(date.year(), existing),
            client: client.trim().to_string(),
            date,
            due_date: date + Duration::days(i64::from(due_in_days)),
            items: Vec::new(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn set_due_date(&mut self, due_date: NaiveDate) {
        self.due_date = due_date;
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn push_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn total(&self) -> String {
        calc::compute_total(&self.items)
    }

    /// Validate the draft and turn it into a `Draft` invoice
    pub fn finish(self) -> Result<Invoice, ParseError> {
        if self.client.is_empty() {
            return Err(ParseError::IncompleteDraft("client is required"));
        }
        if self.items.is_empty() {
            return Err(ParseError::IncompleteDraft("at least one line item is required"));
        }
        if self.items.iter().any(|item| item.description.trim().is_empty()) {
            return Err(ParseError::IncompleteDraft("every line item needs a description"));
        }

        let amount = calc::parse_decimal(&self.total());
        debug!(number = %self.number, amount, items = self.items.len(), "finished invoice draft");

        Ok(Invoice {
            id: self.number,
            client: self.client,
            amount,
            status: InvoiceStatus::Draft,
            date: self.date,
            due_date: self.due_date,
        })
    }
}
