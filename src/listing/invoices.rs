use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::{Query, collate};
use crate::error::ParseError;
use crate::models::{Invoice, InvoiceStatus};

/// Status dropdown of the invoice list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: InvoiceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<InvoiceStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| ParseError::UnknownStatusFilter(s.to_string()))
    }
}

/// Column the invoice list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Client,
    Amount,
    Date,
    DueDate,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Client => "client",
            SortField::Amount => "amount",
            SortField::Date => "date",
            SortField::DueDate => "dueDate",
        }
    }

    /// Ascending comparison of two invoices on this field
    fn compare(&self, a: &Invoice, b: &Invoice) -> Ordering {
        match self {
            SortField::Id => collate(&a.id, &b.id),
            SortField::Client => collate(&a.client, &b.client),
            // amounts are finite once loaded, so -0.0 and 0.0 tie
            SortField::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
            // ISO dates: chronological order is their string order
            SortField::Date => a.date.cmp(&b.date),
            SortField::DueDate => a.due_date.cmp(&b.due_date),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "client" => Ok(SortField::Client),
            "amount" => Ok(SortField::Amount),
            "date" => Ok(SortField::Date),
            "dueDate" | "due-date" | "due_date" => Ok(SortField::DueDate),
            _ => Err(ParseError::UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.pad("asc"),
            SortDirection::Desc => f.pad("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ParseError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Sort column and direction of the invoice list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// State after the user picks `field`: picking the active column flips
    /// the direction, picking another column sorts it ascending.
    pub fn select(self, field: SortField) -> Self {
        if field == self.field {
            Self::new(field, self.direction.toggled())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }

    fn compare(&self, a: &Invoice, b: &Invoice) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl Default for SortState {
    /// Newest invoices first
    fn default() -> Self {
        Self::new(SortField::Date, SortDirection::Desc)
    }
}

/// Invoices whose id or client contains `query` and whose status passes
/// `status`, in input order.
pub fn filter(invoices: &[Invoice], query: &str, status: StatusFilter) -> Vec<Invoice> {
    let query = Query::new(query);
    let filtered: Vec<Invoice> = invoices
        .iter()
        .filter(|invoice| query.matches_any(&[invoice.id.as_str(), invoice.client.as_str()]))
        .filter(|invoice| status.matches(invoice.status))
        .cloned()
        .collect();

    debug!(
        total = invoices.len(),
        kept = filtered.len(),
        ?status,
        "filtered invoices"
    );
    filtered
}

/// Stable sort: invoices with equal keys keep their relative order.
pub fn sort(invoices: &[Invoice], state: SortState) -> Vec<Invoice> {
    let mut sorted = invoices.to_vec();
    sorted.sort_by(|a, b| state.compare(a, b));
    sorted
}

/// Filter, then sort
pub fn process(
    invoices: &[Invoice],
    query: &str,
    status: StatusFilter,
    state: SortState,
) -> Vec<Invoice> {
    sort(&filter(invoices, query, status), state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn invoice(id: &str, client: &str, amount: f64, status: InvoiceStatus) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
        Invoice {
            id: id.to_string(),
            client: client.to_string(),
            amount,
            status,
            date,
            due_date: date,
        }
    }

    fn ids(invoices: &[Invoice]) -> Vec<&str> {
        invoices.iter().map(|invoice| invoice.id.as_str()).collect()
    }

    #[test]
    fn query_matches_client_or_id() {
        let invoices = Dataset::sample().invoices;

        let acme = filter(&invoices, "acme", StatusFilter::All);
        assert_eq!(ids(&acme), vec!["INV-2023-001", "INV-2023-005"]);

        let by_id = filter(&invoices, "inv-2023-00", StatusFilter::All);
        assert_eq!(by_id.len(), invoices.len());

        let single = filter(&invoices, "003", StatusFilter::All);
        assert_eq!(ids(&single), vec!["INV-2023-003"]);
    }

    #[test]
    fn status_filter_uses_exact_status() {
        let invoices = Dataset::sample().invoices;

        let paid = filter(&invoices, "", "paid".parse().unwrap());
        assert_eq!(ids(&paid), vec!["INV-2023-001"]);

        let due = filter(&invoices, "", "DUE".parse().unwrap());
        assert_eq!(ids(&due), vec!["INV-2023-002", "INV-2023-005", "INV-2023-006"]);
    }

    #[test]
    fn query_and_status_must_both_match() {
        let invoices = Dataset::sample().invoices;
        let found = filter(&invoices, "techstart", StatusFilter::Only(InvoiceStatus::Due));
        assert_eq!(ids(&found), vec!["INV-2023-006"]);

        let none = filter(&invoices, "acme", StatusFilter::Only(InvoiceStatus::Draft));
        assert!(none.is_empty());
    }

    #[test]
    fn status_filter_rejects_unknown_values() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "pending".parse::<StatusFilter>(),
            Err(ParseError::UnknownStatusFilter("pending".to_string()))
        );
    }

    #[test]
    fn sort_field_names() {
        assert_eq!("dueDate".parse::<SortField>(), Ok(SortField::DueDate));
        assert_eq!("due-date".parse::<SortField>(), Ok(SortField::DueDate));
        assert_eq!(
            "total".parse::<SortField>(),
            Err(ParseError::UnknownSortField("total".to_string()))
        );
        assert_eq!(SortField::DueDate.to_string(), "dueDate");
    }

    #[test]
    fn default_sort_is_newest_first() {
        let sorted = sort(&Dataset::sample().invoices, SortState::default());
        assert_eq!(sorted[0].id, "INV-2023-007");
        assert_eq!(sorted.last().unwrap().id, "INV-2023-003");
    }

    #[test]
    fn select_toggles_or_resets() {
        let state = SortState::default();

        let flipped = state.select(SortField::Date);
        assert_eq!(flipped, SortState::new(SortField::Date, SortDirection::Asc));
        assert_eq!(flipped.select(SortField::Date), state);

        let by_amount = flipped.select(SortField::Amount);
        assert_eq!(by_amount, SortState::new(SortField::Amount, SortDirection::Asc));

        let desc = SortState::new(SortField::Client, SortDirection::Desc);
        assert_eq!(desc.select(SortField::Id).direction, SortDirection::Asc);
    }

    #[test]
    fn amount_sort_is_numeric() {
        let invoices = vec![
            invoice("a", "x", 900.0, InvoiceStatus::Due),
            invoice("b", "x", 10000.0, InvoiceStatus::Due),
            invoice("c", "x", 85.5, InvoiceStatus::Due),
        ];
        let sorted = sort(&invoices, SortState::new(SortField::Amount, SortDirection::Asc));
        assert_eq!(ids(&sorted), vec!["c", "a", "b"]);
    }

    #[test]
    fn client_sort_ignores_case() {
        let invoices = vec![
            invoice("1", "globex", 1.0, InvoiceStatus::Due),
            invoice("2", "Acme", 1.0, InvoiceStatus::Due),
            invoice("3", "Beta", 1.0, InvoiceStatus::Due),
        ];
        let sorted = sort(&invoices, SortState::new(SortField::Client, SortDirection::Asc));
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn client_sort_files_accents_with_their_letter() {
        let invoices = vec![
            invoice("1", "Zenith Labs", 1.0, InvoiceStatus::Due),
            invoice("2", "Émile & Co", 1.0, InvoiceStatus::Due),
            invoice("3", "acme", 1.0, InvoiceStatus::Due),
            invoice("4", "Evergreen", 1.0, InvoiceStatus::Due),
        ];
        let sorted = sort(&invoices, SortState::new(SortField::Client, SortDirection::Asc));
        assert_eq!(ids(&sorted), vec!["3", "2", "4", "1"]);
    }

    #[test]
    fn signed_zero_amounts_tie() {
        let invoices = vec![
            invoice("a", "x", 0.0, InvoiceStatus::Draft),
            invoice("b", "x", -0.0, InvoiceStatus::Draft),
            invoice("c", "x", -5.0, InvoiceStatus::Draft),
        ];
        let asc = sort(&invoices, SortState::new(SortField::Amount, SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["c", "a", "b"]);

        let desc = sort(&invoices, SortState::new(SortField::Amount, SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_amounts_keep_input_order() {
        let invoices = Dataset::sample().invoices;

        let asc = sort(&invoices, SortState::new(SortField::Amount, SortDirection::Asc));
        let pos = |list: &[Invoice], id: &str| list.iter().position(|i| i.id == id).unwrap();
        // 002 and 006 are both 1800
        assert!(pos(&asc, "INV-2023-002") < pos(&asc, "INV-2023-006"));

        let desc = sort(&invoices, SortState::new(SortField::Amount, SortDirection::Desc));
        assert!(pos(&desc, "INV-2023-002") < pos(&desc, "INV-2023-006"));
    }

    #[test]
    fn process_filters_then_sorts() {
        let invoices = Dataset::sample().invoices;
        let state = SortState::new(SortField::Amount, SortDirection::Desc);
        let result = process(&invoices, "", StatusFilter::Only(InvoiceStatus::Due), state);
        assert_eq!(ids(&result), vec!["INV-2023-005", "INV-2023-002", "INV-2023-006"]);
    }

    fn arb_invoices() -> impl Strategy<Value = Vec<Invoice>> {
        let status = prop::sample::select(InvoiceStatus::ALL.to_vec());
        let row = ("[A-Z]{1,3}", "[a-zA-Z ]{0,8}", 0u32..50, status);
        prop::collection::vec(row, 0..25).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(n, (prefix, client, amount, status))| {
                    invoice(&format!("{prefix}-{n}"), &client, amount as f64 * 100.0, status)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn amount_sort_is_monotone_and_idempotent(invoices in arb_invoices()) {
            let asc = SortState::new(SortField::Amount, SortDirection::Asc);
            let sorted = sort(&invoices, asc);
            prop_assert!(sorted.windows(2).all(|w| w[0].amount <= w[1].amount));
            prop_assert_eq!(&sort(&sorted, asc), &sorted);

            let desc = SortState::new(SortField::Amount, SortDirection::Desc);
            let sorted = sort(&invoices, desc);
            prop_assert!(sorted.windows(2).all(|w| w[0].amount >= w[1].amount));
            prop_assert_eq!(&sort(&sorted, desc), &sorted);
        }

        #[test]
        fn amount_sort_is_stable(invoices in arb_invoices()) {
            let sorted = sort(&invoices, SortState::new(SortField::Amount, SortDirection::Asc));
            let position = |id: &str| invoices.iter().position(|i| i.id == id).unwrap();
            for pair in sorted.windows(2) {
                if pair[0].amount == pair[1].amount {
                    prop_assert!(position(&pair[0].id) < position(&pair[1].id));
                }
            }
        }

        #[test]
        fn filter_keeps_only_matches(invoices in arb_invoices(), needle in "[a-z]{0,2}") {
            let kept = filter(&invoices, &needle, StatusFilter::Only(InvoiceStatus::Paid));
            for invoice in &kept {
                prop_assert_eq!(invoice.status, InvoiceStatus::Paid);
                prop_assert!(
                    invoice.id.to_lowercase().contains(&needle)
                        || invoice.client.to_lowercase().contains(&needle)
                );
            }
            let expected = invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Paid)
                .filter(|i| {
                    i.id.to_lowercase().contains(&needle) || i.client.to_lowercase().contains(&needle)
                })
                .count();
            prop_assert_eq!(kept.len(), expected);
        }
    }
}
