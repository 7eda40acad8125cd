use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{Client, Invoice, InvoiceStatus, Project, ProjectStatus};

/// Everything the dashboard lists
#[derive(Debug, Clone)]
pub struct Dataset {
    pub invoices: Vec<Invoice>,
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
}

impl Dataset {
    /// Load the sample dataset, taking invoices from the configured CSV file
    /// when one is set
    pub fn load(config: &Config) -> Result<Self> {
        let mut dataset = Self::sample();

        if let Some(path) = config.invoices_csv() {
            dataset.invoices = read_invoices_csv(path)?;
            info!(path, count = dataset.invoices.len(), "loaded invoices from csv");
        } else {
            debug!("using sample invoices");
        }

        Ok(dataset)
    }

    /// Built-in demo data
    pub fn sample() -> Self {
        Self {
            invoices: sample_invoices(),
            clients: sample_clients(),
            projects: sample_projects(),
        }
    }
}

/// Read invoices from a CSV file with the header
/// `id,client,amount,status,date,due_date`
pub fn read_invoices_csv(path: impl AsRef<Path>) -> Result<Vec<Invoice>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut invoices = Vec::new();
    for (index, row) in reader.deserialize::<Invoice>().enumerate() {
        // the header is line 1
        let line = index + 2;
        let invoice: Invoice = row.with_context(|| format!("invalid invoice on line {}", line))?;
        if !invoice.amount.is_finite() {
            bail!("invalid invoice on line {}: amount {} is not a number", line, invoice.amount);
        }
        invoices.push(invoice);
    }

    Ok(invoices)
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_default()
}

fn invoice(id: &str, client: &str, amount: f64, status: InvoiceStatus, issued: &str, due: &str) -> Invoice {
    Invoice {
        id: id.to_string(),
        client: client.to_string(),
        amount,
        status,
        date: date(issued),
        due_date: date(due),
    }
}

fn sample_invoices() -> Vec<Invoice> {
    use InvoiceStatus::*;

    vec![
        invoice("INV-2023-001", "Acme Corp", 3200.0, Paid, "2023-10-15", "2023-10-30"),
        invoice("INV-2023-002", "Globex Industries", 1800.0, Due, "2023-10-24", "2023-11-07"),
        invoice("INV-2023-003", "TechStart Inc", 5400.0, Overdue, "2023-10-08", "2023-10-22"),
        invoice("INV-2023-004", "Design Partners", 2100.0, Draft, "2023-10-20", "2023-11-03"),
        invoice("INV-2023-005", "Acme Corp", 2400.0, Due, "2023-10-21", "2023-11-05"),
        invoice("INV-2023-006", "TechStart Inc", 1800.0, Due, "2023-10-25", "2023-11-08"),
        invoice("INV-2023-007", "Design Partners", 3600.0, Draft, "2023-10-30", "2023-11-15"),
    ]
}

fn sample_clients() -> Vec<Client> {
    let client = |id: &str, name: &str, contact: &str, email: &str, phone: &str, address: &str, invoices: u32, billed: f64| Client {
        id: id.to_string(),
        name: name.to_string(),
        contact_name: contact.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        invoices,
        total_billed: billed,
    };

    vec![
        client(
            "client-1",
            "Acme Corp",
            "John Smith",
            "john@acmecorp.com",
            "+1 (555) 123-4567",
            "123 Business Ave, Suite 100, San Francisco, CA 94107",
            5,
            12500.0,
        ),
        client(
            "client-2",
            "Globex Industries",
            "Jane Doe",
            "jane@globex.com",
            "+1 (555) 234-5678",
            "456 Corporate Blvd, New York, NY 10001",
            3,
            8400.0,
        ),
        client(
            "client-3",
            "TechStart Inc",
            "Mike Johnson",
            "mike@techstart.com",
            "+1 (555) 345-6789",
            "789 Innovation Dr, Austin, TX 78701",
            7,
            15600.0,
        ),
        client(
            "client-4",
            "Design Partners",
            "Sarah Williams",
            "sarah@designpartners.com",
            "+1 (555) 456-7890",
            "321 Creative Way, Portland, OR 97204",
            4,
            9200.0,
        ),
    ]
}

fn sample_projects() -> Vec<Project> {
    let project = |id: &str, name: &str, client: &str, start: &str, due: &str, status: ProjectStatus, progress: u8, budget: f64, invoiced: f64| Project {
        id: id.to_string(),
        name: name.to_string(),
        client: client.to_string(),
        start_date: date(start),
        due_date: date(due),
        status,
        progress,
        budget,
        invoiced,
    };

    vec![
        project("project-1", "Website Redesign", "Acme Corp", "2023-09-15", "2023-11-30", ProjectStatus::InProgress, 65, 8000.0, 5200.0),
        project("project-2", "Mobile App Development", "TechStart Inc", "2023-08-01", "2023-12-15", ProjectStatus::InProgress, 40, 12000.0, 4800.0),
        project("project-3", "Brand Identity", "Design Partners", "2023-10-05", "2023-11-15", ProjectStatus::Completed, 100, 5500.0, 5500.0),
        project("project-4", "Marketing Campaign", "Globex Industries", "2023-10-20", "2024-01-20", ProjectStatus::NotStarted, 0, 7500.0, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn sample_dates_are_valid() {
        let dataset = Dataset::sample();
        assert_eq!(dataset.invoices.len(), 7);
        assert!(dataset.invoices.iter().all(|i| i.date.to_string().starts_with("2023-10")));
        assert_eq!(dataset.projects[3].due_date.to_string(), "2024-01-20");

        // a typo in the table would fall back to the default date
        let invoice_dates = dataset.invoices.iter().flat_map(|i| [i.date, i.due_date]);
        let project_dates = dataset.projects.iter().flat_map(|p| [p.start_date, p.due_date]);
        for date in invoice_dates.chain(project_dates) {
            assert_ne!(date, NaiveDate::default());
            assert!((2023..=2024).contains(&date.year()), "{date}");
        }

        for invoice in &dataset.invoices {
            assert!(invoice.due_date > invoice.date, "{}", invoice.id);
        }
        for project in &dataset.projects {
            assert!(project.due_date > project.start_date, "{}", project.id);
        }
    }

    #[test]
    fn reads_invoices_from_csv() {
        let file = csv_file(
            "id,client,amount,status,date,due_date\n\
             INV-1,Initech,120.5,paid,2024-01-02,2024-01-16\n\
             INV-2, Hooli ,99,OVERDUE,2024-02-01,2024-02-15\n",
        );

        let invoices = read_invoices_csv(file.path()).unwrap();
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0].status, InvoiceStatus::Paid);
        assert_eq!(invoices[0].amount, 120.5);
        assert_eq!(invoices[1].client, "Hooli");
        assert_eq!(invoices[1].status, InvoiceStatus::Overdue);
        assert_eq!(invoices[1].due_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    }

    #[test]
    fn bad_status_reports_line() {
        let file = csv_file(
            "id,client,amount,status,date,due_date\n\
             INV-1,Initech,1,paid,2024-01-02,2024-01-16\n\
             INV-2,Hooli,1,sent,2024-02-01,2024-02-15\n",
        );

        let err = read_invoices_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err:#}");
        assert!(format!("{err:#}").contains("sent"), "{err:#}");
    }

    #[test]
    fn bad_date_is_rejected() {
        let file = csv_file(
            "id,client,amount,status,date,due_date\n\
             INV-1,Initech,1,paid,02/01/2024,2024-01-16\n",
        );
        assert!(read_invoices_csv(file.path()).is_err());
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let file = csv_file(
            "id,client,amount,status,date,due_date\n\
             INV-1,Initech,1,paid,2024-01-02,2024-01-16\n\
             INV-2,Hooli,NaN,due,2024-02-01,2024-02-15\n",
        );
        let err = read_invoices_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err:#}");

        let file = csv_file(
            "id,client,amount,status,date,due_date\n\
             INV-1,Initech,inf,paid,2024-01-02,2024-01-16\n",
        );
        assert!(read_invoices_csv(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_invoices_csv("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
