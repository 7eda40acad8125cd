mod calc;
mod config;
mod dashboard;
mod data;
mod draft;
mod error;
mod listing;
mod logging;
mod models;
mod reports;
mod settings;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::config::Config;
use crate::data::Dataset;
use crate::draft::InvoiceDraft;
use crate::listing::invoices::{SortDirection, SortField, SortState, StatusFilter};
use crate::listing::projects::ProjectFilter;
use crate::models::{Client, Invoice, LineItem, Project};
use crate::reports::{Bucket, TimeRange};

#[derive(Parser)]
#[command(name = "invoice-dashboard", version)]
#[command(about = "Invoices, clients and projects at a glance")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// CSV file with invoices (overrides INVOICES_CSV)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List invoices
    Invoices {
        /// Text to look for in the invoice number or client
        #[arg(short, long, default_value = "")]
        query: String,

        /// all, draft, due, paid or overdue
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// id, client, amount, date or dueDate (default: date, newest first)
        #[arg(long)]
        sort: Option<SortField>,

        /// asc or desc
        #[arg(long)]
        direction: Option<SortDirection>,

        /// Pick a column after the initial sort; picking the active column
        /// again flips the direction. May be repeated.
        #[arg(long = "then")]
        then: Vec<SortField>,
    },

    /// List clients
    Clients {
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// List projects
    Projects {
        #[arg(short, long, default_value = "")]
        query: String,

        /// all, not-started, in-progress or completed
        #[arg(short, long, default_value = "all")]
        status: ProjectFilter,
    },

    /// Compute line item amounts and their total
    LineItems {
        /// description:quantity:rate[:unit]
        #[arg(required = true)]
        items: Vec<LineItem>,
    },

    /// Assemble a draft invoice
    Draft {
        #[arg(long)]
        client: String,

        /// Issue date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Due date (default: issue date plus DRAFT_DUE_DAYS)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// description:quantity:rate[:unit]
        items: Vec<LineItem>,
    },

    /// Dashboard totals, recent invoices and upcoming payments
    Summary {
        /// Reference date for upcoming payments (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// Income over time, revenue per client and invoice status counts
    Reports {
        /// monthly, quarterly or yearly
        #[arg(long, default_value = "yearly")]
        range: TimeRange,

        /// Year for monthly and quarterly income (default: latest invoice year)
        #[arg(long)]
        year: Option<i32>,

        /// Clients listed by name before the rest are grouped
        #[arg(long, default_value_t = 4)]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::init()?.with_invoices_csv(cli.data);
    logging::init(&config.log_filter, cli.verbose);

    let dataset = Dataset::load(&config)?;
    debug!(
        invoices = dataset.invoices.len(),
        clients = dataset.clients.len(),
        projects = dataset.projects.len(),
        "dataset ready"
    );

    run(cli.command, &config, &dataset)
}

fn run(command: Command, config: &Config, dataset: &Dataset) -> Result<()> {
    match command {
        Command::Invoices {
            query,
            status,
            sort,
            direction,
            then,
        } => {
            let state = resolve_sort(sort, direction, &then);
            info!(field = %state.field, direction = %state.direction, "listing invoices");

            let invoices = listing::invoices::process(&dataset.invoices, &query, status, state);
            print_invoices(config, &invoices);
        }
        Command::Clients { query } => {
            print_clients(config, &listing::clients::filter(&dataset.clients, &query));
        }
        Command::Projects { query, status } => {
            print_projects(config, &listing::projects::filter(&dataset.projects, &query, status));
        }
        Command::LineItems { items } => {
            print_line_items(config, &items);
        }
        Command::Draft {
            client,
            date,
            due,
            items,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let mut draft = InvoiceDraft::new(&client, date, config.draft_due_days, &dataset.invoices);
            if let Some(due) = due {
                draft.set_due_date(due);
            }
            for item in items {
                draft.push_item(item);
            }

            let items = draft.items().to_vec();
            let invoice = draft.finish()?;

            println!("Invoice {} for {}", invoice.id, invoice.client);
            println!(
                "Issued {}  Due {}",
                config.date_format.format(invoice.date),
                config.date_format.format(invoice.due_date)
            );
            println!();
            print_line_items(config, &items);

            info!(id = %invoice.id, "draft ready");
        }
        Command::Summary { today, limit } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            print_summary(config, &dataset.invoices, today, limit);
        }
        Command::Reports { range, year, top } => {
            let year = year
                .or_else(|| reports::latest_year(&dataset.invoices))
                .unwrap_or_else(|| Local::now().year());
            info!(%range, year, "building reports");
            print_reports(config, &dataset.invoices, range, year, top);
        }
    }

    Ok(())
}

/// Sort state after the initial `--sort/--direction` and every `--then` pick
fn resolve_sort(
    field: Option<SortField>,
    direction: Option<SortDirection>,
    picks: &[SortField],
) -> SortState {
    let initial = match (field, direction) {
        (Some(field), direction) => SortState::new(field, direction.unwrap_or_default()),
        (None, Some(direction)) => SortState {
            direction,
            ..SortState::default()
        },
        (None, None) => SortState::default(),
    };

    picks.iter().fold(initial, |state, field| state.select(*field))
}

fn print_invoices(config: &Config, invoices: &[Invoice]) {
    if invoices.is_empty() {
        println!("No invoices found. Try adjusting your search or filter.");
        return;
    }

    println!(
        "{:<14} {:<20} {:>11}  {:<8} {:<10}  {:<10}",
        "Invoice", "Client", "Amount", "Status", "Issued", "Due"
    );
    for invoice in invoices {
        println!(
            "{:<14} {:<20} {:>11}  {:<8} {:<10}  {:<10}",
            invoice.id,
            invoice.client,
            config.currency.format(invoice.amount),
            invoice.status,
            config.date_format.format(invoice.date),
            config.date_format.format(invoice.due_date)
        );
    }
}

fn print_clients(config: &Config, clients: &[Client]) {
    if clients.is_empty() {
        println!("No clients found.");
        return;
    }

    for client in clients {
        println!("{} ({})", client.name, client.id);
        println!("  {} <{}>  {}", client.contact_name, client.email, client.phone);
        println!("  {}", client.address);
        println!(
            "  {} invoices, {} billed",
            client.invoices,
            config.currency.format(client.total_billed)
        );
    }
}

fn print_projects(config: &Config, projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found. Try adjusting your search or filter.");
        return;
    }

    println!(
        "{:<10} {:<24} {:<20} {:<12} {:>5}  {:>11} {:>11}  {:<10}  {:<10}",
        "Id", "Project", "Client", "Status", "Done", "Budget", "Remaining", "Start", "Due"
    );
    for project in projects {
        println!(
            "{:<10} {:<24} {:<20} {:<12} {:>4}%  {:>11} {:>11}  {:<10}  {:<10}",
            project.id,
            project.name,
            project.client,
            project.status,
            project.progress,
            config.currency.format(project.budget),
            config.currency.format(project.remaining_budget()),
            config.date_format.format(project.start_date),
            config.date_format.format(project.due_date)
        );
    }
}

fn print_line_items(config: &Config, items: &[LineItem]) {
    println!(
        "{:<28} {:>8} {:>10} {:<5} {:>10}",
        "Description", "Qty", "Rate", "Unit", "Amount"
    );
    for item in items {
        println!(
            "{:<28} {:>8} {:>10} {:<5} {:>10}",
            item.description,
            item.quantity,
            item.rate,
            item.unit,
            item.amount()
        );
    }
    let total = calc::parse_decimal(&calc::compute_total(items));
    println!("{:>65}", format!("Total: {}", config.currency.format(total)));
}

fn print_summary(config: &Config, invoices: &[Invoice], today: NaiveDate, limit: usize) {
    let summary = dashboard::Summary::from_invoices(invoices);
    let money = |amount| config.currency.format(amount);

    println!("Total invoiced  {:>12}", money(summary.total_invoiced));
    println!("Paid            {:>12}", money(summary.paid));
    println!("Outstanding     {:>12}", money(summary.outstanding));
    println!("Overdue         {:>12}", summary.overdue_count);
    println!("Drafts          {:>12}", summary.draft_count);

    println!();
    println!("Recent invoices");
    print_invoices(config, &dashboard::recent(invoices, limit));

    println!();
    println!("Upcoming payments");
    print_invoices(config, &dashboard::upcoming(invoices, today, limit));
}

fn print_buckets(config: &Config, buckets: &[Bucket]) {
    for bucket in buckets {
        println!("  {:<20} {:>12}", bucket.label, config.currency.format(bucket.amount));
    }
}

fn print_reports(config: &Config, invoices: &[Invoice], range: TimeRange, year: i32, top: usize) {
    match range {
        TimeRange::Yearly => println!("Income by year"),
        _ => println!("Income {} ({})", year, range),
    }
    let income = reports::income_by_period(invoices, year, range);
    if income.is_empty() {
        println!("  No billed invoices.");
    }
    print_buckets(config, &income);

    println!();
    println!("Revenue by client");
    print_buckets(config, &reports::revenue_by_client(invoices, top));

    println!();
    println!("Invoice status");
    for (status, count) in reports::status_breakdown(invoices) {
        println!("  {:<20} {:>12}", status, count);
    }
}
