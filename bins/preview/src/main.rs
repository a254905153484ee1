//! Medistock preview
//!
//! Reads a JSON export from disk and prints the view the dashboard would
//! render for it.
//!
//! ```text
//! medistock-preview tree <file> [search]   category / account / location hierarchy
//! medistock-preview ledger <file>          party or account ledger
//! medistock-preview invoice <file>         sale or purchase line totals
//! medistock-preview units <file>           unit ladder and price conversion
//! medistock-preview batches <file>         batch expiry status
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use medistock_core::expiry::{ExpiryInput, ExpiryPolicy, ExpiryStatus, days_until_expiry};
use medistock_core::ledger::{LedgerAssembler, LedgerEntry, LedgerView, OpeningBalance};
use medistock_core::pricing::{self, InvoiceTotals, LineItem, VatRounding};
use medistock_core::tree::{NodeRecord, TreeProjector};
use medistock_core::units::{UnitLadder, UnitLevel};
use medistock_shared::types::{AccountId, BalanceStatus, UnitId};
use medistock_shared::{AppConfig, AppError, AppResult};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: medistock-preview <tree|ledger|invoice|units|batches> <file> [search]";

type Record = NodeRecord<serde_json::Map<String, serde_json::Value>>;

#[derive(Debug, Deserialize)]
struct LedgerExport {
    #[serde(default)]
    opening_balance: Option<OpeningBalance>,
    #[serde(default)]
    account_id: Option<AccountId>,
    entries: Vec<LedgerEntry>,
}

#[derive(Debug, Serialize)]
struct LedgerOutput {
    #[serde(flatten)]
    view: LedgerView,
    #[serde(skip_serializing_if = "Option::is_none")]
    outstanding: Option<Outstanding>,
}

#[derive(Debug, Serialize)]
struct Outstanding {
    account_id: AccountId,
    balance: Decimal,
    status: BalanceStatus,
}

#[derive(Debug, Deserialize)]
struct InvoiceExport {
    items: Vec<LineItem>,
    #[serde(default)]
    discount: Decimal,
    #[serde(default)]
    vat_rounding: VatRounding,
}

#[derive(Debug, Serialize)]
struct InvoiceOutput {
    line_totals: Vec<Decimal>,
    #[serde(flatten)]
    totals: InvoiceTotals,
}

#[derive(Debug, Deserialize)]
struct UnitsExport {
    levels: Vec<UnitLevel>,
    #[serde(default)]
    price: Option<PriceQuery>,
}

#[derive(Debug, Deserialize)]
struct PriceQuery {
    amount: Decimal,
    from: UnitId,
    to: UnitId,
}

#[derive(Debug, Serialize)]
struct UnitsOutput {
    chain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    converted_price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct BatchExport {
    batch_no: String,
    #[serde(flatten)]
    expiry: ExpiryInput,
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    batch_no: String,
    expiry_date: Option<NaiveDate>,
    days_until_expiry: Option<i64>,
    status: Option<ExpiryStatus>,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medistock=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    let mut args = std::env::args().skip(1);
    let (Some(command), Some(path)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    info!(command = %command, path = %path, "Rendering export");

    let output = match command.as_str() {
        "tree" => render_tree(Path::new(&path), args.next().as_deref(), &config),
        "ledger" => render_ledger(Path::new(&path), &config),
        "invoice" => render_invoice(Path::new(&path), &config),
        "units" => render_units(Path::new(&path)),
        "batches" => render_batches(Path::new(&path), &config),
        other => bail!("unknown command `{other}`\n{USAGE}"),
    };

    match output {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            if err.is_input_error() {
                warn!(code = err.error_code(), error = %err, "Export rejected");
            } else {
                error!(code = err.error_code(), error = %err, "Preview failed");
            }
            Err(err.into())
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))
}

fn render_tree(path: &Path, search: Option<&str>, config: &AppConfig) -> AppResult<String> {
    let records: Vec<Record> = read_json(path)?;
    let mut tree = TreeProjector::build_tree(records)?;

    if let Some(term) = search.map(str::to_lowercase).filter(|term| !term.trim().is_empty()) {
        tree = TreeProjector::prune(tree, |record| record_name_contains(record, &term));
    }

    let projection = TreeProjector::project_tree(tree, &config.tree);
    info!(
        roots = projection.tree.len(),
        rows = projection.rows.len(),
        visible = projection.visible().len(),
        "Projected hierarchy"
    );
    to_json(&projection)
}

fn record_name_contains(record: &Record, term: &str) -> bool {
    record
        .payload
        .get("name")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|name| name.to_lowercase().contains(term))
}

fn render_ledger(path: &Path, config: &AppConfig) -> AppResult<String> {
    let export: LedgerExport = read_json(path)?;

    let outstanding = export.account_id.map(|account_id| {
        let balance = LedgerAssembler::outstanding_balance(&export.entries, account_id);
        Outstanding {
            account_id,
            balance,
            status: BalanceStatus::from_signed(balance),
        }
    });

    let view = LedgerAssembler::new(&config.ledger)
        .assemble(export.entries, export.opening_balance.as_ref());
    to_json(&LedgerOutput { view, outstanding })
}

fn render_invoice(path: &Path, config: &AppConfig) -> AppResult<String> {
    let export: InvoiceExport = read_json(path)?;
    let vat_rate = config.pricing.vat_rate;

    to_json(&InvoiceOutput {
        line_totals: export
            .items
            .iter()
            .map(|item| pricing::line_total(item, vat_rate))
            .collect(),
        totals: pricing::summarize(
            &export.items,
            vat_rate,
            export.vat_rounding,
            export.discount,
        ),
    })
}

fn render_units(path: &Path) -> AppResult<String> {
    let export: UnitsExport = read_json(path)?;
    let ladder = UnitLadder::new(export.levels)?;

    let converted_price = export
        .price
        .map(|query| ladder.convert_price(query.amount, query.from, query.to))
        .transpose()?;

    to_json(&UnitsOutput {
        chain: ladder.describe(),
        converted_price,
    })
}

fn render_batches(path: &Path, config: &AppConfig) -> AppResult<String> {
    let batches: Vec<BatchExport> = read_json(path)?;
    let policy = ExpiryPolicy::new(&config.expiry);
    let today = chrono::Local::now().date_naive();

    let rows: Vec<BatchOutput> = batches
        .into_iter()
        .map(|batch| {
            let expiry_date = batch.expiry.resolve();
            BatchOutput {
                batch_no: batch.batch_no,
                expiry_date,
                days_until_expiry: expiry_date.map(|date| days_until_expiry(date, today)),
                status: expiry_date.map(|date| policy.status(date, today)),
            }
        })
        .collect();

    to_json(&rows)
}
