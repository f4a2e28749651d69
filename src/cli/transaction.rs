//! Transaction CLI commands
//!
//! Implements the add, list, range, update and remove commands.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Member, TransactionId, TransactionKind, TransactionUpdate, YearMonth};
use crate::storage::{RangeQuery, TransactionQuery, TransactionStore};

/// Kind filter accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Sort order for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Ascending by amount
    Amount,
    /// Newest first
    Date,
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Category name (e.g. SALARY, GROCERY)
        category: String,
        /// Amount (e.g. "50" or "1250.75")
        amount: String,
        /// Member the transaction belongs to
        #[arg(short, long)]
        member: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long, conflicts_with = "no_date")]
        date: Option<String>,
        /// Record the transaction without a date
        #[arg(long)]
        no_date: bool,
        /// Resolve names shared by both families (MISCELLANEOUS, OTHER)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },
    /// List transactions filtered by attributes
    List {
        /// Exact date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Member name
        #[arg(short, long)]
        member: Option<String>,
        /// Only income or only expense
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Sort order
        #[arg(short, long, value_enum)]
        sort: Option<SortArg>,
    },
    /// List transactions within an inclusive date range
    Range {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Member name
        #[arg(short, long)]
        member: Option<String>,
        /// Only income or only expense
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Sort ascending by amount
        #[arg(long)]
        by_amount: bool,
        /// Sort newest first (applied after --by-amount)
        #[arg(long)]
        by_date: bool,
    },
    /// Update fields of an existing transaction
    Update {
        /// Transaction ID
        id: String,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New member
        #[arg(short, long)]
        member: Option<String>,
    },
    /// Remove a transaction
    Remove {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command against a loaded store
pub fn handle_transaction_command(
    store: &mut TransactionStore,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::Add {
            category,
            amount,
            member,
            date,
            no_date,
            kind,
        } => {
            let category = parse_category(&category, kind.map(Into::into))?;
            let amount = parse_amount(&amount)?;
            let date = if no_date {
                None
            } else {
                match date {
                    Some(s) => Some(parse_date(&s)?),
                    None => Some(chrono::Local::now().date_naive()),
                }
            };
            let member = store.members_mut().get_or_create(&member);

            let id = store.add(category, amount, date, member)?;
            store.save()?;

            println!("Added transaction {}", id);
            if let Some(txn) = store.find_by_id(id) {
                print!("{}", format_transaction_details(txn, currency, date_format));
            }
        }

        TransactionCommands::List {
            date,
            month,
            category,
            member,
            kind,
            sort,
        } => {
            let mut query = TransactionQuery::new();
            if let Some(d) = date {
                query = query.exact_date(parse_date(&d)?);
            }
            if let Some(m) = month {
                let month = YearMonth::parse(&m)
                    .map_err(|e| LedgerError::InvalidDate(e.to_string()))?;
                query = query.month(month);
            }
            if let Some(c) = category {
                query = query.category(parse_category(&c, kind.map(Into::into))?);
            }
            if let Some(name) = member {
                query = query.member(resolve_member(store, &name)?);
            }
            if let Some(k) = kind {
                query = query.kind(k.into());
            }
            match sort {
                Some(SortArg::Amount) => query = query.sort_by_amount(),
                Some(SortArg::Date) => query = query.sort_by_date_desc(),
                None => {}
            }

            let results = store.query(&query)?;
            print!("{}", format_transaction_register(&results, currency, date_format));
        }

        TransactionCommands::Range {
            from,
            to,
            category,
            member,
            kind,
            by_amount,
            by_date,
        } => {
            let mut query = RangeQuery::new();
            if let Some(s) = from {
                query = query.start(parse_date(&s)?);
            }
            if let Some(s) = to {
                query = query.end(parse_date(&s)?);
            }
            if let Some(c) = category {
                query = query.category(parse_category(&c, kind.map(Into::into))?);
            }
            if let Some(name) = member {
                query = query.member(resolve_member(store, &name)?);
            }
            if let Some(k) = kind {
                query = query.income(k == KindArg::Income);
            }
            if by_amount {
                query = query.sort_by_amount();
            }
            if by_date {
                query = query.sort_by_date_desc();
            }

            let results = store.query_range(&query)?;
            print!("{}", format_transaction_register(&results, currency, date_format));
        }

        TransactionCommands::Update {
            id,
            category,
            amount,
            date,
            member,
        } => {
            let id = parse_id(&id)?;
            let existing = store
                .find_by_id(id)
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
            let current_kind = existing.kind();

            let mut update = TransactionUpdate::new();
            if let Some(c) = category {
                update = update.category(parse_category(&c, Some(current_kind))?);
            }
            if let Some(a) = amount {
                update = update.amount(parse_amount(&a)?);
            }
            if let Some(d) = date {
                update = update.date(parse_date(&d)?);
            }
            if let Some(name) = member {
                update = update.member(store.members_mut().get_or_create(&name));
            }

            if update.is_empty() {
                println!("No changes specified. Use --category, --amount, --date, or --member.");
                return Ok(());
            }

            store.update(id, update);
            store.save()?;

            println!("Updated transaction {}", id);
            if let Some(txn) = store.find_by_id(id) {
                print!("{}", format_transaction_details(txn, currency, date_format));
            }
        }

        TransactionCommands::Remove { id } => {
            let id = parse_id(&id)?;
            if !store.remove_by_id(id) {
                return Err(LedgerError::transaction_not_found(id.to_string()));
            }
            store.save()?;
            println!("Removed transaction {}", id);
        }
    }

    Ok(())
}

/// Resolve a category name, preferring `kind` when given
pub fn parse_category(name: &str, kind: Option<TransactionKind>) -> LedgerResult<Category> {
    match kind {
        Some(kind) => Category::parse_in(kind, name).or_else(|_| Category::parse(name)),
        None => Category::parse(name),
    }
}

fn parse_amount(s: &str) -> LedgerResult<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| LedgerError::InvalidAmount(s.to_string()))
}

fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(s.to_string()))
}

fn parse_id(s: &str) -> LedgerResult<TransactionId> {
    s.trim()
        .parse()
        .map_err(|_| LedgerError::InvalidId(s.to_string()))
}

fn resolve_member(store: &TransactionStore, name: &str) -> LedgerResult<Member> {
    store
        .members()
        .resolve(name)
        .cloned()
        .ok_or_else(|| LedgerError::member_not_found(name))
}
