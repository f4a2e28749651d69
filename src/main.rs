use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use household_ledger::cli::{
    handle_member_command, handle_report_command, handle_transaction_command, MemberCommands,
    ReportCommands, TransactionCommands,
};
use household_ledger::config::{LedgerPaths, ReloadPolicy, Settings, UserSession};
use household_ledger::reports::ReportPeriod;
use household_ledger::storage::TransactionStore;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Household income and expense ledger",
    long_about = "Records each member's income and expenses in a per-user CSV file \
                  and answers filtered, sorted queries and monthly reports over them."
)]
struct Cli {
    /// User whose ledger to open
    #[arg(short, long, global = true, env = "LEDGER_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Member(MemberCommands),

    /// Reports over complete months
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show or change configuration
    Config {
        /// User to open when --user is not given
        #[arg(long)]
        default_user: Option<String>,
        /// When the store re-reads its file
        #[arg(long, value_enum)]
        reload_policy: Option<ReloadArg>,
        /// Default report window (3m, 6m or annual)
        #[arg(long)]
        report_period: Option<ReportPeriod>,
        /// Currency symbol used in output
        #[arg(long)]
        currency: Option<String>,
        /// strftime pattern for dates in transaction listings (e.g. %d/%m/%Y)
        #[arg(long)]
        date_format: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReloadArg {
    Always,
    OnChange,
}

impl From<ReloadArg> for ReloadPolicy {
    fn from(arg: ReloadArg) -> Self {
        match arg {
            ReloadArg::Always => ReloadPolicy::Always,
            ReloadArg::OnChange => ReloadPolicy::OnChange,
        }
    }
}

fn main() -> Result<()> {
    household_ledger::init_tracing();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            let mut store = open_store(cli.user, &paths, &settings)?;
            handle_transaction_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Member(cmd)) => {
            let mut store = open_store(cli.user, &paths, &settings)?;
            handle_member_command(&mut store, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let mut store = open_store(cli.user, &paths, &settings)?;
            handle_report_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Config {
            default_user,
            reload_policy,
            report_period,
            currency,
            date_format,
        }) => {
            let changed = default_user.is_some()
                || reload_policy.is_some()
                || report_period.is_some()
                || currency.is_some()
                || date_format.is_some();

            if let Some(user) = default_user {
                UserSession::new(user.as_str())?;
                settings.default_user = Some(user);
            }
            if let Some(policy) = reload_policy {
                settings.reload_policy = policy.into();
            }
            if let Some(period) = report_period {
                settings.default_report_period = period;
            }
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if let Some(format) = date_format {
                settings.set_date_format(&format)?;
            }
            if changed {
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            print_config(&paths, &settings)?;
        }
        None => {
            println!("Household Ledger - income and expense tracking");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}

/// Open and load the ledger of the requested or default user
fn open_store(
    user: Option<String>,
    paths: &LedgerPaths,
    settings: &Settings,
) -> Result<TransactionStore> {
    let username = user.or_else(|| settings.default_user.clone()).context(
        "No user given. Pass --user, set LEDGER_USER, or run 'ledger config --default-user <name>'",
    )?;
    let session = UserSession::new(username)?;

    let mut store = TransactionStore::open(paths, session, settings)?;
    store
        .load()
        .with_context(|| format!("Failed to load {}", store.path().display()))?;
    Ok(store)
}

fn print_config(paths: &LedgerPaths, settings: &Settings) -> Result<()> {
    println!("Household Ledger Configuration");
    println!("==============================");
    println!("Base directory:     {}", paths.base_dir().display());
    println!("Userdata directory: {}", paths.userdata_dir().display());
    println!("Settings file:      {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!(
        "  Default user:   {}",
        settings.default_user.as_deref().unwrap_or("(none)")
    );
    println!("  Reload policy:  {:?}", settings.reload_policy);
    println!("  Report period:  {}", settings.default_report_period);
    println!("  Currency:       {}", settings.currency_symbol);
    println!("  Date format:    {}", settings.date_format);

    let users = paths.known_users()?;
    println!();
    if users.is_empty() {
        println!("No users yet.");
    } else {
        println!("Users: {}", users.join(", "));
    }
    Ok(())
}
