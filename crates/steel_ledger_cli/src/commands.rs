use crate::cli::{Cli, Command, PartyAction, PartyArgs, SubmitArgs, ViewArgs};
use anyhow::Context;
use std::path::PathBuf;
use steel_ledger_core::{
    default_log_level, init_logging, CsvLedgerRepository, DateChoice, FilePartyRepository,
    LedgerReader, LogReporter, OptionalField, PartyRegistry, PartyRepository, Report, ReportLevel,
    Reporter, StorageConfig, Transaction, TransactionRecorder,
};

/// Prints reports to the terminal and forwards them to the log.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, report: &Report) {
        LogReporter.report(report);
        match report.level {
            ReportLevel::Info => println!("{}: {}", report.title, report.message),
            ReportLevel::Warning | ReportLevel::Error => {
                eprintln!("{}: {}", report.title, report.message)
            }
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.data_dir {
        Some(dir) => StorageConfig::new(dir),
        None => StorageConfig::from_env(),
    };
    config
        .ensure_data_dir()
        .with_context(|| format!("cannot create data dir {}", config.data_dir().display()))?;
    start_logging(&cli, &config)?;

    match cli.command {
        Command::Party(args) => cmd_party(&config, args),
        Command::Submit(args) => cmd_submit(&config, args),
        Command::View(args) => cmd_view(&config, args),
        Command::Ledgers => cmd_ledgers(&config),
    }
}

fn start_logging(cli: &Cli, config: &StorageConfig) -> anyhow::Result<()> {
    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => config.data_dir().join("logs"),
    };
    let log_dir = absolute(log_dir)?;
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir.to_string_lossy()).context("logging init failed")?;
    Ok(())
}

fn absolute(path: PathBuf) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(std::env::current_dir()?.join(path))
}

fn cmd_party(config: &StorageConfig, args: PartyArgs) -> anyhow::Result<()> {
    let mut registry = PartyRegistry::open(FilePartyRepository::from_config(config));
    match args.action {
        PartyAction::List => {
            for name in registry.names() {
                println!("{name}");
            }
        }
        PartyAction::Add { name } => {
            if registry.add(&name)? {
                println!("Added party {}", name.trim());
            } else {
                eprintln!("Party not added: name is blank, reserved or already present");
            }
        }
        PartyAction::Remove { name } => {
            if registry.remove(&name)? {
                println!("Removed party {name}");
            } else {
                eprintln!("No party named {name}");
            }
        }
    }
    Ok(())
}

fn cmd_submit(config: &StorageConfig, args: SubmitArgs) -> anyhow::Result<()> {
    let registry = PartyRegistry::open(FilePartyRepository::from_config(config));
    ensure_registered(&registry, &args.party)?;

    let date = match args.date {
        Some(text) => DateChoice::Custom(text),
        None => DateChoice::Current,
    };
    let transaction = Transaction::new(
        args.party,
        args.direction.into(),
        &date,
        args.weight,
        args.car_number,
    )
    .with_towards_party(optional(args.towards))
    .with_description(optional(args.description));

    let recorder = TransactionRecorder::new(CsvLedgerRepository::from_config(config));
    recorder.submit_and_report(&transaction, &ConsoleReporter)?;
    Ok(())
}

/// Refuses a party the registry does not know.
///
/// A blank name is let through so the recorder reports it as a missing field.
fn ensure_registered<R: PartyRepository>(
    registry: &PartyRegistry<R>,
    party: &str,
) -> anyhow::Result<()> {
    if party.trim().is_empty() || registry.contains(party) {
        return Ok(());
    }
    anyhow::bail!("unknown party `{party}`; add it with `steel-ledger party add` first")
}

fn optional(value: Option<String>) -> OptionalField {
    value.map(OptionalField::included).unwrap_or_default()
}

fn cmd_view(config: &StorageConfig, args: ViewArgs) -> anyhow::Result<()> {
    let reader = LedgerReader::new(CsvLedgerRepository::from_config(config));
    match reader.view(&args.ledger) {
        Ok(rows) => {
            for row in rows {
                println!("{}", row.join("\t"));
            }
            Ok(())
        }
        Err(err) => {
            ConsoleReporter.report(&Report::for_view_error(&err));
            Err(err.into())
        }
    }
}

fn cmd_ledgers(config: &StorageConfig) -> anyhow::Result<()> {
    let registry = PartyRegistry::open(FilePartyRepository::from_config(config));
    let reader = LedgerReader::new(CsvLedgerRepository::from_config(config));
    match reader.ledger_menu(registry.parties()) {
        Ok(entries) => {
            for entry in entries {
                println!("{}\t{}", entry.name, entry.kind.as_str());
            }
            Ok(())
        }
        Err(err) => {
            ConsoleReporter.report(&Report::for_view_error(&err));
            Err(err.into())
        }
    }
}
