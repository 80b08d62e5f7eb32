use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use steel_ledger_core::Direction;

#[derive(Parser)]
#[command(
    name = "steel-ledger",
    about = "Record inbound/outbound material movements per party",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding parties.txt and the ledger tables.
    /// Defaults to $STEEL_LEDGER_DATA_DIR, then the working directory.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files; defaults to <data-dir>/logs.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List, add or remove parties
    Party(PartyArgs),
    /// Record one movement in its direction and party ledgers
    Submit(SubmitArgs),
    /// Print a ledger table
    View(ViewArgs),
    /// List the ledgers that can be viewed
    Ledgers,
}

#[derive(Args)]
pub struct PartyArgs {
    #[command(subcommand)]
    pub action: PartyAction,
}

#[derive(Subcommand)]
pub enum PartyAction {
    List,
    Add { name: String },
    Remove { name: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    In,
    Out,
}

impl From<DirectionArg> for Direction {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::In => Direction::In,
            DirectionArg::Out => Direction::Out,
        }
    }
}

#[derive(Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub party: String,
    #[arg(long, value_enum)]
    pub direction: DirectionArg,
    /// YYYY-MM-DD; today when omitted.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub weight: String,
    #[arg(long)]
    pub car_number: String,
    #[arg(long)]
    pub towards: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct ViewArgs {
    /// IN, OUT or a party name
    pub ledger: String,
}
