//! CLI argument parsing for the PREMIS inventory stage.
//!
//! The CLI only gathers inputs and picks the identifier source; the stage
//! itself lives in `activity` so a workflow worker can call it directly.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sip-premis",
    version,
    about = "Write a PREMIS object inventory for a SIP",
    after_help = "Examples:\n  sip-premis add-objects --sip /tmp/digitized_SIP\n  sip-premis add-objects --sip /tmp/digitized_SIP --seed 1 --out /tmp/premis.xml\n  sip-premis config-stub > stage.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    AddObjects(AddObjectsArgs),
    /// Print the default stage config as JSON
    ConfigStub,
}

/// Inputs for one add-objects run.
#[derive(Parser, Debug)]
#[command(about = "Inventory every content file of a SIP into a PREMIS document")]
pub struct AddObjectsArgs {
    /// SIP root containing header/ and content/
    #[arg(long, value_name = "DIR")]
    pub sip: PathBuf,

    /// Output path for the PREMIS document (default: <sip>/metadata/premis.xml)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Seed for reproducible identifiers; OS entropy is used when absent
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// JSON stage config (metadata names, SIP layout)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the stage result as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit debug logging for every classified file
    #[arg(long)]
    pub verbose: bool,
}
