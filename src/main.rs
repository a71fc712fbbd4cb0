use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{AddObjectsArgs, Command, RootArgs};
use sip_premis::activity::{
    AddPremisObjects, AddPremisObjectsParams, ADD_PREMIS_OBJECTS_NAME, DEFAULT_PREMIS_FILE_REL,
};
use sip_premis::{config, util};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    match args.command {
        Command::AddObjects(args) => run_add_objects(args),
        Command::ConfigStub => {
            println!("{}", config::config_stub()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run_add_objects(args: AddObjectsArgs) -> Result<()> {
    init_logging(args.verbose);

    let stage_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::default_config(),
    };
    let params = AddPremisObjectsParams {
        premis_file_path: args
            .out
            .clone()
            .unwrap_or_else(|| args.sip.join(DEFAULT_PREMIS_FILE_REL)),
        sip: args.sip.clone(),
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let span = tracing::info_span!("stage", name = ADD_PREMIS_OBJECTS_NAME);
    let _guard = span.enter();
    let result = AddPremisObjects::new(rng)
        .with_config(stage_config)
        .execute(&params)
        .context(ADD_PREMIS_OBJECTS_NAME)?;

    if args.json {
        let text = serde_json::to_string_pretty(&result).context("serialize stage result")?;
        println!("{text}");
    } else {
        println!(
            "Wrote PREMIS objects to {}",
            util::display_path(&params.premis_file_path, Some(&params.sip))
        );
    }
    Ok(())
}
