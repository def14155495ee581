// src/bin/cli.rs
use clap::Parser;
use gtube::{
    cli::{self, Cli},
    config::Config,
    log,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let cfg = Config::load()?;
    log::init(&args.data_dir(&cfg), args.verbose);

    cli::run(args, &cfg)
}
