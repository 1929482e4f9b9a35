mod commands;
mod config;
mod logger;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    batch::BatchCommand, list::ListCommand, preview::PreviewCommand, render::RenderCommand,
    spell::SpellCommand,
};
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "handsign", version, about = "Sign language gesture clips from pose data")]
struct Cli {
    /// Config file; `handsign.json` in the working directory when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory of `<id>.json` gesture definitions, instead of the built-in library
    #[arg(long, global = true)]
    gestures: Option<PathBuf>,

    /// Debug logging (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Render(RenderCommand),
    Batch(BatchCommand),
    Preview(PreviewCommand),
    Spell(SpellCommand),
    List(ListCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(gestures) = cli.gestures {
        config.gestures = Some(gestures);
    }

    match cli.command {
        Command::Render(command) => command.run(config),
        Command::Batch(command) => command.run(config),
        Command::Preview(command) => command.run(config),
        Command::Spell(command) => command.run(config),
        Command::List(command) => command.run(config),
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch() {
        let cli = Cli::try_parse_from(["handsign", "batch", "--letters", "a-c", "-v"]).unwrap();
        assert!(cli.verbose);
        let Command::Batch(batch) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(batch.letters.map(|range| range.ids().len()), Some(3));
        assert!(batch.ids.is_empty());
    }

    #[test]
    fn test_render_needs_gesture() {
        assert!(Cli::try_parse_from(["handsign", "render"]).is_err());
        assert!(Cli::try_parse_from(["handsign", "render", "--file", "c.json"]).is_ok());
        assert!(Cli::try_parse_from(["handsign", "preview", "c", "--step", "0"]).is_err());
    }
}
