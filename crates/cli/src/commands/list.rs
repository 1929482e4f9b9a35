use anyhow::Result;
use clap::Args;

use super::OutputFormat;
use crate::config::Config;

/// List the gestures available in the library or gesture directory.
#[derive(Debug, Args)]
pub struct ListCommand {
    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

impl ListCommand {
    pub fn run(self, config: Config) -> Result<()> {
        let ids = config.gesture_source().ids()?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ids)?),
            OutputFormat::Table => {
                for id in ids {
                    println!("{id}");
                }
            }
        }
        Ok(())
    }
}
