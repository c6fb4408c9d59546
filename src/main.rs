use anyhow::Result;
use clap::Parser;
use tabular_data::{cli, clipboard, workflow};

fn main() -> Result<()> {
    // The clipboard owner is a re-exec of this binary and must exit before argument parsing.
    if clipboard::run_clipboard_owner_if_requested()? {
        return Ok(());
    }

    let cli_args = cli::Cli::parse();

    workflow::run_tabular_data(cli_args)
}
