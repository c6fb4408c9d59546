use clap::Parser;
use std::path::PathBuf;

/// tabular-data – pick file records from a checkbox table and hand off the downloadable ones
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file with the record list ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Comma-separated row indices (0-based) to select before showing the table.
    #[arg(long, value_delimiter = ',', value_name = "ROWS")]
    pub select: Vec<usize>,

    /// Select every row before showing the table.
    #[arg(long)]
    pub select_all: bool,

    /// Skip the TUI: apply --select/--select-all, run the download and print the result.
    #[arg(long)]
    pub headless: bool,

    /// Copy the confirmed download list to the clipboard instead of printing it.
    #[arg(long)]
    pub copy: bool,

    /// Config file (defaults to $TABULAR_DATA_CONFIG, then ~/.config/tabular-data/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// `None` means the record list comes from stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}
