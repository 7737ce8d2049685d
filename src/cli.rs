use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// noteport - export a note collection into a portable Markdown tree
///
/// # Quick Reference
///
/// ```bash
/// noteport export dump.json --dest ~/vault     # Write notes + resources
/// noteport plan dump.json --dest ~/vault       # Dry run, list planned files
/// noteport plan dump.json --dest out --json    # Dry run as JSON report
/// noteport config                              # Show effective settings
/// ```
///
/// ## Output layout
///
/// - one directory per folder, nested like the source
/// - one `<note id>.md` per note, with YAML front matter
/// - every resource in a flat `resources/` directory under the root
///
/// ## Environment Variables
///
/// - `NOTEPORT_EXPORT_DIR`: fixed export directory (overrides `--dest`)
/// - `RUST_LOG`: log filter (overrides `-v`)
#[derive(Parser, Debug)]
#[command(name = "noteport")]
#[command(version = "0.1.0")]
#[command(about = "Export a note collection into a portable Markdown tree")]
pub struct Cli {
    /// Config file (default: <config dir>/noteport/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a dump into a Markdown tree
    Export {
        /// JSON dump of the note store
        dump: PathBuf,

        /// Destination directory (ignored when a fixed export dir is configured)
        #[arg(short, long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Show what an export would write, without writing
    Plan {
        /// JSON dump of the note store
        dump: PathBuf,

        /// Destination directory (ignored when a fixed export dir is configured)
        #[arg(short, long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Print the config file location and effective settings
    Config,
}
