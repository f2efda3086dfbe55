use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use trapview::commands::{
    boundcheck_command, disfunc_command, load_config, BoundcheckView, ListingArgs, COLOR_LEGEND,
};
use trapview::init_logging;
use trapview_core::render::Palette;

/// Bounds-check and disassembly inspection for Go binaries.
///
/// This CLI is a thin wrapper around `trapview-core` (exposed in code as
/// `trapview_core`). All substantive logic lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "trapview",
    version,
    about = "Locate bounds-check traps and print annotated disassembly",
    long_about = None
)]
struct Cli {
    /// Config file (.json, .yaml or .yml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print all the lines where the compiler inserted a slice bound check.
    ///
    /// Example: trapview boundcheck -f nin --pkg ./cmd/nin --file util.go
    Boundcheck {
        #[command(flatten)]
        input: ListingArgs,

        /// Output view.
        #[arg(long, value_enum, default_value_t = BoundcheckView::Context)]
        view: BoundcheckView,

        /// Shorthand for `--view raw`.
        #[arg(long, conflicts_with_all = ["view", "terse", "json"])]
        raw: bool,

        /// Shorthand for `--view terse`.
        #[arg(long, conflicts_with_all = ["view", "json"])]
        terse: bool,

        /// Shorthand for `--view json`.
        #[arg(long, conflicts_with = "view")]
        json: bool,

        /// Emit no ANSI color codes.
        #[arg(long, default_value_t = false)]
        no_color: bool,
    },

    /// Print an annotated disassembly of a function.
    ///
    /// It is recommended to use one of -f or --file.
    /// Example: trapview disfunc -f 'nin\.CanonicalizePath$' --pkg ./cmd/nin | less -R
    #[command(after_help = COLOR_LEGEND)]
    Disfunc {
        #[command(flatten)]
        input: ListingArgs,

        /// Emit no ANSI color codes.
        #[arg(long, default_value_t = false)]
        no_color: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Boundcheck { input, view, raw, terse, json, no_color } => {
            let view = if raw {
                BoundcheckView::Raw
            } else if terse {
                BoundcheckView::Terse
            } else if json {
                BoundcheckView::Json
            } else {
                view
            };
            boundcheck_command(&mut out, &config, &input, view, palette(no_color))?
        }
        Command::Disfunc { input, no_color } => {
            disfunc_command(&mut out, &config, &input, palette(no_color))?
        }
    }
    out.flush()?;

    Ok(())
}

fn palette(no_color: bool) -> Palette {
    if no_color {
        Palette::plain()
    } else {
        Palette::ansi()
    }
}
