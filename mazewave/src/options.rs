//! Command-line options.
//! `--filename {file}` or `-f`, the maze to solve.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};
use mazewave_paths::SolverConfig;

fn make_options_parser() -> Command {
    Command::new("mazewave")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solve a maze file with a splitting wavefront")
        .arg(
            Arg::new("filename")
                .short('f')
                .long("filename")
                .value_name("FILE")
                .help("File containing the maze")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("max-iterations")
                .long("max-iterations")
                .value_name("N")
                .help("Give up after N wavefront iterations")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .help("Colour the solved maze with ANSI escapes")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub filename: PathBuf,
    pub color: bool,
    pub solver: SolverConfig,
}

impl Options {
    /// Parse a full argument list, program name first.
    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = make_options_parser().try_get_matches_from(args)?;
        let filename = matches
            .get_one::<PathBuf>("filename")
            .cloned()
            .unwrap_or_default();
        Ok(Options {
            filename,
            color: matches.get_flag("color"),
            solver: SolverConfig {
                max_iterations: matches.get_one::<usize>("max-iterations").copied(),
            },
        })
    }
}
