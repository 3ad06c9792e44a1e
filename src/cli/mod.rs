use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "svec")]
#[command(
    version,
    about = "Drive a SimpleVector<i64> from a line-per-command script and print what it reports",
    long_about = None
)]
pub struct Cli {
    /// Script of container commands (push, insert, erase, reserve, show, ...); must end in .svec
    #[arg(value_name = "SCRIPT")]
    pub file: Option<PathBuf>,

    /// Replay the bundled container scenarios and compare each against its expected output
    #[arg(short, long)]
    pub demo: bool,

    /// Log container activity to stderr: -v script summary, -vv each command, -vvv buffer relocations
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
