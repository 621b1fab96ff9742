use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about)]
pub struct Arguments {
    #[arg(short = 'v', long = None, env = "STOPWATCH_VERBOSITY", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Refresh cadence of the elapsed-time display, in milliseconds.
    #[arg(short, long, env = "STOPWATCH_TICK_MS", default_value_t = 10)]
    pub tick_ms: u64,
}
