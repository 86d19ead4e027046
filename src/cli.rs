use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "hwsnap")]
#[command(about = "Show a snapshot of this machine's CPU, motherboard, RAM, GPU and storage")]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Log each collection step to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Yaml,
}

impl Cli {
    /// Log filter directive for the subscriber.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "hwsnap=debug"
        } else {
            "warn"
        }
    }
}
