use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "attest",
    about = "Attest: evaluate JSON rule documents and explain why they fail",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate rules against a subject and print the evaluation tree
    Eval(EvalArgs),

    /// Like `eval`, but exit 1 when the rules evaluate to false
    Check(EvalArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    /// Rule document JSON path
    #[arg(long)]
    pub rules: String,

    /// Subject JSON path
    #[arg(long)]
    pub subject: String,

    /// Format config TOML path (defaults apply when the file is absent)
    #[arg(long, default_value = "attest.toml")]
    pub config: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
