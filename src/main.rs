// Entry point: parse the CLI, load config, then run the interactive loop on
// stdin/stdout until the operator quits.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use audiogram::cli::Args;
use audiogram::config::AppConfig;
use audiogram::session;
use audiogram::subjects::SubjectTable;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = AppConfig::load_or_default(&args.config);
    if let Some(dir) = args.out_dir {
        cfg.output.dir = dir;
    }

    std::fs::create_dir_all(&cfg.output.dir)
        .with_context(|| format!("create output directory {}", cfg.output.dir.display()))?;

    let table = SubjectTable::builtin();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session::run(
        args.mode,
        &table,
        &cfg,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}
