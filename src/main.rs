use anyhow::Result;
use clap::Parser;

use cutscript::cli::CliArgs;
use cutscript::config::EditorConfig;

fn main() -> Result<()> {
    cutscript::tracing::init();

    let args = CliArgs::parse();
    let config = EditorConfig::load();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    args.command.run(&config, &mut out)
}
