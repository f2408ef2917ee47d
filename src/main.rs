use std::io::Write;

use anyhow::Context;
use printkit5::{
    init_logging, FileLineSource, GcodeStream, PipelineBuilder, PipelineConfig, BUILD_DATE,
    VERSION,
};

fn usage() -> ! {
    eprintln!("printkit5 {} (built {})", VERSION, BUILD_DATE);
    eprintln!("Usage: printkit5 <gcode-file> [pipeline-config.json]");
    std::process::exit(2);
}

/// Stream a G-code file through a configured filter chain to stdout.
///
/// A dry run of exactly what the transport would send: useful for
/// inspecting what a chain does to a sliced file without a printer
/// attached.
fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else { usage() };

    let config = match args.next() {
        Some(config_path) => {
            let text = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading pipeline config {}", config_path))?;
            PipelineConfig::from_json(&text)?
        }
        None => PipelineConfig::standard(),
    };

    tracing::info!(file = %path, filters = config.filters.len(), "streaming");

    let source = FileLineSource::open(&path).with_context(|| format!("opening {}", path))?;
    let mut pipeline = PipelineBuilder::from_config(&config, Box::new(source)).build();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut sent = 0u64;
    while let Some(line) = pipeline.next_line() {
        writeln!(out, "{}", line)?;
        sent += 1;
    }

    tracing::info!(lines = sent, state = %pipeline.debug_state(), "stream complete");
    Ok(())
}
