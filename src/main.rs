use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ufo_smallcaps::{promote, IgnoreList, PromoteOptions, DEFAULT_FAMILY_MARKER};

#[derive(Parser)]
#[command(name = "promote-smallcaps")]
#[command(about = "Build a small-caps-only copy of a UFO font source")]
struct Cli {
    /// The UFO package to read; it is never modified.
    ufo: PathBuf,
    /// Write the output package here instead of next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Small-caps glyph file to leave alone, such as `hyphen.sc.glif`.
    #[arg(short, long = "ignore", value_name = "FILE")]
    ignore: Vec<String>,
    /// Promote the glyphs that are ignored by default too.
    #[arg(long)]
    no_default_ignores: bool,
    /// Text appended to the family name of the output package.
    #[arg(long, default_value = DEFAULT_FAMILY_MARKER)]
    suffix: String,
}

impl Cli {
    fn options(&self) -> PromoteOptions {
        let mut ignore =
            if self.no_default_ignores { IgnoreList::empty() } else { IgnoreList::default() };
        for file in &self.ignore {
            ignore.insert(file.as_str());
        }
        let options = PromoteOptions::default().ignore_list(ignore).family_marker(&self.suffix);
        match &self.output {
            Some(output) => options.output(output),
            None => options,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let report = promote(&cli.ufo, &cli.options())
        .with_context(|| format!("failed to promote small caps in {}", cli.ufo.display()))?;

    for line in &report.empty_classes {
        println!("{line}");
    }
    info!(
        "wrote {}: {} glyphs promoted, {} registry entries removed",
        report.destination.display(),
        report.promoted.len(),
        report.registry_entries_removed.len()
    );
    Ok(())
}
