//! Removes consecutive duplicate `<tag>` lines from an OSM XML file.
//!
//! Exports stitched together from overlapping extracts can carry the
//! same tag line twice in a row inside one element, which trips strict
//! XML consumers. This trims those duplicates before loading.

use std::path::{Path, PathBuf};

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "dedup-osm", about = "Remove consecutive duplicate tags from an OSM file")]
struct Cli {
    /// OSM XML file to clean
    input: PathBuf,
    /// Output path; defaults to `<stem>_clean.osm` next to the input
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let output = cli.output.unwrap_or_else(|| default_output(&cli.input));

    let content = std::fs::read_to_string(&cli.input)?;
    let (clean, removed) = dedup_consecutive_tags(&content);
    std::fs::write(&output, clean)?;

    println!("Removed {removed} duplicate tags; wrote {}", output.display());
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("map");
    input.with_file_name(format!("{stem}_clean.osm"))
}

/// Drops every `<tag ...>` line identical (modulo indentation) to the
/// line directly above it, as long as both sit inside the same
/// `<node>`/`<way>`/`<relation>` element. Non-consecutive repeats are
/// left alone.
fn dedup_consecutive_tags(content: &str) -> (String, usize) {
    let mut kept: Vec<&str> = Vec::new();
    let mut removed = 0;
    let mut inside_element = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("<node") || trimmed.starts_with("<way") || trimmed.starts_with("<relation")
        {
            inside_element = !trimmed.trim_end().ends_with("/>");
        } else if trimmed.starts_with("</node")
            || trimmed.starts_with("</way")
            || trimmed.starts_with("</relation")
        {
            inside_element = false;
        }

        if inside_element
            && trimmed.starts_with("<tag ")
            && kept.last().is_some_and(|prev| prev.trim() == line.trim())
        {
            removed += 1;
            continue;
        }
        kept.push(line);
    }

    let mut joined = kept.join("\n");
    if content.ends_with('\n') {
        joined.push('\n');
    }
    (joined, removed)
}
