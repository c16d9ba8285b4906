//! CLI entry point for `rlsgen`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use rlsgen::policy::manifest::{ManifestPolicy, PolicyManifest};
use rlsgen::render::statement::manifest_to_sql;

#[derive(Parser)]
#[command(
    name = "rlsgen",
    about = "Render declarative RLS policy manifests into CREATE POLICY SQL"
)]
struct Cli {
    /// Input policy manifest files (JSON)
    #[arg(required_unless_present = "manifest_dir")]
    input: Vec<PathBuf>,

    /// Process all .json manifests in directory
    #[arg(long)]
    manifest_dir: Option<PathBuf>,

    /// Write the generated script to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Collect input files
    let mut manifest_files = cli.input.clone();
    if let Some(dir) = &cli.manifest_dir {
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|e| e == "json") {
                        manifest_files.push(path);
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading manifest directory: {e}");
                process::exit(2);
            }
        }
    }

    if manifest_files.is_empty() {
        eprintln!("No input manifest files provided");
        process::exit(2);
    }

    // Load and merge manifests in input order
    let mut policies: Vec<ManifestPolicy> = Vec::new();
    for path in &manifest_files {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(2);
            }
        };
        match PolicyManifest::from_json(&content) {
            Ok(manifest) => {
                if cli.verbose {
                    eprintln!(
                        "Loaded {} policies from {}",
                        manifest.policies.len(),
                        path.display()
                    );
                }
                policies.extend(manifest.policies);
            }
            Err(e) => {
                eprintln!("Error parsing {}: {e}", path.display());
                process::exit(2);
            }
        }
    }

    let merged = PolicyManifest { policies };
    let script = match manifest_to_sql(&merged) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Render error: {e}");
            process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{script}\n")) {
                eprintln!("Error writing {}: {e}", path.display());
                process::exit(2);
            }
        }
        None => println!("{script}"),
    }
}
