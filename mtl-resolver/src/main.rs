//! MTL resolver CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mtl_resolver::present::{proof_lines, render_report, txt_hint};
use mtl_resolver::query::verify_exported;
use mtl_resolver::{Resolver, ResolverConfig};
use mtl_types::Digest;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "mtl")]
#[command(about = "Merkle Tree Ladder signatures for DNS record sets", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, default_value = "mtl.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration with a sample zone
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Query a record set and advance its epoch
    Query {
        /// Record set type, e.g. A, AAAA, TXT
        rtype: String,

        /// Leaf to prove
        #[arg(short, long, default_value_t = 0)]
        leaf: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an inclusion proof as JSON without advancing the epoch
    Prove {
        /// Record set type
        rtype: String,

        /// Leaf to prove
        #[arg(short, long, default_value_t = 0)]
        leaf: usize,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify an exported proof for a record against a root
    Verify {
        /// Record text, exactly as served
        #[arg(long)]
        record: String,

        /// Proof JSON file
        #[arg(long)]
        proof: PathBuf,

        /// Expected root (hex)
        #[arg(long)]
        root: String,
    },

    /// List the latest root stored for every record set
    Roots,

    /// Interactive query loop
    Repl,
}

fn load_config(path: &Path) -> Result<ResolverConfig> {
    if !path.exists() {
        eprintln!("Configuration file not found: {}", path.display());
        eprintln!("Creating default configuration...");
        ResolverConfig::default().to_file(path)?;
        eprintln!("Default configuration saved to {}", path.display());
        anyhow::bail!("edit the configuration and run the command again");
    }

    ResolverConfig::from_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))
}

fn open(path: &Path) -> Result<(ResolverConfig, Resolver)> {
    let config = load_config(path)?;
    let resolver = Resolver::from_config(&config)?;
    Ok((config, resolver))
}

fn run_repl(resolver: &Resolver) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let prompt = format!(
        "\nEnter query ({}) or 'exit': ",
        resolver.types().join(", ")
    );

    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", prompt);
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "exit" => break,
            rtype => match resolver.query(rtype, 0) {
                Ok(report) => print!("\n{}", render_report(&report)),
                Err(e) => println!("Error: {}", e),
            },
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { force } => {
            if cli.config.exists() && !force {
                anyhow::bail!(
                    "{} already exists, pass --force to overwrite",
                    cli.config.display()
                );
            }
            ResolverConfig::default().to_file(&cli.config)?;
            println!("Default configuration saved to {}", cli.config.display());
        }

        Commands::Query { rtype, leaf, json } => {
            let (_, resolver) = open(&cli.config)?;
            let report = resolver.query(&rtype, leaf)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }

        Commands::Prove { rtype, leaf, output } => {
            let (_, resolver) = open(&cli.config)?;
            let proof = resolver.prove(&rtype, leaf)?;
            let json = serde_json::to_string_pretty(&proof)?;

            if let Some(output_path) = output {
                std::fs::write(&output_path, json)?;
                println!("Proof exported to {}", output_path.display());
            } else {
                println!("{}", json);
            }
        }

        Commands::Verify { record, proof, root } => {
            let root = Digest::from_hex(&root)?;
            let json = std::fs::read_to_string(&proof)
                .with_context(|| format!("Failed to read {}", proof.display()))?;

            let proof = verify_exported(record.as_bytes(), &json, &root)?;

            println!("Proof verified successfully");
            println!("Leaf Index: {}", proof.leaf_index);
            println!("Algorithm:  {}", proof.algorithm);
            println!("Root:       {}", root);
            for line in proof_lines(&proof.siblings) {
                println!("{}", line);
            }
        }

        Commands::Roots => {
            let (config, resolver) = open(&cli.config)?;
            let roots = resolver.latest_roots()?;

            if roots.is_empty() {
                println!("No stored roots");
            } else {
                println!("Stored roots ({})", roots.len());
                println!();
                for (id, root) in roots {
                    println!("Record set: {}", id);
                    println!("Root:       {}", root);
                    println!("Hint:       {}", txt_hint(id.owner(), config.zone.hint_ttl, &root));
                    println!();
                }
            }
        }

        Commands::Repl => {
            let (_, resolver) = open(&cli.config)?;
            run_repl(&resolver)?;
        }
    }

    Ok(())
}
