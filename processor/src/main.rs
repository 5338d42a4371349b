//! SFS Histo CLI - reshape SFS site-activity exports
//!
//! ```bash
//! sfs-histo run                          # inputs/*.csv -> outputs/
//! sfs-histo run data/ -o out/ -c columns.json
//! sfs-histo run --file zone1.csv         # one file only
//! sfs-histo default-config               # print the built-in column spec
//! sfs-histo inspect inputs/zone1.csv     # show what the parser sees
//! ```

use clap::{Parser, Subcommand};
use sfs_histo::{read_table, ColumnSpec, PipelineConfig, Processor, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sfs-histo")]
#[command(about = "Reshape SFS site-activity CSV exports into the histo layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every CSV file of a directory
    Run {
        /// Directory containing the exports
        #[arg(default_value = DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,

        /// Directory receiving reshaped files
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Column spec JSON (built-in recipe if not specified)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Process only these files, in this order
        #[arg(short, long = "file")]
        files: Vec<String>,
    },

    /// Print the built-in column spec as JSON
    DefaultConfig,

    /// Load a CSV file and show its encoding, columns and row count
    Inspect {
        /// Input CSV file
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input_dir,
            output_dir,
            config,
            files,
        } => cmd_run(input_dir, output_dir, config.as_deref(), files),

        Commands::DefaultConfig => cmd_default_config(),

        Commands::Inspect { input } => cmd_inspect(&input),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_run(
    input_dir: PathBuf,
    output_dir: PathBuf,
    config_path: Option<&Path>,
    files: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = match config_path {
        Some(path) => {
            eprintln!("⚙️  Column spec: {}", path.display());
            ColumnSpec::load(path)?
        }
        None => ColumnSpec::default_recipe(),
    };

    eprintln!("📂 {} → {}", input_dir.display(), output_dir.display());
    let processor = Processor::new(spec, PipelineConfig { input_dir, output_dir })?;

    let report = if files.is_empty() {
        processor.run_dir()?
    } else {
        processor.start(files)
    };

    if !report.is_ok() {
        eprintln!("\n❌ Failed files:");
        for failure in &report.failed {
            let stage = failure.stage.map(|s| s.to_string()).unwrap_or_else(|| "setup".to_string());
            eprintln!("   - {} ({}): {}", failure.file_name, stage, failure.message);
        }
        std::process::exit(1);
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_default_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", ColumnSpec::default_recipe().to_json()?);
    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = read_table(input)?;
    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Columns ({}):", result.table.columns().len());
    for (i, col) in result.table.columns().iter().enumerate() {
        eprintln!("   [{:2}] {}", i + 1, col);
    }
    eprintln!("✅ Parsed {} rows", result.table.row_count());

    Ok(())
}
