use clap::{Parser, Subcommand};
use palmline_cli::{analyze_file, builtin_preset, resolve_preset, write_report_images};
use palmline_core::presets;
use rayon::prelude::*;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Parser)]
#[command(name = "palmline")]
#[command(version, about = "Palm photo line analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single palm photo and print the JSON report
    Analyze {
        /// Input image file (png, jpg, jpeg, webp)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Pipeline preset: built-in name or a YAML file
        #[arg(short, long, value_name = "PRESET", default_value = "standard")]
        preset: String,

        /// Also write the rendered overlay and edge images here
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,

        /// Enable debug output showing intermediate statistics
        #[arg(long)]
        verbose: bool,
    },

    /// Analyze multiple photos in parallel, one JSON report per line
    Batch {
        /// Input image files
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Pipeline preset: built-in name or a YAML file
        #[arg(short, long, value_name = "PRESET", default_value = "standard")]
        preset: String,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Inspect and export pipeline presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// List the built-in presets
    List,

    /// Print a preset as YAML
    Show {
        /// Built-in preset name
        name: String,
    },

    /// Write a preset to a YAML file for tuning
    Export {
        /// Built-in preset name
        name: String,

        /// Output file
        out: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(message) = run(cli) {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Analyze {
            input,
            preset,
            out,
            pretty,
            verbose,
        } => {
            palmline_core::config::set_verbose(verbose);
            let preset = resolve_preset(&preset)?;
            let report = analyze_file(&input, &preset)?;

            if let Some(dir) = out {
                let stem = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("palm");
                write_report_images(&report, &dir, stem)?;
            }

            let json = if pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
            println!("{}", json);
            Ok(())
        }

        Commands::Batch {
            inputs,
            preset,
            threads,
        } => {
            if inputs.is_empty() {
                return Err("No input files given".to_string());
            }

            let preset = resolve_preset(&preset)?;

            if let Some(count) = threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(count)
                    .build_global()
                    .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
            }

            let failures = AtomicUsize::new(0);
            inputs.par_iter().for_each(|path| {
                match analyze_file(path, &preset) {
                    Ok(report) => {
                        let line = serde_json::json!({
                            "file": path.display().to_string(),
                            "report": report,
                        });
                        println!("{}", line);
                    }
                    Err(message) => {
                        failures.fetch_add(1, Ordering::SeqCst);
                        let line = serde_json::json!({
                            "file": path.display().to_string(),
                            "error": message,
                        });
                        println!("{}", line);
                    }
                }
            });

            let failed = failures.load(Ordering::SeqCst);
            if failed > 0 {
                Err(format!("{} of {} files failed", failed, inputs.len()))
            } else {
                Ok(())
            }
        }

        Commands::Preset { action } => match action {
            PresetAction::List => {
                for name in presets::builtin_names() {
                    println!("{}", name);
                }
                Ok(())
            }
            PresetAction::Show { name } => {
                let preset = builtin_preset(&name)?;
                let yaml = serde_yaml::to_string(&preset)
                    .map_err(|e| format!("Failed to serialize preset: {}", e))?;
                print!("{}", yaml);
                Ok(())
            }
            PresetAction::Export { name, out } => {
                let preset = builtin_preset(&name)?;
                presets::save_preset(&preset, &out)?;
                println!("Wrote {}", out.display());
                Ok(())
            }
        },
    }
}
