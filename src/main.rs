use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::fs;
use std::path::PathBuf;
use std::process;
use vyper_gen::{convert, ContractInput, ConverterConfig};

#[derive(Parser)]
#[command(name = "vyper-gen", about = "Structured program generator for a Vyper-like target language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a JSON-encoded input tree into target-language source text.
    Convert {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the conversion `--runs` times and assert byte-identical output.
    CheckDeterminism {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        seed: u64,
        #[arg(long, default_value_t = 10)]
        runs: u32,
    },
    /// Print shell completions for this CLI to stdout.
    Completions {
        shell: Shell,
    },
}

fn load_input(path: &PathBuf) -> Result<ContractInput, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("parsing {}: {e}", path.display()))
}

fn load_config(path: &Option<PathBuf>) -> Result<ConverterConfig, String> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p).map_err(|e| format!("reading {}: {e}", p.display()))?;
            ConverterConfig::from_toml(&text).map_err(|e| e.to_string())
        }
        None => Ok(ConverterConfig::default()),
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert { input, seed, config, output } => {
            let contract = load_input(&input)?;
            let cfg = load_config(&config)?;
            let rendered = convert(&contract, seed, &cfg).map_err(|e| e.to_string())?;
            match output {
                Some(path) => fs::write(&path, rendered).map_err(|e| format!("writing {}: {e}", path.display()))?,
                None => print!("{rendered}"),
            }
            Ok(())
        }
        Command::CheckDeterminism { input, seed, runs } => {
            let contract = load_input(&input)?;
            let cfg = ConverterConfig::default();
            let first = convert(&contract, seed, &cfg).map_err(|e| e.to_string())?;
            for run in 1..runs {
                let next = convert(&contract, seed, &cfg).map_err(|e| e.to_string())?;
                if next != first {
                    return Err(format!("output diverged on run {run} of {runs}"));
                }
            }
            println!("deterministic across {runs} runs");
            Ok(())
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
