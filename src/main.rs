use clap::Parser;
use passgen::{GenerationConfig, PasswordGenerator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

/// Rule-driven random password generator
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Minimum password length
    #[arg(long = "min", default_value_t = 8)]
    min_len: usize,

    /// Maximum password length
    #[arg(long = "max", default_value_t = 12)]
    max_len: usize,

    /// Number of passwords to generate
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Path to the JSON configuration file
    #[arg(long, default_value = "default.json")]
    config: PathBuf,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            min_len: self.min_len,
            max_len: self.max_len,
            count: self.count,
            seed: self.seed,
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
    }
}

fn run(cli: &Cli) -> passgen::Result<()> {
    let config = cli.generation_config();
    config.validate()?;

    debug!(config = %cli.config.display(), "Loading generator");
    let generator = PasswordGenerator::from_config_file(&cli.config)?;

    let mut rng = config.rng();
    for password in generator.generate(&config, &mut rng) {
        let password = password?;
        println!("{} [{}]", password, password.chars().count());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
