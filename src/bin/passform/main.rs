use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use passform::{
    Action, CharacterClass, CharacterClasses, FormError, FormState, IndexSource, Secret,
};

mod clipboard;
mod config;
mod interactive;

#[derive(Parser)]
#[command(version, about = "Configure and generate random passwords.")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a single password from the given options and print it.
    Generate(GenerateArgs),
    /// Fill in the password form interactively. This is the default.
    Interactive(CommonArgs),
}

#[derive(clap::Args, Default)]
struct CommonArgs {
    /// YAML file holding default form values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed the random number generator, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::Args)]
struct GenerateArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Password length, between 4 and 16.
    #[arg(short, long)]
    length: Option<String>,
    /// Include uppercase letters.
    #[arg(long)]
    upper: bool,
    /// Leave out lowercase letters.
    #[arg(long)]
    no_lower: bool,
    /// Include digits.
    #[arg(long)]
    digits: bool,
    /// Include symbols.
    #[arg(long)]
    symbols: bool,
    /// Copy the password to the clipboard instead of printing it.
    #[arg(long)]
    copy: bool,
    /// Print the result as a JSON object.
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn apply_to(&self, mut classes: CharacterClasses) -> CharacterClasses {
        if self.upper {
            classes.upper = true;
        }
        if self.no_lower {
            classes.lower = false;
        }
        if self.digits {
            classes.digits = true;
        }
        if self.symbols {
            classes.symbols = true;
        }
        classes
    }
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    match args.command {
        Some(Command::Generate(args)) => generate(args)?,
        Some(Command::Interactive(common)) => run_interactive(common)?,
        None => run_interactive(CommonArgs::default())?,
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("Error: {err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            log::debug!("using seeded generator ({})", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Feed the actions needed to turn `state`'s character classes into `target`.
pub(crate) fn toggle_towards<S>(
    mut state: FormState,
    target: CharacterClasses,
    source: &mut S,
) -> FormState
where
    S: IndexSource + ?Sized,
{
    for class in CharacterClass::ALL {
        if state.classes().is_enabled(class) != target.is_enabled(class) {
            state = state.reduce(Action::ToggleClass(class), source);
        }
    }
    state
}

fn initial_state(config: &config::Config, rng: &mut StdRng) -> FormState {
    let mut state = FormState::new();
    for action in config.actions(state.classes()) {
        state = state.reduce(action, rng);
    }
    state
}

fn generate(args: GenerateArgs) -> Result<(), ProgError> {
    let config = config::load(args.common.config.clone())?;
    let mut rng = rng_from_seed(args.common.seed);

    let mut state = initial_state(&config, &mut rng);
    if let Some(length) = args.length.clone() {
        state = state.reduce(Action::SetLength(length), &mut rng);
    }
    let target = args.apply_to(state.classes());
    state = toggle_towards(state, target, &mut rng);

    state.validate()?;
    state = state.reduce(Action::Submit, &mut rng);
    let password = state
        .password()
        .context("the form accepted the submission but produced no password")?;

    if args.copy {
        clipboard::send_to_clipboard(password.as_str().as_bytes())?;
        eprintln!("Copied to the clipboard.");
    } else if args.json {
        let output = GeneratedJson {
            password,
            length: password.char_count(),
        };
        let json = serde_json::to_string(&output).context("failed to encode result as JSON")?;
        println!("{}", json);
    } else {
        println!("{}", password.as_str());
    }
    Ok(())
}

fn run_interactive(common: CommonArgs) -> Result<(), ProgError> {
    let config = config::load(common.config)?;
    let mut rng = rng_from_seed(common.seed);
    let state = initial_state(&config, &mut rng);
    interactive::run_form(state, &mut rng)
}

#[derive(Serialize)]
struct GeneratedJson<'a> {
    password: &'a Secret,
    length: usize,
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("{0}")]
    Form(#[from] FormError),
    #[error("There is no generated password to copy yet.")]
    NothingToCopy,
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}
