use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clinic_core::{ClinicConfig, EnvValues};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod script;
mod shell;

use shell::{Outcome, Session};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic front desk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive front-desk shell (default)
    Shell {
        /// Admin id, to skip the login prompt
        #[arg(long)]
        admin_id: Option<String>,
        /// Admin password, to skip the login prompt
        #[arg(long)]
        password: Option<String>,
    },
    /// Run shell commands from a script file
    Run {
        /// Script with one shell command per line
        script: PathBuf,
        /// Admin id, if the script does not log in itself
        #[arg(long)]
        admin_id: Option<String>,
        /// Admin password, if the script does not log in itself
        #[arg(long)]
        password: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = ClinicConfig::from_env_values(EnvValues::collect(|key| std::env::var(key).ok()))?;
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Shell {
        admin_id: None,
        password: None,
    }) {
        Commands::Shell { admin_id, password } => {
            let mut session = Session::new(cfg);
            login_from_flags(&mut session, admin_id, password)?;
            run_interactive(&mut session)
        }
        Commands::Run {
            script,
            admin_id,
            password,
        } => {
            let mut session = Session::new(cfg);
            login_from_flags(&mut session, admin_id, password)?;
            let mut stdout = std::io::stdout().lock();
            let executed = script::run_script(&mut session, &script, &mut stdout)?;
            tracing::info!(executed, script = %script.display(), "script finished");
            Ok(())
        }
    }
}

fn login_from_flags(
    session: &mut Session,
    admin_id: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    match (admin_id, password) {
        (Some(id), Some(password)) => Ok(session.login(&id, &password)?),
        (None, None) => Ok(()),
        _ => anyhow::bail!("--admin-id and --password must be given together"),
    }
}

fn run_interactive(session: &mut Session) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;

    println!("Clinic front desk. Type 'help' for commands, 'quit' to leave.");
    if !session.is_logged_in() {
        println!("Log in with: login <admin_id> <password>");
    }

    loop {
        let line = match editor.readline("clinic> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        match session.execute_line(&line) {
            Ok(Outcome::Output(text)) if text.is_empty() => {}
            Ok(Outcome::Output(text)) => println!("{text}"),
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    let registry = session.registry();
    tracing::info!(
        patients = registry.patients().len(),
        pending_tokens = registry.pending_tokens().len(),
        "front desk session closed"
    );
    Ok(())
}
