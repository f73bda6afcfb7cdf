//! taxonet CLI: semantic network engine with attribute inheritance.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use taxonet::engine::Engine;
use taxonet::query;

#[derive(Parser)]
#[command(name = "taxonet", version, about = "Semantic network engine with attribute inheritance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a facts file and answer queries interactively.
    Repl {
        /// Path to the facts file.
        file: PathBuf,
    },

    /// Load a facts file and answer a single query.
    Ask {
        /// Path to the facts file.
        file: PathBuf,
        /// The query, e.g. "atributo sound de Rex?".
        query: String,
    },

    /// Load a facts file and print network statistics.
    Info {
        /// Path to the facts file.
        file: PathBuf,
    },

    /// Load a facts file and print the entity table as JSON.
    Export {
        /// Path to the facts file.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Repl { file } => {
            let engine = load(&file)?;
            println!("Network loaded from {}.", file.display());
            print!("{}", engine.info());
            println!("Type queries and press Enter; 'salir', 'exit' or 'quit' ends the session.");
            println!("Examples:");
            println!("  atributo sound de Rex?");
            println!("  clases o instancias con atributo sound y valor generic?");
            repl(&engine)?;
        }

        Commands::Ask { file, query: q } => {
            let engine = load(&file)?;
            println!("{}", query::answer(&engine, &q));
        }

        Commands::Info { file } => {
            let engine = load(&file)?;
            print!("{}", engine.info());
        }

        Commands::Export { file } => {
            let engine = load(&file)?;
            let entries = engine.export_entities();
            let json = serde_json::to_string_pretty(&entries).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}

fn load(file: &Path) -> Result<Engine> {
    let engine = Engine::new();
    engine.load_path(file)?;
    Ok(engine)
}

/// Line-oriented prompt loop. Exits on EOF or an exit keyword.
fn repl(engine: &Engine) -> Result<()> {
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().into_diagnostic()?;

        let mut line = String::new();
        let read = stdin.read_line(&mut line).into_diagnostic()?;
        if read == 0 {
            // EOF
            println!();
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "salir" | "exit" | "quit") {
            break;
        }
        println!("{}", query::answer(engine, input));
    }
    Ok(())
}
