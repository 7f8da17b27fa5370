//! Command-line driver.

use clap::{Parser, Subcommand};
use doodlepad_app::{AppConfig, AppError, AppResult, Script, Session};
use doodlepad_core::EditorAction;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "doodlepad", version, about = "Replay, export and clear doodles", long_about = None)]
struct Arguments {
    /// JSON config file
    #[arg(long, default_value = "doodlepad.json")]
    config: PathBuf,

    /// Directory drawings are saved in (overrides the config)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Feed a JSON event script through the editor
    Replay {
        script: PathBuf,

        /// Write the resulting surface as PNG
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Render the saved drawing to a PNG file
    Export { output: PathBuf },
    /// Erase the saved drawing
    Clear,
}

fn write_png(session: &Session, path: &Path) -> AppResult<()> {
    let png = session.current_surface_image().ok_or(AppError::NoSurface)?;
    std::fs::write(path, png)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn run(args: Arguments) -> AppResult<()> {
    let mut config = AppConfig::load(&args.config)?;
    if let Some(dir) = args.storage_dir {
        config.storage_dir = Some(dir);
    }

    let mut session = Session::open(&config)?;
    match args.command {
        Command::Replay { script, export } => {
            let script = Script::load(&script)?;
            session.mount();
            session.run_script(&script);
            if let Some(path) = export {
                write_png(&session, &path)?;
            }
        }
        Command::Export { output } => {
            session.mount();
            write_png(&session, &output)?;
        }
        Command::Clear => {
            session.apply(EditorAction::Clear);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting Doodlepad");

    if let Err(e) = run(Arguments::parse()) {
        log::error!("{}", e);
        eprintln!("doodlepad: {}", e);
        std::process::exit(1);
    }
}
