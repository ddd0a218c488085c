use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use halo_editor::config::{self, EditorConfig};
use halo_editor::preset::{self, PresetDocument};
use halo_editor::preview;
use halo_editor::session::{
    EMPTY_LIST_MESSAGE, Intent, IntentOutcome, ItemField, MoveDirection, Session,
};
use halo_editor::store::Store;
use halo_editor::sys::runtime;
use radial::{HexColor, SurfaceSize};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "halo-editor", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Session snapshot to edit (overrides storage.path from the config)
    #[arg(short = 'w', long, global = true)]
    workspace: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct SizeArgs {
    /// Preview width in pixels
    #[arg(long)]
    width: Option<u32>,
    /// Preview height in pixels
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the item list
    List,
    /// Append a new slice and select it
    Add,
    /// Copy the selected slice right after itself
    Duplicate,
    /// Remove the selected slice
    Remove,
    /// Move the selected slice one position
    Move { direction: MoveDirection },
    /// Select the slice at a 1-based position
    Select { position: usize },
    /// Edit a field of the selected slice (label, command, keybind, icon, color, weight)
    Set { field: ItemField, value: String },
    /// Change the global layout parameters
    Layout {
        /// Hub size as a fraction of the outer radius, 0 to 0.85
        #[arg(long)]
        inner_radius: Option<f64>,
        /// Gap between slices in degrees, 0 to 20
        #[arg(long)]
        gap: Option<f64>,
        #[arg(long)]
        background: Option<HexColor>,
    },
    /// Replace all slices with the ones from a preset file
    Import { file: PathBuf },
    /// Write the preset document for the menu host
    Export {
        file: Option<PathBuf>,
        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "file")]
        stdout: bool,
        #[arg(long)]
        name: Option<String>,
    },
    /// Render the current session to a PNG
    Render {
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        size: SizeArgs,
    },
    /// Re-render a preset file every time it changes
    Watch {
        preset: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        size: SizeArgs,
    },
    /// Restore the default preset
    Reset,
    /// Write a default config file if none exists
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = config::load_or_default();
    let store = Store::locate(cli.workspace.as_deref().or(config.storage.path.as_deref()));
    let mut session = store.load();

    let intent = match command {
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            return Ok(());
        }
        Commands::List => {
            print_rows(&session);
            return Ok(());
        }
        Commands::Export { file, stdout, name } => {
            return export(&session, &config, file, stdout, name);
        }
        Commands::Render { output, size } => {
            let output = output.unwrap_or_else(|| config.preview.output.clone());
            preview::render_png(&session, preview_size(&config, size), &output)?;
            println!("{}", output.display());
            return Ok(());
        }
        Commands::Watch {
            preset,
            output,
            size,
        } => {
            let output = output.unwrap_or_else(|| config.preview.output.clone());
            runtime::watch_preset(preset, output, preview_size(&config, size))?;
            return Ok(());
        }
        Commands::Layout {
            inner_radius,
            gap,
            background,
        } => {
            let intents = [
                inner_radius.map(Intent::SetInnerRadius),
                gap.map(Intent::SetGapAngle),
                background.map(Intent::SetBackground),
            ];
            let outcome = intents
                .into_iter()
                .flatten()
                .map(|intent| session.apply_intent(intent))
                .fold(IntentOutcome::default(), IntentOutcome::merge);
            return finish(&store, &session, outcome);
        }
        Commands::Add => Intent::Add,
        Commands::Duplicate => Intent::DuplicateSelected,
        Commands::Remove => Intent::RemoveSelected,
        Commands::Move { direction } => Intent::MoveSelected(direction),
        Commands::Select { position } => {
            let Some(id) = position.checked_sub(1).and_then(|i| session.id_at(i)) else {
                bail!(
                    "No slice at position {} (the list has {})",
                    position,
                    session.items().len()
                );
            };
            Intent::Select(id)
        }
        Commands::Set { field, value } => {
            if session.selected().is_none() {
                bail!("No slice is selected");
            }
            Intent::Edit(field.edit(&value)?)
        }
        Commands::Import { file } => {
            let import = preset::read_import(&file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            Intent::Import(import)
        }
        Commands::Reset => Intent::Reset,
    };

    let outcome = session.apply_intent(intent);
    finish(&store, &session, outcome)
}

fn finish(store: &Store, session: &Session, outcome: IntentOutcome) -> anyhow::Result<()> {
    if outcome.should_persist {
        store.save(session);
    } else {
        log::info!("Nothing changed");
    }
    print_rows(session);
    Ok(())
}

fn print_rows(session: &Session) {
    let rows = session.rows();
    if rows.is_empty() {
        println!("{}", EMPTY_LIST_MESSAGE);
    }
    for row in rows {
        println!("{}", row);
    }
}

fn preview_size(config: &EditorConfig, size: SizeArgs) -> SurfaceSize {
    SurfaceSize::new(
        f64::from(size.width.unwrap_or(config.preview.width)),
        f64::from(size.height.unwrap_or(config.preview.height)),
    )
}

fn export(
    session: &Session,
    config: &EditorConfig,
    file: Option<PathBuf>,
    stdout: bool,
    name: Option<String>,
) -> anyhow::Result<()> {
    let name = name.unwrap_or_else(|| config.preset.name.clone());
    let document = PresetDocument::from_session(session, &name, chrono::Utc::now());

    if stdout {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", document.to_json_pretty()?)?;
        return Ok(());
    }

    let path = file.unwrap_or_else(|| config.preset.export_file.clone());
    document.write(&path)?;
    log::info!("Exported {} items to {:?}", document.items.len(), path);
    println!("{}", path.display());
    Ok(())
}
