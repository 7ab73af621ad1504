use clap::{Parser, Subcommand};
use ivrx_catalog::{Catalog, CatalogLoader, YamlCatalogSource};
use ivrx_core::{core_config_from_env_values, project, CoreConfig, EditorSession};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod draft;

#[derive(Parser)]
#[command(name = "ivrx")]
#[command(about = "Intravenous injection prescription pad")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a blank prescription draft as YAML
    Blank,
    /// Render a prescription draft as a printable page
    Print {
        /// Path to the draft YAML file
        draft: PathBuf,
        /// Emit the projected print document as JSON instead of the page
        #[arg(long)]
        json: bool,
    },
    /// List the medicine and canned prescription catalog
    Catalog {
        /// Catalog YAML file (overrides IVRX_CATALOG_PATH)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Entry point for the `ivrx` command.
///
/// # Environment Variables
/// - `IVRX_HOSPITAL_TITLE`: heading printed on the page (default: "注射处方签")
/// - `IVRX_DEFAULT_DEPARTMENT`: department for new prescriptions (default: "中西医结合科/中医科")
/// - `IVRX_CATALOG_PATH`: catalog YAML file (default: none, empty catalog)
/// - `RUST_LOG`: log filter, on top of the default `ivrx=info`
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ivrx=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Arc::new(core_config_from_env_values(
        std::env::var("IVRX_HOSPITAL_TITLE").ok(),
        std::env::var("IVRX_DEFAULT_DEPARTMENT").ok(),
        std::env::var("IVRX_CATALOG_PATH").ok(),
    )?);

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Blank) => {
            let session = EditorSession::start(config.clone(), Catalog::empty());
            print!("{}", draft::blank_render(&session.finish())?);
        }
        Some(Commands::Print { draft, json }) => {
            let prescription = draft::draft_load(&draft)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&project(&prescription))?);
            } else {
                let session = EditorSession::resume(config.clone(), Catalog::empty(), prescription);
                print!("{}", session.page_render());
            }
        }
        Some(Commands::Catalog { path }) => {
            let catalog = catalog_load(&config, path);
            catalog_print(&catalog);
        }
        None => {
            // Without a command, show a blank page under the configured title.
            let session = EditorSession::start(config.clone(), Catalog::empty());
            print!("{}", session.page_render());
            eprintln!("Use 'ivrx --help' for commands");
        }
    }

    Ok(())
}

fn catalog_load(config: &CoreConfig, path: Option<PathBuf>) -> Catalog {
    match path.or_else(|| config.catalog_path().map(PathBuf::from)) {
        Some(path) => CatalogLoader::new().load(&YamlCatalogSource::new(path)),
        None => {
            tracing::warn!("no catalog path configured, set IVRX_CATALOG_PATH or pass --path");
            Catalog::empty()
        }
    }
}

fn catalog_print(catalog: &Catalog) {
    if catalog.is_empty() {
        println!("Catalog is empty.");
        return;
    }

    println!("Medicines:");
    for group in catalog.medicine_groups() {
        println!("  [{}]", group.system);
        for medicine in &group.medicines {
            println!("    {}", medicine.reference());
        }
    }

    println!("Canned prescriptions:");
    for group in catalog.canned_groups() {
        println!("  [{}]", group.system);
        for canned in &group.prescriptions {
            println!("    {}: {}", canned.name, canned.content);
        }
    }
}
