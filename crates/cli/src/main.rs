//! AcaClick CLI - negocio registration and storefront personalization.
//!
//! # Usage
//!
//! ```bash
//! # Check credentials against the auth service
//! acaclick login -c owner@example.com
//!
//! # List active negocios, optionally for one owner
//! acaclick negocios list --usuario 7
//!
//! # Register a negocio from a YAML draft
//! acaclick negocios create --file negocio.yaml
//!
//! # Apply a YAML patch to a negocio's storefront and save it
//! acaclick negocios personalize 12 --file tienda.yaml --logo logo.png
//!
//! # Render the storefront preview to an HTML file
//! acaclick negocios preview 12 --out preview.html
//! ```
//!
//! # Environment Variables
//!
//! - `AUTH_API_URL` - auth service base URL
//! - `NEGOCIOS_API_URL` - negocios service base URL
//! - `ACACLICK_TOKEN` - access token sent to the negocios service
//! - `ACACLICK_PASSWORD` - password for `login`
//! - `MAX_IMAGE_BYTES` - size limit for images read from disk

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;

mod commands;

#[derive(Parser)]
#[command(name = "acaclick")]
#[command(author, version, about = "AcaClick CLI tools")]
struct Cli {
    /// Access token for the negocios service
    #[arg(long, env = "ACACLICK_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange credentials for a token pair and show who they belong to
    Login {
        /// Account email
        #[arg(short, long)]
        correo: String,

        /// Account password
        #[arg(long, env = "ACACLICK_PASSWORD", hide_env_values = true)]
        password: String,

        /// Log the access token so it can be exported as `ACACLICK_TOKEN`
        #[arg(long)]
        show_token: bool,
    },
    /// Manage negocios
    Negocios {
        #[command(subcommand)]
        action: NegociosAction,
    },
}

#[derive(Subcommand)]
enum NegociosAction {
    /// List active negocios
    List {
        /// Only negocios owned by this user id
        #[arg(short, long)]
        usuario: Option<i64>,
    },
    /// Show one negocio
    Show {
        /// Negocio id
        id: i64,
    },
    /// Register a negocio from a YAML draft
    Create {
        /// YAML file with the registration draft
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Apply a YAML patch to a negocio's storefront and save it
    Personalize {
        /// Negocio id
        id: i64,

        /// YAML mapping of personalization keys (`heroTitle`, `primaryColor`, ...)
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        images: commands::negocios::ImageArgs,
    },
    /// Render the storefront preview to HTML
    Preview {
        /// Negocio id; defaults are previewed when omitted
        id: Option<i64>,

        /// Output file
        #[arg(short, long, default_value = "preview.html")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env before clap reads ACACLICK_TOKEN / ACACLICK_PASSWORD
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let api = commands::api_client(cli.token.map(SecretString::from))?;

    match cli.command {
        Commands::Login {
            correo,
            password,
            show_token,
        } => {
            commands::auth::login(&api, correo, password, show_token).await?;
        }
        Commands::Negocios { action } => match action {
            NegociosAction::List { usuario } => commands::negocios::list(&api, usuario).await?,
            NegociosAction::Show { id } => commands::negocios::show(&api, id).await?,
            NegociosAction::Create { file } => {
                let media = commands::media_ingestor()?;
                commands::negocios::create(&api, media, &file).await?;
            }
            NegociosAction::Personalize { id, file, images } => {
                let media = commands::media_ingestor()?;
                commands::negocios::personalize(&api, media, id, file.as_deref(), &images)
                    .await?;
            }
            NegociosAction::Preview { id, out } => {
                commands::negocios::preview(&api, id, &out).await?;
            }
        },
    }
    Ok(())
}
