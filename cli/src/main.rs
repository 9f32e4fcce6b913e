mod http;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gallery::api::ApiClient;
use gallery::config::{self, ClientSettings};
use gallery::error::{ClientError, ConfigError, UploadError};
use gallery::session::StaticToken;
use gallery::upload::{self, LocalFile, UploadJob};
use serde_json::json;

use crate::http::ReqwestTransport;
use crate::render::{print_json, upload_name, upload_summary};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not read {path}: {source}")]
    ReadFile { path: String, source: std::io::Error },
    #[error("not a file name: {0}")]
    FileName(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gallery-cli", about = "Photo album API CLI")]
struct Cli {
    #[arg(long, env = "GALLERY_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// ID token sent as the bearer credential. Omit for anonymous reads.
    #[arg(long, env = "GALLERY_ID_TOKEN", hide_env_values = true)]
    id_token: Option<String>,

    #[arg(long, env = "GALLERY_STORAGE_BASE", default_value = config::DEFAULT_PUBLIC_STORAGE_BASE)]
    storage_base: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the identity-provider config the browser client would load.
    Config,
    /// Show what the current token grants.
    Whoami,
    Albums(AlbumsCommand),
    Photos(PhotosCommand),
    /// Upload files into an album, one at a time, in the order given.
    Upload {
        album_id: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct AlbumsCommand {
    #[command(subcommand)]
    command: AlbumsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AlbumsSubcommand {
    List,
    Create {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        album_id: String,
    },
}

#[derive(Args, Debug)]
struct PhotosCommand {
    #[command(subcommand)]
    command: PhotosSubcommand,
}

#[derive(Subcommand, Debug)]
enum PhotosSubcommand {
    List {
        album_id: String,
    },
    Describe {
        album_id: String,
        photo_id: String,
        description: String,
    },
    Delete {
        album_id: String,
        photo_id: String,
    },
}

type CliApi = ApiClient<ReqwestTransport, StaticToken>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = ClientSettings::with_api_base(cli.base_url);
    settings.public_storage_base = cli.storage_base;
    settings.validate()?;
    let api = ApiClient::new(ReqwestTransport::new()?, StaticToken(cli.id_token), settings);

    match cli.command {
        Command::Config => run_config(&api).await,
        Command::Whoami => run_whoami(&api).await,
        Command::Albums(albums) => run_albums(&api, albums).await,
        Command::Photos(photos) => run_photos(&api, photos).await,
        Command::Upload { album_id, files } => run_upload(&api, album_id, files).await,
    }
}

async fn run_config(api: &CliApi) -> Result<(), CliError> {
    let boot = config::bootstrap(api.transport(), api.settings()).await;
    tracing::info!(source = ?boot.source, "identity config resolved");
    print_json(&boot.config)
}

async fn run_whoami(api: &CliApi) -> Result<(), CliError> {
    let session = api.session().await;
    print_json(&json!({ "signed_in": session.signed_in, "is_admin": session.is_admin }))
}

async fn run_albums(api: &CliApi, albums: AlbumsCommand) -> Result<(), CliError> {
    match albums.command {
        AlbumsSubcommand::List => print_json(&api.list_albums().await?),
        AlbumsSubcommand::Create { title, description } => {
            let id = api.create_album(&title, &description).await?;
            print_json(&json!({ "id": id }))
        }
        AlbumsSubcommand::Delete { album_id } => {
            api.delete_album(&album_id).await?;
            println!("Deleted");
            Ok(())
        }
    }
}

async fn run_photos(api: &CliApi, photos: PhotosCommand) -> Result<(), CliError> {
    match photos.command {
        PhotosSubcommand::List { album_id } => print_json(&api.list_photos(&album_id).await?),
        PhotosSubcommand::Describe { album_id, photo_id, description } => {
            api.update_description(&album_id, &photo_id, &description).await?;
            println!("Updated");
            Ok(())
        }
        PhotosSubcommand::Delete { album_id, photo_id } => {
            api.delete_photo(&album_id, &photo_id).await?;
            println!("Deleted");
            Ok(())
        }
    }
}

async fn run_upload(api: &CliApi, album_id: String, paths: Vec<PathBuf>) -> Result<(), CliError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = upload_name(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CliError::ReadFile { path: path.display().to_string(), source })?;
        files.push(LocalFile::new(name, bytes));
    }

    let mut job = UploadJob::new(album_id, files)?;
    let result = upload::run(api, &mut job, |event| {
        if let Some(line) = event.status_line() {
            println!("{line}");
        }
    })
    .await;

    match result {
        Ok(_) => {
            println!("All uploaded");
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", upload_summary(&job));
            Err(err.into())
        }
    }
}
