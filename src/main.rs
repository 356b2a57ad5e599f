use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use synonyms::{AppState, Index, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DICT_DIR: &str = "dict";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!("using wordnet dictionary at {}", config.dict_dir.display());

    let start = Instant::now();
    let index = Index::load(&config.dict_dir)
        .with_context(|| format!("loading dictionary from {}", config.dict_dir.display()))?;
    info!("index built in {} ms", start.elapsed().as_millis());

    let app = router(AppState { index }).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen address")?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    dict_dir: PathBuf,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    port: Option<u16>,
    dict_dir: Option<PathBuf>,
    unrecognised: Vec<String>,
}

fn parse_args<I: IntoIterator<Item = String>>(raw: I) -> CliArgs {
    let mut cli = CliArgs::default();
    let mut args = raw.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dict-dir" => match args.next() {
                Some(path) => cli.dict_dir = Some(PathBuf::from(path)),
                None => cli.unrecognised.push(arg),
            },
            _ => {
                if let Some(path) = arg.strip_prefix("--dict-dir=") {
                    cli.dict_dir = Some(PathBuf::from(path));
                } else if let (None, Ok(port)) = (cli.port, arg.parse::<u16>()) {
                    cli.port = Some(port);
                } else {
                    cli.unrecognised.push(arg);
                }
            }
        }
    }
    cli
}

fn load_config() -> Config {
    let cli = parse_args(env::args().skip(1));
    for arg in &cli.unrecognised {
        warn!("ignoring unrecognised argument {arg:?}");
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = cli
        .port
        .or_else(|| env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()))
        .unwrap_or(DEFAULT_PORT);
    let dict_dir = cli
        .dict_dir
        .or_else(|| env::var("WORDNET_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_DIR));

    Config {
        host,
        port,
        dict_dir,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
