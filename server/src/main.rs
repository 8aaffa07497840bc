use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod handlers;
mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding index.html and the built wasm bundle.
    #[arg(long)]
    public_dir: Option<PathBuf>,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    #[arg(long)]
    debug: bool,
}

fn default_public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    let public_dir = args.public_dir.unwrap_or_else(default_public_dir);
    if !public_dir.join("index.html").is_file() {
        tracing::warn!("no index.html in {}", public_dir.display());
    }
    let app = handlers::router(public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Inkpad running at http://localhost:{}", args.port);
    axum::serve(listener, app).await.context("server crashed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_are_parsed() {
        let args =
            Args::try_parse_from(["inkpad_server", "--public-dir", "/srv/ink", "--port", "8080"])
                .unwrap();
        assert_eq!(args.public_dir, Some(PathBuf::from("/srv/ink")));
        assert_eq!(args.port, 8080);
        assert!(!args.debug);
    }

    #[test]
    fn port_must_be_numeric() {
        assert!(Args::try_parse_from(["inkpad_server", "--port", "http"]).is_err());
    }
}
