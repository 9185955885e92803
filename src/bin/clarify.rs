use clap::Parser;
use clarify_client::cli::utils::output_error;
use clarify_client::cli::{Cli, OutputFormat};
use clarify_client::ClientError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so CLARIFY_API_URL and friends apply to local runs
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = clarify_client::cli::run(cli).await {
        match (output_format, std::env::var("CLI_VERBOSE").as_deref()) {
            (OutputFormat::Json, _) => {
                let code = e.downcast_ref::<ClientError>().map(ClientError::error_code);
                output_error(&output_format, &e.to_string(), code)?;
            }
            (_, Ok("true") | Ok("1")) => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
