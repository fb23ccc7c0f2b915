use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transit_mcp::{http, mcp, TransitConfig, TransitServer};

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so it can feed the configuration below.
    let loaded_dotenv = dotenvy::dotenv().is_ok();
    let config = TransitConfig::from_env()?;

    // Logs go to stderr; stdout belongs to the stdio JSON-RPC channel.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "transit_mcp={}",
                    config.server.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if loaded_dotenv {
        tracing::info!("Loaded .env");
    }

    tracing::info!("Starting Transit MCP Server");
    tracing::info!(
        "Configuration loaded: transport={}, port={}",
        config.server.transport,
        config.server.port
    );

    let server = TransitServer::new(config);

    let tools = server.catalog().list();
    tracing::info!("Available tools: {}", tools.len());
    for tool in tools {
        tracing::info!("  - {}: {}", tool.name, tool.description);
    }

    match server.config().server.transport.to_lowercase().as_str() {
        "http" => {
            tracing::info!(
                "Transit MCP Server running with HTTP transport on port {}",
                server.config().server.port
            );
            http::run_http_server(server).await
        }
        _ => {
            tracing::info!("Transit MCP Server running with stdio transport");
            run_stdio_server(server).await
        }
    }
}

async fn run_stdio_server(server: TransitServer) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => break, // EOF
            Ok(_) => {
                let message = line.trim();
                if message.is_empty() {
                    continue;
                }

                tracing::debug!("Received: {}", message);

                // Notifications produce no envelope on stdio.
                if let Some(response) = mcp::dispatch_raw(&server, message).await {
                    let response_json = serde_json::to_string(&response)?;
                    tracing::debug!("Sending: {}", response_json);
                    stdout.write_all(response_json.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
            Err(e) => {
                tracing::error!("Error reading from stdin: {}", e);
                break;
            }
        }
    }

    tracing::info!("Transit MCP Server shutting down");
    Ok(())
}
