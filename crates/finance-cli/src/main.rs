//! `finance-server`: stock KPI tools over MCP stdio
//!
//! ```bash
//! # Serve tools to an MCP client (default)
//! finance-server serve
//!
//! # One-off call from the shell
//! finance-server call get_valuation_metrics AAPL
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use finance_mcp::{MCPServer, ServerConfig};
use finance_stock::{
    DataProvider, StockConfig, ToolDispatcher, ToolKind, provider_from_config,
    register_stock_tools,
};
use finance_tools::ToolRegistry;
use finance_utils::LogFormat;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "finance-server", version)]
#[command(about = "Stock KPI tools served over the Model Context Protocol", long_about = None)]
struct Cli {
    /// Data provider: yahoo or alpha-vantage
    #[arg(long, global = true)]
    provider: Option<DataProvider>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log format on stderr: text or json
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// MCP server settings (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Serve the tools over stdin/stdout
    Serve,
    /// Run one tool and print its report
    Call {
        /// Tool name, e.g. get_market_cap
        tool: String,
        /// Ticker symbol
        ticker: Option<String>,
    },
    /// List tool names and descriptions
    Tools,
    /// Print the KPI catalogue
    Kpis,
}

impl Cli {
    fn stock_config(&self) -> anyhow::Result<StockConfig> {
        let mut builder = StockConfig::builder();
        if let Some(provider) = self.provider {
            builder = builder.provider(provider);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        builder
            .with_env()
            .build()
            .context("invalid stock data configuration")
    }

    fn server_config(&self, app_name: &str) -> anyhow::Result<ServerConfig> {
        match &self.config {
            Some(path) => ServerConfig::from_file(path)
                .with_context(|| format!("failed to load {}", path.display())),
            None => Ok(ServerConfig::default().with_name(app_name)),
        }
    }
}

fn print_banner() {
    eprintln!("Starting finance MCP server...");
    eprintln!("Available functions:");
    for kind in ToolKind::ALL {
        eprintln!("- {}", kind.name());
    }
}

/// Arguments for a one-off call, checked against the tool catalogue
fn call_params(tool: &str, ticker: Option<&str>) -> anyhow::Result<serde_json::Value> {
    let kind = ToolKind::from_name(tool).with_context(|| {
        format!("unknown tool '{tool}', run `finance-server tools` for the list")
    })?;

    match (kind.requires_ticker(), ticker) {
        (true, Some(ticker)) => Ok(json!({ "ticker": ticker })),
        (true, None) => anyhow::bail!("{tool} needs a ticker argument"),
        (false, _) => Ok(json!({})),
    }
}

fn build_registry(config: &StockConfig) -> anyhow::Result<Arc<ToolRegistry>> {
    let lookup = provider_from_config(config)?;
    let dispatcher = Arc::new(ToolDispatcher::new(lookup));

    let mut registry = ToolRegistry::new();
    register_stock_tools(&mut registry, dispatcher);
    Ok(Arc::new(registry))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = finance_utils::Config::from_env();
    if let Some(format) = cli.log_format {
        log_config.log_format = format;
    }
    log_config.init_tracing();

    match cli.command.as_ref().unwrap_or(&Command::Serve) {
        Command::Serve => {
            let stock_config = cli.stock_config()?;
            let registry = build_registry(&stock_config)?;
            let server = MCPServer::new(cli.server_config(&log_config.app_name)?, registry);

            print_banner();
            info!(
                app = %log_config.app_name,
                provider = ?stock_config.provider,
                "serving on stdio"
            );
            server.serve_stdio().await?;
        }
        Command::Call { tool, ticker } => {
            let params = call_params(tool, ticker.as_deref())?;
            let registry = build_registry(&cli.stock_config()?)?;
            let output = registry.call(tool, params).await?;
            match output.as_str() {
                Some(text) => println!("{text}"),
                None => println!("{}", serde_json::to_string_pretty(&output)?),
            }
        }
        Command::Tools => {
            for kind in ToolKind::ALL {
                println!("{:<30} {}", kind.name(), kind.description());
            }
        }
        Command::Kpis => {
            println!("{}", finance_stock::report::list_available_kpis());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::try_parse_from(["finance-server"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_call_command() {
        let cli = Cli::try_parse_from([
            "finance-server",
            "call",
            "get_market_cap",
            "AAPL",
            "--provider",
            "yahoo",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Command::Call {
                tool: "get_market_cap".to_string(),
                ticker: Some("AAPL".to_string()),
            })
        );
        assert_eq!(cli.provider, Some(DataProvider::Yahoo));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "finance-server",
            "--timeout-secs",
            "5",
            "--log-format",
            "json",
            "serve",
        ])
        .unwrap();

        assert_eq!(cli.timeout_secs, Some(5));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert_eq!(cli.command, Some(Command::Serve));
    }

    #[test]
    fn test_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["finance-server", "--provider", "bloomberg"]).is_err());
    }

    #[test]
    fn test_server_name_defaults_to_app_name() {
        let cli = Cli::try_parse_from(["finance-server", "serve"]).unwrap();
        let config = cli.server_config("stocks-desk").unwrap();
        assert_eq!(config.name, "stocks-desk");
    }

    #[test]
    fn test_call_params() {
        assert_eq!(
            call_params("get_market_cap", Some("AAPL")).unwrap(),
            json!({"ticker": "AAPL"})
        );
        assert_eq!(call_params("list_available_kpis", None).unwrap(), json!({}));
        assert!(call_params("get_market_cap", None).is_err());
        assert!(call_params("get_price", Some("AAPL")).is_err());
    }

    #[test]
    fn test_build_registry() {
        let registry = build_registry(&StockConfig::default()).unwrap();
        assert_eq!(registry.len(), ToolKind::ALL.len());
    }
}
