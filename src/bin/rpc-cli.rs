use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "rpc-cli")]
#[command(about = "Command-line client for the failover JSON-RPC proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check proxy liveness
    Health,
    /// Send a JSON-RPC call through the proxy
    Call {
        /// Method name, e.g. eth_blockNumber
        method: String,
        /// Positional params as a JSON array
        #[arg(default_value = "[]")]
        params: String,
        /// Request id
        #[arg(long, default_value_t = 1)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Call { method, params, id } => {
            let params: Value = serde_json::from_str(&params)?;
            if !params.is_array() {
                return Err("params must be a JSON array".into());
            }
            let body = json!({
                "jsonrpc": "2.0",
                "method": method,
                "params": params,
                "id": id,
            });
            let res = client.post(format!("{}/", base)).json(&body).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: proxy returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }
    Ok(())
}
