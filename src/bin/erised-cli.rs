use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "erised-cli")]
#[command(about = "Diagnostic CLI for a running erised server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show host, method, protocol and URI as the server saw them
    Info,
    /// Show the request headers as the server saw them
    Headers,
    /// Show the client address as the server saw it
    Ip,
    /// Ask the server to shut down gracefully
    Shutdown,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Info => client.get(format!("{}/erised/info", base)).send().await?,
        Commands::Headers => client.get(format!("{}/erised/headers", base)).send().await?,
        Commands::Ip => client.get(format!("{}/erised/ip", base)).send().await?,
        Commands::Shutdown => client.post(format!("{}/erised/shutdown", base)).send().await?,
    };
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
