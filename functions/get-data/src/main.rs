#![doc = include_str!("../README.md")]

use {
    clap::{Parser, Subcommand},
    function_toolkit::*,
    std::{net::SocketAddr, process::ExitCode},
};

mod clock;
mod config;
mod error;
mod feeds;
mod get_data;
mod models;
mod upstream_client;
mod window;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the function over HTTP (default)
    Serve {
        /// Address to listen on, overrides GET_DATA_ADDR
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Run a single invocation and print the response body
    Invoke {
        /// Region code, defaults to C
        #[arg(long)]
        region: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = config::Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve { addr: None }) {
        Command::Serve { addr } => {
            let addr = addr.unwrap_or(config.addr);

            function_toolkit::bootstrap!(addr, [get_data::GetData]);

            Ok(ExitCode::SUCCESS)
        }
        Command::Invoke { region } => {
            let function = get_data::GetData::from_config(&config);

            let mut request = FunctionRequest::get(get_data::GetData::path());
            if let Some(region) = region {
                request = request.with_query("region", region);
            }

            let response = function.handle(request).await;

            println!("{}", response.body);

            if response.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
