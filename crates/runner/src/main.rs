use meridian_runner::{Trader, TraderConfig};

fn print_help() {
    eprintln!(
        r#"Meridian - multi-hop conversion trader

USAGE:
    meridian --config <PATH>

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    meridian --config trader.json
    RUST_LOG=debug meridian --config trader.json
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(path) = config_path else {
        eprintln!("Error: --config is required");
        print_help();
        std::process::exit(1);
    };

    log::info!("Loading configuration from: {}", path);
    let config = TraderConfig::from_file(&path)?;
    let trader = Trader::from_config(config)?;

    trader.start()?;
    log::info!("Trader running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    log::info!("Shutting down");
    if !trader.stop().await {
        log::warn!("Plan worker did not stop in time and was aborted");
    }
    Ok(())
}
