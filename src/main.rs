use log::debug;
use recipe_catalog::{load_and_render, CatalogConfig};
use std::env;

const USAGE: &str = "Usage: recipe-catalog [--html] [ENDPOINT]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut html = false;
    let mut endpoint = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--html" => html = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown option '{}'\n{}", flag, USAGE).into());
            }
            other => endpoint = Some(other.to_string()),
        }
    }

    let mut config = CatalogConfig::load()?;
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    debug!("Using configuration {:?}", config);

    let view = load_and_render(&config).await?;
    if html {
        println!("{}", view.to_html());
    } else {
        print!("{}", view.to_text());
    }

    Ok(())
}
