use std::sync::Arc;

use blog_api::client::{Client, Config};
use blog_browser::{
    browser::PostBrowser,
    command::{self, Command, HELP},
    error::Error,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::new(std::env::args().nth(1), None);
    let client = Arc::new(Client::new(Some(cfg))?);
    info!("Using GraphQL endpoint {}", client.endpoint());

    let mut browser = PostBrowser::new(client);
    browser.mount().await;
    println!("{}\n", browser.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(cmd) => {
                if let Some(text) = command::apply(&mut browser, cmd).await {
                    println!("{}\n", text);
                }
            }
            None => println!("{}", HELP),
        }
    }
    Ok(())
}
