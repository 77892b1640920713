mod commands;
mod terminal;

use adbwifi_common::config::Config;
use commands::{CommandLine, wireless};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    wireless::run(commands.mode(), Config::default()).await
}
