mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);
    print::banner(commands.quiet);

    match commands.command {
        Commands::Discover(args) => {
            print::header("getting ready for discovery", commands.quiet);
            discover::discover(args, commands.quiet).await
        }
    }
}
