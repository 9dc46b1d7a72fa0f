use clap::Parser;
use memory_forms::cli::commands::{cmd_check, cmd_resolve, cmd_submit};
use memory_forms::cli::config::{Cli, Commands, load_config};
use memory_forms::trace::logger::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Check { fields } => {
            if !cmd_check(&fields, cli.verbose)? {
                std::process::exit(1);
            }
        }
        Commands::Resolve { path } => {
            println!("{}", cmd_resolve(&path));
        }
        Commands::Submit {
            page,
            fields,
            dry_run,
        } => {
            let stored = cmd_submit(&page, fields.as_deref(), dry_run, &config).await?;
            if !stored {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
