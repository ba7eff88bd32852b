use bugstat::app::{handle_fatal_error, init_logging, run, AppConfig};
use bugstat::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let app = AppConfig::new(cli.verbose).with_format(cli.format);
    init_logging(&app);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run(&app, cli.config.as_deref(), cli.overrides(), &mut stdout).await {
        handle_fatal_error(e, app.verbose);
    }
}
