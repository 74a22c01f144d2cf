use std::process::ExitCode;

use clap::Parser;
use faultline_cli::{Cli, Config, app, prompt::StdinPrompt, tracing_setup::init_tracing};
use faultline_error::{Boundary, Domain, ExitCodes, Failure, TracingPolicy, conclude};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _guard = init_tracing(&Config::default().log_filter, None);
            return conclude::<()>(Err(Failure::from(e)), &TracingPolicy, &ExitCodes::default());
        }
    };
    let _guard = init_tracing(&config.log_filter, config.log_dir.as_deref());

    let boundary = Boundary::new(Domain::CLI, TracingPolicy).with_policy(config.propagation);
    let mut stdout = std::io::stdout();
    let result = app::run(cli, &config, &boundary, &mut StdinPrompt, &mut stdout).await;
    conclude(result, &TracingPolicy, &config.exit_codes)
}
