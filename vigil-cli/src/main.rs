mod display;

use clap::{ArgGroup, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vigil_core::{overall_level, StatusRunner};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "See the operational status of a service from your terminal")]
#[command(version)]
#[command(group(ArgGroup::new("mode").args(["list", "all", "web", "components"])))]
struct Cli {
    /// Service to check status for
    service: Option<String>,

    /// Component of the service to check for
    component: Option<String>,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode
    #[arg(short, long, conflicts_with_all = ["verbose", "list", "all", "web", "components"])]
    quiet: bool,

    /// List the services available
    #[arg(long)]
    list: bool,

    /// Check every supported service
    #[arg(long)]
    all: bool,

    /// Open the web page for the service
    #[arg(long)]
    web: bool,

    /// List the components of the service
    #[arg(long)]
    components: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    if cli.verbose {
        info!("logging set to: verbose");
    }

    std::process::exit(run(cli).await as i32);
}

async fn run(cli: Cli) -> u8 {
    let runner = StatusRunner::new();

    if cli.list {
        println!("Available services:");
        for record in runner.supported() {
            println!("- {}", record.name);
        }
        return 0;
    }

    if cli.all {
        return check_all(&runner, cli.verbose).await;
    }

    let Some(service) = cli.service.as_deref() else {
        error!("no service specified, use --list to see available services");
        return 1;
    };

    if cli.web {
        return match runner.open_web(service) {
            Ok(()) => 0,
            Err(e) => {
                display::report_error(&e, cli.verbose);
                1
            }
        };
    }

    if cli.components {
        return match runner.components(service) {
            Ok(components) if components.is_empty() => {
                println!("No components listed for: {}", service);
                0
            }
            Ok(components) => {
                println!("Components of {}:", service);
                for component in components {
                    println!("- {}", component);
                }
                0
            }
            Err(e) => {
                display::report_error(&e, cli.verbose);
                1
            }
        };
    }

    if let Some(component) = cli.component.as_deref() {
        if let Err(e) = runner.verify_component(service, component) {
            display::report_error(&e, cli.verbose);
            return 1;
        }
    }

    check_one(&runner, service, &cli).await
}

async fn check_one(runner: &StatusRunner, service: &str, cli: &Cli) -> u8 {
    // Spinner only at default verbosity: verbose interleaves with logs,
    // quiet should stay silent.
    let spinner = (!cli.verbose && !cli.quiet).then(|| display::Spinner::new(service));

    match runner.check(service).await {
        Ok(status) => {
            if let Some(spinner) = spinner {
                spinner.clear();
            }
            if !cli.quiet {
                println!("{}", display::status_line(&status));
            }
            status.level.exit_code()
        }
        Err(e) => {
            if let Some(spinner) = spinner {
                spinner.clear();
            }
            display::report_error(&e, cli.verbose);
            1
        }
    }
}

async fn check_all(runner: &StatusRunner, verbose: bool) -> u8 {
    let outcome = runner
        .check_all(|status| println!("{}", display::status_line(status)))
        .await;

    match outcome {
        Ok(results) => overall_level(&results).exit_code(),
        Err(e) => {
            display::report_error(&e, verbose);
            1
        }
    }
}
