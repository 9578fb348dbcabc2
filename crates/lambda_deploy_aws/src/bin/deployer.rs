use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Parser, Subcommand};
use lambda_deploy_aws::adapters::aws::AwsProvisioningApi;
use lambda_deploy_aws::adapters::docker::DockerCli;
use lambda_deploy_aws::handlers::modes::{run_deploy, run_invoke, run_provision};
use lambda_deploy_aws::handlers::teardown::{confirmation_accepted, run_teardown};
use lambda_deploy_core::config::DeployConfig;
use lambda_deploy_core::contract::TeardownOutcome;

#[derive(Parser)]
#[command(
    name = "deployer",
    about = "Provision, deploy, tear down, and invoke the containerized hello-world Lambda"
)]
struct Cli {
    /// Path to the YAML configuration file; built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// First-time setup: execution role, repository, image, function
    Provision,
    /// Rebuild and push the image, then update the function code
    Deploy,
    /// Delete the function and the repository
    Teardown {
        /// Skip the interactive confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Invoke the deployed function and print its response
    Invoke {
        /// Name to pass to the function
        #[arg(long)]
        name: String,
    },
}

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match DeployConfig::load(cli.config.as_deref()) {
        Ok(value) => value,
        Err(error) => {
            eprintln!("failed to load configuration: {error}");
            exit(1);
        }
    };

    let api = AwsProvisioningApi::connect(&config.region, &config.profile).await;
    let builder = DockerCli::new();
    let context_dir = Path::new(".");

    match cli.command {
        Commands::Provision => {
            step("Provision");
            if let Err(error) = run_provision(&api, &builder, &config, context_dir) {
                eprintln!("provision failed: {error}");
                exit(1);
            }
            println!("Provisioning completed successfully");
        }
        Commands::Deploy => {
            step("Deploy");
            if let Err(error) = run_deploy(&api, &builder, &config, context_dir) {
                eprintln!("deploy failed: {error}");
                exit(1);
            }
            println!("Deployment completed successfully");
        }
        Commands::Teardown { yes } => {
            step("Teardown");
            let confirmed = yes || prompt_confirmation();
            match run_teardown(&api, &config, confirmed) {
                TeardownOutcome::Cancelled => println!("Deletion cancelled."),
                TeardownOutcome::Completed(report) => {
                    if report.is_clean() {
                        println!("Teardown completed successfully");
                    } else {
                        // Partial failures were already logged; the run
                        // itself still completed.
                        println!("Teardown completed with partial failures");
                    }
                }
            }
        }
        Commands::Invoke { name } => {
            if name.trim().is_empty() {
                eprintln!("--name must not be empty");
                exit(2);
            }
            step("Invoke");
            match run_invoke(&api, &config, &name) {
                Ok(outcome) => {
                    println!("Lambda function response:");
                    println!("{}", String::from_utf8_lossy(&outcome.payload));
                    if let Some(function_error) = outcome.function_error {
                        eprintln!("Lambda function error: {function_error}");
                        exit(1);
                    }
                }
                Err(error) => {
                    eprintln!("invoke failed: {error}");
                    exit(1);
                }
            }
        }
    }
}

fn prompt_confirmation() -> bool {
    print!("Are you sure you want to delete the Lambda function and ECR repository? (y/n): ");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return false;
    }
    confirmation_accepted(&input)
}
