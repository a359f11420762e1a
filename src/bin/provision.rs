use anyhow::Context;
use clap::Parser;
use staffops::adapters::{employee_csv, passwd::PasswdDirectory, smtp::SmtpNotifier, system::SystemAccounts};
use staffops::domain::model::RunSummary;
use staffops::utils::{logger, validation::Validate};
use staffops::{ProvisionConfig, ProvisionPipeline};

fn main() {
    let config = ProvisionConfig::parse();

    if let Err(e) = logger::init_cli_logger(config.verbose, Some(&config.log_file)) {
        eprintln!("❌ Could not open log file {}: {}", config.log_file.display(), e);
        std::process::exit(1);
    }

    tracing::info!("Starting staffops provisioning run");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    match run(&config) {
        Ok(summary) if summary.all_succeeded() => {
            tracing::info!(
                "Provisioned {} account(s) with no failures",
                summary.provisioned_count()
            );
            println!("Employee account creation completed successfully.");
        }
        Ok(summary) => {
            tracing::warn!(
                "Provisioned {} account(s), {} record(s) failed",
                summary.provisioned_count(),
                summary.failed_count()
            );
            println!(
                "Employee account creation completed with {} failure(s).",
                summary.failed_count()
            );
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!("Provisioning run failed: {:#}", e);
            eprintln!("❌ Error occurred during employee account creation: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(config: &ProvisionConfig) -> anyhow::Result<RunSummary> {
    let records = employee_csv::load_employees(&config.employee_file).with_context(|| {
        format!(
            "failed to read employee file {}",
            config.employee_file.display()
        )
    })?;
    tracing::info!(
        "Loaded {} employee record(s) from {}",
        records.len(),
        config.employee_file.display()
    );

    let smtp_password = std::env::var("STAFFOPS_SMTP_PASSWORD").unwrap_or_default();
    let notifier = SmtpNotifier::new(
        &config.smtp.smtp_host,
        config.smtp.smtp_port,
        &config.smtp.smtp_sender,
        &config.smtp.smtp_user,
        &smtp_password,
    )
    .context("failed to configure the SMTP transport")?;

    let mut pipeline = ProvisionPipeline::new(
        PasswdDirectory::new(),
        SystemAccounts::new(),
        notifier,
        rand::rng(),
    );

    let summary = pipeline.run(records, &config.output_file)?;
    Ok(summary)
}
