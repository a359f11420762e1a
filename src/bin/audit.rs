use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use staffops::adapters::{smtp::SmtpNotifier, ssh::Ssh2Host};
use staffops::utils::{logger, validation::Validate};
use staffops::{AuditConfig, AuditPipeline};

fn main() {
    let config = AuditConfig::parse();

    if let Err(e) = logger::init_cli_logger(config.verbose, config.log_file.as_deref()) {
        eprintln!("❌ Could not open log file: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Starting staffops audit run against {}", config.host);
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        tracing::error!("Audit run failed: {:#}", e);
        eprintln!("❌ Audit run failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &AuditConfig) -> anyhow::Result<()> {
    let password = match std::env::var("STAFFOPS_SSH_PASSWORD") {
        Ok(secret) => secret,
        Err(_) => dialoguer::Password::new()
            .with_prompt("Enter your password")
            .interact()
            .context("password prompt failed")?,
    };

    let host = Ssh2Host::connect(
        &config.host,
        config.port,
        &config.username,
        &password,
        Duration::from_secs(config.timeout_secs),
    )
    .with_context(|| format!("failed to connect to {}:{}", config.host, config.port))?;

    let smtp_password = std::env::var("STAFFOPS_SMTP_PASSWORD").unwrap_or_default();
    let notifier = SmtpNotifier::new(
        &config.smtp.smtp_host,
        config.smtp.smtp_port,
        &config.smtp.smtp_sender,
        &config.smtp.smtp_user,
        &smtp_password,
    )
    .context("failed to configure the SMTP transport")?;

    let mut pipeline = AuditPipeline::new(host, notifier);

    let affected = pipeline.find_affected_files(&config.username)?;
    if affected.is_empty() {
        println!("No affected files found.");
        return Ok(());
    }

    tracing::info!("{} file(s) modified during suspicious hours", affected.len());
    if config.disp {
        for file in &affected {
            println!(
                "{} - Last Modified: {}",
                file.path,
                file.modified_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    if let Err(e) = pipeline.send_report(&affected, &config.email, &config.username) {
        tracing::error!("Error sending report to {}: {}", config.email, e);
    }

    let download_dir = config
        .download_path
        .clone()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    pipeline
        .download_files(&affected, &download_dir)
        .with_context(|| format!("failed to download files to {}", download_dir.display()))?;

    println!("Operation completed successfully.");
    Ok(())
}
