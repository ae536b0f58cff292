//! certforge wizard CLI
//!
//! Drives the full flow in one run: validate the submission, preview the
//! generated certificate, save it through the chosen persistence adapter,
//! and download the PDF/PNG artifacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use certforge_common::NewCertificate;
use certificate_render::{CertificateExporter, Theme};
use certificate_wizard::{ApiClient, LocalStore, PersistenceAdapter, Wizard};

#[derive(Debug, Parser)]
#[command(
    name = "certforge",
    about = "Generate and download a project completion certificate"
)]
struct Args {
    /// Recipient name
    #[arg(long)]
    name: String,

    /// Contact email address
    #[arg(long)]
    email: String,

    /// GitHub repository URL of the project
    #[arg(long)]
    github_repo: String,

    /// Deployment URL (vercel.app, netlify.app or herokuapp.com)
    #[arg(long)]
    vercel_deployment: String,

    /// What the project does (at least 50 characters)
    #[arg(long)]
    project_explanation: String,

    /// Save through the submission service at this base URL instead of
    /// the local certificate list
    #[arg(long)]
    api_url: Option<String>,

    /// Directory for the local certificate list and downloaded artifacts
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Presentation variant of the certificate view
    #[arg(long, value_enum, default_value_t = ThemeArg::Classic)]
    theme: ThemeArg,

    /// Skip the PNG artifact and download only the PDF
    #[arg(long)]
    pdf_only: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Classic,
    Plain,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Classic => Theme::Classic,
            ThemeArg::Plain => Theme::Plain,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certificate_wizard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let input = NewCertificate {
        name: args.name,
        email: args.email,
        github_repo: args.github_repo,
        vercel_deployment: args.vercel_deployment,
        project_explanation: args.project_explanation,
    };

    let mut wizard = Wizard::new();

    let preview = match wizard.submit(input) {
        Ok(preview) => preview,
        Err(certificate_wizard::WizardError::Validation(errors)) => {
            eprintln!("The submission is not valid:");
            for error in &errors.errors {
                eprintln!("  {}: {}", error.field, error.message);
            }
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    println!("Certificate preview");
    println!("  Name:           {}", preview.details.name);
    println!("  Certificate ID: {}", preview.certificate_id);
    println!("  Date:           {}", preview.date);

    let adapter: Box<dyn PersistenceAdapter> = match args.api_url {
        Some(url) => {
            info!("saving through submission service at {url}");
            Box::new(ApiClient::new(url))
        }
        None => {
            info!(
                "saving to local certificate list in {}",
                args.output_dir.display()
            );
            Box::new(LocalStore::new(&args.output_dir))
        }
    };

    let confirmed_id = wizard
        .generate(adapter.as_ref())
        .await
        .context("failed to save certificate")?;
    println!("Certificate saved with ID {confirmed_id}");

    let data = wizard
        .certificate_data()
        .cloned()
        .context("wizard lost the delivered record")?;

    let mut exporter = CertificateExporter::new(args.theme.into(), data);
    let pdf = exporter.write_pdf(&args.output_dir)?;
    println!("Downloaded {}", pdf.display());
    if !args.pdf_only {
        let png = exporter.write_png(&args.output_dir)?;
        println!("Downloaded {}", png.display());
    }

    Ok(())
}
