use anyhow::{Context, Result};
use clap::Parser;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use resume_builder::ai::NoModel;
use resume_builder::cli::{Cli, Command};
use resume_builder::config::AppConfig;
use resume_builder::controller::ResumeSession;
use resume_builder::export::save_artifact;
use resume_builder::preview::PreviewTheme;
use resume_builder::types::ResumeData;
use resume_builder::validation::validate_resume;
use resume_builder::web::start_web_server;

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resume_builder=info,rocket::server=off")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            let mut config = AppConfig::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            start_web_server(config).await
        }
        Command::Export {
            data,
            out,
            sidebar_bg,
            sidebar_text,
            tag_bg,
            tag_text,
        } => {
            let mut config = AppConfig::load()?;
            if let Some(out) = out {
                config.output_path = out;
            }

            let text = tokio::fs::read_to_string(&data)
                .await
                .with_context(|| format!("Failed to read {}", data.display()))?;
            let resume: ResumeData =
                toml::from_str(&text).with_context(|| format!("Invalid resume file {}", data.display()))?;

            let defaults = PreviewTheme::default();
            let theme = PreviewTheme::from_hex(
                sidebar_bg.as_deref().unwrap_or(&hex(defaults.sidebar_bg)),
                sidebar_text.as_deref().unwrap_or(&hex(defaults.sidebar_text)),
                tag_bg.as_deref().unwrap_or(&hex(defaults.tag_bg)),
                tag_text.as_deref().unwrap_or(&hex(defaults.tag_text)),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?;

            let mut session = ResumeSession::with_theme(NoModel, theme);
            session.load(resume);
            let artifact = session.export().map_err(|e| anyhow::anyhow!("{}", e))?;
            let path = save_artifact(&artifact, &config.output_path)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            println!("Exported {} page(s) to {}", artifact.page_count, path.display());
            Ok(())
        }
        Command::Check { data } => {
            let text = tokio::fs::read_to_string(&data)
                .await
                .with_context(|| format!("Failed to read {}", data.display()))?;
            let resume: ResumeData =
                toml::from_str(&text).with_context(|| format!("Invalid resume file {}", data.display()))?;

            let errors = validate_resume(&resume);
            if errors.is_empty() {
                println!("OK: {} is ready to export", data.display());
                Ok(())
            } else {
                for error in &errors {
                    eprintln!("{}: {}", error.field, error.message);
                }
                anyhow::bail!("{} field error(s)", errors.len())
            }
        }
    }
}

fn hex(color: resume_builder::preview::Rgba) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}
