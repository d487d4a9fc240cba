//! teragen CLI entrypoint
//! Parses command-line arguments and runs a generation pass.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::PathBuf;

use teragen::application::{GenerateUseCase, ProjectContext, SourceRoots};
use teragen::core::{BuildPhase, GeneratorConfig};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "teragen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render every stale output under the generator directory
    Generate {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory holding the engine settings file
        #[arg(long)]
        source_dir: Option<PathBuf>,
        /// Root of the template tree
        #[arg(long)]
        template_dir: Option<PathBuf>,
        /// Root of the descriptor tree
        #[arg(long)]
        generator_dir: Option<PathBuf>,
        /// Root of the generated output tree
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Build phase deciding how the output directory is registered
        #[arg(long, value_enum)]
        phase: Option<BuildPhase>,
        /// Data-model key for the build properties
        #[arg(long)]
        context_key: Option<String>,
        /// Build-configuration file whose changes invalidate every output (repeatable)
        #[arg(long = "project-file")]
        project_files: Vec<PathBuf>,
        /// Build property as KEY=VALUE (repeatable)
        #[arg(long = "property", value_parser = parse_property)]
        properties: Vec<(String, String)>,
    },
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging, INFO unless --verbose
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            config,
            source_dir,
            template_dir,
            generator_dir,
            output_dir,
            phase,
            context_key,
            project_files,
            properties,
        } => {
            let mut generator_config = match &config {
                Some(path) => GeneratorConfig::load(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => GeneratorConfig::default(),
            };

            // Command-line values override the config file
            if let Some(dir) = source_dir {
                generator_config.source_dir = dir;
            }
            if let Some(dir) = template_dir {
                generator_config.template_dir = dir;
            }
            if let Some(dir) = generator_dir {
                generator_config.generator_dir = dir;
            }
            if let Some(dir) = output_dir {
                generator_config.output_dir = dir;
            }
            if let Some(phase) = phase {
                generator_config.phase = phase;
            }
            if let Some(key) = context_key {
                generator_config.context_key = key;
            }
            generator_config.project_files.extend(project_files);
            generator_config.properties.extend(properties);

            let project = ProjectContext::new(
                generator_config.properties.clone(),
                generator_config.project_files.clone(),
            );
            let mut roots = SourceRoots::default();

            info!("Starting teragen");
            let report = GenerateUseCase::new(generator_config, project)
                .execute(&mut roots)
                .context("Generation failed")?;

            println!(
                "Generated {} file(s), {} up to date",
                report.summary.generated, report.summary.up_to_date
            );
            for root in &roots.compile {
                println!("Registered compile source root: {}", root.display());
            }
            for root in &roots.test_compile {
                println!("Registered test compile source root: {}", root.display());
            }
        }
    }

    Ok(())
}
