//! Use case for running a full generation pass

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::application::{ProjectContext, SourceRootRegistry};
use crate::core::{BuildPhase, GeneratorConfig, Result};
use crate::generation::{DirectoryDispatcher, SharedContext, WalkSummary};
use crate::infrastructure::providers::{DescriptorLayout, default_registry};
use crate::infrastructure::templates::{EngineSettings, TeraTemplateEngine};

/// Result of a successful generation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub summary: WalkSummary,
    pub output_dir: PathBuf,
    pub phase: BuildPhase,
}

/// Validates the configuration, walks the descriptor tree and registers the output root
#[derive(Debug, Clone)]
pub struct GenerateUseCase {
    config: GeneratorConfig,
    project: ProjectContext,
}

impl GenerateUseCase {
    pub fn new(config: GeneratorConfig, project: ProjectContext) -> Self {
        Self { config, project }
    }

    pub fn execute(&self, source_roots: &mut dyn SourceRootRegistry) -> Result<GenerationReport> {
        let config = &self.config;

        // 1. Validate configuration
        config.validate()?;

        // 2. Build the template engine
        let settings = EngineSettings::load_optional(&config.engine_settings_path())?;
        let engine = TeraTemplateEngine::with_settings(&config.template_dir, &settings);

        // 3. Register descriptor providers
        let layout = DescriptorLayout::new(
            &config.generator_dir,
            &config.template_dir,
            &config.output_dir,
        );
        let registry = default_registry(&layout);

        // 4. Build the dispatcher over the build-wide context
        let reference_timestamp = self.project.reference_timestamp();
        let dispatcher = DirectoryDispatcher::new(
            Arc::new(registry),
            Arc::new(engine),
            SharedContext::new(config.context_key.clone(), self.project.properties_value()),
            reference_timestamp,
        );

        info!(
            generator_dir = %config.generator_dir.display(),
            output_dir = %config.output_dir.display(),
            "Generating from descriptors"
        );

        // 5. Walk the descriptor tree
        let summary = dispatcher.walk(&config.generator_dir)?;

        // 6. Register the output root with the host build
        match config.phase {
            BuildPhase::GenerateSources => source_roots.add_compile_source_root(&config.output_dir),
            BuildPhase::GenerateTestSources => {
                source_roots.add_test_compile_source_root(&config.output_dir)
            }
        }

        info!(
            generated = summary.generated,
            up_to_date = summary.up_to_date,
            phase = %config.phase,
            source_root = %config.output_dir.display(),
            "Generation finished, source root registered"
        );

        Ok(GenerationReport {
            summary,
            output_dir: config.output_dir.clone(),
            phase: config.phase,
        })
    }
}
