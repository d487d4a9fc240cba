//! Default provider set for the structured descriptor formats

use std::sync::Arc;

use crate::generation::ProviderRegistry;
use crate::infrastructure::providers::{
    DescriptorLayout, JSON_SUFFIX, JsonDescriptorProvider, YamlDescriptorProvider,
};

/// Registry with the JSON provider on `.json` and the YAML provider on
/// `.yaml` and `.yml`, all sharing one layout
pub fn default_registry(layout: &DescriptorLayout) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(
        JSON_SUFFIX,
        Arc::new(JsonDescriptorProvider::new(layout.clone())),
    );
    for suffix in [".yaml", ".yml"] {
        registry.register(
            suffix,
            Arc::new(YamlDescriptorProvider::new(layout.clone(), suffix)),
        );
    }
    registry
}
