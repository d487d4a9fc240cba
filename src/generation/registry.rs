//! Descriptor provider registry keyed by file extension

use std::collections::HashMap;
use std::sync::Arc;

use crate::generation::DescriptorProvider;

/// Build-wide table from file extension (with its leading `.`) to provider
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn DescriptorProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` for `extension`, replacing any previous one
    pub fn register(&mut self, extension: impl Into<String>, provider: Arc<dyn DescriptorProvider>) {
        self.providers.insert(extension.into(), provider);
    }

    pub fn get(&self, extension: &str) -> Option<Arc<dyn DescriptorProvider>> {
        self.providers.get(extension).cloned()
    }

    pub fn is_registered(&self, extension: &str) -> bool {
        self.providers.contains_key(extension)
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, Result};
    use crate::generation::DescriptorProperties;
    use std::path::Path;

    /// Fails with a message naming its own tag
    struct TaggedProvider(&'static str);

    impl DescriptorProvider for TaggedProvider {
        fn provide_properties_from_file(&self, _path: &Path) -> Result<DescriptorProperties> {
            Err(Error::config(self.0))
        }
    }

    fn tag_of(registry: &ProviderRegistry, extension: &str) -> String {
        registry
            .get(extension)
            .unwrap()
            .provide_properties_from_file(Path::new("any"))
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn test_register_replaces_provider() {
        let mut registry = ProviderRegistry::new();
        assert!(registry.get(".json").is_none());

        registry.register(".json", Arc::new(TaggedProvider("first")));
        registry.register(".json", Arc::new(TaggedProvider("second")));

        assert_eq!(registry.extensions(), vec![".json"]);
        assert!(tag_of(&registry, ".json").contains("second"));
    }

    #[test]
    fn test_lookup_is_by_exact_extension() {
        let mut registry = ProviderRegistry::new();
        registry.register(".yml", Arc::new(TaggedProvider("yaml")));
        registry.register(".json", Arc::new(TaggedProvider("json")));

        assert_eq!(registry.extensions(), vec![".json", ".yml"]);
        assert!(registry.is_registered(".yml"));
        assert!(!registry.is_registered("yml"));
        assert!(!registry.is_registered(".yaml"));
        assert!(tag_of(&registry, ".yml").contains("yaml"));
    }

    #[test]
    fn test_debug_lists_extensions() {
        let mut registry = ProviderRegistry::new();
        registry.register(".json", Arc::new(TaggedProvider("json")));
        registry.register(".yml", Arc::new(TaggedProvider("yaml")));
        let debug = format!("{:?}", registry);
        assert!(debug.contains(".json"));
        assert!(debug.contains(".yml"));
    }
}
