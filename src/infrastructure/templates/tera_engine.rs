//! Tera-based template engine implementation

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use serde_json::{Map, Value as JsonValue};
use tera::ast::Node;
use tera::{Context, Template, Tera};
use tracing::debug;

use crate::core::error::error_chain;
use crate::generation::{RenderFailure, TemplateEngine};
use crate::infrastructure::templates::EngineSettings;

/// Renders templates from a template root directory.
///
/// Templates are registered under their root-relative path (always with `/`
/// separators) the first time they are rendered, together with everything
/// they `extends`, `import` or `include`. Files nobody references are never
/// read.
#[derive(Debug)]
pub struct TeraTemplateEngine {
    tera: RwLock<Tera>,
    template_root: PathBuf,
}

impl TeraTemplateEngine {
    /// Engine over `template_root` with default settings
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        Self::with_settings(template_root, &EngineSettings::default())
    }

    /// Engine over `template_root` with `settings` applied
    pub fn with_settings(template_root: impl Into<PathBuf>, settings: &EngineSettings) -> Self {
        let mut tera = Tera::default();
        if settings.autoescape == Some(false) {
            tera.autoescape_on(vec![]);
        }
        Self {
            tera: RwLock::new(tera),
            template_root: template_root.into(),
        }
    }

    /// Root-relative Tera name of a template path
    fn template_name(&self, template: &Path) -> Option<String> {
        let relative = template
            .strip_prefix(&self.template_root)
            .ok()
            .map(Path::to_path_buf)
            .or_else(|| {
                let root = std::path::absolute(&self.template_root).ok()?;
                let absolute = std::path::absolute(template).ok()?;
                absolute.strip_prefix(root).ok().map(Path::to_path_buf)
            })?;

        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str()?),
                Component::CurDir => {}
                _ => return None,
            }
        }
        (!parts.is_empty()).then(|| parts.join("/"))
    }

    /// File backing a template name, if the name stays inside the root
    fn template_file(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.template_root.join(relative))
    }

    /// Register `name` and the templates it depends on.
    ///
    /// The set is staged on a copy, so a failed load leaves the loaded
    /// templates untouched.
    fn load(&self, tera: &mut Tera, name: &str) -> Result<(), RenderFailure> {
        let mut staged: Vec<(String, String)> = Vec::new();
        let mut seen = HashSet::new();
        let mut pending = vec![name.to_string()];

        while let Some(next) = pending.pop() {
            if is_loaded(tera, &next) || !seen.insert(next.clone()) {
                continue;
            }
            let Some(path) = self.template_file(&next) else {
                continue;
            };
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(_) if next == name => return Err(RenderFailure::TemplateNotFound),
                // Tera reports a missing dependency when the set is registered or rendered
                Err(_) => continue,
            };

            let template = Template::new(&next, None, &content).map_err(|e| {
                RenderFailure::Evaluation(format!(
                    "Failed to parse template '{next}': {}",
                    error_chain(&e)
                ))
            })?;
            pending.extend(dependencies(&template));
            staged.push((next, content));
        }

        let mut updated = tera.clone();
        updated.add_raw_templates(staged).map_err(|e| {
            RenderFailure::Evaluation(format!(
                "Failed to load template '{name}': {}",
                error_chain(&e)
            ))
        })?;
        *tera = updated;

        debug!(template = name, "Loaded template");
        Ok(())
    }
}

fn is_loaded(tera: &Tera, name: &str) -> bool {
    tera.get_template_names().any(|loaded| loaded == name)
}

/// Names a parsed template pulls in through `extends`, `import` and `include`
fn dependencies(template: &Template) -> Vec<String> {
    let mut names: Vec<String> = template.parent.iter().cloned().collect();
    names.extend(
        template
            .imported_macro_files
            .iter()
            .map(|(file, _)| file.clone()),
    );
    collect_includes(&template.ast, &mut names);
    for definition in template.macros.values() {
        collect_includes(&definition.body, &mut names);
    }
    names
}

fn collect_includes(nodes: &[Node], names: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Include(_, included, _) => names.extend(included.iter().cloned()),
            Node::Block(_, block, _) => collect_includes(&block.body, names),
            Node::MacroDefinition(_, definition, _) => collect_includes(&definition.body, names),
            Node::FilterSection(_, section, _) => collect_includes(&section.body, names),
            Node::Forloop(_, forloop, _) => {
                collect_includes(&forloop.body, names);
                if let Some(body) = &forloop.empty_body {
                    collect_includes(body, names);
                }
            }
            Node::If(branches, _) => {
                for (_, _, body) in &branches.conditions {
                    collect_includes(body, names);
                }
                if let Some((_, body)) = &branches.otherwise {
                    collect_includes(body, names);
                }
            }
            _ => {}
        }
    }
}

fn poisoned<T>(_: T) -> RenderFailure {
    RenderFailure::Evaluation("Template cache lock is poisoned".to_string())
}

impl TemplateEngine for TeraTemplateEngine {
    fn render(
        &self,
        template: &Path,
        data: &Map<String, JsonValue>,
    ) -> std::result::Result<String, RenderFailure> {
        let name = self
            .template_name(template)
            .ok_or(RenderFailure::TemplateNotFound)?;

        if !is_loaded(&*self.tera.read().map_err(poisoned)?, &name) {
            let mut tera = self.tera.write().map_err(poisoned)?;
            if !is_loaded(&tera, &name) {
                self.load(&mut tera, &name)?;
            }
        }

        let context = Context::from_serialize(data)
            .map_err(|e| RenderFailure::Evaluation(error_chain(&e)))?;
        self.tera
            .read()
            .map_err(poisoned)?
            .render(&name, &context)
            .map_err(|e| RenderFailure::Evaluation(error_chain(&e)))
    }
}
