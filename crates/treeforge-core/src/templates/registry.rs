//! Read-only template registry keyed by template id.
//!
//! A registry is assembled once (from the embedded set or a directory on disk) and is
//! never mutated during a run. Planning looks templates up by the id a slot declares.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, ScaffoldError};
use crate::templates::embedded;

/// An immutable template body with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    id: String,
    body: String,
}

impl Template {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Mapping from template id to [`Template`].
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, Template>,
}

impl TemplateRegistry {
    /// The templates compiled into the binary.
    pub fn embedded() -> Self {
        embedded::ALL
            .iter()
            .map(|(id, body)| Template::new(*id, *body))
            .collect()
    }

    /// Load every regular file directly under `dir`; the file name is the template id.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let load_err = |source| ScaffoldError::TemplateLoad {
            path: dir.to_path_buf(),
            source,
        };

        let mut templates = BTreeMap::new();
        for entry in std::fs::read_dir(dir).map_err(load_err)? {
            let entry = entry.map_err(load_err)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(id) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("skipping template with non UTF-8 name: {}", path.display());
                continue;
            };
            let body = std::fs::read_to_string(&path).map_err(|source| ScaffoldError::TemplateLoad {
                path: path.clone(),
                source,
            })?;
            tracing::debug!("loaded template {id}");
            templates.insert(id.to_string(), Template::new(id, body));
        }

        Ok(Self { templates })
    }

    /// Add a template, replacing any existing one with the same id.
    pub fn with(mut self, id: impl Into<String>, body: impl Into<String>) -> Self {
        let template = Template::new(id, body);
        self.templates.insert(template.id.clone(), template);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<Template> for TemplateRegistry {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_registry_has_all_templates() {
        let registry = TemplateRegistry::embedded();
        assert_eq!(registry.len(), embedded::ALL.len());
        assert!(registry.get(embedded::PAGE_ID).is_some());
        assert!(registry.get(embedded::APP_ID).is_some());
    }

    #[test]
    fn test_with_replaces_existing() {
        let registry = TemplateRegistry::default()
            .with("page.tmpl", "old")
            .with("page.tmpl", "new");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("page.tmpl").unwrap().body(), "new");
    }

    #[test]
    fn test_from_dir_uses_file_names_as_ids() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.tmpl"), "{{name:pascal}}").unwrap();
        std::fs::write(dir.path().join("app.tmpl"), "app").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let registry = TemplateRegistry::from_dir(dir.path()).unwrap();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec!["app.tmpl", "page.tmpl"]);
        assert_eq!(registry.get("page.tmpl").unwrap().body(), "{{name:pascal}}");
    }

    #[test]
    fn test_from_dir_missing() {
        let result = TemplateRegistry::from_dir(Path::new("/tmp/nonexistent_treeforge_templates"));
        assert!(matches!(result, Err(ScaffoldError::TemplateLoad { .. })));
    }
}
