//! Declarative description of the tree to generate.
//!
//! A [`LayoutSpec`] lists fixed directories (always created) and [`Slot`]s. A slot is a
//! path pattern plus a template id; `single` slots produce one file, `per_name` slots
//! produce one file for every supplied name. Layouts are plain JSON:
//!
//! ```text
//! {
//!   "directories": ["src/pages"],
//!   "bindings": { "app": "App" },
//!   "slots": [
//!     { "id": "page", "path": "src/pages/{{name:pascal}}/{{name:pascal}}Page.jsx",
//!       "template": "page.tmpl", "cardinality": "per_name" }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result, ScaffoldError};
use crate::templates::embedded;

/// Role bound to the current instance in `per_name` slots.
pub const NAME_ROLE: &str = "name";

/// How many files a slot produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Exactly one file, rendered from fixed bindings only.
    Single,
    /// One file per name in the name set.
    PerName,
}

/// A templated position in the generated tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    /// Root-relative path pattern, may contain placeholders.
    pub path: String,
    /// Template id in the registry.
    pub template: String,
    pub cardinality: Cardinality,
    /// Fixed role bindings; override layout-wide ones.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, String>,
}

impl Slot {
    pub fn single(id: &str, path: &str, template: &str) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            template: template.into(),
            cardinality: Cardinality::Single,
            bindings: BTreeMap::new(),
        }
    }

    pub fn per_name(id: &str, path: &str, template: &str) -> Self {
        Self {
            cardinality: Cardinality::PerName,
            ..Self::single(id, path, template)
        }
    }

    pub fn with_binding(mut self, role: &str, value: &str) -> Self {
        self.bindings.insert(role.into(), value.into());
        self
    }
}

/// Static description of the target tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Root-relative directories created unconditionally.
    #[serde(default)]
    pub directories: Vec<String>,
    /// Fixed bindings visible to every slot.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, String>,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

impl LayoutSpec {
    /// The built-in React application layout.
    ///
    /// ```text
    /// src/
    /// ├── main.jsx, App.jsx, App.css
    /// ├── components/
    /// ├── context/AppContext.jsx
    /// ├── hooks/
    /// ├── pages/<Name>/<Name>Page.{jsx,css}   (per name)
    /// └── services/<name>Service.js           (per name)
    /// ```
    pub fn react_app() -> Self {
        Self {
            directories: vec![
                "public".into(),
                "src/components".into(),
                "src/context".into(),
                "src/hooks".into(),
                "src/pages".into(),
                "src/services".into(),
            ],
            bindings: BTreeMap::from([("app".to_string(), "App".to_string())]),
            slots: vec![
                Slot::single("main", "src/main.jsx", embedded::MAIN_ID),
                Slot::single("app", "src/{{app:pascal}}.jsx", embedded::APP_ID),
                Slot::single("app_style", "src/{{app:pascal}}.css", embedded::APP_STYLE_ID),
                Slot::single(
                    "context",
                    "src/context/{{app:pascal}}Context.jsx",
                    embedded::CONTEXT_ID,
                ),
                Slot::per_name(
                    "page",
                    "src/pages/{{name:pascal}}/{{name:pascal}}Page.jsx",
                    embedded::PAGE_ID,
                ),
                Slot::per_name(
                    "page_style",
                    "src/pages/{{name:pascal}}/{{name:pascal}}Page.css",
                    embedded::PAGE_STYLE_ID,
                ),
                Slot::per_name(
                    "service",
                    "src/services/{{name:camel}}Service.js",
                    embedded::SERVICE_ID,
                ),
            ],
        }
    }

    /// Whether any slot depends on the name set.
    pub fn has_per_name_slots(&self) -> bool {
        self.slots
            .iter()
            .any(|s| s.cardinality == Cardinality::PerName)
    }

    /// Structural checks that do not need names or templates.
    pub fn validate(&self) -> std::result::Result<(), PlanError> {
        let mut ids = HashSet::new();
        for slot in &self.slots {
            if slot.id.is_empty() {
                return Err(PlanError::InvalidLayout {
                    reason: format!("slot with path '{}' has an empty id", slot.path),
                });
            }
            if !ids.insert(slot.id.as_str()) {
                return Err(PlanError::InvalidLayout {
                    reason: format!("duplicate slot id '{}'", slot.id),
                });
            }
            if slot.cardinality == Cardinality::PerName && slot.bindings.contains_key(NAME_ROLE) {
                return Err(PlanError::InvalidLayout {
                    reason: format!(
                        "slot '{}' binds the reserved role '{NAME_ROLE}'",
                        slot.id
                    ),
                });
            }
        }
        Ok(())
    }

    /// Load a layout from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ScaffoldError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| ScaffoldError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the layout as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ScaffoldError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
