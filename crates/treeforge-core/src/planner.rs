//! Turns a layout and a name set into a fully resolved plan.
//!
//! Planning is pure: it reads the layout, the names and the template registry and
//! never touches the filesystem. Every path and every file body is resolved here, and
//! the whole plan is checked for collisions before the writer sees it, so a bad layout
//! can never leave a half-written tree behind.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::casing::case_variants;
use crate::error::PlanError;
use crate::layout::{Cardinality, LayoutSpec, Slot, NAME_ROLE};
use crate::names::NameSet;
use crate::templates::registry::{Template, TemplateRegistry};
use crate::templates::renderer::{Bindings, TemplateRenderer};

/// A file with its final root-relative path and rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub content: String,
    pub template_id: String,
    /// Id of the slot that produced this file.
    pub slot: String,
    /// Raw name for `per_name` slots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl PlannedFile {
    /// Hex-encoded SHA-256 of the rendered content.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.content.as_bytes()))
    }

    fn label(&self) -> String {
        match &self.instance {
            Some(name) => format!("slot {}[{name}]", self.slot),
            None => format!("slot {}", self.slot),
        }
    }
}

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedEntry {
    Directory { path: PathBuf },
    File(PlannedFile),
}

impl PlannedEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory { path } => path,
            Self::File(file) => &file.path,
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Directory { path } => format!("directory {}", path.display()),
            Self::File(file) => file.label(),
        }
    }
}

/// The ordered, collision-free list of entries for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Plan {
    entries: Vec<PlannedEntry>,
}

impl Plan {
    pub fn entries(&self) -> &[PlannedEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.entries.iter().filter_map(|e| match e {
            PlannedEntry::File(f) => Some(f),
            PlannedEntry::Directory { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve `layout` against `names` into a [`Plan`].
///
/// Fixed directories come first, in declaration order. They may use layout-level
/// bindings but never `name`. Slots follow in declaration
/// order; a `per_name` slot expands once per name, in name-set order.
pub fn plan(
    layout: &LayoutSpec,
    names: &NameSet,
    registry: &TemplateRegistry,
) -> Result<Plan, PlanError> {
    layout.validate()?;

    let renderer = TemplateRenderer::new();
    let layout_bindings = fixed_bindings(&layout.bindings)?;
    let mut entries = Vec::new();

    for dir in &layout.directories {
        entries.push(PlannedEntry::Directory {
            path: safe_path(&renderer.render_str(dir, &layout_bindings)?)?,
        });
    }

    for slot in &layout.slots {
        let template = registry
            .get(&slot.template)
            .ok_or_else(|| PlanError::UnknownTemplate {
                id: slot.template.clone(),
            })?;

        let mut bindings = layout_bindings.clone();
        bindings.extend(fixed_bindings(&slot.bindings)?);

        match slot.cardinality {
            Cardinality::Single => {
                let file = render_slot(&renderer, slot, template, &bindings, None)?;
                entries.push(PlannedEntry::File(file));
            }
            Cardinality::PerName => {
                for name in names.iter() {
                    let mut bindings = bindings.clone();
                    bindings.insert(NAME_ROLE.to_string(), name.clone());
                    let file =
                        render_slot(&renderer, slot, template, &bindings, Some(&name.raw))?;
                    entries.push(PlannedEntry::File(file));
                }
            }
        }
    }

    check_collisions(&entries)?;

    tracing::debug!("planned {} entries", entries.len());
    Ok(Plan { entries })
}

fn render_slot(
    renderer: &TemplateRenderer,
    slot: &Slot,
    template: &Template,
    bindings: &Bindings,
    instance: Option<&str>,
) -> Result<PlannedFile, PlanError> {
    let path = safe_path(&renderer.render_str(&slot.path, bindings)?)?;
    let content = renderer.render(template, bindings)?;
    Ok(PlannedFile {
        path,
        content,
        template_id: template.id().to_string(),
        slot: slot.id.clone(),
        instance: instance.map(str::to_string),
    })
}

fn fixed_bindings(raw: &BTreeMap<String, String>) -> Result<Bindings, PlanError> {
    raw.iter()
        .map(|(role, value)| Ok::<_, PlanError>((role.clone(), case_variants(value)?)))
        .collect()
}

/// Normalize a root-relative path, rejecting anything that could leave the root.
fn safe_path(raw: &str) -> Result<PathBuf, PlanError> {
    let unsafe_path = || PlanError::UnsafePath {
        path: raw.to_string(),
    };

    let mut path = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(part) => path.push(part),
            _ => return Err(unsafe_path()),
        }
    }
    if path.as_os_str().is_empty() {
        return Err(unsafe_path());
    }
    Ok(path)
}

fn check_collisions(entries: &[PlannedEntry]) -> Result<(), PlanError> {
    let mut seen: BTreeMap<&Path, &PlannedEntry> = BTreeMap::new();
    for entry in entries {
        if let Some(previous) = seen.insert(entry.path(), entry) {
            return Err(PlanError::PathCollision {
                path: entry.path().to_path_buf(),
                first: previous.label(),
                second: entry.label(),
            });
        }
    }

    // A planned file cannot also be the parent of another entry.
    for entry in entries {
        for ancestor in entry.path().ancestors().skip(1) {
            if let Some(&file) = seen.get(ancestor) {
                if matches!(file, PlannedEntry::File(_)) {
                    return Err(PlanError::PathCollision {
                        path: ancestor.to_path_buf(),
                        first: file.label(),
                        second: entry.label(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::embedded;

    fn pages_layout() -> LayoutSpec {
        LayoutSpec {
            directories: vec!["src/pages".into()],
            bindings: BTreeMap::new(),
            slots: vec![Slot::per_name(
                "page",
                "src/pages/{{name:pascal}}/{{name:pascal}}Page",
                "page.tmpl",
            )],
        }
    }

    fn pages_registry() -> TemplateRegistry {
        TemplateRegistry::default().with("page.tmpl", "export default {{name:pascal}}Page;")
    }

    #[test]
    fn test_dashboard_tasks_example() {
        let names = NameSet::new(["dashboard", "tasks"]).unwrap();
        let plan = plan(&pages_layout(), &names, &pages_registry()).unwrap();

        assert_eq!(
            plan.entries()[0],
            PlannedEntry::Directory {
                path: PathBuf::from("src/pages")
            }
        );

        let files: Vec<_> = plan.files().collect();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("src/pages/Dashboard/DashboardPage"));
        assert_eq!(files[0].content, "export default DashboardPage;");
        assert_eq!(files[1].path, PathBuf::from("src/pages/Tasks/TasksPage"));
        assert_eq!(files[1].content, "export default TasksPage;");
        assert_eq!(files[0].template_id, "page.tmpl");
        assert_eq!(files[0].instance.as_deref(), Some("dashboard"));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let names = NameSet::new(["tasks", "dashboard", "settings"]).unwrap();
        let layout = LayoutSpec::react_app();
        let registry = TemplateRegistry::embedded();
        let first = plan(&layout, &names, &registry).unwrap();
        let second = plan(&layout, &names, &registry).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_name_order_is_preserved() {
        let names = NameSet::new(["zeta", "alpha", "mid"]).unwrap();
        let plan = plan(&pages_layout(), &names, &pages_registry()).unwrap();
        let instances: Vec<_> = plan
            .files()
            .map(|f| f.instance.clone().unwrap())
            .collect();
        assert_eq!(instances, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_react_app_plan_renders_everything() {
        let names = NameSet::new(["dashboard"]).unwrap();
        let plan = plan(&LayoutSpec::react_app(), &names, &TemplateRegistry::embedded()).unwrap();
        let paths: Vec<_> = plan.files().map(|f| f.path.clone()).collect();
        assert!(paths.contains(&PathBuf::from("src/App.jsx")));
        assert!(paths.contains(&PathBuf::from("src/context/AppContext.jsx")));
        assert!(paths.contains(&PathBuf::from("src/pages/Dashboard/DashboardPage.jsx")));
        assert!(paths.contains(&PathBuf::from("src/services/dashboardService.js")));
        for file in plan.files() {
            assert!(!file.content.contains("{{name:"), "{}", file.path.display());
            assert!(!file.content.contains("{{app:"), "{}", file.path.display());
        }
        let context = plan
            .files()
            .find(|f| f.template_id == embedded::CONTEXT_ID)
            .unwrap();
        assert!(context.content.contains("value={{ state, setState }}"));
    }

    #[test]
    fn test_empty_names_only_single_slots() {
        let plan = plan(
            &LayoutSpec::react_app(),
            &NameSet::default(),
            &TemplateRegistry::embedded(),
        )
        .unwrap();
        assert!(plan.files().all(|f| f.instance.is_none()));
        assert_eq!(plan.files().count(), 4);
    }

    #[test]
    fn test_slot_bindings_override_layout_bindings() {
        let layout = LayoutSpec {
            directories: vec![],
            bindings: BTreeMap::from([("app".to_string(), "shop".to_string())]),
            slots: vec![
                Slot::single("a", "{{app:pascal}}.js", "t"),
                Slot::single("b", "{{app:kebab}}.js", "t").with_binding("app", "Admin"),
            ],
        };
        let registry = TemplateRegistry::default().with("t", "{{app:raw}}");
        let plan = plan(&layout, &NameSet::default(), &registry).unwrap();
        let files: Vec<_> = plan.files().collect();
        assert_eq!(files[0].path, PathBuf::from("Shop.js"));
        assert_eq!(files[0].content, "shop");
        assert_eq!(files[1].path, PathBuf::from("admin.js"));
        assert_eq!(files[1].content, "Admin");
    }

    #[test]
    fn test_collision_between_single_slots() {
        let layout = LayoutSpec {
            slots: vec![
                Slot::single("first", "src/App.jsx", "t"),
                Slot::single("second", "src/App.jsx", "t"),
            ],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        let err = plan(&layout, &NameSet::default(), &registry).unwrap_err();
        assert_eq!(
            err,
            PlanError::PathCollision {
                path: PathBuf::from("src/App.jsx"),
                first: "slot first".into(),
                second: "slot second".into(),
            }
        );
    }

    #[test]
    fn test_collision_after_normalization() {
        let layout = LayoutSpec {
            slots: vec![
                Slot::single("first", "src//App.jsx", "t"),
                Slot::single("second", "src/App.jsx/", "t"),
            ],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        let err = plan(&layout, &NameSet::default(), &registry).unwrap_err();
        assert!(matches!(err, PlanError::PathCollision { .. }));
    }

    #[test]
    fn test_collision_between_per_name_slots() {
        let layout = LayoutSpec {
            slots: vec![
                Slot::per_name("page", "pages/{{name:pascal}}.js", "t"),
                Slot::per_name("view", "pages/{{name:pascal}}.js", "t"),
            ],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        let names = NameSet::new(["home"]).unwrap();
        let err = plan(&layout, &names, &registry).unwrap_err();
        assert_eq!(
            err,
            PlanError::PathCollision {
                path: PathBuf::from("pages/Home.js"),
                first: "slot page[home]".into(),
                second: "slot view[home]".into(),
            }
        );
    }

    #[test]
    fn test_names_differing_in_case_collide() {
        let names = NameSet::new(["tasks", "Tasks"]).unwrap();
        let err = plan(&pages_layout(), &names, &pages_registry()).unwrap_err();
        assert!(matches!(err, PlanError::PathCollision { .. }));
    }

    #[test]
    fn test_directory_file_collision() {
        let layout = LayoutSpec {
            directories: vec!["src/index.js".into()],
            slots: vec![Slot::single("index", "src/index.js", "t")],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        let err = plan(&layout, &NameSet::default(), &registry).unwrap_err();
        assert!(
            matches!(err, PlanError::PathCollision { first, .. } if first == "directory src/index.js")
        );
    }

    #[test]
    fn test_file_cannot_be_parent_of_another_file() {
        let layout = LayoutSpec {
            slots: vec![
                Slot::single("config", "src/config", "t"),
                Slot::single("app_config", "src/config/app.js", "t"),
            ],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        let err = plan(&layout, &NameSet::default(), &registry).unwrap_err();
        assert_eq!(
            err,
            PlanError::PathCollision {
                path: PathBuf::from("src/config"),
                first: "slot config".into(),
                second: "slot app_config".into(),
            }
        );
    }

    #[test]
    fn test_file_cannot_be_parent_of_directory() {
        let layout = LayoutSpec {
            directories: vec!["src/pages/Home/assets".into()],
            slots: vec![Slot::per_name("page", "src/pages/{{name:pascal}}", "t")],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        let names = NameSet::new(["home"]).unwrap();
        let err = plan(&layout, &names, &registry).unwrap_err();
        assert_eq!(
            err,
            PlanError::PathCollision {
                path: PathBuf::from("src/pages/Home"),
                first: "slot page[home]".into(),
                second: "directory src/pages/Home/assets".into(),
            }
        );
    }

    #[test]
    fn test_nested_directories_are_not_collisions() {
        let layout = LayoutSpec {
            directories: vec!["src".into(), "src/pages".into()],
            slots: vec![Slot::single("index", "src/pages/index.js", "t")],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        assert!(plan(&layout, &NameSet::default(), &registry).is_ok());
    }

    #[test]
    fn test_directories_render_layout_bindings() {
        let layout = LayoutSpec {
            directories: vec!["src/{{app:pascal}}".into(), "assets/{{app:kebab}}".into()],
            bindings: BTreeMap::from([("app".to_string(), "ShopFront".to_string())]),
            slots: vec![],
        };
        let plan = plan(&layout, &NameSet::default(), &TemplateRegistry::default()).unwrap();
        let paths: Vec<_> = plan.entries().iter().map(|e| e.path().to_path_buf()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("src/ShopFront"), PathBuf::from("assets/shopfront")]
        );
    }

    #[test]
    fn test_directory_cannot_use_name() {
        let layout = LayoutSpec {
            directories: vec!["src/{{name:pascal}}".into()],
            ..Default::default()
        };
        let names = NameSet::new(["home"]).unwrap();
        let err = plan(&layout, &names, &TemplateRegistry::default()).unwrap_err();
        assert_eq!(
            err,
            PlanError::UnboundPlaceholder {
                role: "name".into()
            }
        );
    }

    #[test]
    fn test_unknown_template() {
        let layout = LayoutSpec {
            slots: vec![Slot::single("a", "a.js", "missing.tmpl")],
            ..Default::default()
        };
        let err = plan(&layout, &NameSet::default(), &TemplateRegistry::default()).unwrap_err();
        assert_eq!(
            err,
            PlanError::UnknownTemplate {
                id: "missing.tmpl".into()
            }
        );
    }

    #[test]
    fn test_single_slot_cannot_use_name() {
        let layout = LayoutSpec {
            slots: vec![Slot::single("a", "{{name:pascal}}.js", "t")],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        let names = NameSet::new(["home"]).unwrap();
        let err = plan(&layout, &names, &registry).unwrap_err();
        assert_eq!(
            err,
            PlanError::UnboundPlaceholder {
                role: "name".into()
            }
        );
    }

    #[test]
    fn test_invalid_fixed_binding_value() {
        let layout = LayoutSpec {
            bindings: BTreeMap::from([("app".to_string(), "my-app".to_string())]),
            slots: vec![Slot::single("a", "a.js", "t")],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "x");
        let err = plan(&layout, &NameSet::default(), &registry).unwrap_err();
        assert!(matches!(err, PlanError::InvalidName { .. }));
    }

    #[test]
    fn test_unsafe_paths_rejected() {
        let registry = TemplateRegistry::default().with("t", "x");
        for raw in ["../outside.js", "/etc/passwd", "src/../../x.js", "./a.js", ""] {
            let layout = LayoutSpec {
                slots: vec![Slot::single("a", raw, "t")],
                ..Default::default()
            };
            assert!(
                matches!(
                    plan(&layout, &NameSet::default(), &registry),
                    Err(PlanError::UnsafePath { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_template_errors_surface() {
        let layout = LayoutSpec {
            slots: vec![Slot::single("a", "a.js", "t")],
            ..Default::default()
        };
        let registry = TemplateRegistry::default().with("t", "{{broken");
        let err = plan(&layout, &NameSet::default(), &registry).unwrap_err();
        assert!(matches!(err, PlanError::MalformedPlaceholder { .. }));
    }

    #[test]
    fn test_digest_is_sha256_hex() {
        let file = PlannedFile {
            path: PathBuf::from("a"),
            content: String::new(),
            template_id: "t".into(),
            slot: "a".into(),
            instance: None,
        };
        assert_eq!(
            file.digest(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
