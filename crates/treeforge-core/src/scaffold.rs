//! Top-level driver: validate, plan, write, report.

use std::path::Path;

use crate::error::PlanError;
use crate::layout::LayoutSpec;
use crate::names::NameSet;
use crate::planner::{self, Plan};
use crate::report::ScaffoldReport;
use crate::templates::registry::TemplateRegistry;
use crate::writer::{ConflictPolicy, FileSystem, FileTreeWriter, LocalFileSystem};

/// A layout paired with the templates it renders.
///
/// Both are immutable for the lifetime of the scaffolder, so one instance can serve
/// any number of runs, including concurrent runs against different roots.
#[derive(Debug, Clone)]
pub struct Scaffolder {
    layout: LayoutSpec,
    registry: TemplateRegistry,
}

impl Scaffolder {
    pub fn new(layout: LayoutSpec, registry: TemplateRegistry) -> Self {
        Self { layout, registry }
    }

    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Validate `names` and resolve the plan without touching the filesystem.
    pub fn plan<S: AsRef<str>>(&self, names: &[S]) -> Result<Plan, PlanError> {
        let names = NameSet::new(names)?;
        planner::plan(&self.layout, &names, &self.registry)
    }

    /// Scaffold into `root` on the local filesystem.
    pub fn run<S: AsRef<str>>(
        &self,
        root: &Path,
        names: &[S],
        policy: ConflictPolicy,
    ) -> ScaffoldReport {
        self.run_on(&LocalFileSystem, root, names, policy)
    }

    /// Scaffold into `root` through `fs`.
    ///
    /// Validation and planning errors return an empty report carrying the error;
    /// `fs` is not called at all in that case.
    pub fn run_on<F, S>(
        &self,
        fs: &F,
        root: &Path,
        names: &[S],
        policy: ConflictPolicy,
    ) -> ScaffoldReport
    where
        F: FileSystem + ?Sized,
        S: AsRef<str>,
    {
        tracing::info!(
            "scaffolding {} ({} names, on conflict: {})",
            root.display(),
            names.len(),
            policy.as_str()
        );

        let plan = match self.plan(names) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!("scaffold aborted before writing: {e}");
                return ScaffoldReport::aborted(root, e);
            }
        };

        let report = FileTreeWriter::new(fs, root).write(&plan, policy);
        tracing::info!("scaffold finished: {}", report.summary());
        report
    }
}
