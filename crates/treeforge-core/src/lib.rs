//! Core library for the treeforge scaffolding generator.
//!
//! Turns a declarative [`layout::LayoutSpec`] plus a list of names into a tree of files:
//!
//! 1. [`casing`] derives the casing variants of every name
//! 2. [`planner`] resolves paths and renders [`templates`] into a [`planner::Plan`],
//!    rejecting collisions before anything is written
//! 3. [`writer`] materializes the plan under a project root with a [`writer::ConflictPolicy`]
//! 4. [`report`] collects one outcome per planned entry
//!
//! [`scaffold::Scaffolder`] drives the whole sequence. Dependency installation after a
//! successful run lives in [`installer`].

pub mod casing;
pub mod config;
pub mod error;
pub mod installer;
pub mod layout;
pub mod names;
pub mod planner;
pub mod report;
pub mod scaffold;
pub mod templates;
pub mod writer;
