//! Template system for treeforge scaffolding.
//!
//! Templates are plain text with `{{role:casing}}` placeholders (see [`renderer`]). The
//! default set is embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module; a [`registry::TemplateRegistry`] can also be loaded from a
//! directory so projects can ship their own.
//!
//! ## Placeholders
//!
//! - `{{name:pascal}}` — the current per-name instance, PascalCase (e.g. `Dashboard`)
//! - `{{app:kebab}}` — a fixed binding declared by the layout
//! - `{{{{` — a literal `{{`, for JSX object literals and similar
//!
//! Casings: `raw`, `lower`, `pascal`, `camel`, `kebab`.

pub mod embedded;
pub mod registry;
pub mod renderer;
