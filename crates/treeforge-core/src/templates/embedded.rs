//! Compile-time embedded templates for the default React layout.
//!
//! Each constant loads a template file from `templates/react/` via [`include_str!`]. The
//! paths are relative to this source file (`crates/treeforge-core/src/templates/embedded.rs`).
//!
//! ## Adding a new template
//!
//! 1. Place the template file under `templates/react/`
//! 2. Add a `pub const` here with `include_str!("../../../../templates/react/<file>")`
//! 3. Add the `(id, body)` pair to [`ALL`] and reference the id from a layout slot
//!
//! Do NOT rename template files without updating the `include_str!` path here, and
//! keep the placeholder roles in sync with the bindings the layout declares.

// -------------------------------------------------------
// Per-name templates (bound to the `name` role)
// -------------------------------------------------------

pub const PAGE_ID: &str = "page.tmpl";
pub const PAGE: &str = include_str!("../../../../templates/react/page.tmpl");

pub const PAGE_STYLE_ID: &str = "page_style.tmpl";
pub const PAGE_STYLE: &str = include_str!("../../../../templates/react/page_style.tmpl");

pub const SERVICE_ID: &str = "service.tmpl";
pub const SERVICE: &str = include_str!("../../../../templates/react/service.tmpl");

// -------------------------------------------------------
// Single-instance templates (bound to the `app` role)
// -------------------------------------------------------

pub const APP_ID: &str = "app.tmpl";
pub const APP: &str = include_str!("../../../../templates/react/app.tmpl");

pub const APP_STYLE_ID: &str = "app_style.tmpl";
pub const APP_STYLE: &str = include_str!("../../../../templates/react/app_style.tmpl");

pub const CONTEXT_ID: &str = "context.tmpl";
pub const CONTEXT: &str = include_str!("../../../../templates/react/context.tmpl");

pub const MAIN_ID: &str = "main.tmpl";
pub const MAIN: &str = include_str!("../../../../templates/react/main.tmpl");

/// Every embedded template as `(id, body)`.
pub const ALL: &[(&str, &str)] = &[
    (PAGE_ID, PAGE),
    (PAGE_STYLE_ID, PAGE_STYLE),
    (SERVICE_ID, SERVICE),
    (APP_ID, APP),
    (APP_STYLE_ID, APP_STYLE),
    (CONTEXT_ID, CONTEXT),
    (MAIN_ID, MAIN),
];
