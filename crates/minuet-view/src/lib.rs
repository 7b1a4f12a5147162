//! Minuet View - Template Compiler and Application Object
//!
//! Turns a host tree annotated with directives into live bindings over a
//! reactive graph, and wraps the whole assembly in an [`App`].
//!
//! ## Architecture
//!
//! - **directive**: parses `v-` attribute names into a closed [`Directive`]
//!   set; unknown names degrade to a no-op variant.
//! - **interpolate**: the `{{ path }}` placeholder syntax and value
//!   display rules.
//! - **binding**: one strategy per directive; each returns the RAII guards
//!   whose drop detaches it.
//! - **compiler**: the one-pass tree walk that finds directives and
//!   placeholder text and binds them, skipping anything that fails.
//! - **app**: the builder and the mounted application, with named methods
//!   reachable from `v-on` and computed properties layered on the data.
//!
//! Propagation is synchronous and unbatched: by the time
//! [`App::set`] returns, every affected binding has re-rendered.
//!
//! ## Example
//!
//! ```ignore
//! use minuet_dom::Node;
//! use minuet_view::App;
//! use serde_json::json;
//!
//! let root = Node::element("div")
//!     .with_child(Node::text_node("hello, {{ user.name }}"))
//!     .with_child(Node::element("input").with_attr("v-model", "user.name"));
//!
//! let app = App::builder()
//!     .data(json!({ "user": { "name": "ada" } }))
//!     .mount(&root)?;
//!
//! app.set("user.name", json!("grace"))?;
//! ```

pub mod app;
pub mod binding;
pub mod compiler;
pub mod directive;
pub mod error;
pub mod interpolate;

pub use app::{App, AppBuilder, Method};
pub use binding::MethodDispatcher;
pub use compiler::{Bindings, Compiler};
pub use directive::{Directive, DIRECTIVE_PREFIX};
pub use error::{CompileError, CompileResult};
