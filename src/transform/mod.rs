//! Idempotent source rewrites for the router bootstrap, entry and markup files.
//!
//! Statements are located with line-anchored regular expressions instead of a
//! parser. Coverage is deliberately bounded to the shapes Vue CLI scaffolds;
//! anything else is left untouched and reported by the caller.

pub mod locator;
pub mod markup;
pub mod rewriter;

pub use locator::{find_import, last_import_line};
pub use markup::{insert_language_switcher, rewrite_markup_tag};
pub use rewriter::{InstallArgs, add_import, inject_root_option, replace_install_directive};
