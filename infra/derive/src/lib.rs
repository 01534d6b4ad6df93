#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the nodelock crates.
//!
//! Only one macro lives here today: [`macro@nodelock_error`], which turns a plain enum into the
//! error type every library crate in the workspace exposes.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! nodelock-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```

mod error_enum;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a `thiserror` error with context support.
///
/// Every variant must use named fields. A variant that wraps another error names that field
/// `source` (or marks it `#[source]` / `#[from]`) and must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]`, skipping whichever the enum already derives.
/// * A `<Name>Ext<T>` trait with `context(..)` for `Result<T, Name>` and for
///   `Result<T, SourceError>` of every source-carrying variant.
/// * `From<SourceError>` for every source-carrying variant.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper used by the `#[error(..)]` strings.
///
/// # Example
///
/// ```rust,ignore
/// use nodelock_derive::nodelock_error;
/// use std::borrow::Cow;
///
/// #[nodelock_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &std::path::Path) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("Reading blob")
/// }
/// ```
#[proc_macro_attribute]
pub fn nodelock_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error_enum::expand(input).into()
}
