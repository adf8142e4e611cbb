//! Derive macros for `portvalue-core`.
//!
//! `#[derive(Project)]` inspects a type's declaration and emits the structural
//! category impls (record, wrapper, enumeration or sum type) together with a
//! `Project` impl. `#[derive(Port)]` classifies a processor port by its
//! `value`/`values` members and `#[port(..)]` metadata.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod port;
mod project;

#[proc_macro_derive(Project, attributes(projection))]
pub fn derive_project(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    project::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(Port, attributes(port))]
pub fn derive_port(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    port::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
