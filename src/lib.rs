//! Stache - Logic-less Template Compiler
//!
//! Templates are compiled once into a [`Template`], and rendered any number
//! of times against some data.
//!
//! ```
//! use stache::{compile, render, Store};
//!
//! let template = compile("{{#people}}Hello, {{name}}!\n{{/people}}").unwrap();
//! let store = Store::new().with_must(
//!     "people",
//!     serde_json::json!([{ "name": "Taylor" }, { "name": "Jordan" }]),
//! );
//!
//! assert_eq!(
//!     render(&template, &store).unwrap(),
//!     "Hello, Taylor!\nHello, Jordan!\n"
//! );
//! ```
//!
//! Partials are resolved when the template is rendered, through any type
//! implementing [`Partials`]. An [`Engine`] stores named templates, and
//! provides them as partials.
mod compile;
mod engine;
mod lambda;
mod log;
mod partials;
mod region;
mod render;
mod store;
mod syntax;
mod value;

pub mod tree {
    //! Contains the intermediate forms of a template, which are useful for
    //! inspecting how a template was understood.
    pub use crate::compile::{Compiler, Instruction, Parser, Path, Scope, Section, Token};
}

pub use crate::{
    compile::{compile, Template},
    engine::Engine,
    lambda::{Invocation, Lambda},
    log::{Error, ErrorKind, Pointer, Visual},
    partials::Partials,
    region::Region,
    render::render,
    store::Store,
    syntax::{Builder, Syntax},
    value::Value,
};
