//! Pipeline stages for document generation.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own with in-memory inputs.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ content ──▶ assemble ──▶ (writer)
//! (files)   (Jinja)     (skeleton)
//! ```
//!
//! 1. [`input`]    — read the template, optional stylesheet and YAML data
//! 2. [`content`]  — render the template with the data and date/time helpers
//! 3. [`assemble`] — embed the content, paper.css, `@page` rule and user
//!    stylesheet into the fixed HTML skeleton

pub mod assemble;
pub mod content;
pub mod input;
