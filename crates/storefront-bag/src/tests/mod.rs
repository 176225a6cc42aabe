//! In-crate tests for bag resolution.

mod descriptor;
mod support;
