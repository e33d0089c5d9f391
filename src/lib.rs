//! Client for the LaTeX Lite document rendering API.
//!
//! [`RenderClient`] covers both ways of getting a PDF out of the service: a
//! single synchronous render, or creating a job, polling it until it finishes
//! and downloading the result.

pub mod client;
pub mod config;
pub mod demos;
pub mod infra;
pub mod latex;

pub use client::{ClientError, JobSource, RenderClient, wait_for_terminal};
pub use latexlite_api_types as api;
