//! Form rendering module
//!
//! This module contains UI components for rendering the donation wizard:
//! - `field_renderer`: Field rendering utilities
//! - `wizard_form`: Per-step field layout
//! - `review`: Review step summary

mod field_renderer;
mod review;
mod wizard_form;

pub use wizard_form::draw_wizard;
