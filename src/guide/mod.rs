//! Guide pipeline — prose composition and PDF rendering.

pub mod composer;
pub mod pdf;

pub use composer::{Composer, template_guide};

/// Title used for the rendered document and the delivery email.
pub const GUIDE_TITLE: &str = "Personalized Preparedness Guide";
