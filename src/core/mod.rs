//! Core pipeline: dataset → layout → figure → output

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod models;
pub mod render;

pub use error::{NutrinetError, Result};
