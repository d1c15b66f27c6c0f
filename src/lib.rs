pub mod cli;
pub mod config;
pub mod datasources;
pub mod db;
pub mod error;
pub mod logic;
pub mod models;
pub mod report;

pub use error::{CropwiseError, Result};
pub use logic::CropAdvisor;
