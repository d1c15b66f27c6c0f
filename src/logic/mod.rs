pub mod activity;
pub mod advisor;
pub mod calculations;
pub mod conditions;
pub mod crop_loss;
pub mod data_sync;
pub mod irrigation;
pub mod pest_disease;
pub mod rules;

pub use advisor::CropAdvisor;
pub use data_sync::DataSyncService;
pub use rules::RulesEngine;
