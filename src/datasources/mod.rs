pub mod openmeteo;

pub use openmeteo::OpenMeteoClient;
