pub mod crop;
pub mod history;
pub mod insights;
pub mod recommendation;
pub mod weather;

pub use crop::*;
pub use history::*;
pub use insights::*;
pub use recommendation::*;
pub use weather::*;
