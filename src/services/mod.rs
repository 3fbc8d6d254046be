pub mod directory;
pub mod geo;
pub mod intake;
pub mod registration;
pub mod relay;
pub mod session;
