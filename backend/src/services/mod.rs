//! Business logic services for the roast simulator

pub mod roasting;

pub use roasting::RoastingService;
