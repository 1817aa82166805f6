//! HTTP request handlers

mod health;
mod profile;
mod roasting;

pub use health::*;
pub use profile::*;
pub use roasting::*;
