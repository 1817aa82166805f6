//! Domain models for the coffee roast simulator

mod event;
mod roast;
mod session;

pub use event::*;
pub use roast::*;
pub use session::*;
