mod address;
mod codec;
mod event;
mod log;
mod schema;
mod units;

pub use address::*;
pub use codec::*;
pub use event::*;
pub use log::*;
pub use schema::*;
pub use units::*;
