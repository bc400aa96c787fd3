#[macro_use]
mod macros;

pub mod cents;
pub mod euros;
