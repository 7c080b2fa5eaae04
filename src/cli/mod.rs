//! Terminal front-end for the conversion and lookup operations

pub mod convert;
pub mod currencies;
pub mod historical;
pub mod setup;
pub mod ui;
