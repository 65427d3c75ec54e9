//! Read entities definitions.

pub mod inquiry;
pub mod property;
