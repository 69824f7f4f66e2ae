//! GamedIn - Career progression idle simulation

pub mod core;
pub mod data;
pub mod progression;
