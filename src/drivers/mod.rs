//! Motor helpers shared by the pen and the printer.

pub mod motor;
