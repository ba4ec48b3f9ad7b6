#[macro_use]
extern crate pest_derive;

pub mod code;
pub mod number;
pub mod parser;
pub mod proto;
pub mod vm;
