pub mod cache;
pub mod command;
pub mod interpret;
pub mod registry;
pub mod stack;

pub use self::{
    cache::{
        Cell,
        Cached,
    },
    command::Command,
    interpret::Interpreter,
    stack::{
        Measurable,
        Stack,
    },
};
