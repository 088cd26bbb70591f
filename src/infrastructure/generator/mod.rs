//! Generation Invoker implementations

mod command;

pub use command::{CommandGenerator, DEFAULT_GENERATOR_KIND, DEFAULT_GENERATOR_PROGRAM};
