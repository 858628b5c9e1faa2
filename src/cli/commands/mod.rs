//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod evaluate;
pub mod strategies;
