pub mod config;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod interpreter;
pub mod lexer;
pub mod loader;
pub mod logging;
pub mod object;
pub mod runtime;
pub mod scan;
pub mod stack;
pub mod token;

pub use config::Config;
pub use error::{Fault, RunError, Signal};
pub use object::Value;
pub use runtime::{Runtime, Status};
