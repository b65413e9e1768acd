//! CLI argument parsing and command handling.

mod args;
mod validators;

pub use args::{
    CatalogAction, Cli, Command, CommonArgs, ConfigAction, PredictArgs, ServeArgs,
};
