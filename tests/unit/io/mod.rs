mod cli;
mod error;
mod visualization;
