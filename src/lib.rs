pub mod cli;
pub mod commands;
pub mod msa;
pub mod utils;
