pub mod config;
pub mod snippets;
pub mod tags;
