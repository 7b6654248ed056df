pub mod health;
pub mod snippets;
pub mod tags;
