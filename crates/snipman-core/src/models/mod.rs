pub mod draft;
pub mod snippet;
pub mod tag;
