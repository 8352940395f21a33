pub mod crop;
pub mod find;
