pub mod container;
pub mod path;
