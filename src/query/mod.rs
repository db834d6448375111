pub mod builder;

pub use builder::SelectBuilder;
