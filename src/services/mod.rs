pub mod collection;
pub mod streak;

pub use collection::Collection;
