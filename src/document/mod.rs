//! Document model: the dynamically typed [`Value`] and the [`Document`] mapping.
mod core;
mod value;

pub use self::core::Document;
pub use self::value::Value;
