pub mod providers;

pub use providers::{CompletionProvider, TrendProvider};
