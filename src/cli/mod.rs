pub mod audit;
pub mod output;

pub use output::Output;
