pub mod macros;
pub mod output;
pub mod prelude;
