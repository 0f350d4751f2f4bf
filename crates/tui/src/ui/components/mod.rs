pub mod badge;
pub mod money;
