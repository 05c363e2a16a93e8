pub mod dictionary;
pub mod types;
pub mod user_input_delegate;
