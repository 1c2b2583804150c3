pub mod cli;
pub mod view_state;
