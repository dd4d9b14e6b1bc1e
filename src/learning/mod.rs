pub mod action;
pub mod agent;
pub mod q_table;
pub mod serde_utils;
pub mod state_key;
