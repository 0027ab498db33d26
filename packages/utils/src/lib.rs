pub mod helpers;
pub mod msg_gen;
