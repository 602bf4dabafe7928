pub mod availability;
pub mod queue;
pub mod scheduler;
pub mod slot_label;
pub mod time_codec;
pub mod validator;
