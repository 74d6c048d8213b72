pub mod bus;
pub mod services;

pub use bus::{handle, Handle, Keyed, Listener, OnAdd, ServiceCore};
