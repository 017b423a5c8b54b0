//! Text-menu front-ends
//!
//! Both terminals print a numbered command list, read one answer per line
//! and call into the service layer. Failed operations print a generic
//! message and the cause goes to the log; only a broken terminal stream
//! ends a session early.

pub mod client;
pub mod input;
pub mod manager;
pub mod terminal;

pub use client::{ClientMenu, ClientSession};
pub use manager::{ManagerMenu, ManagerSession};
pub use terminal::Terminal;
