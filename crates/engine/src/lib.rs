//! Single-threaded game driver.
//!
//! A [`Session`] owns one [`tetrion_core::GameState`] and one
//! [`tetrion_input::InputController`]. Hosts forward key transitions and call
//! [`Session::update`] once per frame with a monotonic timestamp.

pub mod session;

pub use session::Session;
