//! Collaborator Traits for ShockWatch
//!
//! The engine never touches hardware directly. Everything it consumes or
//! produces crosses one of these traits, so the same loop runs against the
//! CC3220SF drivers, a host clock, or scripted test doubles.
//!
//! ## Module Organization
//!
//! - [`sensor`] - One-shot analog channel reads
//! - [`time`] - Free-running, wrapping tick counter
//! - [`sink`] - Line-oriented record output
//!
//! ## Usage Example
//!
//! ```rust
//! use shockwatch_core::traits::{ChannelSource, LineSink, TickSource};
//! use shockwatch_core::acquisition::Channel;
//! use shockwatch_core::time::Ticks;
//!
//! struct Fixed;
//!
//! impl ChannelSource for Fixed {
//!     type Error = ();
//!
//!     fn read_channel(&mut self, _channel: Channel) -> nb::Result<u16, ()> {
//!         Ok(685)
//!     }
//! }
//!
//! let mut adc = Fixed;
//! assert_eq!(adc.read_channel(Channel::X), Ok(685));
//! ```

pub mod sensor;
pub mod sink;
pub mod time;

pub use sensor::ChannelSource;
pub use sink::LineSink;
pub use time::TickSource;
