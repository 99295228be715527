//! Analog Channel Source Trait
//!
//! Reads follow the `nb` one-shot model used by embedded ADC drivers: a
//! conversion either completes (`Ok`), is still in progress
//! (`nb::Error::WouldBlock`), or fails (`nb::Error::Other`). The acquirer
//! polls `WouldBlock` to completion with `nb::block!`, so a source backed
//! by a blocking driver can simply return `Ok` or `Other`.

use crate::acquisition::Channel;

/// Source of raw ADC counts, one conversion per channel per call
///
/// ## Contract
///
/// - Called exactly once per channel per cycle, in channel order
/// - A failure affects only that channel for that cycle
/// - Must not block indefinitely while returning `WouldBlock`
///
/// ## Example Implementation
///
/// ```rust
/// use shockwatch_core::traits::ChannelSource;
/// use shockwatch_core::acquisition::Channel;
///
/// struct Adc {
///     ready: bool,
/// }
///
/// impl ChannelSource for Adc {
///     type Error = ();
///
///     fn read_channel(&mut self, _channel: Channel) -> nb::Result<u16, ()> {
///         if !self.ready {
///             self.ready = true;
///             return Err(nb::Error::WouldBlock);
///         }
///         Ok(1200)
///     }
/// }
/// ```
pub trait ChannelSource {
    /// Driver-specific conversion error
    type Error;

    /// Start or poll a conversion on `channel`
    fn read_channel(&mut self, channel: Channel) -> nb::Result<u16, Self::Error>;
}

impl<T: ChannelSource + ?Sized> ChannelSource for &mut T {
    type Error = T::Error;

    fn read_channel(&mut self, channel: Channel) -> nb::Result<u16, Self::Error> {
        (**self).read_channel(channel)
    }
}
