//! Record Output Trait

/// Line-oriented output for per-sample and per-event records
///
/// Implementations receive one complete record per call, without a
/// trailing newline. There is no acknowledgement: a sink that cannot keep
/// up or fails to write is expected to drop the line itself.
pub trait LineSink {
    /// Accept one record
    fn write_line(&mut self, line: &str);
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line)
    }
}

#[cfg(feature = "std")]
impl LineSink for std::vec::Vec<std::string::String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.into());
    }
}
