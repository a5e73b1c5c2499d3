//! Blocking delay abstraction

/// Blocking millisecond delay
///
/// The only timing primitive the driver stack consumes. Implementations
/// must not return before `ms` milliseconds have elapsed.
pub trait DelayMs {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: DelayMs + ?Sized> DelayMs for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
