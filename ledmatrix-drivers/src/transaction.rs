//! Serial transaction primitive
//!
//! One transaction is exactly one 16-bit frame inside one slave-select
//! window, in this fixed order:
//!
//! 1. assert slave-select
//! 2. write the frame
//! 3. wait until the shift register has drained
//! 4. deassert slave-select
//!
//! On bare metal none of these steps can fail and a broken link only shows
//! up as a wrong picture. Host buses may report errors; slave-select is
//! still released before the first error is returned.

use ledmatrix_hal::SerialBus;

/// Send one frame as a single select-bracketed transaction
pub fn transmit<B: SerialBus>(bus: &mut B, frame: u16) -> Result<(), B::Error> {
    bus.select()?;

    let shifted = bus.write_frame(frame).and_then(|()| bus.wait_complete());
    let released = bus.deselect();

    shifted.and(released)
}
