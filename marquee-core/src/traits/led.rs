//! Status LED trait

/// Indicator LEDs on the board
pub trait StatusLeds {
    /// Drive the heartbeat LED
    fn set_heartbeat(&mut self, on: bool);

    /// Drive the link fault LED (lit while the network link is down)
    fn set_link_fault(&mut self, on: bool);
}
