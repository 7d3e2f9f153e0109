//! Bus-bound controller front end.

use controller_core::{CanBus, ControllerInput, ControllerState, InputError};

use crate::encode::{encode_analog, encode_buttons};
use crate::parser::CanParser;

/// Upper bound on frames drained by one [`ControllerInput::update`] call, so
/// a flooded bus cannot stall the caller's loop.
pub const MAX_FRAMES_PER_UPDATE: usize = 32;

/// A [`CanParser`] fed from a [`CanBus`] driver.
///
/// # Example
///
/// ```ignore
/// let mut controller = CanController::new(can);
///
/// loop {
///     if controller.read()? {
///         drive(controller.state());
///     }
/// }
/// ```
pub struct CanController<B> {
    bus: B,
    parser: CanParser,
}

impl<B: CanBus> CanController<B> {
    /// Create a new controller over the given bus driver.
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            parser: CanParser::new(),
        }
    }

    /// Take at most one frame from the bus and decode it.
    ///
    /// Returns `Ok(true)` if a controller frame was decoded, `Ok(false)` if the
    /// bus had nothing or the frame belonged to someone else.
    pub fn read(&mut self) -> Result<bool, InputError> {
        match self.bus.receive()? {
            Some(frame) => Ok(self.parser.parse(frame.id, &frame.data)),
            None => Ok(false),
        }
    }

    /// Transmit `state` as an analog frame followed by a button frame.
    pub fn publish(&mut self, state: &ControllerState) -> Result<(), InputError> {
        self.bus.transmit(&encode_analog(state))?;
        self.bus.transmit(&encode_buttons(state))?;
        Ok(())
    }

    /// Get the decoded controller state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ControllerState {
        self.parser.state()
    }

    /// Direct access to the parser.
    pub fn parser(&self) -> &CanParser {
        &self.parser
    }

    /// Mutable access to the parser.
    pub fn parser_mut(&mut self) -> &mut CanParser {
        &mut self.parser
    }

    /// Get a reference to the bus driver.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Get a mutable reference to the bus driver.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Decompose into the bus driver and the parser.
    pub fn into_parts(self) -> (B, CanParser) {
        (self.bus, self.parser)
    }
}

impl<B: CanBus> ControllerInput for CanController<B> {
    fn update(&mut self) -> Result<bool, InputError> {
        let mut decoded = false;
        for _ in 0..MAX_FRAMES_PER_UPDATE {
            match self.bus.receive()? {
                Some(frame) => decoded |= self.parser.parse(frame.id, &frame.data),
                None => break,
            }
        }
        Ok(decoded)
    }

    fn state(&self) -> &ControllerState {
        self.parser.state()
    }
}
