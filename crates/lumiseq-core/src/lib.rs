//! Core functionalities: sequence parsing, frame encoding, serial output.

pub mod error;
pub mod frame;
pub mod sequence;
pub mod serial_link;
pub mod source;

pub use error::{LinkError, ParseError};
pub use frame::{encode, encode_step, END_MARKER, START_MARKER, STEP_LEN};
pub use sequence::{parse_sequence, Step, MAX_CHANNELS, MAX_STEPS};
pub use serial_link::{LinkConfig, PortInfo, SerialLink};
pub use source::{decode_text, read_text};
