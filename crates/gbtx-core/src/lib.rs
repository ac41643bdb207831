pub mod error;
pub mod validate;

pub mod channel;
pub mod compare;
pub mod decode;
pub mod frame;
pub mod layout;
pub mod pattern;
pub mod shift;

pub use crate::compare::{compare, LengthMismatch, MatchReport, MatchStats};
pub use crate::decode::{DecodeReport, FrameDecoder, MalformedPolicy};
pub use crate::error::{GbtxError, Result};
pub use crate::frame::{Frame, Sequence};
pub use crate::layout::{FrameLayout, LayoutConfig, Slot};
pub use crate::pattern::{generate, CyclicChannel, PatternConfig, PatternDescriptor};
pub use crate::shift::{detect_shifts, rotation_distance, ShiftReport, SHIFT_MISMATCH};
