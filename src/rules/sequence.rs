use crate::error::{Result, TransformError};

/// Default first rule sequence number.
pub const DEFAULT_START: u32 = 10;

/// Default distance between consecutive rule sequence numbers.
pub const DEFAULT_STEP: u32 = 5;

/// Ascending rule sequence numbers: 10, 15, 20, ...
///
/// Each call to `next` draws a fresh number; the counter never restarts.
/// The sequence ends instead of repeating a number once `u32::MAX` would be passed.
#[derive(Debug, Clone)]
pub struct RuleSequence {
	next: Option<u32>,
	step: u32,
}

impl RuleSequence {
	/// Create a sequence with a custom start and step. The step must be non-zero.
	pub fn new(start: u32, step: u32) -> Result<Self> {
		if step == 0 {
			return Err(TransformError::InvalidSequenceStep { step });
		}
		Ok(RuleSequence {
			next: Some(start),
			step,
		})
	}
}

impl Default for RuleSequence {
	fn default() -> Self {
		RuleSequence {
			next: Some(DEFAULT_START),
			step: DEFAULT_STEP,
		}
	}
}

impl Iterator for RuleSequence {
	type Item = u32;

	fn next(&mut self) -> Option<u32> {
		let current = self.next?;
		self.next = current.checked_add(self.step);
		Some(current)
	}
}
