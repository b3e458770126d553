//! Binary frame layout understood by the light controller.
//!
//! ```text
//! ┌──────┬─────────────────────────────┬────────────────┐
//! │ 0xFE │ one 5-byte record per step  │ 0xFF ×5        │
//! └──────┴─────────────────────────────┴────────────────┘
//! record: mask hi, mask lo, delay hi, delay lo, step index
//! ```
//!
//! Multi-byte fields are big endian. The controller replays records in
//! frame order, holding each mask for its delay.

use crate::sequence::Step;

/// First byte of every frame.
pub const START_MARKER: u8 = 0xFE;

/// Trailer closing every frame.
pub const END_MARKER: [u8; 5] = [0xFF; 5];

/// Size of one encoded step record in bytes.
pub const STEP_LEN: usize = 5;

/// Encodes one step as its 5-byte wire record.
pub fn encode_step(step: &Step) -> [u8; STEP_LEN] {
    let mask = step.mask.to_be_bytes();
    let delay = step.delay_ms.to_be_bytes();
    [mask[0], mask[1], delay[0], delay[1], step.index]
}

/// Assembles the complete frame for an ordered step sequence.
///
/// A pure function of its input: the same steps always produce the same
/// bytes. An empty sequence yields just the two markers.
pub fn encode(steps: &[Step]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(1 + steps.len() * STEP_LEN + END_MARKER.len());
    frame.push(START_MARKER);
    for step in steps {
        frame.extend_from_slice(&encode_step(step));
    }
    frame.extend_from_slice(&END_MARKER);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layout_is_big_endian() {
        let step = Step {
            mask: 0x0102,
            delay_ms: 0x0304,
            index: 0x05,
        };
        assert_eq!(encode_step(&step), [0x01, 0x02, 0x03, 0x04, 0x05]);
    }

    #[test]
    fn record_is_exactly_five_bytes() {
        assert_eq!(STEP_LEN, 5);
        let step = Step {
            mask: 0,
            delay_ms: 1,
            index: 0,
        };
        assert_eq!(encode_step(&step).len(), STEP_LEN);
    }

    #[test]
    fn empty_sequence_is_markers_only() {
        assert_eq!(encode(&[]), [0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn frame_is_framed_by_the_markers() {
        let steps = [
            Step {
                mask: 2,
                delay_ms: 500,
                index: 0,
            },
            Step {
                mask: 1,
                delay_ms: 250,
                index: 1,
            },
        ];
        let frame = encode(&steps);
        assert_eq!(frame[0], START_MARKER);
        assert_eq!(frame[frame.len() - END_MARKER.len()..], END_MARKER);
        assert_eq!(frame.len(), 1 + steps.len() * STEP_LEN + END_MARKER.len());
    }

    #[test]
    fn maximal_step_still_encodes_exactly() {
        let step = Step {
            mask: 0xFFFF,
            delay_ms: 0xFFFF,
            index: 0xFF,
        };
        assert_eq!(encode_step(&step), [0xFF; 5]);
    }
}
