//! stream/protocol.rs
//! Drives an incremental engine step until input is consumed and output
//! flushed, growing the destination on demand.
//!
//! Design notes:
//! - The loop owns the buffer and both positions; the step only advances them.
//! - When to stop, retry or grow is the step's call (`next_action`), so encode
//!   and decode share the loop but keep their own completion rules.
//! - The working buffer is dropped on every exit path, errors included.

use log::trace;

use crate::engine::EngineError;
use crate::stream::buffer::GrowBuffer;
use crate::stream::StreamConfig;
use crate::types::{Result, ZstdError};

/// State after one step, handed to [`StreamStep::next_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Engine's remaining-work value (bytes left to flush, or next input hint).
    pub remaining: usize,
    pub src_pos: usize,
    pub src_len: usize,
    pub dst_pos: usize,
    pub capacity: usize,
    /// Whether this step moved either position.
    pub progressed: bool,
}

impl StepReport {
    pub fn input_consumed(&self) -> bool {
        self.src_pos == self.src_len
    }

    pub fn output_full(&self) -> bool {
        self.dst_pos == self.capacity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Output is complete for this call.
    Finish,
    /// Call the step again with the same buffer.
    Retry,
    /// Enlarge the buffer to `max(cap * 2, cap + hint)` and call again.
    Grow { hint: usize },
}

pub trait StreamStep {
    /// One engine call over `dst[dst_pos..]` and `src[src_pos..]`.
    fn step(
        &mut self,
        dst: &mut [u8],
        dst_pos: &mut usize,
        src: &[u8],
        src_pos: &mut usize,
    ) -> std::result::Result<usize, EngineError>;

    fn next_action(&self, report: &StepReport) -> NextAction;
}

/// Result of one driven call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOutput {
    pub data: Vec<u8>,
    /// Remaining-work value of the last step.
    pub remaining: usize,
    /// Source bytes the engine accepted.
    pub consumed: usize,
    pub grows: u32,
    pub peak_capacity: usize,
}

pub fn drive<S>(src: &[u8], config: &StreamConfig, step: &mut S) -> Result<StreamOutput>
where
    S: StreamStep + ?Sized,
{
    let mut buf = GrowBuffer::new(config.initial_capacity, config.max_capacity)?;
    let mut src_pos = 0usize;
    let mut dst_pos = 0usize;

    let remaining = loop {
        let (src_before, dst_before) = (src_pos, dst_pos);
        let remaining = step
            .step(buf.as_mut_slice(), &mut dst_pos, src, &mut src_pos)
            .map_err(ZstdError::from_stream)?;

        let report = StepReport {
            remaining,
            src_pos,
            src_len: src.len(),
            dst_pos,
            capacity: buf.capacity(),
            progressed: src_pos != src_before || dst_pos != dst_before,
        };
        let action = step.next_action(&report);
        trace!("stream step: {:?} -> {:?}", report, action);

        match action {
            NextAction::Finish => break remaining,
            NextAction::Retry => {}
            NextAction::Grow { hint } => buf.grow(hint)?,
        }
    };

    let grows = buf.grows();
    let peak_capacity = buf.capacity();
    Ok(StreamOutput {
        data: buf.into_output(dst_pos),
        remaining,
        consumed: src_pos,
        grows,
        peak_capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::codes;

    fn pattern(i: usize) -> u8 {
        (i % 251) as u8
    }

    /// Emits `total` bytes of `pattern` at whatever rate the buffer allows,
    /// consuming all input on the first call and reporting what is left.
    struct Spill {
        total: usize,
        written: usize,
        calls: usize,
        fail_at: Option<usize>,
    }

    impl Spill {
        fn new(total: usize) -> Self {
            Self { total, written: 0, calls: 0, fail_at: None }
        }
    }

    impl StreamStep for Spill {
        fn step(
            &mut self,
            dst: &mut [u8],
            dst_pos: &mut usize,
            src: &[u8],
            src_pos: &mut usize,
        ) -> std::result::Result<usize, EngineError> {
            self.calls += 1;
            if self.fail_at == Some(self.calls) {
                return Err(EngineError::from_result(codes::CORRUPTION_DETECTED.wrapping_neg()));
            }
            *src_pos = src.len();
            let room = dst.len() - *dst_pos;
            let n = room.min(self.total - self.written);
            for (i, b) in dst[*dst_pos..*dst_pos + n].iter_mut().enumerate() {
                *b = pattern(self.written + i);
            }
            *dst_pos += n;
            self.written += n;
            Ok(self.total - self.written)
        }

        fn next_action(&self, r: &StepReport) -> NextAction {
            if r.remaining == 0 {
                NextAction::Finish
            } else {
                NextAction::Grow { hint: r.remaining }
            }
        }
    }

    #[test]
    fn large_hint_is_honoured_in_one_growth() {
        let mut s = Spill::new(10_000);
        let out = drive(b"x", &StreamConfig::default(), &mut s).unwrap();
        assert_eq!(out.data.len(), 10_000);
        let expected: Vec<u8> = (0..10_000).map(pattern).collect();
        assert_eq!(out.data, expected);
        // 100 bytes, then cap + 9_900 remaining
        assert_eq!(out.grows, 1);
        assert_eq!(out.peak_capacity, 10_000);
        assert_eq!(s.calls, 2);
        assert_eq!(out.consumed, 1);
    }

    #[test]
    fn small_output_needs_no_growth() {
        let mut s = Spill::new(10);
        let out = drive(b"abc", &StreamConfig::default(), &mut s).unwrap();
        assert_eq!(out.data, (0..10).map(pattern).collect::<Vec<u8>>());
        assert_eq!(out.grows, 0);
        assert_eq!(out.remaining, 0);
    }

    #[test]
    fn repeated_growth_keeps_byte_order() {
        let mut s = Spill::new(5_000);
        let cfg = StreamConfig::new(Some(7), None);
        let mut hintless = HintlessSpill(&mut s);
        let out = drive(b"x", &cfg, &mut hintless).unwrap();
        assert!(out.grows > 5);
        assert_eq!(out.data, (0..5_000).map(pattern).collect::<Vec<u8>>());
    }

    /// `Spill` without the hint: growth only doubles, so the output crosses
    /// many buffer boundaries.
    struct HintlessSpill<'a>(&'a mut Spill);

    impl StreamStep for HintlessSpill<'_> {
        fn step(
            &mut self,
            dst: &mut [u8],
            dst_pos: &mut usize,
            src: &[u8],
            src_pos: &mut usize,
        ) -> std::result::Result<usize, EngineError> {
            self.0.step(dst, dst_pos, src, src_pos)
        }

        fn next_action(&self, r: &StepReport) -> NextAction {
            match self.0.next_action(r) {
                NextAction::Grow { .. } => NextAction::Grow { hint: 0 },
                other => other,
            }
        }
    }

    #[test]
    fn step_error_aborts_with_classified_error() {
        let mut s = Spill::new(10_000);
        s.fail_at = Some(2);
        let err = drive(b"x", &StreamConfig::default(), &mut s).unwrap_err();
        assert!(matches!(err, ZstdError::CorruptData(_)));
    }

    #[test]
    fn ceiling_turns_growth_into_out_of_memory() {
        let mut s = Spill::new(10_000);
        let cfg = StreamConfig::new(None, Some(1_000));
        assert_eq!(drive(b"x", &cfg, &mut s).unwrap_err(), ZstdError::OutOfMemory);
    }

    struct Trickle {
        left: usize,
    }

    impl StreamStep for Trickle {
        fn step(
            &mut self,
            dst: &mut [u8],
            dst_pos: &mut usize,
            _src: &[u8],
            _src_pos: &mut usize,
        ) -> std::result::Result<usize, EngineError> {
            if self.left > 0 && *dst_pos < dst.len() {
                dst[*dst_pos] = 1;
                *dst_pos += 1;
                self.left -= 1;
            }
            Ok(self.left)
        }

        fn next_action(&self, r: &StepReport) -> NextAction {
            match (r.remaining, r.output_full()) {
                (0, _) => NextAction::Finish,
                (_, true) => NextAction::Grow { hint: 0 },
                _ => NextAction::Retry,
            }
        }
    }

    #[test]
    fn retry_keeps_the_buffer() {
        let mut s = Trickle { left: 50 };
        let out = drive(b"", &StreamConfig::default(), &mut s).unwrap();
        assert_eq!(out.data, vec![1u8; 50]);
        assert_eq!(out.grows, 0);
        assert_eq!(out.peak_capacity, 100);
    }
}
