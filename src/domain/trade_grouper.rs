//! Partitions the series into trade segments by cumulative signal count.
//!
//! `trade_id` 0 marks bars before the first signal and is never a trade.

use crate::domain::signal::Signal;

pub type TradeId = usize;

/// Contiguous run of bars sharing one non-zero `trade_id`; `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeSegment {
    pub trade_id: TradeId,
    pub start: usize,
    pub end: usize,
}

pub fn assign_trade_ids(signals: &[Signal]) -> Vec<TradeId> {
    signals
        .iter()
        .scan(0, |count, signal| {
            if signal.is_entry() {
                *count += 1;
            }
            Some(*count)
        })
        .collect()
}

/// Segments in ascending `trade_id` order.
pub fn trade_segments(trade_ids: &[TradeId]) -> Vec<TradeSegment> {
    let mut segments: Vec<TradeSegment> = Vec::new();

    for (i, &id) in trade_ids.iter().enumerate() {
        if id == 0 {
            continue;
        }
        match segments.last_mut() {
            Some(seg) if seg.trade_id == id => seg.end = i,
            _ => segments.push(TradeSegment {
                trade_id: id,
                start: i,
                end: i,
            }),
        }
    }

    segments
}
