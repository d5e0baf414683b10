use std::fmt;

use super::state::Ticks;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentOwner {
    Process(String),
    /// No process had arrived yet.
    Idle,
}

impl SegmentOwner {
    pub fn process_name(&self) -> Option<&str> {
        match self {
            SegmentOwner::Process(name) => Some(name),
            SegmentOwner::Idle => None,
        }
    }
}

impl fmt::Display for SegmentOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentOwner::Process(name) => f.write_str(name),
            SegmentOwner::Idle => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub owner: SegmentOwner,
    pub duration: Ticks,
}

/// Run-length encoded execution history. Consecutive slices with the same
/// owner collapse into one segment.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    segments: Vec<Segment>,
    total: Ticks,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, owner: SegmentOwner, duration: Ticks) {
        debug_assert!(duration > 0, "Zero-length segment recorded for {owner}");
        self.total += duration;

        match self.segments.last_mut() {
            Some(last) if last.owner == owner => last.duration += duration,
            _ => self.segments.push(Segment { owner, duration }),
        }
    }

    pub fn total(&self) -> Ticks {
        self.total
    }

    pub fn finalize(self) -> Timeline {
        Timeline {
            segments: self.segments,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    segments: Vec<Segment>,
    total: Ticks,
}

impl Timeline {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn total(&self) -> Ticks {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `(start, end, owner)` for every segment, from the running prefix sum.
    pub fn boundaries(&self) -> impl Iterator<Item = (Ticks, Ticks, &SegmentOwner)> + '_ {
        self.segments.iter().scan(0, |t, seg| {
            let start = *t;
            *t += seg.duration;
            Some((start, *t, &seg.owner))
        })
    }

    /// CPU time the timeline attributes to `name`.
    pub fn time_for(&self, name: &str) -> Ticks {
        self.segments
            .iter()
            .filter(|seg| seg.owner.process_name() == Some(name))
            .map(|seg| seg.duration)
            .sum()
    }

    pub fn idle_time(&self) -> Ticks {
        self.segments
            .iter()
            .filter(|seg| seg.owner == SegmentOwner::Idle)
            .map(|seg| seg.duration)
            .sum()
    }
}
