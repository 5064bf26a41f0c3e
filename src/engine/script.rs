//! Scripted input for headless runs.
//!
//! A script is a comma-separated list of `event[:frames]` entries, e.g.
//! `move-right:40,attack:20,none:30`. Each entry holds its event for the
//! given number of frames (default 1); the schedule repeats once exhausted.

use std::str::FromStr;

use crate::components::Event;
use crate::error::ScriptError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventScript {
    steps: Vec<(Event, u32)>,
    period: u64,
}

impl EventScript {
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for entry in source.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, count) = match entry.split_once(':') {
                Some((name, count)) => (name.trim(), Some(count.trim())),
                None => (entry, None),
            };
            let event =
                Event::from_str(name).map_err(|_| ScriptError::UnknownEvent(name.to_string()))?;
            let frames = match count {
                Some(count) => match count.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        return Err(ScriptError::BadCount {
                            event: name.to_string(),
                            count: count.to_string(),
                        })
                    }
                },
                None => 1,
            };
            steps.push((event, frames));
        }
        if steps.is_empty() {
            return Err(ScriptError::Empty);
        }
        let period = steps.iter().map(|&(_, n)| u64::from(n)).sum();
        Ok(Self { steps, period })
    }

    /// Event delivered on frame `frame` (0-based), wrapping around the script.
    pub fn event_at(&self, frame: u64) -> Event {
        let mut offset = frame % self.period;
        for &(event, frames) in &self.steps {
            let frames = u64::from(frames);
            if offset < frames {
                return event;
            }
            offset -= frames;
        }
        Event::None
    }

    /// Frames in one pass over the script.
    pub fn period(&self) -> u64 {
        self.period
    }
}

impl FromStr for EventScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
