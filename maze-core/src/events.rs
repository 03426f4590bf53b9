//! Notifications for whoever draws the maze.
//!
//! Generation and solving report every mutation through an [`EventSink`], in
//! the exact order the mutations happen. Nothing in the algorithms depends on
//! an event being observed, so the sink is free to ignore, record, print or
//! throttle them.

use std::{str::FromStr, thread, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    dims::Pos,
    error::ParseError,
    grid::{Direction, Walls},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeEvent {
    /// Carving reached this cell for the first time, `walls` is its state at that point.
    CellFinalized { pos: Pos, walls: Walls },
    /// Wall pair between `from` and `to` was removed.
    WallBroken {
        from: Pos,
        to: Pos,
        direction: Direction,
    },
    /// Outer wall of the entrance or exit was removed.
    BoundaryOpened { pos: Pos, direction: Direction },
    CellVisited { pos: Pos },
    /// Solver stepped along an edge, or undid that step when `backtrack` is set.
    Move { from: Pos, to: Pos, backtrack: bool },
}

impl MazeEvent {
    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            Self::CellFinalized { .. } | Self::WallBroken { .. } | Self::BoundaryOpened { .. }
        )
    }
}

pub trait EventSink {
    fn emit(&mut self, event: MazeEvent);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&mut self, _event: MazeEvent) {}
}

impl EventSink for Vec<MazeEvent> {
    fn emit(&mut self, event: MazeEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: MazeEvent) {
        (**self).emit(event);
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(MazeEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: MazeEvent) {
        (self.0)(event);
    }
}

/// Forwards events to `inner` and sleeps `delay` after each one.
///
/// This is the animation throttle, a zero delay makes it a plain pass-through.
#[derive(Debug, Clone)]
pub struct Paced<S> {
    inner: S,
    delay: Duration,
}

impl<S: EventSink> Paced<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for Paced<S> {
    fn emit(&mut self, event: MazeEvent) {
        self.inner.emit(event);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Named pacing presets for [`Paced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationSpeed {
    VerySlow,
    Slow,
    #[default]
    Normal,
    Fast,
    VeryFast,
    Instant,
}

impl AnimationSpeed {
    pub fn delay(self) -> Duration {
        match self {
            Self::VerySlow => Duration::from_millis(300),
            Self::Slow => Duration::from_millis(100),
            Self::Normal => Duration::from_millis(50),
            Self::Fast => Duration::from_millis(5),
            Self::VeryFast => Duration::from_micros(100),
            Self::Instant => Duration::ZERO,
        }
    }
}

impl FromStr for AnimationSpeed {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "very-slow" => Ok(Self::VerySlow),
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            "very-fast" => Ok(Self::VeryFast),
            "instant" => Ok(Self::Instant),
            _ => Err(ParseError {
                kind: "animation speed",
                value: s.to_string(),
                expected: "very-slow, slow, normal, fast, very-fast, instant",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_records_in_order() {
        let mut events: Vec<MazeEvent> = Vec::new();
        events.emit(MazeEvent::CellVisited { pos: Pos(0, 0) });
        events.emit(MazeEvent::Move {
            from: Pos(0, 0),
            to: Pos(0, 1),
            backtrack: false,
        });
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], MazeEvent::CellVisited { pos: Pos(0, 0) });
        assert!(!events[1].is_generation());
    }

    #[test]
    fn fn_sink_and_paced() {
        let mut count = 0;
        {
            let sink = FnSink(|_: MazeEvent| count += 1);
            let mut paced = Paced::new(sink, AnimationSpeed::Instant.delay());
            for _ in 0..3 {
                paced.emit(MazeEvent::CellVisited { pos: Pos(1, 1) });
            }
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn speeds_are_ordered() {
        let speeds = [
            AnimationSpeed::VerySlow,
            AnimationSpeed::Slow,
            AnimationSpeed::Normal,
            AnimationSpeed::Fast,
            AnimationSpeed::VeryFast,
            AnimationSpeed::Instant,
        ];
        for pair in speeds.windows(2) {
            assert!(pair[0].delay() > pair[1].delay());
        }
        assert_eq!(AnimationSpeed::default().delay(), Duration::from_millis(50));
    }

    #[test]
    fn parse_speed() {
        assert_eq!("very-slow".parse(), Ok(AnimationSpeed::VerySlow));
        assert_eq!("Very Fast".parse(), Ok(AnimationSpeed::VeryFast));
        assert_eq!("instant".parse(), Ok(AnimationSpeed::Instant));
        assert!("ludicrous".parse::<AnimationSpeed>().is_err());
    }
}
