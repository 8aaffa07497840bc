use crate::stroke::Stroke;

pub const DEFAULT_REPLAY_DELAY_MS: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayMode {
    Immediate,
    Animated,
}

/// Generation tag a scheduled draw was issued under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken(u64);

/// Hands out replay generations. Advancing invalidates every token issued
/// before.
#[derive(Debug, Default)]
pub struct ReplayClock {
    generation: u64,
    pending: usize,
}

impl ReplayClock {
    pub fn advance(&mut self) -> ReplayToken {
        self.generation = self.generation.wrapping_add(1);
        self.pending = 0;
        ReplayToken(self.generation)
    }

    pub fn is_current(&self, token: ReplayToken) -> bool {
        token.0 == self.generation
    }

    /// Records how many tickets of the current generation are outstanding.
    pub fn track(&mut self, tickets: usize) {
        self.pending = tickets;
    }

    /// Marks one current ticket as drawn.
    pub fn complete(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    /// True while an animated replay still has strokes to draw.
    pub fn in_flight(&self) -> bool {
        self.pending > 0
    }
}

/// One deferred stroke draw. The host runs it after `delay_ms` through
/// `Painter::run_ticket`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayTicket {
    pub token: ReplayToken,
    pub delay_ms: u32,
    pub stroke: Stroke,
}

pub fn schedule(token: ReplayToken, strokes: &[Stroke], delay_ms: u32) -> Vec<ReplayTicket> {
    strokes
        .iter()
        .enumerate()
        .map(|(index, stroke)| ReplayTicket {
            token,
            delay_ms: delay_ms.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX)),
            stroke: stroke.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Point, StrokeStyle};

    #[test]
    fn advancing_invalidates_older_tokens() {
        let mut clock = ReplayClock::default();
        let first = clock.advance();
        assert!(clock.is_current(first));
        let second = clock.advance();
        assert!(!clock.is_current(first));
        assert!(clock.is_current(second));
    }

    #[test]
    fn pending_tickets_drain_or_reset_on_advance() {
        let mut clock = ReplayClock::default();
        clock.advance();
        clock.track(2);
        clock.complete();
        assert!(clock.in_flight());
        clock.complete();
        assert!(!clock.in_flight());

        clock.track(3);
        clock.advance();
        assert!(!clock.in_flight());
    }

    #[test]
    fn delays_grow_with_stroke_index() {
        let mut clock = ReplayClock::default();
        let token = clock.advance();
        let strokes = vec![
            Stroke::segment(
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                StrokeStyle::default(),
                0.0
            );
            3
        ];
        let tickets = schedule(token, &strokes, 20);
        let delays: Vec<u32> = tickets.iter().map(|ticket| ticket.delay_ms).collect();
        assert_eq!(delays, vec![0, 20, 40]);
        assert!(tickets.iter().all(|ticket| ticket.token == token));
    }
}
