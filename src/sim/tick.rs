//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one step per
//! animation frame.

use super::collision::{boundary_breach, hero_hits_pair, within_reach};
use super::events::{AudioCue, CoinReason, EndCause, GameEvent};
use super::field::ObstacleField;
use super::hero::Hero;
use super::input::Command;
use super::state::{GamePhase, GameState, Session};
use crate::tuning::Tuning;

/// How far below the target line the hero's centre may sink before the
/// autopilot lifts
const AUTOPILOT_SLACK: f32 = 35.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Commands in arrival order
    pub commands: Vec<Command>,
    /// Idle/demo mode - autopilot flies the hero
    pub idle_mode: bool,
}

impl TickInput {
    pub fn command(command: Command) -> Self {
        Self {
            commands: vec![command],
            idle_mode: false,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    for command in &input.commands {
        match *command {
            Command::Start => state.start(),
            Command::Lift => state.lift(),
            Command::Pause => state.pause(),
            Command::Resume => state.resume(),
            Command::TogglePause => state.toggle_pause(),
            Command::Reset { seed } => state.reset(seed),
        }
    }

    // Don't tick unless running
    if state.phase != GamePhase::Running {
        return;
    }

    if input.idle_mode && autopilot_wants_lift(state) {
        state.lift();
    }

    state.frame += 1;
    let now = state.frame;

    // --- HERO ---
    state.hero.apply_gravity(state.tuning.gravity);

    // Boundaries first: a shield never saves a fall off-screen
    if let Some(boundary) = boundary_breach(&state.hero.rect(), state.tuning.screen_height) {
        state.hero.pin_inside(state.tuning.screen_height);
        state.end(EndCause::Boundary(boundary));
        return;
    }

    // --- FIELD ---
    if now % state.tuning.spawn_interval == 0 {
        state.field.spawn(&state.tuning);
    }

    let speed = state.scroll_speed();
    state.field.advance(speed);

    let outcome = resolve_pairs(
        &mut state.field,
        &mut state.session,
        &state.hero,
        &state.tuning,
        now,
        &mut state.events,
    );
    if let Some(cause) = outcome {
        state.end(cause);
        return;
    }

    state.field.prune(state.tuning.prune_margin);
}

/// Pickups, hits and passes for every pair, in field order.
/// Returns the end cause on an unshielded hit.
fn resolve_pairs(
    field: &mut ObstacleField,
    session: &mut Session,
    hero: &Hero,
    tuning: &Tuning,
    now: u64,
    events: &mut Vec<GameEvent>,
) -> Option<EndCause> {
    let hero_rect = hero.rect();
    let hero_center = hero.center();

    for pair in field.pairs_mut() {
        // Power-up pickup (write-once `taken` guards against re-entry)
        if let Some(power_up) = pair.power_up.as_mut() {
            if !power_up.is_taken()
                && within_reach(hero_center, power_up.pos, tuning.pickup_radius())
                && power_up.take()
            {
                let kind = power_up.kind;
                session.activate(kind, now, tuning);
                events.push(GameEvent::PowerUpCollected(kind));
                events.push(GameEvent::Cue(AudioCue::Power));
                events.push(GameEvent::Coins {
                    amount: tuning.pickup_coins,
                    reason: CoinReason::Pickup,
                });
                log::debug!("Collected {:?} at frame {}", kind, now);
            }
        }

        // Obstacle hit
        if hero_hits_pair(&hero_rect, pair.x, pair.right(), pair.top, pair.gap_bottom()) {
            if session.shield_active(now) {
                session.consume_shield();
                events.push(GameEvent::ShieldAbsorbedHit);
                events.push(GameEvent::Cue(AudioCue::Power));
                log::info!("Shield absorbed a hit on pair {}", pair.id);
            } else {
                return Some(EndCause::Obstacle);
            }
        }

        // Pass detection
        if pair.right() < hero_rect.left() && pair.mark_passed() {
            let speed_up = session.record_pass(tuning);
            events.push(GameEvent::Passed {
                score: session.score,
            });
            events.push(GameEvent::Cue(AudioCue::Score));
            events.push(GameEvent::Coins {
                amount: tuning.pass_coins,
                reason: CoinReason::Pass,
            });
            if let Some(multiplier) = speed_up {
                events.push(GameEvent::SpeedUp { multiplier });
                log::debug!("Speed multiplier now {:.2}", multiplier);
            }
        }
    }

    None
}

/// Demo steering: aim for the centre of the next gap still ahead of the
/// hero (or mid-screen when none), lifting once the hero sinks too far
/// below it while falling
fn autopilot_wants_lift(state: &GameState) -> bool {
    let hero_left = state.hero.pos.x;
    let target_y = state
        .field
        .pairs()
        .iter()
        .find(|pair| pair.right() >= hero_left)
        .map(|pair| pair.gap_center().y)
        .unwrap_or(state.tuning.screen_height * 0.5);

    state.hero.vel_y > 0.0 && state.hero.center().y > target_y + AUTOPILOT_SLACK
}
