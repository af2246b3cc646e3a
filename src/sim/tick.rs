//! Per-frame simulation tick
//!
//! Advances a session by one frame of real time.

use super::player::PlayerInput;
use super::session::{GamePhase, Session};
use crate::error::SimError;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub player: PlayerInput,
    /// Start a new level once the game is over
    pub restart: bool,
}

/// Advance the session by `dt` ms of frame time
///
/// Generation exhaustion and host failures end the run; they are returned
/// untouched for the caller to report.
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> Result<(), SimError> {
    match session.phase {
        GamePhase::GameOver => {
            if input.restart {
                session.restart()?;
            }
            return Ok(());
        }
        GamePhase::Dying { mut timer } => {
            timer.update(dt);
            session.phase = GamePhase::Dying { timer };
            if timer.expired() {
                session.phase = GamePhase::GameOver;
                log::info!(
                    "Game over: {} points, {} rows, scrolled {:.0}px",
                    session.points,
                    session.world.rows_spawned(),
                    session.world.scroll().scroll_y
                );
                return Ok(());
            }
        }
        GamePhase::Playing => {}
    }

    session.time_ms += dt as f64;

    let report = session
        .world
        .advance(dt, &mut session.entities, &mut session.rng)?;

    let mut player_died = report.player_fell;
    if session.phase == GamePhase::Playing {
        let height = session.world.height();
        let events = session
            .world
            .player_mut()
            .update(&input.player, &session.config, height, dt);
        if let Some(shot) = events.shot {
            session.entities.create_bullet(shot.pos, shot.vel)?;
        }
        player_died |= events.died;
    }
    if player_died {
        session.died();
    }

    let width = session.world.width();
    let height = session.world.height();
    session.entities.update_bullets(dt, width, height);

    if session.spawner.update(dt, &session.config) {
        session.enemy_spawns += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::FRAME_MS;
    use crate::sim::reach::is_reachable;

    /// Stand the player on an imaginary ledge at its spawn height
    fn hold_player(session: &mut Session) {
        session.world.player_mut().land(230.0);
    }

    #[test]
    fn test_rows_keep_coming() {
        let mut session = Session::new(Config::default(), 777).unwrap();
        let input = TickInput::default();
        let width = session.config.width_in_tiles();

        let mut previous = session.world.generator().last_sections().to_vec();
        let mut rows = 0;
        for _ in 0..1200 {
            hold_player(&mut session);
            tick(&mut session, &input, FRAME_MS).unwrap();
            if session.world.rows_spawned() > rows {
                let last = session.world.generator().last_sections();
                assert!(is_reachable(last, &previous, width));
                previous = last.to_vec();
                rows = session.world.rows_spawned();
            }
        }
        // 20 seconds at 0.5px per frame: 600px of scroll, one row per ~60px
        assert!(rows >= 9, "only {rows} rows spawned");
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fall_leads_to_game_over() {
        let mut session = Session::new(Config::default(), 3).unwrap();
        let input = TickInput::default();

        // Nothing catches the player, so gravity drops it out of the world
        let mut frames = 0;
        while session.phase == GamePhase::Playing {
            tick(&mut session, &input, FRAME_MS).unwrap();
            frames += 1;
            assert!(frames < 1000, "player never fell");
        }
        assert!(session.world.player().is_dead());

        // Game over follows after the configured delay
        let delay_frames = (session.config.game_over_delay_ms / FRAME_MS).ceil() as usize;
        for _ in 0..delay_frames + 1 {
            tick(&mut session, &input, FRAME_MS).unwrap();
        }
        assert!(session.is_game_over());

        // The world freezes once the game is over
        let scroll = session.world.scroll().scroll_y;
        tick(&mut session, &input, FRAME_MS).unwrap();
        assert_eq!(session.world.scroll().scroll_y, scroll);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &restart, FRAME_MS).unwrap();
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(!session.world.player().is_dead());
    }

    #[test]
    fn test_enemy_spawns_are_paced() {
        let mut session = Session::new(Config::default(), 9).unwrap();
        let input = TickInput::default();
        for _ in 0..60 * 10 {
            hold_player(&mut session);
            tick(&mut session, &input, FRAME_MS).unwrap();
        }
        // 10 seconds with the delay falling from 2000ms towards 1750ms
        assert!((5..=6).contains(&session.enemy_spawns), "{}", session.enemy_spawns);
    }

    #[test]
    fn test_shooting_creates_bullets() {
        let mut config = Config::default();
        config.fire_throttle_ms = 0.0;
        let mut session = Session::new(config, 4).unwrap();
        let fire = TickInput {
            player: PlayerInput {
                shoot: true,
                ..Default::default()
            },
            ..Default::default()
        };

        hold_player(&mut session);
        tick(&mut session, &fire, FRAME_MS).unwrap();
        assert_eq!(session.entities.bullets().len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(Config::default(), 99999).unwrap();
        let mut b = Session::new(Config::default(), 99999).unwrap();
        let input = TickInput::default();

        for _ in 0..600 {
            hold_player(&mut a);
            hold_player(&mut b);
            let ra = tick(&mut a, &input, FRAME_MS);
            let rb = tick(&mut b, &input, FRAME_MS);
            assert_eq!(ra, rb);
            if ra.is_err() {
                break;
            }
        }

        assert_eq!(a.world.rows_spawned(), b.world.rows_spawned());
        assert_eq!(
            a.world.generator().last_sections(),
            b.world.generator().last_sections()
        );
        assert_eq!(a.entities.len(), b.entities.len());
    }
}
