use super::*;
use crate::constants::BULLET_SPEED;
use crate::entities::Alien;

const SEED: u32 = 0xDEAD_BEEF;

fn reference_game() -> Game {
    Game::new(SEED, Viewport::REFERENCE)
}

fn idle(game: &mut Game, frame: u32) -> TickReport {
    game.tick(FrameInput::default(), Viewport::REFERENCE, host_time_ms(frame))
}

/// Pointer position that puts a bullet fired now on the lowest alien,
/// assuming the formation keeps its heading for the whole flight.
fn lead_target(game: &Game) -> Option<f64> {
    let vp = game.viewport;
    let target = game
        .entities
        .aliens
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))?;
    let closing = vp.norm_y(BULLET_SPEED) + vp.norm_y(game.vertical_speed);
    let flight = (ship_y(&vp) - target.y) / closing;
    let drift = game.direction.sign() * vp.norm_x(ALIEN_HORIZONTAL_SPEED) * flight;
    Some((target.x + drift).clamp(0.0, 1.0))
}

#[test]
fn new_game_starts_on_wave_one() {
    let game = reference_game();
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.wave(), 1);
    assert_eq!(game.formation, Formation::Block);
    assert_eq!(game.direction, Direction::Right);
    assert_eq!(game.entities.aliens.len(), 10);
    assert!(game.entities.bullets.is_empty());
    assert!(!game.has_first_kill);
    assert!(!game.show_wave_counter);
    assert_eq!(game.pointer_x, 0.5);
    assert_eq!(game.last_shot_ms, None);
    assert_eq!(game.stars().len(), crate::constants::STAR_COUNT);
}

#[test]
fn fire_respects_cooldown() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;

    assert!(game.tick(FrameInput::fire(), vp, 1_000.0).fired);
    assert!(!game.tick(FrameInput::fire(), vp, 1_100.0).fired);
    assert!(!game.tick(FrameInput::fire(), vp, 1_149.9).fired);
    assert!(game.tick(FrameInput::fire(), vp, 1_150.0).fired);

    assert_eq!(game.entities.bullets.len(), 2);
    assert_eq!(game.last_shot_ms, Some(1_150.0));
}

#[test]
fn bullet_spawns_at_ship_and_moves_up() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;
    game.tick(FrameInput::aim_and_fire(0.25), vp, 0.0);

    let bullet = game.entities.bullets[0];
    assert!((bullet.x - 0.25).abs() < 1e-12);
    let expected_y = ship_y(&vp) - vp.norm_y(BULLET_SPEED);
    assert!((bullet.y - expected_y).abs() < 1e-12);
}

#[test]
fn pointer_clamps_ship_inside_edges() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;
    game.tick(FrameInput::aim(-3.0), vp, 0.0);
    assert_eq!(game.pointer_x, 0.0);
    let snap = game.world_snapshot();
    assert!((snap.ship.x - SPACESHIP_WIDTH / vp.width).abs() < 1e-12);

    game.tick(FrameInput::aim(f64::NAN), vp, 0.0);
    assert_eq!(game.pointer_x, 0.0);

    game.tick(FrameInput::aim(1.0), vp, 0.0);
    let snap = game.world_snapshot();
    assert!((snap.ship.x - (1.0 - SPACESHIP_WIDTH / vp.width)).abs() < 1e-12);
}

#[test]
fn fire_is_ignored_while_paused_or_over() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;

    let report = game.tick(
        FrameInput {
            pointer_x: None,
            fire: true,
            toggle_pause: true,
        },
        vp,
        0.0,
    );
    assert_eq!(game.status(), GameStatus::Paused);
    assert!(!report.fired);
    assert!(game.entities.bullets.is_empty());
    assert_eq!(game.last_shot_ms, None);

    game.status = GameStatus::GameOver;
    assert!(!game.tick(FrameInput::fire(), vp, 500.0).fired);
    assert!(game.entities.bullets.is_empty());
}

#[test]
fn bullets_past_the_top_are_culled() {
    let mut game = reference_game();
    game.entities.bullets.push(Bullet::new(0.01, -0.045));
    game.entities.bullets.push(Bullet::new(0.01, 0.4));

    idle(&mut game, 1);
    assert_eq!(game.entities.bullets.len(), 1);
    assert!(game.entities.bullets[0].y < 0.4);
}

#[test]
fn formation_flips_together_at_the_edge_it_heads_toward() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;
    game.entities.aliens = vec![Alien::new(0.98, 0.3), Alien::new(0.5, 0.3), Alien::new(0.2, 0.4)];
    game.direction = Direction::Right;

    idle(&mut game, 1);
    assert_eq!(game.direction, Direction::Left);

    let step = vp.norm_x(ALIEN_HORIZONTAL_SPEED);
    let xs: Vec<f64> = game.entities.aliens.iter().map(|a| a.x).collect();
    for (got, start) in xs.iter().zip([0.98, 0.5, 0.2]) {
        assert!((got - (start - step)).abs() < 1e-12);
    }
}

#[test]
fn formation_does_not_jitter_at_a_wall() {
    let mut game = reference_game();
    game.entities.aliens = vec![Alien::new(0.995, 0.3), Alien::new(0.6, 0.3)];
    game.direction = Direction::Left;

    let mut last_x = game.entities.aliens[0].x;
    for frame in 1..=20 {
        idle(&mut game, frame);
        assert_eq!(game.direction, Direction::Left, "frame {frame}");
        let x = game.entities.aliens[0].x;
        assert!(x < last_x);
        last_x = x;
    }
}

#[test]
fn breach_ends_the_game_for_good() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;
    let line = 1.0 - vp.norm_y(GAME_OVER_MARGIN);
    game.entities.aliens = vec![Alien::new(0.5, line - 1e-6), Alien::new(0.3, 0.2)];

    let report = idle(&mut game, 1);
    assert!(report.game_over);
    assert!(!report.wave_cleared);
    assert_eq!(game.status(), GameStatus::GameOver);

    let frames = game.frame_count;
    game.tick(FrameInput::pause(), vp, 100.0);
    assert_eq!(game.status(), GameStatus::GameOver);
    idle(&mut game, 2);
    assert_eq!(game.frame_count, frames);
    assert!(game.result().game_over);
}

#[test]
fn breach_does_not_advance_the_wave() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;
    let line = 1.0 - vp.norm_y(GAME_OVER_MARGIN);
    game.entities.aliens = vec![Alien::new(0.5, line - 1e-6)];
    // Sits on the alien after both move this tick.
    game.entities.bullets.push(Bullet::new(
        0.5 + vp.norm_x(ALIEN_HORIZONTAL_SPEED),
        line + vp.norm_y(BULLET_SPEED),
    ));

    let report = idle(&mut game, 1);
    assert_eq!(report.kills, 1);
    assert!(report.game_over);
    assert!(!report.wave_cleared);
    assert_eq!(game.wave(), 1);
    assert_eq!(game.score(), 1);
}

#[test]
fn hit_removes_both_and_scores_once() {
    let mut game = reference_game();
    game.entities.aliens = vec![Alien::new(0.5, 0.5), Alien::new(0.2, 0.2)];
    game.entities.bullets.push(Bullet::new(0.5, 0.505));

    let report = idle(&mut game, 1);
    assert_eq!(report.kills, 1);
    assert_eq!(game.score(), 1);
    assert!(game.has_first_kill);
    assert!(game.entities.bullets.is_empty());
    assert_eq!(game.entities.aliens.len(), 1);
    assert!((game.entities.aliens[0].x - 0.2).abs() < 0.01);
}

#[test]
fn one_bullet_takes_at_most_one_alien() {
    let mut game = reference_game();
    game.entities.aliens = vec![Alien::new(0.5, 0.5), Alien::new(0.5, 0.51)];
    game.entities.bullets.push(Bullet::new(0.5, 0.51));

    let report = idle(&mut game, 1);
    assert_eq!(report.kills, 1);
    assert_eq!(game.score(), 1);
    assert_eq!(game.entities.aliens.len(), 1);
}

#[test]
fn one_alien_absorbs_at_most_one_bullet() {
    let mut game = reference_game();
    game.entities.aliens = vec![Alien::new(0.5, 0.5), Alien::new(0.1, 0.1)];
    game.entities.bullets.push(Bullet::new(0.5, 0.505));
    game.entities.bullets.push(Bullet::new(0.501, 0.51));

    let report = idle(&mut game, 1);
    assert_eq!(report.kills, 1);
    assert_eq!(game.entities.bullets.len(), 1);
    assert_eq!(game.entities.aliens.len(), 1);
}

#[test]
fn clearing_a_wave_spawns_the_next() {
    let mut game = reference_game();
    game.entities.aliens = vec![Alien::new(0.5, 0.5)];
    game.entities.bullets.push(Bullet::new(0.5, 0.505));

    let report = idle(&mut game, 1);
    assert!(report.wave_cleared);
    assert_eq!(game.wave(), 2);
    assert_eq!(game.formation, Formation::Staggered);
    assert_eq!(game.direction, Direction::Left);
    assert_eq!(game.entities.aliens.len(), 17);
    assert!(game.show_wave_counter);
    assert!((game.vertical_speed - wave::vertical_speed_for_wave(2)).abs() < 1e-12);

    game.entities.aliens = vec![Alien::new(0.5, 0.5)];
    game.entities.bullets.push(Bullet::new(0.5, 0.505));
    idle(&mut game, 2);
    assert_eq!(game.wave(), 3);
    assert_eq!(game.entities.aliens.len(), 21);
    assert!(game.show_wave_counter);
}

#[test]
fn aimed_play_clears_the_first_wave() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;

    let mut cleared_at = None;
    for frame in 1..=2_500 {
        let aim = lead_target(&game).unwrap_or(0.5);
        let report = game.tick(FrameInput::aim_and_fire(aim), vp, host_time_ms(frame));
        assert!(!report.game_over, "breached on frame {frame}");
        if report.wave_cleared {
            cleared_at = Some(frame);
            break;
        }
    }

    assert!(cleared_at.is_some(), "first wave never cleared");
    assert_eq!(game.score(), 10);
    assert_eq!(game.wave(), 2);
    assert_eq!(game.entities.aliens.len(), 17);
    assert!(game.show_wave_counter);
}

#[test]
fn pause_freezes_everything() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;
    for frame in 1..=10 {
        game.tick(FrameInput::aim_and_fire(0.4), vp, host_time_ms(frame));
    }

    game.toggle_pause();
    let frozen = game.world_snapshot();
    let stars: Vec<(f64, f64)> = game.stars().iter().map(|s| (s.x, s.y)).collect();
    for frame in 11..=40 {
        game.tick(FrameInput::aim_and_fire(0.9), vp, host_time_ms(frame));
    }
    assert_eq!(game.status(), GameStatus::Paused);
    let after = game.world_snapshot();
    assert_eq!(after.frame_count, frozen.frame_count);
    assert_eq!(after.bullets, frozen.bullets);
    assert_eq!(after.aliens, frozen.aliens);
    let stars_after: Vec<(f64, f64)> = game.stars().iter().map(|s| (s.x, s.y)).collect();
    assert_eq!(stars_after, stars);

    game.set_paused(false);
    idle(&mut game, 41);
    assert_eq!(game.frame_count, frozen.frame_count + 1);
}

#[test]
fn reset_restores_a_fresh_session() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;
    game.entities.aliens = vec![Alien::new(0.5, 0.5), Alien::new(0.1, 0.1)];
    game.entities.bullets.push(Bullet::new(0.5, 0.505));
    game.tick(FrameInput::aim(0.8), vp, 0.0);
    game.status = GameStatus::GameOver;

    game.reset();
    assert_eq!(game.world_snapshot(), reference_game().world_snapshot());
    assert_eq!(game.last_shot_ms, None);
}

#[test]
fn identical_inputs_replay_identically() {
    let inputs: Vec<FrameInput> = (0..600)
        .map(|i| match i % 37 {
            0 => FrameInput::aim_and_fire(0.3 + (i % 5) as f64 * 0.1),
            1 => FrameInput::fire(),
            _ => FrameInput::default(),
        })
        .collect();

    let run = || {
        let mut game = Game::new(7, Viewport::new(1280.0, 720.0));
        for (frame, input) in inputs.iter().enumerate() {
            game.tick(*input, Viewport::new(1280.0, 720.0), host_time_ms(frame as u32 + 1));
        }
        game
    };

    let a = run();
    let b = run();
    assert_eq!(a.world_snapshot(), b.world_snapshot());
    let stars_a: Vec<(f64, f64)> = a.stars().iter().map(|s| (s.x, s.y)).collect();
    let stars_b: Vec<(f64, f64)> = b.stars().iter().map(|s| (s.x, s.y)).collect();
    assert_eq!(stars_a, stars_b);
}

#[test]
fn score_never_decreases() {
    let mut game = reference_game();
    let vp = Viewport::REFERENCE;
    let mut last = 0;
    for frame in 1..=3_000 {
        let aim = ((frame % 120) as f64) / 120.0;
        game.tick(FrameInput::aim_and_fire(aim), vp, host_time_ms(frame));
        assert!(game.score() >= last);
        last = game.score();
    }
}
