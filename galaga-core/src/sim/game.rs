use super::*;

#[derive(Clone)]
pub(super) struct Game {
    seed: u32,
    status: GameStatus,
    score: u32,
    wave: u32,
    formation: Formation,
    vertical_speed: f64,
    direction: Direction,
    has_first_kill: bool,
    show_wave_counter: bool,
    entities: EntityStore,
    starfield: Starfield,
    pointer_x: f64,
    last_shot_ms: Option<f64>,
    frame_count: u32,
    viewport: Viewport,
}

impl Game {
    pub(super) fn new(seed: u32, viewport: Viewport) -> Self {
        let first = wave::generate(1, &viewport);
        let mut entities = EntityStore::default();
        entities.aliens = first.aliens;

        Self {
            seed,
            status: GameStatus::Running,
            score: 0,
            wave: first.wave,
            formation: first.formation,
            vertical_speed: first.vertical_speed,
            direction: first.direction,
            has_first_kill: false,
            show_wave_counter: false,
            entities,
            starfield: Starfield::new(seed),
            pointer_x: 0.5,
            last_shot_ms: None,
            frame_count: 0,
            viewport,
        }
    }

    pub(super) fn reset(&mut self) {
        *self = Self::new(self.seed, self.viewport);
    }

    pub(super) fn tick(&mut self, input: FrameInput, viewport: Viewport, now_ms: f64) -> TickReport {
        self.viewport = viewport;
        if let Some(x) = input.pointer_x.filter(|x| x.is_finite()) {
            self.pointer_x = x.clamp(0.0, 1.0);
        }
        if input.toggle_pause {
            self.toggle_pause();
        }

        let mut report = TickReport::default();
        if self.status != GameStatus::Running {
            return report;
        }

        self.frame_count += 1;
        if input.fire {
            report.fired = self.try_fire(now_ms);
        }

        self.starfield.update(&self.viewport);
        self.update_bullets();
        report.game_over = self.update_aliens();

        report.kills = self.resolve_collisions();
        self.entities.prune();
        if report.kills > 0 {
            self.score += report.kills;
            self.has_first_kill = true;
        }

        if self.status == GameStatus::Running && self.entities.aliens.is_empty() {
            self.advance_wave();
            report.wave_cleared = true;
        }

        report
    }

    pub(super) fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::GameOver => GameStatus::GameOver,
        };
    }

    pub(super) fn set_paused(&mut self, paused: bool) {
        let is_paused = self.status == GameStatus::Paused;
        if paused != is_paused {
            self.toggle_pause();
        }
    }

    #[inline]
    pub(super) fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub(super) fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub(super) fn wave(&self) -> u32 {
        self.wave
    }

    #[inline]
    pub(super) fn entities(&self) -> &EntityStore {
        &self.entities
    }

    #[inline]
    pub(super) fn stars(&self) -> &[Star] {
        self.starfield.stars()
    }

    pub(super) fn result(&self) -> ReplayResult {
        ReplayResult {
            final_score: self.score,
            final_wave: self.wave,
            frame_count: self.frame_count,
            game_over: self.status == GameStatus::GameOver,
        }
    }

    pub(super) fn world_snapshot(&self) -> WorldSnapshot {
        let viewport = self.viewport;
        WorldSnapshot {
            frame_count: self.frame_count,
            status: self.status,
            score: self.score,
            wave: self.wave,
            formation: self.formation,
            direction: self.direction,
            vertical_speed: self.vertical_speed,
            has_first_kill: self.has_first_kill,
            show_wave_counter: self.show_wave_counter,
            ship: ShipSnapshot {
                x: ship_x(self.pointer_x, &viewport),
                y: ship_y(&viewport),
            },
            bullets: self
                .entities
                .bullets
                .iter()
                .map(|bullet| BulletSnapshot {
                    x: bullet.x,
                    y: bullet.y,
                })
                .collect(),
            aliens: self
                .entities
                .aliens
                .iter()
                .map(|alien| {
                    let (half_width, half_height) = alien.half_extents(&viewport);
                    AlienSnapshot {
                        x: alien.x,
                        y: alien.y,
                        half_width,
                        half_height,
                    }
                })
                .collect(),
        }
    }

    fn try_fire(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_shot_ms {
            if now_ms - last < FIRE_COOLDOWN_MS {
                return false;
            }
        }
        self.last_shot_ms = Some(now_ms);

        let x = ship_x(self.pointer_x, &self.viewport);
        let y = ship_y(&self.viewport);
        self.entities.bullets.push(Bullet::new(x, y));
        true
    }

    fn update_bullets(&mut self) {
        let viewport = self.viewport;
        for bullet in &mut self.entities.bullets {
            bullet.advance(&viewport);
        }
        self.entities.bullets.retain(|bullet| !bullet.is_off_screen());
    }

    /// Moves the whole formation; returns true if this tick ended the game.
    ///
    /// Only the edge the formation is heading toward is checked. A unit left
    /// inside the trailing margin (possible after a resize) would otherwise
    /// flip the formation every tick and pin it against that wall.
    fn update_aliens(&mut self) -> bool {
        let viewport = self.viewport;
        let margin = viewport.norm_x(EDGE_MARGIN);
        let speed_x = viewport.norm_x(ALIEN_HORIZONTAL_SPEED);
        let speed_y = viewport.norm_y(self.vertical_speed);
        let game_over_y = 1.0 - viewport.norm_y(GAME_OVER_MARGIN);

        // One scan, one shared heading. Only a unit pressing into the edge it
        // is heading toward turns the formation, so it cannot stall at a wall.
        let direction = self.direction;
        let hit_edge = self.entities.aliens.iter().any(|alien| match direction {
            Direction::Left => alien.x <= margin,
            Direction::Right => alien.x >= 1.0 - margin,
        });
        if hit_edge {
            self.direction = direction.flipped();
        }

        let dx = self.direction.sign() * speed_x;
        let mut breached = false;
        for alien in &mut self.entities.aliens {
            alien.x += dx;
            alien.y += speed_y;
            breached |= alien.y >= game_over_y;
        }

        if breached {
            self.status = GameStatus::GameOver;
        }
        breached
    }

    /// Bullets are resolved in firing order against aliens in formation
    /// order. A match retires both at once, so every alien falls to at most
    /// one bullet and every bullet scores at most once per tick.
    fn resolve_collisions(&mut self) -> u32 {
        let viewport = self.viewport;
        let EntityStore { bullets, aliens } = &mut self.entities;

        let mut kills = 0;
        for bullet in bullets.iter_mut() {
            let target = aliens.iter_mut().find(|alien| {
                let (hw, hh) = alien.half_extents(&viewport);
                alien.alive && aabb_contains(bullet.x, bullet.y, alien.x, alien.y, hw, hh)
            });
            if let Some(alien) = target {
                alien.alive = false;
                bullet.alive = false;
                kills += 1;
            }
        }
        kills
    }

    fn advance_wave(&mut self) {
        if self.wave == 1 {
            self.show_wave_counter = true;
        }
        self.wave += 1;

        let next = wave::generate(self.wave, &self.viewport);
        self.formation = next.formation;
        self.vertical_speed = next.vertical_speed;
        self.direction = next.direction;
        self.entities.aliens = next.aliens;
    }
}

#[cfg(test)]
mod tests;
