//! Match engine: the core of the game.
//!
//! `MatchEngine` owns the hecs ECS world, the scheduler, the player and the
//! castle. It processes lifecycle commands, fires timers, runs the systems
//! and produces `MatchSnapshot`s. Completely headless, enabling
//! deterministic testing.
//!
//! Hosts with their own physics and timers call the `on_*` entry points
//! directly; hosts without them call `tick()` at 60 Hz.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use rampart_core::commands::MatchCommand;
use rampart_core::components::Enemy;
use rampart_core::config::MatchConfig;
use rampart_core::constants::DT_MS;
use rampart_core::enums::*;
use rampart_core::events::MatchEvent;
use rampart_core::state::{CastleView, MatchSnapshot, PlayerView};
use rampart_core::types::{Position, SimTime, Velocity};

use crate::guidance;
use crate::persistence::{self, MemoryStore, ProgressStore};
use crate::player::PlayerState;
use crate::progression::XpCurve;
use crate::scheduler::{Scheduler, TimerKind};
use crate::systems;
use crate::systems::castle::CastleState;
use crate::systems::combat::ContactOutcome;
use crate::systems::crowd::CrowdAction;
use crate::systems::snapshot::MatchStatus;

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    pub match_config: MatchConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            match_config: MatchConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.match_config.validate()
    }
}

/// The match engine. Owns the ECS world and all match state.
pub struct MatchEngine {
    config: MatchConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    mode: MatchMode,
    difficulty: Difficulty,
    castle: CastleState,
    difficulty_step: u32,
    xp_multiplier: f64,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    curve: XpCurve,
    player: PlayerState,
    store: Box<dyn ProgressStore>,
    command_queue: VecDeque<MatchCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<MatchEvent>,
}

impl MatchEngine {
    /// Create an engine backed by an in-memory progress store.
    pub fn new(config: SimConfig) -> Self {
        Self::with_store(config, Box::new(MemoryStore::new()))
    }

    /// Create an engine backed by `store`. The default character's
    /// progress is loaded immediately.
    pub fn with_store(config: SimConfig, store: Box<dyn ProgressStore>) -> Self {
        let SimConfig { seed, match_config } = config;
        let curve = XpCurve::new(&match_config.xp_curve);
        let character = CharacterId::default();
        let total_xp = persistence::load_total_xp(&*store, character);
        let player = PlayerState::new(
            character,
            total_xp,
            player_position(&match_config),
            &curve,
            &match_config.progression,
        );

        Self {
            castle: CastleState::new(&match_config.castle),
            config: match_config,
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            mode: MatchMode::default(),
            difficulty: Difficulty::default(),
            difficulty_step: 0,
            xp_multiplier: 1.0,
            scheduler: Scheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            curve,
            player,
            store,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: MatchCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = MatchCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the match by one fixed step and return the resulting snapshot.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_timers();
            if self.phase == GamePhase::Active {
                self.run_systems();
            }
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current state without advancing. Pending events are included but
    /// not consumed.
    pub fn snapshot(&self) -> MatchSnapshot {
        self.build_snapshot(self.events.clone())
    }

    // --- Read-only accessors ---

    pub fn player(&self) -> PlayerView {
        self.player.view(&self.curve)
    }

    pub fn castle(&self) -> CastleView {
        self.castle.view()
    }

    pub fn countdown_secs(&self) -> u32 {
        self.castle.countdown_secs()
    }

    pub fn match_state(&self) -> MatchState {
        self.castle.match_state()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn difficulty_step(&self) -> u32 {
        self.difficulty_step
    }

    pub fn xp_multiplier(&self) -> f64 {
        self.xp_multiplier
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Hand the progress store back, e.g. to build the next engine from it.
    pub fn into_store(self) -> Box<dyn ProgressStore> {
        self.store
    }

    // --- Lifecycle ---

    /// Pick the hero and load its persisted XP. Only allowed between
    /// matches.
    pub fn select_character(&mut self, character: CharacterId) {
        if !matches!(self.phase, GamePhase::CharacterSelect | GamePhase::Finished) {
            debug!(?character, phase = ?self.phase, "Character change ignored mid-match");
            return;
        }
        let total_xp = persistence::load_total_xp(&*self.store, character);
        self.player = PlayerState::new(
            character,
            total_xp,
            player_position(&self.config),
            &self.curve,
            &self.config.progression,
        );
        info!(
            %character,
            level = self.player.level(),
            total_xp,
            "Character selected"
        );
    }

    /// Start a castle-defense match. Index 0 = Easy, 1 = Normal, 2+ = Hard.
    pub fn start_match(&mut self, difficulty_index: usize) {
        if !matches!(self.phase, GamePhase::CharacterSelect | GamePhase::Finished) {
            return;
        }
        self.begin(MatchMode::Defense, Difficulty::from_index(difficulty_index));
    }

    /// Start the single-target practice mode.
    pub fn start_training(&mut self) {
        if !matches!(self.phase, GamePhase::CharacterSelect | GamePhase::Finished) {
            return;
        }
        self.begin(MatchMode::Training, self.difficulty);
    }

    /// Start over with the same character, mode and difficulty.
    pub fn restart_match(&mut self) {
        if self.phase == GamePhase::CharacterSelect {
            return;
        }
        self.begin(self.mode, self.difficulty);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Active {
            self.phase = GamePhase::Paused;
            self.scheduler.pause();
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Active;
            self.scheduler.resume();
        }
    }

    // --- Timer callbacks ---

    /// Spawn tick: one enemy (defense) or the practice dummy (training).
    pub fn on_spawn_tick(&mut self) -> Option<Entity> {
        if !self.is_live() {
            return None;
        }
        let entity = match self.mode {
            MatchMode::Defense => systems::spawner::run(
                &mut self.world,
                &mut self.rng,
                &self.config.spawn,
                &self.config.arena,
                self.difficulty_step,
            ),
            MatchMode::Training => systems::spawner::run_training(
                &mut self.world,
                &self.config.spawn,
                &self.config.training,
            ),
        }?;

        if let Ok(enemy) = self.world.get::<&Enemy>(entity) {
            self.events.push(MatchEvent::EnemySpawned {
                enemy_id: entity.to_bits().get(),
                health: enemy.health,
                speed: enemy.assigned_speed,
            });
        }
        Some(entity)
    }

    /// Shoot tick: pick targets and fire one led projectile at each.
    /// Returns the number of projectiles fired.
    pub fn on_shoot_tick(&mut self) -> usize {
        if !self.is_live() {
            return 0;
        }
        let stats = *self.player.stats();
        let ordering = if self.config.crowd.enabled {
            TargetOrdering::NearestToBarrier
        } else {
            TargetOrdering::NearestToPlayer
        };

        let candidates = systems::targeting::gather_candidates(&self.world);
        let targets = systems::targeting::select_targets(
            &candidates,
            &self.player.position(),
            stats.projectile_count as usize,
            ordering,
            &self.config.arena,
        );

        let muzzle = self.muzzle();
        for target in &targets {
            let solution = guidance::solve_intercept(
                &muzzle,
                &target.position,
                &target.velocity,
                stats.projectile_speed,
                Some(target.stop_x),
            );
            crate::world_setup::spawn_projectile(
                &mut self.world,
                muzzle,
                solution.velocity(stats.projectile_speed),
                stats.attack,
                stats.pierce,
            );
            self.events.push(MatchEvent::ProjectileFired {
                target_id: target.entity.to_bits().get(),
                angle: solution.angle,
                intercept_secs: solution.time_secs,
            });
        }
        targets.len()
    }

    /// Countdown tick: one second off the match clock.
    pub fn on_countdown_tick(&mut self) {
        if !self.is_live() || self.mode != MatchMode::Defense {
            return;
        }
        if let Some(outcome) = self.castle.tick_countdown() {
            self.end_match(outcome);
        }
    }

    /// Escalation tick: later enemies spawn tougher and faster.
    pub fn on_difficulty_tick(&mut self) {
        if !self.is_live() || self.mode != MatchMode::Defense {
            return;
        }
        self.difficulty_step += 1;
        let multiplier = self.enemy_multiplier();
        debug!(step = self.difficulty_step, multiplier, "Enemy escalation");
        self.events.push(MatchEvent::DifficultyRaised {
            step: self.difficulty_step,
            multiplier,
        });
    }

    /// XP escalation tick: later kills are worth more.
    pub fn on_xp_multiplier_tick(&mut self) {
        if !self.is_live() || self.mode != MatchMode::Defense {
            return;
        }
        self.xp_multiplier += self.config.progression.xp_multiplier_step;
        self.events.push(MatchEvent::XpMultiplierRaised {
            multiplier: self.xp_multiplier,
        });
    }

    /// Crowd check: halt or release enemies around the barrier.
    pub fn on_crowd_check_tick(&mut self) {
        if !self.is_live() || !self.config.crowd.enabled {
            return;
        }
        match systems::crowd::run(&mut self.world, &self.config.arena, &self.config.crowd) {
            CrowdAction::Halted { in_zone, halted } => {
                debug!(in_zone, halted, "Crowd at barrier, halting");
                self.events.push(MatchEvent::CrowdHalted { count: in_zone });
            }
            CrowdAction::Resumed { in_zone, resumed } => {
                debug!(in_zone, resumed, "Crowd cleared, resuming");
                self.events.push(MatchEvent::CrowdResumed { count: resumed });
            }
            CrowdAction::Unchanged { .. } => {}
        }
    }

    /// One engaged enemy's periodic damage against the castle. Cancels its
    /// own timer when the enemy is gone.
    pub fn on_castle_damage_tick(&mut self, enemy: Entity) {
        if self.world.get::<&Enemy>(enemy).is_err() {
            self.scheduler.cancel(TimerKind::CastleDamage(enemy));
            return;
        }
        if !self.is_live() || self.mode != MatchMode::Defense {
            return;
        }
        let outcome = self.castle.apply_damage(self.config.castle.damage_per_tick);
        self.events.push(MatchEvent::CastleDamaged {
            health: self.castle.health(),
        });
        if let Some(outcome) = outcome {
            self.end_match(outcome);
        }
    }

    // --- Collision entry points ---

    /// Resolve a projectile touching an enemy.
    pub fn on_projectile_enemy_contact(
        &mut self,
        projectile: Entity,
        enemy: Entity,
    ) -> ContactOutcome {
        if !self.is_live() {
            return ContactOutcome::Ignored;
        }
        let outcome = systems::combat::resolve_contact(&mut self.world, projectile, enemy);
        let enemy_id = enemy.to_bits().get();
        match outcome {
            ContactOutcome::Ignored => {}
            ContactOutcome::Hit {
                enemy_health,
                killed: false,
                ..
            } => {
                self.events.push(MatchEvent::EnemyDamaged {
                    enemy_id,
                    health: enemy_health,
                });
            }
            ContactOutcome::Hit { killed: true, .. } => {
                self.scheduler.cancel(TimerKind::CastleDamage(enemy));
                let xp_awarded = self.award_kill_xp();
                self.events.push(MatchEvent::EnemyKilled {
                    enemy_id,
                    xp_awarded,
                });
            }
        }
        outcome
    }

    /// An enemy touched the stop line: stop it and, in defense, start its
    /// castle damage timer.
    pub fn on_enemy_reaches_barrier(&mut self, enemy: Entity) {
        if !self.is_live() {
            return;
        }
        {
            let Ok(mut state) = self.world.get::<&mut Enemy>(enemy) else {
                return;
            };
            if state.engaged {
                return;
            }
            state.engaged = true;
        }
        if let Ok(mut vel) = self.world.get::<&mut Velocity>(enemy) {
            *vel = Velocity::default();
        }
        self.events.push(MatchEvent::EnemyEngaged {
            enemy_id: enemy.to_bits().get(),
        });
        if self.mode == MatchMode::Defense {
            self.scheduler.add(
                TimerKind::CastleDamage(enemy),
                self.config.castle.damage_interval_ms,
            );
        }
    }

    /// Spawn an enemy at an exact position (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, position: Position, velocity: Velocity, health: f64) -> Entity {
        let stop_x = match self.mode {
            MatchMode::Defense => crate::world_setup::engage_x(self.config.arena.stop_line_right()),
            MatchMode::Training => self.config.training.stop_x,
        };
        crate::world_setup::spawn_test_enemy(&mut self.world, position, velocity, health, stop_x)
    }

    /// Spawn a projectile carrying the player's current damage (for tests).
    #[cfg(test)]
    pub fn spawn_test_projectile(&mut self, position: Position) -> Entity {
        let stats = *self.player.stats();
        crate::world_setup::spawn_projectile(
            &mut self.world,
            position,
            Velocity::new(stats.projectile_speed, 0.0),
            stats.attack,
            stats.pierce,
        )
    }

    // --- Internals ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: MatchCommand) {
        match command {
            MatchCommand::SelectCharacter { character } => self.select_character(character),
            MatchCommand::StartMatch { difficulty_index } => self.start_match(difficulty_index),
            MatchCommand::StartTraining => self.start_training(),
            MatchCommand::RestartMatch => self.restart_match(),
            MatchCommand::Pause => self.pause(),
            MatchCommand::Resume => self.resume(),
        }
    }

    /// Reset the world and arm the timers for a fresh match.
    fn begin(&mut self, mode: MatchMode, difficulty: Difficulty) {
        self.world.clear();
        self.scheduler.reset();
        self.events.clear();
        self.time = SimTime::default();
        self.castle = CastleState::new(&self.config.castle);
        self.difficulty_step = 0;
        self.xp_multiplier = 1.0;
        self.mode = mode;
        self.difficulty = difficulty;
        self.phase = GamePhase::Active;

        let fire_interval = self.player.stats().fire_interval_ms();
        match mode {
            MatchMode::Defense => {
                let spawn_interval = self.config.spawn.interval_ms / difficulty.spawn_multiplier();
                self.scheduler.add(TimerKind::Spawn, spawn_interval);
                self.scheduler.add(TimerKind::Shoot, fire_interval);
                self.scheduler
                    .add(TimerKind::Countdown, self.config.castle.countdown_interval_ms);
                self.scheduler
                    .add(TimerKind::Difficulty, self.config.spawn.difficulty_interval_ms);
                self.scheduler.add(
                    TimerKind::XpMultiplier,
                    self.config.progression.xp_multiplier_interval_ms,
                );
                if self.config.crowd.enabled {
                    self.scheduler
                        .add(TimerKind::CrowdCheck, self.config.crowd.check_interval_ms);
                }
            }
            MatchMode::Training => {
                self.scheduler
                    .add(TimerKind::Spawn, self.config.training.spawn_interval_ms);
                self.scheduler.add(TimerKind::Shoot, fire_interval);
            }
        }

        info!(
            ?mode,
            ?difficulty,
            character = %self.player.character(),
            level = self.player.level(),
            "Match started"
        );
    }

    /// Terminal transition: stop every timer and freeze the match.
    fn end_match(&mut self, outcome: MatchState) {
        self.scheduler.clear();
        self.phase = GamePhase::Finished;
        self.events.push(MatchEvent::MatchEnded { outcome });
        info!(
            ?outcome,
            castle_health = self.castle.health(),
            elapsed_secs = self.time.elapsed_secs(),
            "Match ended"
        );
    }

    /// Award XP for one kill, persist it and apply any level-up. Returns
    /// the XP actually granted.
    fn award_kill_xp(&mut self) -> u64 {
        if self.player.at_max_level(&self.curve) {
            return 0;
        }
        let amount = systems::combat::xp_for_kill(
            self.config.progression.xp_per_kill,
            self.xp_multiplier,
        );
        let level_up = self
            .player
            .award_xp(amount, &self.curve, &self.config.progression);

        if let Err(e) = persistence::save_total_xp(
            &mut *self.store,
            self.player.character(),
            self.player.total_xp(),
        ) {
            warn!(error = %e, "Failed to persist XP");
        }

        if let Some(level) = level_up {
            let interval = self.player.stats().fire_interval_ms();
            self.scheduler.set_delay(TimerKind::Shoot, interval);
            debug!(level, fire_interval_ms = interval, "Level up");
            self.events.push(MatchEvent::LevelUp {
                character: self.player.character(),
                level,
            });
        }
        amount
    }

    /// Fire every timer due within this step, one at a time.
    fn run_timers(&mut self) {
        let until = self.scheduler.now_ms() + DT_MS;
        while let Some(kind) = self.scheduler.pop_due(until) {
            self.dispatch(kind);
        }
        self.scheduler.settle(until);
    }

    fn dispatch(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Spawn => {
                self.on_spawn_tick();
            }
            TimerKind::Shoot => {
                self.on_shoot_tick();
            }
            TimerKind::Countdown => self.on_countdown_tick(),
            TimerKind::Difficulty => self.on_difficulty_tick(),
            TimerKind::XpMultiplier => self.on_xp_multiplier_tick(),
            TimerKind::CrowdCheck => self.on_crowd_check_tick(),
            TimerKind::CastleDamage(enemy) => self.on_castle_damage_tick(enemy),
        }
    }

    /// Headless kinematics: integrate, resolve overlaps, cull.
    fn run_systems(&mut self) {
        systems::movement::run(&mut self.world);

        for (projectile, enemy) in systems::collision::projectile_enemy_contacts(&self.world) {
            self.on_projectile_enemy_contact(projectile, enemy);
        }
        for enemy in systems::collision::enemies_at_barrier(&self.world) {
            self.on_enemy_reaches_barrier(enemy);
        }

        systems::cleanup::run(&mut self.world, &self.config.arena, &mut self.despawn_buffer);
    }

    /// Active and not yet won or lost.
    fn is_live(&self) -> bool {
        self.phase == GamePhase::Active && self.castle.is_playing()
    }

    fn muzzle(&self) -> Position {
        let pos = self.player.position();
        Position::new(pos.x + self.config.arena.muzzle_offset_x, pos.y)
    }

    fn enemy_multiplier(&self) -> f64 {
        crate::world_setup::escalation_multiplier(self.config.spawn.health_scale, self.difficulty_step)
    }

    fn build_snapshot(&self, events: Vec<MatchEvent>) -> MatchSnapshot {
        let status = MatchStatus {
            phase: self.phase,
            mode: self.mode,
            difficulty: self.difficulty,
            match_state: self.castle.match_state(),
            countdown_secs: self.castle.countdown_secs(),
            difficulty_step: self.difficulty_step,
            enemy_multiplier: self.enemy_multiplier(),
            xp_multiplier: self.xp_multiplier,
        };
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &status,
            self.player(),
            self.castle(),
            events,
        )
    }
}

fn player_position(config: &MatchConfig) -> Position {
    Position::new(config.arena.player_x, config.arena.player_y)
}
