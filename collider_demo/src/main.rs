//! Tag arena demo application
//!
//! A capsule-shaped runner sweeps back and forth through a small arena.
//! Walls are tagged `W`, drones `E` and coins `C`. The runner only knows
//! about the entities it registered as peers and reacts to tag queries:
//! walls turn it around, drones hurt it, coins get collected.
//!
//! Usage: `tag_arena [config.toml|config.ron] [frames]`

use collider_engine::foundation::logging;
use collider_engine::prelude::*;

const RUNNER_SPEED: f32 = 6.0;
const DRONE_SPEED: f32 = 2.5;

struct Drone {
    entity: Entity,
    phase: f32,
    base_y: f32,
}

#[derive(Default)]
struct TagArena {
    runner: Option<Entity>,
    direction: f32,
    drones: Vec<Drone>,
    coins: Vec<Entity>,
    collected: u32,
    hurt_frames: u32,
    bounces: u32,
    elapsed: f32,
}

impl TagArena {
    fn runner(&self) -> Result<Entity, AppError> {
        self.runner
            .ok_or_else(|| AppError::GameLogic("runner was not spawned".to_string()))
    }

    fn spawn_wall(engine: &mut Engine, x: f32, style: &CollisionDebugStyle) -> Result<Entity, AppError> {
        let mut wall = ColliderComponent::new(Vec3::new(x, 0.0, 0.0))
            .with_tag('W')
            .with_debug_style(style.clone());
        wall.add_aabb(Vec3::new(x - 0.5, -6.0, 0.0), 1.0, 12.0);
        Ok(engine.spawn(wall)?)
    }

    fn spawn_drone(engine: &mut Engine, x: f32, y: f32, style: &CollisionDebugStyle) -> Result<Entity, AppError> {
        let mut drone = ColliderComponent::new(Vec3::new(x, y, 0.0))
            .with_tag('E')
            .with_debug_style(style.clone());
        drone.add_circle(Vec3::new(x, y, 0.0), 0.75);
        Ok(engine.spawn(drone)?)
    }

    fn spawn_coin(engine: &mut Engine, x: f32, style: &CollisionDebugStyle) -> Result<Entity, AppError> {
        let mut coin = ColliderComponent::new(Vec3::new(x, 0.0, 0.0))
            .with_tag('C')
            .with_debug_style(style.clone());
        // Diamond
        coin.add_polygon_points(&[
            Vec3::new(x, -0.5, 0.0),
            Vec3::new(x + 0.5, 0.0, 0.0),
            Vec3::new(x, 0.5, 0.0),
            Vec3::new(x - 0.5, 0.0, 0.0),
        ])?;
        Ok(engine.spawn(coin)?)
    }
}

impl Application for TagArena {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Building tag arena...");
        let style = engine.collider_debug_style();
        let mut peers = TagRegistry::new();

        for x in [-12.0, 12.0] {
            peers.insert(Self::spawn_wall(engine, x, &style)?, 'W');
        }
        for (i, x) in [-6.0_f32, 0.0, 6.0].into_iter().enumerate() {
            let base_y = 3.0;
            let entity = Self::spawn_drone(engine, x, base_y, &style)?;
            peers.insert(entity, 'E');
            self.drones.push(Drone {
                entity,
                phase: i as f32 * 1.3,
                base_y,
            });
        }
        for x in [-8.0, -3.0, 4.0, 9.0] {
            let coin = Self::spawn_coin(engine, x, &style)?;
            peers.insert(coin, 'C');
            self.coins.push(coin);
        }

        let mut runner = ColliderComponent::new(Vec3::new(0.0, 0.0, 0.0))
            .with_tag('P')
            .with_debug_style(style);
        // Upright capsule, 1 wide and 2.5 tall, centred on the origin
        runner.add_capsule(Vec3::new(-0.5, -1.25, 0.0), 1.0, 2.5);
        runner.set_tags(peers);
        let runner = engine.spawn(runner)?;

        let mut animation = SpriteAnimationComponent::from_config(&engine.config().animation);
        animation.define_animation("run", 0, 7, 80)?;
        animation.define_animation("hurt", 8, 11, 60)?;
        animation.define_animation("turn", 12, 14, 50)?;
        animation.play("run")?;
        engine.add_component(runner, animation)?;

        self.runner = Some(runner);
        self.direction = 1.0;
        log::info!("Arena ready with {} entities", engine.world().entity_count());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.elapsed += delta_time;
        let runner = self.runner()?;

        for drone in &self.drones {
            if let Some(collider) = engine.world_mut().get_component_mut::<ColliderComponent>(drone.entity) {
                let mut position = collider.position();
                position.y = drone.base_y - 3.0 * (self.elapsed * DRONE_SPEED + drone.phase).sin().abs();
                collider.set_position(position);
            }
        }

        let collider = engine
            .world_mut()
            .get_component_mut::<ColliderComponent>(runner)
            .ok_or_else(|| AppError::GameLogic("runner lost its collider".to_string()))?;
        collider.set_position(collider.position() + Vec3::new(self.direction * RUNNER_SPEED * delta_time, 0.0, 0.0));

        let world = engine.world();
        let Some(collider) = world.get_component::<ColliderComponent>(runner) else {
            return Ok(());
        };
        let hit_wall = collider.is_colliding_with_tag('W', world);
        let hurt = collider.is_colliding_with_tag('E', world);

        // Coins are checked one by one so we know which to remove
        let touched: Vec<Entity> = self
            .coins
            .iter()
            .copied()
            .filter(|coin| {
                world
                    .get_component::<ColliderComponent>(*coin)
                    .map_or(false, |c| collider.is_colliding(c))
            })
            .collect();

        let mut clips = Vec::new();
        if hit_wall {
            self.direction = -self.direction;
            self.bounces += 1;
            log::info!("Runner bounced off a wall at t={:.2}s", self.elapsed);
            clips.push("turn");
        }
        if hurt {
            self.hurt_frames += 1;
            log::debug!("Runner touching a drone at t={:.2}s", self.elapsed);
            clips.push("hurt");
        }
        if !clips.is_empty() {
            clips.push("run");
        }

        for coin in touched {
            engine.destroy_entity(coin);
            self.coins.retain(|c| *c != coin);
            self.collected += 1;
            log::info!("Collected coin {} ({} left)", coin.id(), self.coins.len());
        }

        if let Some(animation) = engine.world_mut().get_component_mut::<SpriteAnimationComponent>(runner) {
            for clip in clips {
                animation.play(clip)?;
            }
        }

        if self.coins.is_empty() {
            log::info!("All coins collected");
            engine.quit();
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Arena finished after {} frames: {} coins, {} bounces, {} frames touching drones",
            engine.frame_count(),
            self.collected,
            self.bounces,
            self.hurt_frames
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "tag_arena.toml".to_string());
    let frames = match args.next() {
        Some(frames) => frames.parse::<u64>()?,
        None => 1200,
    };

    let mut config = EngineConfig::load_or_default(&config_path)?;
    if config.fixed_timestep.is_none() {
        config.fixed_timestep = Some(1.0 / 60.0);
    }
    logging::init_with_level(&config.log_level);

    let mut engine = Engine::new(config, Box::new(HeadlessBackend::new()))?;
    let mut app = TagArena::default();

    if let Err(e) = engine.run(&mut app, Some(frames)) {
        log::error!("Tag arena failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
