use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use isotile_engine::coords::{GridPos, Rect, Vec2, Vec3};
use isotile_engine::iso::{Entity, HeightProfile};
use isotile_engine::logging::{init_logging, LoggingConfig};
use isotile_engine::mobility::{MobilityConfig, MobilityEvent, MobilityPolicy, WalkingConfig};
use isotile_engine::scene::InstanceBuffer;
use isotile_engine::terrain::HeightField;
use isotile_engine::time::FrameClock;
use isotile_engine::{Stage, StageConfig};

const MAP: &str = include_str!("../maps/ridge.txt");

/// Simulated display refresh; the sandbox runs headless against a synthetic clock.
const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let field = HeightField::parse(MAP).context("parsing sandbox map")?;
    let tiles: Vec<(GridPos, f32)> = field.tiles().collect();
    let mut stage = Stage::new(StageConfig::default()).with_ground(field);

    let tile_sprite = Rect::new(-16.0, -12.0, 32.0, 24.0);
    for (cell, height) in &tiles {
        stage.spawn(
            Entity::new(cell.at_height(0.0))
                .with_height(HeightProfile::Constant(*height))
                .with_bounds(tile_sprite.translated(Vec2::new(0.0, -8.0 * height))),
        );
    }

    let walker = stage.spawn(
        Entity::new(Vec3::new(0.0, 2.0, 0.0))
            .with_bounds(Rect::new(-8.0, -28.0, 16.0, 28.0)),
    );
    let policy = MobilityPolicy::Walking(WalkingConfig { jump: 3.0, ..WalkingConfig::default() });
    let mover = stage
        .attach_mobility(walker, policy, MobilityConfig { speed: 3.0, ..MobilityConfig::default() })
        .context("attaching walker")?;

    let destination = GridPos::new(6, 2);
    stage.move_to(mover, destination).context("starting walk")?;
    log::info!("walking {walker} to {destination}");

    let start = Instant::now();
    let mut clock = FrameClock::new();
    clock.reset_at(start);

    let mut frames: u32 = 0;
    loop {
        frames += 1;
        let time = clock.tick_at(start + FRAME * frames);
        stage.update(time.dt);

        for (_, event) in stage.drain_events() {
            match event {
                MobilityEvent::Stride { kind, from, to } => log::info!("{kind:?} {from} -> {to}"),
                MobilityEvent::Arrived { position } => log::debug!("at {position:?}"),
                MobilityEvent::PathComplete => log::info!("path complete after {frames} frames"),
            }
        }

        let moving = stage.mover(mover).is_some_and(|m| m.is_moving());
        if !moving || frames > 10_000 {
            break;
        }
    }

    // One more step so the buffer has seen the final position.
    stage.update(FRAME.as_secs_f32());

    let mut instances = InstanceBuffer::new();
    stage.draw(Vec2::new(320.0, 120.0), &mut instances);
    log::info!(
        "{} draw instances ({} bytes), walker at {:?}",
        instances.instances().len(),
        instances.as_bytes().len(),
        stage.entities().position(walker)
    );

    Ok(())
}
