//! Tests for the simulation engine, the per-tick systems, and the command surface.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vonneumann_core::commands::PlayerCommand;
use vonneumann_core::components::*;
use vonneumann_core::constants::*;
use vonneumann_core::enums::*;
use vonneumann_core::events::SimEvent;
use vonneumann_core::types::{Position, Velocity};

use crate::config::SimConfig;
use crate::effects::StandardEffects;
use crate::engine::SimulationEngine;
use crate::handle::{entity_id, resolve};
use crate::names::{NameGenerator, SEED_PROBE_NAME};
use crate::stats::GameStats;
use crate::systems::{
    ai, construction, discovery, merge, mining, movement, orbital, research, scanning,
};
use crate::world_setup;

// ---- Helpers ----

fn spawn_planet(
    world: &mut World,
    at: Position,
    radius: f64,
    ore: OreType,
    resources: f64,
    discovered: bool,
) -> Entity {
    world.spawn((
        at,
        Planet {
            ore,
            resources,
            max_resources: resources.max(1.0),
            radius,
            discovered,
            depleted: false,
        },
        Mineable::default(),
    ))
}

fn spawn_test_probe(world: &mut World, at: Position, matter: f64) -> Entity {
    let probe = world_setup::spawn_probe(world, at, "Test-01".to_string(), false);
    world.get::<&mut Probe>(probe).unwrap().matter = matter;
    probe
}

fn started_engine(seed: u64, autonomous: bool) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        autonomous_seed_probe: autonomous,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartExpedition);
    engine.tick();
    engine
}

fn seed_probe_id(engine: &SimulationEngine) -> u64 {
    let mut query = engine.world().query::<&Probe>();
    let (entity, _) = query.iter().next().unwrap();
    entity_id(entity)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        autonomous_seed_probe: true,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        autonomous_seed_probe: true,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartExpedition);
    engine_b.queue_command(PlayerCommand::StartExpedition);

    for _ in 0..600 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartExpedition);
    engine_b.queue_command(PlayerCommand::StartExpedition);

    // Planet layout is seeded, so the first snapshot already differs.
    let json_a = serde_json::to_string(&engine_a.tick().planets).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick().planets).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should produce different systems");
}

// ---- Engine lifecycle ----

#[test]
fn test_start_expedition_populates_world() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(engine.phase(), SimPhase::Setup);

    // Setup phase: nothing simulated.
    let snap = engine.tick();
    assert!(snap.planets.is_empty());
    assert_eq!(snap.time.tick, 0);

    engine.queue_command(PlayerCommand::StartExpedition);
    let snap = engine.tick();
    assert_eq!(engine.phase(), SimPhase::Active);
    assert_eq!(snap.suns.len(), 1);
    assert_eq!(snap.planets.len(), 12);
    assert!(snap.planets.iter().all(|p| !p.discovered));
    assert_eq!(snap.stats.systems_unlocked, 1);

    assert_eq!(snap.probes.len(), 1);
    let probe = &snap.probes[0];
    assert_eq!(probe.name, SEED_PROBE_NAME);
    assert!(!probe.is_autonomous);
    assert_eq!(probe.matter, 0.0);
    // One tick of damping at rest leaves the probe where it spawned.
    assert!((probe.position.x - SEED_PROBE_OFFSET).abs() < 1e-9);
}

#[test]
fn test_start_expedition_twice_is_rejected() {
    let mut engine = started_engine(42, false);
    engine.queue_command(PlayerCommand::StartExpedition);
    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::CommandRejected { .. })));
    assert_eq!(snap.planets.len(), 12);
}

#[test]
fn test_generated_planets_match_ring_layout() {
    let engine = started_engine(7, false);
    let mut radii: Vec<f64> = Vec::new();
    for (_e, (pos, planet, orbital)) in engine
        .world()
        .query::<(&Position, &Planet, &Orbital)>()
        .iter()
    {
        assert!(planet.radius >= PLANET_RADIUS_MIN && planet.radius < PLANET_RADIUS_MAX);
        assert!(planet.resources >= PLANET_RESOURCES_MIN);
        assert!(planet.resources < PLANET_RESOURCES_MAX);
        assert_eq!(planet.resources, planet.max_resources);
        assert!((0.0..std::f64::consts::TAU).contains(&orbital.current_angle));
        let dist = pos.distance_to(&Position::new(orbital.sun_x, orbital.sun_y));
        assert!((dist - orbital.orbit_radius).abs() < 1e-6);
        radii.push(orbital.orbit_radius);
    }
    for ring in ORBITAL_RINGS.iter() {
        let count = radii.iter().filter(|r| **r == ring.radius).count();
        assert_eq!(count as u32, ring.count);
    }
}

#[test]
fn test_tick_timing_sixty_ticks_one_second() {
    let mut engine = started_engine(42, false);
    let start = engine.time();
    for _ in 0..60 {
        engine.tick();
    }
    let elapsed = engine.time().elapsed_secs - start.elapsed_secs;
    assert!((elapsed - 1.0).abs() < 1e-9);
    assert_eq!(engine.time().tick - start.tick, 60);
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = started_engine(42, true);
    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, SimPhase::Paused);
    let tick_at_pause = paused.time.tick;

    for _ in 0..30 {
        engine.tick();
    }
    let snap = engine.tick();
    assert_eq!(snap.time.tick, tick_at_pause);
    assert_eq!(
        serde_json::to_string(&snap.planets).unwrap(),
        serde_json::to_string(&paused.planets).unwrap(),
        "Planets must not move while paused"
    );

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, SimPhase::Active);
    assert_eq!(snap.time.tick, tick_at_pause + 1);
}

#[test]
fn test_set_time_scale_clamped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 2.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 2.0);

    engine.queue_command(PlayerCommand::SetTimeScale { scale: 50.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 4.0);

    engine.queue_command(PlayerCommand::SetTimeScale { scale: -1.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 0.0);
}

// ---- Movement ----

#[test]
fn test_movement_reaches_target_and_stops() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    world.get::<&mut MovementTarget>(probe).unwrap().point = Some(Position::new(100.0, 0.0));

    for _ in 0..600 {
        movement::run(&mut world, DT);
    }

    let pos = *world.get::<&Position>(probe).unwrap();
    let vel = *world.get::<&Velocity>(probe).unwrap();
    assert!(world.get::<&MovementTarget>(probe).unwrap().point.is_none());
    assert!((pos.x - 100.0).abs() < ARRIVAL_THRESHOLD);
    assert_eq!(vel.speed(), 0.0);
}

#[test]
fn test_movement_eases_toward_speed_and_faces_velocity() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    world.get::<&mut MovementTarget>(probe).unwrap().point = Some(Position::new(0.0, 1000.0));

    movement::run(&mut world, DT);
    let vel = *world.get::<&Velocity>(probe).unwrap();
    // One tick of easing from rest: 8% of cruise speed.
    assert!((vel.y - PROBE_SPEED * MOVEMENT_SMOOTHING).abs() < 1e-9);
    let heading = world.get::<&Heading>(probe).unwrap().angle;
    assert!((heading - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn test_movement_damps_without_target() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    *world.get::<&mut Velocity>(probe).unwrap() = Velocity::new(100.0, 0.0);

    movement::run(&mut world, DT);
    let vel = *world.get::<&Velocity>(probe).unwrap();
    let pos = *world.get::<&Position>(probe).unwrap();
    assert!((vel.x - 90.0).abs() < 1e-9);
    assert!((pos.x - 90.0 * DT).abs() < 1e-9);
}

// ---- Orbital ----

#[test]
fn test_orbital_zero_speed_is_idempotent() {
    let mut world = World::new();
    let planet = world.spawn((
        Position::new(150.0, 0.0),
        Orbital {
            orbit_radius: 150.0,
            orbit_speed: 0.0,
            current_angle: 0.0,
            sun_x: 0.0,
            sun_y: 0.0,
        },
    ));
    for _ in 0..1000 {
        orbital::run(&mut world, DT);
    }
    let pos = *world.get::<&Position>(planet).unwrap();
    assert!((pos.x - 150.0).abs() < 1e-9);
    assert!(pos.y.abs() < 1e-9);
}

#[test]
fn test_orbital_wraps_angle() {
    let mut world = World::new();
    let planet = world.spawn((
        Position::default(),
        Orbital {
            orbit_radius: 100.0,
            orbit_speed: 1.0,
            current_angle: std::f64::consts::TAU - 0.001,
            sun_x: 500.0,
            sun_y: 500.0,
        },
    ));
    orbital::run(&mut world, DT);
    let orbital = world.get::<&Orbital>(planet).unwrap();
    assert!(orbital.current_angle >= 0.0 && orbital.current_angle < 0.1);
    let pos = *world.get::<&Position>(planet).unwrap();
    assert!((pos.distance_to(&Position::new(500.0, 500.0)) - 100.0).abs() < 1e-9);
}

// ---- Scanning & discovery ----

#[test]
fn test_scan_discovery_example() {
    let mut world = World::new();
    let scanner = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    let near = spawn_planet(&mut world, Position::new(100.0, 0.0), 20.0, OreType::Iron, 100.0, false);
    let far = spawn_planet(&mut world, Position::new(300.0, 0.0), 10.0, OreType::Iron, 100.0, false);

    assert!(scanning::trigger_scan(&mut world.get::<&mut Scanner>(scanner).unwrap()));

    let mut events = Vec::new();
    for _ in 0..60 {
        scanning::run(&mut world, DT);
        discovery::run(&mut world, DT, &mut events);
    }

    assert!(world.get::<&Planet>(near).unwrap().discovered);
    assert!(!world.get::<&Planet>(far).unwrap().discovered);
    // Repeated checks inside the window do not re-announce the planet.
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0],
        SimEvent::PlanetDiscovered {
            planet: entity_id(near),
            ore: OreType::Iron
        }
    );
}

#[test]
fn test_no_discovery_before_midpoint() {
    let mut world = World::new();
    let scanner = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    let near = spawn_planet(&mut world, Position::new(50.0, 0.0), 20.0, OreType::Iron, 100.0, false);
    scanning::trigger_scan(&mut world.get::<&mut Scanner>(scanner).unwrap());

    let mut events = Vec::new();
    // 0.6s of a 1.5s scan: progress 0.4
    for _ in 0..36 {
        scanning::run(&mut world, DT);
        discovery::run(&mut world, DT, &mut events);
    }
    assert!(!world.get::<&Planet>(near).unwrap().discovered);
}

#[test]
fn test_scan_cycle_and_cooldown() {
    let mut world = World::new();
    let entity = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    assert!(scanning::trigger_scan(&mut world.get::<&mut Scanner>(entity).unwrap()));
    // Busy scanners reject a second trigger.
    assert!(!scanning::trigger_scan(&mut world.get::<&mut Scanner>(entity).unwrap()));

    for _ in 0..95 {
        scanning::run(&mut world, DT);
    }
    {
        let scanner = world.get::<&Scanner>(entity).unwrap();
        assert!(!scanner.is_scanning);
        assert_eq!(scanner.scan_progress, 0.0);
        assert!(scanner.current_cooldown > 0.0);
    }
    assert!(!scanning::trigger_scan(&mut world.get::<&mut Scanner>(entity).unwrap()));

    for _ in 0..200 {
        scanning::run(&mut world, DT);
    }
    assert_eq!(world.get::<&Scanner>(entity).unwrap().current_cooldown, 0.0);
    assert!(scanning::trigger_scan(&mut world.get::<&mut Scanner>(entity).unwrap()));
}

// ---- Mining ----

#[test]
fn test_mining_extracts_at_ore_rate() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    let planet = spawn_planet(&mut world, Position::new(25.0, 0.0), 10.0, OreType::Copper, 100.0, true);

    let mut stats = GameStats::default();
    let mut events = Vec::new();
    mining::run(&mut world, DT, &mut stats, &mut events);

    let expected = BASE_MINING_RATE * 1.2 * DT;
    assert!((world.get::<&Probe>(probe).unwrap().matter - expected).abs() < 1e-12);
    assert!((world.get::<&Planet>(planet).unwrap().resources - (100.0 - expected)).abs() < 1e-12);
    assert!((stats.total_matter_mined - expected).abs() < 1e-12);
    let mineable = world.get::<&Mineable>(planet).unwrap();
    assert!(mineable.is_being_mined);
    assert!(mineable.mining_progress > 0.0);
}

#[test]
fn test_mining_ignores_undiscovered_and_out_of_range() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    spawn_planet(&mut world, Position::new(20.0, 0.0), 10.0, OreType::Iron, 100.0, false);
    spawn_planet(&mut world, Position::new(100.0, 0.0), 10.0, OreType::Iron, 100.0, true);

    let mut stats = GameStats::default();
    mining::run(&mut world, DT, &mut stats, &mut Vec::new());
    assert_eq!(world.get::<&Probe>(probe).unwrap().matter, 0.0);
}

#[test]
fn test_mining_picks_closest_surface() {
    let mut world = World::new();
    spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    // Center 30 away, radius 25: surface 5. Center 20 away, radius 5: surface 15.
    let big = spawn_planet(&mut world, Position::new(-30.0, 0.0), 25.0, OreType::Iron, 100.0, true);
    let small = spawn_planet(&mut world, Position::new(20.0, 0.0), 5.0, OreType::Iron, 100.0, true);

    mining::run(&mut world, DT, &mut GameStats::default(), &mut Vec::new());
    assert!(world.get::<&Planet>(big).unwrap().resources < 100.0);
    assert_eq!(world.get::<&Planet>(small).unwrap().resources, 100.0);
}

#[test]
fn test_mining_depletes_planet() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    let planet = spawn_planet(&mut world, Position::new(20.0, 0.0), 10.0, OreType::Iron, 0.01, true);

    let mut events = Vec::new();
    mining::run(&mut world, DT, &mut GameStats::default(), &mut events);

    let p = world.get::<&Planet>(planet).unwrap();
    assert_eq!(p.resources, 0.0);
    assert!(p.depleted);
    assert!((world.get::<&Probe>(probe).unwrap().matter - 0.01).abs() < 1e-12);
    assert!(matches!(events[0], SimEvent::PlanetDepleted { .. }));
}

#[test]
fn test_full_probe_does_not_mine() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), PROBE_MAX_MATTER);
    let planet = spawn_planet(&mut world, Position::new(20.0, 0.0), 10.0, OreType::Iron, 100.0, true);

    mining::run(&mut world, DT, &mut GameStats::default(), &mut Vec::new());
    assert_eq!(world.get::<&Probe>(probe).unwrap().matter, PROBE_MAX_MATTER);
    assert_eq!(world.get::<&Planet>(planet).unwrap().resources, 100.0);
    assert!(!world.get::<&Mineable>(planet).unwrap().is_being_mined);
}

#[test]
fn test_mining_fills_to_capacity_exactly() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), PROBE_MAX_MATTER - 0.001);
    spawn_planet(&mut world, Position::new(20.0, 0.0), 10.0, OreType::Iron, 100.0, true);

    mining::run(&mut world, DT, &mut GameStats::default(), &mut Vec::new());
    let matter = world.get::<&Probe>(probe).unwrap().matter;
    assert!(matter <= PROBE_MAX_MATTER);
    assert!(PROBE_MAX_MATTER - matter < 1e-9);
}

// ---- Construction ----

#[test]
fn test_construction_example() {
    let mut world = World::new();
    let builder = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 60.0);
    assert!(construction::start_probe_build(
        &mut world.get::<&mut Probe>(builder).unwrap(),
        UnitKind::Probe
    ));

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut effects = StandardEffects::new(1);
    let mut stats = GameStats::default();
    let mut events = Vec::new();
    for _ in 0..310 {
        construction::run(&mut world, DT, &mut rng, &mut effects, &mut stats, &mut events);
    }

    let probe = world.get::<&Probe>(builder).unwrap();
    assert_eq!(probe.matter, 10.0);
    assert!(!probe.build.is_building);
    assert!(probe.build.target.is_none());
    drop(probe);

    assert_eq!(world.query::<&Probe>().iter().count(), 2);
    assert_eq!(stats.probes_built, 1);
    assert_eq!(events.len(), 1);

    let SimEvent::UnitBuilt { unit, .. } = events[0] else {
        panic!("expected UnitBuilt, got {:?}", events[0]);
    };
    let spawned = resolve(&world, unit).unwrap();
    let pos = *world.get::<&Position>(spawned).unwrap();
    assert!((pos.distance_to(&Position::new(0.0, 0.0)) - PROBE_BUILD_SPAWN_OFFSET).abs() < 1e-9);
    // Probe-built probes are autonomous.
    assert!(world.get::<&Probe>(spawned).unwrap().is_autonomous);

    let ai = world.get::<&Ai>(builder).unwrap();
    assert_eq!(ai.task, AiTask::Mine);
    assert_eq!(ai.state, AiState::Idle);
}

#[test]
fn test_build_rejected_when_busy_or_poor() {
    let mut probe = Probe {
        name: "P".to_string(),
        matter: 24.0,
        max_matter: PROBE_MAX_MATTER,
        is_autonomous: false,
        is_selected: false,
        build: BuildState::default(),
    };
    assert!(!construction::start_probe_build(&mut probe, UnitKind::Rover));
    probe.matter = 25.0;
    assert!(construction::start_probe_build(&mut probe, UnitKind::Rover));
    assert!(!construction::start_probe_build(&mut probe, UnitKind::Rover));
    // Matter is only debited on completion.
    assert_eq!(probe.matter, 25.0);
}

#[test]
fn test_station_builds_faster_and_further_out() {
    let mut world = World::new();
    let station = world_setup::spawn_station(&mut world, Position::new(0.0, 0.0), "S".into(), 100.0);
    assert!(construction::start_station_build(
        &mut world.get::<&mut Station>(station).unwrap(),
        UnitKind::Rover
    ));

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut effects = StandardEffects::new(3);
    let mut stats = GameStats::default();
    let mut events = Vec::new();
    for _ in 0..125 {
        construction::run(&mut world, DT, &mut rng, &mut effects, &mut stats, &mut events);
    }

    assert_eq!(world.get::<&Station>(station).unwrap().matter, 85.0);
    assert_eq!(stats.rovers_built, 1);
    let pos = world
        .query::<(&Position, &Rover)>()
        .iter()
        .map(|(_, (pos, _))| *pos)
        .next()
        .unwrap();
    assert!((pos.distance_to(&Position::new(0.0, 0.0)) - STATION_BUILD_SPAWN_OFFSET).abs() < 1e-9);
}

#[test]
fn test_station_cannot_build_while_researching() {
    let mut station = Station {
        name: "S".to_string(),
        matter: STATION_MAX_MATTER,
        max_matter: STATION_MAX_MATTER,
        build: BuildState::default(),
        research: ResearchState::default(),
    };
    station.research.is_researching = true;
    station.research.target = Some(ResearchKind::NewSystem);
    assert!(!construction::start_station_build(&mut station, UnitKind::Probe));
}

// ---- Research ----

#[test]
fn test_research_unlocks_new_system() {
    let mut world = World::new();
    world.spawn((Position::new(0.0, 0.0), Sun { index: 0 }));
    let station = world_setup::spawn_station(&mut world, Position::new(100.0, 0.0), "S".into(), 500.0);

    {
        let mut s = world.get::<&mut Station>(station).unwrap();
        assert!(research::can_research(&s, ResearchKind::NewSystem));
        assert!(research::start_research(&mut s, ResearchKind::NewSystem));
        assert_eq!(s.matter, 0.0);
        assert!(!research::start_research(&mut s, ResearchKind::NewSystem));
        // Research and building are mutually exclusive.
        assert!(!research::can_research(&s, ResearchKind::NewSystem));
    }

    let mut effects = StandardEffects::new(9);
    let mut events = Vec::new();
    for _ in 0..610 {
        research::run(&mut world, DT, &mut effects, &mut events);
    }

    let s = world.get::<&Station>(station).unwrap();
    assert!(!s.research.is_researching);
    assert!(s.research.target.is_none());
    drop(s);

    assert_eq!(
        events,
        vec![SimEvent::ResearchComplete {
            station: entity_id(station),
            research: ResearchKind::NewSystem
        }]
    );
    let mut suns: Vec<(u32, Position)> = world
        .query::<(&Position, &Sun)>()
        .iter()
        .map(|(_, (p, s))| (s.index, *p))
        .collect();
    suns.sort_by_key(|(i, _)| *i);
    assert_eq!(suns.len(), 2);
    assert_eq!(suns[1].1, Position::new(SYSTEM_SPACING, 0.0));
    assert_eq!(world.query::<&Planet>().iter().count(), 12);
}

#[test]
fn test_research_rejected_when_poor() {
    let mut station = Station {
        name: "S".to_string(),
        matter: 499.0,
        max_matter: STATION_MAX_MATTER,
        build: BuildState::default(),
        research: ResearchState::default(),
    };
    assert!(!research::start_research(&mut station, ResearchKind::NewSystem));
    assert_eq!(station.matter, 499.0);
}

// ---- Merge ----

#[test]
fn test_merge_tie_break_four_probes() {
    let mut world = World::new();
    let p: Vec<Entity> = (0..4)
        .map(|i| spawn_test_probe(&mut world, Position::new(i as f64 * 10.0, 0.0), 0.0))
        .collect();

    let clusters = merge::find_mergeable_clusters(&world);
    // Centres 0, 1 and 2 all yield {0,1,2}; centre 3 yields {3,0,1}.
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0], [p[0], p[1], p[2]]);
    assert_eq!(clusters[1], [p[3], p[0], p[1]]);

    assert_eq!(merge::probe_cluster(&world, p[2]), Some([p[2], p[0], p[1]]));
}

#[test]
fn test_merge_requires_three_probes() {
    let mut world = World::new();
    let a = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    let b = spawn_test_probe(&mut world, Position::new(50.0, 0.0), 0.0);
    let c = spawn_test_probe(&mut world, Position::new(100.1, 0.0), 0.0);

    assert!(!merge::can_merge(&world, a));
    assert!(!merge::can_merge(&world, b));
    assert!(merge::find_mergeable_clusters(&world).is_empty());

    // Exactly MERGE_RADIUS counts as in range.
    *world.get::<&mut Position>(c).unwrap() = Position::new(100.0, 0.0);
    assert!(merge::can_merge(&world, b));
    assert!(!merge::can_merge(&world, a));
    assert_eq!(merge::find_mergeable_clusters(&world), vec![[b, a, c]]);
}

#[test]
fn test_execute_merge_conserves_matter() {
    let mut world = World::new();
    let cluster = [
        spawn_test_probe(&mut world, Position::new(0.0, 0.0), 10.0),
        spawn_test_probe(&mut world, Position::new(30.0, 0.0), 20.0),
        spawn_test_probe(&mut world, Position::new(0.0, 30.0), 30.0),
    ];

    let mut effects = StandardEffects::new(5);
    let mut stats = GameStats::default();
    let mut events = Vec::new();
    let station = merge::execute_merge(&mut world, &mut effects, &mut stats, &mut events, &cluster)
        .unwrap();

    for member in cluster {
        assert!(!world.contains(member));
    }
    let s = world.get::<&Station>(station).unwrap();
    assert_eq!(s.matter, 60.0);
    let pos = *world.get::<&Position>(station).unwrap();
    assert!((pos.x - 10.0).abs() < 1e-9 && (pos.y - 10.0).abs() < 1e-9);
    assert_eq!(stats.stations_formed, 1);
    assert!(matches!(events[0], SimEvent::StationFormed { matter, .. } if matter == 60.0));
}

#[test]
fn test_merge_overflow_is_discarded() {
    let mut world = World::new();
    let cluster = [
        spawn_test_probe(&mut world, Position::new(0.0, 0.0), 100.0),
        spawn_test_probe(&mut world, Position::new(10.0, 0.0), 100.0),
        spawn_test_probe(&mut world, Position::new(20.0, 0.0), 100.0),
    ];
    // Raise capacity past the station limit to force overflow.
    for member in cluster {
        let mut probe = world.get::<&mut Probe>(member).unwrap();
        probe.max_matter = 200.0;
        probe.matter = 200.0;
    }

    let mut effects = StandardEffects::new(5);
    let station = merge::execute_merge(
        &mut world,
        &mut effects,
        &mut GameStats::default(),
        &mut Vec::new(),
        &cluster,
    )
    .unwrap();
    assert_eq!(world.get::<&Station>(station).unwrap().matter, STATION_MAX_MATTER);
}

#[test]
fn test_execute_merge_rejects_bad_clusters() {
    let mut world = World::new();
    let a = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    let b = spawn_test_probe(&mut world, Position::new(10.0, 0.0), 0.0);
    let mut effects = StandardEffects::new(5);

    let result = merge::execute_merge(
        &mut world,
        &mut effects,
        &mut GameStats::default(),
        &mut Vec::new(),
        &[a, b],
    );
    assert!(result.is_none());
    let result = merge::execute_merge(
        &mut world,
        &mut effects,
        &mut GameStats::default(),
        &mut Vec::new(),
        &[a, b, a],
    );
    assert!(result.is_none());
    assert!(world.contains(a) && world.contains(b));
}

// ---- AI ----

fn make_autonomous(world: &mut World, probe: Entity, task: AiTask) {
    world.get::<&mut Probe>(probe).unwrap().is_autonomous = true;
    let mut ai = world.get::<&mut Ai>(probe).unwrap();
    ai.task = task;
    ai.think_timer = 0.0;
}

#[test]
fn test_ai_deposit_example() {
    let mut world = World::new();
    let station = world_setup::spawn_station(&mut world, Position::new(40.0, 0.0), "S".into(), 480.0);
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 80.0);
    make_autonomous(&mut world, probe, AiTask::Deposit);

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    ai::run(&mut world, DT, &mut rng);

    assert_eq!(world.get::<&Probe>(probe).unwrap().matter, 60.0);
    assert_eq!(world.get::<&Station>(station).unwrap().matter, 500.0);
    assert_eq!(world.get::<&Ai>(probe).unwrap().task, AiTask::Mine);
    assert!(world.get::<&MovementTarget>(probe).unwrap().point.is_none());
}

#[test]
fn test_ai_two_probes_share_station_capacity() {
    let mut world = World::new();
    let station = world_setup::spawn_station(&mut world, Position::new(40.0, 0.0), "S".into(), 480.0);
    let first = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 15.0);
    let second = spawn_test_probe(&mut world, Position::new(0.0, 5.0), 15.0);
    make_autonomous(&mut world, first, AiTask::Deposit);
    make_autonomous(&mut world, second, AiTask::Deposit);

    ai::run(&mut world, DT, &mut ChaCha8Rng::seed_from_u64(0));

    let total = world.get::<&Probe>(first).unwrap().matter + world.get::<&Probe>(second).unwrap().matter;
    assert_eq!(world.get::<&Station>(station).unwrap().matter, 500.0);
    assert_eq!(total, 10.0);
}

#[test]
fn test_ai_manual_probe_is_ignored() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    world.get::<&mut Ai>(probe).unwrap().task = AiTask::Explore;
    spawn_planet(&mut world, Position::new(500.0, 0.0), 10.0, OreType::Iron, 100.0, false);

    ai::run(&mut world, DT, &mut ChaCha8Rng::seed_from_u64(0));
    assert!(world.get::<&MovementTarget>(probe).unwrap().point.is_none());
    assert!(!world.get::<&Scanner>(probe).unwrap().is_scanning);
}

#[test]
fn test_ai_explore_scans_and_wanders() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    make_autonomous(&mut world, probe, AiTask::Explore);
    spawn_planet(&mut world, Position::new(900.0, 0.0), 10.0, OreType::Iron, 100.0, false);

    ai::run(&mut world, DT, &mut ChaCha8Rng::seed_from_u64(0));

    assert!(world.get::<&Scanner>(probe).unwrap().is_scanning);
    let target = world.get::<&MovementTarget>(probe).unwrap().point.unwrap();
    let distance = target.distance_to(&Position::new(0.0, 0.0));
    assert!(distance >= WANDER_MIN_DISTANCE);
    assert!(distance <= WANDER_MIN_DISTANCE + PROBE_WANDER_RADIUS);
    // The next decision waits for the think interval.
    assert_eq!(world.get::<&Ai>(probe).unwrap().think_timer, PROBE_THINK_INTERVAL);
}

#[test]
fn test_ai_mine_follows_planet() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    make_autonomous(&mut world, probe, AiTask::Mine);
    let planet = spawn_planet(&mut world, Position::new(300.0, 40.0), 10.0, OreType::Iron, 100.0, true);

    ai::run(&mut world, DT, &mut ChaCha8Rng::seed_from_u64(0));

    let ai_state = world.get::<&Ai>(probe).unwrap().clone();
    assert_eq!(ai_state.state, AiState::Traveling);
    assert_eq!(ai_state.target_entity, Some(entity_id(planet)));
    assert_eq!(
        world.get::<&MovementTarget>(probe).unwrap().point,
        Some(Position::new(300.0, 40.0))
    );
}

#[test]
fn test_ai_rover_scouts() {
    let mut world = World::new();
    let rover = world_setup::spawn_rover(&mut world, Position::new(0.0, 0.0), "RV-A001".into());

    ai::run(&mut world, DT, &mut ChaCha8Rng::seed_from_u64(0));

    assert!(world.get::<&Scanner>(rover).unwrap().is_scanning);
    assert!(world.get::<&MovementTarget>(rover).unwrap().point.is_some());
    assert_eq!(world.get::<&Rover>(rover).unwrap().status, RoverStatus::Scanning);
    assert_eq!(world.get::<&Ai>(rover).unwrap().think_timer, ROVER_THINK_INTERVAL);
}

// ---- Commands ----

#[test]
fn test_select_entity_command() {
    let mut engine = started_engine(42, false);
    let first = seed_probe_id(&engine);
    let second = entity_id(world_setup::spawn_probe(
        engine.world_mut(),
        Position::new(500.0, 500.0),
        "Other".into(),
        false,
    ));

    engine.queue_command(PlayerCommand::SelectEntity { entity: first });
    engine.tick();
    engine.queue_command(PlayerCommand::SelectEntity { entity: second });
    let snap = engine.tick();

    let selected: Vec<u64> = snap.probes.iter().filter(|p| p.is_selected).map(|p| p.id).collect();
    assert_eq!(selected, vec![second]);
}

#[test]
fn test_move_to_command() {
    let mut engine = started_engine(42, false);
    let id = seed_probe_id(&engine);
    engine.queue_command(PlayerCommand::MoveTo {
        entity: id,
        x: 200.0,
        y: 0.0,
    });
    let snap = engine.tick();
    assert_eq!(snap.probes[0].target, Some(Position::new(200.0, 0.0)));
    assert!(snap.probes[0].velocity.x > 0.0);
}

#[test]
fn test_toggle_autonomy_command() {
    let mut engine = started_engine(42, false);
    let id = seed_probe_id(&engine);

    engine.queue_command(PlayerCommand::ToggleAutonomy { entity: id });
    let snap = engine.tick();
    let probe = &snap.probes[0];
    assert!(probe.is_autonomous);
    assert_eq!(probe.task, AiTask::Explore);
    // Decided on the same tick: scan started and a wander point chosen.
    assert!(probe.scanner.is_scanning);
    assert!(probe.target.is_some());

    engine.queue_command(PlayerCommand::ToggleAutonomy { entity: id });
    let snap = engine.tick();
    assert!(!snap.probes[0].is_autonomous);
    assert!(snap.probes[0].target.is_none());
}

#[test]
fn test_trigger_scan_command_rejected_while_scanning() {
    let mut engine = started_engine(42, false);
    let id = seed_probe_id(&engine);
    engine.queue_command(PlayerCommand::TriggerScan { entity: id });
    let snap = engine.tick();
    assert!(snap.probes[0].scanner.is_scanning);
    assert!(snap.events.is_empty());

    engine.queue_command(PlayerCommand::TriggerScan { entity: id });
    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::CommandRejected { .. })));
}

#[test]
fn test_build_command_rejected_without_matter() {
    let mut engine = started_engine(42, false);
    let id = seed_probe_id(&engine);
    engine.queue_command(PlayerCommand::Build {
        entity: id,
        unit: UnitKind::Probe,
    });
    let snap = engine.tick();
    assert!(!snap.probes[0].build.is_building);
    assert_eq!(snap.events.len(), 1);
    assert!(matches!(snap.events[0], SimEvent::CommandRejected { .. }));
}

#[test]
fn test_unknown_entity_rejected() {
    let mut engine = started_engine(42, false);
    let result = engine.apply_command(PlayerCommand::TriggerScan { entity: u64::MAX });
    assert!(matches!(
        result,
        Err(crate::error::CommandError::UnknownEntity(u64::MAX))
    ));
}

#[test]
fn test_merge_command_forms_station() {
    let mut engine = started_engine(42, false);
    let id = seed_probe_id(&engine);
    let seed_pos = Position::new(SEED_PROBE_OFFSET, 0.0);
    for offset in [10.0, 20.0] {
        let probe = world_setup::spawn_probe(
            engine.world_mut(),
            Position::new(seed_pos.x, seed_pos.y + offset),
            "Helper".into(),
            false,
        );
        engine.world_mut().get::<&mut Probe>(probe).unwrap().matter = 40.0;
    }

    let snap = engine.tick();
    assert!(snap.probes.iter().all(|p| p.can_merge));

    engine.queue_command(PlayerCommand::Merge { entity: id });
    let snap = engine.tick();
    assert!(snap.probes.is_empty());
    assert_eq!(snap.stations.len(), 1);
    assert_eq!(snap.stations[0].matter, 80.0);
    assert_eq!(snap.stats.stations_formed, 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::StationFormed { .. })));
}

#[test]
fn test_merge_command_without_cluster() {
    let mut engine = started_engine(42, false);
    let id = seed_probe_id(&engine);
    let result = engine.apply_command(PlayerCommand::Merge { entity: id });
    assert_eq!(result, Err(crate::error::CommandError::NoCluster(id)));
}

#[test]
fn test_research_command_through_engine() {
    let mut engine = started_engine(42, false);
    let station = entity_id(world_setup::spawn_station(
        engine.world_mut(),
        Position::new(-500.0, 0.0),
        "Hub-Alpha".into(),
        500.0,
    ));

    engine.queue_command(PlayerCommand::Research {
        entity: station,
        research: ResearchKind::NewSystem,
    });
    let snap = engine.tick();
    assert!(snap
        .events
        .contains(&SimEvent::ResearchStarted {
            station,
            research: ResearchKind::NewSystem
        }));
    assert!(snap.stations[0].is_researching);
    assert!(!snap.stations[0].can_research);

    let mut unlocked = false;
    for _ in 0..620 {
        let snap = engine.tick();
        if snap.stats.systems_unlocked == 2 {
            unlocked = true;
            assert_eq!(snap.planets.len(), 24);
            break;
        }
    }
    assert!(unlocked, "research should unlock a second system");
}

// ---- Autonomous economy ----

#[test]
fn test_autonomous_probe_discovers_and_mines() {
    let mut engine = started_engine(42, true);
    let mut discovered = false;
    let mut mined = false;
    for _ in 0..(60 * 120) {
        let snap = engine.tick();
        discovered |= snap.stats.planets_discovered > 0;
        mined |= snap.stats.total_matter_mined > 0.0;
        if discovered && mined {
            break;
        }
    }
    assert!(discovered, "seed probe should discover a planet within two minutes");
    assert!(mined, "seed probe should mine within two minutes");
}

// ---- Names & config ----

#[test]
fn test_name_formats() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut names = NameGenerator::new();

    let probe = names.probe_name(&mut rng);
    let (prefix, suffix) = probe.split_once('-').unwrap();
    assert!(!prefix.is_empty() && !suffix.is_empty());

    let rover = names.rover_name(&mut rng);
    assert!(rover.starts_with("RV-"));
    assert_eq!(rover.len(), 7);
    assert!(rover.ends_with("001"));
    assert!(names.rover_name(&mut rng).ends_with("002"));

    let station = names.station_name(&mut rng);
    assert!(station.contains('-'));
    assert_eq!(names.issued(), (1, 2, 1));

    names.reset();
    assert_eq!(names.issued(), (0, 0, 0));
}

#[test]
fn test_config_from_json_defaults() {
    let config = SimConfig::from_json_str(r#"{"seed": 7, "autonomous_seed_probe": true}"#).unwrap();
    assert_eq!(config.seed, 7);
    assert!(config.autonomous_seed_probe);
    assert_eq!(config.time_scale, 1.0);
    assert_eq!(config.system_center, Position::new(0.0, 0.0));

    assert!(SimConfig::from_json_str("{not json").is_err());
    assert!(SimConfig::from_json_file("/nonexistent/vonneumann.json").is_err());
}

#[test]
fn test_stale_handle_does_not_resolve() {
    let mut world = World::new();
    let probe = spawn_test_probe(&mut world, Position::new(0.0, 0.0), 0.0);
    let id = entity_id(probe);
    assert_eq!(resolve(&world, id), Some(probe));
    world.despawn(probe).unwrap();
    assert_eq!(resolve(&world, id), None);
}
