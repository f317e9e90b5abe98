//! Merge detection and execution: three nearby probes become a station.
//!
//! Cluster membership is the first three probes found in query order around
//! a centre probe, not the three closest. This tie-break is observable in
//! play and kept as is.

use std::collections::HashSet;

use hecs::{Entity, World};
use tracing::info;

use vonneumann_core::components::{Probe, Station};
use vonneumann_core::constants::{MERGE_CLUSTER_SIZE, MERGE_RADIUS};
use vonneumann_core::events::SimEvent;
use vonneumann_core::types::Position;

use crate::effects::WorldEffects;
use crate::handle::entity_id;
use crate::stats::GameStats;

/// Three probes eligible to merge.
pub type Cluster = [Entity; MERGE_CLUSTER_SIZE];

fn probe_positions(world: &World) -> Vec<(Entity, Position)> {
    world
        .query::<(&Position, &Probe)>()
        .iter()
        .map(|(entity, (pos, _))| (entity, *pos))
        .collect()
}

/// The centre followed by every other probe within `MERGE_RADIUS`, truncated to three.
fn cluster_around(
    probes: &[(Entity, Position)],
    center: Entity,
    at: &Position,
) -> Option<Cluster> {
    let mut members = vec![center];
    members.extend(
        probes
            .iter()
            .filter(|(other, pos)| *other != center && at.distance_to(pos) <= MERGE_RADIUS)
            .map(|(other, _)| *other),
    );
    members.truncate(MERGE_CLUSTER_SIZE);
    members.try_into().ok()
}

/// Every distinct mergeable cluster, one per unordered trio.
pub fn find_mergeable_clusters(world: &World) -> Vec<Cluster> {
    let probes = probe_positions(world);
    let mut seen: HashSet<[u64; MERGE_CLUSTER_SIZE]> = HashSet::new();
    let mut clusters = Vec::new();

    for (center, at) in &probes {
        let Some(cluster) = cluster_around(&probes, *center, at) else {
            continue;
        };
        let mut key = cluster.map(entity_id);
        key.sort_unstable();
        if seen.insert(key) {
            clusters.push(cluster);
        }
    }
    clusters
}

/// The cluster centred on `probe`, if at least two other probes are in range.
pub fn probe_cluster(world: &World, probe: Entity) -> Option<Cluster> {
    let at = *world.get::<&Position>(probe).ok()?;
    if world.get::<&Probe>(probe).is_err() {
        return None;
    }
    cluster_around(&probe_positions(world), probe, &at)
}

pub fn can_merge(world: &World, probe: Entity) -> bool {
    probe_cluster(world, probe).is_some()
}

/// Replace the three probes of `cluster` with one station at their centroid.
///
/// The station receives `min(sum, capacity)`; matter above capacity is lost.
/// Returns the new station, or `None` if any member is no longer a probe.
pub fn execute_merge<E: WorldEffects + ?Sized>(
    world: &mut World,
    effects: &mut E,
    stats: &mut GameStats,
    events: &mut Vec<SimEvent>,
    cluster: &[Entity],
) -> Option<Entity> {
    let distinct: HashSet<Entity> = cluster.iter().copied().collect();
    if cluster.len() != MERGE_CLUSTER_SIZE || distinct.len() != MERGE_CLUSTER_SIZE {
        return None;
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut total_matter = 0.0;
    for &member in cluster {
        let pos = *world.get::<&Position>(member).ok()?;
        let matter = world.get::<&Probe>(member).ok()?.matter;
        sum_x += pos.x;
        sum_y += pos.y;
        total_matter += matter;
    }
    let n = MERGE_CLUSTER_SIZE as f64;
    let centroid = Position::new(sum_x / n, sum_y / n);

    for &member in cluster {
        effects.remove_entity(world, member);
    }
    let station = effects.spawn_station(world, centroid, total_matter);
    stats.stations_formed += 1;

    let matter = world
        .get::<&Station>(station)
        .map(|s| s.matter)
        .unwrap_or_default();
    info!(
        station = entity_id(station),
        matter,
        discarded = (total_matter - matter).max(0.0),
        "probes merged into station"
    );
    events.push(SimEvent::StationFormed {
        station: entity_id(station),
        matter,
    });
    Some(station)
}
