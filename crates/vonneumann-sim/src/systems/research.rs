//! Research system: station upgrades paid up front, completed on a timer.

use hecs::{Entity, World};
use tracing::info;

use vonneumann_core::components::Station;
use vonneumann_core::constants::{research_cost, research_time};
use vonneumann_core::enums::ResearchKind;
use vonneumann_core::events::SimEvent;

use crate::effects::WorldEffects;
use crate::handle::entity_id;

/// Whether `station` could start `research` right now.
pub fn can_research(station: &Station, research: ResearchKind) -> bool {
    !station.build.is_building
        && !station.research.is_researching
        && station.matter >= research_cost(research)
}

/// Pay for and begin research. Rejected if busy or short of matter.
pub fn start_research(station: &mut Station, research: ResearchKind) -> bool {
    if !can_research(station, research) {
        return false;
    }
    station.matter = (station.matter - research_cost(research)).max(0.0);
    station.research.is_researching = true;
    station.research.progress = 0.0;
    station.research.target = Some(research);
    info!(station = %station.name, ?research, "research started");
    true
}

pub fn run<E: WorldEffects + ?Sized>(
    world: &mut World,
    dt: f64,
    effects: &mut E,
    events: &mut Vec<SimEvent>,
) {
    let mut completed: Vec<(Entity, ResearchKind)> = Vec::new();

    for (entity, station) in world.query_mut::<&mut Station>() {
        let state = &mut station.research;
        if !state.is_researching {
            continue;
        }
        let Some(research) = state.target else {
            *state = Default::default();
            continue;
        };

        state.progress += dt / research_time(research);
        if state.progress >= 1.0 {
            *state = Default::default();
            info!(station = %station.name, ?research, "research complete");
            completed.push((entity, research));
        }
    }

    for (station, research) in completed {
        events.push(SimEvent::ResearchComplete {
            station: entity_id(station),
            research,
        });
        effects.research_complete(world, station, research);
    }
}
