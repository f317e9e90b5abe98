//! Display names for spawned units.
//!
//! Names are cosmetic; entity identity is the hecs handle. Counters are owned
//! by the generator and reset with it.

use rand::Rng;

static PREFIXES: &[&str] = &[
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Theta", "Omega", "Nova", "Pulsar",
    "Quasar", "Nebula", "Comet", "Stellar", "Cosmic", "Astro", "Pioneer", "Voyager", "Explorer",
    "Seeker", "Wanderer", "Pathfinder", "Echo", "Apex", "Zenith", "Horizon", "Vector", "Vertex",
    "Helix", "Axis",
];

static SUFFIXES: &[&str] = &[
    "Prime", "One", "Zero", "Core", "Node", "Unit", "Mark", "Gen", "X", "V", "IX", "VII", "III",
    "II",
];

static NUMBERS: &[&str] = &[
    "01", "02", "03", "04", "05", "07", "09", "11", "13", "17", "23", "42", "77", "99",
];

static STATION_NAMES: &[&str] = &[
    "Citadel",
    "Bastion",
    "Sanctuary",
    "Nexus",
    "Hub",
    "Forge",
    "Foundry",
    "Outpost",
    "Haven",
    "Beacon",
    "Waystation",
    "Stronghold",
    "Spire",
];

static GREEK_LETTERS: &[&str] = &[
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta",
];

/// Name of the probe placed at expedition start.
pub const SEED_PROBE_NAME: &str = "Pioneer-Prime";

fn pick<'a>(rng: &mut impl Rng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Generates probe, rover and station names and counts how many of each it issued.
#[derive(Debug, Clone, Default)]
pub struct NameGenerator {
    probes: u32,
    rovers: u32,
    stations: u32,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Prefix-Suffix` or `Prefix-NN`, evenly.
    pub fn probe_name(&mut self, rng: &mut impl Rng) -> String {
        self.probes += 1;
        let prefix = pick(rng, PREFIXES);
        if rng.gen_bool(0.5) {
            format!("{prefix}-{}", pick(rng, SUFFIXES))
        } else {
            format!("{prefix}-{}", pick(rng, NUMBERS))
        }
    }

    /// `RV-<letter><counter>`, e.g. `RV-K007`.
    pub fn rover_name(&mut self, rng: &mut impl Rng) -> String {
        self.rovers += 1;
        let letter = char::from(b'A' + rng.gen_range(0..26u8));
        format!("RV-{letter}{:03}", self.rovers)
    }

    /// `<Base>-<Greek letter>`, e.g. `Forge-Delta`.
    pub fn station_name(&mut self, rng: &mut impl Rng) -> String {
        self.stations += 1;
        format!(
            "{}-{}",
            pick(rng, STATION_NAMES),
            pick(rng, GREEK_LETTERS)
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn issued(&self) -> (u32, u32, u32) {
        (self.probes, self.rovers, self.stations)
    }
}
