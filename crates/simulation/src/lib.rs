//! Grid-city simulation core.
//!
//! A layered tile map with capability-composed tile behavior, three
//! independent utility coverage flood-fills (power, water, sewage),
//! stochastic zone growth gated on road access, and A* road routing feeding
//! a daily labor exchange that accumulates road usage.
//!
//! The crate is headless and single-threaded. Hosts either drive
//! [`sim::Simulation::tick`] from their own loop or add [`CityCorePlugin`]
//! to a Bevy app to run it from `FixedUpdate`. Rendering, input tools,
//! audio, and save-file containers are collaborator concerns; they interact
//! with this core only through the map accessors and the derived read-only
//! state on [`sim::Simulation`].

use bevy::prelude::*;

pub mod ascii_map;
pub mod capabilities;
pub mod config;
pub mod grid;
pub mod growth;
pub mod labor;
pub mod map_save;
pub mod pathfind;
pub mod power;
pub mod sewer;
pub mod sim;
pub mod terrain;
pub mod tiles;
pub mod water;


use sim::Simulation;

/// Registers the simulation resource and drives it from `FixedUpdate`.
pub struct CityCorePlugin;

impl Plugin for CityCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Simulation>()
            .add_systems(FixedUpdate, advance_simulation);
    }
}

/// Feed fixed-step time into the simulation's tick accumulator.
pub fn advance_simulation(time: Res<Time>, mut sim: ResMut<Simulation>) {
    sim.tick(time.delta_secs());
}

#[cfg(test)]
mod plugin_tests {
    use super::*;
    use crate::config::{MAP_HEIGHT, MAP_WIDTH};

    #[test]
    fn test_plugin_registers_simulation() {
        let mut app = App::new();
        app.add_plugins(CityCorePlugin);
        let sim = app.world().resource::<Simulation>();
        assert_eq!(sim.map.width(), MAP_WIDTH);
        assert_eq!(sim.map.height(), MAP_HEIGHT);
        assert_eq!(sim.ticks(), 0);
    }
}
