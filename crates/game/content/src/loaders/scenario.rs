//! Scenario loader.
//!
//! Scenarios are RON files describing one level: arena, obstacles, spawn
//! points, units and pickups.

use std::collections::HashSet;
use std::path::Path;

use tactics_core::Team;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for [`Scenario`] files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        Self::validate(&scenario)?;
        Ok(scenario)
    }

    fn validate(scenario: &Scenario) -> LoadResult<()> {
        anyhow::ensure!(
            !scenario.arena.is_empty(),
            "arena bounds of '{}' enclose no area",
            scenario.name
        );

        for team in [Team::Player, Team::Ai] {
            anyhow::ensure!(
                scenario.team_size(team) > 0,
                "scenario '{}' has no {} units",
                scenario.name,
                team
            );
        }

        for obstacle in &scenario.obstacles {
            anyhow::ensure!(
                obstacle.radius > 0.0,
                "obstacle at ({}, {}) has non-positive radius",
                obstacle.center.x,
                obstacle.center.z
            );
        }

        for unit in &scenario.units {
            if let Some(position) = unit.position {
                anyhow::ensure!(
                    scenario.arena.contains(position),
                    "unit '{}' starts outside the arena",
                    unit.name
                );
            }
            anyhow::ensure!(
                unit.stats.max_health > 0.0,
                "unit '{}' has no health",
                unit.name
            );
        }

        for point in scenario
            .spawns
            .player
            .iter()
            .chain(scenario.spawns.ai.iter())
        {
            anyhow::ensure!(
                scenario.arena.contains(*point),
                "spawn point ({}, {}) lies outside the arena",
                point.x,
                point.z
            );
        }

        let mut ids = HashSet::new();
        for pickup in &scenario.pickups {
            anyhow::ensure!(ids.insert(pickup.id), "duplicate pickup id {}", pickup.id);
        }

        Ok(())
    }
}
