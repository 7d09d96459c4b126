//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::runner::{FloorStats, RunStats};

/// Per-floor averages across every run that reached the floor
#[derive(Debug, Clone, Default, Serialize)]
pub struct FloorSummary {
    pub floor: u32,
    pub samples: u32,
    pub avg_rooms: f64,
    pub avg_doors: f64,
    pub avg_generation_attempts: f64,
    pub fallbacks: u32,
    pub min_boss_distance: Option<i32>,
    pub avg_boss_distance: f64,
    pub avg_enemies: f64,
    pub avg_kills: f64,
    pub avg_casts: f64,
    pub avg_damage_taken: f64,
    pub boss_kill_rate: f64,
    pub deaths: u32,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_survived: u32,
    pub floors_generated: u32,
    pub connectivity_rate: f64,
    pub avg_deepest_floor: f64,
    pub avg_final_gold: f64,
    pub avg_experience: f64,
    pub avg_max_combo: f64,
    pub avg_casts_per_kill: f64,
    pub consumable_drops: u32,
    pub rune_drops: u32,
    pub rooms_abandoned: u32,
    pub floors: Vec<FloorSummary>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean<I: Iterator<Item = f64>>(values: I, count: u32) -> f64 {
    values.sum::<f64>() / count.max(1) as f64
}

fn avg_of(samples: &[&FloorStats], f: impl Fn(&FloorStats) -> f64) -> f64 {
    mean(samples.iter().map(|s| f(*s)), samples.len() as u32)
}

impl FloorSummary {
    fn from_samples(floor: u32, samples: &[&FloorStats]) -> Self {
        let n = samples.len() as u32;
        let boss_distances: Vec<i32> = samples.iter().filter_map(|s| s.boss_distance).collect();

        Self {
            floor,
            samples: n,
            avg_rooms: avg_of(samples, |s| s.rooms as f64),
            avg_doors: avg_of(samples, |s| s.doors as f64),
            avg_generation_attempts: avg_of(samples, |s| s.generation_attempts as f64),
            fallbacks: samples.iter().filter(|s| !s.fully_connected).count() as u32,
            min_boss_distance: boss_distances.iter().min().copied(),
            avg_boss_distance: mean(
                boss_distances.iter().map(|&d| d as f64),
                boss_distances.len() as u32,
            ),
            avg_enemies: avg_of(samples, |s| s.enemies as f64),
            avg_kills: avg_of(samples, |s| s.kills as f64),
            avg_casts: avg_of(samples, |s| s.casts as f64),
            avg_damage_taken: avg_of(samples, |s| s.damage_taken as f64),
            boss_kill_rate: avg_of(samples, |s| if s.boss_killed { 1.0 } else { 0.0 }),
            deaths: samples.iter().filter(|s| s.player_died).count() as u32,
        }
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let all_floors: Vec<&FloorStats> = runs.iter().flat_map(|r| r.floors.iter()).collect();
        let floors_generated = all_floors.len() as u32;

        let connected = all_floors.iter().filter(|f| f.fully_connected).count();
        let total_kills: u32 = all_floors.iter().map(|f| f.kills).sum();
        let total_casts: u32 = all_floors.iter().map(|f| f.casts).sum();

        let mut by_floor: BTreeMap<u32, Vec<&FloorStats>> = BTreeMap::new();
        for &stats in &all_floors {
            by_floor.entry(stats.floor).or_default().push(stats);
        }
        let floors = by_floor
            .iter()
            .map(|(&floor, samples)| FloorSummary::from_samples(floor, samples))
            .collect();

        Self {
            num_runs,
            runs_survived: runs.iter().filter(|r| !r.died).count() as u32,
            floors_generated,
            connectivity_rate: connected as f64 / floors_generated.max(1) as f64,
            avg_deepest_floor: mean(runs.iter().map(|r| r.deepest_floor as f64), num_runs),
            avg_final_gold: mean(runs.iter().map(|r| r.final_gold as f64), num_runs),
            avg_experience: mean(runs.iter().map(|r| r.total_experience as f64), num_runs),
            avg_max_combo: mean(
                runs.iter()
                    .map(|r| r.floors.iter().map(|f| f.max_combo).max().unwrap_or(0) as f64),
                num_runs,
            ),
            avg_casts_per_kill: total_casts as f64 / total_kills.max(1) as f64,
            consumable_drops: all_floors.iter().map(|f| f.consumable_drops).sum(),
            rune_drops: all_floors.iter().map(|f| f.rune_drops).sum(),
            rooms_abandoned: all_floors.iter().map(|f| f.rooms_abandoned).sum(),
            floors,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} survived, {} floors generated\n\n",
            self.num_runs, self.runs_survived, self.floors_generated
        ));

        report.push_str("── GENERATION ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Fully Connected:     {:.1}%\n",
            self.connectivity_rate * 100.0
        ));
        report.push_str("  Floor  Rooms  Doors  Attempts  Fallbacks  Boss Dist (min/avg)\n");
        report.push_str("  ─────  ─────  ─────  ────────  ─────────  ───────────────────\n");
        for f in &self.floors {
            let min_dist = f
                .min_boss_distance
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            report.push_str(&format!(
                "  {:5}  {:5.1}  {:5.1}  {:8.2}  {:9}  {:>6} / {:.1}\n",
                f.floor,
                f.avg_rooms,
                f.avg_doors,
                f.avg_generation_attempts,
                f.fallbacks,
                min_dist,
                f.avg_boss_distance
            ));
        }
        report.push('\n');

        let fought = self.floors.iter().any(|f| f.avg_casts > 0.0);
        if fought {
            report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
            report.push_str(&format!(
                "  Avg Deepest Floor:   {:.1}\n",
                self.avg_deepest_floor
            ));
            report.push_str(&format!(
                "  Avg Casts per Kill:  {:.2}\n",
                self.avg_casts_per_kill
            ));
            report.push_str(&format!("  Avg Max Combo:       {:.1}\n", self.avg_max_combo));
            report.push_str(&format!("  Avg Gold per Run:    {:.0}\n", self.avg_final_gold));
            report.push_str(&format!("  Avg XP per Run:      {:.0}\n", self.avg_experience));
            report.push_str(&format!(
                "  Drops:               {} consumables, {} runes\n",
                self.consumable_drops, self.rune_drops
            ));
            report.push_str(&format!(
                "  Rooms Abandoned:     {}\n\n",
                self.rooms_abandoned
            ));

            report.push_str("  Floor  Enemies  Kills  Casts  Dmg Taken  Boss Kill  Deaths\n");
            report.push_str("  ─────  ───────  ─────  ─────  ─────────  ─────────  ──────\n");
            for f in &self.floors {
                let bar: String = "█".repeat((f.boss_kill_rate * 10.0) as usize);
                report.push_str(&format!(
                    "  {:5}  {:7.1}  {:5.1}  {:5.0}  {:9.0}  {:>8.0}%  {:6} {}\n",
                    f.floor,
                    f.avg_enemies,
                    f.avg_kills,
                    f.avg_casts,
                    f.avg_damage_taken,
                    f.boss_kill_rate * 100.0,
                    f.deaths,
                    bar
                ));
            }
            report.push('\n');
        }

        report.push_str("── ASSESSMENT ───────────────────────────────────────────────────\n");
        let fallbacks: u32 = self.floors.iter().map(|f| f.fallbacks).sum();
        if fallbacks > 0 {
            report.push_str(&format!(
                "  ⚠️  {} floor(s) kept a disconnected fallback layout\n",
                fallbacks
            ));
        }
        for f in &self.floors {
            if f.floor == 1 && f.min_boss_distance.is_some_and(|d| d < 10) {
                report.push_str("  ⚠️  Floor 1 boss closer than 10 tiles to the entrance\n");
            }
            if f.samples > 0 && f.deaths as f64 / f.samples as f64 > 0.25 {
                report.push_str(&format!(
                    "  ⚠️  Floor {} kills {:.0}% of arriving runs\n",
                    f.floor,
                    f.deaths as f64 / f.samples as f64 * 100.0
                ));
            }
        }
        if fought && self.avg_casts_per_kill > 20.0 {
            report.push_str("  ⚠️  Fights drag on - spell damage too low?\n");
        }
        if fallbacks == 0 {
            report.push_str("  Every floor fully connected\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
