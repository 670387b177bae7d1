//! Shared utilities for CLI commands.

use std::str::FromStr;

use hinode_game_theory::game_theory::{
    EvictLowest, EvictionPolicy, GameNode, GameTheory, NodeId, RandomTieBreak, RecordedEntry,
    SearchConfig,
};
use hinode_game_theory::games::{MultiplierNode, NimNode};
use structopt::StructOpt;

#[derive(Clone, Copy, Debug)]
pub enum GameKind {
    Multiplier,
    Nim,
}

impl FromStr for GameKind {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiplier" => Ok(GameKind::Multiplier),
            "nim" => Ok(GameKind::Nim),
            _ => Err("invalid game; options are: multiplier, nim"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum EvictionKind {
    Lowest,
    Random,
}

impl FromStr for EvictionKind {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowest" => Ok(EvictionKind::Lowest),
            "random" => Ok(EvictionKind::Random),
            _ => Err("invalid eviction policy; options are: lowest, random"),
        }
    }
}

/// Arguments shared by every command.
#[derive(StructOpt)]
pub struct GameArgs {
    #[structopt(short, long, default_value = "multiplier")]
    pub game: GameKind,
    #[structopt(
        long,
        default_value = "0",
        help = "Starting value (multiplier) or pile size (nim)"
    )]
    pub start: u64,
    #[structopt(long, default_value = "3", help = "Moves per position (multiplier)")]
    pub branching: u64,
    #[structopt(
        long,
        default_value = "100",
        help = "Values above this end the game (multiplier)"
    )]
    pub threshold: u64,
    #[structopt(long, default_value = "3", help = "Most objects one move can take (nim)")]
    pub max_take: u32,
    #[structopt(short, long, default_value = "3", allow_hyphen_values = true)]
    pub depth: i32,
    #[structopt(short, long, default_value = "5")]
    pub record_count: usize,
    #[structopt(short, long, default_value = "lowest")]
    pub eviction: EvictionKind,
    #[structopt(long, help = "Seed for `--eviction random`")]
    pub seed: Option<u64>,
}

impl GameArgs {
    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.depth,
            record_result_count: self.record_count,
        }
    }

    pub fn multiplier_start(&self) -> MultiplierNode {
        MultiplierNode::with_rules(self.start, self.branching, self.threshold)
    }

    pub fn nim_start(&self) -> NimNode {
        let pile = self.start.min(u32::MAX as u64) as u32;
        NimNode::new(pile, self.max_take)
    }

    pub fn build_engine<N: GameNode>(&self) -> GameTheory<N, Eviction> {
        let policy = match (self.eviction, self.seed) {
            (EvictionKind::Lowest, _) => Eviction::Lowest(EvictLowest),
            (EvictionKind::Random, Some(seed)) => Eviction::Random(RandomTieBreak::seeded(seed)),
            (EvictionKind::Random, None) => Eviction::Random(RandomTieBreak::new()),
        };
        let mut engine = GameTheory::with_policy(policy);
        engine.set_config(self.config());
        engine
    }
}

/// Eviction policy picked on the command line.
pub enum Eviction {
    Lowest(EvictLowest),
    Random(RandomTieBreak),
}

impl EvictionPolicy for Eviction {
    fn select_eviction(&mut self, entries: &[RecordedEntry]) -> usize {
        match self {
            Eviction::Lowest(policy) => policy.select_eviction(entries),
            Eviction::Random(policy) => policy.select_eviction(entries),
        }
    }
}

pub(crate) fn describe<N: GameNode>(engine: &GameTheory<N, Eviction>, id: NodeId) -> String {
    match engine.graph().node(id) {
        Some(node) => format!("{} {:?} (score {})", id, node, node.evaluate()),
        None => format!("{} <unknown>", id),
    }
}

pub(crate) fn print_stats<N: GameNode>(engine: &GameTheory<N, Eviction>) {
    let stats = engine.stats();
    println!(
        "evaluations: {}, visited nodes: {}, distinct states: {}, recorded: {}, merged: {}, discarded: {}, evicted: {}, frontier steps: {}",
        stats.evaluations(),
        stats.visited_nodes(),
        engine.graph().len(),
        stats.recorded(),
        stats.merged(),
        stats.discarded(),
        stats.evicted(),
        stats.frontier_steps()
    );
}
