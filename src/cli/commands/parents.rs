//! Parents command - explain how the best terminal position was reached.

use hinode_game_theory::game_theory::{GameNode, NodeId};
use structopt::StructOpt;

use super::util::{describe, GameArgs, GameKind};
use super::Command;

#[derive(StructOpt)]
pub struct ParentsArgs {
    #[structopt(flatten)]
    pub game: GameArgs,
    #[structopt(long, default_value = "10", help = "Most paths to print")]
    pub max_paths: usize,
}

impl Command for ParentsArgs {
    fn execute(self) {
        match self.game.game {
            GameKind::Multiplier => run(&self, self.game.multiplier_start()),
            GameKind::Nim => run(&self, self.game.nim_start()),
        }
    }
}

fn run<N: GameNode>(args: &ParentsArgs, start: N) {
    let mut engine = args.game.build_engine::<N>();

    let results = match engine.search_until_terminal(start) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("Failed to search until terminal: {}", err);
            return;
        }
    };

    let graph = engine.graph();
    let best = results
        .iter()
        .filter_map(|&id| graph.node(id).map(|node| (id, node.evaluate())))
        .fold(None, |best: Option<(NodeId, f32)>, (id, score)| match best {
            Some((_, best_score)) if best_score > score => best,
            _ => Some((id, score)),
        });

    let target = match best {
        Some((target, _)) => target,
        None => {
            println!("No terminal positions were found.");
            return;
        }
    };

    println!("paths to {}", describe(&engine, target));
    let paths = graph.parent_enumerable(target).root_paths();
    for path in paths.iter().take(args.max_paths) {
        let line: Vec<String> = path
            .iter()
            .map(|id| match graph.node(*id) {
                Some(node) => format!("{:?}", node),
                None => id.to_string(),
            })
            .collect();
        println!("  {}", line.join(" -> "));
    }
    if paths.len() > args.max_paths {
        println!("  ... {} more", paths.len() - args.max_paths);
    }
}
