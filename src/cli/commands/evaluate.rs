//! Evaluate command - run one bounded search from the start position.

use hinode_game_theory::game_theory::GameNode;
use structopt::StructOpt;

use super::util::{describe, print_stats, GameArgs, GameKind};
use super::Command;

#[derive(StructOpt)]
pub struct EvaluateArgs {
    #[structopt(flatten)]
    pub game: GameArgs,
}

impl Command for EvaluateArgs {
    fn execute(self) {
        match self.game.game {
            GameKind::Multiplier => run(&self.game, self.game.multiplier_start()),
            GameKind::Nim => run(&self.game, self.game.nim_start()),
        }
    }
}

fn run<N: GameNode>(args: &GameArgs, start: N) {
    let mut engine = args.build_engine::<N>();
    engine.set_current_node(start);

    match engine.search() {
        Ok(results) => {
            if results.is_empty() {
                println!("No positions were recorded.");
            }
            for (rank, id) in results.iter().enumerate() {
                println!("{}. {}", rank + 1, describe(&engine, *id));
            }
            if let Some(best) = engine.best_node() {
                println!("best line ends at {}", describe(&engine, best));
            }
            print_stats(&engine);
        }
        Err(err) => eprintln!("Failed to evaluate: {}", err),
    }
}
