//! Until-terminal command - search until every recorded position is terminal.

use hinode_game_theory::game_theory::GameNode;
use log::info;
use structopt::StructOpt;

use super::util::{describe, print_stats, GameArgs, GameKind};
use super::Command;

#[derive(StructOpt)]
pub struct UntilTerminalArgs {
    #[structopt(flatten)]
    pub game: GameArgs,
}

impl Command for UntilTerminalArgs {
    fn execute(self) {
        match self.game.game {
            GameKind::Multiplier => run(&self.game, self.game.multiplier_start()),
            GameKind::Nim => run(&self.game, self.game.nim_start()),
        }
    }
}

fn run<N: GameNode>(args: &GameArgs, start: N) {
    let mut engine = args.build_engine::<N>();
    let config = engine.config();

    let mut step_count = 0;
    let outcome = engine.evaluate_until_terminal_with(
        start,
        config.depth,
        config.record_result_count,
        |step| {
            step_count += 1;
            info!(
                "step {}: {} terminal results, frontier depth {}",
                step_count,
                step.results.len(),
                step.frontier_depth
            );
        },
    );

    match outcome {
        Ok(results) => {
            if results.is_empty() {
                println!("No terminal positions were found.");
            }
            for id in results.iter() {
                println!("{}", describe(&engine, *id));
            }
            print_stats(&engine);
        }
        Err(err) => eprintln!("Failed to search until terminal: {}", err),
    }
}
