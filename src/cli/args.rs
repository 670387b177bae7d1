//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    evaluate::EvaluateArgs, parents::ParentsArgs, until_terminal::UntilTerminalArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "game-theory",
    about = "Exhaustive best-value game-tree search over a graph of game states"
)]
pub enum GameTheoryCli {
    #[structopt(
        name = "evaluate",
        about = "Search `--depth` plies (default: 3) below the start position of the selected `--game` and print the best `--record-count` (default: 5) leaves, highest score first."
    )]
    Evaluate(EvaluateArgs),
    #[structopt(
        name = "until-terminal",
        about = "Keep re-seeding the search from non-terminal results until only terminal positions remain, then print every terminal result. Set `RUST_LOG=info` to follow each frontier step."
    )]
    UntilTerminal(UntilTerminalArgs),
    #[structopt(
        name = "parents",
        about = "Search until terminal, then print every path from the start position to the best terminal result by walking the parent links."
    )]
    Parents(ParentsArgs),
}

impl crate::cli::commands::Command for GameTheoryCli {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Evaluate(cmd),
            UntilTerminal(cmd),
            Parents(cmd),
        }
    }
}
