mod cli;

use cli::commands::Command;
use cli::GameTheoryCli;
use structopt::StructOpt;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    hinode_game_theory::instrumentation::init_tracing();

    GameTheoryCli::from_args().execute();

    #[cfg(feature = "instrumentation")]
    hinode_game_theory::instrumentation::print_timing_statistics();
}
