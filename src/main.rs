mod cli;

use cli::commands::Command;
use cli::GameSearch;
use structopt::StructOpt;

fn main() {
    #[cfg(feature = "instrumentation")]
    cli::init_tracing();
    #[cfg(not(feature = "instrumentation"))]
    env_logger::init();

    GameSearch::from_args().execute();
}
