//! Strategies command - list the evaluation strategies.

use game_search::evaluate::EvaluationStrategy;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct StrategiesArgs {}

impl Command for StrategiesArgs {
    fn execute(self) {
        let default = EvaluationStrategy::default();
        for strategy in EvaluationStrategy::ALL {
            let marker = if strategy == default { " (default)" } else { "" };
            println!("{}{}", strategy, marker);
        }
    }
}
