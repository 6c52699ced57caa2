//! Unit tests for the junction_turn command line.

#[cfg(test)]
mod cli {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};
    use sr_scenario::ScenarioKind;

    use crate::Cli;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("junction_turn").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_run_once() {
        let cli = parse(&[]);
        assert!(!cli.list);
        assert_eq!(cli.repetitions, 1);
        assert_eq!(cli.scenario, ScenarioKind::TurningRightAtSignal);
        assert_eq!(cli.run_output_dir(0), PathBuf::from("output/junction_turn"));
        assert_eq!(cli.run_config(0).timeout_secs, 80.0);
    }

    #[test]
    fn list_flag_parses() {
        assert!(parse(&["--list"]).list);
    }

    #[test]
    fn zero_repetitions_are_rejected() {
        assert!(Cli::try_parse_from(["junction_turn", "--repetitions", "0"]).is_err());
    }

    #[test]
    fn repeated_runs_get_their_own_output_and_seed() {
        let cli = parse(&["--repetitions", "3", "--seed", "7", "--randomize"]);
        assert_eq!(cli.run_output_dir(2), PathBuf::from("output/junction_turn/run_002"));
        assert_eq!(cli.run_seed(0), 7);
        assert_eq!(cli.run_seed(2), 9);

        let fixed = parse(&["--repetitions", "3", "--seed", "7"]);
        assert_eq!(fixed.run_seed(2), 7);
        assert!(!fixed.run_config(2).randomize);
    }
}
