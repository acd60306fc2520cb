use clap::Parser;
use token_sampler::cli::{Cli, Commands, ParamArgs};
use token_sampler::StrategyKind;

#[test]
fn test_parse_sample_with_k() {
    let cli = Cli::try_parse_from(["token-sampler", "sample", "top-k", "-k", "4"]).unwrap();

    match cli.command {
        Commands::Sample(args) => {
            assert_eq!(args.method, StrategyKind::TopK);
            assert_eq!(args.params.k, Some(4));
            assert_eq!(args.params.p, None);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_sample_by_menu_label() {
    let cli =
        Cli::try_parse_from(["token-sampler", "sample", "High Temperature Sampling"]).unwrap();

    match cli.command {
        Commands::Sample(args) => {
            assert_eq!(args.method, StrategyKind::HighTemperature);
            assert_eq!(args.params, ParamArgs::default());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_stratified_categories() {
    let cli = Cli::try_parse_from([
        "token-sampler",
        "sample",
        "stratified",
        "--category",
        "Adventure",
        "-c",
        "Relaxation",
        "--per-category",
        "2",
    ])
    .unwrap();

    match cli.command {
        Commands::Sample(args) => {
            assert_eq!(args.params.categories, vec!["Adventure", "Relaxation"]);
            assert_eq!(args.params.per_category, Some(2));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_simulate_defaults() {
    let cli = Cli::try_parse_from(["token-sampler", "simulate", "cluster"]).unwrap();

    match cli.command {
        Commands::Simulate(args) => {
            assert_eq!(args.method, StrategyKind::Cluster);
            assert_eq!(args.runs, 1000);
            assert_eq!(args.params.clusters, None);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "token-sampler",
        "simulate",
        "best-of-n",
        "-n",
        "3",
        "--runs",
        "50",
        "--json",
        "--seed",
        "7",
        "-vv",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.seed, Some(7));
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Commands::Simulate(args) => {
            assert_eq!(args.params.n, Some(3));
            assert_eq!(args.runs, 50);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_unknown_method_fails() {
    let result = Cli::try_parse_from(["token-sampler", "sample", "nucleus"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_bare_commands() {
    for (arg, expected) in [("methods", "Methods"), ("vocab", "Vocab"), ("interactive", "Interactive")] {
        let cli = Cli::try_parse_from(["token-sampler", arg]).unwrap();
        assert_eq!(format!("{:?}", cli.command), expected);
    }
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
