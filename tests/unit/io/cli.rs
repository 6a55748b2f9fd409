//! Tests for command-line parsing and session orchestration

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lozenge_cftp::AlgorithmError;
    use lozenge_cftp::io::cli::{Cli, SampleRunner};
    use lozenge_cftp::io::configuration::{
        DEFAULT_MAX_ROUNDS, DEFAULT_OUTPUT, DEFAULT_SEED, DEFAULT_SIDE_A, DEFAULT_SIDE_B,
        DEFAULT_SIDE_C,
    };
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn quiet_cli(args: &[&str], output: &Path) -> Cli {
        let output = output.to_string_lossy().to_string();
        let mut full = vec!["lozenge-cftp", "--quiet", "--output", output.as_str()];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    // Tests that an empty command line falls back to configured defaults
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["lozenge-cftp"]);

        assert_eq!(cli.side_a, DEFAULT_SIDE_A);
        assert_eq!(cli.side_b, DEFAULT_SIDE_B);
        assert_eq!(cli.side_c, DEFAULT_SIDE_C);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.max_rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cli.uniformity, None);
        assert!(!cli.visualize);
        assert!(!cli.count);
        assert!(!cli.no_verify);
        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
    }

    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "lozenge-cftp",
            "-a",
            "3",
            "-b",
            "4",
            "-c",
            "5",
            "--seed",
            "99",
            "--max-rounds",
            "12",
            "--output",
            "out/hex.png",
            "--visualize",
            "--uniformity",
            "500",
            "--no-verify",
            "--quiet",
        ]);

        assert_eq!((cli.side_a, cli.side_b, cli.side_c), (3, 4, 5));
        assert_eq!(cli.seed, 99);
        assert_eq!(cli.output, PathBuf::from("out/hex.png"));
        assert_eq!(cli.uniformity, Some(500));
        assert!(cli.visualize);
        assert!(!cli.should_show_progress());

        let config = cli.sampler_config();
        assert_eq!(config.max_rounds, Some(12));
        assert!(!config.verify_coupling);
    }

    // Zero rounds lifts the cap entirely
    #[test]
    fn test_zero_max_rounds_is_uncapped() {
        let cli = Cli::parse_from(["lozenge-cftp", "--max-rounds", "0"]);
        assert_eq!(cli.sampler_config().max_rounds, None);

        let cli = Cli::parse_from(["lozenge-cftp", "-r", "1"]);
        assert_eq!(cli.sampler_config().max_rounds, Some(1));
    }

    #[test]
    fn test_cli_rejects_conflicting_modes() {
        let result = Cli::try_parse_from(["lozenge-cftp", "--count", "--uniformity", "10"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["lozenge-cftp", "-a", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_visualization_path() {
        assert_eq!(
            SampleRunner::get_visualization_path(Path::new("renders/hex.png")),
            PathBuf::from("renders/hex_rounds.gif")
        );
        assert_eq!(
            SampleRunner::get_visualization_path(Path::new("tiling.png")),
            PathBuf::from("tiling_rounds.gif")
        );
    }

    #[test]
    fn test_process_writes_png() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = temp_dir.path().join("nested").join("hex.png");
        let cli = quiet_cli(&["-a", "2", "-b", "3", "-c", "2"], &output);

        SampleRunner::new(cli).process().expect("Failed to sample");

        assert!(output.exists());
        assert!(!temp_dir.path().join("nested").join("hex_rounds.gif").exists());
    }

    #[test]
    fn test_process_writes_rounds_gif() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = temp_dir.path().join("hex.png");
        let cli = quiet_cli(&["-a", "2", "-b", "2", "-c", "2", "--visualize"], &output);

        SampleRunner::new(cli).process().expect("Failed to sample");

        assert!(output.exists());
        assert!(temp_dir.path().join("hex_rounds.gif").exists());
    }

    #[test]
    fn test_process_rejects_zero_side() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = temp_dir.path().join("hex.png");
        let cli = quiet_cli(&["-b", "0"], &output);

        let result = SampleRunner::new(cli).process();

        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidGeometry { side: "b", .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_process_times_out() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = temp_dir.path().join("hex.png");
        let cli = quiet_cli(&["--max-rounds", "2"], &output);

        let result = SampleRunner::new(cli).process();

        assert!(matches!(
            result,
            Err(AlgorithmError::SamplingTimeout { rounds: 2, .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_process_count_mode() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = temp_dir.path().join("hex.png");
        let cli = quiet_cli(&["-a", "3", "-b", "3", "-c", "3", "--count"], &output);

        SampleRunner::new(cli).process().expect("Count should be confirmed");

        assert!(!output.exists());
    }

    #[test]
    fn test_process_uniformity_mode() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = temp_dir.path().join("hex.png");

        let cli = quiet_cli(&["-a", "2", "-b", "1", "-c", "1", "-u", "300"], &output);
        SampleRunner::new(cli).process().expect("Uniform samples should pass");

        let cli = quiet_cli(&["-a", "2", "-b", "2", "-c", "2", "-u", "10"], &output);
        assert!(matches!(
            SampleRunner::new(cli).process(),
            Err(AlgorithmError::InvalidParameter { .. })
        ));

        assert!(!output.exists());
    }
}
