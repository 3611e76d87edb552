use super::*;

#[test]
fn parses_analyze_with_defaults() {
    let cli = Cli::try_parse_from(["ytinsight-cli", "analyze", "https://youtu.be/dQw4w9WgXcQ"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            ref url,
            max_comments: None,
            compact: false,
        }) if url == "https://youtu.be/dQw4w9WgXcQ"
    ));
}

#[test]
fn parses_analyze_with_flags() {
    let cli = Cli::try_parse_from([
        "ytinsight-cli",
        "analyze",
        "dQw4w9WgXcQ",
        "--max-comments",
        "120",
        "--compact",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            max_comments: Some(120),
            compact: true,
            ..
        })
    ));
}

#[test]
fn rejects_zero_max_comments() {
    let result = Cli::try_parse_from([
        "ytinsight-cli",
        "analyze",
        "dQw4w9WgXcQ",
        "--max-comments",
        "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn analyze_requires_url() {
    assert!(Cli::try_parse_from(["ytinsight-cli", "analyze"]).is_err());
}

#[test]
fn parses_video_id_command() {
    let cli = Cli::try_parse_from(["ytinsight-cli", "video-id", "https://youtu.be/abc"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::VideoId { ref url }) if url == "https://youtu.be/abc"
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["ytinsight-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
