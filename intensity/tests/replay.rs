use clap::Parser as _;
use intensity::{BaseArgs, Commands, OutputConfig, OutputFormat, demo, replay};
use intensity_core::IntensityMap;
use rstest::*;

const SCRIPT: &str = r#"[
    {"op": "add", "from": 10, "to": 30, "amount": 1},
    {"op": "add", "from": 20, "to": 40, "amount": 1},
    {"op": "add", "from": 10, "to": 40, "amount": -1},
    {"op": "add", "from": 10, "to": 40, "amount": -1}
]"#;

#[fixture]
fn settings() -> OutputConfig {
    OutputConfig::default()
}

fn lines(buffer: Vec<u8>) -> Vec<String> {
    String::from_utf8(buffer)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[rstest]
fn replays_every_step(settings: OutputConfig) {
    let ops = replay::read_script(SCRIPT.as_bytes()).unwrap();
    let mut out = Vec::new();
    let map = replay::replay(ops, &settings, &mut out).unwrap();

    assert_eq!(
        lines(out),
        vec![
            "[[10,1],[30,0]]",
            "[[10,1],[20,2],[30,1],[40,0]]",
            "[[20,1],[30,0]]",
            "[[10,-1],[20,0],[30,-1],[40,0]]",
        ]
    );
    assert_eq!(map.dump(), vec![(10, -1), (20, 0), (30, -1), (40, 0)]);
}

#[rstest]
fn replays_final_only(mut settings: OutputConfig) {
    settings.every_step = false;
    let ops = replay::read_script(SCRIPT.as_bytes()).unwrap();
    let mut out = Vec::new();
    replay::replay(ops, &settings, &mut out).unwrap();

    assert_eq!(lines(out), vec!["[[10,-1],[20,0],[30,-1],[40,0]]"]);
}

#[rstest]
fn empty_script_writes_empty_state(settings: OutputConfig) {
    let ops = replay::read_script("[]".as_bytes()).unwrap();
    let mut out = Vec::new();
    replay::replay(ops, &settings, &mut out).unwrap();

    assert_eq!(lines(out), vec!["[]"]);
}

#[rstest]
fn pretty_output_is_json(mut settings: OutputConfig) {
    settings.format = OutputFormat::Pretty;
    settings.every_step = false;
    let ops = replay::read_script(SCRIPT.as_bytes()).unwrap();
    let mut out = Vec::new();
    let map = replay::replay(ops, &settings, &mut out).unwrap();

    let parsed = serde_json::from_slice::<IntensityMap>(&out).unwrap();
    assert_eq!(parsed, map);
}

#[rstest]
#[case::unknown_op(r#"[{"op": "mul", "from": 0, "to": 1, "amount": 1}]"#)]
#[case::missing_field(r#"[{"op": "add", "from": 0, "to": 1}]"#)]
#[case::not_a_list(r#"{"op": "add", "from": 0, "to": 1, "amount": 1}"#)]
fn rejects_bad_scripts(#[case] script: &str) {
    assert!(replay::read_script(script.as_bytes()).is_err());
}

#[rstest]
fn demo_prints_reference_states(settings: OutputConfig) {
    let mut out = Vec::new();
    demo::run(&settings, &mut out).unwrap();

    assert_eq!(
        lines(out),
        vec![
            "[]",
            "[[10,1],[30,0]]",
            "[[10,1],[20,2],[30,1],[40,0]]",
            "[[10,-1],[20,0],[30,-1],[40,0]]",
            "[]",
            "[[10,1],[30,0]]",
            "[[10,1],[20,2],[30,1],[40,0]]",
            "[[20,1],[30,0]]",
            "[[10,-1],[20,0],[30,-1],[40,0]]",
        ]
    );
}

#[rstest]
fn parses_replay_args() {
    let args =
        BaseArgs::try_parse_from(["intensity", "replay", "ops.json", "-o", "-", "-f", "pretty"])
            .unwrap();
    assert!(args.config.is_none());
    assert!(matches!(
        args.command,
        Commands::Replay {
            format: Some(OutputFormat::Pretty),
            ..
        }
    ));
}

#[rstest]
fn parses_demo_args() {
    let args = BaseArgs::try_parse_from(["intensity", "-c", "app.toml", "demo"]).unwrap();
    assert_eq!(args.config.as_deref(), Some(std::path::Path::new("app.toml")));
    assert!(matches!(args.command, Commands::Demo { format: None }));
}
