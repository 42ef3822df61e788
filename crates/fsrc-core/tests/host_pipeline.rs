use std::{fs, io::Write, path::Path};

use fsrc_core::{
    EngineSelector,
    agent::agent_argument_spec,
    config::{CliValues, ConfigFile, ConfigResolver},
    forward_arguments,
    host::{HostPipeline, HostSettings, HostState, host_argument_spec, host_command},
};
use fsrc_exec::{FakeReply, FakeRunner};

fn resolve(argv: &[&str], yaml: Option<&str>) -> fsrc_core::config::ResolvedConfig {
    let spec = host_argument_spec();
    let matches = host_command().try_get_matches_from(argv).unwrap();
    let cli = CliValues::from_matches(&spec, &matches);

    let file = yaml.map(|text| {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(text.as_bytes()).unwrap();
        ConfigFile::load(tmp.path()).unwrap()
    });
    ConfigResolver::new(&spec).with_cli(cli).with_file(file).resolve()
}

#[tokio::test]
async fn cli_and_file_drive_the_agent_command_line() {
    let resolved = resolve(
        &["fsrc-build", "--job", "c9s", "--with-ceph", "-s", "/home/me/samba"],
        Some("job: from-file\nartifacts_dir: /home/me/out\ntasks: [packages]\nkeep_dnf: false\n"),
    );
    let settings = HostSettings::from_resolved(&resolved).unwrap();
    let agent_args = forward_arguments(&agent_argument_spec(), &resolved);

    let runner = FakeRunner::new().on(["podman"], FakeReply::Missing);
    let engine = EngineSelector::new(&runner).select(None).await.unwrap();
    assert_eq!(engine, "docker");

    let mut pipeline = HostPipeline::new(&runner, engine, settings).with_agent_args(agent_args);
    pipeline.run().await.unwrap();
    assert_eq!(pipeline.state(), HostState::Done);

    let calls = runner.argvs();
    // two probes, no image build, one agent run
    assert_eq!(calls.len(), 3);
    let run = calls[2].join(" ");
    assert_eq!(
        run,
        "docker run --rm -it \
         --volume /home/me/samba:/srv/build/source \
         --volume /home/me/out:/srv/build/work \
         --userns=keep-id samba-from-source:dev-c9s \
         --source-path /srv/build/source \
         --package-source /usr/local/lib/sources \
         --workdir /srv/build/work \
         --job c9s \
         --package-name samba \
         --git-ref master \
         --git-repo https://git.samba.org/samba.git \
         --with-ceph"
    );
}

#[test]
fn file_values_beat_declared_defaults() {
    let resolved = resolve(
        &["fsrc-build", "--task", "packages"],
        Some("workdir: /data/out\ngit_ref: v4-20-stable\n"),
    );
    let agent_args = forward_arguments(&agent_argument_spec(), &resolved);
    let joined = agent_args.join(" ");
    assert!(joined.contains("--workdir /data/out"));
    assert!(joined.contains("--git-ref v4-20-stable"));
    assert!(!joined.contains("/srv/build/work"));
}

#[tokio::test]
async fn failing_agent_run_surfaces_engine_exit_code() {
    let resolved = resolve(&["fsrc-build", "--container-engine", "podman"], None);
    let settings = HostSettings::from_resolved(&resolved).unwrap();
    let runner = FakeRunner::new().on(["podman", "run"], FakeReply::Exit(3));

    let engine = EngineSelector::new(&runner)
        .select(settings.container_engine.as_deref())
        .await
        .unwrap();
    let mut pipeline = HostPipeline::new(&runner, engine, settings);
    let err = pipeline.run().await.unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert_eq!(pipeline.state(), HostState::Failed);
    let calls = runner.argvs();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0][1], "build");
}

#[test]
fn default_image_build_uses_files_from_the_checkout() {
    let resolved = resolve(&["fsrc-build"], None);
    let settings = HostSettings::from_resolved(&resolved).unwrap();
    let runner = FakeRunner::new();
    let cmd = HostPipeline::new(&runner, "podman", settings)
        .build_image_command()
        .unwrap();
    assert_eq!(
        cmd.argv().join(" "),
        "podman build -t samba-from-source:dev -f images/fromsource/Containerfile ."
    );

    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let containerfile = root.join("images/fromsource/Containerfile");
    assert!(containerfile.is_file());
    assert!(root.join("Cargo.toml").is_file());
    assert!(root.join("crates/fsrc-agentd").is_dir());

    // Every local COPY source must be inside the build context.
    let text = fs::read_to_string(&containerfile).unwrap();
    for line in text.lines().filter(|l| l.starts_with("COPY ") && !l.contains("--from=")) {
        let source = line.split_whitespace().nth(1).unwrap();
        assert!(root.join(source).exists(), "missing build context entry: {source}");
    }
    assert!(text.contains("cargo build --release -p fsrc-agentd"));

    let template = root.join("images/fromsource/sources/samba-master.spec");
    let template = fs::read_to_string(template).unwrap();
    assert!(template.contains("samba_version 4.999"));
}
