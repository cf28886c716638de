//! Remote execution through a stand-in `ssh`.

use crate::prelude::*;

#[test]
fn remote_list_goes_through_ssh() {
    let host = Host::new();
    host.ssh();
    host.tool(
        "zfs",
        &respond(&[("list", &[dataset_line("tank", "filesystem").as_str()][..])]),
    );

    host.zfsh()
        .args(&["list", "--host", "nas.example", "--user", "backup", "--port", "2222"])
        .env("PATH", path_with(&host))
        .passes()
        .stdout_has("tank");

    let ssh = host.calls("ssh");
    assert!(ssh[0].starts_with("-M -N -f"), "{ssh:?}");
    assert!(ssh[1].contains("-p 2222 backup@nas.example -- "), "{ssh:?}");
    assert!(ssh[1].ends_with(" list -H -t filesystem -o name,origin,used,available,mountpoint,compression,type,volsize,quota,written,logicalused,receive_resume_token"));
    assert!(ssh[2].contains("-O exit"), "{ssh:?}");
}

#[test]
fn remote_settings_from_config_file() {
    let host = Host::new();
    host.ssh();
    host.tool("zpool", &respond(&[("list", &["tank\tONLINE\t1G\t2G\t1G"][..])]));
    let config = host.file(
        "config.toml",
        &format!(
            "timeout_secs = 30\n\n[remote]\nhost = \"nas.example\"\nuser = \"ops\"\nssh = \"{}\"\n",
            host.path("ssh").display()
        ),
    );

    host.zfsh()
        .args(&["pools", "--config", config.to_str().unwrap()])
        .passes()
        .stdout_has("tank");

    assert!(host.calls("ssh")[0].ends_with("ops@nas.example"));
}

#[test]
fn refused_connection_fails() {
    let host = Host::new();
    host.tool("ssh", "echo 'Permission denied (publickey).' >&2\nexit 255\n");

    host.zfsh()
        .args(&["pools", "--host", "nas.example"])
        .env("PATH", path_with(&host))
        .fails()
        .stderr_has("Permission denied");
}

#[test]
fn invalid_config_file_fails() {
    let host = Host::new();
    let config = host.file("config.toml", "[remote]\nhostname = \"x\"\n");

    host.zfsh()
        .args(&["pools", "--config", config.to_str().unwrap()])
        .fails()
        .stderr_has("invalid config file");
}

/// `PATH` with the fake host's directory first, so `ssh` resolves to it.
fn path_with(host: &Host) -> String {
    let dir = host.path("");
    let system = std::env::var("PATH").unwrap_or_default();
    format!("{}:{system}", dir.display())
}
