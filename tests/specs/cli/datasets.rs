//! Dataset commands against a scripted `zfs`.

use crate::prelude::*;
use crate::prelude::assert_eq;

const COLUMNS: &str = "name,origin,used,available,mountpoint,compression,type,volsize,quota,written,logicalused,receive_resume_token";

fn listing(host: &Host, names: &[(&str, &str)]) {
    let lines: Vec<String> = names
        .iter()
        .map(|(name, kind)| dataset_line(name, kind))
        .collect();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    host.tool("zfs", &respond(&[("list", &lines[..])]));
}

#[test]
fn list_prints_a_table() {
    let host = Host::new();
    listing(&host, &[("tank", "filesystem"), ("tank/home", "filesystem")]);

    host.zfsh()
        .args(&["list", "-r", "tank"])
        .passes()
        .stdout_eq(
            "NAME       TYPE        USED  AVAIL  MOUNTPOINT\n\
             tank       filesystem  96K   1.2G   /mnt\n\
             tank/home  filesystem  96K   1.2G   /mnt\n",
        );

    assert_eq!(
        host.calls("zfs"),
        vec![format!("list -H -t filesystem -o {COLUMNS} -r tank")]
    );
}

#[test]
fn list_snapshots_as_json() {
    let host = Host::new();
    listing(&host, &[("tank@daily", "snapshot")]);

    let out = host
        .zfsh()
        .args(&["list", "-t", "snapshot", "-d", "1", "--output", "json"])
        .passes();

    let json = out.json();
    assert_eq!(json[0]["name"], "tank@daily");
    assert_eq!(json[0]["type"], "snapshot");
    assert_eq!(json[0]["origin"], "");
    assert_eq!(
        host.calls("zfs"),
        vec![format!("list -H -t snapshot -o {COLUMNS} -d 1")]
    );
}

#[test]
fn empty_list() {
    let host = Host::new();
    listing(&host, &[]);
    host.zfsh()
        .args(&["list"])
        .passes()
        .stdout_eq("No datasets found\n");
}

#[test]
fn get_shows_every_field() {
    let host = Host::new();
    listing(&host, &[("tank/home", "filesystem")]);

    host.zfsh()
        .args(&["get", "tank/home"])
        .passes()
        .stdout_has(&format!("{:<21} tank/home\n", "name"))
        .stdout_has(&format!("{:<21} lz4\n", "compression"))
        .stdout_has(&format!("{:<21} -\n", "origin"));
}

/// Answers `list` for `name` alone, or with `others` when the listing asks
/// for descendants (`-t all`).
fn family(host: &Host, name: &str, kind: &str, others: &[(&str, &str)]) {
    let own = dataset_line(name, kind);
    let mut all = vec![own.clone()];
    all.extend(others.iter().map(|(name, kind)| dataset_line(name, kind)));
    host.tool(
        "zfs",
        &format!(
            "case \"$*\" in\n\
             *\"-t all\"*) cat <<'OUT'\n{}\nOUT\n;;\n\
             list*) printf '%s\\n' '{own}' ;;\n\
             esac\n",
            all.join("\n")
        ),
    );
}

#[test]
fn children_omit_the_parent() {
    let host = Host::new();
    family(&host, "tank", "filesystem", &[("tank/a", "filesystem"), ("tank@s", "snapshot")]);

    let out = host.zfsh().args(&["children", "tank", "-o", "json"]).passes();

    let names: Vec<String> = out
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["tank/a", "tank@s"]);
}

#[test]
fn snapshot_then_reload() {
    let host = Host::new();
    let dataset = dataset_line("tank", "filesystem");
    let snapshot = dataset_line("tank@now", "snapshot");
    host.tool(
        "zfs",
        &format!(
            "for last; do :; done\n\
             case \"$1 $last\" in\n\
             \"list tank\") printf '%s\\n' '{dataset}' ;;\n\
             \"list tank@now\") printf '%s\\n' '{snapshot}' ;;\n\
             esac\n"
        ),
    );

    host.zfsh()
        .args(&["snapshot", "tank", "now", "-r"])
        .passes()
        .stdout_has("Created tank@now");

    let calls = host.calls("zfs");
    assert_eq!(calls[1], "snapshot -r tank@now");
}

#[test]
fn destroy_passes_flags() {
    let host = Host::new();
    listing(&host, &[("tank/old", "filesystem")]);

    host.zfsh()
        .args(&["destroy", "tank/old", "-f", "-r"])
        .passes()
        .stdout_has("Destroyed tank/old");

    assert_eq!(host.calls("zfs").last().unwrap(), "destroy -r -f tank/old");
}

#[test]
fn tool_failure_prints_stderr_and_exit_code() {
    let host = Host::new();
    host.tool(
        "zfs",
        "echo \"cannot open 'tank/nope': dataset does not exist\" >&2\nexit 1\n",
    );

    let out = host
        .zfsh()
        .args(&["get", "tank/nope"])
        .fails()
        .stderr_has("cannot open 'tank/nope': dataset does not exist");
    assert_eq!(out.code(), Some(1));
}

#[test]
fn mismatched_columns_are_reported() {
    let host = Host::new();
    host.tool("zfs", &respond(&[("list", &["tank\t-\t1K"][..])]));

    host.zfsh()
        .args(&["list"])
        .fails()
        .stderr_has("unexpected output layout");
}
