//! `zfsh diff`

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn diff_prints_changes() {
    let host = Host::new();
    let line = dataset_line("tank/fs", "filesystem");
    host.tool(
        "zfs",
        &respond(&[
            ("list", &[line.as_str()][..]),
            (
                "diff",
                &["M\t/\t/tank/fs/", "+\tF\t/tank/fs/new\\040file", "R\tF\t/tank/fs/a\t/tank/fs/b"][..],
            ),
        ]),
    );

    host.zfsh()
        .args(&["diff", "tank/fs@monday", "tank/fs"])
        .passes()
        .stdout_eq(
            "M\t/\t/tank/fs/\n\
             +\tF\t/tank/fs/new file\n\
             R\tF\t/tank/fs/a -> /tank/fs/b\n",
        );

    assert_eq!(
        host.calls("zfs").last().unwrap(),
        "diff -FH tank/fs@monday tank/fs"
    );
}

#[test]
fn diff_as_json() {
    let host = Host::new();
    let line = dataset_line("tank/fs", "filesystem");
    host.tool(
        "zfs",
        &respond(&[
            ("list", &[line.as_str()][..]),
            ("diff", &["M\tF\t/tank/fs/f\t(+2)"][..]),
        ]),
    );

    let out = host
        .zfsh()
        .args(&["diff", "tank/fs@a", "tank/fs", "-o", "json"])
        .passes();
    let json = out.json();
    assert_eq!(json[0]["change"], "modified");
    assert_eq!(json[0]["path"], "/tank/fs/f");
    assert_eq!(json[0]["reference_delta"], 2);
}

#[test]
fn malformed_diff_fails() {
    let host = Host::new();
    let line = dataset_line("tank/fs", "filesystem");
    host.tool(
        "zfs",
        &respond(&[("list", &[line.as_str()][..]), ("diff", &["X\tF\t/x"][..])]),
    );

    host.zfsh()
        .args(&["diff", "tank/fs@a", "tank/fs"])
        .fails()
        .stderr_has("bad diff output");
}
