//! `zfsh prop`

use crate::prelude::*;
use crate::prelude::assert_eq;

fn host() -> Host {
    let host = Host::new();
    let line = dataset_line("tank", "filesystem");
    host.tool(
        "zfs",
        &respond(&[
            ("list", &[line.as_str()][..]),
            ("get", &["tank\tcompressratio\t1.50x\t-"][..]),
        ]),
    );
    host
}

#[test]
fn get_prints_the_value() {
    let host = host();
    host.zfsh()
        .args(&["prop", "get", "tank", "compressratio"])
        .passes()
        .stdout_eq("1.50x\n");
    assert_eq!(host.calls("zfs").last().unwrap(), "get -Hp compressratio tank");
}

#[test]
fn get_as_json() {
    let host = host();
    let out = host
        .zfsh()
        .args(&["prop", "get", "tank", "compressratio", "-o", "json"])
        .passes();
    let json = out.json();
    assert_eq!(json["property"], "compressratio");
    assert_eq!(json["value"], "1.50x");
}

#[test]
fn set_each_assignment_in_order() {
    let host = host();
    host.zfsh()
        .args(&["prop", "set", "tank", "atime=off", "user:note=a=b"])
        .passes();

    let calls = host.calls("zfs");
    assert_eq!(calls[1], "set atime=off tank");
    assert_eq!(calls[2], "set user:note=a=b tank");
}

#[test]
fn set_rejects_malformed_assignment() {
    let host = host();
    host.zfsh()
        .args(&["prop", "set", "tank", "atime"])
        .fails()
        .stderr_has("must be key=value");
    assert!(host.calls("zfs").is_empty());
}
