//! Pool commands against a scripted `zpool`.

use crate::prelude::*;
use crate::prelude::assert_eq;

fn host() -> Host {
    let host = Host::new();
    host.tool(
        "zpool",
        &respond(&[(
            "list",
            &["tank\tONLINE\t1.5G\t2G\t500M", "backup\tDEGRADED\t9G\t10G\t1G"][..],
        )]),
    );
    host
}

#[test]
fn pools_table() {
    let host = host();
    host.zfsh().args(&["pools"]).passes().stdout_eq(
        "NAME    HEALTH    ALLOC  SIZE  FREE\n\
         tank    ONLINE    1.5G   2G    500M\n\
         backup  DEGRADED  9G     10G   1G\n",
    );
    assert_eq!(
        host.calls("zpool"),
        vec!["list -H -o name,health,allocated,size,free"]
    );
}

#[test]
fn pool_as_json() {
    let host = host();
    let out = host.zfsh().args(&["pool", "tank", "-o", "json"]).passes();
    let json = out.json();
    // The fake ignores the name filter; the last row wins.
    assert_eq!(json["name"], "backup");
    assert_eq!(json["health"], "DEGRADED");
}
