#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const UTIL_GO: &str = "package pkg\n\n\n\n\n\n\n\nfunc Foo(a []int, i int) int {\n\treturn a[i]\n}\n";

/// A listing with one trap in util.go:10 and a jump from pkg.Bar into pkg.Foo.
/// Header paths are relative so `--source-root` can point at a temp dir.
pub fn listing_text() -> String {
    [
        "TEXT pkg.Foo(SB) util.go",
        "  util.go:10\t\t0x100\t\t488b442408\tMOVQ 0x8(SP), AX",
        "  util.go:10\t\t0x105\t\t4883f803\tCMPQ AX, $0x3",
        "  util.go:10\t\t0x109\t\te800000000\tCALL runtime.panicIndex(SB)",
        "",
        "TEXT pkg.Bar(SB) bar.go",
        "  bar.go:2\t\t0x200\t\teb00\tJMP 0x105",
        "  bar.go:3\t\t0x202\t\tc3\tRET",
        "",
    ]
    .join("\n")
}

/// Write the listing and util.go into `dir`; returns the listing path.
pub fn write_fixture(dir: &Path) -> PathBuf {
    let listing = dir.join("objdump.txt");
    std::fs::write(&listing, listing_text()).expect("write listing");
    std::fs::write(dir.join("util.go"), UTIL_GO).expect("write util.go");
    listing
}
