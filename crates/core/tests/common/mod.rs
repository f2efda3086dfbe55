#![allow(dead_code)]

use std::collections::HashMap;

/// Build one instruction line in `go tool objdump` layout.
pub fn instr(file: &str, line: u32, offset: u64, raw: &str, decoded: &str) -> String {
    format!("  {file}:{line}\t\t0x{offset:x}\t\t{raw}\t{decoded}\n")
}

pub fn header(symbol: &str, path: &str) -> String {
    format!("TEXT {symbol} {path}\n")
}

/// `pkg.Foo` has three instructions on util.go:10, one of them a bounds-check
/// trap; `pkg.Bar` follows in another file.
pub fn trap_listing() -> String {
    let mut s = String::new();
    s.push_str(&header("pkg.Foo(SB)", "/src/pkg/util.go"));
    s.push_str(&instr("util.go", 10, 0x100, "488b442408", "MOVQ 0x8(SP), AX"));
    s.push_str(&instr("util.go", 10, 0x105, "4883f803", "CMPQ AX, $0x3"));
    s.push_str(&instr("util.go", 10, 0x109, "e800000000", "CALL runtime.panicIndex(SB)"));
    s.push('\n');
    s.push_str(&header("pkg.Bar(SB)", "/src/pkg/bar.go"));
    s.push_str(&instr("bar.go", 2, 0x200, "c3", "RET"));
    s
}

/// Two functions in two files with jumps between them, for resolution tests.
pub fn jump_listing() -> String {
    let mut s = String::new();
    s.push_str(&header("pkg.Foo(SB)", "/src/pkg/util.go"));
    s.push_str(&instr("util.go", 5, 0xf8, "4883ec18", "SUBQ $0x18, SP"));
    s.push_str(&instr("util.go", 6, 0xfc, "4839c8", "CMPQ CX, AX"));
    s.push_str(&instr("util.go", 6, 0x100, "0f83fa000000", "JAE 0x200"));
    s.push_str(&instr("util.go", 7, 0x106, "ffe0", "JMP AX"));
    s.push_str(&instr("util.go", 8, 0x108, "eb02", "JMP 0x10c"));
    s.push_str(&instr("util.go", 8, 0x10a, "0f0b", "UD2"));
    s.push_str(&instr("util.go", 9, 0x10c, "c3", "RET"));
    s.push('\n');
    s.push_str(&header("pkg.Baz(SB)", "/src/pkg/baz.go"));
    s.push_str(&instr("baz.go", 40, 0x1f0, "55", "PUSHQ BP"));
    s.push_str(&instr("baz.go", 41, 0x1f1, "4889e5", "MOVQ SP, BP"));
    s.push_str(&instr("baz.go", 41, 0x1f4, "90", "NOPL"));
    s.push_str(&instr("baz.go", 42, 0x200, "31c0", "XORL AX, AX"));
    s.push_str(&instr("baz.go", 43, 0x202, "c3", "RET"));
    s
}

pub fn sources(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// util.go with the bounds-checked access on line 10.
pub const UTIL_GO: &str = "package pkg\n\n\n\n\n\n\n\nfunc Foo(a []int, i int) int {\n\treturn a[i]\n}\n";
