mod common;

use common::{header, instr, jump_listing, trap_listing};
use trapview_core::analysis::{filter_locations, TrapDetector};
use trapview_core::listing::Listing;
use trapview_core::model::InstructionClass;

#[test]
fn detects_call_into_trap_routine() {
    let listing = Listing::parse(&trap_listing()).unwrap();
    let detector = TrapDetector::default();
    let flagged: Vec<u64> = listing
        .instructions()
        .filter(|(_, i)| detector.is_trap(i))
        .map(|(_, i)| i.binary_offset)
        .collect();
    assert_eq!(flagged, vec![0x109]);
}

#[test]
fn only_call_class_instructions_are_traps() {
    let text = format!(
        "{}{}{}",
        header("pkg.A(SB)", "/src/a.go"),
        instr("a.go", 1, 0x10, "48", "LEAQ runtime.panicIndex(SB), AX"),
        instr("a.go", 2, 0x18, "e8", "CALL runtime.growslice(SB)"),
    );
    let listing = Listing::parse(&text).unwrap();
    let detector = TrapDetector::default();
    assert!(listing.instructions().all(|(_, i)| !detector.is_trap(i)));
}

#[test]
fn custom_trap_symbols() {
    let text = format!(
        "{}{}",
        header("pkg.A(SB)", "/src/a.go"),
        instr("a.go", 3, 0x10, "e8", "CALL runtime.panicSliceAlen(SB)"),
    );
    let listing = Listing::parse(&text).unwrap();
    assert!(TrapDetector::default().locations(&listing.blocks).is_empty());

    let detector = TrapDetector::new(["runtime.panicIndex", "runtime.panicSlice"]);
    assert_eq!(detector.symbols().len(), 2);
    let locs = detector.locations(&listing.blocks);
    assert_eq!(locs.len(), 1);
    assert_eq!(locs[0].source_line, 3);
}

#[test]
fn locations_are_sorted_by_file_then_line() {
    let trap = "CALL runtime.panicIndex(SB)";
    let mut text = String::new();
    text.push_str(&header("pkg.Z(SB)", "/src/z.go"));
    text.push_str(&instr("z.go", 30, 0x10, "e8", trap));
    text.push_str(&instr("z.go", 4, 0x15, "e8", trap));
    text.push('\n');
    text.push_str(&header("pkg.A(SB)", "/src/a.go"));
    text.push_str(&instr("a.go", 12, 0x20, "e8", trap));
    text.push_str(&instr("inlined.go", 2, 0x25, "e8", trap));

    let listing = Listing::parse(&text).unwrap();
    let locs = TrapDetector::default().locations(&listing.blocks);
    let keys: Vec<(String, u32)> =
        locs.iter().map(|l| (l.source_file.clone(), l.source_line)).collect();
    assert_eq!(
        keys,
        vec![
            ("a.go".to_string(), 12),
            ("inlined.go".to_string(), 2),
            ("z.go".to_string(), 4),
            ("z.go".to_string(), 30)
        ]
    );
    assert_eq!(locs[0].symbol_name, "pkg.A(SB)");
    assert_eq!(locs[0].source_path, "/src/a.go");
    // Inlined code from another file keeps the instruction's own file name.
    assert_eq!(locs[1].source_path, "inlined.go");
    assert_eq!(locs[1].symbol_name, "pkg.A(SB)");
}

#[test]
fn filter_locations_by_base_name() {
    let listing = Listing::parse(&trap_listing()).unwrap();
    let locs = TrapDetector::default().locations(&listing.blocks);
    assert_eq!(filter_locations(locs.clone(), Some("util.go")).len(), 1);
    assert!(filter_locations(locs.clone(), Some("bar.go")).is_empty());
    assert_eq!(filter_locations(locs, None).len(), 1);
}

#[test]
fn basic_block_ends() {
    let listing = Listing::parse(&jump_listing()).unwrap();
    let detector = TrapDetector::default();
    let enders: Vec<String> = listing
        .instructions()
        .filter(|(_, i)| detector.ends_basic_block(i))
        .map(|(_, i)| i.decoded.clone())
        .collect();
    assert_eq!(enders, vec!["JMP AX", "JMP 0x10c", "UD2", "RET", "RET"]);

    let trap = Listing::parse(&trap_listing()).unwrap();
    assert!(detector.ends_basic_block(&trap.blocks[0].instructions[2]));
    assert!(!detector.ends_basic_block(&trap.blocks[0].instructions[1]));
}

#[test]
fn line_has_trap_checks_only_that_line() {
    let listing = Listing::parse(&trap_listing()).unwrap();
    let detector = TrapDetector::default();
    let instrs = &listing.blocks[0].instructions;
    assert!(detector.line_has_trap(instrs, 10));
    assert!(!detector.line_has_trap(instrs, 11));
}

#[test]
fn instruction_classes() {
    assert_eq!(InstructionClass::of("CALL"), InstructionClass::Call);
    assert_eq!(InstructionClass::of("ret"), InstructionClass::Call);
    assert_eq!(InstructionClass::of("JNE"), InstructionClass::Jump);
    assert_eq!(InstructionClass::of("UD2"), InstructionClass::Trap);
    assert_eq!(InstructionClass::of("INT"), InstructionClass::Padding);
    assert_eq!(InstructionClass::of("NOPW"), InstructionClass::Padding);
    assert_eq!(InstructionClass::of("MOVQ"), InstructionClass::Other);
}
