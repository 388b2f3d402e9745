use std::path::Path;

use dmg_core::core::{BusMaster, BusMasterComponent};
use dmg_core::cpu::sm83::Sm83;
use dmg_cpu_validation::{Sm83CpuState, Sm83TestCase, TracingBus};

fn load_initial_state(cpu: &mut Sm83, s: &Sm83CpuState) {
    // Sm83::new() leaves the CPU mid-NOP (post-boot-ROM state); clear it to
    // a clean Fetch boundary before overwriting registers from the vector.
    let mut throwaway = TracingBus::new();
    cpu.tick_with_bus(&mut throwaway, BusMaster::Cpu);

    cpu.a = s.a;
    cpu.f = s.f;
    cpu.b = s.b;
    cpu.c = s.c;
    cpu.d = s.d;
    cpu.e = s.e;
    cpu.h = s.h;
    cpu.l = s.l;
    cpu.sp = s.sp;
    cpu.pc = s.pc;
    cpu.ime = s.ime != 0;
}

fn run_test_case(tc: &Sm83TestCase) -> Option<String> {
    let mut cpu = Sm83::new();
    let mut bus = TracingBus::new();

    load_initial_state(&mut cpu, &tc.initial);

    for &(addr, val) in &tc.initial.ram {
        bus.memory[addr as usize] = val;
    }

    let mut total_ticks = 0;
    loop {
        total_ticks += 1;
        if cpu.tick_with_bus(&mut bus, BusMaster::Cpu) {
            break;
        }
        if total_ticks > 200 {
            return Some(format!("{}: instruction did not complete in 200 cycles", tc.name));
        }
    }

    let fs = &tc.final_state;

    macro_rules! check {
        ($got:expr, $exp:expr, $name:expr) => {
            if $got != $exp {
                return Some(format!(
                    "{}: {} (got 0x{:X} exp 0x{:X})", tc.name, $name, $got as u64, $exp as u64
                ));
            }
        };
    }

    check!(cpu.a, fs.a, "A");
    check!(cpu.f, fs.f, "F");
    check!(cpu.b, fs.b, "B");
    check!(cpu.c, fs.c, "C");
    check!(cpu.d, fs.d, "D");
    check!(cpu.e, fs.e, "E");
    check!(cpu.h, fs.h, "H");
    check!(cpu.l, fs.l, "L");
    check!(cpu.sp, fs.sp, "SP");
    check!(cpu.pc, fs.pc, "PC");
    check!(cpu.ime as u8, if fs.ime != 0 { 1 } else { 0 }, "IME");

    for &(addr, expected) in &fs.ram {
        if bus.memory[addr as usize] != expected {
            return Some(format!(
                "{}: RAM[0x{:04X}] (got 0x{:02X} exp 0x{:02X})",
                tc.name, addr, bus.memory[addr as usize], expected
            ));
        }
    }

    if total_ticks != tc.cycles.len() {
        return Some(format!(
            "{}: cycles (got {} exp {})",
            tc.name, total_ticks, tc.cycles.len()
        ));
    }

    None
}

#[test]
fn test_all_sm83_opcodes() {
    let test_dir = Path::new("test_data/sm83/v1");
    if !test_dir.exists() {
        panic!(
            "No SingleStepTests data. Run: git submodule update --init cpu-validation/test_data/sm83"
        );
    }

    let mut entries: Vec<_> = std::fs::read_dir(test_dir)
        .expect("Failed to read test directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut total_tests = 0;
    let mut total_files = 0;
    let mut failed_tests = 0;
    let mut failed_files = std::collections::BTreeSet::new();
    let mut first_failures: Vec<String> = Vec::new();

    for entry in &entries {
        let filename = entry.file_name();
        let filename_str = filename.to_string_lossy();

        let json_path = entry.path();
        let json = std::fs::read_to_string(&json_path)
            .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", json_path, e));
        let tests: Vec<Sm83TestCase> = serde_json::from_str(&json)
            .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", json_path, e));

        assert!(!tests.is_empty(), "Test file {} is empty", filename_str);

        for tc in &tests {
            if let Some(err) = run_test_case(tc) {
                failed_tests += 1;
                if !failed_files.contains(&filename_str.to_string()) {
                    failed_files.insert(filename_str.to_string());
                    if first_failures.len() < 50 {
                        first_failures.push(err);
                    }
                }
            }
        }

        total_tests += tests.len();
        total_files += 1;
    }

    eprintln!(
        "\nSM83 SingleStepTests: {} passed, {} failed across {} files",
        total_tests - failed_tests, failed_tests, total_files
    );

    if !first_failures.is_empty() {
        eprintln!("\nFirst failure per file ({} files):", failed_files.len());
        for err in &first_failures {
            eprintln!("  {}", err);
        }
    }

    if failed_tests > 0 {
        panic!(
            "{} tests failed across {} files (out of {} tests in {} files)",
            failed_tests, failed_files.len(), total_tests, total_files
        );
    }
}
