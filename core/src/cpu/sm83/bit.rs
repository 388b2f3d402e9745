use super::{ExecState, Flag, GbBus, R8, Sm83};
use crate::core::BusMaster;

fn rotate_shift(cpu: &mut Sm83, sub: u8, v: u8) -> u8 {
    let result = match sub {
        0 => {
            // RLC
            let c = v & 0x80 != 0;
            cpu.set_flag(Flag::C, c);
            (v << 1) | (c as u8)
        }
        1 => {
            // RRC
            let c = v & 0x01 != 0;
            cpu.set_flag(Flag::C, c);
            (v >> 1) | ((c as u8) << 7)
        }
        2 => {
            // RL
            let old_c = cpu.flag(Flag::C) as u8;
            cpu.set_flag(Flag::C, v & 0x80 != 0);
            (v << 1) | old_c
        }
        3 => {
            // RR
            let old_c = cpu.flag(Flag::C) as u8;
            cpu.set_flag(Flag::C, v & 0x01 != 0);
            (v >> 1) | (old_c << 7)
        }
        4 => {
            // SLA
            cpu.set_flag(Flag::C, v & 0x80 != 0);
            v << 1
        }
        5 => {
            // SRA: bit 7 unchanged
            cpu.set_flag(Flag::C, v & 0x01 != 0);
            (v >> 1) | (v & 0x80)
        }
        6 => {
            // SWAP
            cpu.set_flag(Flag::C, false);
            (v << 4) | (v >> 4)
        }
        _ => {
            // SRL
            cpu.set_flag(Flag::C, v & 0x01 != 0);
            v >> 1
        }
    };
    cpu.set_flag(Flag::Z, result == 0);
    cpu.set_flag(Flag::N, false);
    cpu.set_flag(Flag::H, false);
    result
}

pub(super) fn dispatch_cb(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    let class = op >> 6;
    let sub = (op >> 3) & 7;
    let reg_bits = op & 7;

    if reg_bits != 6 {
        // Register-targeted CB ops complete in the same cycle they're
        // decoded (no extra bus access needed).
        let r = R8::from_bits(reg_bits).unwrap();
        let v = cpu.r8(r);
        match class {
            0 => {
                let result = rotate_shift(cpu, sub, v);
                cpu.r8_set(r, result);
            }
            1 => {
                cpu.set_flag(Flag::Z, v & (1 << sub) == 0);
                cpu.set_flag(Flag::N, false);
                cpu.set_flag(Flag::H, true);
            }
            2 => cpu.r8_set(r, v & !(1 << sub)),
            _ => cpu.r8_set(r, v | (1 << sub)),
        }
        cpu.finish();
        return;
    }

    // (HL) operand: read is always cycle 1, BIT finishes there; RLC/RRC/
    // RL/RR/SLA/SRA/SWAP/SRL/RES/SET need a cycle 2 write-back.
    match cycle {
        0 => {
            cpu.state = ExecState::ExecuteCb(op, 1);
        }
        1 => {
            cpu.z = bus.read(master, cpu.hl());
            if class == 1 {
                cpu.set_flag(Flag::Z, cpu.z & (1 << sub) == 0);
                cpu.set_flag(Flag::N, false);
                cpu.set_flag(Flag::H, true);
                cpu.finish();
            } else {
                cpu.state = ExecState::ExecuteCb(op, 2);
            }
        }
        2 => {
            let result = match class {
                0 => rotate_shift(cpu, sub, cpu.z),
                2 => cpu.z & !(1 << sub),
                _ => cpu.z | (1 << sub),
            };
            bus.write(master, cpu.hl(), result);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}
