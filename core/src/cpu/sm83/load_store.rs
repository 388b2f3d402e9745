use super::{ExecState, GbBus, R8, R16, Sm83};
use crate::core::BusMaster;

pub(super) fn op_ld_r_r(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    let dst = (op >> 3) & 7;
    let src = op & 7;
    match (dst == 6, src == 6) {
        (false, false) => {
            let v = cpu.r8(R8::from_bits(src).unwrap());
            cpu.r8_set(R8::from_bits(dst).unwrap(), v);
            cpu.finish();
        }
        (false, true) => match cycle {
            0 => {
                let v = bus.read(master, cpu.hl());
                cpu.r8_set(R8::from_bits(dst).unwrap(), v);
                cpu.finish();
            }
            _ => cpu.finish(),
        },
        (true, false) => match cycle {
            0 => {
                let v = cpu.r8(R8::from_bits(src).unwrap());
                bus.write(master, cpu.hl(), v);
                cpu.finish();
            }
            _ => cpu.finish(),
        },
        (true, true) => unreachable!("0x76 is HALT, handled before dispatch"),
    }
}

pub(super) fn op_ld_r_n(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    let dst = (op >> 3) & 7;
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            if dst == 6 {
                cpu.state = ExecState::Execute(op, 1);
            } else {
                cpu.r8_set(R8::from_bits(dst).unwrap(), cpu.z);
                cpu.finish();
            }
        }
        1 => {
            bus.write(master, cpu.hl(), cpu.z);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

fn rr_of(op: u8) -> R16 {
    match (op >> 4) & 3 {
        0 => R16::Bc,
        1 => R16::De,
        2 => R16::Hl,
        _ => R16::Sp,
    }
}

pub(super) fn op_ld_rr_nn(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(op, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            let v = ((cpu.w as u16) << 8) | cpu.z as u16;
            cpu.r16_set(rr_of(op), v);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_inc_rr(cpu: &mut Sm83, op: u8, cycle: u8) {
    match cycle {
        0 => {
            let rr = rr_of(op);
            let v = cpu.r16(rr).wrapping_add(1);
            cpu.r16_set(rr, v);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_dec_rr(cpu: &mut Sm83, op: u8, cycle: u8) {
    match cycle {
        0 => {
            let rr = rr_of(op);
            let v = cpu.r16(rr).wrapping_sub(1);
            cpu.r16_set(rr, v);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ld_sp_hl(cpu: &mut Sm83, cycle: u8) {
    match cycle {
        0 => {
            cpu.sp = cpu.hl();
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ld_nn_sp(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0x08, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0x08, 2);
        }
        2 => {
            let addr = ((cpu.w as u16) << 8) | cpu.z as u16;
            bus.write(master, addr, cpu.sp as u8);
            cpu.state = ExecState::Execute(0x08, 3);
        }
        3 => {
            let addr = ((cpu.w as u16) << 8) | cpu.z as u16;
            bus.write(master, addr.wrapping_add(1), (cpu.sp >> 8) as u8);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

/// LD (BC),A / LD (DE),A / LD (HL+),A / LD (HL-),A
pub(super) fn op_ld_indirect_a(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            let addr = match op {
                0x02 => cpu.bc(),
                0x12 => cpu.de(),
                0x22 => {
                    let hl = cpu.hl();
                    cpu.set_hl(hl.wrapping_add(1));
                    hl
                }
                0x32 => {
                    let hl = cpu.hl();
                    cpu.set_hl(hl.wrapping_sub(1));
                    hl
                }
                _ => unreachable!(),
            };
            bus.write(master, addr, cpu.a);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

/// LD A,(BC) / LD A,(DE) / LD A,(HL+) / LD A,(HL-)
pub(super) fn op_ld_a_indirect(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            let addr = match op {
                0x0A => cpu.bc(),
                0x1A => cpu.de(),
                0x2A => {
                    let hl = cpu.hl();
                    cpu.set_hl(hl.wrapping_add(1));
                    hl
                }
                0x3A => {
                    let hl = cpu.hl();
                    cpu.set_hl(hl.wrapping_sub(1));
                    hl
                }
                _ => unreachable!(),
            };
            cpu.a = bus.read(master, addr);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ld_nn_a(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xEA, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xEA, 2);
        }
        2 => {
            let addr = ((cpu.w as u16) << 8) | cpu.z as u16;
            bus.write(master, addr, cpu.a);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ld_a_nn(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xFA, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xFA, 2);
        }
        2 => {
            let addr = ((cpu.w as u16) << 8) | cpu.z as u16;
            cpu.a = bus.read(master, addr);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ldh_n_a(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xE0, 1);
        }
        1 => {
            bus.write(master, 0xFF00 + cpu.z as u16, cpu.a);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ldh_a_n(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xF0, 1);
        }
        1 => {
            cpu.a = bus.read(master, 0xFF00 + cpu.z as u16);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ldh_c_a(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            bus.write(master, 0xFF00 + cpu.c as u16, cpu.a);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ldh_a_c(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.a = bus.read(master, 0xFF00 + cpu.c as u16);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}
