use super::{ExecState, Flag, GbBus, Sm83};
use crate::core::BusMaster;

fn condition(cpu: &Sm83, op: u8) -> bool {
    match (op >> 3) & 3 {
        0 => !cpu.flag(Flag::Z),
        1 => cpu.flag(Flag::Z),
        2 => !cpu.flag(Flag::C),
        _ => cpu.flag(Flag::C),
    }
}

pub(super) fn op_jp_nn(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xC3, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xC3, 2);
        }
        2 => {
            cpu.pc = ((cpu.w as u16) << 8) | cpu.z as u16;
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_jp_hl(cpu: &mut Sm83) {
    cpu.pc = cpu.hl();
    cpu.finish();
}

pub(super) fn op_jp_cc_nn(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(op, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            if condition(cpu, op) {
                cpu.pc = ((cpu.w as u16) << 8) | cpu.z as u16;
                cpu.state = ExecState::Execute(op, 2);
            } else {
                cpu.finish();
            }
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_jr_e(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            let e = cpu.z as i8 as i16;
            cpu.pc = (cpu.pc as i16).wrapping_add(e) as u16;
            cpu.state = ExecState::Execute(0x18, 1);
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_jr_cc_e(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            if condition(cpu, op) {
                let e = cpu.z as i8 as i16;
                cpu.pc = (cpu.pc as i16).wrapping_add(e) as u16;
                cpu.state = ExecState::Execute(op, 1);
            } else {
                cpu.finish();
            }
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_call_nn(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xCD, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(0xCD, 2);
        }
        2 => {
            cpu.sp = cpu.sp.wrapping_sub(1);
            bus.write(master, cpu.sp, (cpu.pc >> 8) as u8);
            cpu.state = ExecState::Execute(0xCD, 3);
        }
        3 => {
            cpu.sp = cpu.sp.wrapping_sub(1);
            bus.write(master, cpu.sp, cpu.pc as u8);
            cpu.pc = ((cpu.w as u16) << 8) | cpu.z as u16;
            cpu.state = ExecState::Execute(0xCD, 4);
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_call_cc_nn(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = ExecState::Execute(op, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            if condition(cpu, op) {
                cpu.state = ExecState::Execute(op, 2);
            } else {
                cpu.finish();
            }
        }
        2 => {
            cpu.sp = cpu.sp.wrapping_sub(1);
            bus.write(master, cpu.sp, (cpu.pc >> 8) as u8);
            cpu.state = ExecState::Execute(op, 3);
        }
        3 => {
            cpu.sp = cpu.sp.wrapping_sub(1);
            bus.write(master, cpu.sp, cpu.pc as u8);
            cpu.pc = ((cpu.w as u16) << 8) | cpu.z as u16;
            cpu.state = ExecState::Execute(op, 4);
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ret(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.sp);
            cpu.sp = cpu.sp.wrapping_add(1);
            cpu.state = ExecState::Execute(0xC9, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.sp);
            cpu.sp = cpu.sp.wrapping_add(1);
            cpu.state = ExecState::Execute(0xC9, 2);
        }
        2 => {
            cpu.pc = ((cpu.w as u16) << 8) | cpu.z as u16;
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_reti(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.sp);
            cpu.sp = cpu.sp.wrapping_add(1);
            cpu.state = ExecState::Execute(0xD9, 1);
        }
        1 => {
            cpu.w = bus.read(master, cpu.sp);
            cpu.sp = cpu.sp.wrapping_add(1);
            cpu.state = ExecState::Execute(0xD9, 2);
        }
        2 => {
            cpu.pc = ((cpu.w as u16) << 8) | cpu.z as u16;
            cpu.ime = true;
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ret_cc(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            if condition(cpu, op) {
                cpu.state = ExecState::Execute(op, 1);
            } else {
                cpu.finish();
            }
        }
        1 => {
            cpu.z = bus.read(master, cpu.sp);
            cpu.sp = cpu.sp.wrapping_add(1);
            cpu.state = ExecState::Execute(op, 2);
        }
        2 => {
            cpu.w = bus.read(master, cpu.sp);
            cpu.sp = cpu.sp.wrapping_add(1);
            cpu.state = ExecState::Execute(op, 3);
        }
        3 => {
            cpu.pc = ((cpu.w as u16) << 8) | cpu.z as u16;
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}
