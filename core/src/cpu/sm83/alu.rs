use super::{Flag, GbBus, R8, R16, Sm83};
use crate::core::BusMaster;

fn add8(cpu: &mut Sm83, val: u8, carry_in: u8) -> u8 {
    let a = cpu.a;
    let (r1, c1) = a.overflowing_add(val);
    let (result, c2) = r1.overflowing_add(carry_in);
    let half = (a & 0xF) + (val & 0xF) + carry_in > 0xF;
    cpu.set_flag(Flag::Z, result == 0);
    cpu.set_flag(Flag::N, false);
    cpu.set_flag(Flag::H, half);
    cpu.set_flag(Flag::C, c1 || c2);
    result
}

fn sub8(cpu: &mut Sm83, val: u8, carry_in: u8) -> u8 {
    let a = cpu.a;
    let (r1, b1) = a.overflowing_sub(val);
    let (result, b2) = r1.overflowing_sub(carry_in);
    let half = (a & 0xF) < (val & 0xF) + carry_in;
    cpu.set_flag(Flag::Z, result == 0);
    cpu.set_flag(Flag::N, true);
    cpu.set_flag(Flag::H, half);
    cpu.set_flag(Flag::C, b1 || b2);
    result
}

fn apply_alu_op(cpu: &mut Sm83, op: u8, val: u8) {
    // op is the bits 3-5 selector from the opcode (0=ADD,1=ADC,...,7=CP)
    match op {
        0 => cpu.a = add8(cpu, val, 0),
        1 => {
            let c = cpu.flag(Flag::C) as u8;
            cpu.a = add8(cpu, val, c);
        }
        2 => cpu.a = sub8(cpu, val, 0),
        3 => {
            let c = cpu.flag(Flag::C) as u8;
            cpu.a = sub8(cpu, val, c);
        }
        4 => {
            let r = cpu.a & val;
            cpu.a = r;
            cpu.set_flag(Flag::Z, r == 0);
            cpu.set_flag(Flag::N, false);
            cpu.set_flag(Flag::H, true);
            cpu.set_flag(Flag::C, false);
        }
        5 => {
            let r = cpu.a ^ val;
            cpu.a = r;
            cpu.set_flag(Flag::Z, r == 0);
            cpu.set_flag(Flag::N, false);
            cpu.set_flag(Flag::H, false);
            cpu.set_flag(Flag::C, false);
        }
        6 => {
            let r = cpu.a | val;
            cpu.a = r;
            cpu.set_flag(Flag::Z, r == 0);
            cpu.set_flag(Flag::N, false);
            cpu.set_flag(Flag::H, false);
            cpu.set_flag(Flag::C, false);
        }
        7 => {
            // CP: like SUB but discards the result
            let saved = cpu.a;
            sub8(cpu, val, 0);
            cpu.a = saved;
        }
        _ => unreachable!(),
    }
}

pub(super) fn op_alu_a_r(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    let sel = (op >> 3) & 7;
    let src = op & 7;
    if src == 6 {
        match cycle {
            0 => {
                let v = bus.read(master, cpu.hl());
                apply_alu_op(cpu, sel, v);
                cpu.finish();
            }
            _ => cpu.finish(),
        }
    } else {
        let r = R8::from_bits(src).unwrap();
        let v = cpu.r8(r);
        apply_alu_op(cpu, sel, v);
        cpu.finish();
    }
}

pub(super) fn op_alu_a_n(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            let n = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            let sel = (op >> 3) & 7;
            apply_alu_op(cpu, sel, n);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_inc_r8(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    let idx = (op >> 3) & 7;
    if idx == 6 {
        match cycle {
            0 => {
                cpu.z = bus.read(master, cpu.hl());
                cpu.state = super::ExecState::Execute(op, 1);
            }
            1 => {
                let r = inc8(cpu, cpu.z);
                bus.write(master, cpu.hl(), r);
                cpu.finish();
            }
            _ => cpu.finish(),
        }
    } else {
        let r = R8::from_bits(idx).unwrap();
        let v = inc8(cpu, cpu.r8(r));
        cpu.r8_set(r, v);
        cpu.finish();
    }
}

pub(super) fn op_dec_r8(cpu: &mut Sm83, op: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    let idx = (op >> 3) & 7;
    if idx == 6 {
        match cycle {
            0 => {
                cpu.z = bus.read(master, cpu.hl());
                cpu.state = super::ExecState::Execute(op, 1);
            }
            1 => {
                let r = dec8(cpu, cpu.z);
                bus.write(master, cpu.hl(), r);
                cpu.finish();
            }
            _ => cpu.finish(),
        }
    } else {
        let r = R8::from_bits(idx).unwrap();
        let v = dec8(cpu, cpu.r8(r));
        cpu.r8_set(r, v);
        cpu.finish();
    }
}

fn inc8(cpu: &mut Sm83, v: u8) -> u8 {
    let r = v.wrapping_add(1);
    cpu.set_flag(Flag::Z, r == 0);
    cpu.set_flag(Flag::N, false);
    cpu.set_flag(Flag::H, v & 0xF == 0xF);
    r
}

fn dec8(cpu: &mut Sm83, v: u8) -> u8 {
    let r = v.wrapping_sub(1);
    cpu.set_flag(Flag::Z, r == 0);
    cpu.set_flag(Flag::N, true);
    cpu.set_flag(Flag::H, v & 0xF == 0);
    r
}

pub(super) fn op_add_hl_rr(cpu: &mut Sm83, op: u8, cycle: u8) {
    match cycle {
        0 => {
            let rr = match (op >> 4) & 3 {
                0 => R16::Bc,
                1 => R16::De,
                2 => R16::Hl,
                _ => R16::Sp,
            };
            let hl = cpu.hl();
            let val = cpu.r16(rr);
            let (result, carry) = hl.overflowing_add(val);
            let half = (hl & 0x0FFF) + (val & 0x0FFF) > 0x0FFF;
            cpu.set_hl(result);
            cpu.set_flag(Flag::N, false);
            cpu.set_flag(Flag::H, half);
            cpu.set_flag(Flag::C, carry);
            cpu.finish();
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_add_sp_e(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            cpu.state = super::ExecState::Execute(0xE8, 1);
        }
        1 | 2 => {
            let e = cpu.z as i8 as i16;
            let sp = cpu.sp as i16;
            let result = sp.wrapping_add(e) as u16;
            cpu.set_flag(Flag::Z, false);
            cpu.set_flag(Flag::N, false);
            cpu.set_flag(Flag::H, (cpu.sp & 0xF) as i16 + (e & 0xF) > 0xF);
            cpu.set_flag(Flag::C, (cpu.sp & 0xFF) as i16 + (cpu.z as i8 as i16 & 0xFF) > 0xFF);
            cpu.sp = result;
            if cycle == 1 {
                cpu.state = super::ExecState::Execute(0xE8, 2);
            } else {
                cpu.finish();
            }
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_ld_hl_sp_e(cpu: &mut Sm83, cycle: u8, bus: &mut GbBus, master: BusMaster) {
    match cycle {
        0 => {
            cpu.z = bus.read(master, cpu.pc);
            cpu.pc = cpu.pc.wrapping_add(1);
            let e = cpu.z as i8 as i16;
            let sp = cpu.sp as i16;
            let result = sp.wrapping_add(e) as u16;
            cpu.set_flag(Flag::Z, false);
            cpu.set_flag(Flag::N, false);
            cpu.set_flag(Flag::H, (cpu.sp & 0xF) as i16 + (e & 0xF) > 0xF);
            cpu.set_flag(Flag::C, (cpu.sp & 0xFF) as i16 + (cpu.z as i8 as i16 & 0xFF) > 0xFF);
            cpu.set_hl(result);
            cpu.state = super::ExecState::Execute(0xF8, 1);
        }
        _ => cpu.finish(),
    }
}

pub(super) fn op_rotate_a(cpu: &mut Sm83, op: u8) {
    let a = cpu.a;
    let result = match op {
        0x07 => {
            let c = a & 0x80 != 0;
            cpu.set_flag(Flag::C, c);
            (a << 1) | (c as u8)
        }
        0x0F => {
            let c = a & 0x01 != 0;
            cpu.set_flag(Flag::C, c);
            (a >> 1) | ((c as u8) << 7)
        }
        0x17 => {
            let old_c = cpu.flag(Flag::C) as u8;
            cpu.set_flag(Flag::C, a & 0x80 != 0);
            (a << 1) | old_c
        }
        0x1F => {
            let old_c = cpu.flag(Flag::C) as u8;
            cpu.set_flag(Flag::C, a & 0x01 != 0);
            (a >> 1) | (old_c << 7)
        }
        _ => unreachable!(),
    };
    cpu.a = result;
    cpu.set_flag(Flag::Z, false);
    cpu.set_flag(Flag::N, false);
    cpu.set_flag(Flag::H, false);
    cpu.finish();
}

pub(super) fn op_daa(cpu: &mut Sm83) {
    let mut a = cpu.a;
    let mut carry = cpu.flag(Flag::C);
    if !cpu.flag(Flag::N) {
        if carry || a > 0x99 {
            a = a.wrapping_add(0x60);
            carry = true;
        }
        if cpu.flag(Flag::H) || (a & 0x0F) > 0x09 {
            a = a.wrapping_add(0x06);
        }
    } else {
        if carry {
            a = a.wrapping_sub(0x60);
        }
        if cpu.flag(Flag::H) {
            a = a.wrapping_sub(0x06);
        }
    }
    cpu.a = a;
    cpu.set_flag(Flag::Z, a == 0);
    cpu.set_flag(Flag::H, false);
    cpu.set_flag(Flag::C, carry);
    cpu.finish();
}

pub(super) fn op_cpl(cpu: &mut Sm83) {
    cpu.a = !cpu.a;
    cpu.set_flag(Flag::N, true);
    cpu.set_flag(Flag::H, true);
    cpu.finish();
}

pub(super) fn op_scf(cpu: &mut Sm83) {
    cpu.set_flag(Flag::N, false);
    cpu.set_flag(Flag::H, false);
    cpu.set_flag(Flag::C, true);
    cpu.finish();
}

pub(super) fn op_ccf(cpu: &mut Sm83) {
    let c = cpu.flag(Flag::C);
    cpu.set_flag(Flag::N, false);
    cpu.set_flag(Flag::H, false);
    cpu.set_flag(Flag::C, !c);
    cpu.finish();
}
