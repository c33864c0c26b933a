//! Primary decode table for the LR35902.
//!
//! Each populated entry is a descriptor of executor, T-cycle cost and
//! mnemonic; the eleven unpopulated slots are the opcodes the CPU does not
//! decode. The stepper charges the tabulated cost, so conditional
//! instructions cost the same taken or not. The sole exception is the CB
//! prefix at 0xCB, whose cost depends on the decoded secondary opcode and
//! is charged by [`cb`].

use crate::AddressSpace;
use crate::cpu::registers::FlagsRegister;
use crate::cpu::{CPU, cb};

type OpcodeFn = fn(&mut CPU, &mut dyn AddressSpace);

/// A single entry of the primary decode table.
pub struct Opcode {
    pub exec: OpcodeFn,
    pub cycles: u8,
    pub mnemonic: &'static str,
}

const fn op(exec: OpcodeFn, cycles: u8, mnemonic: &'static str) -> Option<Opcode> {
    Some(Opcode { exec, cycles, mnemonic })
}

pub static OPCODES: [Option<Opcode>; 256] = [
    // 0x0_
    op(nop, 4, "NOP"),
    op(ld_bc_d16, 12, "LD BC, d16"),
    op(ld_bci_a, 8, "LD (BC), A"),
    op(inc_bc, 8, "INC BC"),
    op(inc_b, 4, "INC B"),
    op(dec_b, 4, "DEC B"),
    op(ld_b_d8, 8, "LD B, d8"),
    op(rlca, 4, "RLCA"),
    op(ld_d16i_sp, 20, "LD (a16), SP"),
    op(add_hl_bc, 8, "ADD HL, BC"),
    op(ld_a_bci, 8, "LD A, (BC)"),
    op(dec_bc, 8, "DEC BC"),
    op(inc_c, 4, "INC C"),
    op(dec_c, 4, "DEC C"),
    op(ld_c_d8, 8, "LD C, d8"),
    op(rrca, 4, "RRCA"),
    // 0x1_
    op(stop, 4, "STOP"),
    op(ld_de_d16, 12, "LD DE, d16"),
    op(ld_dei_a, 8, "LD (DE), A"),
    op(inc_de, 8, "INC DE"),
    op(inc_d, 4, "INC D"),
    op(dec_d, 4, "DEC D"),
    op(ld_d_d8, 8, "LD D, d8"),
    op(rla, 4, "RLA"),
    op(jr_e8, 12, "JR e8"),
    op(add_hl_de, 8, "ADD HL, DE"),
    op(ld_a_dei, 8, "LD A, (DE)"),
    op(dec_de, 8, "DEC DE"),
    op(inc_e, 4, "INC E"),
    op(dec_e, 4, "DEC E"),
    op(ld_e_d8, 8, "LD E, d8"),
    op(rra, 4, "RRA"),
    // 0x2_
    op(jr_nz_e8, 8, "JR NZ, e8"),
    op(ld_hl_d16, 12, "LD HL, d16"),
    op(ld_hlinc_a, 8, "LD (HL+), A"),
    op(inc_hl, 8, "INC HL"),
    op(inc_h, 4, "INC H"),
    op(dec_h, 4, "DEC H"),
    op(ld_h_d8, 8, "LD H, d8"),
    op(daa, 4, "DAA"),
    op(jr_z_e8, 8, "JR Z, e8"),
    op(add_hl_hl, 8, "ADD HL, HL"),
    op(ld_a_hlinc, 8, "LD A, (HL+)"),
    op(dec_hl, 8, "DEC HL"),
    op(inc_l, 4, "INC L"),
    op(dec_l, 4, "DEC L"),
    op(ld_l_d8, 8, "LD L, d8"),
    op(cpl, 4, "CPL"),
    // 0x3_
    op(jr_nc_e8, 8, "JR NC, e8"),
    op(ld_sp_d16, 12, "LD SP, d16"),
    op(ld_hldec_a, 8, "LD (HL-), A"),
    op(inc_sp, 8, "INC SP"),
    op(inc_hli, 12, "INC (HL)"),
    op(dec_hli, 12, "DEC (HL)"),
    op(ld_hli_d8, 12, "LD (HL), d8"),
    op(scf, 4, "SCF"),
    op(jr_c_e8, 8, "JR C, e8"),
    op(add_hl_sp, 8, "ADD HL, SP"),
    op(ld_a_hldec, 8, "LD A, (HL-)"),
    op(dec_sp, 8, "DEC SP"),
    op(inc_a, 4, "INC A"),
    op(dec_a, 4, "DEC A"),
    op(ld_a_d8, 8, "LD A, d8"),
    op(ccf, 4, "CCF"),
    // 0x4_
    op(ld_b_b, 4, "LD B, B"),
    op(ld_b_c, 4, "LD B, C"),
    op(ld_b_d, 4, "LD B, D"),
    op(ld_b_e, 4, "LD B, E"),
    op(ld_b_h, 4, "LD B, H"),
    op(ld_b_l, 4, "LD B, L"),
    op(ld_b_hli, 8, "LD B, (HL)"),
    op(ld_b_a, 4, "LD B, A"),
    op(ld_c_b, 4, "LD C, B"),
    op(ld_c_c, 4, "LD C, C"),
    op(ld_c_d, 4, "LD C, D"),
    op(ld_c_e, 4, "LD C, E"),
    op(ld_c_h, 4, "LD C, H"),
    op(ld_c_l, 4, "LD C, L"),
    op(ld_c_hli, 8, "LD C, (HL)"),
    op(ld_c_a, 4, "LD C, A"),
    // 0x5_
    op(ld_d_b, 4, "LD D, B"),
    op(ld_d_c, 4, "LD D, C"),
    op(ld_d_d, 4, "LD D, D"),
    op(ld_d_e, 4, "LD D, E"),
    op(ld_d_h, 4, "LD D, H"),
    op(ld_d_l, 4, "LD D, L"),
    op(ld_d_hli, 8, "LD D, (HL)"),
    op(ld_d_a, 4, "LD D, A"),
    op(ld_e_b, 4, "LD E, B"),
    op(ld_e_c, 4, "LD E, C"),
    op(ld_e_d, 4, "LD E, D"),
    op(ld_e_e, 4, "LD E, E"),
    op(ld_e_h, 4, "LD E, H"),
    op(ld_e_l, 4, "LD E, L"),
    op(ld_e_hli, 8, "LD E, (HL)"),
    op(ld_e_a, 4, "LD E, A"),
    // 0x6_
    op(ld_h_b, 4, "LD H, B"),
    op(ld_h_c, 4, "LD H, C"),
    op(ld_h_d, 4, "LD H, D"),
    op(ld_h_e, 4, "LD H, E"),
    op(ld_h_h, 4, "LD H, H"),
    op(ld_h_l, 4, "LD H, L"),
    op(ld_h_hli, 8, "LD H, (HL)"),
    op(ld_h_a, 4, "LD H, A"),
    op(ld_l_b, 4, "LD L, B"),
    op(ld_l_c, 4, "LD L, C"),
    op(ld_l_d, 4, "LD L, D"),
    op(ld_l_e, 4, "LD L, E"),
    op(ld_l_h, 4, "LD L, H"),
    op(ld_l_l, 4, "LD L, L"),
    op(ld_l_hli, 8, "LD L, (HL)"),
    op(ld_l_a, 4, "LD L, A"),
    // 0x7_
    op(ld_hli_b, 8, "LD (HL), B"),
    op(ld_hli_c, 8, "LD (HL), C"),
    op(ld_hli_d, 8, "LD (HL), D"),
    op(ld_hli_e, 8, "LD (HL), E"),
    op(ld_hli_h, 8, "LD (HL), H"),
    op(ld_hli_l, 8, "LD (HL), L"),
    op(halt, 4, "HALT"),
    op(ld_hli_a, 8, "LD (HL), A"),
    op(ld_a_b, 4, "LD A, B"),
    op(ld_a_c, 4, "LD A, C"),
    op(ld_a_d, 4, "LD A, D"),
    op(ld_a_e, 4, "LD A, E"),
    op(ld_a_h, 4, "LD A, H"),
    op(ld_a_l, 4, "LD A, L"),
    op(ld_a_hli, 8, "LD A, (HL)"),
    op(ld_a_a, 4, "LD A, A"),
    // 0x8_
    op(add_a_b, 4, "ADD A, B"),
    op(add_a_c, 4, "ADD A, C"),
    op(add_a_d, 4, "ADD A, D"),
    op(add_a_e, 4, "ADD A, E"),
    op(add_a_h, 4, "ADD A, H"),
    op(add_a_l, 4, "ADD A, L"),
    op(add_a_hli, 8, "ADD A, (HL)"),
    op(add_a_a, 4, "ADD A, A"),
    op(adc_a_b, 4, "ADC A, B"),
    op(adc_a_c, 4, "ADC A, C"),
    op(adc_a_d, 4, "ADC A, D"),
    op(adc_a_e, 4, "ADC A, E"),
    op(adc_a_h, 4, "ADC A, H"),
    op(adc_a_l, 4, "ADC A, L"),
    op(adc_a_hli, 8, "ADC A, (HL)"),
    op(adc_a_a, 4, "ADC A, A"),
    // 0x9_
    op(sub_a_b, 4, "SUB A, B"),
    op(sub_a_c, 4, "SUB A, C"),
    op(sub_a_d, 4, "SUB A, D"),
    op(sub_a_e, 4, "SUB A, E"),
    op(sub_a_h, 4, "SUB A, H"),
    op(sub_a_l, 4, "SUB A, L"),
    op(sub_a_hli, 8, "SUB A, (HL)"),
    op(sub_a_a, 4, "SUB A, A"),
    op(sbc_a_b, 4, "SBC A, B"),
    op(sbc_a_c, 4, "SBC A, C"),
    op(sbc_a_d, 4, "SBC A, D"),
    op(sbc_a_e, 4, "SBC A, E"),
    op(sbc_a_h, 4, "SBC A, H"),
    op(sbc_a_l, 4, "SBC A, L"),
    op(sbc_a_hli, 8, "SBC A, (HL)"),
    op(sbc_a_a, 4, "SBC A, A"),
    // 0xA_
    op(and_a_b, 4, "AND A, B"),
    op(and_a_c, 4, "AND A, C"),
    op(and_a_d, 4, "AND A, D"),
    op(and_a_e, 4, "AND A, E"),
    op(and_a_h, 4, "AND A, H"),
    op(and_a_l, 4, "AND A, L"),
    op(and_a_hli, 8, "AND A, (HL)"),
    op(and_a_a, 4, "AND A, A"),
    op(xor_a_b, 4, "XOR A, B"),
    op(xor_a_c, 4, "XOR A, C"),
    op(xor_a_d, 4, "XOR A, D"),
    op(xor_a_e, 4, "XOR A, E"),
    op(xor_a_h, 4, "XOR A, H"),
    op(xor_a_l, 4, "XOR A, L"),
    op(xor_a_hli, 8, "XOR A, (HL)"),
    op(xor_a_a, 4, "XOR A, A"),
    // 0xB_
    op(or_a_b, 4, "OR A, B"),
    op(or_a_c, 4, "OR A, C"),
    op(or_a_d, 4, "OR A, D"),
    op(or_a_e, 4, "OR A, E"),
    op(or_a_h, 4, "OR A, H"),
    op(or_a_l, 4, "OR A, L"),
    op(or_a_hli, 8, "OR A, (HL)"),
    op(or_a_a, 4, "OR A, A"),
    op(cp_a_b, 4, "CP A, B"),
    op(cp_a_c, 4, "CP A, C"),
    op(cp_a_d, 4, "CP A, D"),
    op(cp_a_e, 4, "CP A, E"),
    op(cp_a_h, 4, "CP A, H"),
    op(cp_a_l, 4, "CP A, L"),
    op(cp_a_hli, 8, "CP A, (HL)"),
    op(cp_a_a, 4, "CP A, A"),
    // 0xC_
    op(ret_nz, 8, "RET NZ"),
    op(pop_bc, 12, "POP BC"),
    op(jp_nz_d16, 12, "JP NZ, a16"),
    op(jp_d16, 16, "JP a16"),
    op(call_nz_d16, 12, "CALL NZ, a16"),
    op(push_bc, 16, "PUSH BC"),
    op(add_a_d8, 8, "ADD A, d8"),
    op(rst_00, 16, "RST 00H"),
    op(ret_z, 8, "RET Z"),
    op(ret, 16, "RET"),
    op(jp_z_d16, 12, "JP Z, a16"),
    op(cb::execute, 0, "PREFIX CB"),
    op(call_z_d16, 12, "CALL Z, a16"),
    op(call_d16, 24, "CALL a16"),
    op(adc_a_d8, 8, "ADC A, d8"),
    op(rst_08, 16, "RST 08H"),
    // 0xD_
    op(ret_nc, 8, "RET NC"),
    op(pop_de, 12, "POP DE"),
    op(jp_nc_d16, 12, "JP NC, a16"),
    None,
    op(call_nc_d16, 12, "CALL NC, a16"),
    op(push_de, 16, "PUSH DE"),
    op(sub_a_d8, 8, "SUB A, d8"),
    op(rst_10, 16, "RST 10H"),
    op(ret_c, 8, "RET C"),
    op(reti, 16, "RETI"),
    op(jp_c_d16, 12, "JP C, a16"),
    None,
    op(call_c_d16, 12, "CALL C, a16"),
    None,
    op(sbc_a_d8, 8, "SBC A, d8"),
    op(rst_18, 16, "RST 18H"),
    // 0xE_
    op(ldh_a8_a, 12, "LDH (a8), A"),
    op(pop_hl, 12, "POP HL"),
    op(ld_ci_a, 8, "LD (C), A"),
    None,
    None,
    op(push_hl, 16, "PUSH HL"),
    op(and_a_d8, 8, "AND A, d8"),
    op(rst_20, 16, "RST 20H"),
    op(add_sp_e8, 16, "ADD SP, e8"),
    op(jp_hl, 4, "JP HL"),
    op(ld_d16i_a, 16, "LD (a16), A"),
    None,
    None,
    None,
    op(xor_a_d8, 8, "XOR A, d8"),
    op(rst_28, 16, "RST 28H"),
    // 0xF_
    op(ldh_a_a8, 12, "LDH A, (a8)"),
    op(pop_af, 12, "POP AF"),
    op(ld_a_ci, 8, "LD A, (C)"),
    op(di, 4, "DI"),
    None,
    op(push_af, 16, "PUSH AF"),
    op(or_a_d8, 8, "OR A, d8"),
    op(rst_30, 16, "RST 30H"),
    op(ld_hl_sp_e8, 12, "LD HL, SP+e8"),
    op(ld_sp_hl, 8, "LD SP, HL"),
    op(ld_a_d16i, 16, "LD A, (a16)"),
    op(ei, 4, "EI"),
    None,
    None,
    op(cp_a_d8, 8, "CP A, d8"),
    op(rst_38, 16, "RST 38H"),
];

// The LD/ALU/INC/DEC blocks of the table are register-regular, the macros
// below pin that regularity down instead of 200 hand-written bodies.

macro_rules! ld_r_r {
    ($name:ident, $dst:ident, $src:ident) => {
        fn $name(cpu: &mut CPU, _: &mut dyn AddressSpace) {
            cpu.r.$dst = cpu.r.$src;
        }
    };
}

macro_rules! ld_r_d8 {
    ($name:ident, $dst:ident) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            cpu.r.$dst = cpu.fetch_byte(bus);
        }
    };
}

macro_rules! ld_r_hli {
    ($name:ident, $dst:ident) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            cpu.r.$dst = bus.read(cpu.r.get_hl());
        }
    };
}

macro_rules! ld_hli_r {
    ($name:ident, $src:ident) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            bus.write(cpu.r.get_hl(), cpu.r.$src);
        }
    };
}

/// An ALU operation between A and a register operand.
macro_rules! alu_r {
    ($name:ident, $method:ident, $src:ident $(, $extra:expr)?) => {
        fn $name(cpu: &mut CPU, _: &mut dyn AddressSpace) {
            cpu.$method(cpu.r.$src $(, $extra)?);
        }
    };
}

/// An ALU operation between A and the byte at (HL).
macro_rules! alu_hli {
    ($name:ident, $method:ident $(, $extra:expr)?) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            let value = bus.read(cpu.r.get_hl());
            cpu.$method(value $(, $extra)?);
        }
    };
}

/// An ALU operation between A and an immediate operand.
macro_rules! alu_d8 {
    ($name:ident, $method:ident $(, $extra:expr)?) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            let value = cpu.fetch_byte(bus);
            cpu.$method(value $(, $extra)?);
        }
    };
}

macro_rules! inc_dec_r {
    ($name:ident, $method:ident, $reg:ident) => {
        fn $name(cpu: &mut CPU, _: &mut dyn AddressSpace) {
            cpu.r.$reg = cpu.$method(cpu.r.$reg);
        }
    };
}

/// INC/DEC on a register pair, no flags involved.
macro_rules! inc_dec_rr {
    ($name:ident, $get:ident, $set:ident, $method:ident) => {
        fn $name(cpu: &mut CPU, _: &mut dyn AddressSpace) {
            let value = cpu.r.$get().$method(1);
            cpu.r.$set(value);
        }
    };
}

macro_rules! ld_rr_d16 {
    ($name:ident, $set:ident) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            let value = cpu.fetch_word(bus);
            cpu.r.$set(value);
        }
    };
}

macro_rules! push_rr {
    ($name:ident, $get:ident) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            let value = cpu.r.$get();
            cpu.push(bus, value);
        }
    };
}

macro_rules! pop_rr {
    ($name:ident, $set:ident) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            let value = cpu.pop(bus);
            cpu.r.$set(value);
        }
    };
}

macro_rules! rst {
    ($name:ident, $target:literal) => {
        fn $name(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
            let pc = cpu.pc;
            cpu.push(bus, pc);
            cpu.pc = $target;
        }
    };
}

ld_r_r!(ld_b_b, b, b);
ld_r_r!(ld_b_c, b, c);
ld_r_r!(ld_b_d, b, d);
ld_r_r!(ld_b_e, b, e);
ld_r_r!(ld_b_h, b, h);
ld_r_r!(ld_b_l, b, l);
ld_r_r!(ld_b_a, b, a);
ld_r_r!(ld_c_b, c, b);
ld_r_r!(ld_c_c, c, c);
ld_r_r!(ld_c_d, c, d);
ld_r_r!(ld_c_e, c, e);
ld_r_r!(ld_c_h, c, h);
ld_r_r!(ld_c_l, c, l);
ld_r_r!(ld_c_a, c, a);
ld_r_r!(ld_d_b, d, b);
ld_r_r!(ld_d_c, d, c);
ld_r_r!(ld_d_d, d, d);
ld_r_r!(ld_d_e, d, e);
ld_r_r!(ld_d_h, d, h);
ld_r_r!(ld_d_l, d, l);
ld_r_r!(ld_d_a, d, a);
ld_r_r!(ld_e_b, e, b);
ld_r_r!(ld_e_c, e, c);
ld_r_r!(ld_e_d, e, d);
ld_r_r!(ld_e_e, e, e);
ld_r_r!(ld_e_h, e, h);
ld_r_r!(ld_e_l, e, l);
ld_r_r!(ld_e_a, e, a);
ld_r_r!(ld_h_b, h, b);
ld_r_r!(ld_h_c, h, c);
ld_r_r!(ld_h_d, h, d);
ld_r_r!(ld_h_e, h, e);
ld_r_r!(ld_h_h, h, h);
ld_r_r!(ld_h_l, h, l);
ld_r_r!(ld_h_a, h, a);
ld_r_r!(ld_l_b, l, b);
ld_r_r!(ld_l_c, l, c);
ld_r_r!(ld_l_d, l, d);
ld_r_r!(ld_l_e, l, e);
ld_r_r!(ld_l_h, l, h);
ld_r_r!(ld_l_l, l, l);
ld_r_r!(ld_l_a, l, a);
ld_r_r!(ld_a_b, a, b);
ld_r_r!(ld_a_c, a, c);
ld_r_r!(ld_a_d, a, d);
ld_r_r!(ld_a_e, a, e);
ld_r_r!(ld_a_h, a, h);
ld_r_r!(ld_a_l, a, l);
ld_r_r!(ld_a_a, a, a);

ld_r_d8!(ld_b_d8, b);
ld_r_d8!(ld_c_d8, c);
ld_r_d8!(ld_d_d8, d);
ld_r_d8!(ld_e_d8, e);
ld_r_d8!(ld_h_d8, h);
ld_r_d8!(ld_l_d8, l);
ld_r_d8!(ld_a_d8, a);

ld_r_hli!(ld_b_hli, b);
ld_r_hli!(ld_c_hli, c);
ld_r_hli!(ld_d_hli, d);
ld_r_hli!(ld_e_hli, e);
ld_r_hli!(ld_h_hli, h);
ld_r_hli!(ld_l_hli, l);
ld_r_hli!(ld_a_hli, a);

ld_hli_r!(ld_hli_b, b);
ld_hli_r!(ld_hli_c, c);
ld_hli_r!(ld_hli_d, d);
ld_hli_r!(ld_hli_e, e);
ld_hli_r!(ld_hli_h, h);
ld_hli_r!(ld_hli_l, l);
ld_hli_r!(ld_hli_a, a);

alu_r!(add_a_b, alu_add, b, false);
alu_r!(add_a_c, alu_add, c, false);
alu_r!(add_a_d, alu_add, d, false);
alu_r!(add_a_e, alu_add, e, false);
alu_r!(add_a_h, alu_add, h, false);
alu_r!(add_a_l, alu_add, l, false);
alu_r!(add_a_a, alu_add, a, false);
alu_hli!(add_a_hli, alu_add, false);
alu_d8!(add_a_d8, alu_add, false);

alu_r!(adc_a_b, alu_add, b, true);
alu_r!(adc_a_c, alu_add, c, true);
alu_r!(adc_a_d, alu_add, d, true);
alu_r!(adc_a_e, alu_add, e, true);
alu_r!(adc_a_h, alu_add, h, true);
alu_r!(adc_a_l, alu_add, l, true);
alu_r!(adc_a_a, alu_add, a, true);
alu_hli!(adc_a_hli, alu_add, true);
alu_d8!(adc_a_d8, alu_add, true);

alu_r!(sub_a_b, alu_sub, b, false);
alu_r!(sub_a_c, alu_sub, c, false);
alu_r!(sub_a_d, alu_sub, d, false);
alu_r!(sub_a_e, alu_sub, e, false);
alu_r!(sub_a_h, alu_sub, h, false);
alu_r!(sub_a_l, alu_sub, l, false);
alu_r!(sub_a_a, alu_sub, a, false);
alu_hli!(sub_a_hli, alu_sub, false);
alu_d8!(sub_a_d8, alu_sub, false);

alu_r!(sbc_a_b, alu_sub, b, true);
alu_r!(sbc_a_c, alu_sub, c, true);
alu_r!(sbc_a_d, alu_sub, d, true);
alu_r!(sbc_a_e, alu_sub, e, true);
alu_r!(sbc_a_h, alu_sub, h, true);
alu_r!(sbc_a_l, alu_sub, l, true);
alu_r!(sbc_a_a, alu_sub, a, true);
alu_hli!(sbc_a_hli, alu_sub, true);
alu_d8!(sbc_a_d8, alu_sub, true);

alu_r!(and_a_b, alu_and, b);
alu_r!(and_a_c, alu_and, c);
alu_r!(and_a_d, alu_and, d);
alu_r!(and_a_e, alu_and, e);
alu_r!(and_a_h, alu_and, h);
alu_r!(and_a_l, alu_and, l);
alu_r!(and_a_a, alu_and, a);
alu_hli!(and_a_hli, alu_and);
alu_d8!(and_a_d8, alu_and);

alu_r!(xor_a_b, alu_xor, b);
alu_r!(xor_a_c, alu_xor, c);
alu_r!(xor_a_d, alu_xor, d);
alu_r!(xor_a_e, alu_xor, e);
alu_r!(xor_a_h, alu_xor, h);
alu_r!(xor_a_l, alu_xor, l);
alu_r!(xor_a_a, alu_xor, a);
alu_hli!(xor_a_hli, alu_xor);
alu_d8!(xor_a_d8, alu_xor);

alu_r!(or_a_b, alu_or, b);
alu_r!(or_a_c, alu_or, c);
alu_r!(or_a_d, alu_or, d);
alu_r!(or_a_e, alu_or, e);
alu_r!(or_a_h, alu_or, h);
alu_r!(or_a_l, alu_or, l);
alu_r!(or_a_a, alu_or, a);
alu_hli!(or_a_hli, alu_or);
alu_d8!(or_a_d8, alu_or);

alu_r!(cp_a_b, alu_cp, b);
alu_r!(cp_a_c, alu_cp, c);
alu_r!(cp_a_d, alu_cp, d);
alu_r!(cp_a_e, alu_cp, e);
alu_r!(cp_a_h, alu_cp, h);
alu_r!(cp_a_l, alu_cp, l);
alu_r!(cp_a_a, alu_cp, a);
alu_hli!(cp_a_hli, alu_cp);
alu_d8!(cp_a_d8, alu_cp);

inc_dec_r!(inc_b, alu_inc, b);
inc_dec_r!(inc_c, alu_inc, c);
inc_dec_r!(inc_d, alu_inc, d);
inc_dec_r!(inc_e, alu_inc, e);
inc_dec_r!(inc_h, alu_inc, h);
inc_dec_r!(inc_l, alu_inc, l);
inc_dec_r!(inc_a, alu_inc, a);
inc_dec_r!(dec_b, alu_dec, b);
inc_dec_r!(dec_c, alu_dec, c);
inc_dec_r!(dec_d, alu_dec, d);
inc_dec_r!(dec_e, alu_dec, e);
inc_dec_r!(dec_h, alu_dec, h);
inc_dec_r!(dec_l, alu_dec, l);
inc_dec_r!(dec_a, alu_dec, a);

inc_dec_rr!(inc_bc, get_bc, set_bc, wrapping_add);
inc_dec_rr!(inc_de, get_de, set_de, wrapping_add);
inc_dec_rr!(inc_hl, get_hl, set_hl, wrapping_add);
inc_dec_rr!(dec_bc, get_bc, set_bc, wrapping_sub);
inc_dec_rr!(dec_de, get_de, set_de, wrapping_sub);
inc_dec_rr!(dec_hl, get_hl, set_hl, wrapping_sub);

ld_rr_d16!(ld_bc_d16, set_bc);
ld_rr_d16!(ld_de_d16, set_de);
ld_rr_d16!(ld_hl_d16, set_hl);

push_rr!(push_bc, get_bc);
push_rr!(push_de, get_de);
push_rr!(push_hl, get_hl);
push_rr!(push_af, get_af);

pop_rr!(pop_bc, set_bc);
pop_rr!(pop_de, set_de);
pop_rr!(pop_hl, set_hl);
// POP AF drops the lower nibble of F, those flag bits do not exist
pop_rr!(pop_af, set_af);

rst!(rst_00, 0x0000);
rst!(rst_08, 0x0008);
rst!(rst_10, 0x0010);
rst!(rst_18, 0x0018);
rst!(rst_20, 0x0020);
rst!(rst_28, 0x0028);
rst!(rst_30, 0x0030);
rst!(rst_38, 0x0038);

fn nop(_: &mut CPU, _: &mut dyn AddressSpace) {}

/// STOP waits for a joypad line to toggle; without a power-down model it
/// behaves like NOP.
fn stop(_: &mut CPU, _: &mut dyn AddressSpace) {}

fn halt(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.is_halted = true;
}

fn di(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.ime = false;
}

fn ei(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.ime = true;
}

// The accumulator rotates always clear the zero flag, unlike their
// CB-prefixed counterparts.

fn rlca(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.r.a = cpu.alu_rlc(cpu.r.a);
    cpu.r.f.set(FlagsRegister::Z, false);
}

fn rla(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.r.a = cpu.alu_rl(cpu.r.a);
    cpu.r.f.set(FlagsRegister::Z, false);
}

fn rrca(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.r.a = cpu.alu_rrc(cpu.r.a);
    cpu.r.f.set(FlagsRegister::Z, false);
}

fn rra(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.r.a = cpu.alu_rr(cpu.r.a);
    cpu.r.f.set(FlagsRegister::Z, false);
}

fn daa(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.alu_daa();
}

fn cpl(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.r.a = !cpu.r.a;
    cpu.r.f.set(FlagsRegister::N, true);
    cpu.r.f.set(FlagsRegister::H, true);
}

fn scf(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.r.f.set(FlagsRegister::N, false);
    cpu.r.f.set(FlagsRegister::H, false);
    cpu.r.f.set(FlagsRegister::C, true);
}

fn ccf(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    let carry = cpu.r.f.carry();
    cpu.r.f.set(FlagsRegister::N, false);
    cpu.r.f.set(FlagsRegister::H, false);
    cpu.r.f.set(FlagsRegister::C, !carry);
}

// Relative jumps fetch the displacement before testing the condition,
// PC has to move past the operand either way.

fn jr_e8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let offset = cpu.fetch_byte(bus) as i8;
    cpu.jump_rel(offset);
}

fn jr_nz_e8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let offset = cpu.fetch_byte(bus) as i8;
    if !cpu.r.f.zero() {
        cpu.jump_rel(offset);
    }
}

fn jr_z_e8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let offset = cpu.fetch_byte(bus) as i8;
    if cpu.r.f.zero() {
        cpu.jump_rel(offset);
    }
}

fn jr_nc_e8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let offset = cpu.fetch_byte(bus) as i8;
    if !cpu.r.f.carry() {
        cpu.jump_rel(offset);
    }
}

fn jr_c_e8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let offset = cpu.fetch_byte(bus) as i8;
    if cpu.r.f.carry() {
        cpu.jump_rel(offset);
    }
}

fn jp_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    cpu.pc = cpu.fetch_word(bus);
}

fn jp_nz_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    if !cpu.r.f.zero() {
        cpu.pc = target;
    }
}

fn jp_z_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    if cpu.r.f.zero() {
        cpu.pc = target;
    }
}

fn jp_nc_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    if !cpu.r.f.carry() {
        cpu.pc = target;
    }
}

fn jp_c_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    if cpu.r.f.carry() {
        cpu.pc = target;
    }
}

fn jp_hl(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.pc = cpu.r.get_hl();
}

fn call_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    let pc = cpu.pc;
    cpu.push(bus, pc);
    cpu.pc = target;
}

fn call_nz_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    if !cpu.r.f.zero() {
        let pc = cpu.pc;
        cpu.push(bus, pc);
        cpu.pc = target;
    }
}

fn call_z_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    if cpu.r.f.zero() {
        let pc = cpu.pc;
        cpu.push(bus, pc);
        cpu.pc = target;
    }
}

fn call_nc_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    if !cpu.r.f.carry() {
        let pc = cpu.pc;
        cpu.push(bus, pc);
        cpu.pc = target;
    }
}

fn call_c_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let target = cpu.fetch_word(bus);
    if cpu.r.f.carry() {
        let pc = cpu.pc;
        cpu.push(bus, pc);
        cpu.pc = target;
    }
}

fn ret(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    cpu.pc = cpu.pop(bus);
}

fn ret_nz(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    if !cpu.r.f.zero() {
        ret(cpu, bus);
    }
}

fn ret_z(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    if cpu.r.f.zero() {
        ret(cpu, bus);
    }
}

fn ret_nc(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    if !cpu.r.f.carry() {
        ret(cpu, bus);
    }
}

fn ret_c(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    if cpu.r.f.carry() {
        ret(cpu, bus);
    }
}

fn reti(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    cpu.pc = cpu.pop(bus);
    cpu.ime = true;
}

// Indirect loads through the register pairs and absolute addresses.

fn ld_bci_a(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    bus.write(cpu.r.get_bc(), cpu.r.a);
}

fn ld_a_bci(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    cpu.r.a = bus.read(cpu.r.get_bc());
}

fn ld_dei_a(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    bus.write(cpu.r.get_de(), cpu.r.a);
}

fn ld_a_dei(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    cpu.r.a = bus.read(cpu.r.get_de());
}

fn ld_hlinc_a(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let hl = cpu.r.get_hl();
    bus.write(hl, cpu.r.a);
    cpu.r.set_hl(hl.wrapping_add(1));
}

fn ld_a_hlinc(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let hl = cpu.r.get_hl();
    cpu.r.a = bus.read(hl);
    cpu.r.set_hl(hl.wrapping_add(1));
}

fn ld_hldec_a(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let hl = cpu.r.get_hl();
    bus.write(hl, cpu.r.a);
    cpu.r.set_hl(hl.wrapping_sub(1));
}

fn ld_a_hldec(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let hl = cpu.r.get_hl();
    cpu.r.a = bus.read(hl);
    cpu.r.set_hl(hl.wrapping_sub(1));
}

fn ld_hli_d8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let value = cpu.fetch_byte(bus);
    bus.write(cpu.r.get_hl(), value);
}

fn ld_d16i_a(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let address = cpu.fetch_word(bus);
    bus.write(address, cpu.r.a);
}

fn ld_a_d16i(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let address = cpu.fetch_word(bus);
    cpu.r.a = bus.read(address);
}

fn ld_d16i_sp(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let address = cpu.fetch_word(bus);
    bus.write(address, cpu.sp as u8);
    bus.write(address.wrapping_add(1), (cpu.sp >> 8) as u8);
}

// High-page loads address 0xFF00 | offset.

fn ldh_a8_a(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let address = 0xFF00 | u16::from(cpu.fetch_byte(bus));
    bus.write(address, cpu.r.a);
}

fn ldh_a_a8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let address = 0xFF00 | u16::from(cpu.fetch_byte(bus));
    cpu.r.a = bus.read(address);
}

fn ld_ci_a(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    bus.write(0xFF00 | u16::from(cpu.r.c), cpu.r.a);
}

fn ld_a_ci(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    cpu.r.a = bus.read(0xFF00 | u16::from(cpu.r.c));
}

// Stack pointer arithmetic and loads.

fn ld_sp_d16(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    cpu.sp = cpu.fetch_word(bus);
}

fn ld_sp_hl(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.sp = cpu.r.get_hl();
}

fn inc_sp(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.sp = cpu.sp.wrapping_add(1);
}

fn dec_sp(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.sp = cpu.sp.wrapping_sub(1);
}

fn add_sp_e8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    cpu.sp = cpu.alu_add_sp(bus);
}

fn ld_hl_sp_e8(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let value = cpu.alu_add_sp(bus);
    cpu.r.set_hl(value);
}

fn add_hl_bc(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.alu_add_hl(cpu.r.get_bc());
}

fn add_hl_de(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.alu_add_hl(cpu.r.get_de());
}

fn add_hl_hl(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.alu_add_hl(cpu.r.get_hl());
}

fn add_hl_sp(cpu: &mut CPU, _: &mut dyn AddressSpace) {
    cpu.alu_add_hl(cpu.sp);
}

fn inc_hli(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let address = cpu.r.get_hl();
    let value = cpu.alu_inc(bus.read(address));
    bus.write(address, value);
}

fn dec_hli(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let address = cpu.r.get_hl();
    let value = cpu.alu_dec(bus.read(address));
    bus.write(address, value);
}
