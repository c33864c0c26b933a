//! Decoder for the CB-prefixed secondary opcode block.
//!
//! The block is fully regular, so instead of a second 256-entry table the
//! opcode is decomposed arithmetically: bits 7-6 select the operation
//! class, bits 5-3 the bit index (or the rotate/shift variant for class 0)
//! and bits 2-0 the operand, where 6 addresses memory at HL and the others
//! map to the register file.

use crate::AddressSpace;
use crate::cpu::CPU;

/// Operand index addressing memory at HL instead of a register.
const HLI_OPERAND: u8 = 6;

/// Executes one CB-prefixed instruction and charges its T-cycles.
/// (HL) operands are read-modify-write through the bus and cost twice as
/// much as register operands; BIT only reads and costs 12 there.
pub(super) fn execute(cpu: &mut CPU, bus: &mut dyn AddressSpace) {
    let opcode = cpu.fetch_byte(bus);
    let class = opcode >> 6;
    let bit = (opcode >> 3) & 0b111;
    let operand = opcode & 0b111;

    let value = read_operand(cpu, bus, operand);
    match class {
        // Rotate/shift/swap, sub-selected by the bit index field
        0b00 => {
            let result = match bit {
                0 => cpu.alu_rlc(value),
                1 => cpu.alu_rrc(value),
                2 => cpu.alu_rl(value),
                3 => cpu.alu_rr(value),
                4 => cpu.alu_sla(value),
                5 => cpu.alu_sra(value),
                6 => cpu.alu_swap(value),
                _ => cpu.alu_srl(value),
            };
            write_operand(cpu, bus, operand, result);
        }
        0b01 => cpu.alu_bit(value, bit),
        0b10 => write_operand(cpu, bus, operand, value & !(1 << bit)),
        _ => write_operand(cpu, bus, operand, value | (1 << bit)),
    }

    let cycles = match (class, operand) {
        (0b01, HLI_OPERAND) => 12,
        (_, HLI_OPERAND) => 16,
        _ => 8,
    };
    cpu.clock.advance(cycles);
}

fn read_operand(cpu: &CPU, bus: &mut dyn AddressSpace, operand: u8) -> u8 {
    match operand {
        0 => cpu.r.b,
        1 => cpu.r.c,
        2 => cpu.r.d,
        3 => cpu.r.e,
        4 => cpu.r.h,
        5 => cpu.r.l,
        HLI_OPERAND => bus.read(cpu.r.get_hl()),
        _ => cpu.r.a,
    }
}

fn write_operand(cpu: &mut CPU, bus: &mut dyn AddressSpace, operand: u8, value: u8) {
    match operand {
        0 => cpu.r.b = value,
        1 => cpu.r.c = value,
        2 => cpu.r.d = value,
        3 => cpu.r.e = value,
        4 => cpu.r.h = value,
        5 => cpu.r.l = value,
        HLI_OPERAND => bus.write(cpu.r.get_hl(), value),
        _ => cpu.r.a = value,
    }
}
