//! Static decode tables for the CIL instruction set (ECMA-335 III.3 and III.4).
//!
//! Two tables drive the decoder: [`INSTRUCTIONS`] covers single-byte opcodes,
//! indexed by the opcode byte, and [`INSTRUCTIONS_FE`] covers two-byte opcodes,
//! indexed by the second byte after the `0xFE` prefix. Slots without a defined
//! encoding hold `None`; the decoder turns those into unrecognized instructions
//! instead of failing.

use super::instruction::{FlowType, OpCode, OperandType};

/// Length of the longest mnemonic in the instruction set, in bytes.
///
/// Listing renderers use this to align operand columns across instructions.
pub const MAX_MNEMONIC_LENGTH: usize = 14;

const fn op(
    mnemonic: &'static str,
    operand_type: OperandType,
    flow_type: FlowType,
) -> Option<OpCode> {
    Some(OpCode {
        mnemonic,
        size: 1,
        operand_type,
        flow_type,
    })
}

const fn fe(
    mnemonic: &'static str,
    operand_type: OperandType,
    flow_type: FlowType,
) -> Option<OpCode> {
    Some(OpCode {
        mnemonic,
        size: 2,
        operand_type,
        flow_type,
    })
}

/// Decode metadata for single-byte opcodes, indexed by the opcode byte.
pub(crate) static INSTRUCTIONS: [Option<OpCode>; 256] = [
    // Misc
    op("nop", OperandType::None, FlowType::Sequential), // 0x00
    op("break", OperandType::None, FlowType::Sequential), // 0x01
    // Load/store argument shorthand
    op("ldarg.0", OperandType::None, FlowType::Sequential), // 0x02
    op("ldarg.1", OperandType::None, FlowType::Sequential), // 0x03
    op("ldarg.2", OperandType::None, FlowType::Sequential), // 0x04
    op("ldarg.3", OperandType::None, FlowType::Sequential), // 0x05
    // Load/store local shorthand
    op("ldloc.0", OperandType::None, FlowType::Sequential), // 0x06
    op("ldloc.1", OperandType::None, FlowType::Sequential), // 0x07
    op("ldloc.2", OperandType::None, FlowType::Sequential), // 0x08
    op("ldloc.3", OperandType::None, FlowType::Sequential), // 0x09
    op("stloc.0", OperandType::None, FlowType::Sequential), // 0x0A
    op("stloc.1", OperandType::None, FlowType::Sequential), // 0x0B
    op("stloc.2", OperandType::None, FlowType::Sequential), // 0x0C
    op("stloc.3", OperandType::None, FlowType::Sequential), // 0x0D
    // Load/store argument/local (short form)
    op("ldarg.s", OperandType::UInt8, FlowType::Sequential), // 0x0E
    op("ldarga.s", OperandType::UInt8, FlowType::Sequential), // 0x0F
    op("starg.s", OperandType::UInt8, FlowType::Sequential), // 0x10
    op("ldloc.s", OperandType::UInt8, FlowType::Sequential), // 0x11
    op("ldloca.s", OperandType::UInt8, FlowType::Sequential), // 0x12
    op("stloc.s", OperandType::UInt8, FlowType::Sequential), // 0x13
    // Null / constant loaders
    op("ldnull", OperandType::None, FlowType::Sequential), // 0x14
    op("ldc.i4.m1", OperandType::None, FlowType::Sequential), // 0x15
    op("ldc.i4.0", OperandType::None, FlowType::Sequential), // 0x16
    op("ldc.i4.1", OperandType::None, FlowType::Sequential), // 0x17
    op("ldc.i4.2", OperandType::None, FlowType::Sequential), // 0x18
    op("ldc.i4.3", OperandType::None, FlowType::Sequential), // 0x19
    op("ldc.i4.4", OperandType::None, FlowType::Sequential), // 0x1A
    op("ldc.i4.5", OperandType::None, FlowType::Sequential), // 0x1B
    op("ldc.i4.6", OperandType::None, FlowType::Sequential), // 0x1C
    op("ldc.i4.7", OperandType::None, FlowType::Sequential), // 0x1D
    op("ldc.i4.8", OperandType::None, FlowType::Sequential), // 0x1E
    op("ldc.i4.s", OperandType::Int8, FlowType::Sequential), // 0x1F
    op("ldc.i4", OperandType::Int32, FlowType::Sequential), // 0x20
    op("ldc.i8", OperandType::Int64, FlowType::Sequential), // 0x21
    op("ldc.r4", OperandType::Float32, FlowType::Sequential), // 0x22
    op("ldc.r8", OperandType::Float64, FlowType::Sequential), // 0x23
    None, // 0x24 undefined
    // Stack manipulation
    op("dup", OperandType::None, FlowType::Sequential), // 0x25
    op("pop", OperandType::None, FlowType::Sequential), // 0x26
    // Call / return
    op("jmp", OperandType::Token, FlowType::Call), // 0x27
    op("call", OperandType::Token, FlowType::Call), // 0x28
    op("calli", OperandType::Token, FlowType::Call), // 0x29
    op("ret", OperandType::None, FlowType::Return), // 0x2A
    // Branch (short form)
    op("br.s", OperandType::ShortBranchTarget, FlowType::UnconditionalBranch), // 0x2B
    op("brfalse.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x2C
    op("brtrue.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x2D
    op("beq.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x2E
    op("bge.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x2F
    op("bgt.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x30
    op("ble.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x31
    op("blt.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x32
    op("bne.un.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x33
    op("bge.un.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x34
    op("bgt.un.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x35
    op("ble.un.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x36
    op("blt.un.s", OperandType::ShortBranchTarget, FlowType::ConditionalBranch), // 0x37
    // Branch (long form)
    op("br", OperandType::BranchTarget, FlowType::UnconditionalBranch), // 0x38
    op("brfalse", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x39
    op("brtrue", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x3A
    op("beq", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x3B
    op("bge", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x3C
    op("bgt", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x3D
    op("ble", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x3E
    op("blt", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x3F
    op("bne.un", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x40
    op("bge.un", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x41
    op("bgt.un", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x42
    op("ble.un", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x43
    op("blt.un", OperandType::BranchTarget, FlowType::ConditionalBranch), // 0x44
    // Switch
    op("switch", OperandType::Switch, FlowType::ConditionalBranch), // 0x45
    // Indirect load (ldind.*)
    op("ldind.i1", OperandType::None, FlowType::Sequential), // 0x46
    op("ldind.u1", OperandType::None, FlowType::Sequential), // 0x47
    op("ldind.i2", OperandType::None, FlowType::Sequential), // 0x48
    op("ldind.u2", OperandType::None, FlowType::Sequential), // 0x49
    op("ldind.i4", OperandType::None, FlowType::Sequential), // 0x4A
    op("ldind.u4", OperandType::None, FlowType::Sequential), // 0x4B
    op("ldind.i8", OperandType::None, FlowType::Sequential), // 0x4C
    op("ldind.i", OperandType::None, FlowType::Sequential), // 0x4D
    op("ldind.r4", OperandType::None, FlowType::Sequential), // 0x4E
    op("ldind.r8", OperandType::None, FlowType::Sequential), // 0x4F
    op("ldind.ref", OperandType::None, FlowType::Sequential), // 0x50
    // Indirect store (stind.*)
    op("stind.ref", OperandType::None, FlowType::Sequential), // 0x51
    op("stind.i1", OperandType::None, FlowType::Sequential), // 0x52
    op("stind.i2", OperandType::None, FlowType::Sequential), // 0x53
    op("stind.i4", OperandType::None, FlowType::Sequential), // 0x54
    op("stind.i8", OperandType::None, FlowType::Sequential), // 0x55
    op("stind.r4", OperandType::None, FlowType::Sequential), // 0x56
    op("stind.r8", OperandType::None, FlowType::Sequential), // 0x57
    // Arithmetic
    op("add", OperandType::None, FlowType::Sequential), // 0x58
    op("sub", OperandType::None, FlowType::Sequential), // 0x59
    op("mul", OperandType::None, FlowType::Sequential), // 0x5A
    op("div", OperandType::None, FlowType::Sequential), // 0x5B
    op("div.un", OperandType::None, FlowType::Sequential), // 0x5C
    op("rem", OperandType::None, FlowType::Sequential), // 0x5D
    op("rem.un", OperandType::None, FlowType::Sequential), // 0x5E
    // Bitwise / logical
    op("and", OperandType::None, FlowType::Sequential), // 0x5F
    op("or", OperandType::None, FlowType::Sequential), // 0x60
    op("xor", OperandType::None, FlowType::Sequential), // 0x61
    op("shl", OperandType::None, FlowType::Sequential), // 0x62
    op("shr", OperandType::None, FlowType::Sequential), // 0x63
    op("shr.un", OperandType::None, FlowType::Sequential), // 0x64
    op("neg", OperandType::None, FlowType::Sequential), // 0x65
    op("not", OperandType::None, FlowType::Sequential), // 0x66
    // Conversion
    op("conv.i1", OperandType::None, FlowType::Sequential), // 0x67
    op("conv.i2", OperandType::None, FlowType::Sequential), // 0x68
    op("conv.i4", OperandType::None, FlowType::Sequential), // 0x69
    op("conv.i8", OperandType::None, FlowType::Sequential), // 0x6A
    op("conv.r4", OperandType::None, FlowType::Sequential), // 0x6B
    op("conv.r8", OperandType::None, FlowType::Sequential), // 0x6C
    op("conv.u4", OperandType::None, FlowType::Sequential), // 0x6D
    op("conv.u8", OperandType::None, FlowType::Sequential), // 0x6E
    // Virtual call / object model
    op("callvirt", OperandType::Token, FlowType::Call), // 0x6F
    op("cpobj", OperandType::Token, FlowType::Sequential), // 0x70
    op("ldobj", OperandType::Token, FlowType::Sequential), // 0x71
    op("ldstr", OperandType::Token, FlowType::Sequential), // 0x72
    op("newobj", OperandType::Token, FlowType::Call), // 0x73
    op("castclass", OperandType::Token, FlowType::Sequential), // 0x74
    op("isinst", OperandType::Token, FlowType::Sequential), // 0x75
    op("conv.r.un", OperandType::None, FlowType::Sequential), // 0x76
    None, // 0x77 undefined
    None, // 0x78 undefined
    // Boxing / unboxing
    op("unbox", OperandType::Token, FlowType::Sequential), // 0x79
    // Exception
    op("throw", OperandType::None, FlowType::Throw), // 0x7A
    // Field access
    op("ldfld", OperandType::Token, FlowType::Sequential), // 0x7B
    op("ldflda", OperandType::Token, FlowType::Sequential), // 0x7C
    op("stfld", OperandType::Token, FlowType::Sequential), // 0x7D
    op("ldsfld", OperandType::Token, FlowType::Sequential), // 0x7E
    op("ldsflda", OperandType::Token, FlowType::Sequential), // 0x7F
    op("stsfld", OperandType::Token, FlowType::Sequential), // 0x80
    // Object store
    op("stobj", OperandType::Token, FlowType::Sequential), // 0x81
    // Overflow conversion (unsigned source)
    op("conv.ovf.i1.un", OperandType::None, FlowType::Sequential), // 0x82
    op("conv.ovf.i2.un", OperandType::None, FlowType::Sequential), // 0x83
    op("conv.ovf.i4.un", OperandType::None, FlowType::Sequential), // 0x84
    op("conv.ovf.i8.un", OperandType::None, FlowType::Sequential), // 0x85
    op("conv.ovf.u1.un", OperandType::None, FlowType::Sequential), // 0x86
    op("conv.ovf.u2.un", OperandType::None, FlowType::Sequential), // 0x87
    op("conv.ovf.u4.un", OperandType::None, FlowType::Sequential), // 0x88
    op("conv.ovf.u8.un", OperandType::None, FlowType::Sequential), // 0x89
    op("conv.ovf.i.un", OperandType::None, FlowType::Sequential), // 0x8A
    op("conv.ovf.u.un", OperandType::None, FlowType::Sequential), // 0x8B
    // Boxing / arrays
    op("box", OperandType::Token, FlowType::Sequential), // 0x8C
    op("newarr", OperandType::Token, FlowType::Sequential), // 0x8D
    op("ldlen", OperandType::None, FlowType::Sequential), // 0x8E
    op("ldelema", OperandType::Token, FlowType::Sequential), // 0x8F
    // Array element load
    op("ldelem.i1", OperandType::None, FlowType::Sequential), // 0x90
    op("ldelem.u1", OperandType::None, FlowType::Sequential), // 0x91
    op("ldelem.i2", OperandType::None, FlowType::Sequential), // 0x92
    op("ldelem.u2", OperandType::None, FlowType::Sequential), // 0x93
    op("ldelem.i4", OperandType::None, FlowType::Sequential), // 0x94
    op("ldelem.u4", OperandType::None, FlowType::Sequential), // 0x95
    op("ldelem.i8", OperandType::None, FlowType::Sequential), // 0x96
    op("ldelem.i", OperandType::None, FlowType::Sequential), // 0x97
    op("ldelem.r4", OperandType::None, FlowType::Sequential), // 0x98
    op("ldelem.r8", OperandType::None, FlowType::Sequential), // 0x99
    op("ldelem.ref", OperandType::None, FlowType::Sequential), // 0x9A
    // Array element store
    op("stelem.i", OperandType::None, FlowType::Sequential), // 0x9B
    op("stelem.i1", OperandType::None, FlowType::Sequential), // 0x9C
    op("stelem.i2", OperandType::None, FlowType::Sequential), // 0x9D
    op("stelem.i4", OperandType::None, FlowType::Sequential), // 0x9E
    op("stelem.i8", OperandType::None, FlowType::Sequential), // 0x9F
    op("stelem.r4", OperandType::None, FlowType::Sequential), // 0xA0
    op("stelem.r8", OperandType::None, FlowType::Sequential), // 0xA1
    op("stelem.ref", OperandType::None, FlowType::Sequential), // 0xA2
    // Generic array element access
    op("ldelem", OperandType::Token, FlowType::Sequential), // 0xA3
    op("stelem", OperandType::Token, FlowType::Sequential), // 0xA4
    op("unbox.any", OperandType::Token, FlowType::Sequential), // 0xA5
    // 0xA6 - 0xB2 undefined
    None, None, None, None, None, None, None, None, None, None, None, None, None,
    // Overflow conversion (signed source)
    op("conv.ovf.i1", OperandType::None, FlowType::Sequential), // 0xB3
    op("conv.ovf.u1", OperandType::None, FlowType::Sequential), // 0xB4
    op("conv.ovf.i2", OperandType::None, FlowType::Sequential), // 0xB5
    op("conv.ovf.u2", OperandType::None, FlowType::Sequential), // 0xB6
    op("conv.ovf.i4", OperandType::None, FlowType::Sequential), // 0xB7
    op("conv.ovf.u4", OperandType::None, FlowType::Sequential), // 0xB8
    op("conv.ovf.i8", OperandType::None, FlowType::Sequential), // 0xB9
    op("conv.ovf.u8", OperandType::None, FlowType::Sequential), // 0xBA
    // 0xBB - 0xC1 undefined
    None, None, None, None, None, None, None,
    // Typed reference
    op("refanyval", OperandType::Token, FlowType::Sequential), // 0xC2
    op("ckfinite", OperandType::None, FlowType::Sequential), // 0xC3
    None, // 0xC4 undefined
    None, // 0xC5 undefined
    op("mkrefany", OperandType::Token, FlowType::Sequential), // 0xC6
    // 0xC7 - 0xCF undefined
    None, None, None, None, None, None, None, None, None,
    // Token / conversion
    op("ldtoken", OperandType::Token, FlowType::Sequential), // 0xD0
    op("conv.u2", OperandType::None, FlowType::Sequential), // 0xD1
    op("conv.u1", OperandType::None, FlowType::Sequential), // 0xD2
    op("conv.i", OperandType::None, FlowType::Sequential), // 0xD3
    op("conv.ovf.i", OperandType::None, FlowType::Sequential), // 0xD4
    op("conv.ovf.u", OperandType::None, FlowType::Sequential), // 0xD5
    // Overflow arithmetic
    op("add.ovf", OperandType::None, FlowType::Sequential), // 0xD6
    op("add.ovf.un", OperandType::None, FlowType::Sequential), // 0xD7
    op("mul.ovf", OperandType::None, FlowType::Sequential), // 0xD8
    op("mul.ovf.un", OperandType::None, FlowType::Sequential), // 0xD9
    op("sub.ovf", OperandType::None, FlowType::Sequential), // 0xDA
    op("sub.ovf.un", OperandType::None, FlowType::Sequential), // 0xDB
    // Exception handling
    op("endfinally", OperandType::None, FlowType::Return), // 0xDC
    op("leave", OperandType::BranchTarget, FlowType::UnconditionalBranch), // 0xDD
    op("leave.s", OperandType::ShortBranchTarget, FlowType::UnconditionalBranch), // 0xDE
    // Indirect store / conversion
    op("stind.i", OperandType::None, FlowType::Sequential), // 0xDF
    op("conv.u", OperandType::None, FlowType::Sequential), // 0xE0
    // 0xE1 - 0xFD undefined
    None, None, None, None, None, None, None, None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, None, None, None, None, None, None, None, None,
    None, // 0xFE two-byte prefix, handled by the decoder
    None, // 0xFF undefined
];

/// Decode metadata for `0xFE` prefixed opcodes, indexed by the second byte.
pub(crate) static INSTRUCTIONS_FE: [Option<OpCode>; 0x1F] = [
    fe("arglist", OperandType::None, FlowType::Sequential), // 0xFE 0x00
    fe("ceq", OperandType::None, FlowType::Sequential), // 0xFE 0x01
    fe("cgt", OperandType::None, FlowType::Sequential), // 0xFE 0x02
    fe("cgt.un", OperandType::None, FlowType::Sequential), // 0xFE 0x03
    fe("clt", OperandType::None, FlowType::Sequential), // 0xFE 0x04
    fe("clt.un", OperandType::None, FlowType::Sequential), // 0xFE 0x05
    fe("ldftn", OperandType::Token, FlowType::Sequential), // 0xFE 0x06
    fe("ldvirtftn", OperandType::Token, FlowType::Sequential), // 0xFE 0x07
    None, // 0xFE 0x08 undefined
    fe("ldarg", OperandType::UInt16, FlowType::Sequential), // 0xFE 0x09
    fe("ldarga", OperandType::UInt16, FlowType::Sequential), // 0xFE 0x0A
    fe("starg", OperandType::UInt16, FlowType::Sequential), // 0xFE 0x0B
    fe("ldloc", OperandType::UInt16, FlowType::Sequential), // 0xFE 0x0C
    fe("ldloca", OperandType::UInt16, FlowType::Sequential), // 0xFE 0x0D
    fe("stloc", OperandType::UInt16, FlowType::Sequential), // 0xFE 0x0E
    fe("localloc", OperandType::None, FlowType::Sequential), // 0xFE 0x0F
    None, // 0xFE 0x10 undefined
    fe("endfilter", OperandType::None, FlowType::Return), // 0xFE 0x11
    fe("unaligned.", OperandType::UInt8, FlowType::Sequential), // 0xFE 0x12
    fe("volatile.", OperandType::None, FlowType::Sequential), // 0xFE 0x13
    fe("tail.", OperandType::None, FlowType::Sequential), // 0xFE 0x14
    fe("initobj", OperandType::Token, FlowType::Sequential), // 0xFE 0x15
    fe("constrained.", OperandType::Token, FlowType::Sequential), // 0xFE 0x16
    fe("cpblk", OperandType::None, FlowType::Sequential), // 0xFE 0x17
    fe("initblk", OperandType::None, FlowType::Sequential), // 0xFE 0x18
    None, // 0xFE 0x19 undefined
    fe("rethrow", OperandType::None, FlowType::Throw), // 0xFE 0x1A
    None, // 0xFE 0x1B undefined
    fe("sizeof", OperandType::Token, FlowType::Sequential), // 0xFE 0x1C
    fe("refanytype", OperandType::None, FlowType::Sequential), // 0xFE 0x1D
    fe("readonly.", OperandType::None, FlowType::Sequential), // 0xFE 0x1E
];
