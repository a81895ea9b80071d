use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum VmError {
    Io(std::io::Error),
    RomTooLarge { size: usize, max: usize },
    PcOutOfBounds(usize),
    InvalidOpcode { opcode: u16, addr: usize },
    StackOverflow { addr: usize },
    StackUnderflow { addr: usize },
    AddressOutOfRange { addr: usize },
    InvalidArgument(&'static str),
}

impl Display for VmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::RomTooLarge { size, max } => {
                write!(f, "ROM too large: {size} bytes (max {max})")
            }
            Self::PcOutOfBounds(pc) => {
                write!(f, "program counter out of bounds: 0x{pc:03x}")
            }
            Self::InvalidOpcode { opcode, addr } => {
                write!(f, "invalid opcode 0x{opcode:04x} at 0x{addr:03x}")
            }
            Self::StackOverflow { addr } => {
                write!(f, "call stack overflow at 0x{addr:03x}")
            }
            Self::StackUnderflow { addr } => {
                write!(f, "return with empty call stack at 0x{addr:03x}")
            }
            Self::AddressOutOfRange { addr } => {
                write!(f, "memory access out of range: 0x{addr:03x}")
            }
            Self::InvalidArgument(argument) => write!(f, "invalid argument: {argument}"),
        }
    }
}

impl std::error::Error for VmError {}

impl From<std::io::Error> for VmError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
