use super::reg_index;
use crate::{Machine, OutputSink};

impl<O: OutputSink> Machine<O> {
    /// `b` here is an immediate literal byte, not a register index.
    pub(crate) fn op_ldi(&mut self, a: u8, b: u8) {
        self.registers[reg_index(a)] = b;
    }

    pub(crate) fn op_ld(&mut self, a: u8, b: u8) {
        let address = self.registers[reg_index(b)];
        let value = self.mem_read(address);
        self.registers[reg_index(a)] = value;
    }

    pub(crate) fn op_st(&mut self, a: u8, b: u8) {
        let address = self.registers[reg_index(a)];
        let value = self.registers[reg_index(b)];
        self.mem_write(address, value);
    }
}
