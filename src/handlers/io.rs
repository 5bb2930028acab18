use super::reg_index;
use crate::{Machine, OutputSink};

impl<O: OutputSink> Machine<O> {
    pub(crate) fn op_prn(&mut self, a: u8) {
        let value = self.registers[reg_index(a)];
        self.output.print_decimal(value);
    }

    pub(crate) fn op_pra(&mut self, a: u8) {
        let value = self.registers[reg_index(a)];
        self.output.print_char(value);
    }
}
