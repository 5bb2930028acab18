use super::reg_index;
use crate::{Machine, OutputSink};

impl<O: OutputSink> Machine<O> {
    pub(crate) fn op_push(&mut self, a: u8) {
        let value = self.registers[reg_index(a)];
        self.push(value);
    }

    pub(crate) fn op_pop(&mut self, a: u8) {
        let value = self.pop();
        self.registers[reg_index(a)] = value;
    }
}
