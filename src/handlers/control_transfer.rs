use super::reg_index;
use crate::{Machine, OutputSink};

impl<O: OutputSink> Machine<O> {
    pub(crate) fn op_jmp(&mut self, a: u8) {
        self.pc = self.registers[reg_index(a)];
        self.pc_set_by_handler = true;
    }

    pub(crate) fn op_jeq(&mut self, a: u8) {
        if self.fl.equal() {
            self.op_jmp(a);
        }
    }

    pub(crate) fn op_jne(&mut self, a: u8) {
        if !self.fl.equal() {
            self.op_jmp(a);
        }
    }

    pub(crate) fn op_jgt(&mut self, a: u8) {
        if self.fl.greater() {
            self.op_jmp(a);
        }
    }

    pub(crate) fn op_jlt(&mut self, a: u8) {
        if self.fl.less() {
            self.op_jmp(a);
        }
    }

    pub(crate) fn op_jle(&mut self, a: u8) {
        if self.fl.less() || self.fl.equal() {
            self.op_jmp(a);
        }
    }

    pub(crate) fn op_jge(&mut self, a: u8) {
        if self.fl.greater() || self.fl.equal() {
            self.op_jmp(a);
        }
    }

    pub(crate) fn op_call(&mut self, a: u8) {
        let return_address = self.pc.wrapping_add(2);
        self.push(return_address);
        self.pc = self.registers[reg_index(a)];
        self.pc_set_by_handler = true;
    }

    pub(crate) fn op_ret(&mut self) {
        self.pc = self.pop();
        self.pc_set_by_handler = true;
    }
}
