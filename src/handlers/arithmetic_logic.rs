use super::reg_index;
use crate::{Machine, OutputSink, VmError};

impl<O: OutputSink> Machine<O> {
    pub(crate) fn op_inc(&mut self, a: u8) {
        self.alu_inc(reg_index(a));
    }

    pub(crate) fn op_dec(&mut self, a: u8) {
        self.alu_dec(reg_index(a));
    }

    pub(crate) fn op_not(&mut self, a: u8) {
        self.alu_not(reg_index(a));
    }

    pub(crate) fn op_add(&mut self, a: u8, b: u8) {
        self.alu_add(reg_index(a), reg_index(b));
    }

    pub(crate) fn op_sub(&mut self, a: u8, b: u8) {
        self.alu_sub(reg_index(a), reg_index(b));
    }

    pub(crate) fn op_mul(&mut self, a: u8, b: u8) {
        self.alu_mul(reg_index(a), reg_index(b));
    }

    pub(crate) fn op_div(&mut self, a: u8, b: u8) -> Result<(), VmError> {
        self.alu_div(reg_index(a), reg_index(b))
    }

    pub(crate) fn op_mod(&mut self, a: u8, b: u8) -> Result<(), VmError> {
        self.alu_mod(reg_index(a), reg_index(b))
    }

    pub(crate) fn op_and(&mut self, a: u8, b: u8) {
        self.alu_and(reg_index(a), reg_index(b));
    }

    pub(crate) fn op_or(&mut self, a: u8, b: u8) {
        self.alu_or(reg_index(a), reg_index(b));
    }

    pub(crate) fn op_xor(&mut self, a: u8, b: u8) {
        self.alu_xor(reg_index(a), reg_index(b));
    }

    pub(crate) fn op_shl(&mut self, a: u8, b: u8) {
        self.alu_shl(reg_index(a), reg_index(b));
    }

    pub(crate) fn op_shr(&mut self, a: u8, b: u8) {
        self.alu_shr(reg_index(a), reg_index(b));
    }

    pub(crate) fn op_cmp(&mut self, a: u8, b: u8) {
        self.alu_cmp(reg_index(a), reg_index(b));
    }
}
