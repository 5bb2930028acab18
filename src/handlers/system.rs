use super::reg_index;
use crate::{Machine, OutputSink};

impl<O: OutputSink> Machine<O> {
    pub(crate) fn op_nop(&mut self) {}

    pub(crate) fn op_hlt(&mut self) {
        self.halt = true;
    }

    /// Sets bit `R[a] mod 8` of IS. The interrupt this corresponds to
    /// is not generated here -- only its dispatch (in
    /// [`Machine::service_interrupts`]) is this handler's concern.
    pub(crate) fn op_int(&mut self, a: u8) {
        let source = self.registers[reg_index(a)];
        let bit = 1u8 << (source % 8);
        self.set_is(self.is() | bit);
    }

    /// Reverses [`Machine::service_interrupts`] exactly: pops R6..R0,
    /// then FL, then PC, and re-enables interrupts.
    pub(crate) fn op_iret(&mut self) {
        for i in (0..=6).rev() {
            self.registers[i] = self.pop();
        }
        self.fl = crate::flags::Flags::from_byte(self.pop());
        self.pc = self.pop();
        self.interrupts_enabled = true;
        self.pc_set_by_handler = true;
    }
}
