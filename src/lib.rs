use flags::Flags;
use opcode::Opcode;
use serde::{Deserialize, Serialize};

mod alu;
mod errors;
mod flags;
mod handlers;
pub mod loader;
mod opcode;

pub use errors::VmError;
pub use flags::Flags as MachineFlags;
pub use loader::LoaderError;

/// Stack pointer's initial value and the conventional "Key" mailbox
/// address used by interrupt-driven input.
pub const STACK_POINTER_STARTING_VALUE: u8 = 0xF4;
/// Base address of the eight interrupt vectors I0..I7.
pub const INTERRUPT_VECTOR_BASE: u8 = 0xF8;
/// Register index aliased as the Interrupt Mask.
pub const IM_REGISTER: usize = 5;
/// Register index aliased as the Interrupt Status.
pub const IS_REGISTER: usize = 6;
/// Register index aliased as the Stack Pointer.
pub const SP_REGISTER: usize = 7;

/// The host-provided sink that PRN/PRA write to: the one external
/// boundary the LS-8 core crosses.
pub trait OutputSink {
    /// Emits the decimal textual form of `value` followed by a newline.
    fn print_decimal(&mut self, value: u8);

    /// Emits exactly one byte: the character whose code is `value`, no
    /// separator.
    fn print_char(&mut self, value: u8);
}

/// Writes to the process's standard output. The default sink used by
/// [`Machine::new`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn print_decimal(&mut self, value: u8) {
        println!("{value}");
    }

    fn print_char(&mut self, value: u8) {
        print!("{}", value as char);
    }
}

/// Captures emitted bytes in memory instead of writing them anywhere.
/// Used by tests to assert the VM's output byte-for-byte.
#[derive(Debug, Default, Clone)]
pub struct VecSink(pub Vec<u8>);

impl OutputSink for VecSink {
    fn print_decimal(&mut self, value: u8) {
        self.0.extend_from_slice(value.to_string().as_bytes());
        self.0.push(b'\n');
    }

    fn print_char(&mut self, value: u8) {
        self.0.push(value);
    }
}

/// A debugging/test-only snapshot of [`Machine`]'s state: the eight
/// registers, PC/IR/FL, and the non-zero RAM cells as `(address,
/// value)` pairs. This is not a persistence feature -- it exists so a
/// failing program's exact state can be captured in an assertion or a
/// bug report, not so a machine can be resumed across process runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MachineSnapshot {
    pub pc: u8,
    pub ir: u8,
    pub fl: u8,
    pub registers: [u8; 8],
    pub ram: Vec<(u8, u8)>,
}

/// The LS-8 virtual machine: registers, flags, the 256-byte flat
/// address space, and the fetch/decode/execute loop over it.
///
/// `O` is the output sink PRN/PRA write through; it defaults to
/// [`StdoutSink`] so `Machine::new()` works out of the box with no type
/// parameters spelled out at the call site.
pub struct Machine<O: OutputSink = StdoutSink> {
    pub registers: [u8; 8],
    pub pc: u8,
    pub ir: u8,
    pub mar: u8,
    pub mdr: u8,
    pub fl: Flags,
    pub halt: bool,
    pub interrupts_enabled: bool,
    pc_set_by_handler: bool,
    op_a: u8,
    op_b: u8,
    ram: [u8; 256],
    output: O,
}

impl Default for Machine<StdoutSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine<StdoutSink> {
    /// Creates a machine that prints to stdout, with all registers and
    /// RAM zero except SP (`R[7]`), which starts at `0xF4`.
    pub fn new() -> Self {
        Self::with_sink(StdoutSink)
    }
}

impl<O: OutputSink> Machine<O> {
    pub fn with_sink(output: O) -> Self {
        let mut registers = [0u8; 8];
        registers[SP_REGISTER] = STACK_POINTER_STARTING_VALUE;

        Self {
            registers,
            pc: 0,
            ir: 0,
            mar: 0,
            mdr: 0,
            fl: Flags::new(),
            halt: false,
            interrupts_enabled: true,
            pc_set_by_handler: false,
            op_a: 0,
            op_b: 0,
            ram: [0; 256],
            output,
        }
    }

    pub fn halted(&self) -> bool {
        self.halt
    }

    /// Borrows the output sink. Mainly useful for tests driving the VM
    /// entirely through the public API (e.g. an external integration
    /// test) that need to inspect what was printed.
    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn im(&self) -> u8 {
        self.registers[IM_REGISTER]
    }

    pub fn set_im(&mut self, value: u8) {
        self.registers[IM_REGISTER] = value;
    }

    pub fn is(&self) -> u8 {
        self.registers[IS_REGISTER]
    }

    pub fn set_is(&mut self, value: u8) {
        self.registers[IS_REGISTER] = value;
    }

    /// A view onto `R[7]`. The stack pointer lives in exactly one
    /// place; there is no separate `sp` field to drift out of sync
    /// with `R[7]`.
    pub fn sp(&self) -> u8 {
        self.registers[SP_REGISTER]
    }

    pub fn set_sp(&mut self, value: u8) {
        self.registers[SP_REGISTER] = value;
    }

    pub fn equal_flag(&self) -> bool {
        self.fl.equal()
    }

    pub fn greater_flag(&self) -> bool {
        self.fl.greater()
    }

    pub fn less_flag(&self) -> bool {
        self.fl.less()
    }

    /// Reads interrupt vector `n` (0..=7) at `RAM[0xF8 + n]`.
    pub fn interrupt_vector(&self, n: u8) -> u8 {
        self.read_byte(INTERRUPT_VECTOR_BASE.wrapping_add(n & 0x07))
    }

    /// Reads a single byte directly, bypassing MAR/MDR latching. Used
    /// by the loader and by tests to inspect memory without going
    /// through an opcode.
    pub fn read_byte(&self, address: u8) -> u8 {
        self.ram[address as usize]
    }

    /// Writes a single byte directly, bypassing MAR/MDR latching.
    pub fn write_byte(&mut self, address: u8, value: u8) {
        self.ram[address as usize] = value;
    }

    /// Loads a raw byte image into `RAM[0..image.len())`. The rest of
    /// RAM (and the whole machine) is reset to its initial state first,
    /// so a `Machine` can be reused across programs. Returns
    /// [`VmError::ProgramTooLarge`] when `image.len()` exceeds the
    /// 256-byte address space.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), VmError> {
        if image.len() > self.ram.len() {
            return Err(VmError::ProgramTooLarge(image.len()));
        }

        self.ram = [0; 256];
        self.ram[..image.len()].copy_from_slice(image);

        self.registers = [0; 8];
        self.registers[SP_REGISTER] = STACK_POINTER_STARTING_VALUE;
        self.pc = 0;
        self.ir = 0;
        self.mar = 0;
        self.mdr = 0;
        self.fl = Flags::new();
        self.halt = false;
        self.interrupts_enabled = true;

        Ok(())
    }

    /// Captures the current state for debugging/test assertions.
    pub fn snapshot(&self) -> MachineSnapshot {
        let ram = self
            .ram
            .iter()
            .enumerate()
            .filter_map(|(address, &value)| (value != 0).then_some((address as u8, value)))
            .collect();

        MachineSnapshot {
            pc: self.pc,
            ir: self.ir,
            fl: self.fl.0,
            registers: self.registers,
            ram,
        }
    }

    /// Runs the VM until it halts or a fatal error occurs.
    pub fn run(&mut self) -> Result<(), VmError> {
        while !self.halt {
            self.step()?;
        }
        Ok(())
    }

    /// Performs one fetch/decode/execute/advance cycle, after first
    /// checking for a pending interrupt dispatch. Returns `Ok(())` on a
    /// completed step (which may have set `halt`); returns `Err` on an
    /// undefined opcode or a division by zero, leaving the machine
    /// halted either way.
    pub fn step(&mut self) -> Result<(), VmError> {
        if self.halt {
            return Ok(());
        }

        self.service_interrupts();
        if self.halt {
            return Ok(());
        }

        self.fetch();

        let opcode = match Opcode::decode(self.ir) {
            Some(opcode) => opcode,
            None => {
                self.halt = true;
                log::error!("undefined opcode {:#04X} at PC {:#04X}", self.ir, self.pc);
                return Err(VmError::UndefinedOpcode(self.ir, self.pc));
            }
        };

        self.pc_set_by_handler = false;

        if let Err(error) = self.execute(opcode) {
            self.halt = true;
            log::error!("{error} (opcode {:#04X} at PC {:#04X})", self.ir, self.pc);
            return Err(error);
        }

        if !self.pc_set_by_handler {
            let length = opcode::instruction_length(self.ir);
            self.pc = self.pc.wrapping_add(length);
        }

        Ok(())
    }

    /// Fetches the opcode and both operand bytes. Both operand bytes
    /// are always fetched even when the opcode uses fewer -- this has
    /// no branches on addressing length, so an unused operand slot is
    /// never skipped as a side effect.
    fn fetch(&mut self) {
        self.ir = self.mem_read(self.pc);
        self.op_a = self.mem_read(self.pc.wrapping_add(1));
        self.op_b = self.mem_read(self.pc.wrapping_add(2));
    }

    fn execute(&mut self, opcode: Opcode) -> Result<(), VmError> {
        let a = self.op_a;
        let b = self.op_b;

        match opcode {
            Opcode::Nop => self.op_nop(),
            Opcode::Hlt => self.op_hlt(),
            Opcode::Ret => self.op_ret(),
            Opcode::Iret => self.op_iret(),
            Opcode::Push => self.op_push(a),
            Opcode::Pop => self.op_pop(a),
            Opcode::Prn => self.op_prn(a),
            Opcode::Pra => self.op_pra(a),
            Opcode::Call => self.op_call(a),
            Opcode::Int => self.op_int(a),
            Opcode::Jmp => self.op_jmp(a),
            Opcode::Jeq => self.op_jeq(a),
            Opcode::Jne => self.op_jne(a),
            Opcode::Jgt => self.op_jgt(a),
            Opcode::Jlt => self.op_jlt(a),
            Opcode::Jle => self.op_jle(a),
            Opcode::Jge => self.op_jge(a),
            Opcode::Inc => self.op_inc(a),
            Opcode::Dec => self.op_dec(a),
            Opcode::Not => self.op_not(a),
            Opcode::Ldi => self.op_ldi(a, b),
            Opcode::Ld => self.op_ld(a, b),
            Opcode::St => self.op_st(a, b),
            Opcode::Add => self.op_add(a, b),
            Opcode::Sub => self.op_sub(a, b),
            Opcode::Mul => self.op_mul(a, b),
            Opcode::Div => self.op_div(a, b)?,
            Opcode::Mod => self.op_mod(a, b)?,
            Opcode::Cmp => self.op_cmp(a, b),
            Opcode::And => self.op_and(a, b),
            Opcode::Or => self.op_or(a, b),
            Opcode::Xor => self.op_xor(a, b),
            Opcode::Shl => self.op_shl(a, b),
            Opcode::Shr => self.op_shr(a, b),
        }

        Ok(())
    }

    /// The interrupt dispatch state machine. If interrupts are enabled
    /// and `IM & IS` has any set bits, dispatches the lowest-numbered
    /// one: disables interrupts, clears its IS bit, pushes PC, FL, then
    /// R0..R6 in that order, and jumps to its vector. Returns whether a
    /// dispatch happened, so tests can assert it without inspecting PC
    /// arithmetic.
    ///
    /// Generating interrupts from hardware events is out of scope; this
    /// only reacts to whatever already got OR'd into IS, whether that
    /// was `INT` or a test setting `IS` directly.
    pub fn service_interrupts(&mut self) -> bool {
        if !self.interrupts_enabled {
            return false;
        }

        let pending = self.im() & self.is();
        if pending == 0 {
            return false;
        }

        let n = pending.trailing_zeros() as u8;

        self.interrupts_enabled = false;
        self.set_is(self.is() & !(1 << n));

        self.push(self.pc);
        self.push(self.fl.0);
        for i in 0..=6 {
            self.push(self.registers[i]);
        }

        self.pc = self.interrupt_vector(n);
        true
    }
}
