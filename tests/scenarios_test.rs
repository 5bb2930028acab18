//! Concrete end-to-end LS-8 programs exercising print, arithmetic,
//! branch, call/ret, and division-by-zero paths, run through the
//! public `Machine` API the way an external loader and runner would
//! use it.

use ls8::{Machine, VecSink, VmError};

fn run(image: &[u8]) -> (Result<(), VmError>, String) {
    let mut machine = Machine::with_sink(VecSink::default());
    machine.load_program(image).unwrap();
    let result = machine.run();
    let output = String::from_utf8(machine.output().0.clone()).unwrap();
    (result, output)
}

#[test]
fn scenario_print_eight() {
    let (result, output) = run(&[0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
    assert!(result.is_ok());
    assert_eq!(output, "8\n");
}

#[test]
fn scenario_add_and_print() {
    let (result, output) = run(&[
        0x82, 0x00, 0x0A, 0x82, 0x01, 0x14, 0xA0, 0x00, 0x01, 0x47, 0x00, 0x01,
    ]);
    assert!(result.is_ok());
    assert_eq!(output, "30\n");
}

#[test]
fn scenario_multiply_with_wrap() {
    let (result, output) = run(&[
        0x82, 0x00, 0x10, 0x82, 0x01, 0x10, 0xA2, 0x00, 0x01, 0x47, 0x00, 0x01,
    ]);
    assert!(result.is_ok());
    assert_eq!(output, "0\n");
}

#[test]
fn scenario_cmp_and_jeq() {
    // R2 preloaded with the address of the "print 1" branch; CMP sets
    // E (5 == 5), so JEQ takes it.
    let print_one = 14u8;
    let (result, output) = run(&[
        0x82, 0x00, 0x05, // LDI R0,5
        0x82, 0x01, 0x05, // LDI R1,5
        0xA7, 0x00, 0x01, // CMP R0,R1
        0x82, 0x02, print_one, // LDI R2,<print_one>
        0x55, 0x02, // JEQ R2
        0x01, // fallthrough HLT (not reached)
        0x82, 0x03, 0x01, // print_one: LDI R3,1
        0x47, 0x03, // PRN R3
        0x01, // HLT
    ]);
    assert!(result.is_ok());
    assert_eq!(output, "1\n");
}

#[test]
fn scenario_call_ret() {
    let subroutine_address = 10u8;
    let (result, output) = run(&[
        0x82, 0x01, subroutine_address, // LDI R1,<subroutine>
        0x50, 0x01, // CALL R1
        0x50, 0x01, // CALL R1
        0x47, 0x00, // PRN R0
        0x01, // HLT
        0x65, 0x00, // subroutine: INC R0
        0x11, // RET
    ]);
    assert!(result.is_ok());
    assert_eq!(output, "2\n");
}

#[test]
fn scenario_division_by_zero() {
    let (result, _output) = run(&[
        0x82, 0x00, 0x05, // LDI R0,5
        0x82, 0x01, 0x00, // LDI R1,0
        0xA3, 0x00, 0x01, // DIV R0,R1
        0x01, // HLT
    ]);
    assert_eq!(result, Err(VmError::DivisionByZero));
}
