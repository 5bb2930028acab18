use ls8::loader::{self, LoaderError};
use ls8::{Machine, VecSink, VmError};

#[test]
fn loads_and_runs_a_text_program() {
    let source = "\
        # LDI R0,8\n\
        10000010\n\
        00000000\n\
        00001000\n\
        # PRN R0\n\
        01000111\n\
        00000000\n\
        # HLT\n\
        00000001\n\
    ";

    let mut machine = Machine::with_sink(VecSink::default());
    loader::load_into(&mut machine, source).unwrap();
    machine.run().unwrap();

    assert_eq!(
        String::from_utf8(machine.output().0.clone()).unwrap(),
        "8\n"
    );
}

#[test]
fn malformed_line_is_rejected_before_reaching_the_core() {
    let mut machine = Machine::<VecSink>::with_sink(VecSink::default());
    let result = loader::load_into(&mut machine, "not-binary");
    assert!(matches!(result, Err(LoaderError::MalformedLine(1, _))));
}

#[test]
fn oversized_program_surfaces_as_a_vm_error() {
    let source = "00000000\n".repeat(300);
    let mut machine = Machine::<VecSink>::with_sink(VecSink::default());
    let result = loader::load_into(&mut machine, &source);
    assert!(matches!(
        result,
        Err(LoaderError::Vm(VmError::ProgramTooLarge(300)))
    ));
}
