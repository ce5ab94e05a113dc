//! trybuild UI tests for bean_macros

#[test]
fn trybuild_bean_derive() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/bean_ok.rs");
    t.pass("tests/trybuild/bean_extension_ok.rs");
    t.pass("tests/trybuild/bean_constructor_ok.rs");
    t.compile_fail("tests/trybuild/bean_reference_not_shared_fail.rs");
    t.compile_fail("tests/trybuild/bean_enum_fail.rs");
    t.compile_fail("tests/trybuild/bean_name_without_kind_fail.rs");
    t.compile_fail("tests/trybuild/bean_unknown_arg_fail.rs");
}
