//! trybuild 编译测试

#[test]
fn ui_component_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/component_ok.rs");
}
