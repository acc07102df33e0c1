use lexforge_core::{Colors, MAX_CODE_POINT};

use crate::dump::{dump, dump_group, format_range};
use crate::test_utils::sample_artifact;

#[test]
fn dump_sample() {
    let out = dump(&sample_artifact(), Colors::OFF);
    insta::assert_snapshot!(out, @r#"
    group0 main (initial)
      rules
        group0_rule0 = "token a"
        group0_rule1 = "token digit"
      states
        S0 sink
        S1 start
          [0-9] -> S3
          'a' -> S2
        S2 accept group0_rule0
        S3 accept group0_rule1

    group1 string extends group0
      on_exit group1_on_exit = "token end"
      rules
        group1_rule0 = "pop"
      states
        S0 sink
        S1 start
          '\"' -> S2
        S2 accept group1_rule0
    "#);
}

#[test]
fn dump_colored_marks_sink() {
    let out = dump(&sample_artifact(), Colors::ON);
    assert!(out.contains("\x1b[31msink\x1b[0m"));
    assert!(out.contains("\x1b[34mgroup0 main\x1b[0m"));
}

#[test]
fn format_range_forms() {
    assert_eq!(format_range(0, MAX_CODE_POINT), ".");
    assert_eq!(format_range('x' as u32, 'x' as u32), "'x'");
    assert_eq!(format_range('a' as u32, 'z' as u32), "[a-z]");
    assert_eq!(format_range(0, 8), r"[\u{0}-\u{8}]");
}

#[test]
fn dump_single_group() {
    let artifact = sample_artifact();
    let out = dump_group(&artifact, 1, Colors::OFF).unwrap();
    assert!(out.starts_with("group1 string extends group0\n"));
    assert!(!out.contains("group0 main"));
    assert_eq!(dump_group(&artifact, 2, Colors::OFF), None);
}
