//! End-to-end tests for the stanzagen pipeline

use pretty_assertions::assert_eq;
use stanzagen::{
    generate, generate_with_config, ConfigError, GenerateConfig, GenerateError,
};

const SOURCES: &str = "\
$redis
define service {
  host $1
  description $2
}
$ping
define service {
  host $1
  check ping
}
";

fn fixed() -> GenerateConfig {
    GenerateConfig::new().with_timestamp("2026-01-01 00:00:00")
}

#[test]
fn test_end_to_end_single_host() {
    let config = "host1 $redis \"desc text\"\n";
    let output = generate_with_config(SOURCES, config, fixed()).expect("Should generate");

    assert_eq!(
        output,
        "# automatically generated by stanzagen at 2026-01-01 00:00:00\n\
         # DO NOT EDIT THIS MANUALLY, YOUR CHANGES WILL BE LOST\n\
         \n\
         define service {\n\
         \x20 host host1\n\
         \x20 description desc text\n\
         }\n\
         \n"
    );
}

#[test]
fn test_hosts_sorted_regardless_of_declaration_order() {
    let config = "zeta $ping\nalpha $ping\n";
    let output = generate_with_config(SOURCES, config, fixed()).expect("Should generate");

    let alpha = output.find("host alpha").expect("alpha block");
    let zeta = output.find("host zeta").expect("zeta block");
    assert!(alpha < zeta);
}

#[test]
fn test_group_bundle_expanded_per_host() {
    let config = "\
@base $ping, $redis \"shared desc\"
web01 @base
web02 @base, $redis \"extra desc\"
";
    let output = generate_with_config(SOURCES, config, fixed()).expect("Should generate");

    // web01 gets both group checks, hostname substituted into each.
    assert!(output.contains("host web01\n  check ping"));
    assert!(output.contains("host web01\n  description shared desc"));
    // web02 gets the group plus its own extra binding, group entries first.
    assert!(output.contains("host web02\n  description extra desc"));
    let group_entry = output.find("host web02\n  check ping").expect("group entry");
    let extra = output.find("host web02\n  description extra desc").expect("extra");
    assert!(group_entry < extra);
}

#[test]
fn test_regeneration_is_byte_identical() {
    let config = "@base $ping\nweb01 @base, $redis \"d\"\n";

    let first = generate_with_config(SOURCES, config, fixed()).expect("Should generate");
    let second = generate_with_config(SOURCES, config, fixed()).expect("Should generate");
    assert_eq!(first, second);
}

#[test]
fn test_all_validation_errors_reported_and_no_output() {
    let config = "host1 @nosuchgroup\nhost1 $nosuchsource\nhost2 $othernosuchsource\n";
    let GenerateError::Config(errors) = generate(SOURCES, config).unwrap_err();

    assert_eq!(errors.len(), 3);
    assert!(matches!(&errors[0], ConfigError::UnknownGroup { name, .. } if name == "nosuchgroup"));
    assert!(matches!(&errors[1], ConfigError::UnknownSource { name, .. } if name == "nosuchsource"));
    assert!(
        matches!(&errors[2], ConfigError::UnknownSource { name, .. } if name == "othernosuchsource")
    );
}

#[test]
fn test_error_report_formats_with_filename() {
    let config = "host1 $nosuchsource\n";
    let GenerateError::Config(errors) = generate(SOURCES, config).unwrap_err();

    let report = errors[0].format(config, "hosts.cfg");
    assert!(report.contains("hosts.cfg"));
    assert!(report.contains("nosuchsource"));
}

#[test]
fn test_comments_and_blank_lines_ignored() {
    let config = "\
# monitoring hosts
web01 $ping

# trailing comment
";
    let output = generate_with_config(SOURCES, config, fixed()).expect("Should generate");
    assert!(output.contains("host web01"));
    assert!(!output.contains("monitoring hosts"));
}

#[test]
fn test_out_of_range_placeholder_survives() {
    // $redis wants $2 but the host gives no explicit argument; the
    // placeholder stays verbatim instead of failing the run.
    let config = "web01 $redis\n";
    let output = generate_with_config(SOURCES, config, fixed()).expect("Should generate");
    assert!(output.contains("description $2"));
}

#[test]
fn test_banner_precedes_all_stanzas() {
    let config = "web01 $ping\n";
    let output = generate_with_config(SOURCES, config, fixed()).expect("Should generate");

    let mut lines = output.lines();
    assert_eq!(
        lines.next(),
        Some("# automatically generated by stanzagen at 2026-01-01 00:00:00")
    );
    assert_eq!(
        lines.next(),
        Some("# DO NOT EDIT THIS MANUALLY, YOUR CHANGES WILL BE LOST")
    );
}
