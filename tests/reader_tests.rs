// Integration tests for the term reader

use beamview::inspector::{ChildrenList, Icon, InspectorConfig, PaginatedValueNode};
use beamview::reader::{read_bindings, read_term, BARE_TERM_NAME};
use beamview::term::RemoteValue;

const SAMPLE: &str = include_str!("../demos/sample.term");

#[test]
fn test_displayed_values_read_back() {
    let sources = [
        "42",
        "-17",
        "-9223372036854775808",
        "9223372036854775807",
        "2.5",
        "1.0e20",
        "ok",
        "'hello world'",
        "'Elixir.MyApp.User'",
        "[1,2,3]",
        "{ok,{nested,[]}}",
        "#{a => 1,b => [x,y]}",
        "<<\"text\">>",
        "<<0,1,255>>",
        "<<>>",
        "#Pid<nonode@nohost.42.0>",
        "#Pid<nonode@nohost.42.0.3>",
        "#Port<nonode@nohost.7>",
        "#Ref<nonode@nohost.1.2.3>",
        "#Fun<lists.5.12345>",
    ];

    for source in sources {
        let value = read_term(source).unwrap();
        let displayed = value.to_string();
        assert_eq!(read_term(&displayed).unwrap(), value, "{} -> {}", source, displayed);
    }
}

#[test]
fn test_bare_term_is_one_binding() {
    let bindings = read_bindings("[1, 2].").unwrap();

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].name, BARE_TERM_NAME);
}

#[test]
fn test_duplicate_binding_reports_first_line() {
    let err = read_bindings("X = 1.\nY = 2.\nX = 3.").unwrap_err();

    assert!(err.to_string().contains("already bound at line 1"), "{}", err);
    assert_eq!(err.location.line, 3);
}

#[test]
fn test_syntax_error_has_location() {
    let err = read_bindings("A = {1, 2.\n").unwrap_err();

    assert_eq!(err.location.line, 1);
}

#[test]
fn test_sample_file() {
    let bindings = read_bindings(SAMPLE).unwrap();
    let config = InspectorConfig::default();

    let find = |name: &str| {
        bindings
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| PaginatedValueNode::new(binding.value.clone()))
            .unwrap()
    };

    assert_eq!(find("Answer").value(), &RemoteValue::Integer(42));
    assert_eq!(find("Squares").children_count(), 250);
    assert_eq!(
        find("User").presentation(&config).type_label.as_deref(),
        Some("MyApp.User")
    );
    assert_eq!(find("Self").presentation(&config).icon, Icon::PrimitiveValue);
    assert!(find("Log").presentation(&config).is_truncated());

    let mut config_node = find("Config");
    let mut sink = ChildrenList::new();
    config_node.compute_next_batch(&mut sink, 100).unwrap();
    assert_eq!(sink.labels(), vec!["'Weird Key'", "hosts", "retries", "timeout"]);
}
