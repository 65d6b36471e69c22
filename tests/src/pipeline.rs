//! Full load → classify → select → resolve → emit runs over the shared
//! JSON fixtures.

use rustc_hash::FxHashSet;

use crate::utils::load_fixture;

type NoFilter = Option<fn(&str) -> bool>;

const NO_FILTER: NoFilter = None;

#[test]
fn full_pipeline_produces_the_expected_block() {
    let store = load_fixture("foo.json");
    let text = cybind::generate(&store, "foo.h", NO_FILTER, NO_FILTER, None, false).unwrap();
    let expected = "\
cdef extern from 'foo.h':
    cdef enum:
        FOO_ALPHA = 9
        FOO_ZED = 7
    ctypedef foo_state foo_t
    cdef struct foo_state:
        int refcount
        char* label
        foo_state* next
    cdef enum foo_mode:
        FOO_READ = 0
        FOO_WRITE = 1
";
    assert_eq!(text, expected);
}

#[test]
fn two_runs_are_byte_identical() {
    let store = load_fixture("foo.json");
    let first = cybind::generate(&store, "foo.h", NO_FILTER, NO_FILTER, None, true).unwrap();
    let second = cybind::generate(&store, "foo.h", NO_FILTER, NO_FILTER, None, true).unwrap();
    assert_eq!(first, second);

    // and across a fresh load of the same document
    let reloaded = load_fixture("foo.json");
    let third = cybind::generate(&reloaded, "foo.h", NO_FILTER, NO_FILTER, None, true).unwrap();
    assert_eq!(first, third);
}

#[test]
fn closure_is_minimal_for_a_narrow_selection() {
    let store = load_fixture("foo.json");
    // bar_helper is void(void): no type definitions are required
    let text = cybind::generate(
        &store,
        "bar.h",
        NO_FILTER,
        Some(|name: &str| name.starts_with("bar_")),
        None,
        true,
    )
    .unwrap();
    assert!(!text.contains("foo_state"));
    assert!(!text.contains("ctypedef"));
    assert!(text.contains("void bar_helper()"));
}

#[test]
fn closure_is_sufficient_for_every_selected_signature() {
    let store = load_fixture("foo.json");
    let text = cybind::generate(&store, "foo.h", NO_FILTER, NO_FILTER, None, true).unwrap();
    // every non-fundamental name in the signatures has a declaration
    for needed in ["foo_t", "foo_state", "foo_mode"] {
        assert!(text.contains(needed), "missing declaration for {needed}");
    }
    // and each exactly once
    assert_eq!(text.matches("ctypedef foo_state foo_t").count(), 1);
    assert_eq!(text.matches("cdef struct foo_state:").count(), 1);
    assert_eq!(text.matches("cdef enum foo_mode:").count(), 1);
}

#[test]
fn allow_list_and_name_filter_compose_end_to_end() {
    let store = load_fixture("foo.json");
    let allow: FxHashSet<String> = ["foo_init".to_owned(), "bar_helper".to_owned()]
        .into_iter()
        .collect();
    let text = cybind::generate(
        &store,
        "foo.h",
        NO_FILTER,
        Some(|name: &str| name.starts_with("foo_")),
        Some(&allow),
        true,
    )
    .unwrap();
    assert!(text.contains("foo_t* foo_init(foo_mode mode)"));
    assert!(!text.contains("bar_helper"));
    assert!(!text.contains("foo_close"));
}

#[test]
fn location_filter_never_hides_dependencies() {
    let store = load_fixture("foo.json");
    // filter matches only the function declarations' lines, yet the
    // type definitions they depend on are still pulled and emitted
    let text = cybind::generate(
        &store,
        "foo.h",
        Some(|location: &str| location.starts_with("foo.h:4")),
        NO_FILTER,
        None,
        false,
    )
    .unwrap();
    assert!(text.contains("cdef struct foo_state:"));
    assert!(text.contains("ctypedef foo_state foo_t"));
    // the free-standing constants live at foo.h:30/31 and are filtered
    assert!(!text.contains("FOO_ALPHA"));
}

#[test]
fn dangling_reference_fails_the_whole_run() {
    let store = load_fixture("dangling.json");
    let result = cybind::generate(&store, "broken.h", NO_FILTER, NO_FILTER, None, false);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("unresolved type reference `_missing`"));
}

#[test]
fn malformed_document_fails_at_load_time() {
    let err = cybind::load_str(r#"[{"name": "no kind or id"}]"#).unwrap_err();
    assert!(err.to_string().contains("malformed AST input"));
}

#[test]
fn stages_compose_the_same_as_generate() -> anyhow::Result<()> {
    let store = load_fixture("foo.json");

    let classification = cybind_resolve::classify(&store, NO_FILTER);
    let kept = cybind_resolve::select_functions(&classification, NO_FILTER, None);
    let mut puller = cybind_resolve::TypePuller::new(&store);
    for function in &kept {
        puller.pull(function)?;
    }
    let needed = puller.into_items();
    let anon_values: Vec<_> = classification.enum_values.values().cloned().collect();
    let by_stages = cybind_codegen::emit(&store, "foo.h", &needed, &anon_values, &[])?;

    let in_one_call = cybind::generate(&store, "foo.h", NO_FILTER, NO_FILTER, None, false)?;
    assert_eq!(by_stages, in_one_call);
    Ok(())
}

#[test]
fn store_accepts_records_built_from_json_values() -> anyhow::Result<()> {
    let document = serde_json::json!([
        {"kind": "FundamentalType", "id": "_int", "name": "int"},
        {"kind": "Function", "id": "_f", "name": "probe", "location": "probe.h:1",
         "returns": "_int", "arguments": []}
    ]);
    let store = cybind::load_str(&document.to_string())?;
    let text = cybind::generate(&store, "probe.h", NO_FILTER, NO_FILTER, None, true)?;
    assert_eq!(text, "cdef extern from 'probe.h':\n    int probe()\n");
    Ok(())
}
