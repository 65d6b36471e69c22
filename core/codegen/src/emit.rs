//! Renders a resolved closure into a `cdef extern` declaration block.

use std::rc::Rc;

use cybind_ast::arena::AstStore;
use cybind_ast::nodes::{
    AstNode, EnumDecl, EnumValueDecl, FunctionDecl, NodeId, RecordDecl,
};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::EmitError;

const INDENT: &str = "    ";

/// Renders one declaration block scoped to `header`.
///
/// `items` is the resolver's closure in discovery order; that order is
/// preserved verbatim. `anon_values` are the free-standing enumerator
/// constants; their AST order is meaningless for binding purposes, so
/// they are normalized by sorting on name. `functions` are appended
/// last; pass an empty slice for the default mode where the header
/// include itself is expected to declare them.
///
/// # Errors
///
/// [`EmitError`] when a rendered declaration references an id missing
/// from the store — impossible after a successful resolve.
pub fn emit(
    store: &AstStore,
    header: &str,
    items: &[AstNode],
    anon_values: &[Rc<EnumValueDecl>],
    functions: &[Rc<FunctionDecl>],
) -> Result<String, EmitError> {
    let mut out = String::new();
    out.push_str(&format!("cdef extern from '{header}':\n"));

    if !anon_values.is_empty() {
        let mut values: Vec<&Rc<EnumValueDecl>> = anon_values.iter().collect();
        values.sort_by(|a, b| a.name.cmp(&b.name));
        out.push_str(&format!("{INDENT}cdef enum:\n"));
        for v in values {
            out.push_str(&format!("{INDENT}{INDENT}{} = {}\n", v.name, v.value));
        }
    }

    // Anonymous records that the closure names through a typedef are
    // inlined into that typedef and skipped at their own position.
    let mut typedef_names: FxHashMap<NodeId, String> = FxHashMap::default();
    for item in items {
        if let AstNode::Typedef(t) = item
            && let Some(target) = store.find_node(&t.ty)
            && is_anonymous(target)
        {
            typedef_names
                .entry(target.id().clone())
                .or_insert_with(|| t.name.clone());
        }
    }

    for item in items {
        match item {
            AstNode::Typedef(t) => {
                let target = store
                    .find_node(&t.ty)
                    .ok_or_else(|| EmitError::UnknownType { id: t.ty.clone() })?;
                match target {
                    AstNode::Struct(r) if r.name.is_none() => {
                        render_record(&mut out, store, "ctypedef struct", &t.name, r, &typedef_names)?;
                    }
                    AstNode::Union(r) if r.name.is_none() => {
                        render_record(&mut out, store, "ctypedef union", &t.name, r, &typedef_names)?;
                    }
                    AstNode::Enumeration(e) if e.name.is_none() => {
                        render_enum(&mut out, store, &format!("ctypedef enum {}", t.name), e)?;
                    }
                    _ => {
                        let ty = type_ref(store, &t.ty, &typedef_names)?;
                        out.push_str(&format!("{INDENT}ctypedef {}\n", ty.declare(&t.name)));
                    }
                }
            }
            AstNode::Struct(r) => {
                if r.name.is_none() && typedef_names.contains_key(&r.id) {
                    continue;
                }
                let name = record_name(r);
                render_record(&mut out, store, "cdef struct", &name, r, &typedef_names)?;
            }
            AstNode::Union(r) => {
                if r.name.is_none() && typedef_names.contains_key(&r.id) {
                    continue;
                }
                let name = record_name(r);
                render_record(&mut out, store, "cdef union", &name, r, &typedef_names)?;
            }
            AstNode::Enumeration(e) => {
                if e.name.is_none() && typedef_names.contains_key(&e.id) {
                    continue;
                }
                let heading = match &e.name {
                    Some(name) => format!("cdef enum {name}"),
                    // an anonymous enum needs no tag, its members suffice
                    None => "cdef enum".to_owned(),
                };
                render_enum(&mut out, store, &heading, e)?;
            }
            // the closure only ever contains type definitions
            _ => {}
        }
    }

    for f in functions {
        let ret = type_ref(store, &f.returns, &typedef_names)?;
        let mut args = Vec::with_capacity(f.arguments.len());
        for argument in &f.arguments {
            let ty = type_ref(store, &argument.ty, &typedef_names)?;
            args.push(match &argument.name {
                Some(name) => ty.declare(name),
                None => ty.bare(),
            });
        }
        out.push_str(&format!(
            "{INDENT}{} {}({})\n",
            ret.base,
            f.name,
            args.join(", ")
        ));
    }

    Ok(out)
}

fn is_anonymous(node: &AstNode) -> bool {
    match node {
        AstNode::Struct(r) | AstNode::Union(r) => r.name.is_none(),
        AstNode::Enumeration(e) => e.name.is_none(),
        _ => false,
    }
}

fn record_name(r: &RecordDecl) -> String {
    r.name.clone().unwrap_or_else(|| placeholder(&r.id))
}

/// Deterministic name for an anonymous definition that nothing aliases.
fn placeholder(id: &NodeId) -> String {
    format!("__anon{id}")
}

fn render_record(
    out: &mut String,
    store: &AstStore,
    keyword: &str,
    name: &str,
    r: &RecordDecl,
    typedef_names: &FxHashMap<NodeId, String>,
) -> Result<(), EmitError> {
    out.push_str(&format!("{INDENT}{keyword} {name}:\n"));
    if r.fields.is_empty() {
        // opaque type: declarable, members never accessed
        out.push_str(&format!("{INDENT}{INDENT}pass\n"));
        return Ok(());
    }
    for field in &r.fields {
        let ty = type_ref(store, &field.ty, typedef_names)?;
        out.push_str(&format!("{INDENT}{INDENT}{}\n", ty.declare(&field.name)));
    }
    Ok(())
}

fn render_enum(
    out: &mut String,
    store: &AstStore,
    heading: &str,
    e: &EnumDecl,
) -> Result<(), EmitError> {
    out.push_str(&format!("{INDENT}{heading}:\n"));
    if e.values.is_empty() {
        out.push_str(&format!("{INDENT}{INDENT}pass\n"));
        return Ok(());
    }
    for vid in &e.values {
        let Some(AstNode::EnumValue(v)) = store.find_node(vid) else {
            return Err(EmitError::UnknownType { id: vid.clone() });
        };
        out.push_str(&format!("{INDENT}{INDENT}{} = {}\n", v.name, v.value));
    }
    Ok(())
}

/// A rendered type reference split into declarator pieces: `base` goes
/// before the declared name, `suffix` (array dimensions) after it.
struct TypeRef {
    base: String,
    suffix: String,
}

impl TypeRef {
    fn declare(&self, name: &str) -> String {
        format!("{} {}{}", self.base, name, self.suffix)
    }

    fn bare(&self) -> String {
        format!("{}{}", self.base, self.suffix)
    }
}

fn type_ref(
    store: &AstStore,
    id: &NodeId,
    typedef_names: &FxHashMap<NodeId, String>,
) -> Result<TypeRef, EmitError> {
    let mut seen = FxHashSet::default();
    type_ref_walk(store, id, typedef_names, &mut seen)
}

fn type_ref_walk(
    store: &AstStore,
    id: &NodeId,
    typedef_names: &FxHashMap<NodeId, String>,
    seen: &mut FxHashSet<NodeId>,
) -> Result<TypeRef, EmitError> {
    if !seen.insert(id.clone()) {
        return Err(EmitError::CyclicReference { id: id.clone() });
    }
    let node = store
        .find_node(id)
        .ok_or_else(|| EmitError::UnknownType { id: id.clone() })?;
    match node {
        AstNode::FundamentalType(f) => Ok(TypeRef {
            base: f.name.clone(),
            suffix: String::new(),
        }),
        AstNode::PointerType(w) => {
            let mut inner = type_ref_walk(store, &w.ty, typedef_names, seen)?;
            inner.base.push('*');
            Ok(inner)
        }
        AstNode::ArrayType(a) => {
            let mut inner = type_ref_walk(store, &a.ty, typedef_names, seen)?;
            let dim = a.size.map(|s| s.to_string()).unwrap_or_default();
            inner.suffix = format!("[{dim}]{}", inner.suffix);
            Ok(inner)
        }
        AstNode::CvQualifiedType(q) => {
            let mut inner = type_ref_walk(store, &q.ty, typedef_names, seen)?;
            if q.volatile {
                inner.base.insert_str(0, "volatile ");
            }
            if q.is_const {
                inner.base.insert_str(0, "const ");
            }
            Ok(inner)
        }
        // named definitions render by name and stop the walk
        _ => {
            let base = node.name().map_or_else(
                || {
                    typedef_names
                        .get(id)
                        .cloned()
                        .unwrap_or_else(|| placeholder(id))
                },
                str::to_owned,
            );
            Ok(TypeRef {
                base,
                suffix: String::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cybind_ast::loader::load_str;

    fn anon_value(id: &str, name: &str, value: i64) -> Rc<EnumValueDecl> {
        Rc::new(EnumValueDecl {
            id: NodeId::from(id),
            name: name.to_owned(),
            location: String::new(),
            value,
        })
    }

    fn node(store: &AstStore, id: &str) -> AstNode {
        store.find_node(&NodeId::from(id)).unwrap().clone()
    }

    #[test]
    fn header_clause_scopes_the_block() {
        let store = AstStore::default();
        let text = emit(&store, "sndfile.h", &[], &[], &[]).unwrap();
        assert_eq!(text, "cdef extern from 'sndfile.h':\n");
    }

    #[test]
    fn anonymous_enumerators_sort_lexicographically_by_name() {
        let store = AstStore::default();
        let values = vec![
            anon_value("_1", "Z", 1),
            anon_value("_2", "A", 2),
            anon_value("_3", "M", 3),
        ];
        let text = emit(&store, "foo.h", &[], &values, &[]).unwrap();
        assert_eq!(
            text,
            "cdef extern from 'foo.h':\n\
             \x20   cdef enum:\n\
             \x20       A = 2\n\
             \x20       M = 3\n\
             \x20       Z = 1\n"
        );
    }

    #[test]
    fn struct_fields_render_with_declarators() {
        let store = load_str(
            r#"[
                {"kind": "FundamentalType", "id": "_int", "name": "int"},
                {"kind": "FundamentalType", "id": "_char", "name": "char"},
                {"kind": "PointerType", "id": "_pc", "type": "_char"},
                {"kind": "ArrayType", "id": "_arr", "type": "_int", "size": 8},
                {"kind": "Struct", "id": "_s", "name": "Frame",
                 "fields": [{"name": "label", "type": "_pc"},
                            {"name": "counts", "type": "_arr"}]}
            ]"#,
        )
        .unwrap();
        let text = emit(&store, "foo.h", &[node(&store, "_s")], &[], &[]).unwrap();
        assert!(text.contains("    cdef struct Frame:\n"));
        assert!(text.contains("        char* label\n"));
        assert!(text.contains("        int counts[8]\n"));
    }

    #[test]
    fn opaque_record_renders_a_pass_body() {
        let store = load_str(
            r#"[{"kind": "Union", "id": "_u", "name": "Blob", "fields": []}]"#,
        )
        .unwrap();
        let text = emit(&store, "foo.h", &[node(&store, "_u")], &[], &[]).unwrap();
        assert!(text.contains("    cdef union Blob:\n        pass\n"));
    }

    #[test]
    fn typedef_of_named_type_renders_as_alias() {
        let store = load_str(
            r#"[
                {"kind": "FundamentalType", "id": "_int", "name": "int"},
                {"kind": "Typedef", "id": "_t", "name": "foo_count_t", "type": "_int"}
            ]"#,
        )
        .unwrap();
        let text = emit(&store, "foo.h", &[node(&store, "_t")], &[], &[]).unwrap();
        assert!(text.contains("    ctypedef int foo_count_t\n"));
    }

    #[test]
    fn typedef_of_anonymous_struct_is_inlined_once() {
        let store = load_str(
            r#"[
                {"kind": "FundamentalType", "id": "_int", "name": "int"},
                {"kind": "Struct", "id": "_s",
                 "fields": [{"name": "n", "type": "_int"}]},
                {"kind": "Typedef", "id": "_t", "name": "foo_t", "type": "_s"}
            ]"#,
        )
        .unwrap();
        let items = vec![node(&store, "_t"), node(&store, "_s")];
        let text = emit(&store, "foo.h", &items, &[], &[]).unwrap();
        assert!(text.contains("    ctypedef struct foo_t:\n        int n\n"));
        // the anonymous struct must not surface a second time
        assert_eq!(text.matches("int n").count(), 1);
        assert!(!text.contains("__anon"));
    }

    #[test]
    fn named_enum_keeps_declaration_order() {
        let store = load_str(
            r#"[
                {"kind": "Enumeration", "id": "_e", "name": "Mode",
                 "values": ["_z", "_a"]},
                {"kind": "EnumValue", "id": "_z", "name": "ZULU", "value": 5},
                {"kind": "EnumValue", "id": "_a", "name": "ALPHA", "value": 6}
            ]"#,
        )
        .unwrap();
        let text = emit(&store, "foo.h", &[node(&store, "_e")], &[], &[]).unwrap();
        assert!(text.contains(
            "    cdef enum Mode:\n        ZULU = 5\n        ALPHA = 6\n"
        ));
    }

    #[test]
    fn const_qualifier_prefixes_the_base_type() {
        let store = load_str(
            r#"[
                {"kind": "FundamentalType", "id": "_char", "name": "char"},
                {"kind": "CvQualifiedType", "id": "_cc", "type": "_char", "const": true},
                {"kind": "PointerType", "id": "_p", "type": "_cc"},
                {"kind": "Typedef", "id": "_t", "name": "label_t", "type": "_p"}
            ]"#,
        )
        .unwrap();
        let text = emit(&store, "foo.h", &[node(&store, "_t")], &[], &[]).unwrap();
        assert!(text.contains("    ctypedef const char* label_t\n"));
    }

    #[test]
    fn function_mode_renders_signatures_last() {
        let store = load_str(
            r#"[
                {"kind": "FundamentalType", "id": "_int", "name": "int"},
                {"kind": "FundamentalType", "id": "_void", "name": "void"},
                {"kind": "Struct", "id": "_s", "name": "foo_state", "fields": []},
                {"kind": "PointerType", "id": "_ps", "type": "_s"},
                {"kind": "Function", "id": "_f", "name": "foo_open", "returns": "_ps",
                 "arguments": [{"name": "flags", "type": "_int"}]},
                {"kind": "Function", "id": "_g", "name": "foo_tick", "returns": "_void"}
            ]"#,
        )
        .unwrap();
        let AstNode::Function(f) = node(&store, "_f") else { panic!() };
        let AstNode::Function(g) = node(&store, "_g") else { panic!() };
        let text = emit(
            &store,
            "foo.h",
            &[node(&store, "_s")],
            &[],
            &[f, g],
        )
        .unwrap();
        let expected_tail = "    foo_state* foo_open(int flags)\n    void foo_tick()\n";
        assert!(text.ends_with(expected_tail));
    }

    #[test]
    fn dangling_typedef_target_is_an_emit_error() {
        let store = load_str(
            r#"[{"kind": "Typedef", "id": "_t", "name": "foo_t", "type": "_404"}]"#,
        )
        .unwrap();
        let err = emit(&store, "foo.h", &[node(&store, "_t")], &[], &[]).unwrap_err();
        assert!(matches!(err, EmitError::UnknownType { .. }));
    }

    #[test]
    fn wrapper_cycle_is_an_emit_error_not_a_hang() {
        let store = load_str(
            r#"[
                {"kind": "PointerType", "id": "_p", "type": "_p"},
                {"kind": "Typedef", "id": "_t", "name": "loop_t", "type": "_p"}
            ]"#,
        )
        .unwrap();
        let err = emit(&store, "foo.h", &[node(&store, "_t")], &[], &[]).unwrap_err();
        assert!(matches!(err, EmitError::CyclicReference { .. }));
    }
}
