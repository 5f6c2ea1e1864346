//! End-to-end layout resolution across module fixtures tied together with a
//! [`modulon_layout::ModuleSource`] (no parser lives in this workspace, so
//! fixtures stand in for it).

mod common;

use common::FixtureSource;
use modulon_ast::{Decl, DeclKind, IncludeDecl, ModuleAst, StructDecl, StructMember, TemplateParam, TemplateParamDecl, TypeExpr};
use modulon_base::Location;
use modulon_layout::{InstantiationStore, LayoutResolver};

fn box_template() -> ModuleAst {
    let mut module = ModuleAst::new("box.fc");
    module.push(Decl::TemplateParam(TemplateParamDecl {
        name: "T".to_string(),
        location: Location::default(),
        params: vec![TemplateParam::new("T")],
    }));
    module.push(Decl::Struct(StructDecl::new(
        "Box",
        Location::default(),
        vec![StructMember::new("value", TypeExpr::named("T"))],
    )));
    module
}

#[test]
fn template_dedup_across_two_clients_sharing_the_same_argument_tuple() {
    let source = FixtureSource::new().with("box.fc", box_template());
    let resolver = LayoutResolver::new(8, &source);
    let mut store = InstantiationStore::new();

    let mut client_a = ModuleAst::new("client_a.fc");
    let mut inc_a = IncludeDecl::new("box", Location::default(), "box.fc", "box");
    inc_a.template_args.push(TypeExpr::primitive("i32", 4, 4));
    client_a.push(Decl::Include(inc_a));

    let mut client_b = ModuleAst::new("client_b.fc");
    let mut inc_b = IncludeDecl::new("box", Location::default(), "box.fc", "box");
    inc_b.template_args.push(TypeExpr::primitive("i32", 4, 4));
    client_b.push(Decl::Include(inc_b));

    resolver.resolve(client_a, &[], &[], &mut store).unwrap();
    // Only one Box<i32> instance should ever land in the store, no matter
    // how many distinct client modules include it with the same arguments.
    let after_first = store.len();
    resolver.resolve(client_b, &[], &[], &mut store).unwrap();
    assert_eq!(store.len(), after_first + 1, "second client adds only itself, reusing the Box<i32> instance");
}

#[test]
fn distinct_template_arguments_produce_distinct_instances() {
    let source = FixtureSource::new().with("box.fc", box_template());
    let resolver = LayoutResolver::new(8, &source);
    let mut store = InstantiationStore::new();

    let mut client = ModuleAst::new("client.fc");
    let mut inc_i32 = IncludeDecl::new("box_i32", Location::default(), "box.fc", "box_i32");
    inc_i32.template_args.push(TypeExpr::primitive("i32", 4, 4));
    let mut inc_i64 = IncludeDecl::new("box_i64", Location::default(), "box.fc", "box_i64");
    inc_i64.template_args.push(TypeExpr::primitive("i64", 8, 8));
    client.push(Decl::Include(inc_i32));
    client.push(Decl::Include(inc_i64));

    resolver.resolve(client, &[], &[], &mut store).unwrap();

    assert!(store.find("box.fc", &[4], &[4]).is_some());
    assert!(store.find("box.fc", &[8], &[8]).is_some());
    assert_ne!(store.find("box.fc", &[4], &[4]), store.find("box.fc", &[8], &[8]));
}

#[test]
fn unique_names_are_suffixed_on_collision() {
    let source = FixtureSource::new().with("box.fc", box_template());
    let resolver = LayoutResolver::new(8, &source);
    let mut store = InstantiationStore::new();

    let mut client = ModuleAst::new("client.fc");
    let mut inc_i32 = IncludeDecl::new("box_i32", Location::default(), "box.fc", "box_i32");
    inc_i32.template_args.push(TypeExpr::primitive("i32", 4, 4));
    let mut inc_i64 = IncludeDecl::new("box_i64", Location::default(), "box.fc", "box_i64");
    inc_i64.template_args.push(TypeExpr::primitive("i64", 8, 8));
    client.push(Decl::Include(inc_i32));
    client.push(Decl::Include(inc_i64));

    resolver.resolve(client, &[], &[], &mut store).unwrap();

    let idx1 = store.find("box.fc", &[4], &[4]).unwrap();
    let idx2 = store.find("box.fc", &[8], &[8]).unwrap();
    assert_ne!(store.get(idx1).unique_name, store.get(idx2).unique_name);
    assert!(store.get(idx1).unique_name.starts_with("box"));
    assert!(store.get(idx2).unique_name.starts_with("box"));
}

#[test]
fn foreign_type_resolves_through_an_included_module() {
    let mut lib = ModuleAst::new("lib.fc");
    lib.push(Decl::Struct(StructDecl::new(
        "Point",
        Location::default(),
        vec![StructMember::new("x", TypeExpr::primitive("i32", 4, 4)), StructMember::new("y", TypeExpr::primitive("i32", 4, 4))],
    )));

    let source = FixtureSource::new().with("lib.fc", lib);
    let resolver = LayoutResolver::new(8, &source);
    let mut store = InstantiationStore::new();

    let mut client = ModuleAst::new("client.fc");
    client.push(Decl::Include(IncludeDecl::new("lib", Location::default(), "lib.fc", "geo")));
    client.push(Decl::Struct(StructDecl::new(
        "Line",
        Location::default(),
        vec![
            StructMember::new("start", TypeExpr::foreign("geo", "Point")),
            StructMember::new("end", TypeExpr::foreign("geo", "Point")),
        ],
    )));

    let idx = resolver.resolve(client, &[], &[], &mut store).unwrap();
    let Decl::Struct(line) = store.get(idx).ast.find(DeclKind::Struct, "Line").unwrap() else {
        panic!("expected struct Line");
    };
    assert_eq!(line.struct_size, 16);
    assert_eq!(line.struct_align, 4);
    assert_eq!(line.members[0].offset, 0);
    assert_eq!(line.members[1].offset, 8);
}

#[test]
fn nested_template_instantiation_resolves_through_two_levels() {
    let mut inner = ModuleAst::new("inner.fc");
    inner.push(Decl::TemplateParam(TemplateParamDecl {
        name: "T".to_string(),
        location: Location::default(),
        params: vec![TemplateParam::new("T")],
    }));
    inner.push(Decl::Struct(StructDecl::new(
        "Cell",
        Location::default(),
        vec![StructMember::new("v", TypeExpr::named("T"))],
    )));

    let source = FixtureSource::new().with("inner.fc", inner);
    let resolver = LayoutResolver::new(8, &source);
    let mut store = InstantiationStore::new();

    let mut outer = ModuleAst::new("outer.fc");
    let mut inc = IncludeDecl::new("cell", Location::default(), "inner.fc", "cell");
    inc.template_args.push(TypeExpr::primitive("u8", 1, 1));
    outer.push(Decl::Include(inc));
    outer.push(Decl::Struct(StructDecl::new(
        "Holder",
        Location::default(),
        vec![StructMember::new("a", TypeExpr::primitive("i32", 4, 4)), StructMember::new("b", TypeExpr::foreign("cell", "Cell"))],
    )));

    let idx = resolver.resolve(outer, &[], &[], &mut store).unwrap();
    let Decl::Struct(holder) = store.get(idx).ast.find(DeclKind::Struct, "Holder").unwrap() else {
        panic!("expected struct Holder");
    };
    assert_eq!(holder.members[1].ty.size, 1);
    assert_eq!(holder.struct_size, 8);
    assert_eq!(holder.struct_align, 4);
}
