use rulesmith::{Combinator, Predicate, Root, Scope};

fn render_in(dsl: &str, scope: &Scope) -> String {
    Predicate::from_dsl(dsl)
        .unwrap()
        .resolve(scope)
        .unwrap()
        .render()
        .unwrap()
}

#[test]
fn dsl_owner_check_against_stored_document() {
    let stored = Scope::document("resource.data");
    assert_eq!(
        render_in("$owner == request.auth.uid", &stored),
        "resource.data.owner == request.auth.uid"
    );
}

#[test]
fn dsl_this_binds_to_owning_field() {
    let field = Scope::document("data").owned_by("age");
    assert_eq!(
        render_in("$this >= 0 AND $this < 150", &field),
        "(data.age >= 0 && data.age < 150)"
    );
}

#[test]
fn dsl_lookup_renders_foreign_get() {
    let stored = Scope::document("resource.data");
    assert_eq!(
        render_in("@store.owner == request.auth.uid", &stored),
        "get(resource.data.store).data.owner == request.auth.uid"
    );
}

#[test]
fn dsl_precedence_becomes_nesting() {
    let stored = Scope::document("resource.data");
    assert_eq!(
        render_in(
            "request.auth != null && $public == true || $owner == request.auth.uid",
            &stored
        ),
        "((request.auth != null && resource.data.public == true) || \
         resource.data.owner == request.auth.uid)"
    );
}

#[test]
fn dsl_parenthesized_group() {
    let stored = Scope::document("resource.data");
    assert_eq!(
        render_in("($a == 1 or $b == 2) and $c == 3", &stored),
        "((resource.data.a == 1 || resource.data.b == 2) && resource.data.c == 3)"
    );
}

#[test]
fn dsl_rewritten_operators() {
    let stored = Scope::document("resource.data");
    assert_eq!(
        render_in("$tags array-contains 'x'", &stored),
        "'x' in resource.data.tags"
    );
    assert_eq!(
        render_in("$tags array-contains-any ['a', 'b']", &stored),
        "resource.data.tags.hasAny(['a', 'b'])"
    );
    assert_eq!(
        render_in("$kind not-in [\"draft\"]", &stored),
        "!(resource.data.kind in [\"draft\"])"
    );
}

#[test]
fn dsl_multiline_with_comments() {
    let dsl = r#"
# readers must be signed in
request.auth != null
    # and either own the document
    AND ($owner == request.auth.uid
         OR request.auth.token.admin == true)  # or be an admin
"#;
    let p = Predicate::from_dsl(dsl).unwrap();
    assert_eq!(p.combinator, Combinator::And);
    assert_eq!(p.terms.len(), 2);
}

#[test]
fn dsl_predicate_in_collection() {
    let rules = Root::new()
        .collection("posts", "postId", |c| {
            c.field("owner", |f| f.string())
                .allow_read_if(Predicate::from_dsl("$owner == request.auth.uid").unwrap())
        })
        .render()
        .unwrap();
    assert!(rules.contains("allow get: if resource.data.owner == request.auth.uid;"));
    assert!(rules.contains("allow list: if resource.data.owner == request.auth.uid;"));
}

#[test]
fn dsl_this_outside_field_is_a_build_error() {
    let p = Predicate::from_dsl("$this == 1").unwrap();
    assert!(p.resolve(&Scope::document("resource.data")).is_err());
}

#[test]
fn dsl_invalid_inputs() {
    for input in ["", "$a ==", "a AND", "(a", "a b", "== b"] {
        assert!(
            Predicate::from_dsl(input).is_err(),
            "expected error for {input:?}"
        );
    }
}

#[test]
fn dsl_references_inside_calls_are_errors() {
    for input in [
        "!($owner == request.auth.uid)",
        "f($owner)",
        "exists(@store.owner) OR false",
    ] {
        let err = Predicate::from_dsl(input).unwrap_err();
        assert!(
            err.to_string().contains("field reference inside a raw expression"),
            "{input:?}: {err}"
        );
    }
}

#[test]
fn dsl_negated_call_without_references_is_kept() {
    let stored = Scope::document("resource.data");
    let dsl = "!exists(/databases/$(database)/documents/bans/x) AND $owner == request.auth.uid";
    assert_eq!(
        render_in(dsl, &stored),
        "(!exists(/databases/$(database)/documents/bans/x) && \
         resource.data.owner == request.auth.uid)"
    );
}
