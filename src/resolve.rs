use tracing::trace;

use crate::types::{BuildError, Condition, Operand, Predicate, Resolved, Scope, Term};

pub(crate) fn resolve(rule: &Predicate, scope: &Scope) -> Result<Resolved, BuildError> {
    trace!(
        document = scope.document_path(),
        owner = scope.owner(),
        "resolving predicate"
    );

    let mut resolved = Resolved::new(rule.combinator);
    for term in rule.terms.iter().filter(|t| !t.is_blank()) {
        match term {
            Term::Literal(expr) => resolved.push(expr.as_str()),
            Term::Condition(cond) => resolved.push(resolve_condition(cond, scope)?),
            Term::Predicate(nested) => resolved.push(resolve(nested, scope)?),
        }
    }
    Ok(resolved)
}

pub(crate) fn resolve_condition(cond: &Condition, scope: &Scope) -> Result<String, BuildError> {
    let left = resolve_operand(&cond.left, scope)?;
    let right = resolve_operand(&cond.right, scope)?;
    Ok(cond.op.apply(&left, &right))
}

fn resolve_operand(operand: &Operand, scope: &Scope) -> Result<String, BuildError> {
    match operand {
        Operand::Literal(expr) if expr.trim().is_empty() => Err(BuildError::BlankOperand),
        Operand::Literal(expr) => Ok(expr.clone()),
        Operand::Field(field) => scope.field_expr(field),
        Operand::Lookup { attribute, .. } if attribute.is_empty() => {
            Err(BuildError::BlankReference)
        }
        Operand::Lookup { via, attribute } => {
            let path = scope.field_expr(via)?;
            Ok(format!("get({path}).data.{attribute}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{
        all, any, lit, lookup, sibling, this, BuildError, Condition, Operand, Operator, Resolved,
        Scope,
    };

    fn stored() -> Scope {
        Scope::document("resource.data")
    }

    #[test]
    fn literal_passes_through() {
        let r = all([lit("userId").eq("request.auth.uid")])
            .resolve(&stored())
            .unwrap();
        assert_eq!(r, Resolved::and(["userId == request.auth.uid"]));
    }

    #[test]
    fn sibling_resolves_against_document() {
        let r = all([sibling("owner").eq("request.auth.uid")])
            .resolve(&Scope::document("request.resource.data"))
            .unwrap();
        assert_eq!(
            r,
            Resolved::and(["request.resource.data.owner == request.auth.uid"])
        );
    }

    #[test]
    fn this_resolves_against_owner() {
        let r = all([this().eq("request.auth.uid")])
            .resolve(&Scope::document("data").owned_by("userId"))
            .unwrap();
        assert_eq!(r, Resolved::and(["data.userId == request.auth.uid"]));
    }

    #[test]
    fn lookup_reads_foreign_document() {
        let r = all([lookup("store", "userId").eq("request.auth.uid")])
            .resolve(&stored())
            .unwrap();
        assert_eq!(
            r,
            Resolved::and(["get(resource.data.store).data.userId == request.auth.uid"])
        );
    }

    #[test]
    fn lookup_via_this() {
        let r = all([lookup("this", "owner").eq("request.auth.uid")])
            .resolve(&Scope::document("data").owned_by("product"))
            .unwrap();
        assert_eq!(
            r,
            Resolved::and(["get(data.product).data.owner == request.auth.uid"])
        );
    }

    #[test]
    fn same_reference_differs_by_scope() {
        let rule = all([sibling("owner").eq("request.auth.uid")]);
        let read = rule.resolve(&stored()).unwrap();
        let write = rule
            .resolve(&Scope::document("request.resource.data"))
            .unwrap();
        assert_ne!(read, write);
    }

    #[test]
    fn nested_predicates_keep_shape() {
        let rule = any([
            all([sibling("a").eq("1"), sibling("b").eq("2")]),
            all(["false"]),
        ]);
        let r = rule.resolve(&Scope::document("d")).unwrap();
        assert_eq!(
            r,
            Resolved::or([
                Resolved::and(["d.a == 1", "d.b == 2"]),
                Resolved::and(["false"]),
            ])
        );
    }

    #[test]
    fn blank_literal_terms_are_dropped() {
        let rule = all(["", "x"]);
        let r = rule.resolve(&stored()).unwrap();
        assert_eq!(r, Resolved::and(["x"]));
    }

    #[test]
    fn this_without_owner_fails() {
        let result = all([this().eq("1")]).resolve(&stored());
        assert!(matches!(result, Err(BuildError::UnboundThis)));
    }

    #[test]
    fn blank_operand_fails() {
        let cond = Condition::new(lit("a"), Operator::Eq, Operand::Literal("  ".into()));
        let result = all([cond]).resolve(&stored());
        assert!(matches!(result, Err(BuildError::BlankOperand)));
    }

    #[test]
    fn blank_lookup_attribute_fails() {
        let result = all([lookup("store", "").eq("1")]).resolve(&stored());
        assert!(matches!(result, Err(BuildError::BlankReference)));
    }
}
