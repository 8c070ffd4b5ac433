use super::condition::Operator;
use super::enum_value::{encode_values, EnumValue, NativeEnum};
use super::error::BuildError;
use super::predicate::{Combinator, Predicate};
use super::resolved::Resolved;
use super::schema::FieldMap;
use super::scope::{join, Scope};

/// The kinds of value a field can be declared to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Null,
    String,
    Int,
    Float,
    Number,
    Bool,
    Timestamp,
    Duration,
    LatLng,
    Path,
    List,
    Map,
    Enum,
    Any,
}

impl TypeTag {
    /// The name used in an `is` type test, if the tag has one.
    #[must_use]
    pub fn type_name(self) -> Option<&'static str> {
        match self {
            TypeTag::String => Some("string"),
            TypeTag::Int => Some("int"),
            TypeTag::Float => Some("float"),
            TypeTag::Number => Some("number"),
            TypeTag::Bool => Some("bool"),
            TypeTag::Timestamp => Some("timestamp"),
            TypeTag::Duration => Some("duration"),
            TypeTag::LatLng => Some("latlng"),
            TypeTag::Path => Some("path"),
            TypeTag::List => Some("list"),
            TypeTag::Map => Some("map"),
            TypeTag::Null | TypeTag::Enum | TypeTag::Any => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Shape {
    Plain,
    Enum(Vec<EnumValue>),
    List(Box<Field>),
    Map(FieldMap),
}

#[derive(Debug, Clone)]
struct Assertion {
    tag: TypeTag,
    shape: Shape,
    rule: Option<Predicate>,
}

/// One field of a document schema.
///
/// A field holds an ordered set of type assertions. The field is valid when
/// any one of them holds, which is how union and nullable fields are
/// expressed. Each assertion may carry an extra predicate in which
/// [`this()`](crate::this) names the field itself.
///
/// Registering a tag that is already present replaces its payload in place.
///
/// # Example
///
/// ```
/// use rulesmith::{Field, TypeTag, this, Predicate};
///
/// let owner = Field::new("userId")
///     .constrained(TypeTag::String, Predicate::from(this().eq("request.auth.uid")));
/// assert_eq!(owner.tags(), vec![TypeTag::String]);
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    optional: bool,
    assertions: Vec<Assertion>,
}

impl Field {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            optional: false,
            assertions: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Registered type tags in declaration order.
    #[must_use]
    pub fn tags(&self) -> Vec<TypeTag> {
        self.assertions.iter().map(|a| a.tag).collect()
    }

    /// Allow the field to be omitted from the document. Does not change the
    /// type assertions applied when it is present.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn nullable(self) -> Self {
        self.assert(TypeTag::Null, Shape::Plain)
    }

    #[must_use]
    pub fn string(self) -> Self {
        self.assert(TypeTag::String, Shape::Plain)
    }

    #[must_use]
    pub fn int(self) -> Self {
        self.assert(TypeTag::Int, Shape::Plain)
    }

    #[must_use]
    pub fn float(self) -> Self {
        self.assert(TypeTag::Float, Shape::Plain)
    }

    #[must_use]
    pub fn number(self) -> Self {
        self.assert(TypeTag::Number, Shape::Plain)
    }

    #[must_use]
    pub fn boolean(self) -> Self {
        self.assert(TypeTag::Bool, Shape::Plain)
    }

    #[must_use]
    pub fn timestamp(self) -> Self {
        self.assert(TypeTag::Timestamp, Shape::Plain)
    }

    #[must_use]
    pub fn duration(self) -> Self {
        self.assert(TypeTag::Duration, Shape::Plain)
    }

    #[must_use]
    pub fn latlng(self) -> Self {
        self.assert(TypeTag::LatLng, Shape::Plain)
    }

    /// A reference to another document.
    #[must_use]
    pub fn path(self) -> Self {
        self.assert(TypeTag::Path, Shape::Plain)
    }

    /// Any value. Renders as `true` unless an extra predicate is attached.
    #[must_use]
    pub fn any(self) -> Self {
        self.assert(TypeTag::Any, Shape::Plain)
    }

    /// A list with unchecked elements.
    #[must_use]
    pub fn list(self) -> Self {
        self.assert(TypeTag::List, Shape::Plain)
    }

    /// A list whose every element satisfies the field built by `element`.
    #[must_use]
    pub fn list_of(self, element: impl FnOnce(Field) -> Field) -> Self {
        let element = element(Field::new(""));
        self.assert(TypeTag::List, Shape::List(Box::new(element)))
    }

    /// A nested map with its own declared keys.
    #[must_use]
    pub fn map(self, builder: impl FnOnce(FieldMap) -> FieldMap) -> Self {
        let map = builder(FieldMap::new(&self.name));
        self.assert(TypeTag::Map, Shape::Map(map))
    }

    /// One of a fixed set of values. The membership test implies the type, so
    /// no separate type test is emitted.
    #[must_use]
    pub fn enumeration<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<EnumValue>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.assert(TypeTag::Enum, Shape::Enum(values))
    }

    #[must_use]
    pub fn native_enum<E: NativeEnum>(self) -> Self {
        self.enumeration(E::values())
    }

    /// Attach an extra predicate to `tag`, registering the tag first if it is
    /// not yet declared. The predicate is ANDed with the tag's own test.
    #[must_use]
    pub fn constrained(mut self, tag: TypeTag, rule: impl Into<Predicate>) -> Self {
        let rule = Some(rule.into());
        match self.assertions.iter_mut().find(|a| a.tag == tag) {
            Some(existing) => existing.rule = rule,
            None => self.assertions.push(Assertion {
                tag,
                shape: Shape::Plain,
                rule,
            }),
        }
        self
    }

    fn assert(mut self, tag: TypeTag, shape: Shape) -> Self {
        let assertion = Assertion {
            tag,
            shape,
            rule: None,
        };
        match self.assertions.iter_mut().find(|a| a.tag == tag) {
            Some(existing) => *existing = assertion,
            None => self.assertions.push(assertion),
        }
        self
    }

    /// The predicate "this field, on the document at `document`, satisfies
    /// one of its declared types". Empty when no tags are registered.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if an attached predicate fails to resolve.
    pub fn build_rules(&self, document: &str) -> Result<Resolved, BuildError> {
        self.build_for(document, join(document, &self.name))
    }

    fn build_for(&self, document: &str, target: String) -> Result<Resolved, BuildError> {
        let scope = Scope::document(document).owned_by_expr(target.clone());
        let mut rule = Resolved::new(Combinator::Or);

        for assertion in &self.assertions {
            let mut sub = Resolved::new(Combinator::And);

            match (&assertion.shape, assertion.tag) {
                (Shape::Enum(values), _) => {
                    sub.push(Operator::In.apply(&target, &encode_values(values)?));
                }
                (_, TypeTag::Null) => sub.push(Operator::Eq.apply(&target, "null")),
                (_, TypeTag::Any) => {
                    if assertion.rule.is_none() {
                        sub.push("true");
                    }
                }
                (_, tag) => {
                    if let Some(name) = tag.type_name() {
                        sub.push(Operator::Is.apply(&target, name));
                    }
                }
            }

            match &assertion.shape {
                Shape::Map(map) => sub.push(map.build_rules(&target)?),
                Shape::List(element) => {
                    if let Some(check) = element.element_rule(document, &target)? {
                        sub.push(check);
                    }
                }
                Shape::Plain | Shape::Enum(_) => {}
            }

            if let Some(extra) = &assertion.rule {
                sub.push(extra.resolve(&scope)?);
            }

            if !sub.is_empty() {
                rule.push(sub);
            }
        }

        Ok(rule)
    }

    /// `list.all(binding, check)` over the elements of `list`, or `None` if
    /// the element declares no types.
    fn element_rule(&self, document: &str, list: &str) -> Result<Option<String>, BuildError> {
        let binding = element_binding(list);
        let check = self.build_for(document, binding.clone())?;
        if check.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!("{list}.all({binding}, {})", check.render()?)))
    }
}

fn element_binding(list: &str) -> String {
    let last = list.rsplit('.').next().unwrap_or(list);
    let ident: String = last
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match ident.chars().next() {
        None => "item".to_owned(),
        Some(c) if c.is_ascii_digit() => format!("f{ident}_item"),
        Some(_) => format!("{ident}_item"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{all, sibling, this};

    fn render(field: &Field) -> String {
        field.build_rules("data").unwrap().render().unwrap()
    }

    #[test]
    fn single_type_test() {
        assert_eq!(render(&Field::new("name").string()), "data.name is string");
    }

    #[test]
    fn every_scalar_kind() {
        let cases = [
            (Field::new("f").int(), "data.f is int"),
            (Field::new("f").float(), "data.f is float"),
            (Field::new("f").number(), "data.f is number"),
            (Field::new("f").boolean(), "data.f is bool"),
            (Field::new("f").timestamp(), "data.f is timestamp"),
            (Field::new("f").duration(), "data.f is duration"),
            (Field::new("f").latlng(), "data.f is latlng"),
            (Field::new("f").path(), "data.f is path"),
            (Field::new("f").list(), "data.f is list"),
            (Field::new("f").nullable(), "data.f == null"),
            (Field::new("f").any(), "true"),
        ];
        for (field, expected) in cases {
            assert_eq!(render(&field), expected);
        }
    }

    #[test]
    fn multiple_tags_are_ored() {
        let field = Field::new("score").nullable().number();
        assert_eq!(render(&field), "(data.score == null || data.score is number)");
    }

    #[test]
    fn extra_predicate_is_anded_with_type() {
        let field = Field::new("userId")
            .constrained(TypeTag::String, Predicate::from(this().eq("request.auth.uid")));
        assert_eq!(
            render(&field),
            "(data.userId is string && data.userId == request.auth.uid)"
        );
    }

    #[test]
    fn extra_predicate_can_reference_siblings() {
        let field = Field::new("end")
            .timestamp()
            .constrained(TypeTag::Timestamp, all([this().gt(sibling("start"))]));
        assert_eq!(
            render(&field),
            "(data.end is timestamp && data.end > data.start)"
        );
    }

    #[test]
    fn enum_emits_membership_only() {
        let field = Field::new("kind").enumeration(["A", "B"]);
        assert_eq!(render(&field), r#"data.kind in ["A","B"]"#);
    }

    #[test]
    fn enum_with_extra_predicate() {
        let field = Field::new("kind")
            .enumeration(["A", "B"])
            .constrained(TypeTag::Enum, all([this().neq("'B'")]));
        assert_eq!(
            render(&field),
            r#"(data.kind in ["A","B"] && data.kind != 'B')"#
        );
    }

    #[test]
    fn native_enum_lists_values() {
        enum StoreType {}
        impl NativeEnum for StoreType {
            fn values() -> Vec<EnumValue> {
                vec![EnumValue::Int(0), EnumValue::Int(1)]
            }
        }
        let field = Field::new("type").native_enum::<StoreType>();
        assert_eq!(render(&field), "data.type in [0,1]");
    }

    #[test]
    fn any_with_extra_predicate_renders_only_the_predicate() {
        let field = Field::new("x").constrained(TypeTag::Any, all([this().neq("null")]));
        assert_eq!(render(&field), "data.x != null");
    }

    #[test]
    fn map_emits_key_guards_and_children() {
        let field = Field::new("storage").map(|m| {
            m.field("available", |f| f.number())
                .field("used", |f| f.number())
        });
        assert_eq!(
            render(&field),
            "(data.storage is map && \
             ((data.storage.keys().hasAll([\"available\",\"used\"]) && \
             data.storage.keys().hasOnly([\"available\",\"used\"])) && \
             data.storage.available is number && data.storage.used is number))"
        );
    }

    #[test]
    fn nested_maps_extend_the_path() {
        let field = Field::new("a").map(|m| m.field("b", |f| f.map(|m| m.field("c", |f| f.string()))));
        let out = render(&field);
        assert!(out.contains("data.a.b.keys().hasAll([\"c\"])"));
        assert!(out.contains("data.a.b.c is string"));
    }

    #[test]
    fn list_of_checks_every_element() {
        let field = Field::new("tags").list_of(|e| e.string());
        assert_eq!(
            render(&field),
            "(data.tags is list && data.tags.all(tags_item, tags_item is string))"
        );
    }

    #[test]
    fn list_of_untyped_element_skips_check() {
        let field = Field::new("tags").list_of(|e| e);
        assert_eq!(render(&field), "data.tags is list");
    }

    #[test]
    fn list_element_this_is_the_binding() {
        let field = Field::new("scores")
            .list_of(|e| e.constrained(TypeTag::Int, all([this().gte("0")])));
        assert_eq!(
            render(&field),
            "(data.scores is list && data.scores.all(scores_item, (scores_item is int && scores_item >= 0)))"
        );
    }

    #[test]
    fn no_tags_builds_empty_rule() {
        let rule = Field::new("x").build_rules("data").unwrap();
        assert!(rule.is_empty());
    }

    #[test]
    fn reregistering_a_tag_keeps_position() {
        let field = Field::new("x").string().number().string();
        assert_eq!(field.tags(), vec![TypeTag::String, TypeTag::Number]);
    }

    #[test]
    fn optional_does_not_touch_tags() {
        let field = Field::new("x").string().optional();
        assert!(field.is_optional());
        assert_eq!(field.tags(), vec![TypeTag::String]);
    }

    #[test]
    fn element_binding_uses_last_segment() {
        assert_eq!(element_binding("data.a.tags"), "tags_item");
        assert_eq!(element_binding("tags_item"), "tags_item_item");
    }

    #[test]
    fn element_binding_is_always_an_identifier() {
        assert_eq!(element_binding("data.1st"), "f1st_item");
        assert_eq!(element_binding("data.étiquettes"), "tiquettes_item");
        assert_eq!(element_binding("data.標籤"), "item");

        let rule = render(&Field::new("2fa").list_of(|e| e.string()));
        assert_eq!(
            rule,
            "(data.2fa is list && data.2fa.all(f2fa_item, f2fa_item is string))"
        );
    }
}
