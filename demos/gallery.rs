use rulesmith::validation::{
    boolean, enum_validation, map, native_enum, nullable, number, optional, or, path, string,
    timestamp, unsafe_list,
};
use rulesmith::{all, lit, this, EnumValue, NativeEnum, Predicate, Root, Schema};

enum StoreType {
    BasicOnline,
    BasicPhysical,
}

impl NativeEnum for StoreType {
    fn values() -> Vec<EnumValue> {
        [StoreType::BasicOnline, StoreType::BasicPhysical]
            .into_iter()
            .map(|t| EnumValue::Int(t as i64))
            .collect()
    }
}

fn allow_owner() -> Predicate {
    all([lit("userId").eq("request.auth.uid")])
}

fn own_uid() -> Predicate {
    all([this().eq("request.auth.uid")])
}

fn main() {
    let root = Root::new().collection("users", "userId", |c| {
        c.validate("_id", string(None))
            .validate("colourTheme", number(None))
            .validate("printCalibrationHeight", number(None))
            .validate("printCalibrationWidth", number(None))
            .validate(
                "storage",
                map(
                    None,
                    Schema::new()
                        .validate("available", number(None))
                        .validate("used", number(None)),
                ),
            )
            .allow_full_access_if(allow_owner())
            .collection("artworks", "artworkId", |c| {
                c.validate("name", string(None))
                    .validate(
                        "gpsCoordinates",
                        or([
                            nullable(None),
                            map(
                                None,
                                Schema::new()
                                    .validate("latitude", number(None))
                                    .validate("longitude", number(None)),
                            ),
                        ]),
                    )
                    .allow_full_access_if(allow_owner())
                    .collection("images", "imageId", |c| {
                        c.validate("childImages", unsafe_list(None))
                            .validate("height", number(None))
                            .validate("tags", unsafe_list(None))
                            .validate("width", number(None))
                            .collection("products", "productId", |c| {
                                c.validate("name", string(None))
                                    .validate("type", enum_validation(None, ["basic", "group"]))
                                    .validate("printCount", optional(number(None)))
                                    .validate("productTemplate", optional(path(None)))
                                    .validate("artworkImage", optional(path(None)))
                                    .validate("childProducts", unsafe_list(None))
                                    .validate("userId", string(own_uid()))
                                    .allow_full_access_if(allow_owner())
                            })
                    })
                    .collection("productTemplates", "productTemplateId", |c| {
                        c.allow_full_access_if(allow_owner())
                            .validate("cropConstraintEnabled", boolean(None))
                            .validate("cropConstraintX", number(None))
                            .validate("cropConstraintY", number(None))
                            .validate("fitToPage", boolean(None))
                            .validate("includeArtworkImage", boolean(None))
                            .validate("includeSignature", boolean(None))
                            .validate("marginBottom", number(None))
                            .validate("marginLeft", number(None))
                            .validate("marginRight", number(None))
                            .validate("marginTop", number(None))
                            .validate("marginsEnabled", boolean(None))
                            .validate("name", string(None))
                            .validate("productMedium", string(None))
                    })
                    .collection("stores", "storeId", |c| {
                        c.allow_full_access_if(allow_owner())
                            .validate("name", string(None))
                            .validate("type", native_enum::<StoreType>(None))
                            .collection("stockLevels", "stockLevelId", |c| {
                                c.allow_full_access_if(allow_owner())
                                    .field("inventory", |f| f.number())
                                    .field("product", |f| f.path())
                                    .field("stockLevelAdjustAdd", |f| f.number())
                                    .field("stockLevelAdjustSell", |f| f.number())
                                    .validate("userId", string(own_uid()))
                                    .collection("history", "historyId", |c| {
                                        c.validate("timestamp", timestamp(None))
                                            .field("stockLevelChange", |f| f.number())
                                            .field("stockAfterChange", |f| f.number())
                                    })
                            })
                    })
            })
    });

    match root.render() {
        Ok(rules) => println!("{rules}"),
        Err(e) => eprintln!("failed to build rules: {e}"),
    }
}
