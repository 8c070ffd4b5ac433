use std::sync::Arc;
use std::thread;

use rulesmith::validation::{map, nullable, number, optional, or, string};
use rulesmith::{all, lit, sibling, Root, Schema};

fn build_root() -> Root {
    Root::new()
        .collection("users", "userId", |c| {
            c.field("name", |f| f.string())
                .validate("bio", optional(string(None)))
                .allow_full_access_if(all([lit("userId").eq("request.auth.uid")]))
                .collection("images", "imageId", |c| {
                    c.validate(
                        "gps",
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
                    .allow_read_if(all([sibling("public").eq("true")]))
                })
        })
        .collection("stores", "storeId", |c| {
            c.field("owner", |f| f.string())
                .allow_update_if(all([sibling("owner").eq("request.auth.uid")]))
        })
}

#[test]
fn render_across_threads() {
    let root = Arc::new(build_root());
    let expected = root.render().unwrap();

    let mut handles = vec![];
    for _ in 0..8 {
        let root = Arc::clone(&root);
        handles.push(thread::spawn(move || root.render().unwrap()));
    }

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn independently_built_trees_agree() {
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| build_root().render().unwrap()))
        .collect();
    let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}
