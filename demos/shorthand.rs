use rulesmith::{Predicate, Root};

fn main() {
    let read = Predicate::from_dsl(
        r#"
# signed-in readers only
request.auth != null
    AND ($public == true OR $owner == request.auth.uid)
"#,
    )
    .expect("failed to parse read rule");

    let write = Predicate::from_dsl("$owner == request.auth.uid").expect("failed to parse write rule");

    println!("read:  {read}");
    println!("write: {write}");

    let rules = Root::new()
        .collection("posts", "postId", |c| {
            c.field("owner", |f| f.string())
                .field("public", |f| f.boolean())
                .field("title", |f| f.string())
                .field("tags", |f| f.list_of(|e| e.string()).optional())
                .allow_read_if(read)
                .allow_write_if(write)
        })
        .render()
        .expect("failed to build rules");

    println!("{rules}");
}
