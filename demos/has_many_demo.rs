//! Example: resolving a has-many relation lazily and eagerly
//!
//! Walks through a `User has_many Post` relation against the mock executor:
//! lazy loading for one user, the count subquery, creating a linked post, and
//! eager loading for a batch of users with a single query.
//!
//! Run with `cargo run --example has_many_demo --features mock`.

use relata::{
    load_for_batch, FactoryOptions, FromRow, LifeError, MockExecutor, ModelError, ModelFactory,
    ModelTrait, Relation, RelationDef, RelationError, RelationSettings, Row,
};
use sea_query::Value;

#[derive(Clone, Debug, Default)]
pub struct User {
    pub id: Option<i32>,
}

impl ModelTrait for User {
    fn id_field_name() -> &'static str {
        "id"
    }

    fn table_name(&self) -> &'static str {
        "users"
    }

    fn get_field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.map(Value::from),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, _value: Value) -> Result<(), ModelError> {
        Err(ModelError::FieldNotFound(field.to_string()))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Post {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub title: String,
}

impl ModelTrait for Post {
    fn id_field_name() -> &'static str {
        "id"
    }

    fn table_name(&self) -> &'static str {
        "posts"
    }

    fn get_field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.map(Value::from),
            "user_id" => self.user_id.map(Value::from),
            "title" => Some(self.title.clone().into()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: Value) -> Result<(), ModelError> {
        match (field, value) {
            ("id", Value::Int(v)) => self.id = v,
            ("user_id", Value::Int(v)) => self.user_id = v,
            ("title", Value::String(Some(v))) => self.title = v,
            (field, _) => return Err(ModelError::FieldNotFound(field.to_string())),
        }
        Ok(())
    }
}

impl ModelFactory for Post {
    fn new_instance(_options: &FactoryOptions) -> Self {
        Self::default()
    }
}

impl FromRow for Post {
    fn from_row(row: &Row) -> Result<Self, LifeError> {
        let int = |column: &str| match row.get(column) {
            Some(Value::Int(v)) => *v,
            _ => None,
        };
        Ok(Self {
            id: int("id"),
            user_id: int("user_id"),
            title: match row.get("title") {
                Some(Value::String(Some(title))) => title.clone(),
                _ => String::new(),
            },
        })
    }
}

fn post_row(id: i32, user_id: i32, title: &str) -> Row {
    Row::new()
        .with("id", id)
        .with("user_id", user_id)
        .with("title", title)
}

fn main() -> Result<(), RelationError> {
    let settings = RelationSettings::default();
    let def = settings.apply(RelationDef::has_many::<User, Post>(None, Some("user_id")));

    println!("=== Lazy loading ===");
    let executor = MockExecutor::with_dialect(settings.dialect).append_query_results(vec![vec![
        post_row(1, 7, "Hello"),
        post_row(2, 7, "Again"),
    ]]);
    let alice = User { id: Some(7) };
    let mut posts = Relation::<User, Post>::new(&def, &alice);

    for post in posts.get_data(&executor)? {
        println!("  post #{:?}: {}", post.id, post.title);
    }
    for statement in executor.statements() {
        println!("  sql: {} {:?}", statement.sql, statement.values);
    }

    println!("\n=== Count subquery ===");
    println!("  {}", settings.dialect.render(&posts.count_subquery()));

    println!("\n=== New related record ===");
    let draft = posts.get_new(&executor)?;
    draft.title = "Draft".to_string();
    println!("  new post linked to user_id {:?}", draft.user_id);
    println!("  collection now holds {} post(s)", posts.data().map_or(0, |d| d.len()));

    println!("\n=== Eager loading ===");
    let users = vec![User { id: Some(7) }, User { id: Some(8) }, User { id: None }];
    let executor = MockExecutor::with_dialect(settings.dialect).append_query_results(vec![vec![
        post_row(1, 7, "Hello"),
        post_row(3, 8, "Hi from 8"),
    ]]);
    let loaded = load_for_batch::<User, Post, _>(&def, &users, &executor)?;

    for user in &users {
        let mut posts = Relation::<User, Post>::new(&def, user);
        loaded.seed(&mut posts);
        println!("  user {:?}: {} post(s)", user.id, posts.get_data(&executor)?.len());
    }
    println!("  queries issued: {}", executor.query_count());

    Ok(())
}
