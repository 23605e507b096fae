use http::Method;
use serde_json::json;

use super::support::{BLOG_API, make_orchestrator};
use crate::generator::{
  attribute::SemanticType,
  dialect::Dialect,
  errors::ModelgenError,
  metrics::{SkipReason, TransformWarning},
  model::Cardinality,
  route::ResponseWrapper,
};

#[test]
fn test_orchestrator_metadata() {
  let orchestrator = make_orchestrator(BLOG_API, Dialect::MySql, &[]);
  let metadata = orchestrator.metadata();

  assert_eq!(metadata.title, "Blog API");
  assert_eq!(metadata.version, "1.2.0");
  assert_eq!(metadata.description.as_deref(), Some("Authors, posts and comments."));
}

#[test]
fn test_models_from_blog_api() {
  let output = make_orchestrator(BLOG_API, Dialect::MySql, &[]).run().unwrap();

  let names: Vec<&str> = output.models.iter().map(|m| m.name.as_str()).collect();
  assert_eq!(names, ["User", "Post", "Comment"]);

  let user = &output.models[0];
  assert_eq!(user.table_name, "{{%users}}");
  let columns: Vec<&str> = user.attributes.iter().map(|a| a.column_name.as_str()).collect();
  assert_eq!(columns, ["id", "email", "name", "role", "profile", "createdAt"]);

  let role = user.attribute("role").unwrap();
  assert_eq!(role.column_type, "string");
  assert_eq!(role.enum_values, ["admin", "editor", "reader"]);

  let profile = user.attribute("profile").unwrap();
  assert_eq!(profile.semantic_type, SemanticType::Object);
  assert!(!profile.allow_null);

  let created_at = user.attribute("createdAt").unwrap();
  assert_eq!(created_at.db_type, "datetime");
  assert_eq!(created_at.column_type, "timestamp");

  let posts = &user.relations["posts"];
  assert_eq!(posts.cardinality, Cardinality::ToMany);
  assert_eq!(posts.link.get("user_id").map(String::as_str), Some("id"));
}

#[test]
fn test_post_columns_and_relations() {
  let output = make_orchestrator(BLOG_API, Dialect::MySql, &[]).run().unwrap();
  let post = &output.models[1];

  let columns: Vec<&str> = post.attributes.iter().map(|a| a.column_name.as_str()).collect();
  assert_eq!(columns, ["id", "title", "body", "author_id", "tags", "wordCount"]);

  let body = post.attribute("body").unwrap();
  assert_eq!(body.db_type_override.as_deref(), Some("longtext"));
  assert_eq!(body.column_type, "text");

  let tags = post.attribute("tags").unwrap();
  assert_eq!(tags.db_type, "varchar[]");
  assert_eq!(tags.column_type, "string[]");

  assert!(post.attribute("wordCount").unwrap().is_virtual);

  let relations: Vec<(&str, Cardinality)> = post
    .relations
    .iter()
    .map(|(name, relation)| (name.as_str(), relation.cardinality))
    .collect();
  assert_eq!(
    relations,
    [("author", Cardinality::ToOne), ("comments", Cardinality::ToMany)]
  );

  let comment = &output.models[2];
  assert_eq!(comment.table_name, "{{%post_comment}}");
  assert_eq!(comment.attribute("rating").unwrap().default_value, Some(json!(0)));
}

#[test]
fn test_routes_from_blog_api() {
  let output = make_orchestrator(BLOG_API, Dialect::MySql, &[]).run().unwrap();

  let actual: Vec<(Method, &str, Option<&str>, Option<&ResponseWrapper>)> = output
    .routes
    .iter()
    .map(|r| {
      (
        r.method.clone(),
        r.route.as_str(),
        r.model_class.as_deref(),
        r.response_wrapper.as_ref(),
      )
    })
    .collect();

  let items = ResponseWrapper::ItemsKey("items".to_string());
  let data = ResponseWrapper::ItemKey("data".to_string());
  assert_eq!(
    actual,
    vec![
      (Method::GET, "user/index", Some("User"), Some(&items)),
      (Method::POST, "user/create", Some("User"), None),
      (Method::GET, "user/view", Some("User"), Some(&data)),
      (Method::DELETE, "user/delete", Some("User"), None),
      (Method::PATCH, "user/update", Some("User"), None),
      (Method::GET, "user/view-posts", Some("Post"), None),
      (Method::GET, "post/view-comments", Some("Comment"), None),
      (Method::GET, "site/health", None, None),
    ]
  );

  let comments = &output.routes[6];
  assert_eq!(comments.pattern, "/posts/<postId>/comments/<commentId>");
  assert_eq!(comments.path_params, ["postId", "commentId"]);
}

#[test]
fn test_stats_and_warnings() {
  let output = make_orchestrator(BLOG_API, Dialect::MySql, &[]).run().unwrap();
  let stats = &output.stats;

  assert_eq!(stats.models_extracted, 3);
  assert_eq!(stats.attributes_built, 16);
  assert_eq!(stats.to_one_relations, 2);
  assert_eq!(stats.to_many_relations, 2);
  assert_eq!(stats.routes_inferred, 8);
  assert_eq!(stats.routes_with_model, 7);
  assert_eq!(stats.routes_with_wrapper, 2);
  assert_eq!(stats.model_classes_reused, 1);
  assert_eq!(stats.skipped_schemas(), 3);

  assert!(stats.warnings.contains(&TransformWarning::SchemaSkipped {
    schema_name: "Author".to_string(),
    reason: SkipReason::Alias {
      target: "User".to_string()
    },
  }));
  assert!(stats.warnings.contains(&TransformWarning::RouteWithoutModel {
    method: "GET".to_string(),
    path: "/health".to_string(),
  }));
}

#[test]
fn test_configured_exclusions() {
  let output = make_orchestrator(BLOG_API, Dialect::MySql, &["Comment"]).run().unwrap();
  let names: Vec<&str> = output.models.iter().map(|m| m.name.as_str()).collect();
  assert_eq!(names, ["User", "Post"]);
}

#[test]
fn test_dialect_changes_datetime_db_type() {
  let output = make_orchestrator(BLOG_API, Dialect::PostgreSql, &[]).run().unwrap();
  let created_at = output.models[0].attribute("createdAt").unwrap();
  assert_eq!(created_at.db_type, "timestamp");
  assert_eq!(created_at.column_type, "timestamp");
}

#[test]
fn test_override_without_table_aborts_run() {
  let err = make_orchestrator(BLOG_API, Dialect::Sqlite, &[]).run().unwrap_err();
  assert!(matches!(err, ModelgenError::NotSupported { ref dialect, .. } if dialect == "sqlite"));
}

#[test]
fn test_runs_are_identical() {
  let orchestrator = make_orchestrator(BLOG_API, Dialect::MariaDb, &[]);
  let first = orchestrator.run().unwrap();
  let second = orchestrator.run().unwrap();

  assert_eq!(first, second);
  assert_eq!(
    serde_json::to_string(&first).unwrap(),
    serde_json::to_string(&second).unwrap()
  );
}

#[test]
fn test_models_and_routes_individually() {
  let orchestrator = make_orchestrator(BLOG_API, Dialect::MySql, &[]);
  let output = orchestrator.run().unwrap();

  assert_eq!(orchestrator.models().unwrap(), output.models);
  assert_eq!(orchestrator.routes().unwrap(), output.routes);
}

#[test]
fn test_output_shape() {
  let output = make_orchestrator(BLOG_API, Dialect::MySql, &[]).run().unwrap();
  let value = serde_json::to_value(&output).unwrap();

  assert!(value.get("stats").is_none());
  assert_eq!(value["models"][0]["tableName"], "{{%users}}");
  assert_eq!(value["models"][1]["relations"]["author"]["cardinality"], "toOne");
  assert_eq!(value["models"][1]["relations"]["author"]["link"], json!({"id": "author_id"}));
  assert_eq!(value["routes"][0]["responseWrapper"], json!({"itemsKey": "items"}));
  assert!(value["routes"][1]["responseWrapper"].is_null());
}
